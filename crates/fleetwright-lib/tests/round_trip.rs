mod common;

use common::{fixture_aliases, fixture_catalog, sample_list};
use fleetwright_lib::catalog::Catalog;
use fleetwright_lib::engine::next_open_index;
use fleetwright_lib::{
    parse_fleet, serialize_fleet, ContentCatalog, Faction, FleetSession, InstanceId, Upgrade,
};

fn equip(session: &mut FleetSession, catalog: &ContentCatalog, ship: InstanceId, key: &str) {
    let upgrade = Upgrade::from_card(catalog.upgrade(key).expect("upgrade in fixture"));
    let slot_type = upgrade.upgrade_type.clone();
    let index = next_open_index(session.fleet().ship(ship).expect("ship"), &slot_type)
        .expect("open slot");
    session.assign_upgrade(ship, upgrade, &slot_type, index);
}

#[test]
fn canonical_sample_reexports_byte_for_byte() {
    let catalog = fixture_catalog();
    let aliases = fixture_aliases();
    let text = sample_list("canonical.txt");
    let outcome = parse_fleet(&text, Faction::Empire, &catalog, &aliases).expect("imports");
    assert_eq!(serialize_fleet(outcome.fleet()), text.trim_end());
}

#[test]
fn built_empire_fleet_survives_export_and_import() {
    let catalog = fixture_catalog();
    let aliases = fixture_aliases();
    let mut session = FleetSession::new("Legacy Raiders", Faction::Empire);

    let venator = session.add_ship(catalog.ship("venator-ii").expect("venator"));
    for key in ["motti", "boarding-troopers", "h9-turbolasers", "dominator"] {
        equip(&mut session, &catalog, venator, key);
    }
    let raider = session.add_ship(catalog.ship("raider-i-legacy").expect("raider"));
    for key in ["intel-officer", "ordnance-experts", "quad-battery-turrets-legacy"] {
        equip(&mut session, &catalog, raider, key);
    }
    let gozanti = session.add_ship(catalog.ship("gozanti-cruisers").expect("gozanti"));
    equip(&mut session, &catalog, gozanti, "expanded-hangar-bay");

    session.add_squadron(catalog.squadron("tie-interceptor").expect("interceptor"), 2);
    session.add_squadron(catalog.squadron("howlrunner").expect("howlrunner"), 1);
    for key in ["opening-salvo", "contested-outpost", "dangerous-territory"] {
        session.select_objective(catalog.objective(key).expect("objective"));
    }

    let text = session.export();
    assert!(text.contains("Raider-I Class Corvette [Legacy] (44)"));
    assert!(text.contains("• Quad Battery Turrets [Legacy] (5)"));

    let outcome = parse_fleet(&text, Faction::Empire, &catalog, &aliases).expect("imports");
    assert!(outcome.is_clean(), "skipped: {:?}", outcome.skipped);
    assert_eq!(outcome.fleet().structure(), session.fleet().structure());
    assert_eq!(outcome.fleet().points, session.fleet().points);
    assert_eq!(outcome.session.export(), text);
}

#[test]
fn built_rebel_fleet_survives_export_and_import() {
    let catalog = fixture_catalog();
    let aliases = fixture_aliases();
    let mut session = FleetSession::new("Rogue", Faction::Rebels);

    let cr90 = session.add_ship(catalog.ship("cr90a").expect("cr90"));
    for key in ["leia-organa", "engineering-team", "xi7-turbolasers"] {
        equip(&mut session, &catalog, cr90, key);
    }
    let nebulon = session.add_ship(catalog.ship("nebulon-b-escort").expect("nebulon"));
    equip(&mut session, &catalog, nebulon, "intel-officer");

    session.add_squadron(catalog.squadron("x-wing").expect("x-wing"), 3);
    session.add_squadron(catalog.squadron("luke-skywalker").expect("luke"), 1);
    session.add_squadron(catalog.squadron("b-wing").expect("b-wing"), 1);

    let text = session.export();
    assert!(text.contains("Faction: Rebellion"));
    assert!(text.contains("Commander: Leia Organa (28)"));

    let outcome = parse_fleet(&text, Faction::Rebels, &catalog, &aliases).expect("imports");
    assert!(outcome.is_clean(), "skipped: {:?}", outcome.skipped);
    assert_eq!(outcome.fleet().structure(), session.fleet().structure());
    assert_eq!(outcome.fleet().points.total, session.fleet().points.total);
}

#[test]
fn empty_fleet_round_trips() {
    let catalog = fixture_catalog();
    let aliases = fixture_aliases();
    let session = FleetSession::new("Nothing Yet", Faction::Separatists);
    let outcome = parse_fleet(&session.export(), Faction::Separatists, &catalog, &aliases)
        .expect("imports");
    assert!(outcome.is_clean());
    assert!(outcome.fleet().ships.is_empty());
    assert_eq!(outcome.fleet().name, "Nothing Yet");
}
