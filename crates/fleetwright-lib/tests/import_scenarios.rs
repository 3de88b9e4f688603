mod common;

use common::{fixture_aliases, fixture_catalog};
use fleetwright_lib::{parse_fleet, Error, Faction, SkipReason, SourceTag};

#[test]
fn legacy_venator_name_resolves_to_current_card() {
    let catalog = fixture_catalog();
    let aliases = fixture_aliases();
    let text = "Faction: Empire\n\nVenator II (100)\n\nSquadrons:\n= 0 Points\n\nTotal Points: 100";

    let outcome = parse_fleet(text, Faction::Empire, &catalog, &aliases).expect("imports");
    assert!(outcome.is_clean(), "skipped: {:?}", outcome.skipped);
    assert_eq!(outcome.fleet().ships[0].name, "Venator II-Class Star Destroyer");
    assert_eq!(outcome.fleet().points.total, 100);
}

#[test]
fn alternate_spellings_from_the_alias_table_resolve() {
    let catalog = fixture_catalog();
    let aliases = fixture_aliases();
    let text = "Gozanti Cruisers (23)\n\nSquadrons:\n• 2 x TIE Fighter Squadrons (16)";

    let outcome = parse_fleet(text, Faction::Empire, &catalog, &aliases).expect("imports");
    assert!(outcome.skipped.is_empty(), "skipped: {:?}", outcome.skipped);
    assert_eq!(outcome.fleet().ships[0].key, "gozanti-cruisers");
    assert_eq!(outcome.fleet().squadrons[0].key, "tie-fighter");
    assert_eq!(outcome.fleet().squadrons[0].count, 2);
}

#[test]
fn shared_display_string_prefers_errata_and_keeps_bracket_source() {
    let catalog = fixture_catalog();
    let aliases = fixture_aliases();
    let text = "Victory II-Class Star Destroyer (85)\n• Gunnery Team [Legacy] (7)";

    let outcome = parse_fleet(text, Faction::Empire, &catalog, &aliases).expect("imports");
    let assigned = &outcome.fleet().ships[0].assigned_upgrades[0];
    assert_eq!(assigned.upgrade.key, "gunnery-team-errata");
    assert_eq!(assigned.upgrade.source, SourceTag::Legacy);
}

#[test]
fn flotilla_has_no_commander_slot_to_fill() {
    let catalog = fixture_catalog();
    let aliases = fixture_aliases();
    let text = "Gozanti-class Cruisers (23)\n• Grand Moff Tarkin (38)";

    let outcome = parse_fleet(text, Faction::Empire, &catalog, &aliases).expect("imports");
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].reason, SkipReason::NoOpenSlot);
    assert_eq!(outcome.fleet().points.total, 23);
}

#[test]
fn combo_upgrade_needs_both_part_slots_free() {
    let catalog = fixture_catalog();
    let aliases = fixture_aliases();
    let text = "Victory II-Class Star Destroyer (85)
• Gunnery Team (7)
• Expanded Hangar Bay (5)
• Boarding Troopers (6)";

    let outcome = parse_fleet(text, Faction::Empire, &catalog, &aliases).expect("imports");
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].reason, SkipReason::NoOpenSlot);
    assert_eq!(outcome.fleet().ships[0].total_points, 97);
}

#[test]
fn typos_come_back_with_suggestions() {
    let catalog = fixture_catalog();
    let aliases = fixture_aliases();
    let text = "Victory II-Class Star Destroyer (85)\n• Gunery Team (7)";

    let outcome = parse_fleet(text, Faction::Empire, &catalog, &aliases).expect("imports");
    let skipped = &outcome.skipped[0];
    assert_eq!(skipped.reason, SkipReason::Unresolved);
    assert_eq!(skipped.suggestions.first().map(String::as_str), Some("Gunnery Team (7)"));
}

#[test]
fn rebel_list_cannot_be_imported_into_an_empire_fleet() {
    let catalog = fixture_catalog();
    let aliases = fixture_aliases();
    let text = "Nebulon-B Escort Frigate (57)\n\nSquadrons:\n• X-wing Squadron (13)";

    let err = parse_fleet(text, Faction::Empire, &catalog, &aliases).expect_err("mismatch");
    assert!(matches!(
        err,
        Error::FactionMismatch {
            expected: Faction::Empire,
            found: Faction::Rebels,
        }
    ));
}

#[test]
fn squadron_only_list_infers_faction_from_first_squadron() {
    let catalog = fixture_catalog();
    let aliases = fixture_aliases();
    let text = "Squadrons:\n• Luke Skywalker (20)\n• 2 x X-wing Squadron (26)\n= 46 Points";

    let outcome = parse_fleet(text, Faction::Rebels, &catalog, &aliases).expect("imports");
    assert!(outcome.is_clean(), "skipped: {:?}", outcome.skipped);
    assert_eq!(outcome.declared.squadrons, Some(46));
    assert_eq!(outcome.fleet().points.squadrons, 46);
}

#[test]
fn declared_total_is_compared_not_trusted() {
    let catalog = fixture_catalog();
    let aliases = fixture_aliases();
    let text = "CR90 Corvette A (44)\n\nTotal Points: 400";

    let outcome = parse_fleet(text, Faction::Rebels, &catalog, &aliases).expect("imports");
    assert_eq!(outcome.fleet().points.total, 44);
    assert_eq!(outcome.total_mismatch(), Some((400, 44)));
}

#[test]
fn unique_and_size_restricted_upgrades_are_not_imported_twice() {
    let catalog = fixture_catalog();
    let aliases = fixture_aliases();
    let text = "Victory II-Class Star Destroyer (85)
• Grand Moff Tarkin (38)
• Dominator (12)
Victory II-Class Star Destroyer (85)
• Grand Moff Tarkin (38)
• Dominator (12)
Gladiator I-Class Star Destroyer (56)
• Dominator (12)";

    let outcome = parse_fleet(text, Faction::Empire, &catalog, &aliases).expect("imports");
    let reasons: Vec<SkipReason> = outcome.skipped.iter().map(|item| item.reason).collect();
    assert_eq!(
        reasons,
        vec![
            SkipReason::UniqueInUse,
            SkipReason::UniqueInUse,
            SkipReason::Disqualified,
        ]
    );

    let upgrades: Vec<&str> = outcome
        .fleet()
        .ships
        .iter()
        .flat_map(|ship| ship.assigned_upgrades.iter())
        .map(|assigned| assigned.upgrade.key.as_str())
        .collect();
    assert_eq!(upgrades, vec!["tarkin", "dominator"]);
    assert_eq!(outcome.fleet().points.total, 276);
}
