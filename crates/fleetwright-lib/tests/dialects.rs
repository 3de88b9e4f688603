mod common;

use common::{fixture_aliases, fixture_catalog, sample_list};
use fleetwright_lib::{normalize, Faction, FleetFormat, FleetParser};

#[test]
fn timestamped_export_normalizes_to_canonical_text() {
    let normalized = normalize(&sample_list("timestamped.txt"), FleetFormat::Timestamped);
    assert_eq!(normalized.trim_end(), sample_list("canonical.txt").trim_end());
}

#[test]
fn counted_list_normalizes_to_canonical_layout() {
    let normalized = normalize(&sample_list("counted.txt"), FleetFormat::Counted);
    assert!(normalized.contains("Assault: Most Wanted"));
    assert!(normalized.contains("Squadrons:\n• 3 x TIE Fighter Squadron (24)\n• Howlrunner (16)"));
}

#[test]
fn every_dialect_imports_to_the_same_fleet() {
    let catalog = fixture_catalog();
    let aliases = fixture_aliases();
    let parser = FleetParser::new(&catalog, &aliases);

    let canonical = parser
        .parse(&sample_list("canonical.txt"), Faction::Empire)
        .expect("canonical imports");
    assert!(canonical.is_clean(), "skipped: {:?}", canonical.skipped);
    assert_eq!(canonical.fleet().points.total, 278);

    for (file, format) in [
        ("timestamped.txt", FleetFormat::Timestamped),
        ("hyphenated.txt", FleetFormat::Hyphenated),
        ("counted.txt", FleetFormat::Counted),
    ] {
        let outcome = parser
            .import(&sample_list(file), format, Faction::Empire)
            .expect("dialect imports");
        assert!(outcome.is_clean(), "{file} skipped: {:?}", outcome.skipped);
        assert_eq!(outcome.fleet().name, "Hammer of Tarkin", "{file}");
        assert_eq!(
            outcome.fleet().structure(),
            canonical.fleet().structure(),
            "{file}"
        );
        assert_eq!(outcome.fleet().points, canonical.fleet().points, "{file}");
    }
}

#[test]
fn wrong_dialect_still_imports_what_it_can() {
    let catalog = fixture_catalog();
    let aliases = fixture_aliases();
    let outcome = FleetParser::new(&catalog, &aliases)
        .import(&sample_list("hyphenated.txt"), FleetFormat::Canonical, Faction::Empire)
        .expect("import does not abort");
    assert!(!outcome.skipped.is_empty());
}
