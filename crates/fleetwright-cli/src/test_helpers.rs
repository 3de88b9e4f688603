// Test utilities used across `fleetwright-cli` unit tests.
// Kept under `#[cfg(test)]` so it is not part of the public crate API.
use std::path::PathBuf;

use fleetwright_lib::{parse_fleet, AliasTable, Content, ContentCatalog, Faction, ImportOutcome};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Fixture catalog with an alias table derived from it.
pub fn fixture_content() -> Content {
    let catalog = ContentCatalog::from_path(&fixtures_dir().join("catalog.json"))
        .expect("fixture catalog loads");
    let aliases = AliasTable::from_catalog(&catalog);
    Content { catalog, aliases }
}

/// Import `text` as an Empire list against the fixture catalog.
pub fn sample_outcome(text: &str) -> ImportOutcome {
    let content = fixture_content();
    parse_fleet(text, Faction::Empire, &content.catalog, &content.aliases).expect("imports")
}
