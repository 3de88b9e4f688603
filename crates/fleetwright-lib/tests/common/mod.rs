//! Shared fixture helpers for integration tests.

use std::fs;
use std::path::PathBuf;

use fleetwright_lib::{AliasTable, ContentCatalog};

/// Path to the fixtures directory shared with the CLI tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixture_catalog() -> ContentCatalog {
    ContentCatalog::from_path(&fixtures_dir().join("catalog.json")).expect("fixture catalog loads")
}

/// The checked-in alias table, including its legacy spellings.
#[allow(dead_code)]
pub fn fixture_aliases() -> AliasTable {
    AliasTable::from_path(&fixtures_dir().join("aliases.json")).expect("fixture aliases load")
}

/// Raw text of a sample list under `docs/fixtures/lists`.
#[allow(dead_code)]
pub fn sample_list(name: &str) -> String {
    let path = fixtures_dir().join("lists").join(name);
    fs::read_to_string(&path).expect("sample list readable")
}
