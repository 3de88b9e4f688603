//! Locating and loading the content catalog and alias table.

use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info};

use crate::alias::AliasTable;
use crate::catalog::ContentCatalog;
use crate::error::{Error, Result};

pub const CATALOG_FILENAME: &str = "catalog.json";
pub const ALIASES_FILENAME: &str = "aliases.json";

/// Environment variable overriding the catalog location.
pub const CATALOG_ENV: &str = "FLEETWRIGHT_CATALOG";
/// Environment variable overriding the alias table location.
pub const ALIASES_ENV: &str = "FLEETWRIGHT_ALIASES";

/// Resolved locations of the content files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPaths {
    pub catalog: PathBuf,
    /// `None` means the alias table is derived from the catalog.
    pub aliases: Option<PathBuf>,
}

/// Catalog and alias table loaded together.
#[derive(Debug, Clone)]
pub struct Content {
    pub catalog: ContentCatalog,
    pub aliases: AliasTable,
}

impl Content {
    pub fn load(paths: &ContentPaths) -> Result<Self> {
        let catalog = ContentCatalog::from_path(&paths.catalog)?;
        let aliases = match &paths.aliases {
            Some(path) => AliasTable::from_path(path)?,
            None => AliasTable::from_catalog(&catalog),
        };
        info!(
            catalog = %paths.catalog.display(),
            aliases = aliases.len(),
            "content loaded"
        );
        Ok(Self { catalog, aliases })
    }
}

/// Platform data directory holding `catalog.json` and `aliases.json`.
pub fn default_content_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "fleetwright", "fleetwright")
        .ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Resolve content locations.
///
/// The catalog is taken from `catalog`, then `FLEETWRIGHT_CATALOG`, then the
/// platform data directory. Debug builds fall back to the checked-in
/// fixtures. The alias table follows the same order and finally looks for
/// `aliases.json` next to the resolved catalog.
pub fn resolve_content_paths(
    catalog: Option<&Path>,
    aliases: Option<&Path>,
) -> Result<ContentPaths> {
    let catalog = resolve_catalog(catalog)?;
    let aliases = aliases
        .map(Path::to_path_buf)
        .or_else(|| env::var_os(ALIASES_ENV).map(PathBuf::from))
        .or_else(|| sibling_aliases(&catalog));
    debug!(
        catalog = %catalog.display(),
        aliases = ?aliases,
        "resolved content paths"
    );
    Ok(ContentPaths { catalog, aliases })
}

fn resolve_catalog(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env::var_os(CATALOG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let default = default_content_dir().map(|dir| dir.join(CATALOG_FILENAME));
    if let Ok(path) = &default {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    #[cfg(debug_assertions)]
    {
        let fixture = fixture_catalog_path();
        if fixture.exists() {
            debug!(path = %fixture.display(), "using fixture catalog");
            return Ok(fixture);
        }
    }

    let path = default?;
    Err(Error::ContentNotFound { path })
}

fn sibling_aliases(catalog: &Path) -> Option<PathBuf> {
    let candidate = catalog.parent()?.join(ALIASES_FILENAME);
    candidate.exists().then_some(candidate)
}

#[cfg(debug_assertions)]
fn fixture_catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/catalog.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn explicit_paths_win() {
        let paths = resolve_content_paths(
            Some(Path::new("/tmp/cards.json")),
            Some(Path::new("/tmp/names.json")),
        )
        .expect("paths resolve");
        assert_eq!(paths.catalog, PathBuf::from("/tmp/cards.json"));
        assert_eq!(paths.aliases, Some(PathBuf::from("/tmp/names.json")));
    }

    #[test]
    fn aliases_next_to_catalog_are_picked_up() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalog = dir.path().join(CATALOG_FILENAME);
        fs::write(&catalog, "{}").expect("write catalog");
        assert_eq!(sibling_aliases(&catalog), None);

        fs::write(dir.path().join(ALIASES_FILENAME), "{}").expect("write aliases");
        assert_eq!(
            sibling_aliases(&catalog),
            Some(dir.path().join(ALIASES_FILENAME))
        );
    }

    #[test]
    fn load_derives_aliases_when_no_table_is_given() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalog = dir.path().join(CATALOG_FILENAME);
        fs::write(
            &catalog,
            r#"{"objectives": [{"key": "most-wanted", "name": "Most Wanted", "category": "assault"}]}"#,
        )
        .expect("write catalog");

        let content = Content::load(&ContentPaths {
            catalog,
            aliases: None,
        })
        .expect("content loads");
        assert_eq!(content.aliases.resolve("Most Wanted", None), Some("most-wanted"));
    }

    #[test]
    fn missing_catalog_is_reported() {
        let err = Content::load(&ContentPaths {
            catalog: PathBuf::from("/nonexistent/catalog.json"),
            aliases: None,
        })
        .expect_err("missing catalog");
        assert!(matches!(err, Error::ContentNotFound { .. }));
    }
}
