//! Subcommand handlers. `main.rs` parses arguments and dispatches here.

pub mod catalog;
pub mod import;
pub mod normalize;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};

use fleetwright_lib::{resolve_content_paths, Content};

/// Read fleet text from `path`, or from stdin when `path` is absent or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read fleet list from {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read fleet list from stdin")?;
            Ok(text)
        }
    }
}

/// Resolve and load the catalog and alias table.
pub fn load_content(catalog: Option<&Path>, aliases: Option<&Path>) -> Result<Content> {
    let paths = resolve_content_paths(catalog, aliases)
        .context("failed to locate the content catalog")?;
    Content::load(&paths)
        .with_context(|| format!("failed to load content from {}", paths.catalog.display()))
}
