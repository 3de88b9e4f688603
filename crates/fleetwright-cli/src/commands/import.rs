//! Import and check commands.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::debug;

use fleetwright_lib::{Content, Faction, FleetFormat, FleetParser, ImportOutcome};

use super::read_input;
use crate::output::{render_check, render_import, ImportReport, OutputFormat};

/// Options shared by `import` and `check`.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub input: Option<PathBuf>,
    pub format: FleetFormat,
    pub faction: Faction,
    pub sandbox: bool,
}

/// Normalize and parse the input list.
pub fn run_import(content: &Content, options: &ImportOptions) -> Result<ImportOutcome> {
    let text = read_input(options.input.as_deref())?;
    debug!(format = %options.format, faction = %options.faction, "importing fleet list");
    FleetParser::new(&content.catalog, &content.aliases)
        .sandbox(options.sandbox)
        .import(&text, options.format, options.faction)
        .context("failed to import fleet list")
}

/// Print the canonical re-export. With `strict`, any skipped line is an error.
pub fn handle_import(
    content: &Content,
    options: &ImportOptions,
    output: OutputFormat,
    strict: bool,
) -> Result<()> {
    let outcome = run_import(content, options)?;
    render_import(&ImportReport::new(&outcome), output)?;
    if strict && !outcome.skipped.is_empty() {
        bail!("{} line(s) could not be imported", outcome.skipped.len());
    }
    Ok(())
}

/// Print a points breakdown and fail unless the list imported cleanly.
pub fn handle_check(content: &Content, options: &ImportOptions, output: OutputFormat) -> Result<()> {
    let outcome = run_import(content, options)?;
    render_check(&ImportReport::new(&outcome), output)?;
    if !outcome.is_clean() {
        match outcome.total_mismatch() {
            Some((declared, actual)) => bail!(
                "fleet list has problems: {} skipped line(s), declared total {declared} but cards add up to {actual}",
                outcome.skipped.len()
            ),
            None => bail!(
                "fleet list has problems: {} skipped line(s)",
                outcome.skipped.len()
            ),
        }
    }
    Ok(())
}
