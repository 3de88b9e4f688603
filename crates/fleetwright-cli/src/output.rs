//! Output formatting for import reports and catalog listings.
//!
//! Canonical fleet text always goes to stdout unchanged so it can be piped
//! into another tool. Skipped-line warnings in text mode go to stderr.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use fleetwright_lib::parser::DeclaredTotals;
use fleetwright_lib::{Faction, Fleet, FleetPoints, ImportOutcome, SkippedItem};

use crate::terminal::{status_marks, ColorPalette};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON on stdout.
    Json,
}

/// Serializable summary of one import.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport<'a> {
    pub name: &'a str,
    pub faction: Faction,
    pub points: FleetPoints,
    pub declared: DeclaredTotals,
    pub clean: bool,
    pub skipped: &'a [SkippedItem],
    /// Canonical re-export of the imported fleet.
    pub canonical: String,
    pub fleet: &'a Fleet,
}

impl<'a> ImportReport<'a> {
    pub fn new(outcome: &'a ImportOutcome) -> Self {
        let fleet = outcome.fleet();
        Self {
            name: &fleet.name,
            faction: fleet.faction,
            points: fleet.points,
            declared: outcome.declared,
            clean: outcome.is_clean(),
            skipped: &outcome.skipped,
            canonical: outcome.session.export(),
            fleet,
        }
    }
}

/// One row of the `catalog` listing.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub kind: &'static str,
    pub key: String,
    /// Display string used in fleet lists.
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faction: Option<Faction>,
}

/// Write a serializable value as pretty JSON to stdout.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<T: Serialize>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Print canonical fleet text exactly as produced.
pub fn render_canonical(text: &str) {
    println!("{text}");
}

/// Import result: canonical text on stdout, skipped lines on stderr.
pub fn render_import(report: &ImportReport<'_>, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Text => {
            render_canonical(&report.canonical);
            let p = ColorPalette::detect();
            for item in report.skipped {
                eprintln!("{}skipped:{} {}", p.yellow, p.reset, item);
            }
            Ok(())
        }
    }
}

/// Validation report for the `check` command.
pub fn render_check(report: &ImportReport<'_>, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Text => {
            CheckRenderer::new(ColorPalette::detect()).render(report);
            Ok(())
        }
    }
}

/// Renderer for the per-ship points breakdown of `check`.
pub struct CheckRenderer {
    palette: ColorPalette,
}

impl CheckRenderer {
    #[must_use]
    pub const fn new(palette: ColorPalette) -> Self {
        Self { palette }
    }

    pub fn render(&self, report: &ImportReport<'_>) {
        for line in self.lines(report) {
            println!("{line}");
        }
    }

    /// Report lines, without trailing newlines.
    pub fn lines(&self, report: &ImportReport<'_>) -> Vec<String> {
        let p = &self.palette;
        let (ok, fail) = status_marks();
        let mut lines = vec![format!(
            "{}{}{} ({})",
            p.white_bold, report.name, p.reset, report.faction
        )];

        for ship in &report.fleet.ships {
            lines.push(format!(
                "  {}{}{} {}{} pts{}",
                p.white_bold, ship.name, p.reset, p.cyan, ship.total_points, p.reset
            ));
            for assigned in &ship.assigned_upgrades {
                lines.push(format!(
                    "    {} {}[{}]{} {}",
                    assigned.upgrade.name, p.gray, assigned.slot_type, p.reset, assigned.upgrade.points
                ));
            }
        }
        for squadron in &report.fleet.squadrons {
            lines.push(format!(
                "  {} x {} {}{} pts{}",
                squadron.count, squadron.name, p.cyan, squadron.total_points, p.reset
            ));
        }

        let total = report.points.total;
        match report.declared.total {
            Some(declared) if declared != total => lines.push(format!(
                "{}{fail}{} Total: {total} (list says {declared})",
                p.red, p.reset
            )),
            _ => lines.push(format!("{}{ok}{} Total: {total}", p.green, p.reset)),
        }
        for item in report.skipped {
            lines.push(format!("{}{fail}{} Skipped: {item}", p.yellow, p.reset));
        }
        lines
    }
}

/// Catalog listing.
pub fn render_catalog(entries: &[CatalogEntry], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => render_json(&entries),
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No matching cards in catalog.");
                return Ok(());
            }
            let p = ColorPalette::detect();
            println!("Cards ({}):", entries.len());
            for entry in entries {
                println!(
                    "{:<9} {:<44} {}{}{}",
                    entry.kind, entry.display, p.gray, entry.key, p.reset
                );
            }
            Ok(())
        }
    }
}
