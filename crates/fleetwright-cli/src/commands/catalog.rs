//! Catalog command: list the cards a fleet list may name.

use anyhow::Result;
use clap::ValueEnum;

use fleetwright_lib::{display_string, Content, Faction};

use crate::output::{render_catalog, CatalogEntry, OutputFormat};

/// Card kinds accepted by `catalog --kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogKind {
    Ships,
    Upgrades,
    Squadrons,
    Objectives,
}

impl CatalogKind {
    const ALL: [CatalogKind; 4] = [
        CatalogKind::Ships,
        CatalogKind::Upgrades,
        CatalogKind::Squadrons,
        CatalogKind::Objectives,
    ];
}

pub fn handle_catalog(
    content: &Content,
    kind: Option<CatalogKind>,
    faction: Option<Faction>,
    output: OutputFormat,
) -> Result<()> {
    let entries = catalog_entries(content, kind, faction);
    render_catalog(&entries, output)?;
    Ok(())
}

/// Current printings only; cards retired by active errata are left out.
pub fn catalog_entries(
    content: &Content,
    kind: Option<CatalogKind>,
    faction: Option<Faction>,
) -> Vec<CatalogEntry> {
    let kinds = kind.map_or(CatalogKind::ALL.to_vec(), |kind| vec![kind]);
    let allowed = |card_faction: Option<Faction>| match (faction, card_faction) {
        (Some(wanted), Some(actual)) => wanted == actual,
        _ => true,
    };
    let catalog = &content.catalog;
    let mut entries = Vec::new();

    for kind in kinds {
        match kind {
            CatalogKind::Ships => {
                for card in catalog.visible_ships() {
                    if allowed(Some(card.faction)) {
                        entries.push(CatalogEntry {
                            kind: "ship",
                            key: card.key.clone(),
                            display: priced(&card.name, card.source.suffix(), card.points),
                            faction: Some(card.faction),
                        });
                    }
                }
            }
            CatalogKind::Upgrades => {
                for card in catalog.visible_upgrades() {
                    if allowed(card.faction) {
                        entries.push(CatalogEntry {
                            kind: "upgrade",
                            key: card.key.clone(),
                            display: priced(&card.name, card.source.suffix(), card.points),
                            faction: card.faction,
                        });
                    }
                }
            }
            CatalogKind::Squadrons => {
                for card in catalog.visible_squadrons() {
                    if allowed(Some(card.faction)) {
                        entries.push(CatalogEntry {
                            kind: "squadron",
                            key: card.key.clone(),
                            display: priced(&card.name, card.source.suffix(), card.points),
                            faction: Some(card.faction),
                        });
                    }
                }
            }
            CatalogKind::Objectives => {
                for card in catalog.visible_objectives() {
                    entries.push(CatalogEntry {
                        kind: "objective",
                        key: card.key.clone(),
                        display: format!("{}{} [{}]", card.name, card.source.suffix(), card.category),
                        faction: None,
                    });
                }
            }
        }
    }
    entries
}

fn priced(name: &str, suffix: String, points: u32) -> String {
    display_string(&format!("{name}{suffix}"), points)
}
