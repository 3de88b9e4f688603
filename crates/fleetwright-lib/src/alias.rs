//! Display-string to entity-key resolution.
//!
//! Exported lists name cards by a display string such as
//! `"Gunnery Team (7)"` or `"Gunnery Team [Legacy] (7)"`. The alias table maps
//! each display string to one entity key, or to several candidates when an
//! original printing and its errata revisions share the same text.

use std::collections::HashMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{ContentCatalog, EntityKey, ErrataKeys};
use crate::source::SourceTag;
use crate::error::{fuzzy_matches, Error, Result};

/// Suffix carried by the default-ruleset errata revision of a card.
pub const ERRATA_SUFFIX: &str = "-errata";

/// Value stored against a display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AliasTarget {
    Single(EntityKey),
    Candidates(Vec<EntityKey>),
}

/// Mapping from exact display string to entity key(s).
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: HashMap<String, AliasTarget>,
    source: Option<PathBuf>,
}

impl AliasTable {
    /// Load an alias table from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ContentNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = fs::File::open(path)?;
        let mut table = Self::from_reader(file)?;
        table.source = Some(path.to_path_buf());
        debug!(path = %path.display(), entries = table.len(), "loaded alias table");
        Ok(table)
    }

    /// Load an alias table from a reader holding a JSON object.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let entries: HashMap<String, AliasTarget> = serde_json::from_reader(reader)?;
        for (display, target) in &entries {
            if let AliasTarget::Candidates(keys) = target {
                if keys.is_empty() {
                    return Err(Error::AliasValidation {
                        message: format!("alias '{display}' has an empty candidate list"),
                    });
                }
            }
        }
        Ok(Self {
            entries,
            source: None,
        })
    }

    /// Derive a table from catalog cards when no alias file is available.
    ///
    /// Priced cards are listed as `"Name (points)"`, objectives by bare name.
    /// Cards from a bracketed source are listed as `"Name [Tag] (points)"`
    /// instead. Cards sharing a display string become candidates in key order.
    pub fn from_catalog(catalog: &ContentCatalog) -> Self {
        let mut table = Self::default();
        for ship in catalog.all_ships() {
            table.add_candidate(priced(&ship.name, ship.source, ship.points), &ship.key);
        }
        for upgrade in catalog.all_upgrades() {
            table.add_candidate(
                priced(&upgrade.name, upgrade.source, upgrade.points),
                &upgrade.key,
            );
        }
        for squadron in catalog.all_squadrons() {
            table.add_candidate(
                priced(&squadron.name, squadron.source, squadron.points),
                &squadron.key,
            );
        }
        for objective in catalog.all_objectives() {
            let display = format!("{}{}", objective.name, objective.source.suffix());
            table.add_candidate(display, &objective.key);
        }
        debug!(entries = table.len(), "derived alias table from catalog");
        table
    }

    pub fn insert(&mut self, display: impl Into<String>, target: AliasTarget) {
        self.entries.insert(display.into(), target);
    }

    fn add_candidate(&mut self, display: String, key: &str) {
        let Some(target) = self.entries.get_mut(&display) else {
            self.entries
                .insert(display, AliasTarget::Single(key.to_string()));
            return;
        };
        match target {
            AliasTarget::Single(existing) => {
                if existing != key {
                    let first = std::mem::take(existing);
                    *target = AliasTarget::Candidates(vec![first, key.to_string()]);
                }
            }
            AliasTarget::Candidates(keys) => {
                if !keys.iter().any(|k| k == key) {
                    keys.push(key.to_string());
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw lookup of the stored target for an exact display string.
    pub fn target(&self, display: &str) -> Option<&AliasTarget> {
        self.entries.get(display.trim())
    }

    /// Resolve a display string to a single entity key.
    ///
    /// Ambiguous entries prefer the key ending exactly in `-errata`, then any
    /// candidate listed in `errata` as active, then the first candidate.
    pub fn resolve(&self, display: &str, errata: Option<&ErrataKeys>) -> Option<&str> {
        match self.target(display)? {
            AliasTarget::Single(key) => Some(key.as_str()),
            AliasTarget::Candidates(keys) => select_candidate(keys, errata),
        }
    }

    /// Close display strings for an unresolved lookup.
    pub fn suggestions(&self, display: &str, limit: usize) -> Vec<String> {
        fuzzy_matches(display, self.entries.keys().map(String::as_str), limit)
    }

    /// Get the source path if the table was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

fn select_candidate<'a>(keys: &'a [EntityKey], errata: Option<&ErrataKeys>) -> Option<&'a str> {
    keys.iter()
        .find(|key| key.ends_with(ERRATA_SUFFIX))
        .or_else(|| {
            errata.and_then(|errata| keys.iter().find(|key| errata.is_active_any(key)))
        })
        .or_else(|| keys.first())
        .map(String::as_str)
}

fn priced(name: &str, source: SourceTag, points: u32) -> String {
    display_string(&format!("{name}{}", source.suffix()), points)
}

/// Build the display string used as alias key for a priced card.
pub fn display_string(name: &str, points: u32) -> String {
    format!("{} ({})", name.trim(), points)
}
