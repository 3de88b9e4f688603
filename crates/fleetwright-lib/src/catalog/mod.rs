//! Content catalog read interface and the JSON-backed in-memory catalog.
//!
//! The rest of the library only consumes the [`Catalog`] trait: given an
//! entity key it returns immutable card data or `None`. [`ContentCatalog`] is
//! the implementation used by the CLI and the tests; it loads a single JSON
//! document holding ships, upgrades, squadrons, objectives and the active
//! errata key set.

pub mod cards;

pub use cards::{
    EntityKey, Exhaust, ExhaustKind, ObjectiveCard, ObjectiveCategory, Restrictions, ShipCard,
    ShipSize, SlotType, SquadronCard, UpgradeCard,
};

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Kind of catalog entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Ship,
    Upgrade,
    Squadron,
    Objective,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Ship => "ship",
            EntityKind::Upgrade => "upgrade",
            EntityKind::Squadron => "squadron",
            EntityKind::Objective => "objective",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Read-only access to card data keyed by entity key.
pub trait Catalog {
    fn ship(&self, key: &str) -> Option<&ShipCard>;
    fn upgrade(&self, key: &str) -> Option<&UpgradeCard>;
    fn squadron(&self, key: &str) -> Option<&SquadronCard>;
    fn objective(&self, key: &str) -> Option<&ObjectiveCard>;

    /// Keys currently active as errata revisions. Empty unless the catalog tracks errata.
    fn errata(&self) -> Option<&ErrataKeys> {
        None
    }
}

/// Active errata revisions, partitioned by entity kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrataKeys {
    #[serde(default)]
    pub ships: HashSet<EntityKey>,
    #[serde(default)]
    pub squadrons: HashSet<EntityKey>,
    #[serde(default)]
    pub upgrades: HashSet<EntityKey>,
    #[serde(default)]
    pub objectives: HashSet<EntityKey>,
}

impl ErrataKeys {
    fn keys(&self, kind: EntityKind) -> &HashSet<EntityKey> {
        match kind {
            EntityKind::Ship => &self.ships,
            EntityKind::Upgrade => &self.upgrades,
            EntityKind::Squadron => &self.squadrons,
            EntityKind::Objective => &self.objectives,
        }
    }

    /// Whether `key` is an active errata revision of the given kind.
    pub fn is_active(&self, kind: EntityKind, key: &str) -> bool {
        self.keys(kind).contains(key)
    }

    /// Whether any kind lists `key` as active errata.
    pub fn is_active_any(&self, key: &str) -> bool {
        [
            EntityKind::Ship,
            EntityKind::Upgrade,
            EntityKind::Squadron,
            EntityKind::Objective,
        ]
        .into_iter()
        .any(|kind| self.is_active(kind, key))
    }

    /// Whether `key` is an original printing retired by an active `<key>-errata` revision.
    pub fn is_superseded(&self, kind: EntityKind, key: &str) -> bool {
        self.is_active(kind, &format!("{key}-errata"))
    }
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    ships: Vec<ShipCard>,
    #[serde(default)]
    upgrades: Vec<UpgradeCard>,
    #[serde(default)]
    squadrons: Vec<SquadronCard>,
    #[serde(default)]
    objectives: Vec<ObjectiveCard>,
    #[serde(default)]
    errata: ErrataKeys,
}

/// Catalog of every card, loaded from a JSON document.
#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    ships: HashMap<EntityKey, ShipCard>,
    upgrades: HashMap<EntityKey, UpgradeCard>,
    squadrons: HashMap<EntityKey, SquadronCard>,
    objectives: HashMap<EntityKey, ObjectiveCard>,
    errata: ErrataKeys,
    source: Option<PathBuf>,
}

impl ContentCatalog {
    /// Load a catalog from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ContentNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = fs::File::open(path)?;
        let mut catalog = Self::from_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        debug!(
            path = %path.display(),
            ships = catalog.ships.len(),
            upgrades = catalog.upgrades.len(),
            squadrons = catalog.squadrons.len(),
            objectives = catalog.objectives.len(),
            "loaded content catalog"
        );
        Ok(catalog)
    }

    /// Load a catalog from a reader (e.g., file or in-memory buffer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;

        let mut catalog = Self {
            errata: document.errata,
            ..Self::default()
        };
        for ship in document.ships {
            catalog.insert_ship(ship)?;
        }
        for upgrade in document.upgrades {
            catalog.insert_upgrade(upgrade)?;
        }
        for squadron in document.squadrons {
            catalog.insert_squadron(squadron)?;
        }
        for objective in document.objectives {
            catalog.insert_objective(objective)?;
        }
        Ok(catalog)
    }

    pub fn insert_ship(&mut self, ship: ShipCard) -> Result<()> {
        cards::validate_identity("ship", &ship.key, &ship.name)?;
        insert_unique(&mut self.ships, EntityKind::Ship, ship.key.clone(), ship)
    }

    pub fn insert_upgrade(&mut self, upgrade: UpgradeCard) -> Result<()> {
        cards::validate_identity("upgrade", &upgrade.key, &upgrade.name)?;
        if upgrade.upgrade_type.trim().is_empty() {
            return Err(Error::CatalogValidation {
                message: format!("upgrade '{}' has an empty type", upgrade.key),
            });
        }
        insert_unique(
            &mut self.upgrades,
            EntityKind::Upgrade,
            upgrade.key.clone(),
            upgrade,
        )
    }

    pub fn insert_squadron(&mut self, squadron: SquadronCard) -> Result<()> {
        cards::validate_identity("squadron", &squadron.key, &squadron.name)?;
        insert_unique(
            &mut self.squadrons,
            EntityKind::Squadron,
            squadron.key.clone(),
            squadron,
        )
    }

    pub fn insert_objective(&mut self, objective: ObjectiveCard) -> Result<()> {
        cards::validate_identity("objective", &objective.key, &objective.name)?;
        insert_unique(
            &mut self.objectives,
            EntityKind::Objective,
            objective.key.clone(),
            objective,
        )
    }

    /// Ships not superseded by active errata, sorted by name.
    pub fn visible_ships(&self) -> Vec<&ShipCard> {
        visible(&self.ships, &self.errata, EntityKind::Ship, |c| &c.name)
    }

    /// Upgrades not superseded by active errata, sorted by name.
    pub fn visible_upgrades(&self) -> Vec<&UpgradeCard> {
        visible(&self.upgrades, &self.errata, EntityKind::Upgrade, |c| {
            &c.name
        })
    }

    /// Squadrons not superseded by active errata, sorted by name.
    pub fn visible_squadrons(&self) -> Vec<&SquadronCard> {
        visible(&self.squadrons, &self.errata, EntityKind::Squadron, |c| {
            &c.name
        })
    }

    /// Objectives not superseded by active errata, sorted by name.
    pub fn visible_objectives(&self) -> Vec<&ObjectiveCard> {
        visible(&self.objectives, &self.errata, EntityKind::Objective, |c| {
            &c.name
        })
    }

    /// Every ship printing, superseded ones included, ordered by key.
    pub fn all_ships(&self) -> Vec<&ShipCard> {
        by_key(&self.ships)
    }

    pub fn all_upgrades(&self) -> Vec<&UpgradeCard> {
        by_key(&self.upgrades)
    }

    pub fn all_squadrons(&self) -> Vec<&SquadronCard> {
        by_key(&self.squadrons)
    }

    pub fn all_objectives(&self) -> Vec<&ObjectiveCard> {
        by_key(&self.objectives)
    }

    /// Get the source path if the catalog was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl Catalog for ContentCatalog {
    fn ship(&self, key: &str) -> Option<&ShipCard> {
        self.ships.get(key)
    }

    fn upgrade(&self, key: &str) -> Option<&UpgradeCard> {
        self.upgrades.get(key)
    }

    fn squadron(&self, key: &str) -> Option<&SquadronCard> {
        self.squadrons.get(key)
    }

    fn objective(&self, key: &str) -> Option<&ObjectiveCard> {
        self.objectives.get(key)
    }

    fn errata(&self) -> Option<&ErrataKeys> {
        Some(&self.errata)
    }
}

fn insert_unique<T>(
    map: &mut HashMap<EntityKey, T>,
    kind: EntityKind,
    key: EntityKey,
    value: T,
) -> Result<()> {
    if map.contains_key(&key) {
        return Err(Error::DuplicateEntityKey {
            kind: kind.label(),
            key,
        });
    }
    map.insert(key, value);
    Ok(())
}

fn by_key<T>(map: &HashMap<EntityKey, T>) -> Vec<&T> {
    let mut cards: Vec<(&EntityKey, &T)> = map.iter().collect();
    cards.sort_by(|a, b| a.0.cmp(b.0));
    cards.into_iter().map(|(_, card)| card).collect()
}

fn visible<'a, T>(
    map: &'a HashMap<EntityKey, T>,
    errata: &ErrataKeys,
    kind: EntityKind,
    name: impl Fn(&T) -> &String,
) -> Vec<&'a T> {
    let mut cards: Vec<(&EntityKey, &T)> = map
        .iter()
        .filter(|(key, _)| !errata.is_superseded(kind, key))
        .collect();
    cards.sort_by(|a, b| name(a.1).cmp(name(b.1)).then_with(|| a.0.cmp(b.0)));
    cards.into_iter().map(|(_, card)| card).collect()
}
