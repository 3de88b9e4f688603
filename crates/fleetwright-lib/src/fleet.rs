//! Structured fleet representation shared by the parser, serializer and engine.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{
    EntityKey, Exhaust, ObjectiveCard, ObjectiveCategory, Restrictions, ShipCard, ShipSize,
    SlotType, SquadronCard, UpgradeCard,
};
use crate::engine::ConstraintState;
use crate::error::{fuzzy_matches, Error};
use crate::points::FleetPoints;
use crate::source::SourceTag;

/// Playable faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    Rebels,
    Empire,
    Republic,
    Separatists,
}

const FACTION_SYNONYMS: &[(&str, Faction)] = &[
    ("rebels", Faction::Rebels),
    ("rebel", Faction::Rebels),
    ("rebellion", Faction::Rebels),
    ("rebel alliance", Faction::Rebels),
    ("empire", Faction::Empire),
    ("galactic empire", Faction::Empire),
    ("imperial", Faction::Empire),
    ("republic", Faction::Republic),
    ("galactic republic", Faction::Republic),
    ("separatists", Faction::Separatists),
    ("separatist", Faction::Separatists),
    ("separatist alliance", Faction::Separatists),
    ("cis", Faction::Separatists),
];

impl Faction {
    /// Label written on the `Faction:` line of an exported list.
    pub fn label(self) -> &'static str {
        match self {
            Faction::Rebels => "Rebellion",
            Faction::Empire => "Empire",
            Faction::Republic => "Republic",
            Faction::Separatists => "Separatists",
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Faction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        FACTION_SYNONYMS
            .iter()
            .find(|(label, _)| *label == needle)
            .map(|(_, faction)| *faction)
            .ok_or_else(|| Error::UnknownFaction {
                name: s.trim().to_string(),
                suggestions: fuzzy_matches(
                    &needle,
                    FACTION_SYNONYMS.iter().map(|(label, _)| *label),
                    3,
                ),
            })
    }
}

/// Per-session identifier of a ship or squadron in a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Upgrade card instance as carried by a ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    pub key: EntityKey,
    pub name: String,
    #[serde(rename = "type")]
    pub upgrade_type: SlotType,
    pub points: u32,
    pub unique: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique_class: Vec<String>,
    pub source: SourceTag,
    #[serde(default)]
    pub restrictions: Restrictions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exhaust: Option<Exhaust>,
}

impl Upgrade {
    pub fn from_card(card: &UpgradeCard) -> Self {
        Self {
            key: card.key.clone(),
            name: card.name.clone(),
            upgrade_type: card.upgrade_type.clone(),
            points: card.points,
            unique: card.unique,
            unique_class: card.unique_class.clone(),
            source: card.source,
            restrictions: card.restrictions.clone().unwrap_or_default(),
            exhaust: card.exhaust.clone(),
        }
    }

    /// Override the source tag, e.g. from a `[Legacy]` bracket on an imported line.
    pub fn with_source(mut self, source: SourceTag) -> Self {
        self.source = source;
        self
    }

    pub fn is_flagship_exclusive(&self) -> bool {
        self.restrictions.flagship_exclusive
    }
}

/// Upgrade placed in a specific slot of a ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedUpgrade {
    #[serde(flatten)]
    pub upgrade: Upgrade,
    pub slot_type: SlotType,
    pub slot_index: usize,
}

impl AssignedUpgrade {
    pub fn occupies(&self, slot_type: &str, slot_index: usize) -> bool {
        self.slot_type == slot_type && self.slot_index == slot_index
    }
}

/// Ship in a fleet with its current loadout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: InstanceId,
    pub key: EntityKey,
    pub name: String,
    pub chassis: String,
    pub size: ShipSize,
    pub faction: Faction,
    /// Base points of the hull, without upgrades.
    pub points: u32,
    pub unique: bool,
    pub traits: Vec<String>,
    pub source: SourceTag,
    /// Slot types currently offered, in display order.
    pub available_upgrades: Vec<SlotType>,
    pub assigned_upgrades: Vec<AssignedUpgrade>,
    pub total_points: u32,
    #[serde(skip)]
    pub(crate) constraints: ConstraintState,
}

impl Ship {
    /// Create a ship with the chassis slots of `card` and no upgrades.
    ///
    /// Trait-derived slots (`commander`, `title`) and combo slots are added by
    /// the constraint engine when the ship joins a fleet.
    pub fn from_card(id: InstanceId, card: &ShipCard) -> Self {
        Self {
            id,
            key: card.key.clone(),
            name: card.name.clone(),
            chassis: card.chassis.clone(),
            size: card.size,
            faction: card.faction,
            points: card.points,
            unique: card.unique,
            traits: card.traits.clone(),
            source: card.source,
            available_upgrades: card.upgrades.clone(),
            assigned_upgrades: Vec::new(),
            total_points: card.points,
            constraints: ConstraintState::default(),
        }
    }

    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.iter().any(|t| t.eq_ignore_ascii_case(name))
    }

    /// Number of slots of `slot_type` the ship currently offers.
    pub fn slot_count(&self, slot_type: &str) -> usize {
        self.available_upgrades
            .iter()
            .filter(|t| t.as_str() == slot_type)
            .count()
    }

    /// Upgrade placed at exactly `(slot_type, slot_index)`.
    pub fn upgrade_at(&self, slot_type: &str, slot_index: usize) -> Option<&AssignedUpgrade> {
        self.assigned_upgrades
            .iter()
            .find(|a| a.occupies(slot_type, slot_index))
    }

    pub fn upgrades_of_type<'a>(
        &'a self,
        slot_type: &'a str,
    ) -> impl Iterator<Item = &'a AssignedUpgrade> + 'a {
        self.assigned_upgrades
            .iter()
            .filter(move |a| a.slot_type == slot_type)
    }

    /// Derived constraint state (disabled, greyed, enabled and filled slots).
    pub fn constraints(&self) -> &ConstraintState {
        &self.constraints
    }
}

/// Squadron entry; identical non-unique squadrons collapse into one record with a count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Squadron {
    pub id: InstanceId,
    pub key: EntityKey,
    pub name: String,
    pub faction: Faction,
    /// Points per squadron.
    pub points: u32,
    pub unique: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unique_class: Vec<String>,
    pub ace: bool,
    pub source: SourceTag,
    pub count: u32,
    pub total_points: u32,
}

impl Squadron {
    pub fn from_card(id: InstanceId, card: &SquadronCard, count: u32) -> Self {
        Self {
            id,
            key: card.key.clone(),
            name: card.name.clone(),
            faction: card.faction,
            points: card.points,
            unique: card.unique,
            unique_class: card.unique_class.clone(),
            ace: card.ace,
            source: card.source,
            count,
            total_points: card.points.saturating_mul(count),
        }
    }
}

/// Selected objective card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub key: EntityKey,
    pub name: String,
    pub category: ObjectiveCategory,
    pub source: SourceTag,
}

impl Objective {
    pub fn from_card(card: &ObjectiveCard) -> Self {
        Self {
            key: card.key.clone(),
            name: card.name.clone(),
            category: card.category.clone(),
            source: card.source,
        }
    }
}

/// A complete fleet list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fleet {
    pub name: String,
    pub faction: Faction,
    /// Sandbox fleets may select any number of objectives per category.
    pub sandbox: bool,
    pub ships: Vec<Ship>,
    pub squadrons: Vec<Squadron>,
    pub objectives: Vec<Objective>,
    pub points: FleetPoints,
}

impl Fleet {
    pub fn new(name: impl Into<String>, faction: Faction) -> Self {
        Self {
            name: name.into(),
            faction,
            sandbox: false,
            ships: Vec::new(),
            squadrons: Vec::new(),
            objectives: Vec::new(),
            points: FleetPoints::default(),
        }
    }

    pub fn ship(&self, id: InstanceId) -> Option<&Ship> {
        self.ships.iter().find(|ship| ship.id == id)
    }

    pub fn ship_mut(&mut self, id: InstanceId) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|ship| ship.id == id)
    }

    pub fn squadron(&self, id: InstanceId) -> Option<&Squadron> {
        self.squadrons.iter().find(|squadron| squadron.id == id)
    }

    /// Objectives selected for `category`, in selection order.
    pub fn objectives_in<'a>(
        &'a self,
        category: &'a ObjectiveCategory,
    ) -> impl Iterator<Item = &'a Objective> + 'a {
        self.objectives
            .iter()
            .filter(move |objective| &objective.category == category)
    }

    /// First assigned upgrade of type `commander` across all ships.
    pub fn commander(&self) -> Option<&Upgrade> {
        self.ships
            .iter()
            .flat_map(|ship| ship.assigned_upgrades.iter())
            .find(|assigned| assigned.upgrade.upgrade_type == crate::engine::COMMANDER)
            .map(|assigned| &assigned.upgrade)
    }

    /// Re-derive every ship, squadron and fleet total from current state.
    pub fn recompute_points(&mut self) {
        for ship in &mut self.ships {
            ship.total_points = crate::points::ship_total(ship);
        }
        for squadron in &mut self.squadrons {
            squadron.total_points = crate::points::squadron_total(squadron);
        }
        self.points = FleetPoints::derive(self);
    }

    /// Structural snapshot used to compare fleets independent of instance ids and formatting.
    pub fn structure(&self) -> FleetStructure {
        let ships = self
            .ships
            .iter()
            .map(|ship| {
                let mut upgrades: Vec<(SlotType, usize, EntityKey)> = ship
                    .assigned_upgrades
                    .iter()
                    .map(|a| (a.slot_type.clone(), a.slot_index, a.upgrade.key.clone()))
                    .collect();
                upgrades.sort();
                ShipStructure {
                    key: ship.key.clone(),
                    upgrades,
                }
            })
            .collect();

        let mut squadrons: BTreeMap<EntityKey, u32> = BTreeMap::new();
        for squadron in &self.squadrons {
            let merged = squadrons.entry(squadron.key.clone()).or_default();
            *merged = merged.saturating_add(squadron.count);
        }

        let objectives = self
            .objectives
            .iter()
            .map(|objective| (objective.category.clone(), objective.key.clone()))
            .collect();

        FleetStructure {
            ships,
            squadrons,
            objectives,
        }
    }
}

/// Ship part of a [`FleetStructure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipStructure {
    pub key: EntityKey,
    /// `(slot type, slot index, upgrade key)`, sorted.
    pub upgrades: Vec<(SlotType, usize, EntityKey)>,
}

/// Formatting- and id-independent content of a fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetStructure {
    pub ships: Vec<ShipStructure>,
    /// Total count per squadron key.
    pub squadrons: BTreeMap<EntityKey, u32>,
    pub objectives: BTreeSet<(ObjectiveCategory, EntityKey)>,
}
