//! Advisory checks for user interfaces and the importer.
//!
//! Assignment itself never refuses; these helpers tell a caller whether a
//! slot is worth offering and why an upgrade would be illegal.

use std::fmt;

use serde::Serialize;

use crate::catalog::{ShipSize, SlotType};
use crate::fleet::{Ship, Upgrade};

use super::registry::UniqueNameRegistry;
use super::slots::combo_rule;

/// Selectability of one slot type on a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    /// At least one slot of the type is empty and selectable.
    Open,
    /// Selectable, but discouraged by an assigned upgrade.
    Greyed,
    Disabled,
    /// Every slot of the type is filled.
    Full,
    /// The ship does not offer the type.
    Missing,
}

/// Reason an upgrade should not be assigned to a ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "detail")]
pub enum Ineligibility {
    SlotMissing(SlotType),
    SlotDisabled(SlotType),
    SlotFull(SlotType),
    SizeDisqualified(ShipSize),
    TraitDisqualified(String),
    UniqueInUse(String),
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ineligibility::SlotMissing(slot) => write!(f, "ship has no {slot} slot"),
            Ineligibility::SlotDisabled(slot) => write!(f, "{slot} slot is disabled"),
            Ineligibility::SlotFull(slot) => write!(f, "every {slot} slot is filled"),
            Ineligibility::SizeDisqualified(size) => write!(f, "not allowed on {size} ships"),
            Ineligibility::TraitDisqualified(name) => {
                write!(f, "not allowed on ships with the {name} trait")
            }
            Ineligibility::UniqueInUse(name) => write!(f, "{name} is already in the fleet"),
        }
    }
}

/// Lowest empty index of `slot_type`, or `None` when every slot is filled.
///
/// A combo slot is only open while each of its part types has an empty slot too.
pub fn next_open_index(ship: &Ship, slot_type: &str) -> Option<usize> {
    let state = ship.constraints();
    let index = (0..ship.slot_count(slot_type)).find(|i| !state.is_filled(slot_type, *i))?;
    if let Some(rule) = combo_rule(slot_type) {
        let parts_open = rule
            .parts
            .iter()
            .all(|part| (0..ship.slot_count(part)).any(|i| !state.is_filled(part, i)));
        if !parts_open {
            return None;
        }
    }
    Some(index)
}

pub fn slot_status(ship: &Ship, slot_type: &str) -> SlotStatus {
    let state = ship.constraints();
    if ship.slot_count(slot_type) == 0 {
        SlotStatus::Missing
    } else if state.is_disabled(slot_type) {
        SlotStatus::Disabled
    } else if next_open_index(ship, slot_type).is_none() {
        SlotStatus::Full
    } else if state.is_greyed(slot_type) {
        SlotStatus::Greyed
    } else {
        SlotStatus::Open
    }
}

/// Everything that makes `upgrade` illegal on `ship` right now.
pub fn eligibility(
    ship: &Ship,
    upgrade: &Upgrade,
    registry: &UniqueNameRegistry,
) -> Vec<Ineligibility> {
    let mut problems = Vec::new();
    let slot = &upgrade.upgrade_type;

    match slot_status(ship, slot) {
        SlotStatus::Missing => problems.push(Ineligibility::SlotMissing(slot.clone())),
        SlotStatus::Disabled => problems.push(Ineligibility::SlotDisabled(slot.clone())),
        SlotStatus::Full => problems.push(Ineligibility::SlotFull(slot.clone())),
        SlotStatus::Open | SlotStatus::Greyed => {}
    }

    if upgrade.restrictions.size_disqualifiers.contains(&ship.size) {
        problems.push(Ineligibility::SizeDisqualified(ship.size));
    }
    for name in &upgrade.restrictions.trait_disqualifiers {
        if ship.has_trait(name) {
            problems.push(Ineligibility::TraitDisqualified(name.clone()));
        }
    }
    for name in registry.conflicts(upgrade) {
        problems.push(Ineligibility::UniqueInUse(name));
    }

    problems
}
