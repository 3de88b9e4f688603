//! Per-ship constraint bookkeeping.

use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::SlotType;

/// One slot of a ship: slot type plus index among slots of that type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    pub slot_type: SlotType,
    pub slot_index: usize,
}

impl SlotKey {
    pub fn new(slot_type: impl Into<SlotType>, slot_index: usize) -> Self {
        Self {
            slot_type: slot_type.into(),
            slot_index,
        }
    }
}

/// Effects one assigned upgrade has on its ship, kept so they can be reversed exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Contribution {
    pub(crate) disabled: Vec<SlotType>,
    pub(crate) greyed: Vec<SlotType>,
    /// Slot types this upgrade appended to `available_upgrades`.
    pub(crate) enabled: Vec<SlotType>,
    /// Part slots taken by a combo upgrade.
    pub(crate) consumed: Vec<SlotKey>,
}

/// Derived slot state of one ship.
///
/// Never serialized; rebuilt by replaying the ship's assignments through the
/// engine. Disabled and greyed sets are unions over the contributions of the
/// upgrades currently assigned, so removing one upgrade never re-enables a
/// slot another upgrade still disables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintState {
    contributions: BTreeMap<SlotKey, Contribution>,
    filled: BTreeMap<SlotType, BTreeSet<usize>>,
}

impl ConstraintState {
    pub fn disabled_slot_types(&self) -> BTreeSet<&str> {
        self.contributions
            .values()
            .flat_map(|c| c.disabled.iter().map(String::as_str))
            .collect()
    }

    pub fn greyed_slot_types(&self) -> BTreeSet<&str> {
        self.contributions
            .values()
            .flat_map(|c| c.greyed.iter().map(String::as_str))
            .collect()
    }

    /// Slot types added to the ship by currently assigned upgrades.
    pub fn dynamically_enabled_slot_types(&self) -> BTreeSet<&str> {
        self.contributions
            .values()
            .flat_map(|c| c.enabled.iter().map(String::as_str))
            .collect()
    }

    pub fn is_disabled(&self, slot_type: &str) -> bool {
        self.contributions
            .values()
            .any(|c| c.disabled.iter().any(|t| t == slot_type))
    }

    pub fn is_greyed(&self, slot_type: &str) -> bool {
        self.contributions
            .values()
            .any(|c| c.greyed.iter().any(|t| t == slot_type))
    }

    /// Filled indices for `slot_type`, including part slots consumed by combos.
    pub fn filled_slot_indices(&self, slot_type: &str) -> BTreeSet<usize> {
        self.filled.get(slot_type).cloned().unwrap_or_default()
    }

    pub fn filled_count(&self, slot_type: &str) -> usize {
        self.filled.get(slot_type).map_or(0, BTreeSet::len)
    }

    pub fn is_filled(&self, slot_type: &str, slot_index: usize) -> bool {
        self.filled
            .get(slot_type)
            .is_some_and(|indices| indices.contains(&slot_index))
    }

    /// Combo slot whose upgrade consumed the part slot `key`, if any.
    pub fn consumer_of(&self, key: &SlotKey) -> Option<&SlotKey> {
        self.contributions
            .iter()
            .find(|(_, c)| c.consumed.contains(key))
            .map(|(owner, _)| owner)
    }

    /// Part slots consumed by the combo upgrade at `key`.
    pub fn consumed_by(&self, key: &SlotKey) -> &[SlotKey] {
        self.contributions
            .get(key)
            .map_or(&[][..], |c| c.consumed.as_slice())
    }

    pub(crate) fn record(&mut self, key: SlotKey, contribution: Contribution) {
        self.mark_filled(&key);
        for part in &contribution.consumed {
            self.mark_filled(part);
        }
        self.contributions.insert(key, contribution);
    }

    pub(crate) fn release(&mut self, key: &SlotKey) -> Contribution {
        self.unmark_filled(key);
        let contribution = self.contributions.remove(key).unwrap_or_default();
        for part in &contribution.consumed {
            self.unmark_filled(part);
        }
        contribution
    }

    /// Hand ownership of a granted slot type to another upgrade that also grants it.
    pub(crate) fn transfer_grant(&mut self, heir: &SlotKey, slot_type: SlotType) {
        if let Some(contribution) = self.contributions.get_mut(heir) {
            contribution.enabled.push(slot_type);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.contributions.clear();
        self.filled.clear();
    }

    fn mark_filled(&mut self, key: &SlotKey) {
        self.filled
            .entry(key.slot_type.clone())
            .or_default()
            .insert(key.slot_index);
    }

    fn unmark_filled(&mut self, key: &SlotKey) {
        if let Some(indices) = self.filled.get_mut(&key.slot_type) {
            indices.remove(&key.slot_index);
            if indices.is_empty() {
                self.filled.remove(&key.slot_type);
            }
        }
    }
}
