//! Slot-type data the engine interprets: named slot types, combo rules and trait-derived slots.

use crate::fleet::Ship;

pub const COMMANDER: &str = "commander";
pub const TITLE: &str = "title";
pub const WEAPONS_TEAM: &str = "weapons-team";
pub const OFFENSIVE_RETRO: &str = "offensive-retro";
pub const WEAPONS_TEAM_OFFENSIVE_RETRO: &str = "weapons-team-offensive-retro";

/// Trait that removes the `commander` slot from a ship.
pub const FLOTILLA: &str = "flotilla";

/// Slot types where equipping one upgrade disables the type for the rest of the ship.
pub const SELF_EXCLUSIVE_TYPES: &[&str] = &[TITLE];

/// Slot types granted to every ship regardless of chassis.
pub const IMPLICIT_SLOTS: &[&str] = &[TITLE];

/// A slot type that exists once per pair of its two part slot types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboSlot {
    pub slot_type: &'static str,
    pub parts: [&'static str; 2],
}

/// Every combo slot the engine synthesizes.
pub const COMBO_SLOTS: &[ComboSlot] = &[ComboSlot {
    slot_type: WEAPONS_TEAM_OFFENSIVE_RETRO,
    parts: [WEAPONS_TEAM, OFFENSIVE_RETRO],
}];

pub fn combo_rule(slot_type: &str) -> Option<&'static ComboSlot> {
    COMBO_SLOTS.iter().find(|rule| rule.slot_type == slot_type)
}

impl ComboSlot {
    /// Combo slots the ship should offer: one per pair of part slots.
    pub fn capacity(&self, ship: &Ship) -> usize {
        ship.slot_count(self.parts[0])
            .min(ship.slot_count(self.parts[1]))
    }

    /// Position just after the last part or combo slot in `available_upgrades`.
    pub(crate) fn insert_position(&self, ship: &Ship) -> usize {
        [self.parts[0], self.parts[1], self.slot_type]
            .iter()
            .filter_map(|slot| {
                ship.available_upgrades
                    .iter()
                    .rposition(|t| t.as_str() == *slot)
            })
            .max()
            .map_or(ship.available_upgrades.len(), |last| last + 1)
    }
}

/// Whether `slot_type` disables itself once filled.
pub fn is_self_exclusive(slot_type: &str) -> bool {
    SELF_EXCLUSIVE_TYPES.contains(&slot_type)
}
