//! Upgrade constraint engine.
//!
//! Keeps every ship's slot availability consistent as upgrades are assigned
//! and removed:
//!
//! - [`assign_upgrade`] / [`unassign_upgrade`] - the two state transitions
//! - [`apply_trait_slots`] / [`set_traits`] - trait-derived `commander` and `title` slots
//! - [`UniqueNameRegistry`] - fleet-wide unique-name claims
//! - [`ConstraintState`] - disabled, greyed, enabled and filled slots per ship
//! - [`eligibility`] / [`slot_status`] - advisory checks
//!
//! Restrictions are interpreted uniformly from upgrade data. The only
//! name-driven behaviour lives in [`slots`] as constants: self-exclusive
//! `title` slots, the flotilla trait, and the combo slot table.
//! Point deltas returned by the transitions include every cascaded removal.

mod eligibility;
mod registry;
pub mod slots;
mod state;

pub use eligibility::{eligibility, next_open_index, slot_status, Ineligibility, SlotStatus};
pub use registry::UniqueNameRegistry;
pub use slots::{
    combo_rule, ComboSlot, COMBO_SLOTS, COMMANDER, FLOTILLA, OFFENSIVE_RETRO, TITLE,
    WEAPONS_TEAM, WEAPONS_TEAM_OFFENSIVE_RETRO,
};
pub use state::{ConstraintState, SlotKey};

use tracing::debug;

use crate::fleet::{AssignedUpgrade, Ship, Upgrade};
use crate::points;

use state::Contribution;

/// Place `upgrade` in `(slot_type, slot_index)` and apply its restrictions.
///
/// Whatever occupies that slot is removed first, as is any other
/// flagship-exclusive upgrade when `upgrade` is one. Returns the change in the
/// ship's total points.
pub fn assign_upgrade(
    ship: &mut Ship,
    upgrade: Upgrade,
    slot_type: &str,
    slot_index: usize,
    registry: &mut UniqueNameRegistry,
) -> i64 {
    let before = points::ship_total(ship);
    let key = SlotKey::new(slot_type, slot_index);

    if let Some(occupant) = occupant_of(ship, &key) {
        debug!(ship = %ship.name, slot = %slot_type, index = slot_index, "evicting slot occupant");
        unassign_slot(ship, &occupant, registry);
    }

    if upgrade.is_flagship_exclusive() {
        let rivals: Vec<SlotKey> = ship
            .assigned_upgrades
            .iter()
            .filter(|a| a.upgrade.is_flagship_exclusive())
            .map(slot_key)
            .collect();
        for rival in rivals {
            debug!(ship = %ship.name, slot = %rival.slot_type, "evicting flagship-exclusive upgrade");
            unassign_slot(ship, &rival, registry);
        }
    }

    let consumed = match combo_rule(slot_type) {
        Some(rule) => claim_combo_parts(ship, rule, registry),
        None => Vec::new(),
    };

    let restrictions = &upgrade.restrictions;
    let mut disabled = restrictions.disable_types.clone();
    if slots::is_self_exclusive(&upgrade.upgrade_type) {
        disabled.push(upgrade.upgrade_type.clone());
    }
    let mut enabled = Vec::new();
    for granted in &restrictions.enable_types {
        if !ship.available_upgrades.iter().any(|t| t == granted) {
            ship.available_upgrades.push(granted.clone());
            enabled.push(granted.clone());
        }
    }
    let contribution = Contribution {
        disabled,
        greyed: restrictions.grey_types.clone(),
        enabled,
        consumed,
    };

    registry.claim_upgrade(&upgrade);
    ship.constraints.record(key, contribution);
    ship.assigned_upgrades.push(AssignedUpgrade {
        upgrade,
        slot_type: slot_type.to_string(),
        slot_index,
    });

    sync_combo_slots(ship, registry);
    sort_assigned(ship);

    let after = points::ship_total(ship);
    ship.total_points = after;
    i64::from(after) - i64::from(before)
}

/// Remove the upgrade at `(slot_type, slot_index)`, reversing its effects.
///
/// Upgrades sitting in slots the removed upgrade granted are removed too.
/// Returns the points removed from the ship, cascades included. An empty slot
/// is a no-op.
pub fn unassign_upgrade(
    ship: &mut Ship,
    slot_type: &str,
    slot_index: usize,
    registry: &mut UniqueNameRegistry,
) -> u32 {
    if ship.upgrade_at(slot_type, slot_index).is_none() {
        return 0;
    }
    let before = points::ship_total(ship);
    unassign_slot(ship, &SlotKey::new(slot_type, slot_index), registry);
    sort_assigned(ship);
    let after = points::ship_total(ship);
    ship.total_points = after;
    before.saturating_sub(after)
}

/// Remove every upgrade from `ship`, releasing their unique names.
pub fn unassign_all(ship: &mut Ship, registry: &mut UniqueNameRegistry) -> u32 {
    let before = points::ship_total(ship);
    while let Some(key) = ship.assigned_upgrades.first().map(slot_key) {
        unassign_slot(ship, &key, registry);
    }
    ship.constraints.clear();
    let after = points::ship_total(ship);
    ship.total_points = after;
    before.saturating_sub(after)
}

/// Derive trait-dependent slots: every ship gets `title`, and `commander`
/// unless it is a flotilla. Flotillas lose any assigned commander.
pub fn apply_trait_slots(ship: &mut Ship, registry: &mut UniqueNameRegistry) {
    if ship.has_trait(FLOTILLA) {
        let commanders: Vec<SlotKey> = ship.upgrades_of_type(COMMANDER).map(slot_key).collect();
        for commander in commanders {
            debug!(ship = %ship.name, "flotilla cannot carry a commander");
            unassign_slot(ship, &commander, registry);
        }
        ship.available_upgrades.retain(|t| t != COMMANDER);
    } else if ship.slot_count(COMMANDER) == 0 {
        ship.available_upgrades.insert(0, COMMANDER.to_string());
    }

    for implicit in slots::IMPLICIT_SLOTS {
        if ship.slot_count(implicit) == 0 {
            ship.available_upgrades.push((*implicit).to_string());
        }
    }

    sync_combo_slots(ship, registry);
    sort_assigned(ship);
    ship.total_points = points::ship_total(ship);
}

/// Replace the ship's trait list and re-derive trait-dependent slots.
pub fn set_traits(ship: &mut Ship, traits: Vec<String>, registry: &mut UniqueNameRegistry) {
    ship.traits = traits;
    apply_trait_slots(ship, registry);
}

fn slot_key(assigned: &AssignedUpgrade) -> SlotKey {
    SlotKey::new(assigned.slot_type.clone(), assigned.slot_index)
}

/// Upgrade holding `key`, either directly or as a part consumed by a combo.
fn occupant_of(ship: &Ship, key: &SlotKey) -> Option<SlotKey> {
    if ship.upgrade_at(&key.slot_type, key.slot_index).is_some() {
        return Some(key.clone());
    }
    ship.constraints.consumer_of(key).cloned()
}

/// Pick one part slot of each type for a combo upgrade.
///
/// The highest empty index is taken so ordinary upgrades keep filling from
/// index 0. When a part type has no empty slot its highest occupant is evicted.
fn claim_combo_parts(
    ship: &mut Ship,
    rule: &ComboSlot,
    registry: &mut UniqueNameRegistry,
) -> Vec<SlotKey> {
    let mut consumed = Vec::with_capacity(rule.parts.len());
    for part in rule.parts {
        let count = ship.slot_count(part);
        if count == 0 {
            continue;
        }
        let free = (0..count)
            .rev()
            .find(|i| !ship.constraints.is_filled(part, *i));
        let index = match free {
            Some(index) => index,
            None => {
                let last = count - 1;
                if let Some(occupant) = occupant_of(ship, &SlotKey::new(part, last)) {
                    debug!(ship = %ship.name, slot = part, "evicting part slot occupant for combo");
                    unassign_slot(ship, &occupant, registry);
                }
                last
            }
        };
        consumed.push(SlotKey::new(part, index));
    }
    consumed
}

fn unassign_slot(ship: &mut Ship, key: &SlotKey, registry: &mut UniqueNameRegistry) {
    let Some(position) = ship
        .assigned_upgrades
        .iter()
        .position(|a| a.occupies(&key.slot_type, key.slot_index))
    else {
        return;
    };

    let removed = ship.assigned_upgrades.remove(position);
    let contribution = ship.constraints.release(key);
    registry.release_upgrade(&removed.upgrade);
    debug!(
        ship = %ship.name,
        upgrade = %removed.upgrade.name,
        slot = %key.slot_type,
        index = key.slot_index,
        "unassigned upgrade"
    );

    for granted in contribution.enabled {
        let heir = ship
            .assigned_upgrades
            .iter()
            .find(|a| a.upgrade.restrictions.enable_types.contains(&granted))
            .map(slot_key);
        if let Some(heir) = heir {
            ship.constraints.transfer_grant(&heir, granted);
            continue;
        }

        let dependents: Vec<SlotKey> = ship.upgrades_of_type(&granted).map(slot_key).collect();
        for dependent in dependents {
            debug!(ship = %ship.name, slot = %granted, "cascading removal of granted slot");
            unassign_slot(ship, &dependent, registry);
        }
        if let Some(index) = ship.available_upgrades.iter().rposition(|t| *t == granted) {
            ship.available_upgrades.remove(index);
        }
    }

    sync_combo_slots(ship, registry);
}

/// Keep each combo slot count equal to `min(part a, part b)` and drop combo
/// upgrades that no longer fit.
fn sync_combo_slots(ship: &mut Ship, registry: &mut UniqueNameRegistry) {
    for rule in COMBO_SLOTS {
        let want = rule.capacity(ship);
        let have = ship.slot_count(rule.slot_type);

        if have < want {
            for _ in have..want {
                let position = rule.insert_position(ship);
                ship.available_upgrades
                    .insert(position, rule.slot_type.to_string());
            }
            debug!(ship = %ship.name, slot = rule.slot_type, count = want, "synthesized combo slots");
        } else if have > want {
            for _ in want..have {
                if let Some(index) = ship
                    .available_upgrades
                    .iter()
                    .rposition(|t| t == rule.slot_type)
                {
                    ship.available_upgrades.remove(index);
                }
            }
            debug!(ship = %ship.name, slot = rule.slot_type, count = want, "removed combo slots");
        }

        let stale: Vec<SlotKey> = ship
            .upgrades_of_type(rule.slot_type)
            .map(slot_key)
            .filter(|key| {
                key.slot_index >= want
                    || ship
                        .constraints
                        .consumed_by(key)
                        .iter()
                        .any(|part| part.slot_index >= ship.slot_count(&part.slot_type))
            })
            .collect();
        for key in stale {
            unassign_slot(ship, &key, registry);
        }
    }
}

/// Order assigned upgrades by their slot type's position in `available_upgrades`.
fn sort_assigned(ship: &mut Ship) {
    let order = ship.available_upgrades.clone();
    ship.assigned_upgrades.sort_by_key(|a| {
        let rank = order
            .iter()
            .position(|t| *t == a.slot_type)
            .unwrap_or(usize::MAX);
        (rank, a.slot_index)
    });
}
