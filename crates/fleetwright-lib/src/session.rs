//! One open fleet and its unique-name registry.
//!
//! Every mutation goes through [`FleetSession`] so the registry and point
//! totals stay in step with the fleet. The importer builds its result through
//! the same methods.

use tracing::debug;

use crate::catalog::{ObjectiveCard, ObjectiveCategory, ShipCard, SquadronCard};
use crate::engine::{self, Ineligibility, UniqueNameRegistry};
use crate::fleet::{Faction, Fleet, InstanceId, Objective, Ship, Squadron, Upgrade};
use crate::serializer::serialize_fleet;

/// Exclusive edit session over one fleet.
#[derive(Debug, Clone)]
pub struct FleetSession {
    fleet: Fleet,
    registry: UniqueNameRegistry,
    next_id: u64,
}

impl FleetSession {
    pub fn new(name: impl Into<String>, faction: Faction) -> Self {
        Self {
            fleet: Fleet::new(name, faction),
            registry: UniqueNameRegistry::new(),
            next_id: 1,
        }
    }

    /// Allow any number of objectives per category.
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.fleet.sandbox = sandbox;
        self
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn registry(&self) -> &UniqueNameRegistry {
        &self.registry
    }

    pub fn into_fleet(self) -> Fleet {
        self.fleet
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.fleet.name = name.into();
    }

    fn allocate_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a ship with its trait-derived slots and claim its name if unique.
    pub fn add_ship(&mut self, card: &ShipCard) -> InstanceId {
        let id = self.allocate_id();
        let mut ship = Ship::from_card(id, card);
        self.registry.claim_ship(&ship);
        engine::apply_trait_slots(&mut ship, &mut self.registry);
        debug!(ship = %ship.name, id = %id, "added ship");
        self.fleet.ships.push(ship);
        self.fleet.recompute_points();
        id
    }

    /// Remove a ship and every upgrade it carries.
    pub fn remove_ship(&mut self, id: InstanceId) -> Option<Ship> {
        let position = self.fleet.ships.iter().position(|ship| ship.id == id)?;
        let mut ship = self.fleet.ships.remove(position);
        engine::unassign_all(&mut ship, &mut self.registry);
        self.registry.release_ship(&ship);
        self.fleet.recompute_points();
        Some(ship)
    }

    /// Replace a ship's traits. Returns `false` for an unknown ship.
    pub fn set_ship_traits(&mut self, id: InstanceId, traits: Vec<String>) -> bool {
        let Some(ship) = self.fleet.ship_mut(id) else {
            return false;
        };
        engine::set_traits(ship, traits, &mut self.registry);
        self.fleet.recompute_points();
        true
    }

    /// Assign `upgrade` on ship `id`. Returns the point delta, or `None` for
    /// an unknown ship.
    pub fn assign_upgrade(
        &mut self,
        id: InstanceId,
        upgrade: Upgrade,
        slot_type: &str,
        slot_index: usize,
    ) -> Option<i64> {
        let ship = self.fleet.ship_mut(id)?;
        let delta = engine::assign_upgrade(ship, upgrade, slot_type, slot_index, &mut self.registry);
        self.fleet.recompute_points();
        Some(delta)
    }

    /// Clear a slot on ship `id`. Returns the points removed, or `None` for an
    /// unknown ship.
    pub fn unassign_upgrade(
        &mut self,
        id: InstanceId,
        slot_type: &str,
        slot_index: usize,
    ) -> Option<u32> {
        let ship = self.fleet.ship_mut(id)?;
        let removed = engine::unassign_upgrade(ship, slot_type, slot_index, &mut self.registry);
        self.fleet.recompute_points();
        Some(removed)
    }

    /// Advisory check for assigning `upgrade` to ship `id`.
    pub fn eligibility(&self, id: InstanceId, upgrade: &Upgrade) -> Option<Vec<Ineligibility>> {
        let ship = self.fleet.ship(id)?;
        Some(engine::eligibility(ship, upgrade, &self.registry))
    }

    /// Add `count` squadrons. Generic squadrons merge into an existing record
    /// of the same card and source.
    pub fn add_squadron(&mut self, card: &SquadronCard, count: u32) -> InstanceId {
        let count = count.max(1);
        if !card.unique && !card.ace {
            if let Some(existing) = self
                .fleet
                .squadrons
                .iter_mut()
                .find(|s| s.key == card.key && s.source == card.source && !s.unique && !s.ace)
            {
                existing.count = existing.count.saturating_add(count);
                let id = existing.id;
                self.fleet.recompute_points();
                return id;
            }
        }

        let id = self.allocate_id();
        let squadron = Squadron::from_card(id, card, count);
        self.registry.claim_squadron(&squadron);
        debug!(squadron = %squadron.name, count, id = %id, "added squadron");
        self.fleet.squadrons.push(squadron);
        self.fleet.recompute_points();
        id
    }

    pub fn remove_squadron(&mut self, id: InstanceId) -> Option<Squadron> {
        let position = self.fleet.squadrons.iter().position(|s| s.id == id)?;
        let squadron = self.fleet.squadrons.remove(position);
        self.registry.release_squadron(&squadron);
        self.fleet.recompute_points();
        Some(squadron)
    }

    /// Change a squadron's count; zero removes it. Returns `false` for an
    /// unknown squadron.
    pub fn set_squadron_count(&mut self, id: InstanceId, count: u32) -> bool {
        if count == 0 {
            return self.remove_squadron(id).is_some();
        }
        let Some(squadron) = self.fleet.squadrons.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        squadron.count = count;
        self.fleet.recompute_points();
        true
    }

    /// Select an objective. Outside sandbox play it replaces the current
    /// objective of the same category, which is returned.
    pub fn select_objective(&mut self, card: &ObjectiveCard) -> Option<Objective> {
        if self.fleet.objectives.iter().any(|o| o.key == card.key) {
            return None;
        }
        let displaced = if self.fleet.sandbox {
            None
        } else {
            self.fleet
                .objectives
                .iter()
                .position(|objective| objective.category == card.category)
                .map(|position| self.fleet.objectives.remove(position))
        };
        self.fleet.objectives.push(Objective::from_card(card));
        displaced
    }

    /// Drop every objective in `category`, returning how many were removed.
    pub fn clear_objective(&mut self, category: &ObjectiveCategory) -> usize {
        let before = self.fleet.objectives.len();
        self.fleet
            .objectives
            .retain(|objective| &objective.category != category);
        before - self.fleet.objectives.len()
    }

    /// Remove every ship, squadron and objective. The registry ends empty.
    pub fn clear(&mut self) {
        for ship in &mut self.fleet.ships {
            engine::unassign_all(ship, &mut self.registry);
        }
        self.fleet.ships.clear();
        self.fleet.squadrons.clear();
        self.fleet.objectives.clear();
        self.registry.clear();
        self.fleet.recompute_points();
    }

    /// Canonical text of the current fleet.
    pub fn export(&self) -> String {
        serialize_fleet(&self.fleet)
    }
}
