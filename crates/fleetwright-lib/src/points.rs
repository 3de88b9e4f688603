//! Point totals, always derived from the current structural state.

use serde::{Deserialize, Serialize};

use crate::fleet::{Fleet, Ship, Squadron};

/// Derived fleet totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetPoints {
    pub ships: u32,
    pub squadrons: u32,
    pub total: u32,
}

impl FleetPoints {
    pub fn derive(fleet: &Fleet) -> Self {
        let ships = saturating_sum(fleet.ships.iter().map(ship_total));
        let squadrons = saturating_sum(fleet.squadrons.iter().map(squadron_total));
        Self {
            ships,
            squadrons,
            total: ships.saturating_add(squadrons),
        }
    }
}

/// Base points plus every assigned upgrade.
pub fn ship_total(ship: &Ship) -> u32 {
    let upgrades = saturating_sum(
        ship.assigned_upgrades
            .iter()
            .map(|assigned| assigned.upgrade.points),
    );
    ship.points.saturating_add(upgrades)
}

/// Per-unit points times count. Counts come from list text, so the product
/// saturates instead of overflowing.
pub fn squadron_total(squadron: &Squadron) -> u32 {
    squadron.points.saturating_mul(squadron.count)
}

pub(crate) fn saturating_sum(values: impl Iterator<Item = u32>) -> u32 {
    values.fold(0, u32::saturating_add)
}

/// Per-unit cost of a squadron line priced as a total for `count` squadrons.
pub fn per_unit_points(total: u32, count: u32) -> u32 {
    if count <= 1 {
        return total;
    }
    ((f64::from(total) / f64::from(count)).round()) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_unit_points_rounds_to_nearest() {
        assert_eq!(per_unit_points(20, 2), 10);
        assert_eq!(per_unit_points(25, 2), 13);
        assert_eq!(per_unit_points(11, 0), 11);
        assert_eq!(per_unit_points(8, 1), 8);
    }

    #[test]
    fn oversized_squadron_counts_saturate() {
        assert_eq!(saturating_sum([u32::MAX, 5].into_iter()), u32::MAX);
        assert_eq!(saturating_sum([3, 4].into_iter()), 7);
    }
}
