// Test-only helpers for `fleetwright-lib` tests
#![allow(dead_code)]
use crate::catalog::{Restrictions, ShipCard, ShipSize, UpgradeCard};
use crate::fleet::{Faction, InstanceId, Ship, Upgrade};
use crate::source::SourceTag;

/// Builder to create `ShipCard` instances in tests with sensible defaults.
pub struct ShipCardBuilder {
    card: ShipCard,
}

impl ShipCardBuilder {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self {
            card: ShipCard {
                key: key.to_string(),
                name: key.to_string(),
                chassis: "Test Chassis".to_string(),
                size: ShipSize::Medium,
                faction: Faction::Empire,
                points: 50,
                unique: false,
                traits: Vec::new(),
                source: SourceTag::Regular,
                upgrades: Vec::new(),
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.card.name = name.to_string();
        self
    }

    pub fn points(mut self, points: u32) -> Self {
        self.card.points = points;
        self
    }

    pub fn size(mut self, size: ShipSize) -> Self {
        self.card.size = size;
        self
    }

    pub fn faction(mut self, faction: Faction) -> Self {
        self.card.faction = faction;
        self
    }

    pub fn unique(mut self) -> Self {
        self.card.unique = true;
        self
    }

    pub fn traits(mut self, traits: &[&str]) -> Self {
        self.card.traits = traits.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn slots(mut self, slots: &[&str]) -> Self {
        self.card.upgrades = slots.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> ShipCard {
        self.card
    }

    /// Ship instance with trait slots applied, as it would be after joining a fleet.
    pub fn ship(self) -> Ship {
        let card = self.build();
        let mut ship = Ship::from_card(InstanceId(1), &card);
        let mut registry = crate::engine::UniqueNameRegistry::new();
        crate::engine::apply_trait_slots(&mut ship, &mut registry);
        ship
    }
}

/// Builder to create `UpgradeCard` instances in tests with sensible defaults.
pub struct UpgradeCardBuilder {
    card: UpgradeCard,
}

impl UpgradeCardBuilder {
    #[must_use]
    pub fn new(key: &str, upgrade_type: &str, points: u32) -> Self {
        Self {
            card: UpgradeCard {
                key: key.to_string(),
                name: key.to_string(),
                upgrade_type: upgrade_type.to_string(),
                points,
                unique: false,
                unique_class: Vec::new(),
                source: SourceTag::Regular,
                faction: None,
                restrictions: None,
                exhaust: None,
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.card.name = name.to_string();
        self
    }

    pub fn unique(mut self) -> Self {
        self.card.unique = true;
        self
    }

    pub fn unique_class(mut self, class: &str) -> Self {
        self.card.unique_class.push(class.to_string());
        self
    }

    pub fn source(mut self, source: SourceTag) -> Self {
        self.card.source = source;
        self
    }

    fn restrictions(&mut self) -> &mut Restrictions {
        self.card.restrictions.get_or_insert_with(Restrictions::default)
    }

    pub fn disables(mut self, slot: &str) -> Self {
        self.restrictions().disable_types.push(slot.to_string());
        self
    }

    pub fn enables(mut self, slot: &str) -> Self {
        self.restrictions().enable_types.push(slot.to_string());
        self
    }

    pub fn greys(mut self, slot: &str) -> Self {
        self.restrictions().grey_types.push(slot.to_string());
        self
    }

    pub fn flagship(mut self) -> Self {
        self.restrictions().flagship_exclusive = true;
        self
    }

    pub fn disqualify_size(mut self, size: ShipSize) -> Self {
        self.restrictions().size_disqualifiers.push(size);
        self
    }

    pub fn disqualify_trait(mut self, name: &str) -> Self {
        self.restrictions().trait_disqualifiers.push(name.to_string());
        self
    }

    pub fn build(self) -> UpgradeCard {
        self.card
    }

    pub fn upgrade(self) -> Upgrade {
        Upgrade::from_card(&self.card)
    }
}
