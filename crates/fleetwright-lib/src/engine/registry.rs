//! Fleet-wide registry of unique names in use.

use std::collections::BTreeMap;

use tracing::debug;

use crate::fleet::{Ship, Squadron, Upgrade};

/// Names currently claimed by unique ships, upgrades, squadrons and unique-class tags.
///
/// Claims are counted so that two entities sharing a unique-class tag (an
/// illegal but representable state) release cleanly one at a time. One
/// registry belongs to one fleet-editing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniqueNameRegistry {
    claims: BTreeMap<String, usize>,
}

impl UniqueNameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Number of distinct names in use.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.claims.keys().map(String::as_str)
    }

    pub fn claim(&mut self, name: &str) {
        *self.claims.entry(name.to_string()).or_default() += 1;
    }

    /// Drop one claim on `name`; returns whether a claim existed.
    pub fn release(&mut self, name: &str) -> bool {
        match self.claims.get_mut(name) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.claims.remove(name);
                true
            }
            None => {
                debug!(name, "released a unique name that was not claimed");
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.claims.clear();
    }

    /// Names `upgrade` would claim.
    pub fn upgrade_names(upgrade: &Upgrade) -> Vec<&str> {
        unique_names(upgrade.unique, &upgrade.name, &upgrade.unique_class)
    }

    /// Names `upgrade` would claim that are already in use.
    pub fn conflicts(&self, upgrade: &Upgrade) -> Vec<String> {
        self.card_conflicts(upgrade.unique, &upgrade.name, &upgrade.unique_class)
    }

    /// Names a card with these markers would claim that are already in use.
    pub fn card_conflicts(&self, unique: bool, name: &str, classes: &[String]) -> Vec<String> {
        unique_names(unique, name, classes)
            .into_iter()
            .filter(|name| self.contains(name))
            .map(str::to_string)
            .collect()
    }

    pub fn claim_upgrade(&mut self, upgrade: &Upgrade) {
        for name in Self::upgrade_names(upgrade) {
            self.claim(name);
        }
    }

    pub fn release_upgrade(&mut self, upgrade: &Upgrade) {
        for name in Self::upgrade_names(upgrade) {
            self.release(name);
        }
    }

    pub fn claim_ship(&mut self, ship: &Ship) {
        if ship.unique {
            self.claim(&ship.name);
        }
    }

    pub fn release_ship(&mut self, ship: &Ship) {
        if ship.unique {
            self.release(&ship.name);
        }
    }

    pub fn claim_squadron(&mut self, squadron: &Squadron) {
        for name in unique_names(squadron.unique, &squadron.name, &squadron.unique_class) {
            self.claim(name);
        }
    }

    pub fn release_squadron(&mut self, squadron: &Squadron) {
        for name in unique_names(squadron.unique, &squadron.name, &squadron.unique_class) {
            self.release(name);
        }
    }
}

fn unique_names<'a>(unique: bool, name: &'a str, classes: &'a [String]) -> Vec<&'a str> {
    let mut names: Vec<&str> = Vec::with_capacity(classes.len() + 1);
    if unique {
        names.push(name);
    }
    names.extend(classes.iter().map(String::as_str));
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_are_counted() {
        let mut registry = UniqueNameRegistry::new();
        registry.claim("Skilled First Officer");
        registry.claim("Skilled First Officer");
        assert!(registry.release("Skilled First Officer"));
        assert!(registry.contains("Skilled First Officer"));
        assert!(registry.release("Skilled First Officer"));
        assert!(registry.is_empty());
        assert!(!registry.release("Skilled First Officer"));
    }
}
