//! Immutable card data as published in the content catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fleet::Faction;
use crate::source::SourceTag;

/// Opaque identifier of one catalog item; the join key between text and catalog.
pub type EntityKey = String;

/// Category of upgrade a ship can carry (`commander`, `title`, `weapons-team`, ...).
pub type SlotType = String;

/// Hull size class of a ship chassis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipSize {
    Small,
    Medium,
    Large,
    Huge,
}

impl fmt::Display for ShipSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            ShipSize::Small => "small",
            ShipSize::Medium => "medium",
            ShipSize::Large => "large",
            ShipSize::Huge => "huge",
        };
        f.write_str(value)
    }
}

/// Ship model card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipCard {
    pub key: EntityKey,
    pub name: String,
    pub chassis: String,
    pub size: ShipSize,
    pub faction: Faction,
    pub points: u32,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub source: SourceTag,
    /// Upgrade slot types offered by the chassis, in display order.
    #[serde(default)]
    pub upgrades: Vec<SlotType>,
}

/// Declarative restriction block attached to an upgrade card.
///
/// The constraint engine interprets every field uniformly; no upgrade is
/// special-cased by identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restrictions {
    #[serde(rename = "disable_upgrades", default)]
    pub disable_types: Vec<SlotType>,
    #[serde(rename = "enable_upgrades", default)]
    pub enable_types: Vec<SlotType>,
    #[serde(rename = "grey_upgrades", default)]
    pub grey_types: Vec<SlotType>,
    /// At most one flagship-restricted upgrade may be carried per ship.
    #[serde(rename = "flagship", default)]
    pub flagship_exclusive: bool,
    #[serde(default)]
    pub size_disqualifiers: Vec<ShipSize>,
    #[serde(default)]
    pub trait_disqualifiers: Vec<String>,
}

/// How a card is spent once used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExhaustKind {
    Exhaust,
    Discard,
    Recur,
}

/// Exhaust descriptor; purely informational for the fleet builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exhaust {
    pub kind: ExhaustKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
}

/// Upgrade card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeCard {
    pub key: EntityKey,
    pub name: String,
    #[serde(rename = "type")]
    pub upgrade_type: SlotType,
    pub points: u32,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub unique_class: Vec<String>,
    #[serde(default)]
    pub source: SourceTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction: Option<Faction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<Restrictions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exhaust: Option<Exhaust>,
}

/// Squadron card. `ace` marks a named pilot rather than a generic squadron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadronCard {
    pub key: EntityKey,
    pub name: String,
    pub faction: Faction,
    pub points: u32,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub unique_class: Vec<String>,
    #[serde(default)]
    pub ace: bool,
    #[serde(default)]
    pub source: SourceTag,
}

/// Objective category; free-form categories only appear in sandbox play.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObjectiveCategory {
    Assault,
    Defense,
    Navigation,
    Other(String),
}

impl ObjectiveCategory {
    /// The three categories a standard fleet selects one objective from each.
    pub const STANDARD: [ObjectiveCategory; 3] = [
        ObjectiveCategory::Assault,
        ObjectiveCategory::Defense,
        ObjectiveCategory::Navigation,
    ];

    pub fn label(&self) -> &str {
        match self {
            ObjectiveCategory::Assault => "Assault",
            ObjectiveCategory::Defense => "Defense",
            ObjectiveCategory::Navigation => "Navigation",
            ObjectiveCategory::Other(label) => label,
        }
    }

    pub fn is_standard(&self) -> bool {
        !matches!(self, ObjectiveCategory::Other(_))
    }
}

impl From<String> for ObjectiveCategory {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "assault" => ObjectiveCategory::Assault,
            "defense" | "defence" => ObjectiveCategory::Defense,
            "navigation" => ObjectiveCategory::Navigation,
            _ => ObjectiveCategory::Other(value.trim().to_string()),
        }
    }
}

impl From<ObjectiveCategory> for String {
    fn from(value: ObjectiveCategory) -> Self {
        match value {
            ObjectiveCategory::Other(label) => label,
            standard => standard.label().to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for ObjectiveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Objective card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveCard {
    pub key: EntityKey,
    pub name: String,
    pub category: ObjectiveCategory,
    #[serde(default)]
    pub source: SourceTag,
}

pub(crate) fn validate_identity(kind: &str, key: &str, name: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(Error::CatalogValidation {
            message: format!("{kind} '{name}' has an empty key"),
        });
    }
    if name.trim().is_empty() {
        return Err(Error::CatalogValidation {
            message: format!("{kind} '{key}' has an empty name"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restrictions_use_catalog_field_names() {
        let json = r#"{
            "disable_upgrades": ["commander"],
            "enable_upgrades": ["offensive-retro"],
            "grey_upgrades": ["officer"],
            "flagship": true,
            "size_disqualifiers": ["huge"]
        }"#;
        let restrictions: Restrictions = serde_json::from_str(json).expect("parse restrictions");
        assert_eq!(restrictions.disable_types, vec!["commander".to_string()]);
        assert_eq!(restrictions.enable_types, vec!["offensive-retro".to_string()]);
        assert_eq!(restrictions.grey_types, vec!["officer".to_string()]);
        assert!(restrictions.flagship_exclusive);
        assert_eq!(restrictions.size_disqualifiers, vec![ShipSize::Huge]);
        assert!(restrictions.trait_disqualifiers.is_empty());
    }

    #[test]
    fn objective_category_round_trips_free_form_labels() {
        let category: ObjectiveCategory = serde_json::from_str("\"Defence\"").expect("parse");
        assert_eq!(category, ObjectiveCategory::Defense);

        let sandbox: ObjectiveCategory = serde_json::from_str("\"Campaign\"").expect("parse");
        assert_eq!(sandbox, ObjectiveCategory::Other("Campaign".to_string()));
        assert_eq!(
            serde_json::to_string(&sandbox).expect("serialize"),
            "\"Campaign\""
        );
    }
}
