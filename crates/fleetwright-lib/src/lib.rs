//! Fleetwright library entry points.
//!
//! This crate reads and writes plain-text fleet lists, resolves the card names
//! they contain against a content catalog and maintains the upgrade slot
//! constraints of every ship as upgrades are added and removed. Higher-level
//! consumers (the CLI, editors) should only depend on the items exported here
//! instead of reimplementing behavior.

#![deny(warnings)]

pub mod alias;
pub mod catalog;
pub mod content;
pub mod engine;
pub mod error;
pub mod fleet;
pub mod normalize;
pub mod parser;
pub mod points;
pub mod serializer;
pub mod session;
pub mod source;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use alias::{display_string, AliasTable, AliasTarget};
pub use catalog::{Catalog, ContentCatalog, EntityKey, EntityKind, ErrataKeys, ObjectiveCategory};
pub use content::{default_content_dir, resolve_content_paths, Content, ContentPaths};
pub use engine::{Ineligibility, SlotStatus, UniqueNameRegistry};
pub use error::{Error, Result};
pub use fleet::{Faction, Fleet, FleetStructure, InstanceId, Ship, Squadron, Upgrade};
pub use normalize::{normalize, select_normalizer, FleetFormat, Normalizer};
pub use parser::{parse_fleet, FleetParser, ImportOutcome, SkipReason, SkippedItem};
pub use points::FleetPoints;
pub use serializer::serialize_fleet;
pub use session::FleetSession;
pub use source::SourceTag;
