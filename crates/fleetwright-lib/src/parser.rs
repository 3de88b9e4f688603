//! Canonical fleet-list reader.
//!
//! A single pass over normalized text. Each line is classified in a fixed
//! priority order; recognised items are resolved through the alias table,
//! fetched from the catalog and applied through a [`FleetSession`], so the
//! imported fleet carries the same constraint state as one built by hand.
//!
//! Only a faction conflict aborts an import. Every other problem is recorded
//! as a [`SkippedItem`] and the scan continues.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{info, warn};

use crate::alias::{display_string, AliasTable};
use crate::catalog::{Catalog, EntityKey};
use crate::engine::{next_open_index, Ineligibility};
use crate::error::{Error, Result};
use crate::fleet::{Faction, Fleet, InstanceId, Upgrade};
use crate::normalize::{normalize, FleetFormat, BULLET};
use crate::points::per_unit_points;
use crate::session::FleetSession;
use crate::source::{split_source_bracket, SourceTag};

static PRICED_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)\s*\((\d+)\)$").expect("priced line pattern is valid"));

static SQUADRON_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:•\s*)?(?:(\d+)\s*x\s+)?(.+?)\s*\((\d+)\)$")
        .expect("squadron line pattern is valid")
});

static SUBTOTAL_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^=\s*(\d+)\s*points?$").expect("subtotal pattern is valid"));

static STANDARD_OBJECTIVES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(assault|defense|navigation)(?:\s+objective)?:\s*(.*)$")
        .expect("objective pattern is valid")
});

static SANDBOX_OBJECTIVES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(.+?)\s+objective:\s*(.*)$").expect("sandbox objective pattern is valid")
});

/// A display name rewritten before alias lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameFixup {
    /// Only applies when importing into a fleet of this faction.
    pub faction: Faction,
    pub name: &'static str,
    pub points: u32,
    pub replacement: &'static str,
}

/// Legacy ship names still found in shared lists.
pub const NAME_FIXUPS: &[NameFixup] = &[NameFixup {
    faction: Faction::Empire,
    name: "Venator II",
    points: 100,
    replacement: "Venator II-Class Star Destroyer",
}];

/// Why a line did not make it into the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No alias matches the display string.
    Unresolved,
    /// The alias names a key the catalog does not hold.
    MissingFromCatalog,
    /// An upgrade line appeared before any ship resolved.
    NoCurrentShip,
    /// The current ship has no free slot of the upgrade's type.
    NoOpenSlot,
    /// A unique name or unique-class tag the card carries is already taken.
    UniqueInUse,
    /// The current ship's size or traits rule the upgrade out.
    Disqualified,
    /// A later objective took the category outside sandbox play.
    ObjectiveReplaced,
    /// The line matches no known pattern.
    Unparseable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SkipReason::Unresolved => "no matching card name",
            SkipReason::MissingFromCatalog => "card missing from catalog",
            SkipReason::NoCurrentShip => "upgrade without a ship",
            SkipReason::NoOpenSlot => "no open slot",
            SkipReason::UniqueInUse => "unique card already in the fleet",
            SkipReason::Disqualified => "not allowed on this ship",
            SkipReason::ObjectiveReplaced => "replaced by a later objective",
            SkipReason::Unparseable => "unrecognised line",
        };
        f.write_str(value)
    }
}

/// A line left out of the import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    /// Original text of the item.
    pub line: String,
    pub reason: SkipReason,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl fmt::Display for SkippedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.line, self.reason)?;
        if let Some(first) = self.suggestions.first() {
            write!(f, "; did you mean '{first}'?")?;
        }
        Ok(())
    }
}

/// Totals stated in the text. Never trusted, only compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeclaredTotals {
    pub total: Option<u32>,
    pub squadrons: Option<u32>,
}

/// Result of a completed import.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub session: FleetSession,
    pub skipped: Vec<SkippedItem>,
    pub declared: DeclaredTotals,
}

impl ImportOutcome {
    pub fn fleet(&self) -> &Fleet {
        self.session.fleet()
    }

    /// `(declared, recomputed)` when the text states a different total.
    pub fn total_mismatch(&self) -> Option<(u32, u32)> {
        let declared = self.declared.total?;
        let actual = self.fleet().points.total;
        (declared != actual).then_some((declared, actual))
    }

    /// No skipped lines and no total disagreement.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.total_mismatch().is_none()
    }
}

/// Reads canonical fleet-list text against a catalog and alias table.
pub struct FleetParser<'a> {
    catalog: &'a dyn Catalog,
    aliases: &'a AliasTable,
    sandbox: bool,
}

struct ImportState {
    target: Faction,
    session: FleetSession,
    skipped: Vec<SkippedItem>,
    declared: DeclaredTotals,
    processing_squadrons: bool,
    current_ship: Option<InstanceId>,
    faction_settled: bool,
}

impl ImportState {
    fn skip(&mut self, line: &str, reason: SkipReason, suggestions: Vec<String>) {
        warn!(line, %reason, "skipping fleet list line");
        self.skipped.push(SkippedItem {
            line: line.to_string(),
            reason,
            suggestions,
        });
    }

    /// The first faction seen, declared or inferred, must be the target's.
    fn settle_faction(&mut self, found: Faction) -> Result<()> {
        if self.faction_settled {
            return Ok(());
        }
        self.faction_settled = true;
        if found != self.target {
            return Err(Error::FactionMismatch {
                expected: self.target,
                found,
            });
        }
        Ok(())
    }
}

/// Outcome of an alias lookup.
enum Lookup {
    Found {
        key: EntityKey,
        tag: Option<SourceTag>,
    },
    Unresolved(Vec<String>),
}

impl<'a> FleetParser<'a> {
    pub fn new(catalog: &'a dyn Catalog, aliases: &'a AliasTable) -> Self {
        Self {
            catalog,
            aliases,
            sandbox: false,
        }
    }

    /// Import into a sandbox fleet, keeping every objective listed.
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Normalize `text` from `format`, then parse it.
    pub fn import(&self, text: &str, format: FleetFormat, faction: Faction) -> Result<ImportOutcome> {
        self.parse(&normalize(text, format), faction)
    }

    /// Parse canonical text into a fleet of `faction`.
    pub fn parse(&self, text: &str, faction: Faction) -> Result<ImportOutcome> {
        let mut state = ImportState {
            target: faction,
            session: FleetSession::new("", faction).with_sandbox(self.sandbox),
            skipped: Vec::new(),
            declared: DeclaredTotals::default(),
            processing_squadrons: false,
            current_ship: None,
            faction_settled: false,
        };

        for raw in text.lines() {
            self.parse_line(raw.trim(), &mut state)?;
        }

        let fleet = state.session.fleet();
        if let Some(declared) = state.declared.total {
            if declared != fleet.points.total {
                warn!(
                    declared,
                    recomputed = fleet.points.total,
                    "declared total disagrees with recomputed total"
                );
            }
        }
        info!(
            ships = fleet.ships.len(),
            squadrons = fleet.squadrons.len(),
            objectives = fleet.objectives.len(),
            skipped = state.skipped.len(),
            "imported fleet list"
        );

        Ok(ImportOutcome {
            session: state.session,
            skipped: state.skipped,
            declared: state.declared,
        })
    }

    fn parse_line(&self, line: &str, state: &mut ImportState) -> Result<()> {
        if line.is_empty() {
            return Ok(());
        }
        if let Some(rest) = strip_label(line, "Faction:") {
            let declared: Faction = rest.parse()?;
            return state.settle_faction(declared);
        }
        if strip_label(line, "Commander:").is_some() {
            return Ok(());
        }
        if let Some(rest) = strip_label(line, "Name:") {
            state.session.rename(rest.trim());
            return Ok(());
        }
        if let Some(rest) = strip_label(line, "Total Points:") {
            match rest.trim().parse() {
                Ok(total) => state.declared.total = Some(total),
                Err(_) => state.skip(line, SkipReason::Unparseable, Vec::new()),
            }
            return Ok(());
        }
        if line.eq_ignore_ascii_case("Squadrons:") {
            state.processing_squadrons = true;
            state.current_ship = None;
            return Ok(());
        }
        if let Some(caps) = SUBTOTAL_LINE.captures(line) {
            if state.processing_squadrons {
                state.declared.squadrons = caps[1].parse().ok();
            }
            return Ok(());
        }
        if let Some(caps) = STANDARD_OBJECTIVES.captures(line) {
            self.parse_objectives(&caps[2], state);
            return Ok(());
        }
        if let Some(caps) = SANDBOX_OBJECTIVES.captures(line) {
            if !PRICED_LINE.is_match(line) {
                self.parse_objectives(&caps[2], state);
                return Ok(());
            }
        }

        if state.processing_squadrons {
            if line.starts_with('=') {
                state.skip(line, SkipReason::Unparseable, Vec::new());
                return Ok(());
            }
            return self.parse_squadron(line, state);
        }
        match strip_bullet(line) {
            Some(rest) => {
                self.parse_upgrade(line, rest, state);
                Ok(())
            }
            None => self.parse_ship(line, state),
        }
    }

    fn parse_objectives(&self, list: &str, state: &mut ImportState) {
        for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let key = match self.lookup(name, None) {
                Lookup::Found { key, .. } => key,
                Lookup::Unresolved(suggestions) => {
                    state.skip(name, SkipReason::Unresolved, suggestions);
                    continue;
                }
            };
            let Some(card) = self.catalog.objective(&key) else {
                state.skip(name, SkipReason::MissingFromCatalog, Vec::new());
                continue;
            };
            if let Some(displaced) = state.session.select_objective(card) {
                state.skip(&displaced.name, SkipReason::ObjectiveReplaced, Vec::new());
            }
        }
    }

    fn parse_ship(&self, line: &str, state: &mut ImportState) -> Result<()> {
        state.current_ship = None;
        let Some((name, points)) = priced(line) else {
            state.skip(line, SkipReason::Unparseable, Vec::new());
            return Ok(());
        };
        let name = NAME_FIXUPS
            .iter()
            .find(|fixup| {
                fixup.faction == state.target
                    && fixup.points == points
                    && fixup.name.eq_ignore_ascii_case(name)
            })
            .map_or(name, |fixup| fixup.replacement);

        let key = match self.lookup(name, Some(points)) {
            Lookup::Found { key, .. } => key,
            Lookup::Unresolved(suggestions) => {
                state.skip(line, SkipReason::Unresolved, suggestions);
                return Ok(());
            }
        };
        let Some(card) = self.catalog.ship(&key) else {
            state.skip(line, SkipReason::MissingFromCatalog, Vec::new());
            return Ok(());
        };
        state.settle_faction(card.faction)?;
        if !state
            .session
            .registry()
            .card_conflicts(card.unique, &card.name, &[])
            .is_empty()
        {
            state.skip(line, SkipReason::UniqueInUse, Vec::new());
            return Ok(());
        }
        state.current_ship = Some(state.session.add_ship(card));
        Ok(())
    }

    fn parse_upgrade(&self, line: &str, rest: &str, state: &mut ImportState) {
        let Some(ship_id) = state.current_ship else {
            state.skip(line, SkipReason::NoCurrentShip, Vec::new());
            return;
        };
        let Some((name, points)) = priced(rest) else {
            state.skip(line, SkipReason::Unparseable, Vec::new());
            return;
        };
        let (key, tag) = match self.lookup(name, Some(points)) {
            Lookup::Found { key, tag } => (key, tag),
            Lookup::Unresolved(suggestions) => {
                state.skip(line, SkipReason::Unresolved, suggestions);
                return;
            }
        };
        let Some(card) = self.catalog.upgrade(&key) else {
            state.skip(line, SkipReason::MissingFromCatalog, Vec::new());
            return;
        };

        let mut upgrade = Upgrade::from_card(card);
        if let Some(tag) = tag {
            upgrade = upgrade.with_source(tag);
        }
        let slot_type = upgrade.upgrade_type.clone();
        let slot_index = state
            .session
            .fleet()
            .ship(ship_id)
            .and_then(|ship| next_open_index(ship, &slot_type));
        let Some(index) = slot_index else {
            state.skip(line, SkipReason::NoOpenSlot, Vec::new());
            return;
        };
        let problems = state
            .session
            .eligibility(ship_id, &upgrade)
            .unwrap_or_default();
        if let Some(reason) = blocking_reason(&problems) {
            state.skip(line, reason, Vec::new());
            return;
        }
        state
            .session
            .assign_upgrade(ship_id, upgrade, &slot_type, index);
    }

    fn parse_squadron(&self, line: &str, state: &mut ImportState) -> Result<()> {
        let Some(caps) = SQUADRON_LINE.captures(line) else {
            state.skip(line, SkipReason::Unparseable, Vec::new());
            return Ok(());
        };
        let count = caps
            .get(1)
            .map_or(Some(1), |m| m.as_str().parse::<u32>().ok())
            .filter(|count| *count > 0);
        let total = caps[3].parse::<u32>().ok();
        let (Some(count), Some(total)) = (count, total) else {
            state.skip(line, SkipReason::Unparseable, Vec::new());
            return Ok(());
        };
        let name = caps[2].trim();

        let key = match self.lookup(name, Some(per_unit_points(total, count))) {
            Lookup::Found { key, .. } => key,
            Lookup::Unresolved(suggestions) => {
                state.skip(line, SkipReason::Unresolved, suggestions);
                return Ok(());
            }
        };
        let Some(card) = self.catalog.squadron(&key) else {
            state.skip(line, SkipReason::MissingFromCatalog, Vec::new());
            return Ok(());
        };
        state.settle_faction(card.faction)?;
        if !state
            .session
            .registry()
            .card_conflicts(card.unique, &card.name, &card.unique_class)
            .is_empty()
        {
            state.skip(line, SkipReason::UniqueInUse, Vec::new());
            return Ok(());
        }
        state.session.add_squadron(card, count);
        Ok(())
    }

    /// Resolve a name, trying the bracketed display string first and the bare
    /// name second. The bracket's source tag is returned either way.
    fn lookup(&self, name: &str, points: Option<u32>) -> Lookup {
        let render = |name: &str| match points {
            Some(points) => display_string(name, points),
            None => name.trim().to_string(),
        };
        let errata = self.catalog.errata();
        let full = render(name);
        let (bare, tag) = split_source_bracket(name);

        if let Some(key) = self.aliases.resolve(&full, errata) {
            return Lookup::Found {
                key: key.to_string(),
                tag,
            };
        }
        if tag.is_some() {
            if let Some(key) = self.aliases.resolve(&render(bare), errata) {
                return Lookup::Found {
                    key: key.to_string(),
                    tag,
                };
            }
        }
        Lookup::Unresolved(self.aliases.suggestions(&full, 3))
    }
}

/// Parse canonical text with a default (non-sandbox) parser.
pub fn parse_fleet(
    text: &str,
    faction: Faction,
    catalog: &dyn Catalog,
    aliases: &AliasTable,
) -> Result<ImportOutcome> {
    FleetParser::new(catalog, aliases).parse(text, faction)
}

/// Case-insensitive `label` prefix, returning the remainder.
fn strip_label<'l>(line: &'l str, label: &str) -> Option<&'l str> {
    let head = line.get(..label.len())?;
    head.eq_ignore_ascii_case(label)
        .then(|| &line[label.len()..])
}

/// Problems that keep an upgrade out of an imported fleet. Slot problems are
/// handled by the open-index check; a disabled slot does not block import.
fn blocking_reason(problems: &[Ineligibility]) -> Option<SkipReason> {
    problems.iter().find_map(|problem| match problem {
        Ineligibility::UniqueInUse(_) => Some(SkipReason::UniqueInUse),
        Ineligibility::SizeDisqualified(_) | Ineligibility::TraitDisqualified(_) => {
            Some(SkipReason::Disqualified)
        }
        Ineligibility::SlotMissing(_)
        | Ineligibility::SlotDisabled(_)
        | Ineligibility::SlotFull(_) => None,
    })
}

fn strip_bullet(line: &str) -> Option<&str> {
    line.strip_prefix(BULLET).map(str::trim_start)
}

fn priced(line: &str) -> Option<(&str, u32)> {
    let caps = PRICED_LINE.captures(line)?;
    let name = caps.get(1)?.as_str().trim();
    let points = caps.get(2)?.as_str().parse().ok()?;
    Some((name, points))
}
