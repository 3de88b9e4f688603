//! Canonical fleet-list text writer, the inverse of [`crate::parser`].

use crate::catalog::ObjectiveCategory;
use crate::fleet::{Fleet, Objective, Squadron};
use crate::source::SourceTag;

const BULLET: &str = "•";

/// Render `fleet` in the canonical line grammar.
///
/// Output is deterministic: ships and upgrades keep their current order and
/// squadrons are grouped in order of first appearance.
pub fn serialize_fleet(fleet: &Fleet) -> String {
    let mut lines = vec![
        format!(" Name: {}", fleet.name),
        format!("Faction: {}", fleet.faction.label()),
    ];
    if let Some(commander) = fleet.commander() {
        lines.push(format!(
            "Commander: {} ({})",
            tagged(&commander.name, commander.source),
            commander.points
        ));
    }
    lines.push(String::new());

    if !fleet.objectives.is_empty() {
        for category in objective_categories(fleet) {
            let names: Vec<String> = fleet
                .objectives_in(&category)
                .map(|objective: &Objective| tagged(&objective.name, objective.source))
                .collect();
            if names.is_empty() {
                continue;
            }
            let heading = if category.is_standard() {
                category.label().to_string()
            } else {
                format!("{} Objective", category.label())
            };
            lines.push(format!("{heading}: {}", names.join(", ")));
        }
        lines.push(String::new());
    }

    for ship in &fleet.ships {
        lines.push(format!("{} ({})", tagged(&ship.name, ship.source), ship.points));
        for assigned in &ship.assigned_upgrades {
            let upgrade = &assigned.upgrade;
            lines.push(format!(
                "{BULLET} {} ({})",
                tagged(&upgrade.name, upgrade.source),
                upgrade.points
            ));
        }
        lines.push(format!("= {} Points", ship.total_points));
        lines.push(String::new());
    }

    lines.push("Squadrons:".to_string());
    for line in squadron_lines(&fleet.squadrons) {
        lines.push(format!("{BULLET} {line}"));
    }
    lines.push(format!("= {} Points", fleet.points.squadrons));
    lines.push(String::new());
    lines.push(format!("Total Points: {}", fleet.points.total));
    lines.join("\n")
}

fn tagged(name: &str, source: SourceTag) -> String {
    format!("{name}{}", source.suffix())
}

/// Standard categories first, then free-form ones in selection order.
fn objective_categories(fleet: &Fleet) -> Vec<ObjectiveCategory> {
    let mut categories = ObjectiveCategory::STANDARD.to_vec();
    for objective in &fleet.objectives {
        if !categories.contains(&objective.category) {
            categories.push(objective.category.clone());
        }
    }
    categories
}

#[derive(Debug)]
struct SquadronGroup<'a> {
    name: &'a str,
    source: SourceTag,
    count: u32,
    total: u32,
}

/// Unique and ace squadrons stay on their own line; generic squadrons sharing
/// name, source and ace flag are merged.
fn squadron_lines(squadrons: &[Squadron]) -> Vec<String> {
    let mut groups: Vec<(Option<(&str, SourceTag, bool)>, SquadronGroup)> = Vec::new();
    for squadron in squadrons {
        let key = if squadron.unique || squadron.ace {
            None
        } else {
            Some((squadron.name.as_str(), squadron.source, squadron.ace))
        };
        if let Some(key) = key {
            if let Some((_, group)) = groups.iter_mut().find(|(k, _)| *k == Some(key)) {
                group.count = group.count.saturating_add(squadron.count);
                group.total = group.total.saturating_add(squadron.total_points);
                continue;
            }
        }
        groups.push((
            key,
            SquadronGroup {
                name: &squadron.name,
                source: squadron.source,
                count: squadron.count,
                total: squadron.total_points,
            },
        ));
    }

    groups
        .into_iter()
        .map(|(_, group)| {
            let name = tagged(group.name, group.source);
            if group.count > 1 {
                format!("{} x {name} ({})", group.count, group.total)
            } else {
                format!("{name} ({})", group.total)
            }
        })
        .collect()
}
