use once_cell::sync::Lazy;
use regex::Regex;

use super::{FleetFormat, Normalizer, BULLET};

static OBJECTIVE_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\s*)(assault|defense|navigation)\s+objective:")
        .expect("objective heading pattern is valid")
});

/// `N x Name (per-unit)` without a bullet.
static COUNTED_SQUADRON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)\s*x\s+(.+?)\s*\((\d+)\)$").expect("counted squadron pattern is valid")
});

static SUBTOTAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^=\s*\d+\s*points?$").expect("subtotal pattern is valid"));

static PRICED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\d+\)$").expect("priced pattern is valid"));

/// Lists pricing squadrons per unit behind a count and spelling out
/// `Assault Objective:` style headings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountedNormalizer;

impl Normalizer for CountedNormalizer {
    fn format(&self) -> FleetFormat {
        FleetFormat::Counted
    }

    fn normalize(&self, text: &str) -> String {
        let mut lines: Vec<String> = text
            .lines()
            .map(|line| OBJECTIVE_HEADING.replace(line, "$1$2:").into_owned())
            .collect();

        let first_counted = lines
            .iter()
            .position(|line| COUNTED_SQUADRON.is_match(line.trim()));
        for line in lines.iter_mut() {
            if let Some(rewritten) = rewrite_counted(line.trim()) {
                *line = rewritten;
            }
        }

        let has_header = lines
            .iter()
            .any(|line| line.trim().eq_ignore_ascii_case("squadrons:"));
        if let (Some(first), false) = (first_counted, has_header) {
            insert_squadron_header(&mut lines, first);
        }
        lines.join("\n")
    }
}

fn rewrite_counted(line: &str) -> Option<String> {
    let caps = COUNTED_SQUADRON.captures(line)?;
    let count: u32 = caps[1].parse().ok()?;
    let per_unit: u32 = caps[3].parse().ok()?;
    let name = &caps[2];
    Some(if count > 1 {
        format!("{BULLET} {count} x {name} ({})", per_unit.saturating_mul(count))
    } else {
        format!("{BULLET} {name} ({per_unit})")
    })
}

/// Open a squadron section after the last subtotal preceding `first_counted`.
fn insert_squadron_header(lines: &mut Vec<String>, first_counted: usize) {
    let start = lines[..first_counted]
        .iter()
        .rposition(|line| SUBTOTAL.is_match(line.trim()))
        .map_or(first_counted, |footer| footer + 1);
    let end = lines[start..]
        .iter()
        .position(|line| SUBTOTAL.is_match(line.trim()))
        .map_or(lines.len(), |offset| start + offset);

    for line in &mut lines[start..end] {
        let trimmed = line.trim();
        if trimmed.starts_with(BULLET) || !PRICED.is_match(trimmed) {
            continue;
        }
        *line = format!("{BULLET} {trimmed}");
    }

    let header_at = (start..end)
        .find(|index| !lines[*index].trim().is_empty())
        .unwrap_or(end);
    lines.insert(header_at, "Squadrons:".to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_objective_headings_and_counts() {
        let text = "Name: Rogue
Faction: Rebellion

Assault Objective: Most Wanted
Defense Objective: Fire Lanes

CR90 Corvette A (44)
• Gunnery Team (7)
= 51 Points

Luke Skywalker (20)
2 x X-wing Squadron (13)
= 46 Points

Total Points: 97";
        let expected = "Name: Rogue
Faction: Rebellion

Assault: Most Wanted
Defense: Fire Lanes

CR90 Corvette A (44)
• Gunnery Team (7)
= 51 Points

Squadrons:
• Luke Skywalker (20)
• 2 x X-wing Squadron (26)
= 46 Points

Total Points: 97";
        assert_eq!(CountedNormalizer.normalize(text), expected);
    }

    #[test]
    fn single_count_drops_the_multiplier() {
        assert_eq!(
            rewrite_counted("1 x B-wing Squadron (14)").as_deref(),
            Some("• B-wing Squadron (14)")
        );
    }

    #[test]
    fn existing_header_is_kept() {
        let text = "Squadrons:\n3 x TIE Fighter Squadron (8)\n= 24 Points";
        assert_eq!(
            CountedNormalizer.normalize(text),
            "Squadrons:\n• 3 x TIE Fighter Squadron (24)\n= 24 Points"
        );
    }
}
