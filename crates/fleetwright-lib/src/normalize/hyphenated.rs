use once_cell::sync::Lazy;
use regex::Regex;

use super::{rebullet, FleetFormat, Normalizer, BULLET};

static FLAGSHIP_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*\[flagship\]").expect("flagship pattern is valid"));

static POINTS_ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\((\d+)\s*points?\)").expect("points pattern is valid"));

static USED_POINTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^points:\s*(\d+)(?:\s*/\s*\d+)?$").expect("used points pattern is valid")
});

static SHIP_FOOTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^=\s*(\d+)\s*total ship cost$").expect("ship footer pattern is valid")
});

static SQUADRON_FOOTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^=\s*(\d+)\s*total squadron cost$").expect("squadron footer pattern is valid")
});

static OBJECTIVE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:assault|defense|navigation)(?:\s+objective)?:")
        .expect("objective pattern is valid")
});

static PRICED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\d+\)$").expect("priced pattern is valid"));

/// Lists with a bare name line, `- ` bullets, `[flagship]` markers and
/// `total ship cost` / `total squadron cost` footers. Objectives trail the list.
#[derive(Debug, Clone, Copy, Default)]
pub struct HyphenatedNormalizer;

impl Normalizer for HyphenatedNormalizer {
    fn format(&self) -> FleetFormat {
        FleetFormat::Hyphenated
    }

    fn normalize(&self, text: &str) -> String {
        let mut lines: Vec<String> = text.lines().map(rewrite_line).collect();
        name_first_line(&mut lines);
        relocate_objectives(&mut lines);
        mark_squadron_section(&mut lines);
        lines.join("\n")
    }
}

fn rewrite_line(line: &str) -> String {
    let line = FLAGSHIP_MARKER.replace_all(line, "");
    let line = POINTS_ANNOTATION.replace_all(&line, "($1)");
    let line = line.trim_end();
    if let Some(caps) = USED_POINTS.captures(line.trim()) {
        return format!("Total Points: {}", &caps[1]);
    }
    rebullet(line, "- ").unwrap_or_else(|| line.to_string())
}

fn name_first_line(lines: &mut [String]) {
    let Some(first) = lines.iter_mut().find(|line| !line.trim().is_empty()) else {
        return;
    };
    let trimmed = first.trim();
    if trimmed.contains(':') || PRICED.is_match(trimmed) {
        return;
    }
    *first = format!("Name: {trimmed}");
}

/// Index of the blank line closing the header block.
fn preamble_end(lines: &[String]) -> Option<usize> {
    let first = lines.iter().position(|line| !line.trim().is_empty())?;
    lines[first..]
        .iter()
        .position(|line| line.trim().is_empty())
        .map(|offset| first + offset)
}

fn trim_trailing_blanks(lines: &mut Vec<String>) {
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
}

fn relocate_objectives(lines: &mut Vec<String>) {
    trim_trailing_blanks(lines);
    let mut start = lines.len();
    while start > 0 && OBJECTIVE_LINE.is_match(lines[start - 1].trim()) {
        start -= 1;
    }
    if start == lines.len() {
        return;
    }
    let Some(header_end) = preamble_end(lines) else {
        return;
    };
    if start <= header_end {
        return;
    }

    let mut block: Vec<String> = lines.drain(start..).collect();
    trim_trailing_blanks(lines);
    block.push(String::new());
    lines.splice(header_end + 1..header_end + 1, block);
}

fn mark_squadron_section(lines: &mut Vec<String>) {
    let squadron_footer = lines
        .iter()
        .rposition(|line| SQUADRON_FOOTER.is_match(line.trim()));
    let last_ship_footer = lines
        .iter()
        .enumerate()
        .filter(|(index, line)| {
            squadron_footer.map_or(true, |footer| *index < footer)
                && SHIP_FOOTER.is_match(line.trim())
        })
        .map(|(index, _)| index)
        .last();

    for line in lines.iter_mut() {
        let replaced = SHIP_FOOTER
            .captures(line.trim())
            .map(|caps| format!("= {} Points", &caps[1]));
        if let Some(replaced) = replaced {
            *line = replaced;
        }
    }

    let Some(footer) = squadron_footer else {
        return;
    };
    let start = match last_ship_footer {
        Some(index) => index + 1,
        None => lines[..footer]
            .iter()
            .rposition(|line| line.contains(':'))
            .map_or(0, |index| index + 1),
    };

    let has_header = lines[start..footer]
        .iter()
        .any(|line| line.trim().eq_ignore_ascii_case("squadrons:"));
    for line in &mut lines[start..footer] {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(BULLET) || trimmed.ends_with(':') {
            continue;
        }
        *line = format!("{BULLET} {trimmed}");
    }
    let subtotal = SQUADRON_FOOTER
        .captures(lines[footer].trim())
        .map(|caps| format!("= {} Points", &caps[1]));
    if let Some(subtotal) = subtotal {
        lines[footer] = subtotal;
    }

    if !has_header {
        let header_at = (start..footer)
            .find(|index| !lines[*index].trim().is_empty())
            .unwrap_or(footer);
        lines.insert(header_at, "Squadrons:".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = "Hammer Fleet
Faction: Empire
Points: 130/400
Commander: Grand Moff Tarkin

Victory II-Class Star Destroyer (85 points) [flagship]
- Grand Moff Tarkin (38 points)
- Gunnery Team (7 points)
= 130 total ship cost

TIE Fighter Squadron (8 points)
Howlrunner (16 points)
= 24 total squadron cost

Assault: Most Wanted
Defense: Fire Lanes
";

    #[test]
    fn rewrites_into_canonical_layout() {
        let expected = "Name: Hammer Fleet
Faction: Empire
Total Points: 130
Commander: Grand Moff Tarkin

Assault: Most Wanted
Defense: Fire Lanes

Victory II-Class Star Destroyer (85)
• Grand Moff Tarkin (38)
• Gunnery Team (7)
= 130 Points

Squadrons:
• TIE Fighter Squadron (8)
• Howlrunner (16)
= 24 Points";
        assert_eq!(HyphenatedNormalizer.normalize(LIST), expected);
    }

    #[test]
    fn no_squadron_footer_means_no_squadron_header() {
        let text = "Lone Ship\n\nNebulon-B Escort Frigate (57 points)\n= 57 total ship cost";
        assert_eq!(
            HyphenatedNormalizer.normalize(text),
            "Name: Lone Ship\n\nNebulon-B Escort Frigate (57)\n= 57 Points"
        );
    }

    #[test]
    fn objectives_already_in_header_stay_put() {
        let text = "Name: Early\nAssault: Most Wanted\n\nRaider-I Class Corvette (44 points)";
        assert_eq!(
            HyphenatedNormalizer.normalize(text),
            "Name: Early\nAssault: Most Wanted\n\nRaider-I Class Corvette (44)"
        );
    }
}
