use once_cell::sync::Lazy;
use regex::Regex;

use super::{rebullet, FleetFormat, Normalizer};

static TIMESTAMP_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:(?:created|exported|date):\s*)?\d{4}-\d{2}-\d{2}(?:[ T]\d{2}:\d{2}(?::\d{2})?)?$")
        .expect("timestamp pattern is valid")
});

static COMBINED_COST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((\d+)\s*\+\s*\d+\s*:\s*\d+\)").expect("combined cost pattern is valid")
});

/// Exports stamped with a creation date, using `·` bullets and
/// `(base + upgrades: total)` cost annotations.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampedNormalizer;

impl Normalizer for TimestampedNormalizer {
    fn format(&self) -> FleetFormat {
        FleetFormat::Timestamped
    }

    fn normalize(&self, text: &str) -> String {
        text.lines()
            .filter(|line| !TIMESTAMP_HEADER.is_match(line.trim()))
            .map(|line| {
                let line = rebullet(line, "·").unwrap_or_else(|| line.to_string());
                COMBINED_COST.replace_all(&line, "($1)").into_owned()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
