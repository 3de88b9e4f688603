//! Community fleet-list dialects and their rewrite into canonical text.
//!
//! - [`FleetFormat`] - format tags accepted by the importer
//! - [`Normalizer`] - one implementation per dialect
//! - [`select_normalizer`] / [`normalize`] - entry points
//!
//! Normalizers are total: lines they do not recognise pass through unchanged
//! and are left for the parser to report.

mod counted;
mod hyphenated;
mod timestamped;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{fuzzy_matches, Error};

pub use counted::CountedNormalizer;
pub use hyphenated::HyphenatedNormalizer;
pub use timestamped::TimestampedNormalizer;

/// Canonical bullet.
pub(crate) const BULLET: char = '•';

/// Supported fleet-list dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FleetFormat {
    /// The importer's own grammar.
    #[default]
    Canonical,
    /// Timestamp header, middle-dot bullets, `(X + Y: Z)` cost annotations.
    Timestamped,
    /// Hyphen bullets, `[flagship]` markers, `total ship cost` footers.
    Hyphenated,
    /// `N x Name (per-unit)` squadron counts and `Objective:` headings.
    Counted,
}

impl FleetFormat {
    pub const ALL: [FleetFormat; 4] = [
        FleetFormat::Canonical,
        FleetFormat::Timestamped,
        FleetFormat::Hyphenated,
        FleetFormat::Counted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FleetFormat::Canonical => "canonical",
            FleetFormat::Timestamped => "timestamped",
            FleetFormat::Hyphenated => "hyphenated",
            FleetFormat::Counted => "counted",
        }
    }
}

impl fmt::Display for FleetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FleetFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == needle)
            .ok_or_else(|| Error::UnknownFormat {
                tag: s.trim().to_string(),
                suggestions: fuzzy_matches(
                    &needle,
                    Self::ALL.iter().map(|format| format.as_str()),
                    2,
                ),
            })
    }
}

/// Rewrites one dialect into canonical text.
pub trait Normalizer: Send + Sync {
    /// The dialect this normalizer accepts.
    fn format(&self) -> FleetFormat;

    /// Rewrite `text`. Must never fail.
    fn normalize(&self, text: &str) -> String;
}

/// Canonical text passes through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalNormalizer;

impl Normalizer for CanonicalNormalizer {
    fn format(&self) -> FleetFormat {
        FleetFormat::Canonical
    }

    fn normalize(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Select the normalizer for a dialect.
pub fn select_normalizer(format: FleetFormat) -> Box<dyn Normalizer> {
    match format {
        FleetFormat::Canonical => Box::new(CanonicalNormalizer),
        FleetFormat::Timestamped => Box::new(TimestampedNormalizer),
        FleetFormat::Hyphenated => Box::new(HyphenatedNormalizer),
        FleetFormat::Counted => Box::new(CountedNormalizer),
    }
}

/// Rewrite `text` from `format` into canonical text.
pub fn normalize(text: &str, format: FleetFormat) -> String {
    select_normalizer(format).normalize(text)
}

/// Strip a leading `prefix` bullet and return the rest with a canonical bullet.
pub(crate) fn rebullet(line: &str, prefix: &str) -> Option<String> {
    let rest = line.trim_start().strip_prefix(prefix)?;
    Some(format!("{BULLET} {}", rest.trim_start()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_tags_parse_case_insensitively() {
        assert_eq!(
            "Hyphenated".parse::<FleetFormat>().ok(),
            Some(FleetFormat::Hyphenated)
        );
        assert_eq!(" counted ".parse::<FleetFormat>().ok(), Some(FleetFormat::Counted));
    }

    #[test]
    fn unknown_format_suggests_close_tags() {
        let err = "timestamp".parse::<FleetFormat>().expect_err("unknown tag");
        let message = err.to_string();
        assert!(message.contains("unknown fleet list format: timestamp"));
        assert!(message.contains("timestamped"));
    }

    #[test]
    fn select_normalizer_matches_format() {
        for format in FleetFormat::ALL {
            assert_eq!(select_normalizer(format).format(), format);
        }
    }

    #[test]
    fn canonical_passes_through() {
        let text = " Name: Test\nFaction: Empire\n\nTotal Points: 0";
        assert_eq!(normalize(text, FleetFormat::Canonical), text);
    }

    #[test]
    fn every_normalizer_is_total() {
        let garbage = "((( ]]] = x\n\u{2022}\n- \nPoints: /\n3 x (";
        for format in FleetFormat::ALL {
            let _ = normalize(garbage, format);
            assert!(normalize("", format).trim().is_empty());
        }
    }
}
