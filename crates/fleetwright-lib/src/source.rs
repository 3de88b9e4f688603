//! Provenance markers for optional content packs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Content pack a card was published in.
///
/// Source tags only affect how a card is displayed and which alias wins when
/// several printings share a name. They never change gameplay math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SourceTag {
    #[default]
    Regular,
    Legacy,
    Legends,
    LegacyBeta,
    Arc,
    Nexus,
    Amg,
    Community,
}

impl SourceTag {
    pub const ALL: [SourceTag; 8] = [
        SourceTag::Regular,
        SourceTag::Legacy,
        SourceTag::Legends,
        SourceTag::LegacyBeta,
        SourceTag::Arc,
        SourceTag::Nexus,
        SourceTag::Amg,
        SourceTag::Community,
    ];

    /// Text shown inside the bracket on exported lines, if any.
    pub fn bracket_label(self) -> Option<&'static str> {
        match self {
            SourceTag::Regular | SourceTag::Amg => None,
            SourceTag::Legacy => Some("Legacy"),
            SourceTag::Legends => Some("Legends"),
            SourceTag::LegacyBeta => Some("LegacyBeta"),
            SourceTag::Arc => Some("ARC"),
            SourceTag::Nexus => Some("Nexus"),
            SourceTag::Community => Some("Community"),
        }
    }

    /// Bracketed suffix including the leading space (`" [Legacy]"`), or empty.
    pub fn suffix(self) -> String {
        self.bracket_label()
            .map(|label| format!(" [{label}]"))
            .unwrap_or_default()
    }

    /// Map the contents of a `[...]` bracket back onto a tag.
    pub fn from_bracket(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|tag| {
            tag.bracket_label()
                .is_some_and(|known| known.eq_ignore_ascii_case(label))
        })
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SourceTag::Regular => "regular",
            SourceTag::Legacy => "legacy",
            SourceTag::Legends => "legends",
            SourceTag::LegacyBeta => "legacyBeta",
            SourceTag::Arc => "arc",
            SourceTag::Nexus => "nexus",
            SourceTag::Amg => "amg",
            SourceTag::Community => "community",
        };
        f.write_str(value)
    }
}

impl FromStr for SourceTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown source tag: {s}"))
    }
}

/// Split a trailing `[Tag]` off a display name.
///
/// Returns the bare name and the recognised tag. Brackets that do not name a
/// known source are left in place as part of the name.
pub fn split_source_bracket(name: &str) -> (&str, Option<SourceTag>) {
    let trimmed = name.trim();
    if let Some(open) = trimmed.rfind('[') {
        if let Some(inner) = trimmed[open..]
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            if let Some(tag) = SourceTag::from_bracket(inner) {
                return (trimmed[..open].trim_end(), Some(tag));
            }
        }
    }
    (trimmed, None)
}
