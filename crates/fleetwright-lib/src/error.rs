use std::path::PathBuf;

use thiserror::Error;

use crate::fleet::Faction;

/// Convenient result alias for the fleetwright library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Content directory could not be located at the resolved path.
    #[error("content file not found at {path}")]
    ContentNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for content files")]
    ProjectDirsUnavailable,

    /// Raised when an import declares or implies a faction other than the target fleet's.
    #[error("fleet list is for {found}, but the fleet being edited is {expected}")]
    FactionMismatch { expected: Faction, found: Faction },

    /// Raised when a faction label is not recognised.
    #[error("unknown faction: {name}{}", format_suggestions(.suggestions))]
    UnknownFaction {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a format tag does not name a supported dialect.
    #[error("unknown fleet list format: {tag}{}", format_suggestions(.suggestions))]
    UnknownFormat {
        tag: String,
        suggestions: Vec<String>,
    },

    /// Raised when catalog data fails validation.
    #[error("invalid catalog data: {message}")]
    CatalogValidation { message: String },

    /// Raised when two catalog entries of the same kind share a key.
    #[error("duplicate {kind} key encountered: {key}")]
    DuplicateEntityKey { kind: &'static str, key: String },

    /// Raised when the alias table fails validation.
    #[error("invalid alias table: {message}")]
    AliasValidation { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub(crate) fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

/// Rank `candidates` by similarity to `needle`, keeping at most `limit` close matches.
pub(crate) fn fuzzy_matches<'a, I>(needle: &str, candidates: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    const MIN_SIMILARITY: f64 = 0.75;

    let needle = needle.to_lowercase();
    let mut scored: Vec<(f64, &str)> = candidates
        .into_iter()
        .map(|candidate| {
            let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
            (score, candidate)
        })
        .filter(|(score, _)| *score >= MIN_SIMILARITY)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored.dedup_by(|a, b| a.1 == b.1);
    scored
        .into_iter()
        .take(limit)
        .map(|(_, name)| name.to_string())
        .collect()
}
