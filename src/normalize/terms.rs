//! Boilerplate term table.
//!
//! Holds the vocabulary of platform noise phrases ("official video",
//! "lyrics", "4k", ...) and compiles it into a single case-insensitive,
//! word-bounded alternation. Longer phrases are placed first so that
//! "official music video" is removed as a unit before "official" or
//! "video" can match a piece of it.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Built-in boilerplate phrases, lowercase.
pub const BOILERPLATE_TERMS: &[&str] = &[
    "official music video",
    "official video",
    "music video",
    "lyric video",
    "official audio",
    "official",
    "visualizer",
    "lyrics",
    "audio",
    "video",
    "remastered",
    "acoustic",
    "live",
    "cover",
    "karaoke",
    "reaction",
    "premiere",
    "shorts",
    "hd",
    "4k",
    "8k",
    "mv",
];

/// Process-wide table built from [`BOILERPLATE_TERMS`], initialized once.
pub static DEFAULT_TERMS: LazyLock<TermTable> = LazyLock::new(|| {
    TermTable::new(BOILERPLATE_TERMS.iter().copied())
        .unwrap_or_else(|e| panic!("Failed to compile built-in term table: {}", e))
});

/// An immutable, ordered set of boilerplate phrases and the pattern that
/// matches them.
#[derive(Debug, Clone)]
pub struct TermTable {
    terms: Vec<String>,
    pattern: Option<Regex>,
}

impl TermTable {
    /// Build a table from `phrases`.
    ///
    /// Phrases are trimmed and lowercased; empty phrases and duplicates
    /// (first occurrence wins) are dropped. The only possible error is the
    /// regex engine refusing an alternation that exceeds its size limit.
    pub fn new<I, S>(phrases: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut terms: Vec<String> = phrases
            .into_iter()
            .map(|phrase| phrase.as_ref().trim().to_lowercase())
            .filter(|phrase| !phrase.is_empty())
            .filter(|phrase| seen.insert(phrase.clone()))
            .collect();

        // Stable: equal-length phrases keep their insertion order.
        terms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

        let pattern = match build_pattern(&terms) {
            Some(source) => Some(Regex::new(&source)?),
            None => None,
        };

        Ok(Self { terms, pattern })
    }

    /// The built-in table extended with `extra` phrases.
    pub fn with_extra_terms<I, S>(extra: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra: Vec<String> = extra.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::new(
            BOILERPLATE_TERMS
                .iter()
                .map(|term| term.to_string())
                .chain(extra),
        )
    }

    /// Phrases in match order (longest first).
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if `text` contains any phrase as a whole word.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|re| re.is_match(text))
    }

    /// Remove every whole-word, case-insensitive occurrence of a phrase.
    pub fn strip(&self, text: &str) -> String {
        match &self.pattern {
            Some(re) => re.replace_all(text, "").into_owned(),
            None => text.to_string(),
        }
    }
}

/// Join the (already ordered) phrases into one alternation source.
fn build_pattern(terms: &[String]) -> Option<String> {
    if terms.is_empty() {
        return None;
    }
    let alternation = terms
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");
    Some(format!(r"(?i)\b(?:{})\b", alternation))
}
