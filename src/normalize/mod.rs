//! Title normalization.
//!
//! Turns a scraped video title into a lowercase search query in ten fixed
//! steps:
//! 1. Bracket groups `(...)`, `[...]`, `{...}` removed
//! 2. Boilerplate phrases removed ([`TermTable`])
//! 3. Trailing ` - YouTube` suffix removed
//! 4. Separator glyphs (`|`, `•`, `—`, `–`, standalone `-`) turned into spaces
//! 5. Emoji and pictographs dropped
//! 6. Runs of `.`, `!`, `?` dropped
//! 7. Whitespace collapsed
//! 8. Edge dashes trimmed
//! 9. Lowercased
//! 10. Final trim

mod pipeline;
mod terms;


use std::borrow::Cow;
use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;

use crate::config::NormalizeConfig;

pub use pipeline::{DEFAULT_PLATFORM, EMOJI_RANGES, is_emoji};
pub use terms::{BOILERPLATE_TERMS, DEFAULT_TERMS, TermTable};

static DEFAULT_NORMALIZER: LazyLock<Normalizer> = LazyLock::new(Normalizer::default);

/// Normalize `raw` with the built-in term table.
pub fn normalize(raw: &str) -> String {
    DEFAULT_NORMALIZER.normalize(raw)
}

/// Normalize a title that may be absent. `None` yields the empty string.
pub fn normalize_optional(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}

/// A configured title normalizer.
///
/// Holds only read-only data, so one instance can be shared freely across
/// threads.
#[derive(Debug, Clone)]
pub struct Normalizer {
    terms: Cow<'static, TermTable>,
    platform_suffix: Regex,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            terms: Cow::Borrowed(&*DEFAULT_TERMS),
            platform_suffix: pipeline::PLATFORM_SUFFIX_RE.clone(),
        }
    }
}

impl Normalizer {
    pub fn new(terms: TermTable, platform: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            terms: Cow::Owned(terms),
            platform_suffix: pipeline::platform_suffix_regex(platform)?,
        })
    }

    /// Build a normalizer from configuration. Without extra terms or a
    /// custom platform the built-in static table is reused.
    pub fn from_config(config: &NormalizeConfig) -> Result<Self, regex::Error> {
        let default_platform = config.platform.trim() == DEFAULT_PLATFORM;
        if config.extra_terms.is_empty() && default_platform {
            return Ok(Self::default());
        }

        let terms = if config.extra_terms.is_empty() {
            Cow::Borrowed(&*DEFAULT_TERMS)
        } else {
            Cow::Owned(TermTable::with_extra_terms(&config.extra_terms)?)
        };
        log::debug!(
            "Built normalizer with {} terms for platform '{}'",
            terms.len(),
            config.platform
        );

        Ok(Self {
            terms,
            platform_suffix: pipeline::platform_suffix_regex(&config.platform)?,
        })
    }

    pub fn terms(&self) -> &TermTable {
        &self.terms
    }

    /// Run the full cleaning pipeline on `raw`.
    pub fn normalize(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let s = pipeline::remove_bracket_groups(raw);
        let s = self.terms.strip(&s);
        let s = pipeline::remove_platform_suffix(&s, &self.platform_suffix);
        let s = pipeline::replace_separators(&s);
        let s = pipeline::strip_emoji(&s);
        let s = pipeline::collapse_punctuation_runs(&s);
        let s = pipeline::normalize_whitespace(&s);
        let s = pipeline::trim_edge_dashes(&s);
        let s = s.to_lowercase();

        s.trim().to_string()
    }

    /// Normalize many titles in parallel, keeping input order.
    pub fn normalize_all<S: AsRef<str> + Sync>(&self, raw_titles: &[S]) -> Vec<String> {
        raw_titles
            .par_iter()
            .map(|raw| self.normalize(raw.as_ref()))
            .collect()
    }
}
