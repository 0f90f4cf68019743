//! Individual title-cleaning stages.
//!
//! Each stage is a plain `&str -> String` transform. [`super::Normalizer`]
//! runs them in a fixed order; later stages assume earlier ones already ran
//! (brackets go before the platform suffix, punctuation runs go before
//! whitespace collapsing, lowercasing is last).

use std::sync::LazyLock;

use regex::Regex;

/// Regex to remove `( ... )` groups. Not nesting-aware.
static ROUND_BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());

/// Regex to remove `[ ... ]` groups.
static SQUARE_BRACKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").unwrap());

/// Regex to remove `{ ... }` groups.
static CURLY_BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{[^}]*\}").unwrap());

/// Site name appended to document titles by the default hosting platform.
pub const DEFAULT_PLATFORM: &str = "YouTube";

/// Regex to remove a trailing ` - YouTube` document-title suffix.
pub(super) static PLATFORM_SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    platform_suffix_regex(DEFAULT_PLATFORM)
        .unwrap_or_else(|e| panic!("Failed to compile platform suffix regex: {}", e))
});

/// Regex to match decorative separator glyphs: pipe, bullet, em-dash, en-dash.
static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[|•—–]").unwrap());

/// Regex to match hyphen runs standing alone between whitespace or string
/// edges (`Artist - Title`), including chains like ` - - `. Emoji and
/// punctuation runs touching the hyphen are dropped by later stages, so
/// they count as part of the gap (`Artist 🔥- Title`, `Song -... Remix`).
/// Hyphens inside a word are left alone.
static STANDALONE_HYPHEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    let gap = format!(r"(?:{}|[.!?]{{2,}})*", emoji_class());
    Regex::new(&format!(r"(?:^|\s){gap}-+(?:\s+{gap}-+)*{gap}(?:\s|$)"))
        .unwrap_or_else(|e| panic!("Failed to compile standalone hyphen regex: {}", e))
});

/// Regex to match runs of two or more terminal punctuation marks.
static PUNCTUATION_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]{2,}").unwrap());

/// Regex to match any whitespace run.
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Regex to match leading or trailing hyphens, dashes and whitespace.
static EDGE_DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-–—\s]+|[-–—\s]+$").unwrap());

/// Emoji and pictographic code point blocks, inclusive.
pub const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F), // Emoticons
    (0x1F300, 0x1F5FF), // Misc Symbols and Pictographs
    (0x1F680, 0x1F6FF), // Transport and Map
    (0x1F1E0, 0x1F1FF), // Regional indicators (flags)
    (0x2600, 0x26FF),   // Misc Symbols
    (0x2700, 0x27BF),   // Dingbats
    (0x1F900, 0x1F9FF), // Supplemental Symbols and Pictographs
    (0x1FA00, 0x1FA6F), // Chess Symbols
    (0x1FA70, 0x1FAFF), // Symbols and Pictographs Extended-A
];

/// Variation selectors and the zero width joiner, which only decorate the
/// emoji they follow.
const EMOJI_JOINERS: &[char] = &['\u{FE0E}', '\u{FE0F}', '\u{200D}'];

/// Regex character class covering [`EMOJI_RANGES`] and [`EMOJI_JOINERS`].
fn emoji_class() -> String {
    let mut class = String::from("[");
    for &(start, end) in EMOJI_RANGES {
        class.push_str(&format!(r"\x{{{:X}}}-\x{{{:X}}}", start, end));
    }
    for &joiner in EMOJI_JOINERS {
        class.push_str(&format!(r"\x{{{:X}}}", joiner as u32));
    }
    class.push(']');
    class
}

/// Build the trailing-suffix regex for a platform site name.
pub fn platform_suffix_regex(platform: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)\s*-\s*{}\s*$", regex::escape(platform.trim())))
}

/// Stage 1: delete `(...)`, `[...]` and `{...}` groups with their delimiters.
///
/// Each kind is handled in turn and pairs are matched independently, so
/// `x (a (b) c)` leaves ` c)` behind.
pub fn remove_bracket_groups(text: &str) -> String {
    let s = ROUND_BRACKET_RE.replace_all(text, "");
    let s = SQUARE_BRACKET_RE.replace_all(&s, "");
    CURLY_BRACKET_RE.replace_all(&s, "").into_owned()
}

/// Stage 3: strip a trailing `- <platform>` suffix matched by `suffix`.
pub fn remove_platform_suffix(text: &str, suffix: &Regex) -> String {
    suffix.replace(text, "").into_owned()
}

/// Stage 4: turn separator glyphs and standalone hyphens into spaces.
pub fn replace_separators(text: &str) -> String {
    let s = SEPARATOR_RE.replace_all(text, " ");
    STANDALONE_HYPHEN_RE.replace_all(&s, " ").into_owned()
}

/// True if `c` falls in one of the [`EMOJI_RANGES`] blocks.
pub fn is_emoji(c: char) -> bool {
    let cp = c as u32;
    EMOJI_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&cp))
}

/// Stage 5: drop emoji and pictographic code points, no replacement.
///
/// Variation selectors and joiners directly after a dropped emoji go with
/// it (`❤️`, `👩‍💻`); elsewhere they are kept.
pub fn strip_emoji(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_emoji = false;
    for c in text.chars() {
        if is_emoji(c) || (in_emoji && EMOJI_JOINERS.contains(&c)) {
            in_emoji = true;
        } else {
            in_emoji = false;
            out.push(c);
        }
    }
    out
}

/// Stage 6: drop every run of 2+ `.`, `!` or `?` entirely.
pub fn collapse_punctuation_runs(text: &str) -> String {
    PUNCTUATION_RUN_RE.replace_all(text, "").into_owned()
}

/// Stage 7: collapse whitespace runs into one space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Stage 8: strip leading/trailing runs of `-`, `–`, `—` and whitespace.
pub fn trim_edge_dashes(text: &str) -> String {
    EDGE_DASH_RE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_bracket_groups_all_kinds() {
        assert_eq!(
            remove_bracket_groups("Song (Audio) [HD] {x} end"),
            "Song    end"
        );
    }

    #[test]
    fn test_remove_bracket_groups_nested_leaves_fragment() {
        assert_eq!(remove_bracket_groups("x (a (b) c)"), "x  c)");
    }

    #[test]
    fn test_remove_bracket_groups_unclosed_is_kept() {
        assert_eq!(remove_bracket_groups("Song (live"), "Song (live");
    }

    #[test]
    fn test_remove_bracket_groups_mixed_kinds_inside() {
        // The round pass runs first and swallows the `[` of the square group.
        assert_eq!(remove_bracket_groups("a ([b) c]"), "a  c]");
    }

    #[test]
    fn test_remove_platform_suffix() {
        let re = &*PLATFORM_SUFFIX_RE;
        assert_eq!(remove_platform_suffix("Cool Song - YouTube", re), "Cool Song");
        assert_eq!(remove_platform_suffix("Cool Song -youtube  ", re), "Cool Song");
        assert_eq!(
            remove_platform_suffix("YouTube - Cool Song", re),
            "YouTube - Cool Song"
        );
    }

    #[test]
    fn test_platform_suffix_regex_escapes_name() {
        let re = platform_suffix_regex("Vid.eo").unwrap();
        assert_eq!(remove_platform_suffix("Song - vid.eo", &re), "Song");
        assert_eq!(remove_platform_suffix("Song - vidxeo", &re), "Song - vidxeo");
    }

    #[test]
    fn test_replace_separators_glyphs() {
        assert_eq!(replace_separators("a|b•c—d–e"), "a b c d e");
    }

    #[test]
    fn test_replace_separators_standalone_hyphen() {
        assert_eq!(replace_separators("Artist - Title"), "Artist Title");
        assert_eq!(replace_separators("a - - b"), "a b");
        assert_eq!(replace_separators("- a -"), " a ");
    }

    #[test]
    fn test_replace_separators_hyphen_next_to_emoji_or_punctuation_run() {
        assert_eq!(replace_separators("Artist 🔥- Title"), "Artist Title");
        assert_eq!(replace_separators("Artist -🔥 Title"), "Artist Title");
        assert_eq!(replace_separators("Artist ❤️- Title"), "Artist Title");
        assert_eq!(replace_separators("Song -... Remix"), "Song Remix");
        assert_eq!(replace_separators("Song !!- - Remix"), "Song Remix");
    }

    #[test]
    fn test_replace_separators_single_punctuation_not_a_gap() {
        assert_eq!(replace_separators("a !- b"), "a !- b");
        assert_eq!(replace_separators("a -. b"), "a -. b");
    }

    #[test]
    fn test_replace_separators_keeps_word_hyphens() {
        assert_eq!(replace_separators("Jay-Z"), "Jay-Z");
        assert_eq!(replace_separators("a -b"), "a -b");
        assert_eq!(replace_separators("a- b"), "a- b");
    }

    #[test]
    fn test_strip_emoji() {
        assert_eq!(strip_emoji("Track 🔥🎶 ☀✂🇺🇸🤖♟🪐"), "Track  ");
    }

    #[test]
    fn test_strip_emoji_drops_trailing_selectors_and_joiners() {
        assert_eq!(strip_emoji("Love ❤️"), "Love ");
        assert_eq!(strip_emoji("dev 👩\u{200D}💻 life"), "dev  life");
        assert_eq!(strip_emoji("🏳️\u{200D}⚧️ pride"), " pride");
    }

    #[test]
    fn test_strip_emoji_keeps_selector_after_text() {
        assert_eq!(strip_emoji("#\u{FE0F} tag"), "#\u{FE0F} tag");
        assert_eq!(strip_emoji("a\u{200D}b"), "a\u{200D}b");
    }

    #[test]
    fn test_strip_emoji_keeps_other_scripts() {
        assert_eq!(strip_emoji("夜に駆ける → Ёлка"), "夜に駆ける → Ёлка");
    }

    #[test]
    fn test_is_emoji_range_edges() {
        assert!(is_emoji('\u{2600}'));
        assert!(is_emoji('\u{27BF}'));
        assert!(is_emoji('\u{1FAFF}'));
        assert!(!is_emoji('\u{25FF}'));
        assert!(!is_emoji('\u{1F1DF}'));
    }

    #[test]
    fn test_collapse_punctuation_runs() {
        assert_eq!(collapse_punctuation_runs("Track!!! wow?! ok."), "Track wow ok.");
        assert_eq!(collapse_punctuation_runs("Mr. Brightside"), "Mr. Brightside");
        assert_eq!(collapse_punctuation_runs("wait..."), "wait");
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \t b\n\nc  "), "a b c");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn test_trim_edge_dashes() {
        assert_eq!(trim_edge_dashes("- — song – -"), "song");
        assert_eq!(trim_edge_dashes("a-ha"), "a-ha");
        assert_eq!(trim_edge_dashes("---"), "");
    }
}
