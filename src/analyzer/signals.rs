//! Auxiliary text signals. Reported alongside the score, never scored.

use crate::TextStats;
use regex::Regex;
use std::sync::OnceLock;

/// Share of letters a script needs before the text counts as written in it
pub const SCRIPT_SHARE_THRESHOLD: f64 = 0.6;

fn sentence_end_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+(\s+|$)").expect("valid sentence regex"))
}

/// Character, word and sentence counts
pub fn text_stats(text: &str) -> TextStats {
    let chars = text.chars().count();
    let words = text.split_whitespace().count();
    let sentences = sentence_end_regex()
        .split(text)
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .count();
    let avg_sentence_length = if sentences == 0 {
        0.0
    } else {
        words as f64 / sentences as f64
    };

    TextStats {
        chars,
        words,
        sentences,
        avg_sentence_length,
    }
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, '\u{0400}'..='\u{04FF}' | '\u{0500}'..='\u{052F}')
}

fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '\u{00C0}'..='\u{024F}')
}

/// Guess the language from the letters' script: `Some("ru")` for mostly
/// Cyrillic text, `Some("en")` for mostly Latin text, `None` otherwise.
pub fn detect_script_language(text: &str) -> Option<&'static str> {
    let mut letters = 0usize;
    let mut cyrillic = 0usize;
    let mut latin = 0usize;

    for c in text.chars().filter(|c| c.is_alphabetic()) {
        letters += 1;
        if is_cyrillic(c) {
            cyrillic += 1;
        } else if is_latin(c) {
            latin += 1;
        }
    }

    if letters == 0 {
        return None;
    }
    let total = letters as f64;
    if cyrillic as f64 / total > SCRIPT_SHARE_THRESHOLD {
        Some("ru")
    } else if latin as f64 / total > SCRIPT_SHARE_THRESHOLD {
        Some("en")
    } else {
        None
    }
}
