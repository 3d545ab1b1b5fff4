//! Text normalization with a normalized -> original offset table
//!
//! Lowercases, folds `ё` to `е` and typographic apostrophes to `'`, blanks URLs
//! and e-mail addresses, turns every other non-alphanumeric character (except
//! `%`, `'` and `+`) into a space, and collapses whitespace runs.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)https?://\S+|www\.\S+").expect("valid URL regex"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid e-mail regex")
    })
}

/// How a single source character appears in normalized text
enum Fold {
    Space,
    Keep(char),
    Lower(std::char::ToLowercase),
}

fn fold_char(c: char) -> Fold {
    match c {
        'ё' | 'Ё' => Fold::Keep('е'),
        '\u{2018}' | '\u{2019}' | '\u{02BC}' | '`' => Fold::Keep('\''),
        '%' | '\'' | '+' => Fold::Keep(c),
        c if c.is_alphanumeric() => Fold::Lower(c.to_lowercase()),
        _ => Fold::Space,
    }
}

/// True if `c` survives normalization unchanged (used to validate lexicon phrases)
pub fn is_normalized_char(c: char) -> bool {
    match fold_char(c) {
        Fold::Space => false,
        Fold::Keep(k) => k == c,
        Fold::Lower(mut lower) => lower.next() == Some(c) && lower.next().is_none(),
    }
}

/// Normalized text plus, for every normalized byte, the byte range of the
/// original character it came from
#[derive(Debug, Clone)]
pub struct NormalizedText {
    text: String,
    origin: Vec<Range<usize>>,
}

impl NormalizedText {
    pub fn new(original: &str) -> Self {
        let masked = masked_ranges(original);
        let mut masked_iter = masked.iter().peekable();

        let mut text = String::with_capacity(original.len());
        let mut origin: Vec<Range<usize>> = Vec::with_capacity(original.len());
        let mut pending_space: Option<Range<usize>> = None;

        for (idx, c) in original.char_indices() {
            let span = idx..idx + c.len_utf8();

            while masked_iter.peek().is_some_and(|m| m.end <= idx) {
                masked_iter.next();
            }
            let is_masked = masked_iter.peek().is_some_and(|m| m.start <= idx);

            let fold = if is_masked { Fold::Space } else { fold_char(c) };
            match fold {
                Fold::Space => {
                    if !text.is_empty() && pending_space.is_none() {
                        pending_space = Some(span);
                    }
                }
                Fold::Keep(k) => {
                    Self::flush_space(&mut text, &mut origin, &mut pending_space);
                    Self::push(&mut text, &mut origin, k, &span);
                }
                Fold::Lower(lower) => {
                    Self::flush_space(&mut text, &mut origin, &mut pending_space);
                    for l in lower {
                        Self::push(&mut text, &mut origin, l, &span);
                    }
                }
            }
        }

        debug_assert_eq!(text.len(), origin.len());
        Self { text, origin }
    }

    fn flush_space(
        text: &mut String,
        origin: &mut Vec<Range<usize>>,
        pending: &mut Option<Range<usize>>,
    ) {
        if let Some(span) = pending.take() {
            Self::push(text, origin, ' ', &span);
        }
    }

    fn push(text: &mut String, origin: &mut Vec<Range<usize>>, c: char, span: &Range<usize>) {
        text.push(c);
        for _ in 0..c.len_utf8() {
            origin.push(span.clone());
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Map a non-empty normalized byte range back to the original text
    pub fn to_original(&self, range: Range<usize>) -> Range<usize> {
        debug_assert!(range.start < range.end && range.end <= self.origin.len());
        self.origin[range.start].start..self.origin[range.end - 1].end
    }
}

/// URL and e-mail ranges in the original text, sorted and non-overlapping
fn masked_ranges(original: &str) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = url_regex()
        .find_iter(original)
        .chain(email_regex().find_iter(original))
        .map(|m| m.range())
        .collect();
    ranges.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(ranges.len());
    for r in ranges {
        match merged.last_mut() {
            Some(last) if r.start <= last.end => last.end = last.end.max(r.end),
            _ => merged.push(r),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_collapses_whitespace() {
        let n = NormalizedText::new("  Miracle   CURE\n\tnow ");
        assert_eq!(n.as_str(), "miracle cure now");
    }

    #[test]
    fn test_strips_punctuation_and_hyphens() {
        let n = NormalizedText::new("Чудо-средство... 100% гарантия!");
        assert_eq!(n.as_str(), "чудо средство 100% гарантия");
    }

    #[test]
    fn test_folds_yo_and_apostrophes() {
        assert_eq!(NormalizedText::new("Лечит всё").as_str(), "лечит все");
        assert_eq!(NormalizedText::new("Don\u{2019}t miss").as_str(), "don't miss");
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert!(NormalizedText::new("").is_empty());
        assert!(NormalizedText::new("?!... ---").is_empty());
    }

    #[test]
    fn test_offsets_map_back_to_original() {
        let original = "Врачи  СКРЫВАЮТ!";
        let n = NormalizedText::new(original);
        assert_eq!(n.as_str(), "врачи скрывают");

        let start = n.as_str().find("скрывают").unwrap();
        let range = n.to_original(start..start + "скрывают".len());
        assert_eq!(&original[range], "СКРЫВАЮТ");

        let whole = n.to_original(0..n.as_str().len());
        assert_eq!(&original[whole], "Врачи  СКРЫВАЮТ");
    }

    #[test]
    fn test_multi_char_lowercase_maps_to_one_original_char() {
        // 'İ' lowercases to two chars
        let original = "İx";
        let n = NormalizedText::new(original);
        let range = n.to_original(0..n.as_str().len());
        assert_eq!(&original[range], "İx");
    }

    #[test]
    fn test_urls_and_emails_are_blanked() {
        let n = NormalizedText::new("see https://miracle-cure.example/detox or mail cure@detox.com today");
        assert_eq!(n.as_str(), "see or mail today");
    }

    #[test]
    fn test_is_normalized_char() {
        assert!(is_normalized_char('а'));
        assert!(is_normalized_char('7'));
        assert!(is_normalized_char('%'));
        assert!(!is_normalized_char('А'));
        assert!(!is_normalized_char('ё'));
        assert!(!is_normalized_char('-'));
        assert!(!is_normalized_char(' '));
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn normalized_chars_map_to_char_boundaries(ref input in "\\PC{0,200}") {
            let normalized = NormalizedText::new(input);
            let text = normalized.as_str();
            prop_assert!(!text.starts_with(' '));
            prop_assert!(!text.contains("  "));

            for (idx, c) in text.char_indices() {
                let range = normalized.to_original(idx..idx + c.len_utf8());
                prop_assert!(range.start < range.end);
                prop_assert!(range.end <= input.len());
                prop_assert!(input.is_char_boundary(range.start));
                prop_assert!(input.is_char_boundary(range.end));
            }
        }

        #[test]
        fn normalization_ignores_case(ref input in "[a-zA-Zа-яА-Я .!]{0,100}") {
            let lower = NormalizedText::new(&input.to_lowercase());
            let upper = NormalizedText::new(&input.to_uppercase());
            prop_assert_eq!(lower.as_str(), upper.as_str());
        }
    }
}
