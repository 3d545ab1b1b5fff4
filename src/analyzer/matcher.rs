//! Marker matching over normalized text

use super::normalize::NormalizedText;
use crate::lexicon::Lexicon;
use crate::{MarkerHit, TermSpan};
use regex::Regex;
use std::collections::BTreeSet;
use std::ops::Range;

/// Find every marker hit in `text`.
///
/// Overlapping matches of one rule are all reported (the search resumes at the
/// next word start after each match start); identical spans found by two patterns
/// of the same rule count once. Hits from different rules are independent.
/// Output order: original start offset, then category declaration order,
/// then rule order, then end offset.
pub fn find_hits(text: &NormalizedText, lexicon: &Lexicon) -> Vec<MarkerHit> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut keyed: Vec<((usize, usize, usize, usize), MarkerHit)> = Vec::new();

    for (rule_index, rule) in lexicon.rules().iter().enumerate() {
        let category_rank = lexicon.category_rank(rule.category());

        let mut spans: BTreeSet<(usize, usize)> = BTreeSet::new();
        for regex in rule.regexes() {
            for span in overlapping_matches(regex, text.as_str()) {
                spans.insert((span.start, span.end));
            }
        }

        for (start, end) in spans {
            let original = text.to_original(start..end);
            keyed.push((
                (original.start, category_rank, rule_index, original.end),
                MarkerHit {
                    category: rule.category(),
                    rule: rule.id().to_string(),
                    weight: rule.weight(),
                    start: original.start,
                    end: original.end,
                },
            ));
        }
    }

    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, hit)| hit).collect()
}

/// Find spans of auxiliary terms (evidence vocabulary, amplifiers), in offset order
pub fn find_terms(text: &NormalizedText, patterns: &[Regex]) -> Vec<TermSpan> {
    if text.is_empty() {
        return Vec::new();
    }

    let spans: BTreeSet<(usize, usize)> = patterns
        .iter()
        .flat_map(|regex| overlapping_matches(regex, text.as_str()))
        .map(|span| {
            let original = text.to_original(span);
            (original.start, original.end)
        })
        .collect();

    spans
        .into_iter()
        .map(|(start, end)| TermSpan { start, end })
        .collect()
}

/// All non-empty matches of `regex`, including overlapping ones that start at
/// a later word
fn overlapping_matches(regex: &Regex, haystack: &str) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    let mut pos = 0;

    while pos < haystack.len() {
        let Some(m) = regex.find_at(haystack, pos) else {
            break;
        };
        if !m.is_empty() {
            found.push(m.range());
        }
        // Resume at the next word start, so one token never yields its own suffixes
        pos = match haystack[m.start()..].find(' ') {
            Some(0) => m.start() + 1,
            Some(offset) => m.start() + offset + 1,
            None => break,
        };
    }

    found
}
