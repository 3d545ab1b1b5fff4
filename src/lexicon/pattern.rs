//! Marker pattern compilation
//!
//! Two pattern forms are supported:
//! - phrase: space-separated tokens in normalized form; `*` inside a token
//!   matches any run of word characters. Word boundaries are enforced at
//!   both ends when the edge character is a word character.
//! - regex: `re:` prefix followed by a `regex` crate expression, matched
//!   against normalized text.

use crate::analyzer::normalize::is_normalized_char;
use crate::EngineError;
use regex::{Regex, RegexBuilder};

pub const REGEX_PREFIX: &str = "re:";

/// Inputs used to detect patterns that can produce zero-length matches
const EMPTY_MATCH_PROBES: &[&str] = &["", " ", "a", "я б", "1 %"];

const MAX_PATTERN_LEN: usize = 512;

/// Compile one pattern of `rule_id` into a regex over normalized text
pub fn compile_pattern(rule_id: &str, pattern: &str) -> Result<Regex, EngineError> {
    if pattern.trim().is_empty() {
        return Err(EngineError::invalid_rule(rule_id, "empty pattern"));
    }
    if pattern.len() > MAX_PATTERN_LEN {
        return Err(EngineError::invalid_rule(
            rule_id,
            format!("pattern longer than {} bytes", MAX_PATTERN_LEN),
        ));
    }

    let expr = match pattern.strip_prefix(REGEX_PREFIX) {
        Some(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Err(EngineError::invalid_rule(rule_id, "empty regex pattern"));
            }
            raw.to_string()
        }
        None => phrase_to_regex(rule_id, pattern)?,
    };

    let regex = RegexBuilder::new(&expr)
        .case_insensitive(true)
        .build()
        .map_err(|e| EngineError::invalid_rule(rule_id, format!("pattern '{}': {}", pattern, e)))?;

    let matches_empty = EMPTY_MATCH_PROBES
        .iter()
        .any(|probe| regex.find_iter(probe).any(|m| m.is_empty()));
    if matches_empty {
        return Err(EngineError::invalid_rule(
            rule_id,
            format!("pattern '{}' can match the empty string", pattern),
        ));
    }

    Ok(regex)
}

/// Translate a phrase pattern into a regex expression
fn phrase_to_regex(rule_id: &str, phrase: &str) -> Result<String, EngineError> {
    let tokens: Vec<&str> = phrase.split_whitespace().collect();
    let mut parts = Vec::with_capacity(tokens.len());

    for token in &tokens {
        if token.chars().all(|c| c == '*') {
            return Err(EngineError::invalid_rule(
                rule_id,
                format!("phrase '{}' has a wildcard-only token", phrase),
            ));
        }
        let mut part = String::with_capacity(token.len() + 4);
        for c in token.chars() {
            if c == '*' {
                part.push_str(r"\w*");
            } else if is_normalized_char(c) {
                part.push_str(&regex::escape(c.encode_utf8(&mut [0u8; 4])));
            } else {
                return Err(EngineError::invalid_rule(
                    rule_id,
                    format!(
                        "phrase '{}' contains '{}', which never survives normalization",
                        phrase, c
                    ),
                ));
            }
        }
        parts.push(part);
    }

    let first = phrase.trim_start().chars().next();
    let last = phrase.trim_end().chars().last();
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '*');

    let mut expr = String::new();
    if is_word(first) {
        expr.push_str(r"\b");
    }
    expr.push_str(&parts.join(" "));
    if is_word(last) {
        expr.push_str(r"\b");
    }
    Ok(expr)
}
