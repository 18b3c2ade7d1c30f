//! Heuristic translation of English phrases into a [`FilterSet`].
//!
//! The interpreter knows a small, fixed set of phrases. Each phrase is a rule
//! consisting of a pattern and an effect on the filter set. Rules are checked
//! against the lowercased query in a fixed order; every matching rule
//! applies, so when two rules write the same field the later one wins. For
//! example "non-palindromic" is listed after "palindromic" and the phrase
//! "first vowel" overrides any letter named earlier in the query.
//!
//! After extraction the query is checked for contradictions, which are
//! reported rather than resolved.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, StringLensError};
use crate::filter::FilterSet;

#[derive(Debug, Clone, Copy)]
enum Effect {
    Palindrome(bool),
    WordCount(i64),
    /// min_length = N + 1 for the captured N
    LongerThan,
    /// max_length = N - 1 for the captured N
    ShorterThan,
    /// contains_character = the captured character
    Letter,
    Character(char),
}

impl Effect {
    /// Returns false when the captured text could not be used.
    fn apply(self, captures: &Captures, filters: &mut FilterSet) -> bool {
        match self {
            Effect::Palindrome(p) => filters.is_palindrome = Some(p),
            Effect::WordCount(n) => filters.word_count = Some(n),
            Effect::LongerThan => match number(captures).and_then(|n| n.checked_add(1)) {
                Some(n) => filters.min_length = Some(n),
                None => return false,
            },
            Effect::ShorterThan => match number(captures).and_then(|n| n.checked_sub(1)) {
                Some(n) => filters.max_length = Some(n),
                None => return false,
            },
            Effect::Letter => match captures.get(1).and_then(|m| m.as_str().chars().next()) {
                Some(c) => filters.contains_character = Some(c),
                None => return false,
            },
            Effect::Character(c) => filters.contains_character = Some(c),
        }
        true
    }
}

fn number(captures: &Captures) -> Option<i64> {
    captures.get(1)?.as_str().parse().ok()
}

struct Rule {
    name: &'static str,
    pattern: Regex,
    effect: Effect,
}

impl Rule {
    fn new(name: &'static str, pattern: &str, effect: Effect) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            effect,
        }
    }
}

lazy_static! {
    // "palindromic" on its own, not the tail of "non-palindromic"
    static ref AFFIRMATIVE_PALINDROMIC: Regex = Regex::new(r"(?:^|[^-])palindromic").unwrap();

    static ref RULES: Vec<Rule> = vec![
        Rule::new("palindromic", AFFIRMATIVE_PALINDROMIC.as_str(), Effect::Palindrome(true)),
        Rule::new("non-palindromic", r"non-palindromic", Effect::Palindrome(false)),
        Rule::new("single word", r"single word", Effect::WordCount(1)),
        Rule::new("longer than", r"longer than (\d+)", Effect::LongerThan),
        Rule::new("shorter than", r"shorter than (\d+)", Effect::ShorterThan),
        Rule::new("containing the letter", r"containing the letter (\w)", Effect::Letter),
        Rule::new("contain the letter", r"contain the letter (\w)", Effect::Letter),
        // stand-in for a real first vowel search
        Rule::new("first vowel", r"first vowel", Effect::Character('a')),
    ];
}

/// The original query next to the filters derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub original: String,
    pub parsed_filters: FilterSet,
}

pub fn interpret(query: &str) -> Result<Interpretation> {
    let lowered = query.to_lowercase();
    let mut filters = FilterSet::default();
    let mut matched = Vec::new();
    for rule in RULES.iter() {
        if let Some(captures) = rule.pattern.captures(&lowered) {
            if rule.effect.apply(&captures, &mut filters) {
                matched.push(rule.name);
            }
        }
    }
    debug!(query, rules = ?matched, "interpreted natural language query");
    if filters.is_empty() {
        return Err(StringLensError::UnparseableQuery);
    }
    let conflicts = conflicts(&lowered, &filters);
    if !conflicts.is_empty() {
        return Err(StringLensError::ConflictingFilters { conflicts });
    }
    Ok(Interpretation {
        original: query.to_string(),
        parsed_filters: filters,
    })
}

fn conflicts(lowered: &str, filters: &FilterSet) -> Vec<&'static str> {
    let mut found = Vec::new();
    if AFFIRMATIVE_PALINDROMIC.is_match(lowered) && lowered.contains("non-palindromic") {
        found.push("Conflicting palindrome conditions");
    }
    if lowered.contains("single word")
        && (lowered.contains("multiple word") || lowered.contains("more than one word"))
    {
        found.push("Conflicting word count conditions (single vs multiple)");
    }
    if filters.has_inverted_range() {
        found.push("min_length cannot be greater than max_length");
    }
    found
}
