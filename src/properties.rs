//! Derived properties of a string.
//!
//! Everything here is a pure function of the raw value. Note the deliberate
//! asymmetry: the palindrome test and the unique character count fold case and
//! ignore whitespace, whereas the frequency map only ignores whitespace and
//! keeps upper and lower case apart.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::datatype::{CharacterFrequency, ContentHash};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySet {
    pub length: u64,
    pub is_palindrome: bool,
    pub unique_characters: u64,
    pub word_count: u64,
    #[serde(rename = "sha256_hash")]
    pub content_hash: ContentHash,
    pub character_frequency_map: CharacterFrequency,
}

impl PropertySet {
    pub fn extract(value: &str) -> Self {
        Self {
            length: length(value),
            is_palindrome: is_palindrome(value),
            unique_characters: unique_characters(value),
            word_count: word_count(value),
            content_hash: ContentHash::of(value),
            character_frequency_map: CharacterFrequency::count(value),
        }
    }
}

fn folded(value: &str) -> Vec<char> {
    value
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Lowercases character by character, so a character folds the same way on
/// its own as inside a word (a final `Σ` becomes `σ`, never `ς`).
pub fn fold_case(value: &str) -> String {
    value.chars().flat_map(char::to_lowercase).collect()
}

/// Number of characters, whitespace included.
pub fn length(value: &str) -> u64 {
    value.chars().count() as u64
}

pub fn is_palindrome(value: &str) -> bool {
    let cleaned = folded(value);
    cleaned.iter().eq(cleaned.iter().rev())
}

pub fn unique_characters(value: &str) -> u64 {
    folded(value).into_iter().collect::<HashSet<char>>().len() as u64
}

/// Whitespace separated tokens of the trimmed value. A value that is empty
/// after trimming still counts as one (empty) word.
pub fn word_count(value: &str) -> u64 {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        1
    } else {
        trimmed.split_whitespace().count() as u64
    }
}
