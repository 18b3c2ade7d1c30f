//! Filter sets and the structured (query parameter) filter builder.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StringLensError};

/// Optional predicates over stored strings. Only the fields that are set
/// serialize, which makes a filter set its own `filters_applied` echo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub is_palindrome: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub min_length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub max_length: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub word_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub contains_character: Option<char>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self == &FilterSet::default()
    }
    /// True when both bounds are present and the minimum exceeds the maximum.
    pub fn has_inverted_range(&self) -> bool {
        matches!((self.min_length, self.max_length), (Some(min), Some(max)) if min > max)
    }
}

/// Raw `GET /strings` query parameters, validated by [`StructuredQuery::build`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructuredQuery {
    pub is_palindrome: Option<String>,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub word_count: Option<String>,
    pub contains_character: Option<String>,
}

impl StructuredQuery {
    /// Validates each supplied parameter in turn. The first invalid one aborts
    /// the whole build.
    pub fn build(&self) -> Result<FilterSet> {
        let mut filters = FilterSet::default();
        if let Some(raw) = &self.is_palindrome {
            filters.is_palindrome = Some(match raw.as_str() {
                "true" => true,
                "false" => false,
                _ => return Err(invalid("is_palindrome")),
            });
        }
        if let Some(raw) = &self.min_length {
            filters.min_length = Some(parse_integer(raw).ok_or(invalid("min_length"))?);
        }
        if let Some(raw) = &self.max_length {
            filters.max_length = Some(parse_integer(raw).ok_or(invalid("max_length"))?);
        }
        if let Some(raw) = &self.word_count {
            filters.word_count = Some(parse_integer(raw).ok_or(invalid("word_count"))?);
        }
        if let Some(raw) = &self.contains_character {
            let mut chars = raw.chars();
            filters.contains_character = match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => return Err(invalid("contains_character")),
            };
        }
        Ok(filters)
    }
}

fn invalid(parameter: &'static str) -> StringLensError {
    StringLensError::Validation { parameter }
}

/// Reads the leading integer of `raw`: surrounding whitespace and a sign are
/// allowed, anything after the digits is ignored, and at least one digit is
/// required. Values outside of `i64` are rejected.
fn parse_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i128 = digits[..end].parse().ok()?;
    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value).ok()
}

#[cfg(test)]
mod tests {
    use super::parse_integer;

    #[test]
    fn leading_integer_semantics() {
        assert_eq!(parse_integer("42"), Some(42));
        assert_eq!(parse_integer("  -7"), Some(-7));
        assert_eq!(parse_integer("+3"), Some(3));
        assert_eq!(parse_integer("12abc"), Some(12));
        assert_eq!(parse_integer("3.9"), Some(3));
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("abc"), None);
        assert_eq!(parse_integer("-"), None);
        assert_eq!(parse_integer("99999999999999999999"), None);
    }
}
