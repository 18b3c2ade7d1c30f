use stringlens::error::StringLensError;
use stringlens::filter::{FilterSet, StructuredQuery};

fn query(pairs: &[(&str, &str)]) -> StructuredQuery {
    let mut query = StructuredQuery::default();
    for (key, value) in pairs {
        let value = Some(value.to_string());
        match *key {
            "is_palindrome" => query.is_palindrome = value,
            "min_length" => query.min_length = value,
            "max_length" => query.max_length = value,
            "word_count" => query.word_count = value,
            "contains_character" => query.contains_character = value,
            other => panic!("unknown parameter {other}"),
        }
    }
    query
}

fn rejected_parameter(pairs: &[(&str, &str)]) -> &'static str {
    match query(pairs).build() {
        Err(StringLensError::Validation { parameter }) => parameter,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

#[test]
fn no_parameters_give_empty_filters() {
    let filters = StructuredQuery::default().build().expect("valid");
    assert!(filters.is_empty());
    assert_eq!(serde_json::to_string(&filters).unwrap(), "{}");
}

#[test]
fn all_parameters_are_parsed() {
    let filters = query(&[
        ("is_palindrome", "true"),
        ("min_length", "5"),
        ("max_length", "20"),
        ("word_count", "2"),
        ("contains_character", "a"),
    ])
    .build()
    .expect("valid");
    assert_eq!(
        filters,
        FilterSet {
            is_palindrome: Some(true),
            min_length: Some(5),
            max_length: Some(20),
            word_count: Some(2),
            contains_character: Some('a'),
        }
    );
}

#[test]
fn only_supplied_filters_are_echoed() {
    let filters = query(&[("is_palindrome", "false"), ("word_count", "3")])
        .build()
        .expect("valid");
    let echoed = serde_json::to_value(&filters).unwrap();
    assert_eq!(echoed, serde_json::json!({ "is_palindrome": false, "word_count": 3 }));
}

#[test]
fn palindrome_flag_is_case_sensitive() {
    assert_eq!(rejected_parameter(&[("is_palindrome", "True")]), "is_palindrome");
    assert_eq!(rejected_parameter(&[("is_palindrome", "yes")]), "is_palindrome");
    assert_eq!(rejected_parameter(&[("is_palindrome", "")]), "is_palindrome");
}

#[test]
fn integers_use_leading_digits() {
    let filters = query(&[("min_length", "12abc")]).build().expect("valid");
    assert_eq!(filters.min_length, Some(12));
    assert_eq!(rejected_parameter(&[("max_length", "abc")]), "max_length");
    assert_eq!(rejected_parameter(&[("word_count", "")]), "word_count");
}

#[test]
fn contains_character_needs_exactly_one_character() {
    assert_eq!(rejected_parameter(&[("contains_character", "")]), "contains_character");
    assert_eq!(rejected_parameter(&[("contains_character", "ab")]), "contains_character");
    let filters = query(&[("contains_character", "é")]).build().expect("valid");
    assert_eq!(filters.contains_character, Some('é'));
}

#[test]
fn first_invalid_parameter_aborts() {
    assert_eq!(
        rejected_parameter(&[("is_palindrome", "maybe"), ("min_length", "x")]),
        "is_palindrome"
    );
}

#[test]
fn inverted_range_is_accepted_by_the_builder() {
    let filters = query(&[("min_length", "5"), ("max_length", "3")])
        .build()
        .expect("each parameter is valid on its own");
    assert!(filters.has_inverted_range());
}
