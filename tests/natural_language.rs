use stringlens::error::StringLensError;
use stringlens::filter::FilterSet;
use stringlens::interpret::interpret;

fn parsed(query: &str) -> FilterSet {
    interpret(query)
        .unwrap_or_else(|e| panic!("unexpected error for {query:?}: {e}"))
        .parsed_filters
}

#[test]
fn palindromic_longer_than() {
    let interpretation = interpret("palindromic strings longer than 5").expect("parsed");
    assert_eq!(interpretation.original, "palindromic strings longer than 5");
    assert_eq!(
        serde_json::to_value(&interpretation.parsed_filters).unwrap(),
        serde_json::json!({ "is_palindrome": true, "min_length": 6 })
    );
}

#[test]
fn matching_is_case_insensitive_and_keeps_original() {
    let interpretation = interpret("All SINGLE WORD Palindromic strings").expect("parsed");
    assert_eq!(interpretation.original, "All SINGLE WORD Palindromic strings");
    assert_eq!(interpretation.parsed_filters.word_count, Some(1));
    assert_eq!(interpretation.parsed_filters.is_palindrome, Some(true));
}

#[test]
fn non_palindromic_alone_is_not_a_conflict() {
    let filters = parsed("non-palindromic strings");
    assert_eq!(filters.is_palindrome, Some(false));
}

#[test]
fn length_bounds() {
    let filters = parsed("strings longer than 3 and shorter than 10");
    assert_eq!(filters.min_length, Some(4));
    assert_eq!(filters.max_length, Some(9));
    assert_eq!(parsed("shorter than 0").max_length, Some(-1));
}

#[test]
fn letters() {
    assert_eq!(parsed("strings containing the letter z").contains_character, Some('z'));
    assert_eq!(parsed("words that contain the letter Q").contains_character, Some('q'));
}

#[test]
fn first_vowel_overrides_named_letter() {
    let filters = parsed("single word strings containing the letter z and the first vowel");
    assert_eq!(filters.contains_character, Some('a'));
    assert_eq!(filters.word_count, Some(1));
}

#[test]
fn unparseable_queries() {
    for query in ["purple elephants", "", "strings with multiple words", "longer than many"] {
        assert!(
            matches!(interpret(query), Err(StringLensError::UnparseableQuery)),
            "{query:?} should be unparseable"
        );
    }
}

#[test]
fn oversized_numbers_have_no_effect() {
    assert!(matches!(
        interpret("longer than 99999999999999999999999"),
        Err(StringLensError::UnparseableQuery)
    ));
    let filters = parsed("palindromic strings longer than 99999999999999999999999");
    assert_eq!(filters.min_length, None);
}

fn conflicts(query: &str) -> Vec<&'static str> {
    match interpret(query) {
        Err(StringLensError::ConflictingFilters { conflicts }) => conflicts,
        other => panic!("expected conflicting filters for {query:?}, got {other:?}"),
    }
}

#[test]
fn palindrome_conflict() {
    assert_eq!(
        conflicts("palindromic and non-palindromic"),
        vec!["Conflicting palindrome conditions"]
    );
}

#[test]
fn word_count_conflict() {
    assert_eq!(conflicts("single word strings with more than one word").len(), 1);
    assert_eq!(conflicts("single word or multiple words").len(), 1);
}

#[test]
fn range_conflict() {
    assert_eq!(
        conflicts("longer than 10 and shorter than 5"),
        vec!["min_length cannot be greater than max_length"]
    );
}

#[test]
fn every_conflict_is_reported() {
    assert_eq!(
        conflicts("palindromic non-palindromic single word multiple words longer than 9 shorter than 2")
            .len(),
        3
    );
}
