//! Elastiq test utilities.
//!
//! Helpers for integration testing: condition fixtures, sample builders,
//! and assertion utilities for compiled query JSON.

use elastiq_grammar::{
    Comparator, ConditionValue, LeafType, LogicalJoin, QueryCondition, SearchBuilder,
    SortDirection,
};

/// AND-joined `term` condition.
pub fn term(field: &str, value: impl Into<ConditionValue>) -> QueryCondition {
    QueryCondition::leaf(LogicalJoin::And, LeafType::Term, field, None, value)
}

/// OR-joined `term` condition.
pub fn or_term(field: &str, value: impl Into<ConditionValue>) -> QueryCondition {
    QueryCondition::leaf(LogicalJoin::Or, LeafType::Term, field, None, value)
}

/// AND-joined negated `term` condition.
pub fn not_term(field: &str, value: impl Into<ConditionValue>) -> QueryCondition {
    QueryCondition::leaf(
        LogicalJoin::And,
        LeafType::Term,
        field,
        Some(Comparator::Ne),
        value,
    )
}

/// OR-joined negated `term` condition.
pub fn or_not_term(field: &str, value: impl Into<ConditionValue>) -> QueryCondition {
    QueryCondition::leaf(
        LogicalJoin::Or,
        LeafType::Term,
        field,
        Some(Comparator::Ne),
        value,
    )
}

/// AND-joined nested group.
pub fn group(children: Vec<QueryCondition>) -> QueryCondition {
    QueryCondition::nested(LogicalJoin::And, children)
}

/// OR-joined nested group.
pub fn or_group(children: Vec<QueryCondition>) -> QueryCondition {
    QueryCondition::nested(LogicalJoin::Or, children)
}

/// A typical article search touching every request component.
pub fn article_search() -> SearchBuilder {
    SearchBuilder::new()
        .index("articles")
        .doc_type("_doc")
        .select(["id", "title"])
        .where_term("status", "published")
        .where_not("author", "bot")
        .order_by("published_at", SortDirection::Desc)
        .aggregate("views", "avg")
        .limit(20)
        .offset(40)
}

/// Assertion helpers for JSON content.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a JSON value lacks a specific key.
    pub fn lacks_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_none(),
            "Expected JSON to NOT have key '{key}', got: {value}"
        );
    }

    /// Assert that a JSON value equals expected.
    pub fn json_eq(actual: &Value, expected: &Value) {
        assert_eq!(
            actual,
            expected,
            "JSON mismatch:\nactual: {}\nexpected: {}",
            serde_json::to_string_pretty(actual).unwrap_or_default(),
            serde_json::to_string_pretty(expected).unwrap_or_default()
        );
    }

    /// Assert the length of the array at `key` inside the `bool` body.
    pub fn bool_len(query: &Value, key: &str, expected: usize) {
        let len = query["bool"][key].as_array().map_or(0, Vec::len);
        assert_eq!(len, expected, "bool.{key} length mismatch in: {query}");
    }
}
