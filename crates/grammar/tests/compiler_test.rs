#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Predicate compiler integration tests.
//!
//! Covers priority grouping, negation routing, nested fields and nested
//! groups through the public API.

use elastiq_grammar::predicate::grouping;
use elastiq_grammar::{
    BooleanCompiler, Comparator, ConditionValue, GrammarConfig, GrammarError, LeafType,
    LogicalJoin, QueryCondition,
};
use elastiq_test_utils::{assert, group, not_term, or_group, or_not_term, or_term, term};
use serde_json::{Value, json};

fn compile(conditions: &[QueryCondition]) -> Value {
    BooleanCompiler::default()
        .compile(conditions)
        .unwrap()
        .to_value()
}

// -------------------------------------------------------------------------
// Grouping
// -------------------------------------------------------------------------

#[test]
fn group_count_tracks_or_joins() {
    let conditions = vec![
        term("a", 1),
        or_term("b", 2),
        term("c", 3),
        or_term("d", 4),
        or_term("e", 5),
    ];
    let groups = grouping::group(&conditions);

    assert_eq!(groups.len(), 4);
    let lens: Vec<_> = groups.iter().map(|g| g.len()).collect();
    assert_eq!(lens, [1, 2, 1, 1]);
}

// -------------------------------------------------------------------------
// Top-level operation
// -------------------------------------------------------------------------

#[test]
fn and_only_list_populates_must() {
    let tree = compile(&[term("a", 1), term("b", 2), term("c", 3)]);

    assert::bool_len(&tree, "must", 1);
    assert::lacks_key(&tree["bool"], "should");
    assert::lacks_key(&tree["bool"], "must_not");
    assert::bool_len(&tree["bool"]["must"][0], "must", 3);
}

#[test]
fn or_list_has_one_should_entry_per_group() {
    let tree = compile(&[term("a", 1), term("b", 2), or_term("c", 3), or_term("d", 4)]);

    assert::lacks_key(&tree["bool"], "must");
    assert::bool_len(&tree, "should", 3);
}

#[test]
fn negation_routing_single_group() {
    let tree = compile(&[term("a", "x"), not_term("b", "y")]);
    assert::json_eq(
        &tree,
        &json!({ "bool": {
            "must": [{ "term": { "a": "x" } }],
            "must_not": [{ "term": { "b": "y" } }]
        } }),
    );
}

#[test]
fn negation_routing_two_groups() {
    let tree = compile(&[term("a", "x"), or_not_term("b", "y")]);
    assert::json_eq(
        &tree,
        &json!({ "bool": { "should": [
            { "term": { "a": "x" } },
            { "bool": { "must_not": { "term": { "b": "y" } } } }
        ] } }),
    );
}

#[test]
fn several_negations_in_or_group_each_branch() {
    let tree = compile(&[term("a", 1), or_not_term("b", 2), not_term("c", 3)]);

    assert::bool_len(&tree, "should", 3);
    assert_eq!(
        tree["bool"]["should"][2],
        json!({ "bool": { "must_not": { "term": { "c": 3 } } } })
    );
}

// -------------------------------------------------------------------------
// Leaf shapes through the compiler
// -------------------------------------------------------------------------

#[test]
fn nested_field_expansion() {
    let clause = BooleanCompiler::default()
        .translate(
            &LeafType::Term,
            "comments@author.name",
            None,
            &ConditionValue::from("x"),
        )
        .unwrap();
    assert::json_eq(
        &clause.to_value(),
        &json!({ "nested": {
            "path": "comments",
            "query": { "bool": { "must": [
                { "term": { "comments.author.name": "x" } }
            ] } }
        } }),
    );
}

#[test]
fn range_passthrough_and_comparator() {
    let compiler = BooleanCompiler::default();

    let bounds = ConditionValue::mapping([("gte", 1), ("lte", 5)]);
    let mapped = compiler
        .translate(&LeafType::Range, "field", None, &bounds)
        .unwrap();
    assert_eq!(
        mapped.to_value(),
        json!({ "range": { "field": { "gte": 1, "lte": 5 } } })
    );

    let scalar = compiler
        .translate(
            &LeafType::Range,
            "field",
            Some(&Comparator::Gte),
            &ConditionValue::from(5),
        )
        .unwrap();
    assert_eq!(
        scalar.to_value(),
        json!({ "range": { "field": { "gte": 5 } } })
    );
}

#[test]
fn custom_marker_from_config() {
    let config = GrammarConfig::from_toml_str("nested_marker = \"#\"").unwrap();
    let compiler = BooleanCompiler::new(config).unwrap();
    let tree = compiler
        .compile(&[term("tags#name", "rust"), term("a@b", 1)])
        .unwrap()
        .to_value();

    let must = &tree["bool"]["must"][0]["bool"]["must"];
    assert_eq!(must[0]["nested"]["path"], "tags");
    assert_eq!(must[1], json!({ "term": { "a@b": 1 } }));
}

// -------------------------------------------------------------------------
// Nested groups
// -------------------------------------------------------------------------

#[test]
fn nested_group_ignores_parent_operation() {
    // Parent has two groups (should); the child has one group (must).
    let tree = compile(&[
        term("a", 1),
        or_group(vec![term("b", 2), not_term("c", 3)]),
    ]);
    assert::json_eq(
        &tree,
        &json!({ "bool": { "should": [
            { "term": { "a": 1 } },
            { "bool": {
                "must": [{ "term": { "b": 2 } }],
                "must_not": [{ "term": { "c": 3 } }]
            } }
        ] } }),
    );
}

#[test]
fn nested_group_with_own_or() {
    let tree = compile(&[
        term("status", "live"),
        group(vec![term("a", 1), or_term("b", 2)]),
    ]);
    assert::json_eq(
        &tree,
        &json!({ "bool": { "must": [{ "bool": { "must": [
            { "term": { "status": "live" } },
            { "bool": { "should": [
                { "term": { "a": 1 } },
                { "term": { "b": 2 } }
            ] } }
        ] } }] } }),
    );
}

#[test]
fn deeply_nested_groups() {
    let tree = compile(&[group(vec![group(vec![group(vec![term("x", 1)])])])]);
    let innermost = &tree["bool"]["must"][0]["bool"]["must"][0]["bool"]["must"][0];
    assert_eq!(
        innermost,
        &json!({ "bool": { "must": [{ "term": { "x": 1 } }] } })
    );
}

#[test]
fn empty_nested_group_deep_inside_fails() {
    let err = BooleanCompiler::default()
        .compile(&[group(vec![term("a", 1), or_group(vec![])])])
        .unwrap_err();
    assert!(matches!(err, GrammarError::InvalidCondition { index: 1, .. }));
}

// -------------------------------------------------------------------------
// Unknown leaf types
// -------------------------------------------------------------------------

fn unknown(join: LogicalJoin) -> QueryCondition {
    QueryCondition::leaf(join, LeafType::from("geo_shape"), "loc", None, "x")
}

#[test]
fn unknown_leaf_sole_positive_is_vacuous() {
    assert_eq!(
        compile(&[unknown(LogicalJoin::And)]),
        json!({ "bool": { "must": [{}] } })
    );
}

#[test]
fn unknown_leaf_strict_mode_errors() {
    let config = GrammarConfig::from_toml_str("strict_leaf_types = true").unwrap();
    let err = BooleanCompiler::new(config)
        .unwrap()
        .compile(&[term("a", 1), unknown(LogicalJoin::Or)])
        .unwrap_err();
    assert_eq!(err.to_string(), "unknown leaf type 'geo_shape'");
}

// -------------------------------------------------------------------------
// JSON input
// -------------------------------------------------------------------------

#[test]
fn compiles_condition_list_from_json() {
    let input = r#"[
        {"kind": "leaf", "leaf_type": "match", "field": "title", "value": "rust"},
        {"kind": "leaf", "leaf_type": "range", "field": "year", "comparator": "gte", "value": 2020},
        {"join": "or", "kind": "leaf", "leaf_type": "terms", "field": "tag", "value": ["a", "b"]},
        {"kind": "leaf", "leaf_type": "exists", "field": "cover", "comparator": "ne"}
    ]"#;
    let conditions: Vec<QueryCondition> = serde_json::from_str(input).unwrap();

    assert::json_eq(
        &compile(&conditions),
        &json!({ "bool": { "should": [
            { "bool": { "must": [
                { "match": { "title": "rust" } },
                { "range": { "year": { "gte": 2020 } } }
            ] } },
            { "terms": { "tag": ["a", "b"] } },
            { "bool": { "must_not": { "exists": { "field": "cover" } } } }
        ] } }),
    );
}

#[test]
fn large_unsigned_term_value_is_exact() {
    let input = r#"[{"kind": "leaf", "leaf_type": "term", "field": "id", "value": 18446744073709551615}]"#;
    let conditions: Vec<QueryCondition> = serde_json::from_str(input).unwrap();
    let tree = compile(&conditions);

    assert::json_eq(
        &tree,
        &json!({ "bool": { "must": [{ "term": { "id": 18446744073709551615u64 } }] } }),
    );
    assert!(tree.to_string().contains("18446744073709551615"));
}
