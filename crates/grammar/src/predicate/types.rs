//! Predicate types.
//!
//! Provides the condition model accumulated by the builder:
//! - QueryCondition: one leaf predicate or a nested group of predicates
//! - LeafType / Comparator: string-backed enums that tolerate unknown names
//! - ConditionValue: scalar, sequence or mapping operand

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;

/// How a condition joins to the one before it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogicalJoin {
    #[default]
    And,
    Or,
}

/// Leaf predicate kinds understood by the translator.
///
/// Unrecognized names are kept as [`LeafType::Other`] so that they reach the
/// translator, which decides between an empty clause and an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LeafType {
    Term,
    Match,
    Terms,
    MatchPhrase,
    Range,
    MultiMatch,
    Wildcard,
    Exists,
    Other(String),
}

impl LeafType {
    /// Engine keyword for this leaf type.
    pub fn as_str(&self) -> &str {
        match self {
            LeafType::Term => "term",
            LeafType::Match => "match",
            LeafType::Terms => "terms",
            LeafType::MatchPhrase => "match_phrase",
            LeafType::Range => "range",
            LeafType::MultiMatch => "multi_match",
            LeafType::Wildcard => "wildcard",
            LeafType::Exists => "exists",
            LeafType::Other(name) => name,
        }
    }

    /// Whether the translator has a clause shape for this type.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, LeafType::Other(_))
    }
}

impl From<&str> for LeafType {
    fn from(name: &str) -> Self {
        match name {
            "term" => LeafType::Term,
            "match" => LeafType::Match,
            "terms" => LeafType::Terms,
            "match_phrase" => LeafType::MatchPhrase,
            "range" => LeafType::Range,
            "multi_match" => LeafType::MultiMatch,
            "wildcard" => LeafType::Wildcard,
            "exists" => LeafType::Exists,
            other => LeafType::Other(other.to_string()),
        }
    }
}

impl From<String> for LeafType {
    fn from(name: String) -> Self {
        LeafType::from(name.as_str())
    }
}

impl From<LeafType> for String {
    fn from(leaf_type: LeafType) -> Self {
        match leaf_type {
            LeafType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LeafType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparator attached to a leaf.
///
/// `Ne` negates the condition; the remaining variants name range bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Comparator {
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Other(String),
}

impl Comparator {
    pub fn as_str(&self) -> &str {
        match self {
            Comparator::Ne => "ne",
            Comparator::Gt => "gt",
            Comparator::Gte => "gte",
            Comparator::Lt => "lt",
            Comparator::Lte => "lte",
            Comparator::Other(name) => name,
        }
    }
}

impl From<&str> for Comparator {
    fn from(name: &str) -> Self {
        match name {
            "ne" => Comparator::Ne,
            "gt" => Comparator::Gt,
            "gte" => Comparator::Gte,
            "lt" => Comparator::Lt,
            "lte" => Comparator::Lte,
            other => Comparator::Other(other.to_string()),
        }
    }
}

impl From<String> for Comparator {
    fn from(name: String) -> Self {
        Comparator::from(name.as_str())
    }
}

impl From<Comparator> for String {
    fn from(comparator: Comparator) -> Self {
        match comparator {
            Comparator::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Scalar operand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    /// Integers above `i64::MAX`; tried before `Float` so they stay exact.
    UInt(u64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// Text form used when the operand is spliced into a pattern.
    pub fn as_text(&self) -> String {
        match self {
            Scalar::Null => String::new(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::UInt(u) => u.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Str(s) => s.clone(),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Int(i) => Value::Number((*i).into()),
            Scalar::UInt(u) => Value::Number((*u).into()),
            // Non-finite floats have no JSON form.
            Scalar::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Scalar::Str(s) => Value::String(s.clone()),
        }
    }
}

/// Comparison operand: its shape depends on the leaf type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Scalar(Scalar),
    Sequence(Vec<ConditionValue>),
    Mapping(BTreeMap<String, ConditionValue>),
}

impl Default for ConditionValue {
    fn default() -> Self {
        ConditionValue::Scalar(Scalar::Null)
    }
}

impl ConditionValue {
    /// Build a mapping operand from key/value pairs.
    pub fn mapping<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<ConditionValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        ConditionValue::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Text form used by pattern clauses. Compound operands render as JSON.
    pub fn as_text(&self) -> String {
        match self {
            ConditionValue::Scalar(scalar) => scalar.as_text(),
            compound => compound.to_value().to_string(),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            ConditionValue::Scalar(scalar) => scalar.to_value(),
            ConditionValue::Sequence(items) => {
                Value::Array(items.iter().map(ConditionValue::to_value).collect())
            }
            ConditionValue::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
        }
    }
}

impl From<Scalar> for ConditionValue {
    fn from(scalar: Scalar) -> Self {
        ConditionValue::Scalar(scalar)
    }
}

impl From<&str> for ConditionValue {
    fn from(s: &str) -> Self {
        ConditionValue::Scalar(Scalar::Str(s.to_string()))
    }
}

impl From<String> for ConditionValue {
    fn from(s: String) -> Self {
        ConditionValue::Scalar(Scalar::Str(s))
    }
}

impl From<i64> for ConditionValue {
    fn from(i: i64) -> Self {
        ConditionValue::Scalar(Scalar::Int(i))
    }
}

impl From<i32> for ConditionValue {
    fn from(i: i32) -> Self {
        ConditionValue::Scalar(Scalar::Int(i64::from(i)))
    }
}

impl From<u64> for ConditionValue {
    fn from(u: u64) -> Self {
        ConditionValue::Scalar(Scalar::UInt(u))
    }
}

impl From<f64> for ConditionValue {
    fn from(f: f64) -> Self {
        ConditionValue::Scalar(Scalar::Float(f))
    }
}

impl From<bool> for ConditionValue {
    fn from(b: bool) -> Self {
        ConditionValue::Scalar(Scalar::Bool(b))
    }
}

impl<T: Into<ConditionValue>> From<Vec<T>> for ConditionValue {
    fn from(items: Vec<T>) -> Self {
        ConditionValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

/// One predicate as authored through the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryCondition {
    /// Join to the previous condition. Ignored on the first one.
    #[serde(default)]
    pub join: LogicalJoin,

    #[serde(flatten)]
    pub kind: ConditionKind,
}

/// Leaf predicate or nested sub-list.
///
/// Nested groups carry no comparator: a negated group has no representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConditionKind {
    Leaf {
        leaf_type: LeafType,
        field: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        comparator: Option<Comparator>,
        #[serde(default)]
        value: ConditionValue,
    },
    Nested {
        children: Vec<QueryCondition>,
    },
}

impl QueryCondition {
    /// Create a leaf condition.
    pub fn leaf(
        join: LogicalJoin,
        leaf_type: LeafType,
        field: impl Into<String>,
        comparator: Option<Comparator>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        Self {
            join,
            kind: ConditionKind::Leaf {
                leaf_type,
                field: field.into(),
                comparator,
                value: value.into(),
            },
        }
    }

    /// Create a nested group compiled as its own sub-query.
    pub fn nested(join: LogicalJoin, children: Vec<QueryCondition>) -> Self {
        Self {
            join,
            kind: ConditionKind::Nested { children },
        }
    }

    /// Whether this condition is routed to `must_not`.
    pub fn is_negated(&self) -> bool {
        matches!(
            &self.kind,
            ConditionKind::Leaf {
                comparator: Some(Comparator::Ne),
                ..
            }
        )
    }

    pub fn is_or(&self) -> bool {
        self.join == LogicalJoin::Or
    }
}

/// Contiguous run of conditions joined by AND.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConditionGroup<'a> {
    conditions: &'a [QueryCondition],
}

impl<'a> ConditionGroup<'a> {
    pub(crate) fn new(conditions: &'a [QueryCondition]) -> Self {
        Self { conditions }
    }

    pub fn conditions(&self) -> &'a [QueryCondition] {
        self.conditions
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}
