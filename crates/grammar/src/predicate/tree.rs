//! Compiled Boolean Query tree.

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

/// One entry of a `must`/`should`/`must_not` list.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Translated leaf in the engine's own shape, e.g. `{"term": {"f": "v"}}`.
    Leaf(Map<String, Value>),
    /// Nested Boolean Query, rendered as `{"bool": {...}}`.
    Bool(BooleanQuery),
    /// Single negated branch, rendered as `{"bool": {"must_not": <clause>}}`.
    Not(Box<Clause>),
}

impl Clause {
    /// The clause with no keys.
    pub fn empty() -> Self {
        Clause::Leaf(Map::new())
    }

    /// Wrap `inner` under a single key.
    pub fn keyed(key: &str, inner: Value) -> Self {
        let mut map = Map::new();
        map.insert(key.to_string(), inner);
        Clause::Leaf(map)
    }

    pub fn to_value(&self) -> Value {
        match self {
            Clause::Leaf(map) => Value::Object(map.clone()),
            Clause::Bool(query) => query.to_value(),
            Clause::Not(inner) => json!({ "bool": { "must_not": inner.to_value() } }),
        }
    }
}

impl Serialize for Clause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

/// Boolean Query combining clauses with AND, OR and AND-NOT.
///
/// Empty lists are left out of the rendered JSON.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BooleanQuery {
    pub must: Vec<Clause>,
    pub should: Vec<Clause>,
    pub must_not: Vec<Clause>,
}

impl BooleanQuery {
    /// Query requiring every clause.
    pub fn all(clauses: Vec<Clause>) -> Self {
        Self {
            must: clauses,
            ..Default::default()
        }
    }

    /// Body of the `bool` key.
    pub fn body(&self) -> Map<String, Value> {
        let mut body = Map::new();
        for (key, clauses) in [
            ("must", &self.must),
            ("should", &self.should),
            ("must_not", &self.must_not),
        ] {
            if !clauses.is_empty() {
                body.insert(
                    key.to_string(),
                    Value::Array(clauses.iter().map(Clause::to_value).collect()),
                );
            }
        }
        body
    }

    /// Full `{"bool": {...}}` rendering.
    pub fn to_value(&self) -> Value {
        json!({ "bool": Value::Object(self.body()) })
    }
}

impl Serialize for BooleanQuery {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
