//! Leaf translation: one condition to one engine clause.

use serde_json::{Value, json};

use super::tree::Clause;
use super::types::{Comparator, ConditionValue, LeafType};

/// Translates leaf predicates into engine clause shapes.
///
/// Always produces the positive form; negation is decided by the caller.
#[derive(Debug, Clone)]
pub struct LeafTranslator<'a> {
    multi_match_type: &'a str,
}

impl<'a> LeafTranslator<'a> {
    pub fn new(multi_match_type: &'a str) -> Self {
        Self { multi_match_type }
    }

    /// Translate a single leaf. Unrecognized leaf types yield [`Clause::empty`].
    pub fn translate(
        &self,
        leaf_type: &LeafType,
        field: &str,
        comparator: Option<&Comparator>,
        value: &ConditionValue,
    ) -> Clause {
        let clause = match leaf_type {
            LeafType::Term | LeafType::Match | LeafType::Terms | LeafType::MatchPhrase => {
                Clause::keyed(leaf_type.as_str(), field_entry(field, value.to_value()))
            }
            LeafType::Range => {
                let bounds = match value {
                    ConditionValue::Scalar(_) => {
                        let key = comparator.map(Comparator::as_str).unwrap_or_default();
                        field_entry(key, value.to_value())
                    }
                    // Bound mappings and sequences pass through verbatim.
                    bounds => bounds.to_value(),
                };
                Clause::keyed("range", field_entry(field, bounds))
            }
            LeafType::MultiMatch => Clause::keyed(
                "multi_match",
                json!({
                    "query": value.to_value(),
                    "fields": [field],
                    "type": self.multi_match_type,
                }),
            ),
            LeafType::Wildcard => Clause::keyed(
                "wildcard",
                field_entry(field, Value::String(format!("*{}*", value.as_text()))),
            ),
            LeafType::Exists => Clause::keyed("exists", json!({ "field": field })),
            LeafType::Other(_) => Clause::empty(),
        };

        tracing::trace!(leaf_type = %leaf_type, field, "translated leaf");
        clause
    }
}

fn field_entry(field: &str, value: Value) -> Value {
    let mut entry = serde_json::Map::new();
    entry.insert(field.to_string(), value);
    Value::Object(entry)
}
