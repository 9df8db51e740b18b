//! Body components compiled from builder attributes.
//!
//! Each [`Component`] reads one builder attribute and is compiled only when
//! that attribute is non-empty. The order and output keys come from an
//! explicit table owned by the [`Grammar`](super::Grammar).

use serde_json::{Map, Value, json};

use super::builder::SearchBuilder;
use super::types::{AggregationSpec, SortSpec};
use crate::error::GrammarResult;
use crate::predicate::BooleanCompiler;

/// Builder attribute compiled into one body key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Columns,
    Wheres,
    Aggs,
    Orders,
    Limit,
    Offset,
    Index,
    Type,
    Scroll,
}

/// Default `(output key, component)` table for search requests.
pub const SELECT_COMPONENTS: [(&str, Component); 9] = [
    ("_source", Component::Columns),
    ("query", Component::Wheres),
    ("aggs", Component::Aggs),
    ("sort", Component::Orders),
    ("size", Component::Limit),
    ("from", Component::Offset),
    ("index", Component::Index),
    ("type", Component::Type),
    ("scroll", Component::Scroll),
];

impl Component {
    /// Whether the builder carries anything for this component.
    pub fn is_present(&self, builder: &SearchBuilder) -> bool {
        match self {
            Component::Columns => !builder.columns().is_empty(),
            Component::Wheres => !builder.wheres().is_empty(),
            Component::Aggs => !builder.aggs().is_empty(),
            Component::Orders => !builder.orders().is_empty(),
            Component::Limit => builder.limit_value() > 0,
            Component::Offset => builder.offset_value() > 0,
            Component::Index => !builder.index_names().is_empty(),
            Component::Type => builder.doc_type_name().is_some_and(|t| !t.is_empty()),
            Component::Scroll => builder.scroll_value().is_some_and(|s| !s.is_empty()),
        }
    }

    /// Compile this component from `builder`.
    pub fn compile(
        &self,
        compiler: &BooleanCompiler,
        builder: &SearchBuilder,
    ) -> GrammarResult<Value> {
        let value = match self {
            Component::Columns => json!(builder.columns()),
            Component::Wheres => compiler.compile(builder.wheres())?.to_value(),
            Component::Aggs => Value::Object(compile_aggs(builder.aggs())),
            Component::Orders => Value::Array(builder.orders().iter().map(compile_sort).collect()),
            Component::Limit => json!(builder.limit_value()),
            Component::Offset => json!(builder.offset_value()),
            Component::Index => Value::String(builder.index_names().join(",")),
            Component::Type => json!(builder.doc_type_name()),
            Component::Scroll => json!(builder.scroll_value()),
        };
        Ok(value)
    }
}

fn compile_aggs(aggs: &[AggregationSpec]) -> Map<String, Value> {
    let mut compiled = Map::new();
    for agg in aggs {
        match agg {
            AggregationSpec::Field { field, kind } => {
                let mut body = Map::new();
                body.insert(kind.clone(), json!({ "field": field }));
                compiled.insert(format!("{field}_{kind}"), Value::Object(body));
            }
            AggregationSpec::Raw { name, body } => {
                compiled.insert(name.clone(), body.clone());
            }
        }
    }
    compiled
}

fn compile_sort(sort: &SortSpec) -> Value {
    let body = match sort {
        SortSpec::Direction { direction, .. } => json!({ "order": direction.as_str() }),
        SortSpec::Raw { body, .. } => body.clone(),
    };
    let mut entry = Map::new();
    entry.insert(sort.field().to_string(), body);
    Value::Object(entry)
}
