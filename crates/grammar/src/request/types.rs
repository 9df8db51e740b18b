//! Request-side types: sorts, aggregations and the select envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort on one field.
#[derive(Debug, Clone, PartialEq)]
pub enum SortSpec {
    /// Rendered as `{field: {"order": dir}}`.
    Direction { field: String, direction: SortDirection },
    /// Caller-supplied sort body, rendered as `{field: body}`.
    Raw { field: String, body: Value },
}

impl SortSpec {
    pub fn field(&self) -> &str {
        match self {
            SortSpec::Direction { field, .. } | SortSpec::Raw { field, .. } => field,
        }
    }
}

/// Aggregation requested on the search.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregationSpec {
    /// Single metric/bucket aggregation on a field, keyed `{field}_{kind}`.
    Field { field: String, kind: String },
    /// Caller-supplied aggregation body under its own name.
    Raw { name: String, body: Value },
}

/// Search request envelope produced by `compile_select`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    /// Query body: `query`, `_source`, `sort`, `aggs`, `size`, `from`.
    pub body: Map<String, Value>,

    /// Comma-joined target index list.
    pub index: Option<String>,

    /// Document type.
    #[serde(rename = "type")]
    pub doc_type: Option<String>,

    /// Scroll keep-alive, present only for scrolling searches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sort_direction_serialization() {
        assert_eq!(
            serde_json::to_string(&SortDirection::Desc).unwrap(),
            "\"desc\""
        );
        assert_eq!(SortDirection::default(), SortDirection::Asc);
    }

    #[test]
    fn search_request_keeps_null_routing_but_drops_scroll() {
        let request = SearchRequest {
            body: Map::new(),
            index: None,
            doc_type: None,
            scroll: None,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "body": {}, "index": null, "type": null })
        );
    }
}
