//! Nested object field expansion.
//!
//! A field such as `comments@author.name` lives inside the nested object
//! `comments`. The engine addresses it by its full path from the document
//! root (`comments.author.name`) and requires a `nested` query scoped to
//! the object path.

use serde_json::json;

use super::tree::Clause;

/// Rewrites marked fields into `nested` query wrappers.
#[derive(Debug, Clone, Copy)]
pub struct NestedPathExpander {
    marker: char,
}

impl NestedPathExpander {
    pub fn new(marker: char) -> Self {
        Self { marker }
    }

    /// Whether `field` references a nested object.
    pub fn is_nested(&self, field: &str) -> bool {
        field.contains(self.marker)
    }

    /// Split a marked field into its object path and full dotted field path.
    ///
    /// Every marker becomes a `.`, but only the first segment is used as the
    /// nested scope: one nesting boundary per field.
    pub fn split<'f>(&self, field: &'f str) -> Option<(&'f str, String)> {
        let (path, _) = field.split_once(self.marker)?;
        let full_path = field.split(self.marker).collect::<Vec<_>>().join(".");
        Some((path, full_path))
    }

    /// Translate `field`, wrapping the result in a `nested` query when the
    /// field is marked. Unmarked fields are translated as-is.
    pub fn expand<F>(&self, field: &str, translate: F) -> Clause
    where
        F: FnOnce(&str) -> Clause,
    {
        let Some((path, full_path)) = self.split(field) else {
            return translate(field);
        };

        tracing::trace!(path, field = %full_path, "expanding nested field");
        let inner = translate(&full_path);
        Clause::keyed(
            "nested",
            json!({
                "path": path,
                "query": { "bool": { "must": [inner.to_value()] } },
            }),
        )
    }
}
