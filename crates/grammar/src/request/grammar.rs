//! Request assembly.
//!
//! Wraps compiled body components into the payloads expected by the
//! engine's search, index, update and delete endpoints.

use serde_json::{Map, Value, json};

use super::builder::SearchBuilder;
use super::components::{Component, SELECT_COMPONENTS};
use super::types::SearchRequest;
use crate::config::GrammarConfig;
use crate::error::GrammarResult;
use crate::predicate::BooleanCompiler;

/// Compiles [`SearchBuilder`] state into request payloads.
#[derive(Debug, Clone)]
pub struct Grammar {
    compiler: BooleanCompiler,
    components: Vec<(String, Component)>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            compiler: BooleanCompiler::default(),
            components: default_components(),
        }
    }
}

fn default_components() -> Vec<(String, Component)> {
    SELECT_COMPONENTS
        .iter()
        .map(|(key, component)| ((*key).to_string(), *component))
        .collect()
}

impl Grammar {
    /// Create a grammar with validated configuration and the default component table.
    pub fn new(config: GrammarConfig) -> GrammarResult<Self> {
        Ok(Self {
            compiler: BooleanCompiler::new(config)?,
            components: default_components(),
        })
    }

    /// Replace the `(output key, component)` table, in compile order.
    pub fn with_components<I, K>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = (K, Component)>,
        K: Into<String>,
    {
        self.components = components
            .into_iter()
            .map(|(key, component)| (key.into(), component))
            .collect();
        self
    }

    pub fn config(&self) -> &GrammarConfig {
        self.compiler.config()
    }

    /// Compile every component present on `builder`, keyed by its output key.
    pub fn compile_components(&self, builder: &SearchBuilder) -> GrammarResult<Map<String, Value>> {
        let mut body = Map::new();
        for (key, component) in &self.components {
            if component.is_present(builder) {
                body.insert(key.clone(), component.compile(&self.compiler, builder)?);
            }
        }

        tracing::debug!(
            keys = ?body.keys().collect::<Vec<_>>(),
            "compiled request components"
        );
        Ok(body)
    }

    /// Build a search request: routing keys are lifted out of the body.
    pub fn compile_select(&self, builder: &SearchBuilder) -> GrammarResult<SearchRequest> {
        let mut body = self.compile_components(builder)?;
        let index = take_string(&mut body, "index");
        let doc_type = take_string(&mut body, "type");
        let scroll = take_string(&mut body, "scroll").filter(|s| !s.is_empty());

        Ok(SearchRequest {
            body,
            index,
            doc_type,
            scroll,
        })
    }

    /// Build an index-document request storing `document` under `id`.
    pub fn compile_create(
        &self,
        builder: &SearchBuilder,
        id: impl Into<String>,
        document: Value,
    ) -> GrammarResult<Value> {
        self.with_id(builder, id, Some(document))
    }

    /// Build a partial-update request merging `document` into `id`.
    pub fn compile_update(
        &self,
        builder: &SearchBuilder,
        id: impl Into<String>,
        document: Value,
    ) -> GrammarResult<Value> {
        self.with_id(builder, id, Some(json!({ "doc": document })))
    }

    pub fn compile_delete(
        &self,
        builder: &SearchBuilder,
        id: impl Into<String>,
    ) -> GrammarResult<Value> {
        self.with_id(builder, id, None)
    }

    fn with_id(
        &self,
        builder: &SearchBuilder,
        id: impl Into<String>,
        body: Option<Value>,
    ) -> GrammarResult<Value> {
        let mut params = Map::new();
        params.insert("id".to_string(), Value::String(id.into()));
        if let Some(body) = body {
            params.insert("body".to_string(), body);
        }
        // Components win on key collisions.
        params.extend(self.compile_components(builder)?);
        Ok(Value::Object(params))
    }
}

fn take_string(body: &mut Map<String, Value>, key: &str) -> Option<String> {
    match body.remove(key)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}
