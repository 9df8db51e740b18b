//! Elastiq Grammar
//!
//! Compiles the ordered condition list accumulated by a [`SearchBuilder`]
//! into a search-engine Boolean Query, and wraps it into select, create,
//! update and delete request payloads.
//!
//! Nothing here performs I/O; every compile call is a pure transformation
//! from builder state to `serde_json` values.

pub mod config;
pub mod error;
pub mod predicate;
pub mod request;

pub use config::GrammarConfig;
pub use error::{GrammarError, GrammarResult};
pub use predicate::{
    BooleanCompiler, BooleanQuery, Clause, Comparator, ConditionGroup, ConditionKind,
    ConditionValue, LeafType, LogicalJoin, QueryCondition, Scalar,
};
pub use request::{
    AggregationSpec, Component, Grammar, SearchBuilder, SearchRequest, SortDirection, SortSpec,
};
