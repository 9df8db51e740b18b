//! Predicate compilation module.
//!
//! This module provides:
//! - Types: QueryCondition, LeafType, Comparator, ConditionValue
//! - grouping: splits a condition list into AND-groups at OR boundaries
//! - LeafTranslator: one leaf condition to one engine clause
//! - NestedPathExpander: `path@field` references to `nested` queries
//! - BooleanCompiler: assembles groups into a BooleanQuery tree

mod compiler;
pub mod grouping;
mod leaf;
mod nested;
mod tree;
pub mod types;

pub use compiler::BooleanCompiler;
pub use leaf::LeafTranslator;
pub use nested::NestedPathExpander;
pub use tree::{BooleanQuery, Clause};
pub use types::{
    Comparator, ConditionGroup, ConditionKind, ConditionValue, LeafType, LogicalJoin,
    QueryCondition, Scalar,
};
