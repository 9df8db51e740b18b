//! Request compilation module.
//!
//! This module provides:
//! - SearchBuilder: fluent accumulation of conditions and request attributes
//! - Component: per-attribute body compilers and the default component table
//! - Grammar: select/create/update/delete payload assembly

mod builder;
mod components;
mod grammar;
pub mod types;

pub use builder::SearchBuilder;
pub use components::{Component, SELECT_COMPONENTS};
pub use grammar::Grammar;
pub use types::{AggregationSpec, SearchRequest, SortDirection, SortSpec};
