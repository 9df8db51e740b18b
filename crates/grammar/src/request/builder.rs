//! Fluent search builder.
//!
//! Accumulates the ordered condition list together with the projection,
//! sort, aggregation, paging and routing attributes read by the grammar.

use serde_json::Value;

use super::types::{AggregationSpec, SortDirection, SortSpec};
use crate::predicate::{Comparator, ConditionValue, LeafType, LogicalJoin, QueryCondition};

/// Builder state for one search or document request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchBuilder {
    index: Vec<String>,
    doc_type: Option<String>,
    columns: Vec<String>,
    wheres: Vec<QueryCondition>,
    aggs: Vec<AggregationSpec>,
    orders: Vec<SortSpec>,
    limit: u64,
    offset: u64,
    scroll: Option<String>,
}

impl SearchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target a single index.
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = vec![index.into()];
        self
    }

    /// Target several indices.
    pub fn indices<I, S>(mut self, indices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index = indices.into_iter().map(Into::into).collect();
        self
    }

    pub fn doc_type(mut self, doc_type: impl Into<String>) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// Restrict returned `_source` fields.
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.orders.push(SortSpec::Direction {
            field: field.into(),
            direction,
        });
        self
    }

    /// Sort with a full sort body (e.g. `{"order": "asc", "mode": "avg"}`).
    pub fn order_by_raw(mut self, field: impl Into<String>, body: Value) -> Self {
        self.orders.push(SortSpec::Raw {
            field: field.into(),
            body,
        });
        self
    }

    /// Aggregate `field` with a single aggregation kind (`avg`, `terms`, ...).
    pub fn aggregate(mut self, field: impl Into<String>, kind: impl Into<String>) -> Self {
        self.aggs.push(AggregationSpec::Field {
            field: field.into(),
            kind: kind.into(),
        });
        self
    }

    pub fn aggregate_raw(mut self, name: impl Into<String>, body: Value) -> Self {
        self.aggs.push(AggregationSpec::Raw {
            name: name.into(),
            body,
        });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Keep a scroll cursor alive for `keep_alive` (e.g. `"1m"`).
    pub fn scroll(mut self, keep_alive: impl Into<String>) -> Self {
        self.scroll = Some(keep_alive.into());
        self
    }

    /// Append a raw condition.
    pub fn push_condition(mut self, condition: QueryCondition) -> Self {
        self.wheres.push(condition);
        self
    }

    /// Append a leaf condition of any type.
    pub fn where_leaf(
        self,
        join: LogicalJoin,
        leaf_type: LeafType,
        field: impl Into<String>,
        comparator: Option<Comparator>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        self.push_condition(QueryCondition::leaf(
            join, leaf_type, field, comparator, value,
        ))
    }

    /// Append a nested group built by `build` on a fresh builder.
    ///
    /// Only the conditions of the inner builder are kept.
    pub fn where_nested<F>(self, build: F) -> Self
    where
        F: FnOnce(SearchBuilder) -> SearchBuilder,
    {
        self.nested_with(LogicalJoin::And, build)
    }

    pub fn or_where_nested<F>(self, build: F) -> Self
    where
        F: FnOnce(SearchBuilder) -> SearchBuilder,
    {
        self.nested_with(LogicalJoin::Or, build)
    }

    fn nested_with<F>(self, join: LogicalJoin, build: F) -> Self
    where
        F: FnOnce(SearchBuilder) -> SearchBuilder,
    {
        let children = build(SearchBuilder::new()).wheres;
        self.push_condition(QueryCondition::nested(join, children))
    }

    pub fn where_term(self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.where_leaf(LogicalJoin::And, LeafType::Term, field, None, value)
    }

    pub fn or_where_term(self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.where_leaf(LogicalJoin::Or, LeafType::Term, field, None, value)
    }

    /// Exclude documents whose `field` equals `value`.
    pub fn where_not(self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.where_leaf(
            LogicalJoin::And,
            LeafType::Term,
            field,
            Some(Comparator::Ne),
            value,
        )
    }

    pub fn or_where_not(self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.where_leaf(
            LogicalJoin::Or,
            LeafType::Term,
            field,
            Some(Comparator::Ne),
            value,
        )
    }

    pub fn where_match(self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.where_leaf(LogicalJoin::And, LeafType::Match, field, None, value)
    }

    pub fn or_where_match(
        self,
        field: impl Into<String>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        self.where_leaf(LogicalJoin::Or, LeafType::Match, field, None, value)
    }

    pub fn where_match_phrase(
        self,
        field: impl Into<String>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        self.where_leaf(LogicalJoin::And, LeafType::MatchPhrase, field, None, value)
    }

    pub fn or_where_match_phrase(
        self,
        field: impl Into<String>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        self.where_leaf(LogicalJoin::Or, LeafType::MatchPhrase, field, None, value)
    }

    /// Match any of `values` exactly (`terms`).
    pub fn where_in<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        let values = ConditionValue::Sequence(values.into_iter().map(Into::into).collect());
        self.where_leaf(LogicalJoin::And, LeafType::Terms, field, None, values)
    }

    pub fn or_where_in<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        let values = ConditionValue::Sequence(values.into_iter().map(Into::into).collect());
        self.where_leaf(LogicalJoin::Or, LeafType::Terms, field, None, values)
    }

    /// One-sided range bound, e.g. `where_range("age", Comparator::Gte, 18)`.
    pub fn where_range(
        self,
        field: impl Into<String>,
        comparator: Comparator,
        value: impl Into<ConditionValue>,
    ) -> Self {
        self.where_leaf(LogicalJoin::And, LeafType::Range, field, Some(comparator), value)
    }

    pub fn or_where_range(
        self,
        field: impl Into<String>,
        comparator: Comparator,
        value: impl Into<ConditionValue>,
    ) -> Self {
        self.where_leaf(LogicalJoin::Or, LeafType::Range, field, Some(comparator), value)
    }

    /// Inclusive range between `low` and `high`.
    pub fn where_between(
        self,
        field: impl Into<String>,
        low: impl Into<ConditionValue>,
        high: impl Into<ConditionValue>,
    ) -> Self {
        let bounds = between(low, high);
        self.where_leaf(LogicalJoin::And, LeafType::Range, field, None, bounds)
    }

    pub fn or_where_between(
        self,
        field: impl Into<String>,
        low: impl Into<ConditionValue>,
        high: impl Into<ConditionValue>,
    ) -> Self {
        let bounds = between(low, high);
        self.where_leaf(LogicalJoin::Or, LeafType::Range, field, None, bounds)
    }

    /// Phrase query against `field` through `multi_match`.
    pub fn where_multi_match(
        self,
        field: impl Into<String>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        self.where_leaf(LogicalJoin::And, LeafType::MultiMatch, field, None, value)
    }

    pub fn or_where_multi_match(
        self,
        field: impl Into<String>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        self.where_leaf(LogicalJoin::Or, LeafType::MultiMatch, field, None, value)
    }

    /// Substring match via `*value*` wildcard.
    pub fn where_like(self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.where_leaf(LogicalJoin::And, LeafType::Wildcard, field, None, value)
    }

    pub fn or_where_like(self, field: impl Into<String>, value: impl Into<ConditionValue>) -> Self {
        self.where_leaf(LogicalJoin::Or, LeafType::Wildcard, field, None, value)
    }

    pub fn where_exists(self, field: impl Into<String>) -> Self {
        self.where_leaf(
            LogicalJoin::And,
            LeafType::Exists,
            field,
            None,
            ConditionValue::default(),
        )
    }

    pub fn or_where_exists(self, field: impl Into<String>) -> Self {
        self.where_leaf(
            LogicalJoin::Or,
            LeafType::Exists,
            field,
            None,
            ConditionValue::default(),
        )
    }

    pub fn index_names(&self) -> &[String] {
        &self.index
    }

    pub fn doc_type_name(&self) -> Option<&str> {
        self.doc_type.as_deref()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn wheres(&self) -> &[QueryCondition] {
        &self.wheres
    }

    pub fn aggs(&self) -> &[AggregationSpec] {
        &self.aggs
    }

    pub fn orders(&self) -> &[SortSpec] {
        &self.orders
    }

    pub fn limit_value(&self) -> u64 {
        self.limit
    }

    pub fn offset_value(&self) -> u64 {
        self.offset
    }

    pub fn scroll_value(&self) -> Option<&str> {
        self.scroll.as_deref()
    }
}

fn between(low: impl Into<ConditionValue>, high: impl Into<ConditionValue>) -> ConditionValue {
    ConditionValue::mapping([("gte", low.into()), ("lte", high.into())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::ConditionKind;

    #[test]
    fn conditions_keep_call_order_and_joins() {
        let builder = SearchBuilder::new()
            .where_term("status", "live")
            .or_where_match("title", "rust")
            .where_exists("author");

        let joins: Vec<_> = builder.wheres().iter().map(|c| c.join).collect();
        assert_eq!(
            joins,
            [LogicalJoin::And, LogicalJoin::Or, LogicalJoin::And]
        );
    }

    #[test]
    fn where_not_sets_negation() {
        let builder = SearchBuilder::new().where_not("status", "draft");
        assert!(builder.wheres()[0].is_negated());
    }

    #[test]
    fn where_between_builds_bounds() {
        let builder = SearchBuilder::new().where_between("age", 18, 65);
        match &builder.wheres()[0].kind {
            ConditionKind::Leaf {
                leaf_type, value, ..
            } => {
                assert_eq!(*leaf_type, LeafType::Range);
                assert_eq!(*value, ConditionValue::mapping([("gte", 18), ("lte", 65)]));
            }
            other => panic!("expected leaf, got {other:?}"),
        }
    }

    #[test]
    fn where_nested_keeps_only_inner_conditions() {
        let builder = SearchBuilder::new().or_where_nested(|q| {
            q.index("ignored")
                .where_term("a", 1)
                .where_term("b", 2)
        });

        let condition = &builder.wheres()[0];
        assert!(condition.is_or());
        match &condition.kind {
            ConditionKind::Nested { children } => assert_eq!(children.len(), 2),
            other => panic!("expected nested group, got {other:?}"),
        }
        assert!(builder.index_names().is_empty());
    }

    #[test]
    fn indices_replace_previous_target() {
        let builder = SearchBuilder::new().index("a").indices(["b", "c"]);
        assert_eq!(builder.index_names(), ["b", "c"]);
    }
}
