//! Boolean Query compiler.
//!
//! Groups the flat condition list at OR boundaries, splits each group into
//! positive and negated clauses, and assembles them into one Boolean Query.
//! Nested groups recurse with their own grouping.

use super::grouping;
use super::leaf::LeafTranslator;
use super::nested::NestedPathExpander;
use super::tree::{BooleanQuery, Clause};
use super::types::{Comparator, ConditionKind, ConditionValue, LeafType, QueryCondition};
use crate::config::GrammarConfig;
use crate::error::{GrammarError, GrammarResult};

/// Top-level list receiving each group's positive clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Must,
    Should,
}

/// Compiles condition lists into [`BooleanQuery`] trees.
#[derive(Debug, Clone, Default)]
pub struct BooleanCompiler {
    config: GrammarConfig,
}

impl BooleanCompiler {
    /// Create a compiler with validated configuration.
    pub fn new(config: GrammarConfig) -> GrammarResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    /// Compile `conditions` into a Boolean Query.
    ///
    /// A single group lands in `must` (with negations in `must_not`); several
    /// groups land in `should`, each negation as its own OR branch.
    pub fn compile(&self, conditions: &[QueryCondition]) -> GrammarResult<BooleanQuery> {
        let groups = grouping::group(conditions);
        let operation = if groups.len() > 1 {
            Operation::Should
        } else {
            Operation::Must
        };

        tracing::debug!(
            conditions = conditions.len(),
            groups = groups.len(),
            operation = ?operation,
            "compiling condition list"
        );

        let mut tree = BooleanQuery::default();
        let mut position = 0;

        for group in &groups {
            let mut positives = Vec::new();
            let mut negatives = Vec::new();

            for condition in group.conditions() {
                match &condition.kind {
                    ConditionKind::Nested { children } => {
                        if children.is_empty() {
                            return Err(GrammarError::InvalidCondition {
                                index: position,
                                reason: "nested group has no children".to_string(),
                            });
                        }
                        positives.push(Clause::Bool(self.compile(children)?));
                    }
                    ConditionKind::Leaf {
                        leaf_type,
                        field,
                        comparator,
                        value,
                    } => {
                        let clause =
                            self.translate(leaf_type, field, comparator.as_ref(), value)?;
                        if condition.is_negated() {
                            negatives.push(clause);
                        } else {
                            positives.push(clause);
                        }
                    }
                }
                position += 1;
            }

            if !positives.is_empty() {
                let clause = if positives.len() == 1 {
                    positives.swap_remove(0)
                } else {
                    Clause::Bool(BooleanQuery::all(positives))
                };
                match operation {
                    Operation::Must => tree.must.push(clause),
                    Operation::Should => tree.should.push(clause),
                }
            }

            if !negatives.is_empty() {
                match operation {
                    // Only one group exists here, so nothing is overwritten.
                    Operation::Must => tree.must_not = negatives,
                    Operation::Should => tree.should.extend(
                        negatives
                            .into_iter()
                            .map(|clause| Clause::Not(Box::new(clause))),
                    ),
                }
            }
        }

        Ok(tree)
    }

    /// Translate one leaf, expanding nested object fields.
    ///
    /// Unrecognized leaf types produce an empty clause, or
    /// [`GrammarError::UnknownLeafType`] when strict mode is on.
    pub fn translate(
        &self,
        leaf_type: &LeafType,
        field: &str,
        comparator: Option<&Comparator>,
        value: &ConditionValue,
    ) -> GrammarResult<Clause> {
        if !leaf_type.is_recognized() {
            if self.config.strict_leaf_types {
                return Err(GrammarError::UnknownLeafType {
                    leaf_type: leaf_type.to_string(),
                });
            }
            tracing::warn!(
                leaf_type = %leaf_type,
                field,
                "unknown leaf type; emitting empty clause"
            );
        }

        let translator = LeafTranslator::new(&self.config.multi_match_type);
        let expander = NestedPathExpander::new(self.config.nested_marker);

        Ok(expander.expand(field, |resolved| {
            translator.translate(leaf_type, resolved, comparator, value)
        }))
    }
}
