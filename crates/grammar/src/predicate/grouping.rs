//! Priority grouping of a flat condition list.
//!
//! Every OR-joined condition starts a new AND-group, which gives AND a
//! higher precedence than OR without needing parentheses.

use super::types::{ConditionGroup, QueryCondition};

/// Split `conditions` into AND-groups at OR boundaries.
///
/// Always returns `1 + (number of OR joins)` groups. An OR on the first
/// condition yields a leading empty group, which is kept so that the group
/// count tracks the OR boundaries.
pub fn group(conditions: &[QueryCondition]) -> Vec<ConditionGroup<'_>> {
    let mut groups = Vec::new();
    let mut start = 0;

    for (index, condition) in conditions.iter().enumerate() {
        if condition.is_or() {
            groups.push(ConditionGroup::new(&conditions[start..index]));
            start = index;
        }
    }
    groups.push(ConditionGroup::new(&conditions[start..]));

    groups
}
