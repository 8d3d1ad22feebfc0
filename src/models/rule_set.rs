//! Ordered rule set model.
//!
//! Order is significant: resolution is first-fit, so an earlier rule always
//! wins over a later overlapping one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::RateRule;

/// An ordered list of rate rules.
///
/// Edits go through [`push`](RuleSet::push), [`remove`](RuleSet::remove),
/// [`replace`](RuleSet::replace) or whole-list construction. A rule set that
/// is being resolved against is shared behind an `Arc` and never edited in
/// place; editing surfaces clone it, edit the clone and swap it in.
///
/// # Example
///
/// ```
/// use parcel_rate_engine::models::{RateRule, RuleSet};
/// use rust_decimal::Decimal;
///
/// let mut rules = RuleSet::empty();
/// rules.push(RateRule::new(150, 300, 300, 1000, Decimal::new(389, 2)));
/// assert_eq!(rules.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<RateRule>,
}

impl RuleSet {
    /// Creates a rule set from rules in the given order.
    pub fn new(rules: Vec<RateRule>) -> Self {
        Self { rules }
    }

    /// Creates a rule set with no rules. Nothing resolves against it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The five tiers the calculator ships with, as they appear in
    /// `config/default.properties` (not normalized).
    pub fn standard_tariff() -> Self {
        Self::new(vec![
            RateRule::new(300, 300, 150, 1000, Decimal::new(389, 2)),
            RateRule::new(600, 300, 150, 2000, Decimal::new(439, 2)),
            RateRule::new(1200, 600, 600, 5000, Decimal::new(589, 2)),
            RateRule::new(1200, 600, 600, 10000, Decimal::new(799, 2)),
            RateRule::new(1200, 600, 600, 31000, Decimal::new(1499, 2)),
        ])
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules in stored order.
    pub fn rules(&self) -> &[RateRule] {
        &self.rules
    }

    /// Iterates the rules in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, RateRule> {
        self.rules.iter()
    }

    /// Returns the rule at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&RateRule> {
        self.rules.get(index)
    }

    /// Appends a rule at the end of the list.
    pub fn push(&mut self, rule: RateRule) {
        self.rules.push(rule);
    }

    /// Removes and returns the rule at `index`.
    pub fn remove(&mut self, index: usize) -> EngineResult<RateRule> {
        self.check_index(index)?;
        Ok(self.rules.remove(index))
    }

    /// Replaces the rule at `index`, returning the previous one.
    pub fn replace(&mut self, index: usize, rule: RateRule) -> EngineResult<RateRule> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.rules[index], rule))
    }

    /// Consumes the set, returning the rules.
    pub fn into_rules(self) -> Vec<RateRule> {
        self.rules
    }

    fn check_index(&self, index: usize) -> EngineResult<()> {
        if index < self.rules.len() {
            Ok(())
        } else {
            Err(EngineError::RuleIndexOutOfRange {
                index,
                len: self.rules.len(),
            })
        }
    }
}

impl From<Vec<RateRule>> for RuleSet {
    fn from(rules: Vec<RateRule>) -> Self {
        Self::new(rules)
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a RateRule;
    type IntoIter = std::slice::Iter<'a, RateRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
