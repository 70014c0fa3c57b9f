//! Attribute - base and compound character stats
//!
//! A base attribute holds a current value constrained to a declared
//! `[min, max]` range. A compound attribute carries a rule expression over
//! other attributes (e.g. `"self.attribute.strength.value + 2"`) that the
//! engine evaluates at read time.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// A named character stat, either a bounded number or a derived rule.
///
/// Mutation goes through the explicit `increase`/`decrease` capability so the
/// range invariant can never be bypassed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Attribute {
    /// A bounded numeric stat
    #[serde(rename_all = "camelCase")]
    Base {
        /// Current value, always within `[min, max]`
        value: i64,
        /// Value at character creation
        initial: i64,
        min: i64,
        max: i64,
    },
    /// A stat derived from other attributes via a rule expression
    #[serde(rename_all = "camelCase")]
    Compound {
        /// Rule over base attributes, resolved by the expression engine
        rule: String,
    },
}

impl Attribute {
    /// Create a base attribute with `initial` set to the starting value.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the range is inverted or the value
    /// falls outside it.
    pub fn base(value: i64, min: i64, max: i64) -> Result<Self, DomainError> {
        if min > max {
            return Err(DomainError::validation(format!(
                "attribute range is inverted: [{}, {}]",
                min, max
            )));
        }
        if value < min || value > max {
            return Err(DomainError::validation(format!(
                "attribute value {} outside range [{}, {}]",
                value, min, max
            )));
        }
        Ok(Self::Base {
            value,
            initial: value,
            min,
            max,
        })
    }

    /// Create a compound attribute from a rule expression.
    pub fn compound(rule: impl Into<String>) -> Self {
        Self::Compound { rule: rule.into() }
    }

    /// Current value for a base attribute, `None` for compound ones.
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Base { value, .. } => Some(*value),
            Self::Compound { .. } => None,
        }
    }

    /// The derivation rule for a compound attribute, `None` for base ones.
    pub fn rule(&self) -> Option<&str> {
        match self {
            Self::Base { .. } => None,
            Self::Compound { rule } => Some(rule.as_str()),
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, Self::Compound { .. })
    }

    /// Raise the current value by `delta`, clamping to the declared maximum.
    ///
    /// # Errors
    ///
    /// Compound attributes have no stored value to mutate.
    pub fn increase(&mut self, delta: i64) -> Result<(), DomainError> {
        self.shift(delta)
    }

    /// Lower the current value by `delta`, clamping to the declared minimum.
    ///
    /// # Errors
    ///
    /// Compound attributes have no stored value to mutate.
    pub fn decrease(&mut self, delta: i64) -> Result<(), DomainError> {
        self.shift(-delta)
    }

    fn shift(&mut self, delta: i64) -> Result<(), DomainError> {
        match self {
            Self::Base {
                value, min, max, ..
            } => {
                *value = value.saturating_add(delta).clamp(*min, *max);
                Ok(())
            }
            Self::Compound { .. } => Err(DomainError::constraint(
                "compound attributes cannot be mutated directly",
            )),
        }
    }
}
