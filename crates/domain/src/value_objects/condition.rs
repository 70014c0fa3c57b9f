//! Condition and Prerequisites - the gating data model
//!
//! A condition pairs a resolvable element path (`type`) with a textual list
//! of comparisons (`condition`). The `is` flag states the expected outcome,
//! so `is: false` inverts the comparison result. Prerequisites bundle
//! conditions into an "N of M" quorum.
//!
//! Parsing and evaluation live in the engine crate; this module is the pure
//! data shape that round-trips through JSON.

use serde::{Deserialize, Serialize};

/// One gating comparison against a resolved element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Path of the element the comparisons run against
    /// (e.g. `self.attribute.strength`)
    #[serde(rename = "type")]
    kind: String,
    /// Semicolon-joined comparisons (e.g. `"value >= 10; value < 20"`)
    condition: String,
    /// Expected outcome; `false` inverts the comparison result
    is: bool,
}

impl Condition {
    pub fn new(kind: impl Into<String>, condition: impl Into<String>, is: bool) -> Self {
        Self {
            kind: kind.into(),
            condition: condition.into(),
            is,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn condition(&self) -> &str {
        &self.condition
    }

    pub fn is(&self) -> bool {
        self.is
    }

    /// True when the condition targets the owning side of the interaction.
    pub fn targets_self(&self) -> bool {
        self.kind.starts_with("self")
    }
}

/// An "N of M" quorum of conditions.
///
/// Requirements and prerequisites share this shape; evaluation succeeds as
/// soon as `numberRequired` of the listed items hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prerequisites {
    number_required: i64,
    items: Vec<Condition>,
}

impl Prerequisites {
    pub fn new(number_required: i64) -> Self {
        Self {
            number_required,
            items: Vec::new(),
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.items.push(condition);
        self
    }

    pub fn number_required(&self) -> i64 {
        self.number_required
    }

    pub fn items(&self) -> &[Condition] {
        &self.items
    }
}
