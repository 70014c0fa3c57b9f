//! Modifier - a read-only delta granted by a status, trait, or item
//!
//! The `type` field is a dotted path naming the property the modifier
//! targets. The first segment names the side of a two-entity interaction:
//! `self` targets the owning character, `enemy`/`attacker`/`defender` the
//! opposing one.

use serde::{Deserialize, Serialize};

use crate::value_objects::Prerequisites;

/// A delta against a dotted property path.
///
/// Modifiers are immutable snapshots: resolvers read them transiently, and
/// only the modifier handler applies them permanently (e.g. when an item is
/// consumed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    /// Target property path (e.g. `self.attribute.strength.value`)
    #[serde(rename = "type")]
    kind: String,
    /// The value to add (positive) or subtract (negative)
    value: i64,
    /// Conditions gating whether this modifier is in effect
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prerequisites: Option<Prerequisites>,
}

impl Modifier {
    pub fn new(kind: impl Into<String>, value: i64) -> Self {
        Self {
            kind: kind.into(),
            value,
            prerequisites: None,
        }
    }

    pub fn with_prerequisites(mut self, prerequisites: Prerequisites) -> Self {
        self.prerequisites = Some(prerequisites);
        self
    }

    /// The dotted property path this modifier targets.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn prerequisites(&self) -> Option<&Prerequisites> {
        self.prerequisites.as_ref()
    }

    /// True when the path targets the owning side of the interaction.
    pub fn targets_self(&self) -> bool {
        self.kind.starts_with("self")
    }
}
