//! Statuses, traits, and alterations
//!
//! All three share one shape: a named effect carrying modifiers, optional
//! prerequisites, and a duration. A duration of 0 marks a permanent effect
//! (traits); timed effects count down `remaining_turns` once per turn.

use serde::{Deserialize, Serialize};

use crate::ids::StatusId;
use crate::value_objects::{Modifier, Prerequisites};

/// A named timed or permanent effect on a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub id: StatusId,
    pub name: String,
    /// Total duration in turns; 0 means permanent
    pub duration: i64,
    /// Turns left before the effect expires (ignored for permanent effects)
    pub remaining_turns: i64,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<Prerequisites>,
}

impl Status {
    /// Create a permanent status (a trait).
    pub fn permanent(name: impl Into<String>) -> Self {
        Self {
            id: StatusId::new(),
            name: name.into(),
            duration: 0,
            remaining_turns: 0,
            modifiers: Vec::new(),
            prerequisites: None,
        }
    }

    /// Create a timed status lasting `turns` turns.
    pub fn timed(name: impl Into<String>, turns: i64) -> Self {
        Self {
            id: StatusId::new(),
            name: name.into(),
            duration: turns,
            remaining_turns: turns,
            modifiers: Vec::new(),
            prerequisites: None,
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_prerequisites(mut self, prerequisites: Prerequisites) -> Self {
        self.prerequisites = Some(prerequisites);
        self
    }

    pub fn is_permanent(&self) -> bool {
        self.duration == 0
    }

    /// Whether the effect currently applies.
    pub fn is_active(&self) -> bool {
        self.is_permanent() || self.remaining_turns > 0
    }

    /// Count down one turn for timed effects.
    pub fn tick(&mut self) {
        if !self.is_permanent() && self.remaining_turns > 0 {
            self.remaining_turns -= 1;
        }
    }
}
