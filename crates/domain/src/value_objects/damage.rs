//! Damage - a named damage channel on a character
//!
//! Channels are content-authored names ("physical", "fire", ...). The value
//! is an integer that can be raised or lowered; it never drops below zero.

use serde::{Deserialize, Serialize};

use crate::value_objects::Modifier;

/// One damage channel with its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Damage {
    /// Channel name (e.g. "physical")
    #[serde(rename = "type")]
    channel: String,
    value: i64,
}

impl Damage {
    pub fn new(channel: impl Into<String>, value: i64) -> Self {
        Self {
            channel: channel.into(),
            value: value.max(0),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn increase(&mut self, delta: i64) {
        self.value = self.value.saturating_add(delta).max(0);
    }

    pub fn decrease(&mut self, delta: i64) {
        self.value = self.value.saturating_sub(delta).max(0);
    }

    /// Base value plus every modifier targeting this channel.
    ///
    /// A modifier matches when its path contains `damages.<channel>`;
    /// modifiers for other channels are ignored.
    pub fn value_with_modifiers(&self, modifiers: &[Modifier]) -> i64 {
        let needle = format!("damages.{}", self.channel);
        let delta: i64 = modifiers
            .iter()
            .filter(|m| m.kind().contains(&needle))
            .map(Modifier::value)
            .sum();
        self.value + delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_with_modifiers_ignores_unrelated_channels() {
        let damage = Damage::new("physical", 2);
        let modifiers = vec![
            Modifier::new("self.damages.physical.value", 2),
            Modifier::new("self.damages.fire.value", 3),
        ];
        assert_eq!(damage.value_with_modifiers(&modifiers), 4);
    }

    #[test]
    fn value_with_modifiers_without_modifiers_is_base() {
        let damage = Damage::new("fire", 7);
        assert_eq!(damage.value_with_modifiers(&[]), 7);
    }

    #[test]
    fn decrease_floors_at_zero() {
        let mut damage = Damage::new("physical", 3);
        damage.decrease(10);
        assert_eq!(damage.value(), 0);
        damage.increase(4);
        assert_eq!(damage.value(), 4);
    }

    #[test]
    fn json_shape_uses_type_field() {
        let damage = Damage::new("physical", 2);
        let json = serde_json::to_value(&damage).unwrap();
        assert_eq!(json, serde_json::json!({"type": "physical", "value": 2}));
    }
}
