//! Character - the aggregate every rule resolves against
//!
//! A character owns its attributes, inventory, damage channels, and statuses
//! exclusively; nothing in the model is shared between characters.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entities::{Inventory, Status, Weapon};
use crate::ids::CharacterId;
use crate::value_objects::{Attribute, Damage, Modifier};

/// Read-only character metadata exposed to rules via `*.info.<field>` paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterInfo {
    pub level: i64,
    #[serde(default)]
    pub race: String,
}

/// A player or enemy character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(default)]
    pub info: CharacterInfo,
    #[serde(default)]
    pub attributes: HashMap<String, Attribute>,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub damages: HashMap<String, Damage>,
    #[serde(default)]
    pub statuses: Vec<Status>,
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            info: CharacterInfo::default(),
            attributes: HashMap::new(),
            inventory: Inventory::new(),
            damages: HashMap::new(),
            statuses: Vec::new(),
        }
    }

    pub fn with_level(mut self, level: i64) -> Self {
        self.info.level = level;
        self
    }

    pub fn with_race(mut self, race: impl Into<String>) -> Self {
        self.info.race = race.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn with_damage(mut self, damage: Damage) -> Self {
        self.damages.insert(damage.channel().to_string(), damage);
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.inventory.weapon = Some(weapon);
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.statuses.push(status);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut Attribute> {
        self.attributes.get_mut(name)
    }

    pub fn damage(&self, channel: &str) -> Option<&Damage> {
        self.damages.get(channel)
    }

    pub fn damage_mut(&mut self, channel: &str) -> Option<&mut Damage> {
        self.damages.get_mut(channel)
    }

    /// Statuses currently in effect.
    pub fn active_statuses(&self) -> impl Iterator<Item = &Status> {
        self.statuses.iter().filter(|s| s.is_active())
    }

    /// Modifiers granted by worn gear (always in effect while worn).
    pub fn gear_modifiers(&self) -> Vec<Modifier> {
        self.inventory
            .gear
            .iter()
            .flat_map(|item| item.modifiers.iter().cloned())
            .collect()
    }

    /// End-of-turn upkeep: tick timed statuses and drop the expired ones.
    pub fn end_turn(&mut self) {
        for status in &mut self.statuses {
            status.tick();
        }
        self.statuses.retain(Status::is_active);
    }
}
