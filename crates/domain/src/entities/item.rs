//! Items, weapons, and the inventory

use serde::{Deserialize, Serialize};

use crate::ids::ItemId;
use crate::value_objects::Modifier;

/// A carried or worn item.
///
/// Consuming an item applies its modifiers permanently through the engine's
/// modifier handler; until then they are inert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }
}

/// A weapon occupying the equipped slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub id: ItemId,
    pub name: String,
    /// Flat damage added to attacks while equipped
    pub damages: i64,
    pub equipped: bool,
}

impl Weapon {
    pub fn new(name: impl Into<String>, damages: i64) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            damages,
            equipped: true,
        }
    }

    pub fn unequipped(mut self) -> Self {
        self.equipped = false;
        self
    }
}

/// Everything a character carries: the weapon slot, worn gear, and the bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<Weapon>,
    #[serde(default)]
    pub gear: Vec<Item>,
    #[serde(default)]
    pub bag: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flat damage of the equipped weapon, 0 when the slot is empty or the
    /// weapon is not equipped.
    pub fn equipped_weapon_damage(&self) -> i64 {
        match &self.weapon {
            Some(weapon) if weapon.equipped => weapon.damages,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_deals_no_damage() {
        assert_eq!(Inventory::new().equipped_weapon_damage(), 0);
    }

    #[test]
    fn unequipped_weapon_deals_no_damage() {
        let inventory = Inventory {
            weapon: Some(Weapon::new("Rusty sword", 4).unequipped()),
            ..Inventory::new()
        };
        assert_eq!(inventory.equipped_weapon_damage(), 0);
    }

    #[test]
    fn equipped_weapon_deals_flat_damage() {
        let inventory = Inventory {
            weapon: Some(Weapon::new("Rusty sword", 4)),
            ..Inventory::new()
        };
        assert_eq!(inventory.equipped_weapon_damage(), 4);
    }
}
