//! Entity aggregates - characters, items, statuses

mod character;
mod item;
mod status;

pub use character::{Character, CharacterInfo};
pub use item::{Inventory, Item, Weapon};
pub use status::Status;
