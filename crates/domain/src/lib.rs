pub mod entities;
pub mod error;
pub mod graph;
pub mod ids;
pub mod value_objects;

// Re-export entities (explicit list in entities/mod.rs)
pub use entities::{Character, CharacterInfo, Inventory, Item, Status, Weapon};

pub use error::DomainError;

pub use graph::{Edge, Graph, Node};

// Re-export ID types
pub use ids::{CharacterId, ItemId, StatusId};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{Attribute, Condition, Damage, Modifier, Prerequisites};
