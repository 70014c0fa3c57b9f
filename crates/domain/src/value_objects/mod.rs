//! Value objects - immutable building blocks of the character model

mod attribute;
mod condition;
mod damage;
mod modifier;

pub use attribute::Attribute;
pub use condition::{Condition, Prerequisites};
pub use damage::Damage;
pub use modifier::Modifier;
