//! Resolver chains - turning dotted rule paths into values and elements
//!
//! Both chains dispatch on the path after the side prefix (`self.`, `enemy.`,
//! `attacker.`, `defender.`) has been stripped; routing between the two
//! characters of an interaction happens in the callers.

mod element;
mod value;

pub use element::{Element, ElementResolverChain, Scalar};
pub use value::{Resolved, ValueResolverChain};

/// Drop the leading side segment of a rule path, if present.
pub(crate) fn strip_side(path: &str) -> &str {
    for side in ["self.", "enemy.", "attacker.", "defender."] {
        if let Some(rest) = path.strip_prefix(side) {
            return rest;
        }
    }
    path
}
