//! Modifier application - permanent stat changes
//!
//! Resolvers read modifiers transiently; this pipeline is the one place that
//! writes them back into a character (consuming an item, levelling up). A
//! processor owns one path category and dispatches the property suffix onto
//! the element's explicit mutation capability.

use fableforge_domain::{Character, Modifier};

use crate::resolve::{strip_side, Element, ElementResolverChain};
use crate::EngineError;

pub trait ModifierProcessor {
    fn supports(&self, path: &str) -> bool;

    /// Apply `delta` to the named property of an already-resolved element.
    fn apply(
        &self,
        property: &str,
        element: &mut Element<'_>,
        delta: i64,
    ) -> Result<(), EngineError>;
}

fn shift_value(
    property: &str,
    element: &mut Element<'_>,
    delta: i64,
) -> Result<(), EngineError> {
    if property != "value" {
        return Err(EngineError::UnsupportedProperty(property.to_string()));
    }
    if delta >= 0 {
        element.increase(delta)
    } else {
        element.decrease(delta.saturating_abs())
    }
}

/// `attribute.` / `ability.` paths
pub struct AttributeProcessor;

impl ModifierProcessor for AttributeProcessor {
    fn supports(&self, path: &str) -> bool {
        path.starts_with("attribute.") || path.starts_with("ability.")
    }

    fn apply(
        &self,
        property: &str,
        element: &mut Element<'_>,
        delta: i64,
    ) -> Result<(), EngineError> {
        shift_value(property, element, delta)
    }
}

/// `damages.` paths
pub struct DamageProcessor;

impl ModifierProcessor for DamageProcessor {
    fn supports(&self, path: &str) -> bool {
        path.starts_with("damages.")
    }

    fn apply(
        &self,
        property: &str,
        element: &mut Element<'_>,
        delta: i64,
    ) -> Result<(), EngineError> {
        shift_value(property, element, delta)
    }
}

/// Routes a modifier to its target character and processor.
pub struct ModifierHandler {
    elements: ElementResolverChain,
    processors: Vec<Box<dyn ModifierProcessor>>,
}

impl Default for ModifierHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ModifierHandler {
    pub fn new() -> Self {
        Self {
            elements: ElementResolverChain::new(),
            processors: vec![Box::new(AttributeProcessor), Box::new(DamageProcessor)],
        }
    }

    /// Apply one modifier permanently.
    ///
    /// A `self.` path targets `player`; any other side prefix targets `enemy`.
    pub fn handle(
        &self,
        modifier: &Modifier,
        player: &mut Character,
        enemy: Option<&mut Character>,
    ) -> Result<(), EngineError> {
        let target = if modifier.targets_self() {
            player
        } else {
            enemy.ok_or_else(|| EngineError::MissingEntity(modifier.kind().to_string()))?
        };
        let stripped = strip_side(modifier.kind());
        let (owner_path, property) = stripped
            .rsplit_once('.')
            .ok_or_else(|| EngineError::UnsupportedProperty(stripped.to_string()))?;
        let processor = self
            .processors
            .iter()
            .find(|p| p.supports(owner_path))
            .ok_or_else(|| EngineError::UnsupportedResolver(modifier.kind().to_string()))?;
        let mut element = self.elements.resolve(owner_path, target)?;
        processor.apply(property, &mut element, modifier.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fableforge_domain::{Attribute, Damage};

    fn hero() -> Character {
        Character::new("Hero")
            .with_attribute("strength", Attribute::base(10, 0, 20).unwrap())
            .with_damage(Damage::new("physical", 2))
    }

    #[test]
    fn positive_modifier_increases_the_attribute() {
        let handler = ModifierHandler::new();
        let mut hero = hero();
        handler
            .handle(&Modifier::new("self.attribute.strength.value", 3), &mut hero, None)
            .unwrap();
        assert_eq!(hero.attribute("strength").and_then(Attribute::value), Some(13));
    }

    #[test]
    fn negative_modifier_decreases_and_clamps() {
        let handler = ModifierHandler::new();
        let mut hero = hero();
        handler
            .handle(&Modifier::new("self.attribute.strength.value", -15), &mut hero, None)
            .unwrap();
        assert_eq!(hero.attribute("strength").and_then(Attribute::value), Some(0));
    }

    #[test]
    fn enemy_modifier_routes_to_the_other_side() {
        let handler = ModifierHandler::new();
        let mut player = hero();
        let mut orc = hero();
        handler
            .handle(
                &Modifier::new("enemy.damages.physical.value", 4),
                &mut player,
                Some(&mut orc),
            )
            .unwrap();
        assert_eq!(player.damage("physical").map(Damage::value), Some(2));
        assert_eq!(orc.damage("physical").map(Damage::value), Some(6));
    }

    #[test]
    fn enemy_modifier_without_enemy_is_an_error() {
        let handler = ModifierHandler::new();
        let mut hero = hero();
        let err = handler
            .handle(&Modifier::new("enemy.attribute.strength.value", 1), &mut hero, None)
            .unwrap_err();
        assert_eq!(err.code(), 204);
    }

    #[test]
    fn non_value_property_is_rejected() {
        let handler = ModifierHandler::new();
        let mut hero = hero();
        let err = handler
            .handle(&Modifier::new("self.attribute.strength.max", 5), &mut hero, None)
            .unwrap_err();
        assert_eq!(err, EngineError::UnsupportedProperty("max".into()));
    }
}
