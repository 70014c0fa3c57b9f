//! Element resolvers - dotted paths to the owning objects
//!
//! Where the value chain reads numbers, this chain hands out the object a
//! path names so the condition validator can inspect its properties and the
//! modifier processors can mutate it. Mutation goes through the explicit
//! `increase`/`decrease` capability on [`Element`], never through reflection.

use fableforge_domain::{Attribute, Character, CharacterInfo, Damage, Weapon};

use crate::EngineError;

/// A single property value read off an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

/// A resolved element of a character, borrowed in place.
#[derive(Debug)]
pub enum Element<'a> {
    Attribute(&'a mut Attribute),
    Damage(&'a mut Damage),
    Info(&'a CharacterInfo),
    Weapon(&'a mut Weapon),
}

impl Element<'_> {
    /// Read a named property, `None` when the element has no such property.
    pub fn property(&self, name: &str) -> Option<Scalar> {
        match self {
            Self::Attribute(attribute) => match (&**attribute, name) {
                (Attribute::Base { value, .. }, "value") => Some(Scalar::Int(*value)),
                (Attribute::Base { initial, .. }, "initial") => Some(Scalar::Int(*initial)),
                (Attribute::Base { min, .. }, "min") => Some(Scalar::Int(*min)),
                (Attribute::Base { max, .. }, "max") => Some(Scalar::Int(*max)),
                _ => None,
            },
            Self::Damage(damage) => match name {
                "value" => Some(Scalar::Int(damage.value())),
                "type" => Some(Scalar::Text(damage.channel().to_string())),
                _ => None,
            },
            Self::Info(info) => match name {
                "level" => Some(Scalar::Int(info.level)),
                "race" => Some(Scalar::Text(info.race.clone())),
                _ => None,
            },
            Self::Weapon(weapon) => match name {
                "damages" => Some(Scalar::Int(weapon.damages)),
                "equipped" => Some(Scalar::Bool(weapon.equipped)),
                "name" => Some(Scalar::Text(weapon.name.clone())),
                _ => None,
            },
        }
    }

    /// Raise the element's value by `delta`.
    pub fn increase(&mut self, delta: i64) -> Result<(), EngineError> {
        match self {
            Self::Attribute(attribute) => attribute.increase(delta).map_err(EngineError::from),
            Self::Damage(damage) => {
                damage.increase(delta);
                Ok(())
            }
            Self::Info(_) => Err(EngineError::UnsupportedProperty(
                "info fields are read-only".into(),
            )),
            Self::Weapon(weapon) => {
                weapon.damages = weapon.damages.saturating_add(delta).max(0);
                Ok(())
            }
        }
    }

    /// Lower the element's value by `delta`.
    pub fn decrease(&mut self, delta: i64) -> Result<(), EngineError> {
        match self {
            Self::Attribute(attribute) => attribute.decrease(delta).map_err(EngineError::from),
            Self::Damage(damage) => {
                damage.decrease(delta);
                Ok(())
            }
            Self::Info(_) => Err(EngineError::UnsupportedProperty(
                "info fields are read-only".into(),
            )),
            Self::Weapon(weapon) => {
                weapon.damages = weapon.damages.saturating_sub(delta).max(0);
                Ok(())
            }
        }
    }
}

pub trait ElementResolver {
    fn supports(&self, path: &str) -> bool;

    fn resolve<'c>(
        &self,
        path: &str,
        character: &'c mut Character,
    ) -> Result<Element<'c>, EngineError>;
}

/// Ordered strategy list over every element resolver.
pub struct ElementResolverChain {
    resolvers: Vec<Box<dyn ElementResolver>>,
}

impl Default for ElementResolverChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementResolverChain {
    /// Resolution order: attributes, damages, info, weapon.
    pub fn new() -> Self {
        Self {
            resolvers: vec![
                Box::new(AttributeElement),
                Box::new(DamageElement),
                Box::new(InfoElement),
                Box::new(WeaponElement),
            ],
        }
    }

    /// Resolve an owner path (side prefix already stripped) to its element.
    pub fn resolve<'c>(
        &self,
        path: &str,
        character: &'c mut Character,
    ) -> Result<Element<'c>, EngineError> {
        for resolver in &self.resolvers {
            if resolver.supports(path) {
                return resolver.resolve(path, character);
            }
        }
        Err(EngineError::UnsupportedResolver(path.to_string()))
    }
}

/// `attribute.<name>` / `ability.<name>`
struct AttributeElement;

impl ElementResolver for AttributeElement {
    fn supports(&self, path: &str) -> bool {
        path.starts_with("attribute.") || path.starts_with("ability.")
    }

    fn resolve<'c>(
        &self,
        path: &str,
        character: &'c mut Character,
    ) -> Result<Element<'c>, EngineError> {
        let name = path
            .strip_prefix("attribute.")
            .or_else(|| path.strip_prefix("ability."))
            .ok_or_else(|| EngineError::UnsupportedProperty(path.to_string()))?;
        character
            .attribute_mut(name)
            .map(Element::Attribute)
            .ok_or_else(|| EngineError::MissingStat(name.to_string()))
    }
}

/// `damages.<channel>`
struct DamageElement;

impl ElementResolver for DamageElement {
    fn supports(&self, path: &str) -> bool {
        path.starts_with("damages.")
    }

    fn resolve<'c>(
        &self,
        path: &str,
        character: &'c mut Character,
    ) -> Result<Element<'c>, EngineError> {
        let channel = path
            .strip_prefix("damages.")
            .ok_or_else(|| EngineError::UnsupportedProperty(path.to_string()))?;
        character
            .damage_mut(channel)
            .map(Element::Damage)
            .ok_or_else(|| EngineError::MissingStat(channel.to_string()))
    }
}

/// `info`
struct InfoElement;

impl ElementResolver for InfoElement {
    fn supports(&self, path: &str) -> bool {
        path == "info"
    }

    fn resolve<'c>(
        &self,
        _path: &str,
        character: &'c mut Character,
    ) -> Result<Element<'c>, EngineError> {
        Ok(Element::Info(&character.info))
    }
}

/// `weapon.equipped`
struct WeaponElement;

impl ElementResolver for WeaponElement {
    fn supports(&self, path: &str) -> bool {
        path == "weapon.equipped"
    }

    fn resolve<'c>(
        &self,
        path: &str,
        character: &'c mut Character,
    ) -> Result<Element<'c>, EngineError> {
        character
            .inventory
            .weapon
            .as_mut()
            .map(Element::Weapon)
            .ok_or_else(|| EngineError::MissingStat(path.to_string()))
    }
}
