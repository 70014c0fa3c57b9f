//! Value resolvers - dotted paths to numbers
//!
//! Each resolver owns one path category. The chain walks its resolvers in
//! order and hands the path to the first one that claims it, so order is
//! part of the contract (see [`ValueResolverChain::new`]).

use fableforge_domain::{Attribute, Character, Modifier};

use crate::resolve::strip_side;
use crate::rng::RandomSource;
use crate::EngineError;

/// Outcome of resolving one path token.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// A concrete number ready for substitution
    Value(f64),
    /// A compound attribute's rule, to be expanded by the renderer
    Expand(String),
}

pub trait ValueResolver {
    fn supports(&self, path: &str) -> bool;

    fn resolve(
        &self,
        path: &str,
        character: &Character,
        modifiers: &[Modifier],
        rng: &mut dyn RandomSource,
    ) -> Result<Resolved, EngineError>;
}

/// Ordered strategy list over every value resolver.
pub struct ValueResolverChain {
    resolvers: Vec<Box<dyn ValueResolver>>,
}

impl Default for ValueResolverChain {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueResolverChain {
    /// Resolution order: attributes, damages, info, weapon, roll.
    pub fn new() -> Self {
        Self {
            resolvers: vec![
                Box::new(AttributeValue),
                Box::new(DamageValue),
                Box::new(InfoValue),
                Box::new(WeaponValue),
                Box::new(Roll),
            ],
        }
    }

    /// Resolve a full rule token (side prefix included) against a character.
    pub fn resolve(
        &self,
        path: &str,
        character: &Character,
        modifiers: &[Modifier],
        rng: &mut dyn RandomSource,
    ) -> Result<Resolved, EngineError> {
        let stripped = strip_side(path);
        for resolver in &self.resolvers {
            if resolver.supports(stripped) {
                return resolver.resolve(stripped, character, modifiers, rng);
            }
        }
        Err(EngineError::UnsupportedResolver(path.to_string()))
    }
}

/// `attribute.<name>.value` / `ability.<name>.value`
///
/// Base attributes yield their value plus every supplied modifier targeting
/// the stat; compound attributes yield their rule for expansion.
struct AttributeValue;

impl AttributeValue {
    fn stat_name(path: &str) -> Option<&str> {
        let rest = path
            .strip_prefix("attribute.")
            .or_else(|| path.strip_prefix("ability."))?;
        rest.strip_suffix(".value")
    }
}

impl ValueResolver for AttributeValue {
    fn supports(&self, path: &str) -> bool {
        path.starts_with("attribute.") || path.starts_with("ability.")
    }

    fn resolve(
        &self,
        path: &str,
        character: &Character,
        modifiers: &[Modifier],
        _rng: &mut dyn RandomSource,
    ) -> Result<Resolved, EngineError> {
        let name = Self::stat_name(path)
            .ok_or_else(|| EngineError::UnsupportedProperty(path.to_string()))?;
        let attribute = character
            .attribute(name)
            .ok_or_else(|| EngineError::MissingStat(name.to_string()))?;
        match attribute {
            Attribute::Compound { rule } => Ok(Resolved::Expand(rule.clone())),
            Attribute::Base { value, .. } => {
                let delta: i64 = modifiers
                    .iter()
                    .filter(|m| {
                        m.kind().contains(&format!("attribute.{name}"))
                            || m.kind().contains(&format!("ability.{name}"))
                    })
                    .map(Modifier::value)
                    .sum();
                Ok(Resolved::Value((value + delta) as f64))
            }
        }
    }
}

/// `damages.<channel>.value` and `damages.<channel>.value_with_modifiers`
struct DamageValue;

impl ValueResolver for DamageValue {
    fn supports(&self, path: &str) -> bool {
        path.starts_with("damages.")
    }

    fn resolve(
        &self,
        path: &str,
        character: &Character,
        modifiers: &[Modifier],
        _rng: &mut dyn RandomSource,
    ) -> Result<Resolved, EngineError> {
        let rest = path
            .strip_prefix("damages.")
            .ok_or_else(|| EngineError::UnsupportedProperty(path.to_string()))?;
        if let Some(channel) = rest.strip_suffix(".value_with_modifiers") {
            let damage = character
                .damage(channel)
                .ok_or_else(|| EngineError::MissingStat(channel.to_string()))?;
            return Ok(Resolved::Value(damage.value_with_modifiers(modifiers) as f64));
        }
        if let Some(channel) = rest.strip_suffix(".value") {
            let damage = character
                .damage(channel)
                .ok_or_else(|| EngineError::MissingStat(channel.to_string()))?;
            return Ok(Resolved::Value(damage.value() as f64));
        }
        Err(EngineError::UnsupportedProperty(path.to_string()))
    }
}

/// `info.<field>` - read-only numeric metadata
struct InfoValue;

impl ValueResolver for InfoValue {
    fn supports(&self, path: &str) -> bool {
        path.starts_with("info.")
    }

    fn resolve(
        &self,
        path: &str,
        character: &Character,
        _modifiers: &[Modifier],
        _rng: &mut dyn RandomSource,
    ) -> Result<Resolved, EngineError> {
        match path {
            "info.level" => Ok(Resolved::Value(character.info.level as f64)),
            _ => Err(EngineError::UnsupportedProperty(path.to_string())),
        }
    }
}

/// `weapon.equipped.damages` - 0 when the slot is empty or unequipped
struct WeaponValue;

impl ValueResolver for WeaponValue {
    fn supports(&self, path: &str) -> bool {
        path == "weapon.equipped.damages"
    }

    fn resolve(
        &self,
        _path: &str,
        character: &Character,
        _modifiers: &[Modifier],
        _rng: &mut dyn RandomSource,
    ) -> Result<Resolved, EngineError> {
        Ok(Resolved::Value(character.inventory.equipped_weapon_damage() as f64))
    }
}

/// `roll(N)` - one uniform draw in `[0, N]`
///
/// An argument without a decimal point draws an integer, otherwise a
/// continuous value. Every call consumes one draw from the session source.
struct Roll;

impl ValueResolver for Roll {
    fn supports(&self, path: &str) -> bool {
        path.starts_with("roll(")
    }

    fn resolve(
        &self,
        path: &str,
        _character: &Character,
        _modifiers: &[Modifier],
        rng: &mut dyn RandomSource,
    ) -> Result<Resolved, EngineError> {
        let arg = path
            .strip_prefix("roll(")
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(|| EngineError::EvaluationFailed(format!("malformed roll token: {path}")))?;
        if arg.contains('.') {
            let max: f64 = arg
                .parse()
                .map_err(|_| EngineError::EvaluationFailed(format!("malformed roll bound: {arg}")))?;
            Ok(Resolved::Value(rng.roll_float(max)))
        } else {
            let max: i64 = arg
                .parse()
                .map_err(|_| EngineError::EvaluationFailed(format!("malformed roll bound: {arg}")))?;
            Ok(Resolved::Value(rng.roll_int(max) as f64))
        }
    }
}
