//! Turn-based combat resolution
//!
//! Both combat formulas are ordinary rule expressions, so the substituted
//! forms land in the turn's debug trace exactly as the expression engine
//! rendered them.

use fableforge_domain::{Character, Modifier, Status};

use crate::expression::{EvalContext, ExpressionEngine, Value};
use crate::prerequisite::PrerequisiteEvaluator;
use crate::rng::RandomSource;
use crate::EngineError;

pub const HIT_CHANCE_RULE: &str =
    "attacker.attribute.attack.value / (defender.attribute.defense.value * 2)";

pub const DAMAGE_RULE: &str = "(attacker.attribute.strength.value * 2 / defender.attribute.endurance.value) + attacker.weapon.equipped.damages";

/// Outcome of one attack, returned to the caller and discarded afterwards.
///
/// `damages` is informational on a miss.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnResult {
    pub hit: bool,
    pub damages: i64,
    pub chance: f64,
    pub roll: f64,
    pub debug: Vec<String>,
}

/// Resolves attack turns between two characters.
#[derive(Default)]
pub struct CombatResolver {
    engine: ExpressionEngine,
    prerequisites: PrerequisiteEvaluator,
}

impl CombatResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve one attack from `attacker` against `defender`.
    ///
    /// A hit decreases the defender's `vitality` through the attribute's
    /// clamping `decrease`. Missing `attack`, `defense`, `strength`,
    /// `endurance`, or `vitality` stats are configuration errors.
    pub fn turn(
        &self,
        attacker: &mut Character,
        defender: &mut Character,
        rng: &mut dyn RandomSource,
    ) -> Result<TurnResult, EngineError> {
        let attacker_modifiers = self.active_modifiers(attacker, defender);
        let defender_modifiers = self.active_modifiers(defender, attacker);

        let ctx = EvalContext::new(attacker)
            .with_secondary(defender)
            .with_modifiers(&attacker_modifiers)
            .with_secondary_modifiers(&defender_modifiers);

        let chance_expr = self.engine.render(HIT_CHANCE_RULE, &ctx, rng)?;
        let chance = as_number(self.engine.evaluate_rendered(&chance_expr)?, HIT_CHANCE_RULE)?;

        let damage_expr = self.engine.render(DAMAGE_RULE, &ctx, rng)?;
        let raw_damage = as_number(self.engine.evaluate_rendered(&damage_expr)?, DAMAGE_RULE)?;
        // i64 cast saturates when endurance 0 pushes the formula to infinity;
        // a hit never heals, so negative damage floors at 0
        let damages = (raw_damage.floor() as i64).max(0);

        let roll = rng.unit();
        let hit = roll <= chance;

        let mut debug = vec![
            format!("hit chance: {chance_expr} = {chance}"),
            format!("damage: {damage_expr} = {damages}"),
            format!(
                "roll {roll} against chance {chance} -> {}",
                if hit { "hit" } else { "miss" }
            ),
        ];

        if hit {
            match defender.attribute_mut("vitality") {
                Some(vitality) => vitality.decrease(damages)?,
                None => return Err(EngineError::MissingStat("vitality".into())),
            }
            debug.push(format!("{} takes {damages} damage", defender.name));
        }

        tracing::debug!(
            attacker = %attacker.name,
            defender = %defender.name,
            hit,
            damages,
            chance,
            roll,
            "combat turn resolved"
        );

        Ok(TurnResult {
            hit,
            damages,
            chance,
            roll,
            debug,
        })
    }

    /// Modifiers currently in effect for `owner`: worn gear plus active
    /// statuses whose prerequisites hold against the opposing character.
    fn active_modifiers(&self, owner: &mut Character, other: &mut Character) -> Vec<Modifier> {
        let mut modifiers = owner.gear_modifiers();
        let statuses: Vec<Status> = owner.active_statuses().cloned().collect();
        for status in statuses {
            let applies = match &status.prerequisites {
                Some(prerequisites) => {
                    self.prerequisites.evaluate(prerequisites, owner, Some(&mut *other))
                }
                None => true,
            };
            if applies {
                modifiers.extend(status.modifiers.iter().cloned());
            }
        }
        modifiers
    }
}

fn as_number(value: Value, rule: &str) -> Result<f64, EngineError> {
    match value {
        Value::Number(n) => Ok(n),
        Value::Bool(_) => Err(EngineError::EvaluationFailed(format!(
            "rule is not numeric: {rule}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::MockRandomSource;
    use fableforge_domain::{Attribute, Condition, Modifier, Prerequisites, Weapon};

    fn fighter(attack: i64, defense: i64, strength: i64, endurance: i64) -> Character {
        Character::new("Fighter")
            .with_attribute("attack", Attribute::base(attack, 0, 100).unwrap())
            .with_attribute("defense", Attribute::base(defense, 0, 100).unwrap())
            .with_attribute("strength", Attribute::base(strength, 0, 100).unwrap())
            .with_attribute("endurance", Attribute::base(endurance, 0, 100).unwrap())
            .with_attribute("vitality", Attribute::base(30, 0, 30).unwrap())
    }

    fn scripted_unit(value: f64) -> MockRandomSource {
        let mut rng = MockRandomSource::new();
        rng.expect_unit().times(1).return_const(value);
        rng
    }

    #[test]
    fn certain_hit_applies_floored_damage() {
        let resolver = CombatResolver::new();
        let mut attacker = fighter(10, 5, 10, 4).with_weapon(Weapon::new("Short sword", 3));
        let mut defender = fighter(10, 5, 10, 4);

        let result = resolver
            .turn(&mut attacker, &mut defender, &mut scripted_unit(0.5))
            .unwrap();

        // 10 / (5 * 2) = 1.0; 10 * 2 / 4 + 3 = 8
        assert!(result.hit);
        assert_eq!(result.chance, 1.0);
        assert_eq!(result.damages, 8);
        assert_eq!(
            defender.attribute("vitality").and_then(Attribute::value),
            Some(22)
        );
        assert!(result.debug[0].contains("10 / (5 * 2)"));
    }

    #[test]
    fn high_roll_misses_and_leaves_the_defender_untouched() {
        let resolver = CombatResolver::new();
        let mut attacker = fighter(10, 5, 10, 4);
        let mut defender = fighter(10, 10, 10, 4);

        let result = resolver
            .turn(&mut attacker, &mut defender, &mut scripted_unit(0.9))
            .unwrap();

        assert!(!result.hit);
        assert_eq!(result.chance, 0.5);
        assert_eq!(result.damages, 5);
        assert_eq!(
            defender.attribute("vitality").and_then(Attribute::value),
            Some(30)
        );
    }

    #[test]
    fn zero_endurance_saturates_damage_and_vitality_clamps() {
        let resolver = CombatResolver::new();
        let mut attacker = fighter(10, 5, 10, 4);
        let mut defender = fighter(10, 5, 10, 0);

        let result = resolver
            .turn(&mut attacker, &mut defender, &mut scripted_unit(0.0))
            .unwrap();

        assert!(result.hit);
        assert_eq!(result.damages, i64::MAX);
        assert_eq!(
            defender.attribute("vitality").and_then(Attribute::value),
            Some(0)
        );
    }

    #[test]
    fn negative_damage_floors_at_zero_instead_of_healing() {
        let resolver = CombatResolver::new();
        let weakened = Status::permanent("Withered")
            .with_modifier(Modifier::new("self.attribute.strength.value", -20));
        let mut attacker = fighter(10, 5, 10, 4).with_status(weakened);
        let mut defender = fighter(10, 5, 10, 4);

        let result = resolver
            .turn(&mut attacker, &mut defender, &mut scripted_unit(0.5))
            .unwrap();

        // (10 - 20) * 2 / 4 = -5, floored to 0
        assert!(result.hit);
        assert_eq!(result.damages, 0);
        assert_eq!(
            defender.attribute("vitality").and_then(Attribute::value),
            Some(30)
        );
    }

    #[test]
    fn status_modifiers_apply_when_their_prerequisites_hold() {
        let resolver = CombatResolver::new();
        let enraged = Status::permanent("Enraged")
            .with_modifier(Modifier::new("self.attribute.strength.value", 10))
            .with_prerequisites(Prerequisites::new(1).with_condition(Condition::new(
                "self.attribute.vitality",
                "value <= 30",
                true,
            )));
        let mut attacker = fighter(10, 5, 10, 4).with_status(enraged);
        let mut defender = fighter(10, 5, 10, 4);

        let result = resolver
            .turn(&mut attacker, &mut defender, &mut scripted_unit(0.5))
            .unwrap();

        // (10 + 10) * 2 / 4 = 10
        assert_eq!(result.damages, 10);
    }

    #[test]
    fn expired_status_modifiers_are_ignored() {
        let resolver = CombatResolver::new();
        let mut fading = Status::timed("Blessing", 1)
            .with_modifier(Modifier::new("self.attribute.strength.value", 10));
        fading.tick();
        let mut attacker = fighter(10, 5, 10, 4).with_status(fading);
        let mut defender = fighter(10, 5, 10, 4);

        let result = resolver
            .turn(&mut attacker, &mut defender, &mut scripted_unit(0.5))
            .unwrap();

        assert_eq!(result.damages, 5);
    }

    #[test]
    fn missing_attack_stat_is_a_configuration_error() {
        let resolver = CombatResolver::new();
        let mut attacker = Character::new("Unarmed");
        let mut defender = fighter(10, 5, 10, 4);

        let err = resolver
            .turn(&mut attacker, &mut defender, &mut MockRandomSource::new())
            .unwrap_err();
        assert_eq!(err, EngineError::MissingStat("attack".into()));
    }

    #[test]
    fn missing_vitality_is_a_configuration_error_on_hit() {
        let resolver = CombatResolver::new();
        let mut attacker = fighter(10, 5, 10, 4);
        let mut defender = Character::new("Ghost")
            .with_attribute("defense", Attribute::base(5, 0, 100).unwrap())
            .with_attribute("endurance", Attribute::base(4, 0, 100).unwrap());

        let err = resolver
            .turn(&mut attacker, &mut defender, &mut scripted_unit(0.0))
            .unwrap_err();
        assert_eq!(err, EngineError::MissingStat("vitality".into()));
    }
}
