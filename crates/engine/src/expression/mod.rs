//! Expression renderer and evaluator
//!
//! A rule is a string mixing arithmetic with dotted entity paths
//! (`"self.attribute.strength.value * 2 + self.roll(6)"`). Rendering
//! substitutes context variables first, then resolves every path token left
//! to right through the value resolver chain. Evaluation renders, checks the
//! result against the arithmetic whitelist, and runs the in-crate parser.

mod parser;

use std::sync::OnceLock;

use fableforge_domain::{Character, Modifier};
use regex_lite::Regex;

pub use parser::Value;

use crate::resolve::{Resolved, ValueResolverChain};
use crate::rng::RandomSource;
use crate::EngineError;

/// Nesting limit for compound attribute expansion.
const MAX_DEPTH: usize = 8;

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(self|enemy|attacker|defender)\.[a-z0-9_]+(\.[a-z0-9_]+)*(\([0-9.,]*\))?")
            .expect("valid token pattern")
    })
}

/// The two characters, modifier lists, and variables a rule renders against.
///
/// `self`/`attacker` tokens resolve against the primary side, and
/// `enemy`/`defender` tokens against the secondary one.
#[derive(Clone)]
pub struct EvalContext<'a> {
    primary: &'a Character,
    secondary: Option<&'a Character>,
    primary_modifiers: &'a [Modifier],
    secondary_modifiers: &'a [Modifier],
    vars: Vec<(String, String)>,
}

impl<'a> EvalContext<'a> {
    pub fn new(primary: &'a Character) -> Self {
        Self {
            primary,
            secondary: None,
            primary_modifiers: &[],
            secondary_modifiers: &[],
            vars: Vec::new(),
        }
    }

    pub fn with_secondary(mut self, secondary: &'a Character) -> Self {
        self.secondary = Some(secondary);
        self
    }

    pub fn with_modifiers(mut self, modifiers: &'a [Modifier]) -> Self {
        self.primary_modifiers = modifiers;
        self
    }

    pub fn with_secondary_modifiers(mut self, modifiers: &'a [Modifier]) -> Self {
        self.secondary_modifiers = modifiers;
        self
    }

    /// Register a variable substituted literally before path scanning.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.push((key.into(), value.into()));
        self
    }
}

/// Renders and evaluates rule expressions.
#[derive(Default)]
pub struct ExpressionEngine {
    values: ValueResolverChain,
}

impl ExpressionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitute every variable and path token, returning the rendered rule.
    pub fn render(
        &self,
        rule: &str,
        ctx: &EvalContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> Result<String, EngineError> {
        self.render_depth(rule, ctx, rng, 0)
    }

    /// Render then evaluate a rule to a number or boolean.
    pub fn evaluate(
        &self,
        rule: &str,
        ctx: &EvalContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> Result<Value, EngineError> {
        let rendered = self.render(rule, ctx, rng)?;
        self.evaluate_rendered(&rendered)
    }

    /// Evaluate an already-rendered rule.
    ///
    /// # Errors
    ///
    /// Anything outside the arithmetic character whitelist fails before the
    /// parser runs; malformed arithmetic fails inside it.
    pub fn evaluate_rendered(&self, rendered: &str) -> Result<Value, EngineError> {
        let whitelisted = rendered
            .chars()
            .all(|c| matches!(c, '0'..='9' | '.' | '(' | ')' | '+' | '-' | '*' | '/' | '<' | '>' | '=' | '!' | ' '));
        if !whitelisted {
            return Err(EngineError::NotMathExpression(rendered.to_string()));
        }
        parser::evaluate(rendered).map_err(EngineError::EvaluationFailed)
    }

    fn render_depth(
        &self,
        rule: &str,
        ctx: &EvalContext<'_>,
        rng: &mut dyn RandomSource,
        depth: usize,
    ) -> Result<String, EngineError> {
        if depth > MAX_DEPTH {
            return Err(EngineError::RecursionLimit(rule.to_string()));
        }

        let mut substituted = rule.to_string();
        for (key, value) in &ctx.vars {
            substituted = substituted.replace(key.as_str(), value);
        }

        let re = token_regex();
        let mut out = String::with_capacity(substituted.len());
        let mut rest = substituted.as_str();
        while let Some(found) = re.find(rest) {
            out.push_str(&rest[..found.start()]);
            out.push_str(&self.resolve_token(found.as_str(), ctx, rng, depth)?);
            rest = &rest[found.end()..];
        }
        out.push_str(rest);
        Ok(out)
    }

    fn resolve_token(
        &self,
        token: &str,
        ctx: &EvalContext<'_>,
        rng: &mut dyn RandomSource,
        depth: usize,
    ) -> Result<String, EngineError> {
        let enemy_side = token.starts_with("enemy.") || token.starts_with("defender.");
        let (character, modifiers) = if enemy_side {
            let secondary = ctx
                .secondary
                .ok_or_else(|| EngineError::MissingEntity(token.to_string()))?;
            (secondary, ctx.secondary_modifiers)
        } else {
            (ctx.primary, ctx.primary_modifiers)
        };

        match self.values.resolve(token, character, modifiers, rng)? {
            Resolved::Value(value) => Ok(format_number(value)),
            Resolved::Expand(rule) => {
                // A compound rule is written from its owner's point of view,
                // so an enemy-side token expands with the sides swapped.
                let sub = EvalContext {
                    primary: character,
                    secondary: if enemy_side { Some(ctx.primary) } else { ctx.secondary },
                    primary_modifiers: modifiers,
                    secondary_modifiers: if enemy_side {
                        ctx.primary_modifiers
                    } else {
                        ctx.secondary_modifiers
                    },
                    vars: ctx.vars.clone(),
                };
                let rendered = self.render_depth(&rule, &sub, rng, depth + 1)?;
                match self.evaluate_rendered(&rendered)? {
                    Value::Number(n) => Ok(format_number(n)),
                    Value::Bool(_) => Err(EngineError::EvaluationFailed(format!(
                        "compound rule is not numeric: {rule}"
                    ))),
                }
            }
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::MockRandomSource;
    use fableforge_domain::Attribute;
    use mockall::Sequence;

    fn hero() -> Character {
        Character::new("Hero")
            .with_attribute("strength", Attribute::base(10, 0, 20).unwrap())
            .with_attribute("agility", Attribute::base(6, 0, 20).unwrap())
            .with_attribute(
                "might",
                Attribute::compound("self.attribute.strength.value + self.attribute.agility.value"),
            )
    }

    fn no_rng() -> MockRandomSource {
        MockRandomSource::new()
    }

    #[test]
    fn pure_arithmetic_renders_to_itself() {
        let engine = ExpressionEngine::new();
        let hero = hero();
        let ctx = EvalContext::new(&hero);
        let rule = "(((1 + 2) * 2) / 2) - 1";
        assert_eq!(engine.render(rule, &ctx, &mut no_rng()).unwrap(), rule);
        assert_eq!(engine.evaluate(rule, &ctx, &mut no_rng()).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn tokens_substitute_left_to_right() {
        let engine = ExpressionEngine::new();
        let hero = hero();
        let ctx = EvalContext::new(&hero);
        let rendered = engine
            .render(
                "self.attribute.strength.value + self.attribute.agility.value",
                &ctx,
                &mut no_rng(),
            )
            .unwrap();
        assert_eq!(rendered, "10 + 6");
    }

    #[test]
    fn compound_attribute_expands_recursively() {
        let engine = ExpressionEngine::new();
        let hero = hero();
        let ctx = EvalContext::new(&hero);
        let result = engine
            .evaluate("self.attribute.might.value * 2", &ctx, &mut no_rng())
            .unwrap();
        assert_eq!(result, Value::Number(32.0));
    }

    #[test]
    fn self_referential_compound_hits_the_recursion_limit() {
        let engine = ExpressionEngine::new();
        let hero = Character::new("Ouroboros")
            .with_attribute("loop", Attribute::compound("self.attribute.loop.value"));
        let ctx = EvalContext::new(&hero);
        let err = engine
            .evaluate("self.attribute.loop.value", &ctx, &mut no_rng())
            .unwrap_err();
        assert_eq!(err.code(), 207);
    }

    #[test]
    fn enemy_compound_expands_with_sides_swapped() {
        let engine = ExpressionEngine::new();
        let hero = hero();
        let orc = Character::new("Orc")
            .with_attribute("strength", Attribute::base(4, 0, 20).unwrap())
            .with_attribute("agility", Attribute::base(2, 0, 20).unwrap())
            .with_attribute(
                "might",
                Attribute::compound("self.attribute.strength.value + self.attribute.agility.value"),
            );
        let ctx = EvalContext::new(&hero).with_secondary(&orc);
        let rendered = engine
            .render("enemy.attribute.might.value", &ctx, &mut no_rng())
            .unwrap();
        assert_eq!(rendered, "6");
    }

    #[test]
    fn enemy_token_without_secondary_is_an_error() {
        let engine = ExpressionEngine::new();
        let hero = hero();
        let ctx = EvalContext::new(&hero);
        let err = engine
            .render("enemy.attribute.strength.value", &ctx, &mut no_rng())
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::MissingEntity("enemy.attribute.strength.value".into())
        );
    }

    #[test]
    fn context_variables_substitute_before_path_scanning() {
        let engine = ExpressionEngine::new();
        let hero = hero();
        let ctx = EvalContext::new(&hero).with_var("diceResult", "4");
        assert_eq!(
            engine.evaluate("diceResult * 2", &ctx, &mut no_rng()).unwrap(),
            Value::Number(8.0)
        );
    }

    #[test]
    fn successive_rolls_consume_distinct_draws() {
        let engine = ExpressionEngine::new();
        let hero = hero();
        let ctx = EvalContext::new(&hero);
        let mut rng = MockRandomSource::new();
        let mut seq = Sequence::new();
        rng.expect_roll_int().times(1).in_sequence(&mut seq).return_const(38i64);
        rng.expect_roll_int().times(1).in_sequence(&mut seq).return_const(32i64);

        let first = engine.evaluate("self.roll(100)", &ctx, &mut rng).unwrap();
        let second = engine.evaluate("self.roll(100)", &ctx, &mut rng).unwrap();
        assert_eq!(first, Value::Number(38.0));
        assert_eq!(second, Value::Number(32.0));
    }

    #[test]
    fn leftover_letters_are_not_math() {
        let engine = ExpressionEngine::new();
        let err = engine.evaluate_rendered("y(1 +2)").unwrap_err();
        assert_eq!(err, EngineError::NotMathExpression("y(1 +2)".into()));
    }

    #[test]
    fn malformed_arithmetic_fails_evaluation() {
        let engine = ExpressionEngine::new();
        let err = engine.evaluate_rendered("((1 +2)").unwrap_err();
        assert_eq!(err.code(), 203);
    }

    #[test]
    fn fractional_values_render_with_their_decimals() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-3.0), "-3");
    }
}
