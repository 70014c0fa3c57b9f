//! Condition parsing and evaluation
//!
//! A condition string is a semicolon-joined list of comparisons
//! (`"value >= 10; value < 20"`). Segments that do not match the grammar are
//! silently dropped; an empty comparison list holds vacuously. Evaluation
//! resolves the condition's `type` path to an element, checks every
//! comparison against the element's properties, and reads the result through
//! the condition's `is` flag.

use std::sync::OnceLock;

use fableforge_domain::{Character, Condition};
use regex_lite::Regex;

use crate::resolve::{strip_side, ElementResolverChain, Scalar};
use crate::EngineError;

fn comparison_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z_]+)\s*(>=|<=|!=|=|>|<|&)\s*(.+)$").expect("valid comparison pattern")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Gte,
    Lte,
    Ne,
    Eq,
    Gt,
    Lt,
    /// Bitwise test on integers, containment on text
    And,
}

impl Operator {
    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">=" => Some(Self::Gte),
            "<=" => Some(Self::Lte),
            "!=" => Some(Self::Ne),
            "=" => Some(Self::Eq),
            ">" => Some(Self::Gt),
            "<" => Some(Self::Lt),
            "&" => Some(Self::And),
            _ => None,
        }
    }
}

/// One parsed comparison against an element property.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub property: String,
    pub operator: Operator,
    pub expected: Scalar,
}

/// Parse a condition string, dropping segments that do not match the grammar.
pub fn parse_condition(condition: &str) -> Vec<Comparison> {
    let re = comparison_regex();
    condition
        .split(';')
        .filter_map(|segment| {
            let caps = re.captures(segment.trim())?;
            let operator = Operator::from_symbol(caps.get(2)?.as_str())?;
            Some(Comparison {
                property: caps.get(1)?.as_str().to_string(),
                operator,
                expected: cast_value(caps.get(3)?.as_str().trim()),
            })
        })
        .collect()
}

fn cast_value(raw: &str) -> Scalar {
    if let Ok(int) = raw.parse::<i64>() {
        return Scalar::Int(int);
    }
    if raw.contains('.') {
        if let Ok(float) = raw.parse::<f64>() {
            return Scalar::Float(float);
        }
    }
    match raw {
        "true" => Scalar::Bool(true),
        "false" => Scalar::Bool(false),
        "null" => Scalar::Null,
        _ => Scalar::Text(raw.to_string()),
    }
}

/// Evaluates a single condition against a character.
#[derive(Default)]
pub struct ConditionEvaluator {
    elements: ElementResolverChain,
}

impl ConditionEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the comparisons' aggregate outcome matches the `is` flag.
    ///
    /// A property the element does not have reads as null, so `value = null`
    /// checks for absence.
    pub fn evaluate(
        &self,
        condition: &Condition,
        character: &mut Character,
    ) -> Result<bool, EngineError> {
        let element = self
            .elements
            .resolve(strip_side(condition.kind()), character)?;
        let holds = parse_condition(condition.condition()).iter().all(|c| {
            let actual = element.property(&c.property).unwrap_or(Scalar::Null);
            satisfies(&actual, c.operator, &c.expected)
        });
        Ok(holds == condition.is())
    }
}

fn satisfies(actual: &Scalar, operator: Operator, expected: &Scalar) -> bool {
    match (actual, expected) {
        (Scalar::Null, Scalar::Null) => matches!(operator, Operator::Eq),
        (Scalar::Null, _) | (_, Scalar::Null) => matches!(operator, Operator::Ne),
        (Scalar::Bool(a), Scalar::Bool(b)) => match operator {
            Operator::Eq => a == b,
            Operator::Ne => a != b,
            _ => false,
        },
        (Scalar::Int(a), Scalar::Int(b)) if operator == Operator::And => (a & b) != 0,
        (Scalar::Text(a), Scalar::Text(b)) => match operator {
            Operator::Eq => a == b,
            Operator::Ne => a != b,
            Operator::And => a.contains(b.as_str()),
            _ => false,
        },
        _ => match (as_f64(actual), as_f64(expected)) {
            (Some(a), Some(b)) => match operator {
                Operator::Gte => a >= b,
                Operator::Lte => a <= b,
                Operator::Ne => a != b,
                Operator::Eq => a == b,
                Operator::Gt => a > b,
                Operator::Lt => a < b,
                Operator::And => false,
            },
            _ => false,
        },
    }
}

fn as_f64(scalar: &Scalar) -> Option<f64> {
    match scalar {
        Scalar::Int(i) => Some(*i as f64),
        Scalar::Float(f) => Some(*f),
        _ => None,
    }
}
