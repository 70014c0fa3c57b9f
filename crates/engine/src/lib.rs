pub mod combat;
pub mod condition;
pub mod error;
pub mod expression;
pub mod modifier;
pub mod prerequisite;
pub mod resolve;
pub mod rng;

pub use combat::{CombatResolver, TurnResult, DAMAGE_RULE, HIT_CHANCE_RULE};
pub use condition::{parse_condition, Comparison, ConditionEvaluator, Operator};
pub use error::EngineError;
pub use expression::{EvalContext, ExpressionEngine, Value};
pub use modifier::{AttributeProcessor, DamageProcessor, ModifierHandler, ModifierProcessor};
pub use prerequisite::PrerequisiteEvaluator;
pub use resolve::{Element, ElementResolverChain, Resolved, Scalar, ValueResolverChain};
pub use rng::{RandomSource, StdRandom};
