//! Prerequisites aggregation - "N of M" quorums over conditions
//!
//! Items are checked in declaration order and the aggregate short-circuits
//! the moment the quorum is reached. A condition whose target side is absent
//! is skipped rather than failed, so enemy-gated items simply do not count
//! outside combat. Condition checks never mutate state.

use fableforge_domain::{Character, Edge, Graph, Prerequisites};

use crate::condition::ConditionEvaluator;

/// Evaluates prerequisite quorums and filters graph edges by them.
#[derive(Default)]
pub struct PrerequisiteEvaluator {
    conditions: ConditionEvaluator,
}

impl PrerequisiteEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `number_required` items hold; trivially true for a quorum
    /// of zero or less.
    pub fn evaluate(
        &self,
        prerequisites: &Prerequisites,
        player: &mut Character,
        mut enemy: Option<&mut Character>,
    ) -> bool {
        if prerequisites.number_required() <= 0 {
            return true;
        }
        let mut satisfied = 0;
        for item in prerequisites.items() {
            let target: &mut Character = if item.targets_self() {
                &mut *player
            } else {
                match enemy.as_deref_mut() {
                    Some(enemy) => enemy,
                    None => continue,
                }
            };
            let holds = match self.conditions.evaluate(item, target) {
                Ok(holds) => holds,
                Err(error) => {
                    tracing::debug!(condition = %item.kind(), %error, "condition failed to resolve");
                    false
                }
            };
            if holds {
                satisfied += 1;
                if satisfied >= prerequisites.number_required() {
                    return true;
                }
            }
        }
        false
    }

    /// Outgoing edges of `from` whose prerequisites currently hold.
    pub fn available_edges<'g>(
        &self,
        graph: &'g Graph,
        from: &'g str,
        player: &mut Character,
        mut enemy: Option<&mut Character>,
    ) -> Vec<&'g Edge> {
        graph
            .edges_from(from)
            .filter(|edge| match &edge.prerequisites {
                Some(prerequisites) => {
                    self.evaluate(prerequisites, player, enemy.as_deref_mut())
                }
                None => true,
            })
            .collect()
    }
}
