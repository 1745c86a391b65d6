// rust/engine/src/policy/base.rs
#![forbid(unsafe_code)]

use serde::Serialize;

use crate::engine::{ActionPlan, TileGrid};
use crate::policy::heuristic::RuleId;

/// Why a policy produced the plan it did.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Reason {
    /// No player tile in the grid; the plan is empty.
    NoPlayer,
    Rule(RuleId),
    Random,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Decision {
    pub plan: ActionPlan,
    pub reason: Reason,
}

impl Decision {
    pub fn noop() -> Self {
        Self {
            plan: ActionPlan::noop(),
            reason: Reason::NoPlayer,
        }
    }
}

/// Policy turns one grid snapshot into an action plan.
///
/// Never fails: a grid without a player yields an empty plan.
///
/// Object-safe so it can be used as `Box<dyn Policy>`.
pub trait Policy {
    fn decide(&mut self, grid: &TileGrid) -> Decision;

    fn name(&self) -> &str;
}
