// rust/engine/src/policy/random.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::engine::{Action, ActionPlan, TileGrid};

use super::base::{Decision, Policy, Reason};

/// Baseline: one uniformly random button per cycle at base cadence.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn decide(&mut self, grid: &TileGrid) -> Decision {
        if grid.find_player().is_none() {
            return Decision::noop();
        }
        let Some(&action) = Action::ALL.choose(&mut self.rng) else {
            return Decision::noop();
        };
        Decision {
            plan: ActionPlan::single(action, 0),
            reason: Reason::Random,
        }
    }

    fn name(&self) -> &str {
        "random"
    }
}
