// rust/engine/src/engine/plan.rs
#![forbid(unsafe_code)]

use serde::Serialize;

use crate::engine::action::Action;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct PlannedAction {
    pub action: Action,
    /// Requested hold in emulator ticks. 0 means "base cadence".
    pub hold: u32,
}

/**
 * How long each press in a plan is held.
 *
 * `PlanMax` reproduces the controller as it shipped: every action is held for the largest
 * hold in the plan. That couples unrelated actions in multi-action plans and is most likely
 * accidental; `PerAction` holds each action for its own value. Both substitute the floor for
 * a zero hold so the emulator always advances.
 */
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum HoldMode {
    #[default]
    PlanMax,
    PerAction,
}

impl HoldMode {
    pub fn from_cli(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "plan-max" | "max" => Some(HoldMode::PlanMax),
            "per-action" | "each" => Some(HoldMode::PerAction),
            _ => None,
        }
    }

    /// Effective ticks for a list of requested holds; zero becomes `floor`.
    pub fn resolve(self, holds: &[u32], floor: u32) -> Vec<u32> {
        let or_floor = |h: u32| if h == 0 { floor } else { h };
        match self {
            HoldMode::PlanMax => {
                let max = holds.iter().copied().max().unwrap_or(0);
                vec![or_floor(max); holds.len()]
            }
            HoldMode::PerAction => holds.iter().map(|&h| or_floor(h)).collect(),
        }
    }
}

/// Ordered actions plus hold durations produced by one decision.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ActionPlan {
    steps: Vec<PlannedAction>,
}

impl ActionPlan {
    /// Empty plan: the agent idles this cycle.
    pub fn noop() -> Self {
        Self::default()
    }

    pub fn single(action: Action, hold: u32) -> Self {
        Self {
            steps: vec![PlannedAction { action, hold }],
        }
    }

    pub fn push(&mut self, action: Action, hold: u32) {
        self.steps.push(PlannedAction { action, hold });
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[PlannedAction] {
        &self.steps
    }

    pub fn first(&self) -> Option<PlannedAction> {
        self.steps.first().copied()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.steps.iter().map(|s| s.action).collect()
    }

    pub fn delays(&self) -> Vec<u32> {
        self.steps.iter().map(|s| s.hold).collect()
    }

    /// Split into the parallel `(actions, delays)` pair; both always have the same length.
    pub fn into_parts(self) -> (Vec<Action>, Vec<u32>) {
        self.steps.into_iter().map(|s| (s.action, s.hold)).unzip()
    }

    /// Effective ticks to hold each entry under `mode`; zero holds become `floor`.
    pub fn hold_ticks(&self, mode: HoldMode, floor: u32) -> Vec<u32> {
        mode.resolve(&self.delays(), floor)
    }
}
