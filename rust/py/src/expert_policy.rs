// rust/py/src/expert_policy.rs
#![forbid(unsafe_code)]

use numpy::PyReadonlyArray2;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use mario_engine::{Action, Decision, Policy, RandomPolicy, Reason, RulePolicy, TileGrid};

#[pyclass]
pub struct MarioExpert {
    pub(crate) inner: ExpertPolicyInner,
}

pub(crate) enum ExpertPolicyInner {
    Rules(RulePolicy),
    Random(RandomPolicy),
}

impl ExpertPolicyInner {
    pub(crate) fn decide(&mut self, grid: &TileGrid) -> Decision {
        match self {
            ExpertPolicyInner::Rules(p) => Policy::decide(p, grid),
            ExpertPolicyInner::Random(p) => Policy::decide(p, grid),
        }
    }
}

/// Accepts a 2-D numpy array (uint32 or int64, as the emulator wrapper hands out) or nested lists.
fn extract_grid(game_area: &Bound<'_, PyAny>) -> PyResult<TileGrid> {
    let rows: Vec<Vec<i64>> = if let Ok(arr) = game_area.extract::<PyReadonlyArray2<'_, u32>>() {
        arr.as_array()
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|&v| i64::from(v)).collect())
            .collect()
    } else if let Ok(arr) = game_area.extract::<PyReadonlyArray2<'_, i64>>() {
        arr.as_array()
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect()
    } else {
        game_area.extract()?
    };

    let mut cells: Vec<Vec<u8>> = Vec::with_capacity(rows.len());
    for (r, row) in rows.into_iter().enumerate() {
        let converted = row
            .into_iter()
            .map(|v| {
                u8::try_from(v).map_err(|_| format!("tile code {v} at row {r} out of range"))
            })
            .collect::<Result<Vec<u8>, String>>()
            .map_err(PyValueError::new_err)?;
        cells.push(converted);
    }

    TileGrid::from_rows(cells).map_err(|e| PyValueError::new_err(e.to_string()))
}

fn reason_str(reason: Reason) -> String {
    match reason {
        Reason::NoPlayer => "no_player".to_string(),
        Reason::Rule(id) => id.name().to_string(),
        Reason::Random => "random".to_string(),
    }
}

fn action_from_idx(idx: usize) -> PyResult<Action> {
    Action::from_idx(idx)
        .ok_or_else(|| PyValueError::new_err(format!("no action with index {idx}")))
}

#[pymethods]
impl MarioExpert {
    /// `policy`: "rules" (the hand-tuned table) or "random" (seeded baseline).
    #[new]
    #[pyo3(signature = (policy="rules", seed=0))]
    fn new(policy: &str, seed: u64) -> PyResult<Self> {
        let inner = match policy {
            "rules" | "expert" => ExpertPolicyInner::Rules(RulePolicy::default()),
            "random" => ExpertPolicyInner::Random(RandomPolicy::new(seed)),
            other => {
                return Err(PyValueError::new_err(format!(
                    "unknown policy '{other}' (expected rules | random)"
                )))
            }
        };
        Ok(Self { inner })
    }

    /// Returns `(actions, delays)`: button indices and hold ticks, always the same length.
    /// Both are empty when no player tile is visible.
    fn choose_action(
        &mut self,
        game_area: &Bound<'_, PyAny>,
    ) -> PyResult<(Vec<usize>, Vec<u32>)> {
        let grid = extract_grid(game_area)?;
        let (actions, delays) = self.inner.decide(&grid).plan.into_parts();
        Ok((actions.into_iter().map(Action::idx).collect(), delays))
    }

    /// Like `choose_action`, plus the name of the rule that fired.
    fn explain(
        &mut self,
        game_area: &Bound<'_, PyAny>,
    ) -> PyResult<(Vec<usize>, Vec<u32>, String)> {
        let grid = extract_grid(game_area)?;
        let d = self.inner.decide(&grid);
        let reason = reason_str(d.reason);
        let (actions, delays) = d.plan.into_parts();
        Ok((actions.into_iter().map(Action::idx).collect(), delays, reason))
    }

    /// Emulator window-event code that presses button `idx`.
    #[staticmethod]
    fn press_code(idx: usize) -> PyResult<u8> {
        Ok(action_from_idx(idx)?.press().code())
    }

    /// Emulator window-event code that releases button `idx`.
    #[staticmethod]
    fn release_code(idx: usize) -> PyResult<u8> {
        Ok(action_from_idx(idx)?.release().code())
    }

    /// Effective ticks per action for `delays`.
    ///
    /// NOTE: the default reproduces the shipped controller (every action held for the plan's
    /// largest delay); pass `per_action=True` to hold each action for its own delay.
    #[staticmethod]
    #[pyo3(signature = (delays, act_freq=5, per_action=false))]
    fn hold_ticks(delays: Vec<u32>, act_freq: u32, per_action: bool) -> Vec<u32> {
        let mode = if per_action {
            mario_engine::HoldMode::PerAction
        } else {
            mario_engine::HoldMode::PlanMax
        };
        mode.resolve(&delays, act_freq)
    }
}
