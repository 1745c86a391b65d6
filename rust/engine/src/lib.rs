// rust/engine/src/lib.rs
#![forbid(unsafe_code)]

pub mod engine;
pub mod policy;

// Re-export the bits the driver and the Python bindings need:
pub use engine::{
    tile, Action, ActionPlan, GameState, GridError, HoldMode, Signal, TileGrid, ACTION_DIM, COLS,
    DEFAULT_ACT_FREQ, GROUND_ROW, ROWS,
};
pub use policy::{decide, Decision, Policy, RandomPolicy, Reason, RuleId, RulePolicy, RuleTable};
