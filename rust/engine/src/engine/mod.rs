// rust/engine/src/engine/mod.rs
#![forbid(unsafe_code)]

mod action;
mod constants;
mod env;
mod grid;
mod plan;

/**
 * Curated engine public API.
 *
 * Internal implementation modules remain private; only stable items are re-exported here.
 */
pub use action::{Action, Signal, ACTION_DIM};
pub use constants::{tile, COLS, DEFAULT_ACT_FREQ, GROUND_ROW, ROWS};
pub use env::{
    execute_plan, Environment, ExecConfig, ExecReport, GameState, InputSink, Lifecycle,
    SnapshotProvider,
};
pub use grid::{GridError, TileGrid};
pub use plan::{ActionPlan, HoldMode, PlannedAction};
