// rust/engine/src/engine/env.rs
#![forbid(unsafe_code)]

use serde::Serialize;

use crate::engine::action::Signal;
use crate::engine::constants::DEFAULT_ACT_FREQ;
use crate::engine::grid::TileGrid;
use crate::engine::plan::{ActionPlan, HoldMode};

/// Structured game-state record reported by the emulator wrapper.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GameState {
    pub score: u64,
    pub lives: i32,
    pub x: i32,
    pub y: i32,
    pub world: String,
    pub time_left: u32,
}

/// Read side of the emulator: fresh snapshots on demand.
pub trait SnapshotProvider {
    fn game_area(&self) -> TileGrid;
    fn game_state(&self) -> GameState;
}

/// Write side of the emulator: input events and single-tick stepping.
pub trait InputSink {
    fn send_input(&mut self, signal: Signal);
    fn tick(&mut self);
}

pub trait Lifecycle {
    fn reset(&mut self);
    fn is_game_over(&self) -> bool;
}

/// Everything the driver needs from an emulator.
pub trait Environment: SnapshotProvider + InputSink + Lifecycle {}

impl<T: SnapshotProvider + InputSink + Lifecycle> Environment for T {}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct ExecConfig {
    /// Floor hold in ticks, used when a hold resolves to 0 and for idle cycles.
    pub act_freq: u32,
    pub hold_mode: HoldMode,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            act_freq: DEFAULT_ACT_FREQ,
            hold_mode: HoldMode::PlanMax,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ExecReport {
    pub presses: u32,
    pub releases: u32,
    pub ticks: u64,
}

/**
 * Run one plan against the input sink.
 *
 * Presses each action in order and ticks its effective hold; once every action has been
 * pressed, releases them all in plan order. So earlier presses stay held while later ones
 * run, as the original controller does.
 *
 * An empty plan presses nothing but still ticks `act_freq` times, otherwise a driver whose
 * player is off-screen (death animation, level transition) would never advance the emulator.
 */
pub fn execute_plan<E: InputSink + ?Sized>(
    env: &mut E,
    plan: &ActionPlan,
    cfg: &ExecConfig,
) -> ExecReport {
    let mut report = ExecReport::default();

    if plan.is_empty() {
        for _ in 0..cfg.act_freq {
            env.tick();
        }
        report.ticks = u64::from(cfg.act_freq);
        return report;
    }

    let holds = plan.hold_ticks(cfg.hold_mode, cfg.act_freq);

    for (step, ticks) in plan.steps().iter().zip(holds) {
        env.send_input(step.action.press());
        report.presses += 1;
        for _ in 0..ticks {
            env.tick();
        }
        report.ticks += u64::from(ticks);
    }

    for step in plan.steps() {
        env.send_input(step.action.release());
        report.releases += 1;
    }

    report
}
