// rust/mario_cli/src/rollout/stats.rs
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;

use mario_engine::engine::{ExecConfig, ExecReport, GameState};
use mario_engine::{Decision, HoldMode, Reason};

#[derive(Clone, Debug)]
pub struct RunStats {
    pub cycles: u64,
    /// Cycles where no player was visible and the agent idled.
    pub noop_cycles: u64,
    pub ticks: u64,
    pub presses: u64,

    pub action_counts: BTreeMap<String, u64>,
    pub rule_hits: BTreeMap<String, u64>,

    t0: Instant,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            cycles: 0,
            noop_cycles: 0,
            ticks: 0,
            presses: 0,
            action_counts: BTreeMap::new(),
            rule_hits: BTreeMap::new(),
            t0: Instant::now(),
        }
    }

    /// Call once per decision cycle, after the plan has been executed.
    pub fn on_cycle(&mut self, decision: &Decision, exec: &ExecReport) {
        self.cycles += 1;
        self.ticks += exec.ticks;
        self.presses += u64::from(exec.presses);

        match decision.reason {
            Reason::NoPlayer => self.noop_cycles += 1,
            Reason::Rule(id) => *self.rule_hits.entry(id.name().to_string()).or_default() += 1,
            Reason::Random => {}
        }

        for a in decision.plan.actions() {
            *self.action_counts.entry(a.name().to_string()).or_default() += 1;
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.t0.elapsed().as_secs_f64()
    }

    pub fn cycles_per_sec(&self) -> f64 {
        let dt = self.elapsed_secs();
        if dt > 0.0 {
            self.cycles as f64 / dt
        } else {
            0.0
        }
    }

    pub fn avg_ticks_per_cycle(&self) -> f64 {
        if self.cycles > 0 {
            self.ticks as f64 / self.cycles as f64
        } else {
            0.0
        }
    }

    pub fn live_msg(&self) -> String {
        format!(
            "cps={:.1} ticks={} noop={} ticks/cycle={:.1}",
            self.cycles_per_sec(),
            self.ticks,
            self.noop_cycles,
            self.avg_ticks_per_cycle(),
        )
    }

    pub fn final_report(
        &self,
        policy_name: &str,
        exec: &ExecConfig,
        final_state: GameState,
        game_over: bool,
    ) -> RunReport {
        RunReport {
            policy: policy_name.to_string(),
            act_freq: exec.act_freq,
            hold_mode: exec.hold_mode,

            cycles: self.cycles,
            noop_cycles: self.noop_cycles,
            ticks: self.ticks,
            presses: self.presses,
            avg_ticks_per_cycle: self.avg_ticks_per_cycle(),
            elapsed_s: self.elapsed_secs(),
            cycles_per_s: self.cycles_per_sec(),

            action_counts: self.action_counts.clone(),
            rule_hits: self.rule_hits.clone(),

            game_over,
            final_state,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub policy: String,
    pub act_freq: u32,
    pub hold_mode: HoldMode,

    pub cycles: u64,
    pub noop_cycles: u64,
    pub ticks: u64,
    pub presses: u64,
    pub avg_ticks_per_cycle: f64,
    pub elapsed_s: f64,
    pub cycles_per_s: f64,

    pub action_counts: BTreeMap<String, u64>,
    pub rule_hits: BTreeMap<String, u64>,

    pub game_over: bool,
    pub final_state: GameState,
}
