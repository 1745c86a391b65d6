// rust/mario_cli/src/rollout/runner.rs
#![forbid(unsafe_code)]

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use mario_engine::engine::{execute_plan, Environment, ExecConfig};
use mario_engine::Policy;

use super::sinks::{CycleRow, CycleSink, ResultSink};
use super::stats::{RunReport, RunStats};

/// Fixed internal cadence for progress-bar live message updates.
const LIVE_EVERY: u64 = 50;

#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Stop after this many decision cycles even if the episode is still running.
    pub max_cycles: Option<u64>,

    pub exec: ExecConfig,

    // ---------------- output ----------------
    /// 0 = final summary only
    /// 1 = progress bar
    /// 2 = progress bar + per-cycle table (via sink)
    pub verbosity: u8,

    /// Some(ms) when not headless: render the game area every cycle, sleeping ms between frames.
    pub render_ms: Option<u64>,
}

pub struct Runner {
    cfg: RunnerConfig,
    cycle_sink: Box<dyn CycleSink>,
    result_sink: Box<dyn ResultSink>,
}

impl Runner {
    pub fn new(
        cfg: RunnerConfig,
        cycle_sink: Box<dyn CycleSink>,
        result_sink: Box<dyn ResultSink>,
    ) -> Self {
        Self {
            cfg,
            cycle_sink,
            result_sink,
        }
    }

    /**
     * Play one episode: reset, then snapshot -> decide -> execute until the environment
     * reports game over (or `max_cycles` is reached). The final state goes to the result sink.
     */
    pub fn run<E: Environment>(
        &mut self,
        env: &mut E,
        policy: &mut dyn Policy,
    ) -> Result<RunReport> {
        let cfg = self.cfg.clone();

        // Progress bar is UI only; runner logic does not depend on it.
        let pb = if cfg.verbosity >= 1 {
            let pb = match cfg.max_cycles {
                Some(n) => ProgressBar::new(n),
                None => ProgressBar::new_spinner(),
            };
            pb.set_style(
                ProgressStyle::with_template(
                    "{spinner} {bar:40.cyan/blue} {pos:>7}  {elapsed_precise}  {msg}",
                )?
                .progress_chars("=>-"),
            );
            Some(pb)
        } else {
            None
        };

        let mut stats = RunStats::new();

        env.reset();
        info!(policy = policy.name(), hold_mode = ?cfg.exec.hold_mode, "episode start");

        while !env.is_game_over() {
            if cfg.max_cycles.is_some_and(|max| stats.cycles >= max) {
                info!(cycles = stats.cycles, "cycle limit reached");
                break;
            }

            let grid = env.game_area();
            let player = grid.find_player();
            let decision = policy.decide(&grid);

            debug!(
                cycle = stats.cycles,
                ?player,
                reason = ?decision.reason,
                actions = ?decision.plan.actions(),
                delays = ?decision.plan.delays(),
                "decision"
            );

            if let Some(ms) = cfg.render_ms {
                let banner = format!("cycle={} reason={:?}", stats.cycles, decision.reason);
                match pb {
                    Some(ref pb) => {
                        pb.println(banner);
                        pb.println(grid.render_ascii());
                    }
                    None => {
                        println!("{banner}");
                        print!("{}", grid.render_ascii());
                    }
                }
                if ms > 0 {
                    std::thread::sleep(Duration::from_millis(ms));
                }
            }

            let exec = execute_plan(env, &decision.plan, &cfg.exec);
            stats.on_cycle(&decision, &exec);

            if cfg.verbosity >= 2 {
                let row = CycleRow {
                    cycle: stats.cycles,
                    player,
                    reason: reason_label(&decision.reason),
                    actions: join(decision.plan.actions().iter().map(|a| a.name())),
                    holds: join(decision.plan.delays().iter().map(u32::to_string)),
                    ticks: exec.ticks,
                };
                self.cycle_sink.on_cycle(&row, pb.as_ref());
            }

            if let Some(ref pb) = pb {
                pb.inc(1);
                if stats.cycles % LIVE_EVERY == 0 {
                    pb.set_message(stats.live_msg());
                }
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        let final_state = env.game_state();
        info!(
            score = final_state.score,
            lives = final_state.lives,
            world = %final_state.world,
            x = final_state.x,
            "final stats"
        );

        let report = stats.final_report(
            policy.name(),
            &cfg.exec,
            final_state,
            env.is_game_over(),
        );
        self.result_sink.write(&report)?;
        Ok(report)
    }
}

fn reason_label(reason: &mario_engine::Reason) -> String {
    match reason {
        mario_engine::Reason::NoPlayer => "no_player".to_string(),
        mario_engine::Reason::Rule(id) => id.name().to_string(),
        mario_engine::Reason::Random => "random".to_string(),
    }
}

fn join<S: AsRef<str>>(parts: impl Iterator<Item = S>) -> String {
    let v: Vec<String> = parts.map(|s| s.as_ref().to_string()).collect();
    if v.is_empty() {
        "-".to_string()
    } else {
        v.join(",")
    }
}
