// rust/mario_cli/src/main.rs
#![forbid(unsafe_code)]

mod replay;
mod rollout;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mario_engine::engine::ExecConfig;
use mario_engine::{HoldMode, Policy, RandomPolicy, RulePolicy, DEFAULT_ACT_FREQ};

use crate::replay::ReplayEnv;
use crate::rollout::{CycleSink, JsonResultSink, NoopSink, Runner, RunnerConfig, TableSink};

#[derive(Parser, Debug)]
#[command(name = "mario_cli")]
struct Args {
    // ---------------- environment ----------------
    /// Recorded game-area snapshots to replay (blank-line separated grid dumps).
    #[arg(long)]
    snapshots: PathBuf,

    /// Emulator ticks each recorded snapshot stays current.
    #[arg(long, default_value_t = 10)]
    ticks_per_snapshot: u64,

    /// Stop after N decision cycles. Omit to play until game over.
    #[arg(long)]
    max_cycles: Option<u64>,

    // ---------------- agent ----------------
    /// Policy: rules | random
    #[arg(long, default_value = "rules")]
    policy: String,

    /// RNG seed for --policy random.
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Ticks a press is held when the plan asks for 0; also the idle length of empty plans.
    #[arg(long, default_value_t = DEFAULT_ACT_FREQ)]
    act_freq: u32,

    /**
     * How holds apply to multi-action plans:
     *   plan-max    every action held for the plan's largest hold (shipped behavior)
     *   per-action  each action held for its own hold
     */
    #[arg(long, default_value = "plan-max")]
    hold_mode: String,

    // ---------------- output ----------------
    /// Directory receiving results.json and report.json.
    #[arg(long, default_value = "results")]
    results_path: PathBuf,

    /// Do not render the game area.
    #[arg(long)]
    headless: bool,

    /// Sleep between rendered frames, in ms (ignored with --headless).
    #[arg(long, value_name = "ms", default_value_t = 0)]
    render_ms: u64,

    /// Verbosity: 0=silent (final summary only), 1=progress bar, 2=progress bar + decision table.
    #[arg(long, default_value_t = 1)]
    verbosity: u8,
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbosity);

    let Some(hold_mode) = HoldMode::from_cli(&args.hold_mode) else {
        bail!("unknown --hold-mode '{}' (expected plan-max | per-action)", args.hold_mode);
    };

    // Policy instance (boxed so the CLI can switch implementations at runtime).
    let mut policy: Box<dyn Policy> = match args.policy.as_str() {
        "rules" | "expert" => Box::new(RulePolicy::default()),
        "random" => Box::new(RandomPolicy::new(args.seed)),
        other => bail!("unknown --policy '{other}' (expected rules | random)"),
    };

    let mut env = ReplayEnv::load(&args.snapshots, args.ticks_per_snapshot)
        .with_context(|| format!("loading {}", args.snapshots.display()))?;
    info!(snapshots = env.len(), path = %args.snapshots.display(), "replay loaded");

    // Rollout configuration (data only; no logic).
    let cfg = RunnerConfig {
        max_cycles: args.max_cycles,
        exec: ExecConfig {
            act_freq: args.act_freq,
            hold_mode,
        },
        verbosity: args.verbosity,
        render_ms: if args.headless {
            None
        } else {
            Some(args.render_ms)
        },
    };

    let cycle_sink: Box<dyn CycleSink> = if cfg.verbosity >= 2 {
        Box::new(TableSink::new(20))
    } else {
        Box::new(NoopSink)
    };
    let result_sink = Box::new(JsonResultSink::new(&args.results_path));

    let mut runner = Runner::new(cfg, cycle_sink, result_sink);
    let report = runner.run(&mut env, &mut *policy)?;
    info!(ticks = env.ticks(), inputs = env.inputs().len(), "replay finished");

    // Final one-line summary (useful for logs / grep).
    println!(
        "DONE: policy={} cycles={} noop_cycles={} ticks={} elapsed={:.3}s cycles/s={:.1} score={} lives={} world={} game_over={} results={}",
        report.policy,
        report.cycles,
        report.noop_cycles,
        report.ticks,
        report.elapsed_s,
        report.cycles_per_s,
        report.final_state.score,
        report.final_state.lives,
        report.final_state.world,
        report.game_over,
        args.results_path.display(),
    );

    Ok(())
}
