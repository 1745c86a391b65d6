// rust/mario_cli/src/rollout/sinks.rs
#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::stats::RunReport;

/// One per-cycle row emitted by the runner.
///
/// Transport struct: runner computes fields, sinks only format/emit.
#[derive(Clone, Debug)]
pub struct CycleRow {
    pub cycle: u64,
    pub player: Option<(usize, usize)>,
    pub reason: String,
    pub actions: String,
    pub holds: String,
    pub ticks: u64,
}

/// Sink interface for per-cycle reporting.
pub trait CycleSink {
    fn on_cycle(&mut self, row: &CycleRow, pb: Option<&indicatif::ProgressBar>);
}

/// Default sink: does nothing.
#[derive(Default)]
pub struct NoopSink;

impl CycleSink for NoopSink {
    fn on_cycle(&mut self, _row: &CycleRow, _pb: Option<&indicatif::ProgressBar>) {}
}

/// Human-readable decision table.
pub struct TableSink {
    header_every: u64,
    rows_printed: u64,
}

impl TableSink {
    const DEFAULT_HEADER_EVERY: u64 = 20;

    /// If `header_every == 0`, a reasonable default is used.
    pub fn new(header_every: u64) -> Self {
        Self {
            header_every: if header_every == 0 {
                Self::DEFAULT_HEADER_EVERY
            } else {
                header_every
            },
            rows_printed: 0,
        }
    }

    fn header_line(&self) -> String {
        // keep widths aligned with row_line()
        format!(
            "{:>8} {:>9} {:<20} {:<14} {:<10} {:>6}",
            "cycle", "player", "reason", "actions", "holds", "ticks",
        )
    }

    fn sep_line(&self) -> String {
        "-".repeat(self.header_line().len())
    }

    fn row_line(&self, r: &CycleRow) -> String {
        let player = match r.player {
            Some((row, col)) => format!("{row},{col}"),
            None => "-".to_string(),
        };
        format!(
            "{:>8} {:>9} {:<20} {:<14} {:<10} {:>6}",
            r.cycle, player, r.reason, r.actions, r.holds, r.ticks,
        )
    }
}

impl CycleSink for TableSink {
    fn on_cycle(&mut self, row: &CycleRow, pb: Option<&indicatif::ProgressBar>) {
        let mut lines: Vec<String> = Vec::new();

        if self.rows_printed % self.header_every == 0 {
            lines.push(self.header_line());
            lines.push(self.sep_line());
        }

        lines.push(self.row_line(row));
        self.rows_printed += 1;

        if let Some(pb) = pb {
            for l in lines {
                pb.println(l);
            }
        } else {
            for l in lines {
                println!("{l}");
            }
        }
    }
}

/// End-of-run destination for the results record.
pub trait ResultSink {
    fn write(&mut self, report: &RunReport) -> Result<()>;
}

impl ResultSink for NoopSink {
    fn write(&mut self, _report: &RunReport) -> Result<()> {
        Ok(())
    }
}

/// Writes `results.json` (final game state) and `report.json` (run statistics) into a
/// results directory, creating it if needed.
pub struct JsonResultSink {
    dir: PathBuf,
}

impl JsonResultSink {
    pub const RESULTS_FILE: &'static str = "results.json";
    pub const REPORT_FILE: &'static str = "report.json";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ResultSink for JsonResultSink {
    fn write(&mut self, report: &RunReport) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed creating directory {}", self.dir.display()))?;
        write_json(&self.dir.join(Self::RESULTS_FILE), &report.final_state)?;
        write_json(&self.dir.join(Self::REPORT_FILE), report)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let encoded = serde_json::to_vec_pretty(value)?;
    fs::write(path, encoded).with_context(|| format!("failed writing {}", path.display()))
}
