// rust/mario_cli/src/replay.rs
#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use mario_engine::engine::{GameState, InputSink, Lifecycle, SnapshotProvider};
use mario_engine::{GridError, Signal, TileGrid};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed reading {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot {block}: {source}")]
    Grid {
        block: usize,
        #[source]
        source: GridError,
    },
    #[error("snapshot {block}: bad state entry {entry:?}")]
    BadState { block: usize, entry: String },
    #[error("no snapshots found")]
    Empty,
}

#[derive(Clone, Debug)]
pub struct Snapshot {
    pub grid: TileGrid,
    pub state: GameState,
}

/**
 * Parse a snapshot recording.
 *
 * Blocks are separated by blank lines. Each block is a grid dump, optionally preceded by
 * `# key=value ...` lines updating the game state (`score`, `lives`, `x`, `y`, `world`,
 * `time`). State carries over from the previous block, so only changes need to be written.
 */
pub fn parse_snapshots(text: &str) -> Result<Vec<Snapshot>, SnapshotError> {
    let mut out = Vec::new();
    let mut state = GameState::default();
    let mut block: Vec<&str> = Vec::new();

    let mut lines = text.lines().peekable();
    while let Some(line) = lines.next() {
        if !line.trim().is_empty() {
            block.push(line);
        }
        let at_end = lines.peek().is_none();
        if (line.trim().is_empty() || at_end) && !block.is_empty() {
            out.push(parse_block(out.len(), &block, &mut state)?);
            block.clear();
        }
    }

    if out.is_empty() {
        return Err(SnapshotError::Empty);
    }
    Ok(out)
}

fn parse_block(
    idx: usize,
    lines: &[&str],
    state: &mut GameState,
) -> Result<Snapshot, SnapshotError> {
    let mut grid_text = String::new();

    for line in lines {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix('#') {
            for entry in rest.split_whitespace() {
                apply_state_entry(state, entry).ok_or_else(|| SnapshotError::BadState {
                    block: idx,
                    entry: entry.to_string(),
                })?;
            }
        } else {
            grid_text.push_str(trimmed);
            grid_text.push('\n');
        }
    }

    let grid = TileGrid::parse(&grid_text).map_err(|source| SnapshotError::Grid {
        block: idx,
        source,
    })?;

    Ok(Snapshot {
        grid,
        state: state.clone(),
    })
}

fn apply_state_entry(state: &mut GameState, entry: &str) -> Option<()> {
    let (key, value) = entry.split_once('=')?;
    match key {
        "score" => state.score = value.parse().ok()?,
        "lives" => state.lives = value.parse().ok()?,
        "x" => state.x = value.parse().ok()?,
        "y" => state.y = value.parse().ok()?,
        "world" => state.world = value.to_string(),
        "time" => state.time_left = value.parse().ok()?,
        _ => return None,
    }
    Some(())
}

/**
 * Emulator stand-in that replays recorded game areas.
 *
 * Time only moves with `tick()`: snapshot `i` is current for ticks
 * `[i * ticks_per_snapshot, (i + 1) * ticks_per_snapshot)`. The episode is over once the
 * clock runs past the last snapshot.
 */
pub struct ReplayEnv {
    snapshots: Vec<Snapshot>,
    ticks_per_snapshot: u64,
    ticks: u64,
    inputs: Vec<Signal>,
}

impl ReplayEnv {
    pub fn new(snapshots: Vec<Snapshot>, ticks_per_snapshot: u64) -> Result<Self, SnapshotError> {
        if snapshots.is_empty() {
            return Err(SnapshotError::Empty);
        }
        Ok(Self {
            snapshots,
            ticks_per_snapshot: ticks_per_snapshot.max(1),
            ticks: 0,
            inputs: Vec::new(),
        })
    }

    pub fn load(path: &Path, ticks_per_snapshot: u64) -> Result<Self, SnapshotError> {
        let text = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(parse_snapshots(&text)?, ticks_per_snapshot)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Every signal sent since the last reset, in order.
    pub fn inputs(&self) -> &[Signal] {
        &self.inputs
    }

    fn position(&self) -> usize {
        (self.ticks / self.ticks_per_snapshot) as usize
    }

    fn current(&self) -> &Snapshot {
        let last = self.snapshots.len() - 1;
        &self.snapshots[self.position().min(last)]
    }
}

impl SnapshotProvider for ReplayEnv {
    fn game_area(&self) -> TileGrid {
        self.current().grid.clone()
    }

    fn game_state(&self) -> GameState {
        self.current().state.clone()
    }
}

impl InputSink for ReplayEnv {
    fn send_input(&mut self, signal: Signal) {
        self.inputs.push(signal);
    }

    fn tick(&mut self) {
        self.ticks += 1;
    }
}

impl Lifecycle for ReplayEnv {
    fn reset(&mut self) {
        self.ticks = 0;
        self.inputs.clear();
    }

    fn is_game_over(&self) -> bool {
        self.position() >= self.snapshots.len()
    }
}
