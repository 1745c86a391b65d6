// rust/engine/src/engine/grid.rs
#![forbid(unsafe_code)]

use thiserror::Error;

use crate::engine::constants::{tile, COLS, ROWS};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("tile grid has no cells")]
    Empty,
    #[error("row {row} has {actual} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("tile code {value} at row {row} does not fit in a byte")]
    TileOutOfRange { row: usize, value: u64 },
    #[error("unparsable token {token:?} at row {row}")]
    BadToken { row: usize, token: String },
}

/// Snapshot of the visible play-field: a rectangular, row-major grid of tile codes.
///
/// Produced fresh for every decision and never mutated by policies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::empty(ROWS, COLS)
    }
}

impl TileGrid {
    /// All-background grid of the given shape.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![tile::EMPTY; rows * cols],
        }
    }

    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, GridError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::Ragged {
                    row: r,
                    expected: cols,
                    actual: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /**
     * Parse a text dump of a game area.
     *
     * One grid row per non-empty line, cells separated by whitespace. Brackets and commas are
     * ignored, so both a printed numpy array and a plain whitespace table are accepted.
     */
    pub fn parse(text: &str) -> Result<Self, GridError> {
        let mut rows: Vec<Vec<u8>> = Vec::new();

        for line in text.lines() {
            let cleaned: String = line
                .chars()
                .map(|ch| if matches!(ch, '[' | ']' | ',') { ' ' } else { ch })
                .collect();
            if cleaned.trim().is_empty() {
                continue;
            }

            let r = rows.len();
            let mut row = Vec::new();
            for token in cleaned.split_whitespace() {
                let value: u64 = token.parse().map_err(|_| GridError::BadToken {
                    row: r,
                    token: token.to_string(),
                })?;
                let code = u8::try_from(value)
                    .map_err(|_| GridError::TileOutOfRange { row: r, value })?;
                row.push(code);
            }
            rows.push(row);
        }

        if rows.is_empty() {
            return Err(GridError::Empty);
        }
        Self::from_rows(rows)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Bounds-checked lookup. Anything outside the grid is `None`, including negative indices.
    #[inline]
    pub fn get(&self, row: isize, col: isize) -> Option<u8> {
        if row < 0 || col < 0 {
            return None;
        }
        let (r, c) = (row as usize, col as usize);
        if r >= self.rows || c >= self.cols {
            return None;
        }
        Some(self.cells[r * self.cols + c])
    }

    /// Panics on out-of-range coordinates; fixture builders only.
    pub fn set(&mut self, row: usize, col: usize, code: u8) {
        assert!(row < self.rows && col < self.cols, "({row}, {col}) outside grid");
        self.cells[row * self.cols + col] = code;
    }

    pub fn row(&self, r: usize) -> Option<&[u8]> {
        if r >= self.rows {
            return None;
        }
        Some(&self.cells[r * self.cols..(r + 1) * self.cols])
    }

    /// First cell holding the player code, scanning rows top to bottom and columns left to right.
    pub fn find_player(&self) -> Option<(usize, usize)> {
        let idx = self.cells.iter().position(|&v| v == tile::PLAYER)?;
        Some((idx / self.cols, idx % self.cols))
    }

    pub fn render_ascii(&self) -> String {
        let mut s = String::with_capacity((self.cols + 3) * (self.rows + 2));
        let border = format!("+{}+\n", "-".repeat(self.cols));
        s.push_str(&border);
        for r in 0..self.rows {
            s.push('|');
            for c in 0..self.cols {
                s.push(glyph(self.cells[r * self.cols + c]));
            }
            s.push_str("|\n");
        }
        s.push_str(&border);
        s
    }
}

fn glyph(code: u8) -> char {
    match code {
        tile::EMPTY => ' ',
        tile::PLAYER => 'M',
        tile::LEDGE => '#',
        tile::PIPE_TOP => 'T',
        tile::HAZARD => 'g',
        tile::LARGE_ENEMY => 'K',
        _ => '?',
    }
}
