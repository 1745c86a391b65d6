// rust/engine/src/engine/constants.rs
#![forbid(unsafe_code)]

/// Standard game-area shape reported by the emulator wrapper (rows x columns).
pub const ROWS: usize = 16;
pub const COLS: usize = 20;

/// Bottom row of the standard game area; the gap rules probe it for missing ground.
pub const GROUND_ROW: isize = 15;

/// Ticks an input is held when every hold in a plan is zero (the controller's act frequency).
pub const DEFAULT_ACT_FREQ: u32 = 5;

/**
 * Tile legend for the Super Mario Land game area.
 *
 * The codes are produced by the emulator wrapper's tile mapping and are opaque here:
 * nothing is derived from their numeric values, they are only compared for equality.
 */
pub mod tile {
    /// Background / air.
    pub const EMPTY: u8 = 0;
    /// The controlled avatar. Mario covers a 2x2 block; the top-left cell is the anchor.
    pub const PLAYER: u8 = 1;
    /// Walkable ground / ledge block.
    pub const LEDGE: u8 = 10;
    /// Top segment of a pipe.
    pub const PIPE_TOP: u8 = 14;
    /// Small walking enemy (Goomba-class); touching it from the side costs a life.
    pub const HAZARD: u8 = 15;
    /// Large enemy that cannot be jumped safely from close range.
    pub const LARGE_ENEMY: u8 = 18;
}
