//! Cat Chase - A cat-and-mouse maze chase
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze, pathfinding, difficulty, game flow)
//! - `platform`: Host collaborators (clock, timer queue, key mapping, event pump)
//! - `settings`: Data-driven game balance

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::IVec2;

/// Grid cell as (column, row). Rows grow downward.
pub type Cell = IVec2;

/// Game configuration constants
pub mod consts {
    use glam::IVec2;

    /// Maze dimensions (every authored layout is this size)
    pub const ROWS: usize = 23;
    pub const COLS: usize = 23;
    /// Row whose left and right edges wrap into each other
    pub const TUNNEL_ROW: i32 = 11;

    /// Start cells
    pub const PLAYER_START: IVec2 = IVec2::new(1, 1);
    pub const PURSUER_START: IVec2 = IVec2::new(11, 11);

    /// Levels in a full run
    pub const MAX_LEVELS: u32 = 3;
    /// Items placed at level start
    pub const COLLECTIBLES_PER_LEVEL: usize = 12;
    pub const POWERUPS_PER_LEVEL: usize = 1;
    /// Placement attempts per grid cell before giving up
    pub const PLACEMENT_ATTEMPTS_PER_CELL: usize = 10;

    /// Pursuer tick interval at zero progress (ms)
    pub const INITIAL_PURSUER_DELAY_MS: u64 = 350;
    /// Fastest pursuer tick interval (ms)
    pub const MIN_PURSUER_DELAY_MS: u64 = 150;
    /// Upper bound accepted for configured delays and penalties (ms)
    pub const MAX_PURSUER_DELAY_MS: u64 = 60_000;
    /// Added on top of the initial delay while slowed (ms)
    pub const SLOWDOWN_PENALTY_MS: u64 = 100;
    /// How long the slowdown power-up lasts (ms)
    pub const SLOWDOWN_DURATION_MS: u64 = 5000;

    /// Intro screen auto-dismiss (ms)
    pub const INTRO_DELAY_MS: u64 = 3500;
    /// Pause on the "level complete" screen (ms)
    pub const LEVEL_TRANSITION_MS: u64 = 2000;

    /// Power-up sparkle speed (radians per ms)
    pub const SPARKLE_RATE: f32 = 0.005;
}

/// Step a cell one unit in `dir` without any wrapping
#[inline]
pub fn offset(cell: Cell, dir: sim::Direction) -> Cell {
    cell + dir.delta()
}

