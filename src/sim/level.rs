//! Per-level entities and item placement
//!
//! Collectibles and power-ups are scattered by rejection sampling with a
//! bounded number of attempts. Running out of attempts is not an error: the
//! level just starts with fewer items and the report says so.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::maze::{Maze, TileKind};
use crate::Cell;
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Freezes the pursuer for a while
    #[default]
    Slowdown,
}

/// A power-up lying in the maze
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub cell: Cell,
    pub kind: PowerUpKind,
    /// Sparkle animation phase (radians, presentation only)
    pub phase: f32,
}

impl PowerUp {
    pub fn new(cell: Cell, kind: PowerUpKind) -> Self {
        Self {
            cell,
            kind,
            phase: 0.0,
        }
    }
}

/// How many items to place and how hard to try
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementPlan {
    pub collectibles: usize,
    pub powerups: usize,
    /// Attempt cap for each item kind
    pub max_attempts: usize,
}

impl Default for PlacementPlan {
    fn default() -> Self {
        Self {
            collectibles: COLLECTIBLES_PER_LEVEL,
            powerups: POWERUPS_PER_LEVEL,
            max_attempts: ROWS * COLS * PLACEMENT_ATTEMPTS_PER_CELL,
        }
    }
}

/// What placement actually achieved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlacementReport {
    pub collectibles_requested: usize,
    pub collectibles_placed: usize,
    pub powerups_requested: usize,
    pub powerups_placed: usize,
}

impl PlacementReport {
    /// Everything requested was placed
    pub fn is_complete(&self) -> bool {
        self.collectibles_placed == self.collectibles_requested
            && self.powerups_placed == self.powerups_requested
    }
}

/// Mutable entities for the level in progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelState {
    pub player: Cell,
    pub pursuer: Cell,
    /// Remaining collectibles (unique cells, placement order)
    pub collectibles: Vec<Cell>,
    /// Remaining power-ups (never sharing a cell with a collectible)
    pub powerups: Vec<PowerUp>,
    /// Collectibles gathered this level
    pub score: u32,
    /// Collectibles placed at level start
    pub initial_collectibles: usize,
}

impl Default for LevelState {
    fn default() -> Self {
        Self::empty()
    }
}

impl LevelState {
    /// Both actors on their start cells, nothing placed
    pub fn empty() -> Self {
        Self {
            player: PLAYER_START,
            pursuer: PURSUER_START,
            collectibles: Vec::new(),
            powerups: Vec::new(),
            score: 0,
            initial_collectibles: 0,
        }
    }

    /// Fresh level: actors on start cells, items scattered over open path tiles
    pub fn populate<R: Rng + ?Sized>(
        maze: &Maze,
        plan: &PlacementPlan,
        rng: &mut R,
    ) -> (Self, PlacementReport) {
        let mut level = Self::empty();
        let mut report = PlacementReport {
            collectibles_requested: plan.collectibles,
            powerups_requested: plan.powerups,
            ..Default::default()
        };

        let mut attempts = 0;
        while level.collectibles.len() < plan.collectibles && attempts < plan.max_attempts {
            attempts += 1;
            let cell = random_cell(rng);
            if level.can_place(maze, cell) {
                level.collectibles.push(cell);
            }
        }
        report.collectibles_placed = level.collectibles.len();

        attempts = 0;
        while level.powerups.len() < plan.powerups && attempts < plan.max_attempts {
            attempts += 1;
            let cell = random_cell(rng);
            if level.can_place(maze, cell) {
                level.powerups.push(PowerUp::new(cell, PowerUpKind::Slowdown));
            }
        }
        report.powerups_placed = level.powerups.len();

        level.initial_collectibles = level.collectibles.len();

        if report.collectibles_placed < report.collectibles_requested {
            log::warn!(
                "Could only place {} of {} cheese",
                report.collectibles_placed,
                report.collectibles_requested
            );
        }
        if report.powerups_placed < report.powerups_requested {
            log::warn!(
                "Could only place {} of {} powerups",
                report.powerups_placed,
                report.powerups_requested
            );
        }

        (level, report)
    }

    /// Open path tile, not a start cell, not already holding an item
    fn can_place(&self, maze: &Maze, cell: Cell) -> bool {
        maze.tile_at(cell) == TileKind::Path
            && cell != PLAYER_START
            && cell != PURSUER_START
            && !self.has_collectible(cell)
            && self.powerup_at(cell).is_none()
    }

    pub fn has_collectible(&self, cell: Cell) -> bool {
        self.collectibles.contains(&cell)
    }

    pub fn powerup_at(&self, cell: Cell) -> Option<&PowerUp> {
        self.powerups.iter().find(|p| p.cell == cell)
    }

    /// Remove the collectible at `cell`, if any
    pub fn take_collectible(&mut self, cell: Cell) -> bool {
        match self.collectibles.iter().position(|&c| c == cell) {
            Some(i) => {
                self.collectibles.remove(i);
                true
            }
            None => false,
        }
    }

    /// Remove and return the power-up at `cell`, if any
    pub fn take_powerup(&mut self, cell: Cell) -> Option<PowerUp> {
        let i = self.powerups.iter().position(|p| p.cell == cell)?;
        Some(self.powerups.remove(i))
    }

    /// Collectibles gathered so far this level
    pub fn collected(&self) -> usize {
        self.initial_collectibles - self.collectibles.len()
    }

    /// Advance power-up sparkle phases
    pub fn animate_powerups(&mut self, elapsed_ms: u64) {
        let tau = std::f32::consts::TAU;
        for p in &mut self.powerups {
            p.phase += elapsed_ms as f32 * SPARKLE_RATE;
            if p.phase > tau {
                p.phase = p.phase.rem_euclid(tau);
            }
        }
    }
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R) -> Cell {
    Cell::new(
        rng.random_range(0..COLS as i32),
        rng.random_range(0..ROWS as i32),
    )
}
