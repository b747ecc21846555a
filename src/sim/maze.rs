//! Maze storage and tile semantics
//!
//! The grid is fixed at ROWS x COLS and loaded wholesale from an authored
//! layout at level start. Nothing mutates wall tiles during play.

use serde::{Deserialize, Serialize};

use super::layouts::{Layout, layout_for_level};
use crate::Cell;
use crate::consts::{COLS, ROWS, TUNNEL_ROW};

/// What occupies a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Path,
    Wall,
    /// Reserved: not walkable, not drawn as a wall
    Blocked,
    /// A slowdown power-up drawn into the grid itself
    SlowPowerupOnMap,
}

impl TileKind {
    fn from_char(c: char) -> Self {
        match c {
            '#' => TileKind::Wall,
            'x' => TileKind::Blocked,
            's' => TileKind::SlowPowerupOnMap,
            _ => TileKind::Path,
        }
    }
}

/// The static maze for one level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    tiles: [[TileKind; COLS]; ROWS],
}

impl Default for Maze {
    fn default() -> Self {
        Self::for_level(1)
    }
}

impl Maze {
    /// Load the authored layout for a 1-based level (clamped to the last layout)
    pub fn for_level(level: u32) -> Self {
        Self::from_layout(layout_for_level(level))
    }

    /// Build a maze from ROWS strings of COLS characters.
    ///
    /// Missing characters read as walls so a short row can never open a hole
    /// in the border.
    pub fn from_layout(layout: &Layout) -> Self {
        let mut tiles = [[TileKind::Wall; COLS]; ROWS];
        for (y, row) in layout.iter().enumerate() {
            for (x, c) in row.chars().take(COLS).enumerate() {
                tiles[y][x] = TileKind::from_char(c);
            }
        }
        Self { tiles }
    }

    /// Whether a cell lies on the grid
    #[inline]
    pub fn in_bounds(cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < COLS && (cell.y as usize) < ROWS
    }

    /// Tile at an in-bounds cell. Callers resolve tunnel wrap first.
    #[inline]
    pub fn tile_at(&self, cell: Cell) -> TileKind {
        debug_assert!(Self::in_bounds(cell), "tile query off grid: {cell}");
        self.tiles[cell.y as usize][cell.x as usize]
    }

    /// Walkable for both the player and the pursuer
    #[inline]
    pub fn is_passable(&self, cell: Cell) -> bool {
        Self::in_bounds(cell)
            && matches!(
                self.tile_at(cell),
                TileKind::Path | TileKind::SlowPowerupOnMap
            )
    }

    /// Apply tunnel-row wraparound. Cells on any other row are returned unchanged.
    #[inline]
    pub fn resolve_wrap(cell: Cell) -> Cell {
        if cell.y != TUNNEL_ROW {
            return cell;
        }
        let x = if cell.x < 0 {
            COLS as i32 - 1
        } else if cell.x >= COLS as i32 {
            0
        } else {
            cell.x
        };
        Cell::new(x, cell.y)
    }

    /// Rows of tiles, top to bottom
    pub fn rows(&self) -> &[[TileKind; COLS]; ROWS] {
        &self.tiles
    }

    /// Every passable cell, row-major
    pub fn passable_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..ROWS as i32)
            .flat_map(|y| (0..COLS as i32).map(move |x| Cell::new(x, y)))
            .filter(|&c| self.is_passable(c))
    }
}
