//! Read-only view of a session for presentation
//!
//! A `Scene` holds everything a renderer needs for one frame, including the
//! HUD and overlay text for the current phase. Building one never mutates the
//! session.

use serde::Serialize;

use super::level::PowerUpKind;
use super::maze::TileKind;
use super::state::{GamePhase, GameSession};
use crate::Cell;

pub const GAME_TITLE: &str = "Cat and Mouse - The Grand Chase!";
pub const CREDIT: &str = "Mohamed Naeem";
pub const CREDIT_HANDLE: &str = "Naeemx7";

const INSTRUCTIONS: [&str; 7] = [
    "--- INSTRUCTIONS ---",
    "WASD or Arrow Keys to Move",
    "P to Pause / Resume",
    "R to Reset Game",
    "ESC to Quit",
    "Collect all the cheese to advance, Avoid the cat it gets faster !",
    "Blue items will temporarily slow the cat down.",
];

/// A power-up as drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerUpView {
    pub cell: Cell,
    pub kind: PowerUpKind,
    /// Sparkle phase in radians
    pub phase: f32,
}

/// Full-screen text drawn over (or instead of) the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overlay {
    pub title: String,
    pub subtitle: Option<String>,
    /// Extra lines below the subtitle (action prompt, instructions)
    pub lines: Vec<String>,
}

impl Overlay {
    fn new(title: impl Into<String>, subtitle: Option<String>, lines: &[&str]) -> Self {
        Self {
            title: title.into(),
            subtitle,
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Heads-up display, shown only while playing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hud {
    /// "Level: L   Total Score: T"
    pub left: String,
    /// "Cheese Left: N"
    pub right: String,
    /// "SLOWED!" while the slowdown is running
    pub center: Option<String>,
}

/// Board contents (Playing and Paused only)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    pub tiles: Vec<Vec<TileKind>>,
    pub player: Cell,
    pub pursuer: Cell,
    pub collectibles: Vec<Cell>,
    pub powerups: Vec<PowerUpView>,
}

/// One frame's worth of presentation state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub phase: GamePhase,
    pub level: u32,
    pub level_score: u32,
    pub total_score: u32,
    pub collectibles_left: usize,
    pub slowed: bool,
    pub pursuer_delay_ms: u64,
    pub board: Option<Board>,
    pub hud: Option<Hud>,
    pub overlay: Option<Overlay>,
}

impl GameSession {
    /// Snapshot the session for drawing
    pub fn scene(&self) -> Scene {
        let board = self.phase.shows_board().then(|| Board {
            tiles: self.maze.rows().iter().map(|row| row.to_vec()).collect(),
            player: self.level.player,
            pursuer: self.level.pursuer,
            collectibles: self.level.collectibles.clone(),
            powerups: self
                .level
                .powerups
                .iter()
                .map(|p| PowerUpView {
                    cell: p.cell,
                    kind: p.kind,
                    phase: p.phase,
                })
                .collect(),
        });

        let hud = (self.phase == GamePhase::Playing).then(|| Hud {
            left: format!(
                "Level: {}   Total Score: {}",
                self.run.level,
                self.display_score()
            ),
            right: format!("Cheese Left: {}", self.level.collectibles.len()),
            center: self.difficulty.slowed.then(|| "SLOWED!".to_string()),
        });

        Scene {
            phase: self.phase,
            level: self.run.level,
            level_score: self.level.score,
            total_score: self.run.total_score,
            collectibles_left: self.level.collectibles.len(),
            slowed: self.difficulty.slowed,
            pursuer_delay_ms: self.difficulty.current_delay_ms,
            board,
            hud,
            overlay: self.overlay(),
        }
    }

    fn overlay(&self) -> Option<Overlay> {
        let total = self.run.total_score;
        let overlay = match self.phase {
            GamePhase::Playing => return None,
            GamePhase::Intro => Overlay::new("A Game By", Some(CREDIT.to_string()), &[]),
            GamePhase::StartMenu => {
                let mut menu = Overlay::new(
                    GAME_TITLE,
                    Some("Press ENTER to Start".to_string()),
                    &INSTRUCTIONS,
                );
                menu.lines.push(format!("Game by {CREDIT}"));
                menu.lines.push(format!("GitHub: {CREDIT_HANDLE}"));
                menu
            }
            GamePhase::Paused => Overlay::new("PAUSED", Some("Press 'P' to Resume".into()), &[]),
            GamePhase::GameOver => Overlay::new(
                "GAME OVER!",
                Some(format!("Final Score: {total}")),
                &["Press 'R' to Restart"],
            ),
            // The level counter has already moved on
            GamePhase::LevelWon => Overlay::new(
                format!("LEVEL {} COMPLETE!", self.run.level.saturating_sub(1)),
                Some(format!("Total Score: {total}")),
                &["Loading next level..."],
            ),
            GamePhase::FinalWon => Overlay::new(
                "YOU BEAT THE GAME!",
                Some(format!("Grand Total Score: {total}")),
                &["Press ESC to Quit"],
            ),
        };
        Some(overlay)
    }
}

impl Scene {
    /// Plain-text board: `#` wall, `x` blocked, `M` player, `C` pursuer,
    /// `o` collectible, `*` power-up. None when the board isn't shown.
    pub fn ascii_board(&self) -> Option<String> {
        let board = self.board.as_ref()?;
        let mut out = String::new();
        for (y, row) in board.tiles.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                let cell = Cell::new(x as i32, y as i32);
                let c = if cell == board.pursuer {
                    'C'
                } else if cell == board.player {
                    'M'
                } else if board.collectibles.contains(&cell) {
                    'o'
                } else if board.powerups.iter().any(|p| p.cell == cell) {
                    '*'
                } else {
                    match tile {
                        TileKind::Wall => '#',
                        TileKind::Blocked => 'x',
                        TileKind::SlowPowerupOnMap => 's',
                        TileKind::Path => ' ',
                    }
                };
                out.push(c);
            }
            out.push('\n');
        }
        Some(out)
    }
}
