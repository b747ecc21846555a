//! Player movement and pickup resolution

use serde::{Deserialize, Serialize};

use super::maze::Maze;
use super::state::{Direction, GameEvent, GamePhase, GameSession, Scheduler};
use crate::offset;

/// Result of a move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Not playing; nothing happened
    Ignored,
    /// Target cell is a wall or off the grid
    Blocked,
    Moved,
    MovedAndCollected,
    /// Picked up the last collectible
    MovedAndLeveledUp,
    MovedAndPoweredUp,
}

impl GameSession {
    /// Try to step the player one cell in `dir`
    pub fn attempt_move(&mut self, dir: Direction, sched: &mut impl Scheduler) -> MoveOutcome {
        if self.phase != GamePhase::Playing {
            return MoveOutcome::Ignored;
        }

        let target = Maze::resolve_wrap(offset(self.level.player, dir));
        if !self.maze.is_passable(target) {
            return MoveOutcome::Blocked;
        }
        self.level.player = target;

        if self.level.take_collectible(target) {
            self.level.score += 1;
            log::info!(
                "Collected Cheese! Level Score: {} (Current Total: {})",
                self.level.score,
                self.display_score()
            );
            self.difficulty
                .on_collected(self.level.collected(), self.level.initial_collectibles);

            let remaining = self.level.collectibles.len();
            self.push_event(GameEvent::CollectiblePicked {
                cell: target,
                remaining,
            });
            if remaining == 0 {
                self.complete_level(sched);
                return MoveOutcome::MovedAndLeveledUp;
            }
            return MoveOutcome::MovedAndCollected;
        }

        if !self.difficulty.slowed
            && let Some(powerup) = self.level.take_powerup(target)
        {
            log::info!("Powerup Collected: Cat Slowdown!");
            self.difficulty.activate_slowdown();
            self.push_event(GameEvent::PowerUpPicked {
                cell: target,
                kind: powerup.kind,
            });
            return MoveOutcome::MovedAndPoweredUp;
        }

        MoveOutcome::Moved
    }
}
