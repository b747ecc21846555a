//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time comes in from the host as plain milliseconds
//! - Stable iteration order (placement order, fixed BFS neighbor order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod difficulty;
pub mod flow;
pub mod input;
pub mod layouts;
pub mod level;
pub mod maze;
pub mod pathfind;
pub mod snapshot;
pub mod state;

pub use autopilot::suggest_move;
pub use difficulty::{DifficultyModel, SpeedCurve};
pub use input::MoveOutcome;
pub use level::{LevelState, PlacementPlan, PlacementReport, PowerUp, PowerUpKind};
pub use maze::{Maze, TileKind};
pub use pathfind::{PathResult, distance_map, next_step};
pub use snapshot::{Board, Hud, Overlay, PowerUpView, Scene};
pub use state::{
    Control, Direction, GameEvent, GamePhase, GameSession, InputEvent, RunState, Scheduler,
    SessionEpoch, Timer, TimerEvent,
};
