//! Game session and core simulation types
//!
//! Everything that changes during a run lives in one `GameSession` owned by
//! the host loop. Components receive it by reference; there is no global state.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyModel;
use super::level::{LevelState, PlacementReport, PowerUpKind};
use super::maze::Maze;
use crate::Cell;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Credits screen, dismissed by any key or a timeout
    Intro,
    /// Title and instructions
    StartMenu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Caught by the pursuer
    GameOver,
    /// Level cleared, next one loads after a short delay
    LevelWon,
    /// Every level cleared
    FinalWon,
}

impl GamePhase {
    /// Maze, actors and items are on screen
    pub fn shows_board(&self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::Paused)
    }
}

/// Four-way movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit offset in grid space (rows grow downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }
}

/// Generation token stamped on scheduled callbacks.
///
/// Bumped whenever the pursuer loop is re-armed (reset, resume, next level).
/// A callback carrying an older epoch does nothing when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct SessionEpoch(pub u64);

impl SessionEpoch {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// What a scheduled callback does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Leave the intro screen if still on it
    IntroTimeout,
    /// Advance the pursuer one step and reschedule
    PursuerTick,
    /// Load the given level after the "level complete" pause
    LevelTransition { level: u32 },
}

/// A scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub epoch: SessionEpoch,
    pub event: TimerEvent,
}

/// Fire-and-forget timer primitive provided by the host.
///
/// There is no cancel: stale timers are filtered by epoch when they fire.
pub trait Scheduler {
    fn after(&mut self, delay_ms: u64, timer: Timer);
}

/// Abstract input intents (physical keys are mapped by the host)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Move(Direction),
    Confirm,
    Cancel,
    PauseToggle,
    Reset,
    Quit,
    /// Any other key; only dismisses the intro
    Other,
}

/// Whether the host loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Notable things that happened, drained by presentation (sound, UI cues)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    LevelStarted { level: u32, placement: PlacementReport },
    CollectiblePicked { cell: Cell, remaining: usize },
    PowerUpPicked { cell: Cell, kind: PowerUpKind },
    SlowdownEnded,
    Captured { cell: Cell },
}

/// Run-wide counters that survive level changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Current level (1-based)
    pub level: u32,
    /// Score banked from finished levels
    pub total_score: u32,
    /// Current generation token
    pub epoch: SessionEpoch,
    /// Pursuer tick loop is armed
    pub timer_active: bool,
    /// Baseline for elapsed-time updates
    pub last_tick_ms: u64,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            level: 1,
            total_score: 0,
            epoch: SessionEpoch::default(),
            timer_active: false,
            last_tick_ms: 0,
        }
    }
}

/// Complete game session (deterministic for a given seed and input timeline)
#[derive(Debug, Clone)]
pub struct GameSession {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub maze: Maze,
    pub level: LevelState,
    pub difficulty: DifficultyModel,
    pub run: RunState,
    /// Result of the most recent item placement
    pub placement: PlacementReport,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// New session on the intro screen with level 1 already loaded
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut session = Self {
            difficulty: DifficultyModel::new(settings.speed_curve()),
            settings,
            seed,
            phase: GamePhase::Intro,
            maze: Maze::for_level(1),
            level: LevelState::empty(),
            run: RunState::default(),
            placement: PlacementReport::default(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        session.load_level(1);
        session
    }

    /// Load the maze for `level` and repopulate level data
    pub fn load_level(&mut self, level: u32) {
        self.run.level = level;
        self.maze = Maze::for_level(level);
        let plan = self.settings.placement_plan();
        let (state, report) = LevelState::populate(&self.maze, &plan, &mut self.rng);
        self.level = state;
        self.placement = report;
        self.difficulty.reset();

        if self.level.initial_collectibles > 0 || report.powerups_placed > 0 {
            log::info!(
                "Level {} started. Collect {} cheese! Cat delay: {}ms",
                level,
                self.level.initial_collectibles,
                self.difficulty.current_delay_ms
            );
        } else {
            log::warn!("No items placed for level {}", level);
        }
        self.push_event(GameEvent::LevelStarted {
            level,
            placement: report,
        });
    }

    /// Change phase, recording the transition
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from != to {
            self.phase = to;
            self.push_event(GameEvent::PhaseChanged { from, to });
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Banked score plus the level in progress (what the HUD shows)
    pub fn display_score(&self) -> u32 {
        self.run.total_score + self.level.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_new_session_starts_on_intro() {
        let session = GameSession::new(Settings::default(), 12345);
        assert_eq!(session.phase, GamePhase::Intro);
        assert_eq!(session.run.level, 1);
        assert_eq!(session.run.total_score, 0);
        assert!(!session.run.timer_active);
        assert_eq!(session.level.player, PLAYER_START);
        assert_eq!(session.level.pursuer, PURSUER_START);
        assert_eq!(session.level.collectibles.len(), COLLECTIBLES_PER_LEVEL);
        assert_eq!(session.difficulty.current_delay_ms, INITIAL_PURSUER_DELAY_MS);
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = GameSession::new(Settings::default(), 99999);
        let b = GameSession::new(Settings::default(), 99999);
        assert_eq!(a.level.collectibles, b.level.collectibles);
        assert_eq!(a.level.powerups, b.level.powerups);
    }

    #[test]
    fn test_epoch_increments() {
        let e = SessionEpoch::default();
        assert!(e.next() > e);
        assert_eq!(e.next().next(), SessionEpoch(2));
    }

    #[test]
    fn test_events_drain() {
        let mut session = GameSession::new(Settings::default(), 1);
        let events = session.drain_events();
        assert!(matches!(
            events.as_slice(),
            [GameEvent::LevelStarted { level: 1, .. }]
        ));
        session.set_phase(GamePhase::StartMenu);
        session.set_phase(GamePhase::StartMenu);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Intro,
                to: GamePhase::StartMenu
            }]
        );
        assert!(session.drain_events().is_empty());
    }
}
