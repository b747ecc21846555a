//! End-to-end flow scenarios driven through the runner and a manual clock

use cat_chase::Cell;
use cat_chase::Settings;
use cat_chase::consts::*;
use cat_chase::platform::{Key, ManualClock, Runner};
use cat_chase::sim::{
    Control, Direction, GameEvent, GamePhase, GameSession, InputEvent, Maze, PowerUp,
    PowerUpKind, suggest_move,
};

fn runner(seed: u64) -> Runner<ManualClock> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut runner = Runner::new(
        GameSession::new(Settings::default(), seed),
        ManualClock::default(),
    );
    runner.boot();
    runner
}

/// Runner already in Playing at t = 0
fn playing(seed: u64) -> Runner<ManualClock> {
    let mut runner = runner(seed);
    runner.press_key(Key::Char(' '));
    runner.press_key(Key::Enter);
    assert_eq!(runner.session().phase, GamePhase::Playing);
    runner.drain_events();
    runner
}

/// Leave a single collectible below the player so one move clears the level
fn plant_last_collectible(runner: &mut Runner<ManualClock>) {
    let session = runner.session_mut();
    session.level.player = PLAYER_START;
    session.level.collectibles = vec![PLAYER_START + Cell::new(0, 1)];
    session.level.powerups.clear();
}

#[test]
fn test_intro_dismissed_by_timeout() {
    let mut runner = runner(1);
    runner.advance(INTRO_DELAY_MS / 2);
    assert_eq!(runner.session().phase, GamePhase::Intro);
    runner.advance(INTRO_DELAY_MS / 2);
    assert_eq!(runner.session().phase, GamePhase::StartMenu);

    // Enter from the menu starts level 1
    assert_eq!(runner.press_key(Key::Enter), Control::Continue);
    assert_eq!(runner.session().phase, GamePhase::Playing);
    assert_eq!(runner.session().run.level, 1);
}

#[test]
fn test_pause_resume_has_no_catch_up() {
    let mut runner = playing(2);
    let start = runner.session().level.pursuer;

    runner.advance(100);
    runner.press_key(Key::Char('p'));
    assert_eq!(runner.session().phase, GamePhase::Paused);

    runner.advance(10_000);
    assert_eq!(runner.session().level.pursuer, start);

    runner.press_key(Key::Char('p'));
    assert_eq!(runner.session().phase, GamePhase::Playing);

    // First tick comes a full interval after resuming
    runner.advance(INITIAL_PURSUER_DELAY_MS - 1);
    assert_eq!(runner.session().level.pursuer, start);
    runner.advance(1);
    assert_ne!(runner.session().level.pursuer, start);
}

#[test]
fn test_reset_neutralizes_pending_tick() {
    let mut runner = playing(3);
    runner.advance(100);
    runner.press_key(Key::Char('r'));
    assert_eq!(runner.session().phase, GamePhase::Playing);

    // The tick armed at t = 0 is stale now
    runner.advance(INITIAL_PURSUER_DELAY_MS - 100);
    assert_eq!(runner.session().level.pursuer, PURSUER_START);
    runner.advance(99);
    assert_eq!(runner.session().level.pursuer, PURSUER_START);
    runner.advance(1);
    assert_ne!(runner.session().level.pursuer, PURSUER_START);
}

#[test]
fn test_capture_and_restart() {
    let mut runner = playing(4);
    {
        let session = runner.session_mut();
        session.level.player = PURSUER_START + Cell::new(1, 0);
        session.level.score = 3;
        session.run.total_score = 20;
    }
    runner.advance(INITIAL_PURSUER_DELAY_MS);

    let session = runner.session();
    assert_eq!(session.phase, GamePhase::GameOver);
    assert!(!session.run.timer_active);
    assert_eq!(session.run.total_score, 23);
    assert_eq!(
        session.scene().overlay.and_then(|o| o.subtitle).as_deref(),
        Some("Final Score: 23")
    );
    assert!(
        runner
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::Captured { .. }))
    );

    // Time passing on the game over screen changes nothing
    runner.advance(5_000);
    assert_eq!(runner.session().phase, GamePhase::GameOver);

    runner.press_key(Key::Char('R'));
    let session = runner.session();
    assert_eq!(session.phase, GamePhase::Playing);
    assert_eq!(session.run.total_score, 0);
    assert_eq!(session.level.player, PLAYER_START);
}

#[test]
fn test_level_win_transitions_to_next_level() {
    let mut runner = playing(5);
    plant_last_collectible(&mut runner);
    runner.session_mut().level.initial_collectibles = 1;

    runner.press_key(Key::ArrowDown);
    assert_eq!(runner.session().phase, GamePhase::LevelWon);
    assert_eq!(runner.session().run.total_score, 1);
    assert_eq!(
        runner.session().scene().overlay.map(|o| o.title),
        Some("LEVEL 1 COMPLETE!".to_string())
    );

    // Moves do nothing on the level complete screen
    runner.press_key(Key::ArrowLeft);
    assert_eq!(runner.session().phase, GamePhase::LevelWon);

    runner.advance(LEVEL_TRANSITION_MS - 1);
    assert_eq!(runner.session().phase, GamePhase::LevelWon);
    runner.advance(1);

    let session = runner.session();
    assert_eq!(session.phase, GamePhase::Playing);
    assert_eq!(session.run.level, 2);
    assert_eq!(session.maze, Maze::for_level(2));
    assert_eq!(session.level.collectibles.len(), COLLECTIBLES_PER_LEVEL);
    assert_eq!(session.level.score, 0);
    assert_eq!(session.run.total_score, 1);
    assert_eq!(session.difficulty.current_delay_ms, INITIAL_PURSUER_DELAY_MS);
    assert!(session.run.timer_active);
}

#[test]
fn test_clearing_every_level_wins_the_game() {
    let mut runner = playing(6);
    for level in 1..=MAX_LEVELS {
        assert_eq!(runner.session().run.level, level);
        plant_last_collectible(&mut runner);
        runner.press_key(Key::Char('s'));
        if level < MAX_LEVELS {
            assert_eq!(runner.session().phase, GamePhase::LevelWon);
            runner.advance(LEVEL_TRANSITION_MS);
        }
    }

    let session = runner.session();
    assert_eq!(session.phase, GamePhase::FinalWon);
    assert_eq!(session.run.total_score, MAX_LEVELS);
    assert!(!session.run.timer_active);

    // Nothing pending brings the game back
    runner.advance(60_000);
    assert_eq!(runner.session().phase, GamePhase::FinalWon);

    // No restart from here, only quit
    runner.press_key(Key::Char('r'));
    assert_eq!(runner.session().phase, GamePhase::FinalWon);
    assert_eq!(runner.press_key(Key::Escape), Control::Quit);
}

#[test]
fn test_reset_during_level_transition_stays_on_level_one() {
    let mut runner = playing(7);
    plant_last_collectible(&mut runner);
    runner.press(InputEvent::Move(Direction::Down));
    assert_eq!(runner.session().phase, GamePhase::LevelWon);

    runner.advance(500);
    runner.press(InputEvent::Reset);
    assert_eq!(runner.session().phase, GamePhase::Playing);
    assert_eq!(runner.session().run.level, 1);
    runner.drain_events();

    runner.advance(LEVEL_TRANSITION_MS);
    let session = runner.session();
    assert_eq!(session.run.level, 1);
    assert_eq!(session.maze, Maze::for_level(1));
    assert!(
        !runner
            .drain_events()
            .iter()
            .any(|e| matches!(e, GameEvent::LevelStarted { level: 2, .. }))
    );
}

#[test]
fn test_slowdown_freezes_pursuer_until_expiry() {
    let mut runner = playing(8);
    {
        let session = runner.session_mut();
        let cell = PLAYER_START + Cell::new(1, 0);
        session.level.collectibles.retain(|&c| c != cell);
        session.level.initial_collectibles = session.level.collectibles.len();
        session.level.powerups = vec![PowerUp::new(cell, PowerUpKind::Slowdown)];
    }
    runner.press(InputEvent::Move(Direction::Right));
    assert!(runner.session().difficulty.slowed);
    assert!(runner.session().level.powerups.is_empty());
    assert_eq!(
        runner.session().scene().hud.and_then(|h| h.center).as_deref(),
        Some("SLOWED!")
    );

    runner.advance(SLOWDOWN_DURATION_MS - 1);
    assert_eq!(runner.session().level.pursuer, PURSUER_START);
    assert!(runner.session().difficulty.slowed);

    runner.advance(1);
    assert!(!runner.session().difficulty.slowed);
    assert_eq!(
        runner.session().difficulty.current_delay_ms,
        INITIAL_PURSUER_DELAY_MS
    );
    assert!(runner.drain_events().contains(&GameEvent::SlowdownEnded));

    // Next tick was armed at the slowed interval and now moves the cat
    runner.advance(INITIAL_PURSUER_DELAY_MS + SLOWDOWN_PENALTY_MS);
    assert_ne!(runner.session().level.pursuer, PURSUER_START);
}

#[test]
fn test_same_seed_same_run() {
    let play = |seed| {
        let mut runner = playing(seed);
        for frame in 0..400 {
            runner.advance(16);
            if frame % 8 == 0 {
                if let Some(dir) = cat_chase::sim::suggest_move(runner.session()) {
                    runner.press(InputEvent::Move(dir));
                }
            }
        }
        runner.session().scene()
    };
    assert_eq!(play(99), play(99));
}

#[test]
fn test_clearing_a_full_placement_reaches_min_delay() {
    let mut runner = playing(11);
    runner.session_mut().level.powerups.clear();
    assert_eq!(runner.session().level.initial_collectibles, COLLECTIBLES_PER_LEVEL);
    assert_eq!(runner.session().level.collectibles.len(), COLLECTIBLES_PER_LEVEL);

    // Clock never moves, so the cat stays home while the bot collects
    let mut delays = Vec::new();
    for _ in 0..5_000 {
        if runner.session().phase != GamePhase::Playing {
            break;
        }
        let Some(dir) = suggest_move(runner.session()) else {
            break;
        };
        let before = runner.session().level.collectibles.len();
        runner.press(InputEvent::Move(dir));
        if runner.session().level.collectibles.len() < before {
            delays.push(runner.session().difficulty.current_delay_ms);
        }
    }

    assert_eq!(delays.len(), COLLECTIBLES_PER_LEVEL);
    // 1 of 12: 150 + trunc(200 * (1 - sqrt(1/12)))
    assert_eq!(delays[0], 292);
    assert_eq!(delays[2], 250);
    assert!(delays.windows(2).all(|w| w[1] <= w[0]), "{delays:?}");
    assert_eq!(delays.last().copied(), Some(MIN_PURSUER_DELAY_MS));

    let session = runner.session();
    assert_eq!(session.phase, GamePhase::LevelWon);
    assert!(session.level.collectibles.is_empty());
    assert_eq!(session.run.total_score, COLLECTIBLES_PER_LEVEL as u32);
    assert_eq!(session.level.score, 0);

    let events = runner.drain_events();
    let won = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                GameEvent::PhaseChanged {
                    to: GamePhase::LevelWon,
                    ..
                }
            )
        })
        .count();
    assert_eq!(won, 1);
    let picked = events
        .iter()
        .filter(|e| matches!(e, GameEvent::CollectiblePicked { .. }))
        .count();
    assert_eq!(picked, COLLECTIBLES_PER_LEVEL);
}

#[test]
fn test_slowdown_after_quarter_progress_restores_curve() {
    let mut runner = playing(12);
    {
        let session = runner.session_mut();
        let near = [Cell::new(1, 2), Cell::new(1, 3), Cell::new(2, 3)];
        let powerup = Cell::new(3, 3);
        let far: Vec<Cell> = session
            .maze
            .passable_cells()
            .filter(|c| c.y >= 15)
            .take(COLLECTIBLES_PER_LEVEL - near.len())
            .collect();
        session.level.collectibles = near.iter().copied().chain(far).collect();
        session.level.initial_collectibles = session.level.collectibles.len();
        session.level.powerups = vec![PowerUp::new(powerup, PowerUpKind::Slowdown)];
    }
    assert_eq!(runner.session().level.initial_collectibles, COLLECTIBLES_PER_LEVEL);

    runner.press(InputEvent::Move(Direction::Down));
    runner.press(InputEvent::Move(Direction::Down));
    runner.press(InputEvent::Move(Direction::Right));
    assert_eq!(runner.session().level.collected(), 3);
    assert_eq!(runner.session().difficulty.current_delay_ms, 250);

    runner.press(InputEvent::Move(Direction::Right));
    assert!(runner.session().difficulty.slowed);
    assert_eq!(runner.session().difficulty.current_delay_ms, 450);
    runner.drain_events();

    runner.advance(SLOWDOWN_DURATION_MS - 1);
    assert!(runner.session().difficulty.slowed);
    assert_eq!(runner.session().difficulty.current_delay_ms, 450);

    runner.advance(1);
    assert!(!runner.session().difficulty.slowed);
    assert_eq!(runner.session().difficulty.current_delay_ms, 250);
    assert!(runner.drain_events().contains(&GameEvent::SlowdownEnded));
}
