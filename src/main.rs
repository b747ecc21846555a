//! Cat Chase headless driver
//!
//! Runs a session on a manual clock with the autopilot at the controls and
//! reports how it went. Useful for soak runs and reproducing a seed.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cat_chase::Settings;
use cat_chase::platform::{ManualClock, Runner};
use cat_chase::sim::{Control, GameEvent, GamePhase, GameSession, InputEvent, suggest_move};

#[derive(Parser, Debug)]
#[command(name = "cat-chase", about = "Headless cat-and-mouse maze chase")]
struct Args {
    /// Run seed (defaults to the settings file, then random)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Frames to simulate before giving up
    #[arg(long, default_value_t = 20_000)]
    frames: u64,

    /// Milliseconds per frame
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Let the autopilot move every N frames
    #[arg(long, default_value_t = 8)]
    move_every: u64,

    /// Print the final scene as JSON
    #[arg(long)]
    json: bool,

    /// Print the final board as text
    #[arg(long)]
    board: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let settings = Settings::load(args.settings.as_deref());
    let seed = args
        .seed
        .or(settings.seed)
        .unwrap_or_else(rand::random::<u64>);
    log::info!("Cat Chase (headless) starting with seed {}", seed);

    let mut runner = Runner::new(GameSession::new(settings, seed), ManualClock::default());
    runner.boot();

    let move_every = args.move_every.max(1);
    let mut frames_run = 0;
    for frame in 0..args.frames {
        frames_run = frame + 1;
        runner.advance(args.frame_ms);

        let phase = runner.session().phase;
        let control = match phase {
            GamePhase::StartMenu => runner.press(InputEvent::Confirm),
            GamePhase::Playing if frame % move_every == 0 => match suggest_move(runner.session()) {
                Some(dir) => runner.press(InputEvent::Move(dir)),
                None => Control::Continue,
            },
            GamePhase::GameOver | GamePhase::FinalWon => Control::Quit,
            _ => Control::Continue,
        };

        for event in runner.drain_events() {
            match event {
                GameEvent::PhaseChanged { from, to } => log::debug!("{:?} -> {:?}", from, to),
                other => log::trace!("{:?}", other),
            }
        }

        if control == Control::Quit {
            break;
        }
    }

    let scene = runner.session().scene();
    log::info!(
        "Finished after {} frames ({} ms): {:?} on level {}, total score {}",
        frames_run,
        frames_run * args.frame_ms,
        scene.phase,
        scene.level,
        scene.total_score + scene.level_score
    );

    if args.board {
        match scene.ascii_board() {
            Some(board) => print!("{board}"),
            None => println!("(board hidden in {:?})", scene.phase),
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&scene) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("Failed to serialize scene: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
