//! Game flow: phase transitions, the pursuer tick loop and elapsed-time updates
//!
//! All entry points run to completion on one thread. The host feeds them
//! input, fired timers and the current time; the session answers by mutating
//! itself and scheduling more timers.

use super::pathfind::{PathResult, next_step};
use super::state::{
    Control, GameEvent, GamePhase, GameSession, InputEvent, Scheduler, Timer, TimerEvent,
};

impl GameSession {
    /// Start the intro countdown. Call once when the host loop comes up.
    pub fn boot(&mut self, now_ms: u64, sched: &mut impl Scheduler) {
        self.run.last_tick_ms = now_ms;
        sched.after(
            self.settings.intro_delay_ms,
            Timer {
                epoch: self.run.epoch,
                event: TimerEvent::IntroTimeout,
            },
        );
    }

    /// Apply one input intent
    pub fn handle_input(
        &mut self,
        input: InputEvent,
        now_ms: u64,
        sched: &mut impl Scheduler,
    ) -> Control {
        match self.phase {
            GamePhase::Intro => {
                self.set_phase(GamePhase::StartMenu);
            }

            GamePhase::StartMenu => match input {
                InputEvent::Confirm => self.reset_game(now_ms, sched),
                InputEvent::Cancel | InputEvent::Quit => return Control::Quit,
                _ => {}
            },

            GamePhase::GameOver | GamePhase::LevelWon | GamePhase::FinalWon => match input {
                InputEvent::Reset if self.phase != GamePhase::FinalWon => {
                    self.reset_game(now_ms, sched)
                }
                InputEvent::Cancel | InputEvent::Quit => return Control::Quit,
                _ => {}
            },

            GamePhase::Playing | GamePhase::Paused => match input {
                InputEvent::PauseToggle => self.toggle_pause(now_ms, sched),
                InputEvent::Cancel | InputEvent::Quit => return Control::Quit,
                InputEvent::Reset if self.phase == GamePhase::Playing => {
                    self.reset_game(now_ms, sched)
                }
                InputEvent::Move(dir) => {
                    self.attempt_move(dir, sched);
                }
                _ => {}
            },
        }
        Control::Continue
    }

    /// Dispatch a fired timer. Stale timers are silently dropped.
    pub fn on_timer(&mut self, timer: Timer, now_ms: u64, sched: &mut impl Scheduler) {
        match timer.event {
            TimerEvent::IntroTimeout => {
                if self.phase == GamePhase::Intro {
                    self.set_phase(GamePhase::StartMenu);
                }
            }

            TimerEvent::PursuerTick => {
                if timer.epoch != self.run.epoch {
                    log::trace!("Dropping stale pursuer tick {:?}", timer.epoch);
                    return;
                }
                self.pursuer_tick(sched);
            }

            TimerEvent::LevelTransition { level } => {
                if timer.epoch != self.run.epoch {
                    log::debug!("Dropping stale transition to level {}", level);
                    return;
                }
                self.load_level(level);
                self.set_phase(GamePhase::Playing);
                self.arm_pursuer(now_ms, sched);
            }
        }
    }

    /// Elapsed-time update (host idle callback): sparkle animation and the
    /// slowdown countdown. Paused time never reaches the countdown.
    pub fn update(&mut self, now_ms: u64) {
        let elapsed = now_ms.saturating_sub(self.run.last_tick_ms);
        if elapsed == 0 {
            return;
        }

        if self.phase.shows_board() {
            self.level.animate_powerups(elapsed);

            if self.phase == GamePhase::Playing
                && self.difficulty.advance(
                    elapsed,
                    self.level.collected(),
                    self.level.initial_collectibles,
                )
            {
                self.push_event(GameEvent::SlowdownEnded);
            }
        }
        self.run.last_tick_ms = now_ms;
    }

    /// Fresh run from level 1
    pub fn reset_game(&mut self, now_ms: u64, sched: &mut impl Scheduler) {
        log::info!("--- Game Reset! ---");
        self.run.timer_active = false;
        self.run.total_score = 0;
        self.load_level(1);
        self.set_phase(GamePhase::Playing);
        self.arm_pursuer(now_ms, sched);
    }

    fn toggle_pause(&mut self, now_ms: u64, sched: &mut impl Scheduler) {
        match self.phase {
            GamePhase::Playing => {
                self.set_phase(GamePhase::Paused);
                self.run.timer_active = false;
                log::info!("Game Paused.");
            }
            GamePhase::Paused => {
                self.set_phase(GamePhase::Playing);
                self.arm_pursuer(now_ms, sched);
                log::info!("Game Resumed.");
            }
            _ => {}
        }
    }

    /// New epoch, fresh time baseline, first tick one interval from now
    fn arm_pursuer(&mut self, now_ms: u64, sched: &mut impl Scheduler) {
        self.run.epoch = self.run.epoch.next();
        self.run.timer_active = true;
        self.run.last_tick_ms = now_ms;
        self.schedule_pursuer(sched);
    }

    fn schedule_pursuer(&self, sched: &mut impl Scheduler) {
        sched.after(
            self.difficulty.current_delay_ms,
            Timer {
                epoch: self.run.epoch,
                event: TimerEvent::PursuerTick,
            },
        );
    }

    fn pursuer_tick(&mut self, sched: &mut impl Scheduler) {
        if self.phase != GamePhase::Playing || !self.run.timer_active {
            return;
        }
        // Slowdown freezes the pursuer outright
        if !self.difficulty.slowed {
            self.step_pursuer();
        }
        if self.phase == GamePhase::Playing && self.run.timer_active {
            self.schedule_pursuer(sched);
        }
    }

    /// Move the pursuer one step toward the player, then check for a catch
    pub fn step_pursuer(&mut self) -> PathResult {
        let result = next_step(&self.maze, self.level.pursuer, self.level.player);
        match result {
            PathResult::NextStep(cell) => self.level.pursuer = cell,
            PathResult::NoPath => log::debug!("No path to player, cat waits"),
            PathResult::AlreadyThere => {}
        }
        self.check_capture();
        result
    }

    /// Game over if the pursuer shares the player's cell
    fn check_capture(&mut self) -> bool {
        if self.level.pursuer != self.level.player || self.phase != GamePhase::Playing {
            return false;
        }
        log::info!(
            "Caught by the cat! Game Over. Current Level Score: {}",
            self.level.score
        );
        self.run.total_score += self.level.score;
        self.level.score = 0;
        self.run.timer_active = false;
        self.set_phase(GamePhase::GameOver);
        self.push_event(GameEvent::Captured {
            cell: self.level.pursuer,
        });
        log::info!("Final Total Score: {}", self.run.total_score);
        true
    }

    /// Bank the level score and move on: next level after a pause, or the
    /// final win screen
    pub(crate) fn complete_level(&mut self, sched: &mut impl Scheduler) {
        self.run.total_score += self.level.score;
        self.level.score = 0;
        self.run.level += 1;
        self.run.timer_active = false;

        if self.run.level > self.settings.max_levels {
            self.set_phase(GamePhase::FinalWon);
            log::info!(
                "You beat all levels! YOU WIN! Final Score: {}",
                self.run.total_score
            );
        } else {
            self.set_phase(GamePhase::LevelWon);
            log::info!("Level Complete! Proceeding to Level {}", self.run.level);
            sched.after(
                self.settings.level_transition_ms,
                Timer {
                    epoch: self.run.epoch,
                    event: TimerEvent::LevelTransition {
                        level: self.run.level,
                    },
                },
            );
        }
    }
}
