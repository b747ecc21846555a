//! Platform abstraction layer
//!
//! Host-side collaborators the simulation consumes:
//! - Time (`clock`)
//! - Fire-and-forget timers (`timer`)
//! - Key mapping (`input`)
//!
//! `Runner` ties them to a session. Everything runs on one thread: input,
//! timer callbacks and elapsed-time updates are applied one after another,
//! never concurrently.

pub mod clock;
pub mod input;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use input::{Key, map_key};
pub use timer::TimerQueue;

use crate::sim::{Control, GameEvent, GameSession, InputEvent};

/// Single-threaded event pump around a session
#[derive(Debug)]
pub struct Runner<C: Clock> {
    session: GameSession,
    timers: TimerQueue,
    clock: C,
}

impl<C: Clock> Runner<C> {
    pub fn new(session: GameSession, clock: C) -> Self {
        Self {
            session,
            timers: TimerQueue::new(),
            clock,
        }
    }

    /// Start the intro countdown
    pub fn boot(&mut self) {
        let now = self.clock.now_ms();
        self.timers.set_now(now);
        self.session.boot(now, &mut self.timers);
        log::info!("Session booted with seed {}", self.session.seed);
    }

    /// Deliver one input intent after catching up on due timers
    pub fn press(&mut self, input: InputEvent) -> Control {
        self.pump();
        let now = self.clock.now_ms();
        self.session.handle_input(input, now, &mut self.timers)
    }

    /// Host key press
    pub fn press_key(&mut self, key: Key) -> Control {
        self.press(map_key(key))
    }

    /// Run the elapsed-time update, then fire every due timer in order.
    ///
    /// The update goes first so a slowdown that expires at `now` no longer
    /// holds back a pursuer tick due at the same instant. Returns the number
    /// of timers fired (stale ones included).
    pub fn pump(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.timers.set_now(now);
        self.session.update(now);
        let mut fired = 0;
        while let Some((_, timer)) = self.timers.pop_due(now) {
            self.session.on_timer(timer, now, &mut self.timers);
            fired += 1;
        }
        fired
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.session.drain_events()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }
}

impl Runner<ManualClock> {
    /// Advance the manual clock and pump
    pub fn advance(&mut self, ms: u64) -> usize {
        self.clock.advance(ms);
        self.pump()
    }
}
