//! Pursuer speed curve and the slowdown power-up
//!
//! The pursuer's tick interval shrinks with the square root of collection
//! progress, so the first few pickups barely matter and the last few make the
//! cat sharply faster. A slowdown freezes the curve until it expires.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tuning for the speed curve (all values in ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedCurve {
    pub initial_delay_ms: u64,
    pub min_delay_ms: u64,
    pub slowdown_penalty_ms: u64,
    pub slowdown_duration_ms: u64,
}

impl Default for SpeedCurve {
    fn default() -> Self {
        Self {
            initial_delay_ms: INITIAL_PURSUER_DELAY_MS,
            min_delay_ms: MIN_PURSUER_DELAY_MS,
            slowdown_penalty_ms: SLOWDOWN_PENALTY_MS,
            slowdown_duration_ms: SLOWDOWN_DURATION_MS,
        }
    }
}

impl SpeedCurve {
    /// Tick interval for a progress fraction in [0, 1]
    pub fn delay_for_progress(&self, progress: f32) -> u64 {
        let progress = progress.clamp(0.0, 1.0);
        let span = self.initial_delay_ms.saturating_sub(self.min_delay_ms) as f32;
        let delay = self
            .min_delay_ms
            .saturating_add((span * (1.0 - progress.sqrt())) as u64);
        delay.max(self.min_delay_ms)
    }

    /// Interval forced while the slowdown is active
    pub fn slowed_delay(&self, current: u64) -> u64 {
        current.max(self.initial_delay_ms.saturating_add(self.slowdown_penalty_ms))
    }
}

/// Mutable difficulty state for the current level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyModel {
    pub curve: SpeedCurve,
    /// Pursuer tick interval
    pub current_delay_ms: u64,
    /// Interval saved when the slowdown started
    pub delay_before_slowdown_ms: u64,
    /// Countdown until the slowdown ends
    pub slow_remaining_ms: u64,
    pub slowed: bool,
}

impl Default for DifficultyModel {
    fn default() -> Self {
        Self::new(SpeedCurve::default())
    }
}

impl DifficultyModel {
    pub fn new(curve: SpeedCurve) -> Self {
        Self {
            curve,
            current_delay_ms: curve.initial_delay_ms,
            delay_before_slowdown_ms: curve.initial_delay_ms,
            slow_remaining_ms: 0,
            slowed: false,
        }
    }

    /// Back to level-start values
    pub fn reset(&mut self) {
        *self = Self::new(self.curve);
    }

    fn progress(collected: usize, initial: usize) -> f32 {
        collected as f32 / initial as f32
    }

    /// Recompute the interval after a pickup. Skipped while slowed.
    ///
    /// Returns true if the interval was recomputed.
    pub fn on_collected(&mut self, collected: usize, initial: usize) -> bool {
        if self.slowed || initial == 0 {
            return false;
        }
        self.current_delay_ms = self
            .curve
            .delay_for_progress(Self::progress(collected, initial));
        self.delay_before_slowdown_ms = self.current_delay_ms;
        log::debug!("Cat speed adjusted! New delay: {}ms", self.current_delay_ms);
        true
    }

    /// Start the slowdown. No-op (returns false) if one is already running.
    pub fn activate_slowdown(&mut self) -> bool {
        if self.slowed {
            return false;
        }
        self.slowed = true;
        self.slow_remaining_ms = self.curve.slowdown_duration_ms;
        self.delay_before_slowdown_ms = self.current_delay_ms;
        self.current_delay_ms = self.curve.slowed_delay(self.current_delay_ms);
        log::debug!("Cat slowed! Delay: {}ms", self.current_delay_ms);
        true
    }

    /// Count down the slowdown by `elapsed_ms`.
    ///
    /// On expiry the interval is re-derived from current progress rather than
    /// restored, except with zero initial collectibles where the saved value
    /// comes back. Returns true on the call that ends the slowdown.
    pub fn advance(&mut self, elapsed_ms: u64, collected: usize, initial: usize) -> bool {
        if !self.slowed {
            return false;
        }
        self.slow_remaining_ms = self.slow_remaining_ms.saturating_sub(elapsed_ms);
        if self.slow_remaining_ms > 0 {
            return false;
        }

        self.slowed = false;
        self.current_delay_ms = if initial > 0 {
            self.curve
                .delay_for_progress(Self::progress(collected, initial))
        } else {
            self.delay_before_slowdown_ms
        };
        log::debug!(
            "Cat slowdown ended! Delay restored to: {}ms",
            self.current_delay_ms
        );
        true
    }
}
