//! Game settings and balance
//!
//! Loaded from an optional JSON file; every field falls back to the built-in
//! default when missing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::difficulty::SpeedCurve;
use crate::sim::level::PlacementPlan;

/// Errors from loading or validating settings
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for `Settings`
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values are individually fine but don't make sense together
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Game settings/balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed run seed (random per launch when absent)
    pub seed: Option<u64>,

    // === Flow ===
    /// Intro screen auto-dismiss
    pub intro_delay_ms: u64,
    /// "Level complete" screen before the next level loads
    pub level_transition_ms: u64,
    /// Levels in a full run
    pub max_levels: u32,

    // === Pursuer speed ===
    pub initial_pursuer_delay_ms: u64,
    pub min_pursuer_delay_ms: u64,
    pub slowdown_penalty_ms: u64,
    pub slowdown_duration_ms: u64,

    // === Items ===
    pub collectibles_per_level: usize,
    pub powerups_per_level: usize,
    /// Placement gives up after ROWS * COLS * this many attempts
    pub placement_attempts_per_cell: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            intro_delay_ms: INTRO_DELAY_MS,
            level_transition_ms: LEVEL_TRANSITION_MS,
            max_levels: MAX_LEVELS,

            initial_pursuer_delay_ms: INITIAL_PURSUER_DELAY_MS,
            min_pursuer_delay_ms: MIN_PURSUER_DELAY_MS,
            slowdown_penalty_ms: SLOWDOWN_PENALTY_MS,
            slowdown_duration_ms: SLOWDOWN_DURATION_MS,

            collectibles_per_level: COLLECTIBLES_PER_LEVEL,
            powerups_per_level: POWERUPS_PER_LEVEL,
            placement_attempts_per_cell: PLACEMENT_ATTEMPTS_PER_CELL,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject combinations the simulation can't run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.min_pursuer_delay_ms > self.initial_pursuer_delay_ms {
            return Err(SettingsError::Invalid(format!(
                "min_pursuer_delay_ms ({}) exceeds initial_pursuer_delay_ms ({})",
                self.min_pursuer_delay_ms, self.initial_pursuer_delay_ms
            )));
        }
        if self.min_pursuer_delay_ms == 0 {
            return Err(SettingsError::Invalid(
                "min_pursuer_delay_ms must be positive".into(),
            ));
        }
        if self.max_levels == 0 {
            return Err(SettingsError::Invalid("max_levels must be at least 1".into()));
        }
        if self.placement_attempts_per_cell == 0 {
            return Err(SettingsError::Invalid(
                "placement_attempts_per_cell must be at least 1".into(),
            ));
        }
        if (ROWS * COLS)
            .checked_mul(self.placement_attempts_per_cell)
            .is_none()
        {
            return Err(SettingsError::Invalid(format!(
                "placement_attempts_per_cell ({}) is too large",
                self.placement_attempts_per_cell
            )));
        }
        if self.initial_pursuer_delay_ms > MAX_PURSUER_DELAY_MS
            || self.slowdown_penalty_ms > MAX_PURSUER_DELAY_MS
        {
            return Err(SettingsError::Invalid(format!(
                "initial_pursuer_delay_ms and slowdown_penalty_ms must not exceed {}",
                MAX_PURSUER_DELAY_MS
            )));
        }
        Ok(())
    }

    /// Speed curve parameters for the difficulty model
    pub fn speed_curve(&self) -> SpeedCurve {
        SpeedCurve {
            initial_delay_ms: self.initial_pursuer_delay_ms,
            min_delay_ms: self.min_pursuer_delay_ms,
            slowdown_penalty_ms: self.slowdown_penalty_ms,
            slowdown_duration_ms: self.slowdown_duration_ms,
        }
    }

    /// Item counts and attempt cap for level setup
    pub fn placement_plan(&self) -> PlacementPlan {
        PlacementPlan {
            collectibles: self.collectibles_per_level,
            powerups: self.powerups_per_level,
            max_attempts: (ROWS * COLS).saturating_mul(self.placement_attempts_per_cell),
        }
    }
}
