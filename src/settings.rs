//! Game settings and tuning
//!
//! Persisted separately from the leaderboard under its own storage key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::Storage;

/// Invalid tuning values
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// Ball does not fit inside the playfield
    BallTooLarge { ball_size: f32, width: f32 },
    /// Backboard does not fit inside the playfield
    BackboardTooWide { backboard_width: f32, width: f32 },
    /// Launch point lies outside the playfield
    LaunchOutOfBounds { launch_x: f32, launch_height: f32 },
    /// Rim does not lie on the backboard
    RimOffBackboard {
        rim_offset: f32,
        rim_width: f32,
        backboard_width: f32,
    },
    /// Gravity must pull the ball back down
    NonPositiveGravity { gravity: f32 },
    /// Drag multiplier outside `(0, 1]`
    DragOutOfRange { drag: f32 },
    /// A restitution outside `[0, 1)`
    RestitutionOutOfRange { name: &'static str, value: f32 },
    /// A cutoff that is negative or not finite
    NegativeCutoff { name: &'static str, value: f32 },
    /// Floor bounces would never decay below the threshold
    BounceThresholdTooLow { bounce_threshold: f32, min: f32 },
    /// A tick cadence must have a positive period
    NonPositiveTickPeriod { period_ms: f32 },
    /// A round needs at least one allowed miss
    ZeroMaxMiss,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BallTooLarge { ball_size, width } => {
                write!(f, "ball size {ball_size} does not fit playfield width {width}")
            }
            Self::BackboardTooWide {
                backboard_width,
                width,
            } => write!(
                f,
                "backboard width {backboard_width} does not fit playfield width {width}"
            ),
            Self::LaunchOutOfBounds {
                launch_x,
                launch_height,
            } => write!(
                f,
                "launch point ({launch_x}, {launch_height}) lies outside the playfield"
            ),
            Self::RimOffBackboard {
                rim_offset,
                rim_width,
                backboard_width,
            } => write!(
                f,
                "rim (offset {rim_offset}, width {rim_width}) does not fit backboard width {backboard_width}"
            ),
            Self::NonPositiveGravity { gravity } => {
                write!(f, "gravity must be positive and finite, got {gravity}")
            }
            Self::DragOutOfRange { drag } => write!(f, "drag must be in (0, 1], got {drag}"),
            Self::RestitutionOutOfRange { name, value } => {
                write!(f, "{name} must be in [0, 1), got {value}")
            }
            Self::NegativeCutoff { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
            Self::BounceThresholdTooLow {
                bounce_threshold,
                min,
            } => write!(
                f,
                "bounce threshold {bounce_threshold} must exceed {min} for the ball to settle"
            ),
            Self::NonPositiveTickPeriod { period_ms } => {
                write!(f, "tick period must be positive, got {period_ms} ms")
            }
            Self::ZeroMaxMiss => write!(f, "max_miss must be at least 1"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    /// Playfield width
    pub width: f32,
    /// Resting (floor) height of the ball's top edge; y grows downward
    pub launch_height: f32,
    /// Ball sprite size (square)
    pub ball_size: f32,
    /// Horizontal launch position of the ball's left edge
    pub launch_x: f32,

    // === Backboard & rim ===
    pub backboard_width: f32,
    /// Rim height
    pub rim_y: f32,
    /// Rim left edge relative to the backboard left edge
    pub rim_offset: f32,
    pub rim_width: f32,
    /// Band extent above the rim (scoring accepts y >= rim_y - rim_band_above)
    pub rim_band_above: f32,
    /// Band extent below the rim (scoring accepts y <= rim_y + rim_band_below)
    pub rim_band_below: f32,

    // === Physics ===
    pub gravity: f32,
    pub drag: f32,
    pub drag_cutoff: f32,
    pub wall_restitution: f32,
    pub ceiling_restitution: f32,
    pub floor_restitution: f32,
    pub bounce_threshold: f32,

    // === Rounds ===
    pub max_miss: u32,

    // === Cadences ===
    pub ball_tick_ms: f32,
    pub backboard_tick_ms: f32,

    // === Launch ===
    /// Tap-launch power: flight time in ticks to reach the rim center
    pub power: f32,
}

impl Default for Settings {
    fn default() -> Self {
        let width = 400.0;
        let ball_size = 60.0;
        Self {
            width,
            launch_height: 700.0,
            ball_size,
            launch_x: (width - ball_size) / 2.0,

            backboard_width: 120.0,
            rim_y: 100.0,
            rim_offset: 10.0,
            rim_width: 100.0,
            rim_band_above: 30.0,
            rim_band_below: 10.0,

            gravity: GRAVITY,
            drag: AIR_DRAG,
            drag_cutoff: DRAG_CUTOFF,
            wall_restitution: WALL_RESTITUTION,
            ceiling_restitution: CEILING_RESTITUTION,
            floor_restitution: FLOOR_RESTITUTION,
            bounce_threshold: BOUNCE_THRESHOLD,

            max_miss: MAX_MISS,

            ball_tick_ms: BALL_TICK_MS,
            backboard_tick_ms: BACKBOARD_TICK_MS,

            power: DEFAULT_POWER,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "hoop_shot_settings";

    /// Rightmost allowed ball x
    pub fn max_ball_x(&self) -> f32 {
        self.width - self.ball_size
    }

    /// Rightmost allowed backboard left edge
    pub fn max_backboard_left(&self) -> f32 {
        self.width - self.backboard_width
    }

    /// Backboard left edge when centered
    pub fn centered_backboard_left(&self) -> f32 {
        self.max_backboard_left() / 2.0
    }

    /// Set tap-launch power, clamped to the allowed range
    pub fn set_power(&mut self, power: f32) {
        self.power = clamp_power(power);
    }

    /// Slowest floor impact speed a bounce can sustain forever.
    ///
    /// A bounce leaving at `v` comes back at most `2 * gravity` faster, so
    /// impact speeds decay toward `2g / (1 - floor_restitution)`.
    pub fn min_bounce_threshold(&self) -> f32 {
        2.0 * self.gravity / (1.0 - self.floor_restitution)
    }

    /// Check that the tuning describes a playable field where every flight
    /// eventually settles
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.ball_size <= 0.0 || self.ball_size > self.width {
            return Err(SettingsError::BallTooLarge {
                ball_size: self.ball_size,
                width: self.width,
            });
        }
        if self.backboard_width <= 0.0 || self.backboard_width > self.width {
            return Err(SettingsError::BackboardTooWide {
                backboard_width: self.backboard_width,
                width: self.width,
            });
        }
        if self.launch_height <= 0.0 || !(0.0..=self.max_ball_x()).contains(&self.launch_x) {
            return Err(SettingsError::LaunchOutOfBounds {
                launch_x: self.launch_x,
                launch_height: self.launch_height,
            });
        }
        if !(self.rim_offset >= 0.0
            && self.rim_width > 0.0
            && self.rim_offset + self.rim_width <= self.backboard_width)
        {
            return Err(SettingsError::RimOffBackboard {
                rim_offset: self.rim_offset,
                rim_width: self.rim_width,
                backboard_width: self.backboard_width,
            });
        }

        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(SettingsError::NonPositiveGravity {
                gravity: self.gravity,
            });
        }
        if !(self.drag > 0.0 && self.drag <= 1.0) {
            return Err(SettingsError::DragOutOfRange { drag: self.drag });
        }
        for (name, value) in [
            ("wall_restitution", self.wall_restitution),
            ("ceiling_restitution", self.ceiling_restitution),
            ("floor_restitution", self.floor_restitution),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(SettingsError::RestitutionOutOfRange { name, value });
            }
        }
        for (name, value) in [
            ("drag_cutoff", self.drag_cutoff),
            ("bounce_threshold", self.bounce_threshold),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::NegativeCutoff { name, value });
            }
        }
        let min = self.min_bounce_threshold();
        if self.bounce_threshold <= min {
            return Err(SettingsError::BounceThresholdTooLow {
                bounce_threshold: self.bounce_threshold,
                min,
            });
        }

        for period_ms in [self.ball_tick_ms, self.backboard_tick_ms] {
            if period_ms.is_nan() || period_ms <= 0.0 {
                return Err(SettingsError::NonPositiveTickPeriod { period_ms });
            }
        }
        if self.max_miss == 0 {
            return Err(SettingsError::ZeroMaxMiss);
        }
        Ok(())
    }

    /// Load settings from storage, falling back to defaults
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    settings.power = clamp_power(settings.power);
                    match settings.validate() {
                        Ok(()) => {
                            log::info!("Loaded settings from storage");
                            return settings;
                        }
                        Err(e) => log::warn!("Ignoring invalid settings: {e}"),
                    }
                }
                Err(e) => log::warn!("Ignoring malformed settings: {e}"),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {e}"),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to storage (best effort)
    pub fn save(&self, storage: &mut dyn Storage) {
        match serde_json::to_string(self) {
            Ok(json) => match storage.set(Self::STORAGE_KEY, &json) {
                Ok(()) => log::info!("Settings saved"),
                Err(e) => log::warn!("Could not save settings: {e}"),
            },
            Err(e) => log::warn!("Could not serialize settings: {e}"),
        }
    }
}

/// Clamp a launch power into `[MIN_POWER, MAX_POWER]`
pub fn clamp_power(power: f32) -> f32 {
    if power.is_nan() {
        return DEFAULT_POWER;
    }
    power.clamp(MIN_POWER, MAX_POWER)
}
