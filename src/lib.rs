//! Hoop Shot - a moving-hoop basketball arcade game core
//!
//! Core modules:
//! - `sim`: Tick-stepped simulation (ball physics, collisions, scoring, backboard)
//! - `game`: Authoritative game snapshot wiring the simulation to its collaborators
//! - `leaderboard`: Ranked top-5 table with injected storage
//! - `persistence`: Key-value storage trait and backends
//! - `platform`: Tick scheduling for the two independent cadences
//! - `settings`: Data-driven game tuning

pub mod game;
pub mod leaderboard;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::{FrameView, Game, NameError, NamePrompt};
pub use leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardManager};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Ball physics tick period (ms)
    pub const BALL_TICK_MS: f32 = 30.0;
    /// Backboard motion tick period (ms), independent of the ball cadence
    pub const BACKBOARD_TICK_MS: f32 = 20.0;
    /// Maximum ticks per cadence per scheduler advance to prevent spiral of death
    pub const MAX_CATCHUP_TICKS: u32 = 8;

    /// Gravity accumulator (units/tick²)
    pub const GRAVITY: f32 = 0.12;
    /// Horizontal air drag factor applied per tick
    pub const AIR_DRAG: f32 = 0.985;
    /// Horizontal speed below which vx snaps to zero
    pub const DRAG_CUTOFF: f32 = 0.1;

    /// Restitution coefficients
    pub const WALL_RESTITUTION: f32 = 0.6;
    pub const CEILING_RESTITUTION: f32 = 0.5;
    pub const FLOOR_RESTITUTION: f32 = 0.4;
    /// Vertical speed at the floor above which the ball bounces instead of settling
    pub const BOUNCE_THRESHOLD: f32 = 6.0;

    /// Consecutive misses that end a round
    pub const MAX_MISS: u32 = 3;

    /// Launch power (flight time in ticks) range
    pub const MIN_POWER: f32 = 20.0;
    pub const MAX_POWER: f32 = 50.0;
    pub const DEFAULT_POWER: f32 = 32.0;

    /// Score at which the backboard starts moving, and the step width after that
    pub const DIFFICULTY_START_SCORE: u32 = 5;
    pub const DIFFICULTY_STEP_SCORE: u32 = 5;
    /// Backboard speed (units/backboard tick) at the first step and per further step
    pub const DIFFICULTY_BASE_SPEED: f32 = 2.0;
    pub const DIFFICULTY_SPEED_STEP: f32 = 2.0;
}
