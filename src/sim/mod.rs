//! Tick-stepped simulation module
//!
//! All gameplay logic lives here:
//! - Fixed per-tick steps only (velocities are units per tick)
//! - One authoritative `GameState`, mutated in place
//! - No rendering, storage or platform dependencies

pub mod aim;
pub mod collision;
pub mod difficulty;
pub mod physics;
pub mod scoring;
pub mod state;
pub mod tick;

pub use aim::{aim_at_rim, solve_launch};
pub use collision::{Contacts, resolve};
pub use difficulty::{speed_for_score, step_backboard};
pub use physics::advance;
pub use scoring::rim_pass;
pub use state::{Backboard, Ball, Direction, GameEvent, GamePhase, GameState, Round};
pub use tick::{RoundEnd, backboard_tick, ball_tick, launch, on_settle};
