//! Backboard motion and difficulty ramp
//!
//! The backboard oscillates between the playfield edges on its own cadence.
//! Its speed is a step function of the current score.

use super::state::{Backboard, Direction};
use crate::consts::*;
use crate::settings::Settings;

/// Backboard speed (units per backboard tick) for a score.
///
/// Stationary below 5 points, then 2 and +2 for every further 5 points.
pub fn speed_for_score(score: u32) -> f32 {
    if score < DIFFICULTY_START_SCORE {
        return 0.0;
    }
    let steps = (score - DIFFICULTY_START_SCORE) / DIFFICULTY_STEP_SCORE;
    DIFFICULTY_BASE_SPEED + steps as f32 * DIFFICULTY_SPEED_STEP
}

/// Move the backboard one tick, bouncing off the playfield edges
pub fn step_backboard(backboard: &mut Backboard, speed: f32, settings: &Settings) {
    let max_left = settings.max_backboard_left();
    backboard.speed = speed;
    backboard.left_edge += speed * backboard.direction.sign();

    if backboard.left_edge <= 0.0 {
        backboard.left_edge = 0.0;
        backboard.direction = Direction::Right;
    } else if backboard.left_edge >= max_left {
        backboard.left_edge = max_left;
        backboard.direction = Direction::Left;
    }
}
