//! Tick functions
//!
//! Two independent entry points, one per cadence:
//! - `ball_tick`: physics, collisions, rim check, round lifecycle
//! - `backboard_tick`: difficulty-scaled backboard motion

use glam::Vec2;

use super::state::{Ball, GameEvent, GamePhase, GameState};
use super::{collision, difficulty, physics, scoring};
use crate::settings::Settings;

/// A round ended on the miss limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundEnd {
    /// Score held before the reset
    pub final_score: u32,
}

/// Launch the resting ball. Ignored while a shot is in the air.
pub fn launch(state: &mut GameState, vel: Vec2) -> bool {
    if state.phase != GamePhase::Idle || vel == Vec2::ZERO || !vel.is_finite() {
        return false;
    }
    state.ball.vel = vel;
    state.ball.scored_this_flight = false;
    state.phase = GamePhase::InFlight;
    state.push_event(GameEvent::Launched { vel });
    true
}

/// Advance the ball by one tick
pub fn ball_tick(state: &mut GameState, settings: &Settings) -> Option<RoundEnd> {
    state.ball_ticks += 1;
    if state.phase != GamePhase::InFlight {
        return None;
    }

    physics::advance(&mut state.ball, settings);
    let contacts = collision::resolve(&mut state.ball, settings);
    if contacts.wall {
        state.push_event(GameEvent::WallBounce);
    }
    if contacts.ceiling {
        state.push_event(GameEvent::CeilingBounce);
    }
    if contacts.floor_bounce {
        state.push_event(GameEvent::FloorBounce);
    }

    if !state.ball.scored_this_flight
        && scoring::rim_pass(&state.ball, &state.backboard, settings)
    {
        state.ball.scored_this_flight = true;
        state.round.score += 1;
        state.round.miss_streak = 0;
        log::debug!("Scored, score now {}", state.round.score);
        state.push_event(GameEvent::Scored {
            score: state.round.score,
        });
    }

    if contacts.settled {
        return on_settle(state, settings);
    }
    None
}

/// End the flight: count a miss if nothing scored, end the round on the limit
pub fn on_settle(state: &mut GameState, settings: &Settings) -> Option<RoundEnd> {
    let scored = state.ball.scored_this_flight;
    state.push_event(GameEvent::Settled { scored });
    state.ball = Ball::at_launch(settings);
    state.phase = GamePhase::Idle;

    if scored {
        return None;
    }

    state.round.miss_streak += 1;
    log::debug!(
        "Missed ({}/{})",
        state.round.miss_streak,
        settings.max_miss
    );
    state.push_event(GameEvent::Missed {
        streak: state.round.miss_streak,
    });
    if state.round.miss_streak < settings.max_miss {
        return None;
    }

    let final_score = state.round.score;
    state.round.score = 0;
    state.round.miss_streak = 0;
    log::info!("Round over with score {final_score}");
    state.push_event(GameEvent::RoundOver { final_score });
    Some(RoundEnd { final_score })
}

/// Advance the backboard by one tick
pub fn backboard_tick(state: &mut GameState, settings: &Settings) {
    state.backboard_ticks += 1;
    let speed = difficulty::speed_for_score(state.round.score);
    if speed != state.backboard.speed {
        log::debug!("Backboard speed {} -> {speed}", state.backboard.speed);
        state.push_event(GameEvent::DifficultyChanged { speed });
    }
    difficulty::step_backboard(&mut state.backboard, speed, settings);
}
