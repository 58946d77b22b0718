//! Ball integration
//!
//! Tick-stepped: one call is one ball tick. Velocities are in units per tick.

use super::state::Ball;
use crate::settings::Settings;

/// Advance the ball by one tick: move, then apply drag and gravity
pub fn advance(ball: &mut Ball, settings: &Settings) {
    // Gravity is suspended only while resting on the launch floor
    let resting = ball.is_resting(settings);

    ball.pos.x += ball.vel.x;
    ball.vel.x = if ball.vel.x.abs() > settings.drag_cutoff {
        ball.vel.x * settings.drag
    } else {
        0.0
    };

    ball.pos.y += ball.vel.y;
    if !resting {
        ball.vel.y += settings.gravity;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    #[test]
    fn test_resting_ball_stays_put() {
        let settings = Settings::default();
        let mut ball = Ball::at_launch(&settings);
        advance(&mut ball, &settings);
        assert_eq!(ball, Ball::at_launch(&settings));
    }

    #[test]
    fn test_gravity_accumulates_in_flight() {
        let settings = Settings::default();
        let mut ball = Ball::at_launch(&settings);
        ball.vel = Vec2::new(0.0, -10.0);

        advance(&mut ball, &settings);
        assert_eq!(ball.pos.y, settings.launch_height - 10.0);
        assert!((ball.vel.y - (-10.0 + settings.gravity)).abs() < 1e-6);

        advance(&mut ball, &settings);
        assert!((ball.vel.y - (-10.0 + 2.0 * settings.gravity)).abs() < 1e-6);
    }

    #[test]
    fn test_gravity_applies_above_floor_even_at_zero_velocity() {
        let settings = Settings::default();
        let mut ball = Ball::at_launch(&settings);
        ball.pos.y = 300.0;

        advance(&mut ball, &settings);
        assert_eq!(ball.pos.y, 300.0);
        assert_eq!(ball.vel.y, settings.gravity);
    }

    #[test]
    fn test_drag_slows_then_snaps_horizontal_speed() {
        let settings = Settings::default();
        let mut ball = Ball::at_launch(&settings);
        ball.pos.y = 300.0;
        ball.vel.x = 2.0;

        advance(&mut ball, &settings);
        assert!((ball.vel.x - 2.0 * settings.drag).abs() < 1e-6);
        assert!((ball.pos.x - (settings.launch_x + 2.0)).abs() < 1e-6);

        ball.vel.x = 0.09;
        advance(&mut ball, &settings);
        assert_eq!(ball.vel.x, 0.0);
    }
}
