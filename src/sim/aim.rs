//! Launch velocity solving
//!
//! Picks the initial velocity whose ballistic path reaches a target after
//! `power` ticks: `vx = dx / t`, `vy = (dy - g·t²/2) / t`.

use glam::Vec2;

use super::state::{Backboard, Ball};
use crate::settings::{Settings, clamp_power};

/// Velocity that carries the ball by `delta` in `power` ticks under `gravity`
pub fn solve_launch(delta: Vec2, power: f32, gravity: f32) -> Vec2 {
    let t = clamp_power(power);
    Vec2::new(delta.x / t, (delta.y - 0.5 * gravity * t * t) / t)
}

/// Velocity aimed from the ball's center at the rim center
pub fn aim_at_rim(ball: &Ball, backboard: &Backboard, settings: &Settings, power: f32) -> Vec2 {
    let delta = backboard.rim_center(settings) - ball.center(settings);
    solve_launch(delta, power, settings.gravity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GRAVITY, MAX_POWER, MIN_POWER};

    #[test]
    fn test_solve_launch_reference_shot() {
        let vel = solve_launch(Vec2::new(40.0, -300.0), 32.0, GRAVITY);
        assert!((vel.x - 1.25).abs() < 1e-6);
        assert!((vel.y - (-11.295)).abs() < 1e-3);
    }

    #[test]
    fn test_power_out_of_range_is_clamped() {
        let delta = Vec2::new(100.0, -300.0);
        assert_eq!(
            solve_launch(delta, 5.0, GRAVITY),
            solve_launch(delta, MIN_POWER, GRAVITY)
        );
        assert_eq!(
            solve_launch(delta, 500.0, GRAVITY),
            solve_launch(delta, MAX_POWER, GRAVITY)
        );
    }

    #[test]
    fn test_aim_at_centered_rim_is_vertical() {
        let settings = Settings::default();
        let ball = Ball::at_launch(&settings);
        let board = Backboard::centered(&settings);
        let vel = aim_at_rim(&ball, &board, &settings, 32.0);
        assert_eq!(vel.x, 0.0);
        assert!(vel.y < 0.0);
    }
}
