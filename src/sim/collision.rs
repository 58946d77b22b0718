//! Playfield boundary resolution
//!
//! Runs on the post-step position: walls, then ceiling, then the launch floor.
//! Bounces reflect the velocity component away from the boundary and scale it
//! by that boundary's restitution.

use glam::Vec2;

use super::state::Ball;
use crate::settings::Settings;

/// Boundaries touched during one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub wall: bool,
    pub ceiling: bool,
    pub floor_bounce: bool,
    /// Ball came to rest on the floor at the end of a flight
    pub settled: bool,
}

/// Clamp the ball into the playfield and apply bounces
pub fn resolve(ball: &mut Ball, settings: &Settings) -> Contacts {
    let mut contacts = Contacts::default();

    let max_x = settings.max_ball_x();
    if ball.pos.x < 0.0 {
        ball.pos.x = 0.0;
        ball.vel.x = ball.vel.x.abs() * settings.wall_restitution;
        contacts.wall = true;
    } else if ball.pos.x > max_x {
        ball.pos.x = max_x;
        ball.vel.x = -ball.vel.x.abs() * settings.wall_restitution;
        contacts.wall = true;
    }

    if ball.pos.y <= 0.0 {
        ball.pos.y = 0.0;
        ball.vel.y = ball.vel.y.abs() * settings.ceiling_restitution;
        contacts.ceiling = true;
    }

    if ball.pos.y >= settings.launch_height {
        ball.pos.y = settings.launch_height;
        if ball.vel.y.abs() > settings.bounce_threshold {
            ball.vel.y = -ball.vel.y.abs() * settings.floor_restitution;
            contacts.floor_bounce = true;
        } else {
            // A ball that was already resting does not settle again
            contacts.settled = ball.vel != Vec2::ZERO;
            ball.vel = Vec2::ZERO;
        }
    }

    contacts
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::sim::physics::advance;

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            scored_this_flight: false,
        }
    }

    #[test]
    fn test_left_wall_reflects_with_restitution() {
        let settings = Settings::default();
        let mut ball = ball_at(-4.0, 300.0, -10.0, 0.0);
        let contacts = resolve(&mut ball, &settings);
        assert!(contacts.wall);
        assert_eq!(ball.pos.x, 0.0);
        assert!((ball.vel.x - 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_right_wall_reflects_with_restitution() {
        let settings = Settings::default();
        let mut ball = ball_at(settings.max_ball_x() + 3.0, 300.0, 5.0, 0.0);
        resolve(&mut ball, &settings);
        assert_eq!(ball.pos.x, settings.max_ball_x());
        assert!((ball.vel.x + 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_ceiling_reflects_downward() {
        let settings = Settings::default();
        let mut ball = ball_at(100.0, -7.0, 0.0, -8.0);
        let contacts = resolve(&mut ball, &settings);
        assert!(contacts.ceiling);
        assert_eq!(ball.pos.y, 0.0);
        assert!((ball.vel.y - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_fast_floor_hit_bounces() {
        let settings = Settings::default();
        let mut ball = ball_at(100.0, settings.launch_height + 5.0, 1.0, 10.0);
        let contacts = resolve(&mut ball, &settings);
        assert!(contacts.floor_bounce);
        assert!(!contacts.settled);
        assert_eq!(ball.pos.y, settings.launch_height);
        assert!((ball.vel.y + 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_slow_floor_hit_settles() {
        let settings = Settings::default();
        let mut ball = ball_at(100.0, settings.launch_height + 1.0, 0.5, 6.0);
        let contacts = resolve(&mut ball, &settings);
        assert!(contacts.settled);
        assert!(!contacts.floor_bounce);
        assert_eq!(ball.vel, Vec2::ZERO);
    }

    #[test]
    fn test_resting_ball_does_not_settle_again() {
        let settings = Settings::default();
        let mut ball = ball_at(100.0, settings.launch_height, 0.0, 0.0);
        let contacts = resolve(&mut ball, &settings);
        assert_eq!(contacts, Contacts::default());
    }

    #[test]
    fn test_dropped_ball_eventually_settles() {
        let settings = Settings::default();
        let mut ball = ball_at(100.0, 0.0, 0.0, 0.0);
        let mut bounces = 0;
        let mut settled = false;
        for _ in 0..2000 {
            advance(&mut ball, &settings);
            let contacts = resolve(&mut ball, &settings);
            if contacts.floor_bounce {
                bounces += 1;
            }
            if contacts.settled {
                settled = true;
                break;
            }
        }
        assert!(settled);
        assert!(bounces >= 1);
    }

    proptest! {
        #[test]
        fn prop_ball_stays_in_bounds_and_settles(
            x in 0.0f32..340.0,
            y in 0.0f32..700.0,
            vx in -40.0f32..40.0,
            vy in -40.0f32..40.0,
        ) {
            let settings = Settings::default();
            let mut ball = ball_at(x, y, vx, vy);
            let mut settled = false;
            for _ in 0..5000 {
                advance(&mut ball, &settings);
                let contacts = resolve(&mut ball, &settings);
                prop_assert!(ball.pos.x >= 0.0 && ball.pos.x <= settings.max_ball_x());
                prop_assert!(ball.pos.y >= 0.0 && ball.pos.y <= settings.launch_height);
                if contacts.settled || ball.is_resting(&settings) {
                    settled = true;
                    break;
                }
            }
            prop_assert!(settled);
        }
    }
}
