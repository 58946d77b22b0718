//! Game state and core simulation types
//!
//! `GameState` is the single authoritative snapshot. Tick functions mutate it
//! in place; renderers only read it between ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Current phase of a shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball at rest at the launch point, waiting for a launch
    #[default]
    Idle,
    /// Ball is moving; ends when it settles at launch height
    InFlight,
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner; y grows downward, launch height is the floor
    pub pos: Vec2,
    pub vel: Vec2,
    /// Set once the ball has passed the rim during the current flight
    pub scored_this_flight: bool,
}

impl Ball {
    /// Ball resting at the launch point
    pub fn at_launch(settings: &Settings) -> Self {
        Self {
            pos: Vec2::new(settings.launch_x, settings.launch_height),
            vel: Vec2::ZERO,
            scored_this_flight: false,
        }
    }

    /// Center of the ball sprite
    pub fn center(&self, settings: &Settings) -> Vec2 {
        self.pos + Vec2::splat(settings.ball_size / 2.0)
    }

    /// Resting exactly at launch height with no vertical motion
    pub fn is_resting(&self, settings: &Settings) -> bool {
        self.pos.y >= settings.launch_height && self.vel.y == 0.0
    }
}

/// Horizontal travel direction of the backboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// The moving backboard carrying the rim
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Backboard {
    /// Horizontal offset, within `[0, width - backboard_width]`
    pub left_edge: f32,
    pub direction: Direction,
    /// Speed applied on the last backboard tick
    pub speed: f32,
}

impl Backboard {
    /// Backboard centered in the playfield, heading right
    pub fn centered(settings: &Settings) -> Self {
        Self {
            left_edge: settings.centered_backboard_left(),
            direction: Direction::Right,
            speed: 0.0,
        }
    }

    /// Horizontal rim extent `(left, right)`
    pub fn rim_extent(&self, settings: &Settings) -> (f32, f32) {
        let left = self.left_edge + settings.rim_offset;
        (left, left + settings.rim_width)
    }

    /// Center of the rim opening
    pub fn rim_center(&self, settings: &Settings) -> Vec2 {
        let (left, right) = self.rim_extent(settings);
        Vec2::new((left + right) / 2.0, settings.rim_y)
    }
}

/// Score and miss streak of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Round {
    pub score: u32,
    /// Consecutive non-scoring settles, always below `max_miss`
    pub miss_streak: u32,
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Launched { vel: Vec2 },
    WallBounce,
    CeilingBounce,
    FloorBounce,
    Scored { score: u32 },
    Settled { scored: bool },
    Missed { streak: u32 },
    RoundOver { final_score: u32 },
    /// A round-ending score was checked against the leaderboard
    Qualification { score: u32, rank: Option<usize> },
    NameRequired { score: u32, rank: usize },
    LeaderboardUpdated { rank: usize },
    DifficultyChanged { speed: f32 },
}

/// Most events kept between drains; the oldest are dropped first
pub const MAX_PENDING_EVENTS: usize = 256;

/// Complete simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub ball: Ball,
    pub backboard: Backboard,
    pub round: Round,
    pub phase: GamePhase,
    /// Ball tick counter
    pub ball_ticks: u64,
    /// Backboard tick counter
    pub backboard_ticks: u64,
    /// Pending events (not persisted)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            ball: Ball::at_launch(settings),
            backboard: Backboard::centered(settings),
            round: Round::default(),
            phase: GamePhase::Idle,
            ball_ticks: 0,
            backboard_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Queue an event, dropping the oldest once `MAX_PENDING_EVENTS` are pending
    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undrained_events_are_capped() {
        let mut state = GameState::new(&Settings::default());
        for streak in 0..(MAX_PENDING_EVENTS as u32 + 10) {
            state.push_event(GameEvent::Missed { streak });
        }
        assert_eq!(state.events.len(), MAX_PENDING_EVENTS);
        assert_eq!(state.events[0], GameEvent::Missed { streak: 10 });

        let drained = state.drain_events();
        assert_eq!(drained.len(), MAX_PENDING_EVENTS);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_new_state_is_idle_at_launch_point() {
        let settings = Settings::default();
        let state = GameState::new(&settings);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(
            state.ball.pos,
            Vec2::new(settings.launch_x, settings.launch_height)
        );
        assert!(state.ball.is_resting(&settings));
        assert_eq!(state.round, Round::default());
    }

    #[test]
    fn test_backboard_starts_centered() {
        let settings = Settings::default();
        let board = Backboard::centered(&settings);
        assert_eq!(board.left_edge, 140.0);
        assert_eq!(board.direction, Direction::Right);
        assert_eq!(board.rim_extent(&settings), (150.0, 250.0));
        assert_eq!(board.rim_center(&settings), Vec2::new(200.0, 100.0));
    }
}
