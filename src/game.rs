//! Game instance
//!
//! Owns the authoritative `GameState`, the tick scheduler and the leaderboard.
//! Hosts feed it elapsed time and launch commands, drain events, and read a
//! `FrameView` for rendering.

use glam::Vec2;
use serde::Serialize;

use crate::leaderboard::{LeaderboardEntry, LeaderboardManager};
use crate::persistence::Storage;
use crate::platform::{Scheduler, TickKind};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GamePhase, GameState, RoundEnd};

pub use crate::leaderboard::NameError;

/// A round-ending score waiting for the player's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NamePrompt {
    pub score: u32,
    /// Rank the score would take if committed now
    pub rank: usize,
}

/// Read-only copy of everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameView {
    pub ball_pos: Vec2,
    pub ball_size: f32,
    pub phase: GamePhase,
    pub backboard_left: f32,
    pub backboard_width: f32,
    /// Rim extent `(left, right)` and height
    pub rim: (f32, f32),
    pub rim_y: f32,
    pub score: u32,
    pub miss_streak: u32,
    pub misses_left: u32,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub name_prompt: Option<NamePrompt>,
}

/// Game instance holding all state
#[derive(Debug)]
pub struct Game {
    settings: Settings,
    state: GameState,
    scheduler: Scheduler,
    leaderboard: LeaderboardManager,
    name_prompt: Option<NamePrompt>,
}

impl Game {
    /// Create a game; the leaderboard is loaded once from `storage`.
    ///
    /// Invalid settings are replaced by the defaults.
    pub fn new(settings: Settings, storage: Box<dyn Storage>) -> Self {
        Self::with_leaderboard(settings, LeaderboardManager::load(storage))
    }

    pub fn with_leaderboard(settings: Settings, leaderboard: LeaderboardManager) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                log::warn!("Invalid settings ({e}), using defaults");
                Settings::default()
            }
        };
        Self {
            state: GameState::new(&settings),
            scheduler: Scheduler::from_settings(&settings),
            settings,
            leaderboard,
            name_prompt: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn leaderboard(&self) -> &LeaderboardManager {
        &self.leaderboard
    }

    pub fn name_prompt(&self) -> Option<NamePrompt> {
        self.name_prompt
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Set tap-launch power (clamped)
    pub fn set_power(&mut self, power: f32) {
        self.settings.set_power(power);
    }

    /// Launch with an externally resolved velocity
    pub fn launch(&mut self, vel: Vec2) -> bool {
        sim::launch(&mut self.state, vel)
    }

    /// Launch aimed at the current rim center with the configured power
    pub fn tap_launch(&mut self) -> bool {
        self.launch_with_power(self.settings.power)
    }

    /// Launch aimed at the current rim center with a given power
    pub fn launch_with_power(&mut self, power: f32) -> bool {
        let vel = sim::aim_at_rim(&self.state.ball, &self.state.backboard, &self.settings, power);
        self.launch(vel)
    }

    /// Run one ball tick
    pub fn ball_tick(&mut self) {
        if let Some(end) = sim::ball_tick(&mut self.state, &self.settings) {
            self.on_round_end(end);
        }
    }

    /// Run one backboard tick
    pub fn backboard_tick(&mut self) {
        sim::backboard_tick(&mut self.state, &self.settings);
    }

    /// Advance wall-clock time, running every tick that came due.
    /// Returns the number of ticks run.
    ///
    /// Events from these ticks queue up until `drain_events` is called;
    /// hosts that never drain only keep the latest
    /// [`MAX_PENDING_EVENTS`](crate::sim::state::MAX_PENDING_EVENTS).
    pub fn update(&mut self, elapsed_ms: f32) -> usize {
        let ticks = self.scheduler.advance(elapsed_ms);
        for kind in &ticks {
            match kind {
                TickKind::Ball => self.ball_tick(),
                TickKind::Backboard => self.backboard_tick(),
            }
        }
        ticks.len()
    }

    /// Check a finished round against the leaderboard
    fn on_round_end(&mut self, end: RoundEnd) {
        let score = end.final_score;
        if score == 0 {
            return;
        }

        let rank = self.leaderboard.potential_rank(score);
        self.state
            .push_event(GameEvent::Qualification { score, rank });
        match rank {
            Some(rank) => {
                log::info!("Score {score} qualifies for rank {rank}, name required");
                self.name_prompt = Some(NamePrompt { score, rank });
                self.state.push_event(GameEvent::NameRequired { score, rank });
            }
            None => log::info!("Score {score} does not make the leaderboard"),
        }
    }

    /// Commit the pending score under `name`.
    ///
    /// A blank name leaves the prompt active.
    pub fn submit_name(&mut self, name: &str) -> Result<Option<usize>, NameError> {
        let prompt = self.name_prompt.ok_or(NameError::NoPendingPrompt)?;
        let rank = self.leaderboard.commit(name, prompt.score)?;
        self.name_prompt = None;
        if let Some(rank) = rank {
            self.state.push_event(GameEvent::LeaderboardUpdated { rank });
        }
        Ok(rank)
    }

    /// Drop the pending prompt without recording the score
    pub fn dismiss_name_prompt(&mut self) {
        self.name_prompt = None;
    }

    /// Full game reset: ball, round, backboard, prompt and events
    pub fn reset(&mut self) {
        log::info!("Game reset");
        self.state = GameState::new(&self.settings);
        self.name_prompt = None;
    }

    /// Stop both tick tasks
    pub fn shutdown(&mut self) {
        self.scheduler.stop();
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Snapshot for rendering
    pub fn view(&self) -> FrameView {
        let state = &self.state;
        FrameView {
            ball_pos: state.ball.pos,
            ball_size: self.settings.ball_size,
            phase: state.phase,
            backboard_left: state.backboard.left_edge,
            backboard_width: self.settings.backboard_width,
            rim: state.backboard.rim_extent(&self.settings),
            rim_y: self.settings.rim_y,
            score: state.round.score,
            miss_streak: state.round.miss_streak,
            misses_left: self.settings.max_miss.saturating_sub(state.round.miss_streak),
            leaderboard: self.leaderboard.entries().to_vec(),
            name_prompt: self.name_prompt,
        }
    }
}
