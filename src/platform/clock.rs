//! Fixed-cadence tick scheduling
//!
//! The ball and the backboard run on separate periodic tasks with different
//! periods. `Scheduler::advance` converts wall-clock time into the ordered
//! list of ticks that came due, interleaving both cadences by due time.

use crate::consts::MAX_CATCHUP_TICKS;
use crate::settings::Settings;

/// Longest frame delta accepted in one advance (ms)
pub const MAX_FRAME_MS: f32 = 250.0;

/// Which periodic task fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Ball,
    Backboard,
}

/// One periodic task
#[derive(Debug, Clone, PartialEq)]
pub struct Cadence {
    period_ms: f64,
    next_due_ms: f64,
}

impl Cadence {
    /// First tick fires one period after `start_ms`
    pub fn new(period_ms: f32, start_ms: f64) -> Self {
        let period_ms = f64::from(period_ms);
        Self {
            period_ms,
            next_due_ms: start_ms + period_ms,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    pub fn next_due_ms(&self) -> f64 {
        self.next_due_ms
    }

    fn is_due(&self, now_ms: f64) -> bool {
        self.next_due_ms <= now_ms
    }

    fn fire(&mut self) {
        self.next_due_ms += self.period_ms;
    }

    /// Drop any backlog so the next tick is one period from now
    fn resync(&mut self, now_ms: f64) -> bool {
        if self.is_due(now_ms) {
            self.next_due_ms = now_ms + self.period_ms;
            return true;
        }
        false
    }
}

/// Drives the ball and backboard cadences
#[derive(Debug, Clone)]
pub struct Scheduler {
    now_ms: f64,
    ball: Cadence,
    backboard: Cadence,
    running: bool,
}

impl Scheduler {
    pub fn new(ball_period_ms: f32, backboard_period_ms: f32) -> Self {
        Self {
            now_ms: 0.0,
            ball: Cadence::new(ball_period_ms, 0.0),
            backboard: Cadence::new(backboard_period_ms, 0.0),
            running: true,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.ball_tick_ms, settings.backboard_tick_ms)
    }

    /// Scheduler time (ms since start)
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn ball(&self) -> &Cadence {
        &self.ball
    }

    pub fn backboard(&self) -> &Cadence {
        &self.backboard
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop both tasks; later advances yield nothing
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Restart both tasks from the current time
    pub fn restart(&mut self) {
        self.ball = Cadence::new(self.ball.period_ms as f32, self.now_ms);
        self.backboard = Cadence::new(self.backboard.period_ms as f32, self.now_ms);
        self.running = true;
    }

    /// Advance time and return the ticks that came due, in due order.
    ///
    /// Ties go to the ball. Each cadence fires at most `MAX_CATCHUP_TICKS`
    /// times per call; older backlog is dropped.
    pub fn advance(&mut self, elapsed_ms: f32) -> Vec<TickKind> {
        let mut ticks = Vec::new();
        if !self.running {
            return ticks;
        }

        let elapsed_ms = if elapsed_ms.is_finite() {
            elapsed_ms.clamp(0.0, MAX_FRAME_MS)
        } else {
            0.0
        };
        self.now_ms += f64::from(elapsed_ms);

        let mut ball_fired = 0;
        let mut backboard_fired = 0;
        loop {
            let ball_due = ball_fired < MAX_CATCHUP_TICKS && self.ball.is_due(self.now_ms);
            let backboard_due =
                backboard_fired < MAX_CATCHUP_TICKS && self.backboard.is_due(self.now_ms);

            let kind = match (ball_due, backboard_due) {
                (false, false) => break,
                (true, false) => TickKind::Ball,
                (false, true) => TickKind::Backboard,
                (true, true) => {
                    if self.ball.next_due_ms <= self.backboard.next_due_ms {
                        TickKind::Ball
                    } else {
                        TickKind::Backboard
                    }
                }
            };

            match kind {
                TickKind::Ball => {
                    self.ball.fire();
                    ball_fired += 1;
                }
                TickKind::Backboard => {
                    self.backboard.fire();
                    backboard_fired += 1;
                }
            }
            ticks.push(kind);
        }

        if self.ball.resync(self.now_ms) {
            log::debug!("Ball cadence fell behind, dropping backlog");
        }
        if self.backboard.resync(self.now_ms) {
            log::debug!("Backboard cadence fell behind, dropping backlog");
        }

        ticks
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        if self.running {
            log::debug!("Scheduler torn down at {:.0} ms", self.now_ms);
        }
    }
}
