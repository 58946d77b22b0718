//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time/ticks (two independent fixed cadences)

pub mod clock;

pub use clock::{Cadence, Scheduler, TickKind};
