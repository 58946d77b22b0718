//! Rim pass detection
//!
//! A pass needs the ball's top edge inside the rim band
//! `[rim_y - rim_band_above, rim_y + rim_band_below]` and the ball's horizontal
//! center inside the rim's current extent. Direction of travel is not checked.

use super::state::{Backboard, Ball};
use crate::settings::Settings;

/// Whether the ball's vertical position lies within the rim band
pub fn in_rim_band(ball: &Ball, settings: &Settings) -> bool {
    let top = settings.rim_y - settings.rim_band_above;
    let bottom = settings.rim_y + settings.rim_band_below;
    (top..=bottom).contains(&ball.pos.y)
}

/// Whether the ball's horizontal center lies over the rim opening
pub fn over_rim(ball: &Ball, backboard: &Backboard, settings: &Settings) -> bool {
    let (left, right) = backboard.rim_extent(settings);
    let center_x = ball.center(settings).x;
    (left..=right).contains(&center_x)
}

/// Whether this ball position counts as a scoring pass
pub fn rim_pass(ball: &Ball, backboard: &Backboard, settings: &Settings) -> bool {
    in_rim_band(ball, settings) && over_rim(ball, backboard, settings)
}
