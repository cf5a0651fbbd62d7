//! Progression module - level thresholds and gravity speed
//!
//! Pure functions over the fixed tables in [`crate::types`]. Levels are clamped to
//! [`MAX_LEVEL`], so every lookup stays inside the tables no matter how a level
//! was reached.
//!
//! The two ways a level can rise are kept apart: [`level_after_score`] is the
//! scoring rule, [`force_level_up`] is the explicit command.

use crate::types::{LEVEL_THRESHOLDS, MAX_LEVEL, TICK_INTERVALS};

#[inline]
fn table_index(level: u32) -> usize {
    level.min(MAX_LEVEL) as usize
}

/// Score that must be strictly exceeded to leave `level`
pub fn level_threshold(level: u32) -> u32 {
    LEVEL_THRESHOLDS[table_index(level)]
}

/// Idle steps allowed at `level` before gravity pulls the piece down
pub fn tick_interval(level: u32) -> u32 {
    TICK_INTERVALS[table_index(level)]
}

/// Level after a score change: at most one step up, never past [`MAX_LEVEL`]
///
/// Clearing several lines at once still raises the level only once.
pub fn level_after_score(level: u32, score: u32) -> u32 {
    if score > level_threshold(level) {
        level.saturating_add(1).min(MAX_LEVEL)
    } else {
        level.min(MAX_LEVEL)
    }
}

/// Level after an explicit level-up command
pub fn force_level_up(level: u32) -> u32 {
    level.saturating_add(1).min(MAX_LEVEL)
}
