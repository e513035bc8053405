//! Quadratic leveling curve and progress-to-next-level.
//!
//! Level `L` starts at `L² × 100` XP, so level 1 needs 100 XP, level 2 needs
//! 400, level 10 needs 10 000. Levels cap at 99.

use serde::Serialize;

pub const MAX_LEVEL: u32 = 99;

/// XP scale of the curve: `level = floor(sqrt(xp / XP_PER_LEVEL_UNIT))`.
pub const XP_PER_LEVEL_UNIT: u64 = 100;

/// Level reached with `xp` cumulative experience, in `[0, 99]`.
///
/// `floor(sqrt(xp / 100))` computed in integers: for integer `L`,
/// `L² ≤ xp/100` holds exactly when `L² ≤ floor(xp/100)`.
pub fn level_for_xp(xp: u64) -> u32 {
    let level = (xp / XP_PER_LEVEL_UNIT).isqrt();
    level.min(MAX_LEVEL as u64) as u32
}

/// Cumulative XP at which `level` begins. Levels above 99 are clamped.
pub fn xp_for_level(level: u32) -> u64 {
    let level = level.min(MAX_LEVEL) as u64;
    level * level * XP_PER_LEVEL_UNIT
}

/// Coerce a raw XP reading into the engine's domain.
///
/// NaN, negative and infinite values become 0; fractions are floored.
pub fn sanitize_xp(raw: f64) -> u64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    // `as` saturates at u64::MAX for out-of-range floats.
    raw.floor() as u64
}

/// Where a skill sits on the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub level: u32,
    /// XP earned since the current level's floor.
    pub xp_into_level: u64,
    /// XP still needed to reach the next level; 0 at the cap.
    pub xp_to_next: u64,
    /// Whole-number percent through the current level, 0..=100.
    pub percent: u32,
}

impl Progress {
    pub fn is_max_level(&self) -> bool {
        self.level >= MAX_LEVEL
    }
}

pub fn progress(xp: u64) -> Progress {
    let level = level_for_xp(xp);
    let current_floor = xp_for_level(level);

    if level >= MAX_LEVEL {
        return Progress {
            level,
            xp_into_level: xp.saturating_sub(current_floor),
            xp_to_next: 0,
            percent: 100,
        };
    }

    let next_floor = xp_for_level(level + 1);
    let xp_into_level = xp.saturating_sub(current_floor);
    let total_needed = next_floor.saturating_sub(current_floor).max(1);

    Progress {
        level,
        xp_into_level,
        xp_to_next: next_floor.saturating_sub(xp),
        percent: (xp_into_level * 100 / total_needed) as u32,
    }
}
