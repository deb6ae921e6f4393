//! Scalar helpers shared by the world and the systems.

use std::f32::consts::{PI, TAU};

/// Linear interpolation between `start` and `end`.
#[must_use]
pub fn lerp(start: f32, end: f32, amount: f32) -> f32 {
    (1.0 - amount) * start + amount * end
}

/// Wraps an angle into the half-open interval `(-PI, PI]`.
#[must_use]
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }

    let mut wrapped = angle % TAU;
    if wrapped > PI {
        wrapped -= TAU;
    } else if wrapped <= -PI {
        wrapped += TAU;
    }
    wrapped
}

/// Eases `current` toward `target` along the shortest arc.
///
/// `gain` is the fraction of the remaining angular difference covered by this call.
#[must_use]
pub fn ease_angle(current: f32, target: f32, gain: f32) -> f32 {
    current + normalize_angle(target - current) * gain
}
