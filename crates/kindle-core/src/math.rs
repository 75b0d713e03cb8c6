//! Rounding helpers for grid snapping

/// Floor without a libm call. Only valid for `-32768.0 < x < 32768.0`.
#[inline]
pub fn fast_floor(x: f32) -> i32 {
    (x + 32768.0) as i32 - 32768
}

/// Ceil without a libm call. Only valid for `-32768.0 < x < 32768.0`.
#[inline]
pub fn fast_ceil(x: f32) -> i32 {
    32768 - (32768.0 - x) as i32
}

/// Round `value` down to a multiple of `n`
pub fn floor_to(value: f32, n: f32) -> f32 {
    (value / n).floor() * n
}

/// Round `value` up to a multiple of `n`
pub fn ceil_to(value: f32, n: f32) -> f32 {
    (value / n).ceil() * n
}

/// Round `value` to the nearest multiple of `n`
pub fn round_to(value: f32, n: f32) -> f32 {
    (value / n).round() * n
}
