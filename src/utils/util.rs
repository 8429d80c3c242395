//! # Utility Module
//!
//! Small numeric helpers shared by the mesh stages.
//!
//! ## Example Function: `inverse_lerp`
//!
//! `inverse_lerp` maps a value to its fractional position between two bounds,
//! clamped to `[0, 1]`. It is what turns vertex positions into texture
//! coordinates.

/// Clamps a value between a minimum and maximum.
///
/// # Examples
///
/// ```
/// use cavern::utils::util::clamp;
///
/// assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
/// assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
/// assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
/// ```
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Fractional position of `value` between `a` and `b`, clamped to `[0, 1]`.
/// A degenerate range yields 0.
///
/// # Examples
///
/// ```
/// use cavern::utils::util::inverse_lerp;
///
/// assert_eq!(inverse_lerp(-2.0, 2.0, 0.0), 0.5);
/// assert_eq!(inverse_lerp(-2.0, 2.0, 9.0), 1.0);
/// ```
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    clamp((value - a) / (b - a), 0.0, 1.0)
}
