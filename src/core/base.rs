//! Type definitions and constants.
use std::ops::{Sub, Add, Mul};

#[cfg(feature = "float_as_double")]
mod float_mod {
    pub type Float = f64;
    pub mod consts {
        pub use std::f64::consts::*;
    }
}
#[cfg(not(feature = "float_as_double"))]
mod float_mod {
    pub type Float = f32;
    pub mod consts {
        pub use std::f32::consts::*;
    }
}

pub use float_mod::Float;
pub mod consts {
    use super::float_mod::Float;
    pub use super::float_mod::consts::*;
    pub const FRAC_PI_180: Float = PI / 180.0;
    pub const FRAC_180_PI: Float = 180.0 / PI;
    /// Default allowed deviation of a rotation quaternion's norm from 1.
    pub const UNIT_TOLERANCE: Float = 1e-4;
    /// Below this length a quaternion's vector part is treated as zero.
    pub const SMALL_ANGLE: Float = 1e-6;
}

/// Linearly interpolate between two values.
#[inline]
pub fn lerp<S, T>(t: S, a: T, b: T) -> T
where
S: num::One + Sub<S, Output = S> + Copy,
T: Add<T, Output=T> + Mul<S, Output=T>
{
    a * (S::one() - t) + b * t
}

/// Convert an angle from degrees into radians.
pub fn radians(deg: Float) -> Float {
    consts::FRAC_PI_180 * deg
}

/// Convert an angle from radians into degrees.
pub fn degrees(rad: Float) -> Float {
    consts::FRAC_180_PI * rad
}

/// Floored modulo, the result has the sign of `b`.
#[inline]
pub fn modulo(a: Float, b: Float) -> Float {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r }
}

/// Find the greatest index `i` in `0..size` for which `predicate(i)` holds,
/// assuming the predicate is true for a prefix of the range and false after.
/// Returns `None` when the predicate fails at index 0.
pub fn find_previous_index<T>(size: usize, predicate: T) -> Option<usize>
where
T: Fn(usize) -> bool
{
    let mut first = 0;
    let mut len = size;
    while len > 0 {
        let half = len >> 1;
        let middle = first + half;
        // Bisect range based on value of _pred_ at _middle_
        if predicate(middle) {
            first = middle + 1;
            len -= half + 1;
        } else {
            len = half;
        }
    }
    first.checked_sub(1)
}

/// Returns true if the slice is in ascending order without repeats.
pub fn is_strictly_ascending(values: &[Float]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}
