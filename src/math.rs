//! Scalar precision and small numeric helpers shared by the rotation types and filters

use core::fmt::Debug;

use nalgebra::{Scalar, SimdRealField};
use num_traits::{Float, FloatConst, NumAssign};

/// Floating-point precision a filter instance runs at, end to end.
///
/// Implemented for `f32` and `f64`. Every type in this crate that does
/// trigonometry is generic over one `Real`, so a filter never mixes
/// precisions between its quaternion, matrices and angles.
///
/// Transcendental functions come from [`num_traits::Float`] backed by `libm`,
/// which keeps the crate usable without `std`. The `SimdRealField` bound lets
/// the quaternion product go through nalgebra.
pub trait Real:
    Scalar + Float + FloatConst + NumAssign + SimdRealField<Element = Self> + Default + Debug
{
    /// Converts an `f64` literal into this precision.
    fn constant(value: f64) -> Self;
}

impl Real for f32 {
    #[inline]
    fn constant(value: f64) -> Self {
        value as f32
    }
}

impl Real for f64 {
    #[inline]
    fn constant(value: f64) -> Self {
        value
    }
}

/// Wraps `value` into the half-open interval `[lower, lower + width)`.
///
/// Uses a floored modulo, so negative inputs wrap from the top of the
/// interval and `lower + width` maps to `lower`.
pub fn normalize_periodic<T: Real>(value: T, lower: T, width: T) -> T {
    let offset = value - lower;
    let wrapped = offset - (offset / width).floor() * width;

    // a tiny negative offset can round up to exactly `width`
    if wrapped >= width || wrapped < T::zero() {
        lower
    } else {
        lower + wrapped
    }
}

/// Signed difference `to - from` folded into `[-width/2, width/2)`.
pub(crate) fn shortest_difference<T: Real>(from: T, to: T, width: T) -> T {
    let half = width / T::constant(2.0);
    normalize_periodic(to - from + half, T::zero(), width) - half
}

/// Converts an integer elapsed time into seconds.
#[inline]
pub(crate) fn ticks_to_seconds<T: Real>(ticks: u32, ticks_per_second: f64) -> T {
    T::constant(f64::from(ticks) / ticks_per_second)
}
