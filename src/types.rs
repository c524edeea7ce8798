//! Filter settings and conventions

use crate::math::Real;

/// Where a filter expects the horizontal magnetic field to lie
///
/// Every filter here works in a z-up earth frame, so a level accelerometer at
/// rest reads `(0, 0, +g)`. The two variants only disagree on which horizontal
/// axis the magnetometer reference is aligned with, and
/// [`AttitudeFilter::convention`](crate::AttitudeFilter::convention) reports
/// the one a filter uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Convention {
    /// Field reference on `+x`, used by the complementary and Madgwick filters.
    /// A zero-heading estimate has the magnetometer's horizontal part along x.
    #[default]
    Nwu,
    /// Field reference on `+y`, used by the Mahony filter.
    Enu,
}

/// Fusion algorithm selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterKind {
    /// Euler-angle complementary filter
    Complementary,
    /// Gradient-descent AHRS
    Madgwick,
    /// Explicit complementary filter with gyroscope bias estimation
    Mahony,
}

/// Complementary filter settings
///
/// # Example
/// ```
/// use attitude_estimation::{ComplementaryFilter, ComplementarySettings};
///
/// let settings = ComplementarySettings { alpha: 0.98f32 };
/// let filter = ComplementaryFilter::with_settings(settings);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplementarySettings<T> {
    /// Weight of the integrated gyroscope estimate, in `[0, 1]`
    ///
    /// Higher values trust the gyroscope more and smooth out accelerometer
    /// and magnetometer noise; lower values track the tilt and heading
    /// measurements more closely.
    pub alpha: T,
}

impl<T: Real> Default for ComplementarySettings<T> {
    fn default() -> Self {
        Self {
            alpha: T::constant(0.9),
        }
    }
}

/// Madgwick filter settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MadgwickSettings<T> {
    /// Gradient-descent step size (β)
    ///
    /// Roughly `sqrt(3/4)` times the expected gyroscope error in rad/s.
    pub beta: T,
}

impl<T: Real> Default for MadgwickSettings<T> {
    fn default() -> Self {
        Self {
            beta: T::constant(0.866 * 0.05),
        }
    }
}

/// Mahony filter settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MahonySettings<T> {
    /// Proportional gain on the measured rotation error
    pub kp: T,
    /// Integral gain driving the gyroscope bias estimate
    pub ki: T,
}

impl<T: Real> Default for MahonySettings<T> {
    fn default() -> Self {
        Self {
            kp: T::constant(1.0),
            ki: T::constant(0.3),
        }
    }
}
