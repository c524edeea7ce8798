//! Common interface over the fusion algorithms

use core::time::Duration;

use crate::complementary::ComplementaryFilter;
use crate::madgwick::MadgwickFilter;
use crate::mahony::MahonyFilter;
use crate::math::Real;
use crate::matrix::Vec3;
use crate::quaternion::Quaternion;
use crate::types::{Convention, FilterKind};

/// Attitude estimator fed with one accelerometer, gyroscope and magnetometer
/// sample per call.
///
/// Units: acceleration in m/s², angular rate in rad/s, magnetic field in µT,
/// all in X, Y, Z order. The returned quaternion is a copy; the running
/// estimate stays private to the filter.
///
/// # Example
/// ```
/// use core::time::Duration;
/// use attitude_estimation::{AttitudeFilter, Estimator, FilterKind, Vec3};
///
/// let mut filter = Estimator::<f64>::new(FilterKind::Madgwick);
/// let q = filter.step(
///     Vec3::new(0.0, 0.0, 9.81),
///     Vec3::new(0.0, 0.0, 0.0),
///     Vec3::new(20.0, 0.0, -40.0),
///     Duration::from_millis(10),
/// );
/// assert!((q.norm() - 1.0).abs() < 1e-12);
/// ```
pub trait AttitudeFilter<T: Real> {
    /// Fuses one sample taken `elapsed` after the previous one.
    ///
    /// A zero `elapsed` leaves the state untouched and returns the current
    /// estimate.
    fn step(
        &mut self,
        accelerometer: Vec3<T>,
        gyroscope: Vec3<T>,
        magnetometer: Vec3<T>,
        elapsed: Duration,
    ) -> Quaternion<T>;

    /// Current orientation estimate
    fn quaternion(&self) -> Quaternion<T>;

    /// Returns to the initial state, keeping the settings
    fn reset(&mut self);

    /// Earth frame the estimate is expressed in
    fn convention(&self) -> Convention;
}

/// Converts a [`Duration`] into seconds at the filter's precision
pub(crate) fn duration_seconds<T: Real>(elapsed: Duration) -> T {
    T::constant(elapsed.as_secs_f64())
}

/// One of the available filters, selected at runtime.
#[derive(Debug, Clone)]
pub enum Estimator<T> {
    Complementary(ComplementaryFilter<T>),
    Madgwick(MadgwickFilter<T>),
    Mahony(MahonyFilter<T>),
}

impl<T: Real> Estimator<T> {
    /// Creates the selected filter with default settings
    pub fn new(kind: FilterKind) -> Self {
        match kind {
            FilterKind::Complementary => Estimator::Complementary(ComplementaryFilter::new()),
            FilterKind::Madgwick => Estimator::Madgwick(MadgwickFilter::new()),
            FilterKind::Mahony => Estimator::Mahony(MahonyFilter::new()),
        }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            Estimator::Complementary(_) => FilterKind::Complementary,
            Estimator::Madgwick(_) => FilterKind::Madgwick,
            Estimator::Mahony(_) => FilterKind::Mahony,
        }
    }

    fn as_filter_mut(&mut self) -> &mut dyn AttitudeFilter<T> {
        match self {
            Estimator::Complementary(filter) => filter,
            Estimator::Madgwick(filter) => filter,
            Estimator::Mahony(filter) => filter,
        }
    }

    fn as_filter(&self) -> &dyn AttitudeFilter<T> {
        match self {
            Estimator::Complementary(filter) => filter,
            Estimator::Madgwick(filter) => filter,
            Estimator::Mahony(filter) => filter,
        }
    }
}

impl<T: Real> From<ComplementaryFilter<T>> for Estimator<T> {
    fn from(filter: ComplementaryFilter<T>) -> Self {
        Estimator::Complementary(filter)
    }
}

impl<T: Real> From<MadgwickFilter<T>> for Estimator<T> {
    fn from(filter: MadgwickFilter<T>) -> Self {
        Estimator::Madgwick(filter)
    }
}

impl<T: Real> From<MahonyFilter<T>> for Estimator<T> {
    fn from(filter: MahonyFilter<T>) -> Self {
        Estimator::Mahony(filter)
    }
}

impl<T: Real> AttitudeFilter<T> for Estimator<T> {
    fn step(
        &mut self,
        accelerometer: Vec3<T>,
        gyroscope: Vec3<T>,
        magnetometer: Vec3<T>,
        elapsed: Duration,
    ) -> Quaternion<T> {
        self.as_filter_mut()
            .step(accelerometer, gyroscope, magnetometer, elapsed)
    }

    fn quaternion(&self) -> Quaternion<T> {
        self.as_filter().quaternion()
    }

    fn reset(&mut self) {
        self.as_filter_mut().reset();
    }

    fn convention(&self) -> Convention {
        self.as_filter().convention()
    }
}
