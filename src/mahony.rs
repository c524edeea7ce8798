//! Mahony explicit complementary filter with gyroscope bias estimation

use core::time::Duration;

use log::{debug, trace};

use crate::filter::{AttitudeFilter, duration_seconds};
use crate::math::{Real, ticks_to_seconds};
use crate::matrix::Vec3;
use crate::quaternion::Quaternion;
use crate::types::{Convention, MahonySettings};

const MICROSECONDS_PER_SECOND: f64 = 1e6;

/// Mahony orientation filter
///
/// The rotation error between measured and predicted reference directions
/// (gravity, magnetic field) feeds a PI controller: the proportional part
/// corrects the gyroscope rate directly and the integral part accumulates
/// into a gyroscope bias estimate.
///
/// The horizontal field reference lies on the y axis ([`Convention::Enu`]).
#[derive(Debug, Clone)]
pub struct MahonyFilter<T> {
    settings: MahonySettings<T>,
    quaternion: Quaternion<T>,
    /// Estimated gyroscope bias in rad/s
    gyro_bias: Vec3<T>,
}

impl<T: Real> MahonyFilter<T> {
    /// Create a filter with default settings
    pub fn new() -> Self {
        Self::with_settings(MahonySettings::default())
    }

    /// Create a filter with the given settings
    pub fn with_settings(settings: MahonySettings<T>) -> Self {
        Self {
            settings,
            quaternion: Quaternion::identity(),
            gyro_bias: Vec3::zeros(),
        }
    }

    pub fn settings(&self) -> MahonySettings<T> {
        self.settings
    }

    pub fn set_settings(&mut self, settings: MahonySettings<T>) {
        self.settings = settings;
    }

    /// Current gyroscope bias estimate in rad/s
    pub fn gyro_bias(&self) -> Vec3<T> {
        self.gyro_bias
    }

    /// Update the filter with one sample
    ///
    /// # Arguments
    /// * `accelerometer` - Accelerometer reading in m/s²
    /// * `gyroscope` - Gyroscope reading in rad/s
    /// * `magnetometer` - Magnetometer reading in µT
    /// * `delta_time_us` - Time since the previous sample in microseconds
    pub fn update(
        &mut self,
        accelerometer: Vec3<T>,
        gyroscope: Vec3<T>,
        magnetometer: Vec3<T>,
        delta_time_us: u32,
    ) -> Quaternion<T> {
        let delta_time = ticks_to_seconds(delta_time_us, MICROSECONDS_PER_SECOND);
        self.fuse(accelerometer, gyroscope, magnetometer, delta_time)
    }

    fn fuse(
        &mut self,
        accelerometer: Vec3<T>,
        gyroscope: Vec3<T>,
        magnetometer: Vec3<T>,
        delta_time: T,
    ) -> Quaternion<T> {
        if delta_time <= T::zero() {
            debug!("mahony filter: non-positive elapsed time, keeping previous estimate");
            return self.quaternion;
        }

        let omega = if accelerometer.magnitude() > T::zero() {
            self.rotation_error(&accelerometer, &magnetometer)
        } else {
            debug!("mahony filter: accelerometer reads zero, correcting bias only");
            Vec3::zeros()
        };

        self.gyro_bias = self.gyro_bias + omega.scale(-self.settings.ki).scale(delta_time);
        let corrected = gyroscope - self.gyro_bias + omega.scale(self.settings.kp);

        let half = T::constant(0.5);
        let q_dot = self.quaternion * Quaternion::pure(&corrected) * half;
        self.quaternion = (self.quaternion + q_dot * delta_time).normalize();
        trace!(
            "mahony filter estimate: {:?}, bias: {:?}",
            self.quaternion, self.gyro_bias
        );

        self.quaternion
    }

    /// Sum of `measured × predicted` over the available reference directions,
    /// all in the body frame
    fn rotation_error(&self, accelerometer: &Vec3<T>, magnetometer: &Vec3<T>) -> Vec3<T> {
        let a = accelerometer.normalize_or_zero();
        let m = magnetometer.normalize_or_zero();

        let dcm = self.quaternion.to_rotation_matrix();
        let to_body = dcm.transpose();

        let up = Vec3::new(T::zero(), T::zero(), T::one());
        let mut omega = a.cross(&(to_body * up));

        if m.magnitude() > T::zero() {
            // horizontal part of the earth-frame field rotated onto north
            let h = dcm * m;
            let reference = Vec3::new(T::zero(), h.x().hypot(h.y()), h.z()).normalize_or_zero();
            omega = omega + m.cross(&(to_body * reference));
        } else {
            debug!("mahony filter: magnetometer reads zero, correcting tilt only");
        }

        omega
    }
}

impl<T: Real> Default for MahonyFilter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> AttitudeFilter<T> for MahonyFilter<T> {
    fn step(
        &mut self,
        accelerometer: Vec3<T>,
        gyroscope: Vec3<T>,
        magnetometer: Vec3<T>,
        elapsed: Duration,
    ) -> Quaternion<T> {
        self.fuse(accelerometer, gyroscope, magnetometer, duration_seconds(elapsed))
    }

    fn quaternion(&self) -> Quaternion<T> {
        self.quaternion
    }

    fn reset(&mut self) {
        self.quaternion = Quaternion::identity();
        self.gyro_bias = Vec3::zeros();
    }

    fn convention(&self) -> Convention {
        Convention::Enu
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::AngleUnit;
    use crate::euler::Euler;

    const GRAVITY: f64 = 9.81;
    const EPSILON: f64 = 1e-9;

    fn earth_field() -> Vec3<f64> {
        Vec3::new(0.0, 20.0, -40.0)
    }

    fn readings(attitude: &Quaternion<f64>) -> (Vec3<f64>, Vec3<f64>) {
        let to_body = attitude.to_rotation_matrix().transpose();
        (
            to_body * Vec3::new(0.0, 0.0, GRAVITY),
            to_body * earth_field(),
        )
    }

    fn alignment(a: &Quaternion<f64>, b: &Quaternion<f64>) -> f64 {
        (a.w() * b.w() + a.x() * b.x() + a.y() * b.y() + a.z() * b.z()).abs()
    }

    #[test]
    fn test_new_filter() {
        let filter = MahonyFilter::<f64>::new();
        assert_eq!(filter.settings(), MahonySettings { kp: 1.0, ki: 0.3 });
        assert_eq!(filter.gyro_bias(), Vec3::zeros());
        assert_eq!(filter.quaternion(), Quaternion::identity());
    }

    #[test]
    fn test_stationary_level_stays_at_identity() {
        let mut filter = MahonyFilter::<f64>::new();

        for _ in 0..500 {
            filter.update(
                Vec3::new(0.0, 0.0, GRAVITY),
                Vec3::new(0.0, 0.0, 0.0),
                earth_field(),
                10_000,
            );
        }

        let q = filter.quaternion();
        assert!((q.w() - 1.0).abs() < EPSILON);
        assert!(q.x().abs() < EPSILON);
        assert!(q.y().abs() < EPSILON);
        assert!(q.z().abs() < EPSILON);
        assert!(filter.gyro_bias().magnitude() < EPSILON);
    }

    #[test]
    fn test_learns_constant_gyroscope_offset() {
        let offset = Vec3::new(0.02, -0.01, 0.03);
        let mut filter = MahonyFilter::<f64>::new();

        // one minute at 100 Hz
        for _ in 0..6000 {
            filter.update(Vec3::new(0.0, 0.0, GRAVITY), offset, earth_field(), 10_000);
        }

        let error = (filter.gyro_bias() - offset).magnitude();
        assert!(error < 5e-3, "bias error {}", error);
        assert!(alignment(&filter.quaternion(), &Quaternion::identity()) > 0.999);
    }

    #[test]
    fn test_converges_to_true_attitude() {
        let truth = Euler::new(0.4f64, -0.3, 0.8, AngleUnit::Radians).to_quaternion();
        let (accelerometer, magnetometer) = readings(&truth);

        let mut filter = MahonyFilter::with_settings(MahonySettings { kp: 2.0, ki: 0.3 });
        assert!(alignment(&filter.quaternion(), &truth) < 0.95);

        for _ in 0..6000 {
            filter.update(accelerometer, Vec3::new(0.0, 0.0, 0.0), magnetometer, 10_000);
        }

        assert!(alignment(&filter.quaternion(), &truth) > 0.9999);
    }

    #[test]
    fn test_zero_accelerometer_integrates_gyroscope() {
        let mut filter = MahonyFilter::<f64>::new();
        let rate = 0.5;

        for _ in 0..100 {
            filter.update(
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, rate),
                earth_field(),
                10_000,
            );
        }

        let half_angle: f64 = rate * 0.5;
        let q = filter.quaternion();
        assert!((q.z() - half_angle.sin()).abs() < 1e-4);
        assert!((q.w() - half_angle.cos()).abs() < 1e-4);
        assert_eq!(filter.gyro_bias(), Vec3::zeros());
    }

    #[test]
    fn test_reset_clears_bias() {
        let mut filter = MahonyFilter::<f64>::new();
        for _ in 0..100 {
            filter.update(
                Vec3::new(1.0, 0.0, GRAVITY),
                Vec3::new(0.1, 0.0, 0.0),
                earth_field(),
                10_000,
            );
        }
        assert!(filter.gyro_bias().magnitude() > 0.0);

        filter.reset();
        assert_eq!(filter.gyro_bias(), Vec3::zeros());
        assert_eq!(filter.quaternion(), Quaternion::identity());
    }

    #[test]
    fn test_zero_elapsed_time_keeps_estimate() {
        let mut filter = MahonyFilter::<f64>::new();
        filter.update(
            Vec3::new(0.0, 1.0, GRAVITY),
            Vec3::new(0.1, 0.0, 0.0),
            earth_field(),
            10_000,
        );
        let before = (filter.quaternion(), filter.gyro_bias());

        let q = filter.update(
            Vec3::new(5.0, 5.0, 0.0),
            Vec3::new(3.0, 3.0, 3.0),
            Vec3::new(50.0, 0.0, 0.0),
            0,
        );
        assert_eq!(q, before.0);
        assert_eq!(filter.gyro_bias(), before.1);
    }
}
