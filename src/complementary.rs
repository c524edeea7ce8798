//! Complementary filter blending accelerometer/magnetometer tilt with integrated gyroscope angles

use core::time::Duration;

use log::{debug, trace};

use crate::angle::AngleUnit;
use crate::euler::Euler;
use crate::filter::{AttitudeFilter, duration_seconds};
use crate::math::{Real, ticks_to_seconds};
use crate::matrix::{Matrix, Vec3};
use crate::quaternion::Quaternion;
use crate::types::{ComplementarySettings, Convention};

const MILLISECONDS_PER_SECOND: f64 = 1e3;

/// Complementary attitude filter
///
/// Each update computes roll and pitch from the gravity direction and a
/// tilt-compensated heading from the magnetometer, integrates the gyroscope
/// on top of the previous estimate, and mixes the two with a fixed weight.
///
/// The state is an Euler triple, so the estimate degrades near ±90° pitch
/// (gimbal lock).
#[derive(Debug, Clone)]
pub struct ComplementaryFilter<T> {
    /// Filter settings
    settings: ComplementarySettings<T>,
    /// Previous fused estimate, in radians
    last_update: Euler<T>,
}

impl<T: Real> ComplementaryFilter<T> {
    /// Create a filter with default settings
    pub fn new() -> Self {
        Self::with_settings(ComplementarySettings::default())
    }

    /// Create a filter with the given settings
    pub fn with_settings(settings: ComplementarySettings<T>) -> Self {
        Self {
            settings,
            last_update: Self::initial_estimate(),
        }
    }

    fn initial_estimate() -> Euler<T> {
        Euler::new(T::zero(), T::zero(), T::zero(), AngleUnit::Radians)
    }

    pub fn settings(&self) -> ComplementarySettings<T> {
        self.settings
    }

    pub fn set_settings(&mut self, settings: ComplementarySettings<T>) {
        self.settings = settings;
    }

    /// Last fused roll, pitch and yaw, in radians
    pub fn euler(&self) -> Euler<T> {
        self.last_update
    }

    /// Update the filter with one sample
    ///
    /// # Arguments
    /// * `accelerometer` - Accelerometer reading in m/s²
    /// * `gyroscope` - Gyroscope reading in rad/s
    /// * `magnetometer` - Magnetometer reading in µT
    /// * `delta_time_ms` - Time since the previous sample in milliseconds
    pub fn update(
        &mut self,
        accelerometer: Vec3<T>,
        gyroscope: Vec3<T>,
        magnetometer: Vec3<T>,
        delta_time_ms: u32,
    ) -> Quaternion<T> {
        let delta_time = ticks_to_seconds(delta_time_ms, MILLISECONDS_PER_SECOND);
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
            debug!("complementary filter: non-positive elapsed time, keeping previous estimate");
            return self.last_update.to_quaternion();
        }

        let measured = Self::accel_mag_estimate(&accelerometer, &magnetometer);

        let delta = gyroscope.scale(delta_time);
        let integrated = self.last_update
            + Euler::new(delta.x(), delta.y(), delta.z(), AngleUnit::Radians);

        self.last_update = integrated.blend(&measured, self.settings.alpha);
        trace!("complementary filter estimate: {:?}", self.last_update);

        self.last_update.to_quaternion()
    }

    /// Roll and pitch from gravity, yaw from the tilt-compensated magnetic field
    fn accel_mag_estimate(accelerometer: &Vec3<T>, magnetometer: &Vec3<T>) -> Euler<T> {
        let (ax, ay, az) = (accelerometer.x(), accelerometer.y(), accelerometer.z());

        let roll = ay.atan2(az);
        let pitch = (-ax).atan2(ay.hypot(az));

        // rotate the field back to the horizontal plane: Ry(pitch) * Rx(roll)
        let (sr, cr) = roll.sin_cos();
        let (sp, cp) = pitch.sin_cos();
        let tilt_compensation = Matrix::from_rows([
            [cp, sp * sr, sp * cr],
            [T::zero(), cr, -sr],
            [-sp, cp * sr, cp * cr],
        ]);
        let horizontal = tilt_compensation * *magnetometer;
        let yaw = (-horizontal.y()).atan2(horizontal.x());

        Euler::new(roll, pitch, yaw, AngleUnit::Radians)
    }
}

impl<T: Real> Default for ComplementaryFilter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> AttitudeFilter<T> for ComplementaryFilter<T> {
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
        self.last_update.to_quaternion()
    }

    fn reset(&mut self) {
        self.last_update = Self::initial_estimate();
    }

    fn convention(&self) -> Convention {
        Convention::Nwu
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    const GRAVITY: f64 = 9.81;

    #[test]
    fn test_new_filter() {
        let filter = ComplementaryFilter::<f64>::new();
        assert!((filter.settings().alpha - 0.9).abs() < 1e-12);
        assert_eq!(filter.quaternion(), Quaternion::identity());
    }

    #[test]
    fn test_level_accel_mag_estimate() {
        let euler = ComplementaryFilter::accel_mag_estimate(
            &Vec3::new(0.0, 0.0, GRAVITY),
            &Vec3::new(20.0, 0.0, -40.0),
        );
        assert_eq!(euler.x().value(), 0.0);
        assert_eq!(euler.y().value(), 0.0);
        assert!(euler.z().value() < 1e-12);
    }

    #[test]
    fn test_roll_from_gravity() {
        // rolled 90 degrees: gravity along +y
        let euler = ComplementaryFilter::accel_mag_estimate(
            &Vec3::new(0.0, GRAVITY, 0.0),
            &Vec3::new(20.0, 0.0, 0.0),
        );
        assert!((euler.x().value() - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_heading_from_magnetometer() {
        // level, body rotated 45 degrees: north field appears at -45 degrees
        let horizontal = 20.0;
        let magnetometer = Vec3::new(
            horizontal * FRAC_PI_4.cos(),
            -horizontal * FRAC_PI_4.sin(),
            -40.0,
        );
        let euler =
            ComplementaryFilter::accel_mag_estimate(&Vec3::new(0.0, 0.0, GRAVITY), &magnetometer);
        assert!((euler.z().value() - FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_heading_is_tilt_compensated() {
        let roll = 0.3f64;
        let pitch = -0.2f64;
        let yaw = 1.0f64;

        // earth-frame gravity and field seen from a body with this attitude
        let q = Euler::new(roll, pitch, yaw, AngleUnit::Radians).to_quaternion();
        let dcm_t = q.to_rotation_matrix().transpose();
        let accelerometer = dcm_t * Vec3::new(0.0, 0.0, GRAVITY);
        let magnetometer = dcm_t * Vec3::new(20.0, 0.0, -40.0);

        let euler = ComplementaryFilter::accel_mag_estimate(&accelerometer, &magnetometer);
        assert!((euler.x().value() - roll).abs() < 1e-9);
        assert!((euler.y().value() - (core::f64::consts::TAU + pitch)).abs() < 1e-9);
        assert!((euler.z().value() - yaw).abs() < 1e-9);
    }

    #[test]
    fn test_alpha_one_integrates_gyroscope() {
        let settings = ComplementarySettings { alpha: 1.0f64 };
        let mut filter = ComplementaryFilter::with_settings(settings);
        let gyroscope = Vec3::new(0.0, 0.0, 0.5);

        for _ in 0..10 {
            filter.update(
                Vec3::new(0.0, 0.0, GRAVITY),
                gyroscope,
                Vec3::new(20.0, 0.0, -40.0),
                100,
            );
        }

        // 0.5 rad/s for one second
        assert!((filter.euler().z().value() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_elapsed_time_keeps_estimate() {
        let mut filter = ComplementaryFilter::<f64>::new();
        filter.update(
            Vec3::new(0.0, 1.0, GRAVITY),
            Vec3::new(0.1, 0.0, 0.0),
            Vec3::new(20.0, 0.0, -40.0),
            10,
        );
        let before = filter.euler();

        let q = filter.update(
            Vec3::new(5.0, 5.0, 0.0),
            Vec3::new(3.0, 3.0, 3.0),
            Vec3::new(0.0, 50.0, 0.0),
            0,
        );
        assert_eq!(filter.euler(), before);
        assert_eq!(q, before.to_quaternion());
    }
}
