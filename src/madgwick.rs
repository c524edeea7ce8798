//! Madgwick gradient-descent AHRS

use core::time::Duration;

use log::{debug, trace};

use crate::filter::{AttitudeFilter, duration_seconds};
use crate::math::{Real, ticks_to_seconds};
use crate::matrix::{Matrix, Vec3};
use crate::quaternion::Quaternion;
use crate::types::{Convention, MadgwickSettings};

const MICROSECONDS_PER_SECOND: f64 = 1e6;

/// Madgwick orientation filter
///
/// Integrates the gyroscope rate and, whenever the accelerometer reads
/// something, takes one normalized gradient-descent step that pulls the
/// estimate towards the orientation in which the predicted gravity and
/// magnetic field directions match the measurements.
///
/// The earth field is modeled as `(bx, 0, bz)`, so magnetic north lies on
/// the x axis ([`Convention::Nwu`]).
#[derive(Debug, Clone)]
pub struct MadgwickFilter<T> {
    /// Filter settings
    settings: MadgwickSettings<T>,
    /// Current orientation estimate
    quaternion: Quaternion<T>,
}

impl<T: Real> MadgwickFilter<T> {
    /// Create a filter with default settings
    pub fn new() -> Self {
        Self::with_settings(MadgwickSettings::default())
    }

    /// Create a filter with the given settings
    pub fn with_settings(settings: MadgwickSettings<T>) -> Self {
        Self {
            settings,
            quaternion: Quaternion::identity(),
        }
    }

    pub fn settings(&self) -> MadgwickSettings<T> {
        self.settings
    }

    pub fn set_settings(&mut self, settings: MadgwickSettings<T>) {
        self.settings = settings;
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
            debug!("madgwick filter: non-positive elapsed time, keeping previous estimate");
            return self.quaternion;
        }

        let half = T::constant(0.5);
        let mut q_dot = self.quaternion * Quaternion::pure(&gyroscope) * half;

        if accelerometer.magnitude() > T::zero() {
            let gradient = self.gradient(&accelerometer, &magnetometer);
            q_dot = q_dot - gradient * self.settings.beta;
        } else {
            debug!("madgwick filter: accelerometer reads zero, integrating gyroscope only");
        }

        self.quaternion = (self.quaternion + q_dot * delta_time).normalize();
        trace!("madgwick filter estimate: {:?}", self.quaternion);

        self.quaternion
    }

    /// Normalized gradient of the gravity and magnetic field objective
    fn gradient(&self, accelerometer: &Vec3<T>, magnetometer: &Vec3<T>) -> Quaternion<T> {
        let a = accelerometer.normalize_or_zero();
        let m = magnetometer.normalize_or_zero();
        if m.magnitude() <= T::zero() {
            debug!("madgwick filter: magnetometer reads zero, correcting tilt only");
        }

        // earth-frame direction of the measured field
        let h = self.quaternion * Quaternion::pure(&m) * self.quaternion.conjugate();
        let bx = h.x().hypot(h.y());
        let bz = h.z();

        let q = self.quaternion.normalize();
        let objective = Self::objective(&q, &a, &m, bx, bz);
        let jacobian = Self::jacobian(&q, bx, bz);

        // a perfect fit leaves a zero gradient, which stays zero
        let [w, x, y, z] = (jacobian.transpose() * objective)
            .normalize_or_zero()
            .into_array();
        Quaternion::new(x, y, z, w)
    }

    /// Predicted minus measured gravity (rows 0..3) and field (rows 3..6)
    fn objective(q: &Quaternion<T>, a: &Vec3<T>, m: &Vec3<T>, bx: T, bz: T) -> Matrix<T, 6, 1> {
        let two = T::constant(2.0);
        let half = T::constant(0.5);
        let (w, x, y, z) = (q[0], q[1], q[2], q[3]);

        Matrix::from_rows([
            [two * (x * z - w * y) - a.x()],
            [two * (w * x + y * z) - a.y()],
            [two * (half - x * x - y * y) - a.z()],
            [two * bx * (half - y * y - z * z) + two * bz * (x * z - w * y) - m.x()],
            [two * bx * (x * y - w * z) + two * bz * (w * x + y * z) - m.y()],
            [two * bx * (w * y + x * z) + two * bz * (half - x * x - y * y) - m.z()],
        ])
    }

    /// Partial derivatives of the objective over `(w, x, y, z)`
    fn jacobian(q: &Quaternion<T>, bx: T, bz: T) -> Matrix<T, 6, 4> {
        let two = T::constant(2.0);
        let four = T::constant(4.0);
        let zero = T::zero();
        let (w, x, y, z) = (q[0], q[1], q[2], q[3]);

        Matrix::from_rows([
            [-two * y, two * z, -two * w, two * x],
            [two * x, two * w, two * z, two * y],
            [zero, -four * x, -four * y, zero],
            [
                -two * bz * y,
                two * bz * z,
                -four * bx * y - two * bz * w,
                -four * bx * z + two * bz * x,
            ],
            [
                -two * bx * z + two * bz * x,
                two * bx * y + two * bz * w,
                two * bx * x + two * bz * z,
                -two * bx * w + two * bz * y,
            ],
            [
                two * bx * y,
                two * bx * z - four * bz * x,
                two * bx * w - four * bz * y,
                two * bx * x,
            ],
        ])
    }
}

impl<T: Real> Default for MadgwickFilter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Real> AttitudeFilter<T> for MadgwickFilter<T> {
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
    }

    fn convention(&self) -> Convention {
        Convention::Nwu
    }
}
