#![no_std]

//! Attitude estimation - orientation filters for 9-axis inertial sensors
//!
//! This library fuses accelerometer, gyroscope and magnetometer samples into
//! an orientation quaternion. It ships three algorithms behind one trait,
//! built on a small set of rotation types: bounded angles, Euler triples,
//! quaternions and fixed-shape matrices.
//!
//! # Features
//!
//! - Complementary filter over roll, pitch and tilt-compensated heading
//! - Madgwick gradient-descent AHRS
//! - Mahony explicit complementary filter with gyroscope bias estimation
//! - Runtime algorithm selection through [`Estimator`]
//! - Generic over `f32` and `f64`
//! - `#![no_std]` compatible, no heap allocation
//!
//! # Quick Start
//!
//! ```rust
//! use attitude_estimation::{MadgwickFilter, Vec3};
//!
//! let mut filter = MadgwickFilter::<f32>::new();
//!
//! // Sensor readings
//! let accelerometer = Vec3::new(0.0, 0.0, 9.81); // m/s²
//! let gyroscope = Vec3::new(0.01, 0.02, 0.0);    // rad/s
//! let magnetometer = Vec3::new(20.0, 0.0, -40.0); // µT
//!
//! // Update with a 10 ms step
//! let quaternion = filter.update(accelerometer, gyroscope, magnetometer, 10_000);
//!
//! assert!((quaternion.norm() - 1.0).abs() < 1e-5);
//! ```
//!
//! The `update` methods take the elapsed time as an integer tick count in the
//! unit each algorithm was tuned for (milliseconds for the complementary
//! filter, microseconds for Madgwick and Mahony). [`AttitudeFilter::step`]
//! takes a [`core::time::Duration`] instead and works the same for all three.

mod angle;
mod complementary;
mod error;
mod euler;
mod filter;
mod madgwick;
mod mahony;
mod math;
mod matrix;
mod quaternion;
mod types;

// Re-export all public types and functions
pub use angle::{Angle, AngleUnit};
pub use complementary::ComplementaryFilter;
pub use error::MatrixError;
pub use euler::Euler;
pub use filter::{AttitudeFilter, Estimator};
pub use madgwick::MadgwickFilter;
pub use mahony::MahonyFilter;
pub use math::{Real, normalize_periodic};
pub use matrix::{Element, Matrix, Vec3};
pub use quaternion::Quaternion;
pub use types::*;
