//! Synthetic trajectory simulation
//!
//! Integrates a known angular velocity profile into a ground-truth attitude,
//! derives noisy accelerometer, gyroscope and magnetometer samples from it and
//! runs one of the filters over them. Each step prints one JSON line with the
//! ground truth and the estimate, ready to pipe into a plotting tool.
//!
//! Run with: `cargo run --example simulate -- [complementary|madgwick|mahony] [steps]`

use attitude_estimation::{AttitudeFilter, Convention, Estimator, FilterKind, Quaternion, Vec3};
use nalgebra::{UnitQuaternion, Vector3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::Serialize;
use std::error::Error;
use std::time::Duration;

const SAMPLE_PERIOD: Duration = Duration::from_millis(10); // 100 Hz
const DEFAULT_STEPS: usize = 3000;
const SEED: u64 = 42;

const GRAVITY: f64 = 9.81; // m/s²
const FIELD_HORIZONTAL: f64 = 20.0; // µT
const FIELD_VERTICAL: f64 = -40.0; // µT, pointing down

const ACCELEROMETER_NOISE: f64 = 0.05; // m/s²
const GYROSCOPE_NOISE: f64 = 0.005; // rad/s
const MAGNETOMETER_NOISE: f64 = 0.5; // µT

#[derive(Debug, Serialize)]
struct QuaternionRecord {
    w: f64,
    x: f64,
    y: f64,
    z: f64,
}

impl From<Quaternion<f64>> for QuaternionRecord {
    fn from(q: Quaternion<f64>) -> Self {
        Self {
            w: q.w(),
            x: q.x(),
            y: q.y(),
            z: q.z(),
        }
    }
}

#[derive(Debug, Serialize)]
struct StepRecord {
    ground_truth_quat: QuaternionRecord,
    estimated_quat: QuaternionRecord,
}

fn parse_kind(name: &str) -> Result<FilterKind, Box<dyn Error>> {
    match name.to_ascii_lowercase().as_str() {
        "complementary" => Ok(FilterKind::Complementary),
        "madgwick" => Ok(FilterKind::Madgwick),
        "mahony" => Ok(FilterKind::Mahony),
        other => Err(format!(
            "unknown filter '{}', expected complementary, madgwick or mahony",
            other
        )
        .into()),
    }
}

/// Earth magnetic field in the filter's axes convention
fn earth_field(convention: Convention) -> Vector3<f64> {
    match convention {
        Convention::Nwu => Vector3::new(FIELD_HORIZONTAL, 0.0, FIELD_VERTICAL),
        Convention::Enu => Vector3::new(0.0, FIELD_HORIZONTAL, FIELD_VERTICAL),
    }
}

/// Body angular velocity of the reference trajectory at `time` seconds
fn angular_velocity(time: f64) -> Vector3<f64> {
    Vector3::new(
        0.3 * (0.5 * time).sin(),
        0.2 * (0.3 * time).cos(),
        0.4 * (0.1 * time).sin(),
    )
}

fn noisy(rng: &mut Pcg64, v: Vector3<f64>, amplitude: f64) -> Vec3<f64> {
    let noise = Vector3::new(
        rng.random_range(-amplitude..amplitude),
        rng.random_range(-amplitude..amplitude),
        rng.random_range(-amplitude..amplitude),
    );
    Vec3::from(v + noise)
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let kind = match args.next() {
        Some(name) => parse_kind(&name)?,
        None => FilterKind::Madgwick,
    };
    let steps = match args.next() {
        Some(count) => count.parse()?,
        None => DEFAULT_STEPS,
    };

    let mut rng = Pcg64::seed_from_u64(SEED);
    let mut estimator = Estimator::<f64>::new(kind);
    let field = earth_field(estimator.convention());
    let gravity = Vector3::new(0.0, 0.0, GRAVITY);

    let dt = SAMPLE_PERIOD.as_secs_f64();
    let mut truth = UnitQuaternion::identity();

    for step in 0..steps {
        let omega = angular_velocity(step as f64 * dt);
        truth *= UnitQuaternion::from_scaled_axis(omega * dt);

        // stationary body: the accelerometer sees only the reaction to gravity
        let to_body = truth.inverse();
        let accelerometer = noisy(&mut rng, to_body * gravity, ACCELEROMETER_NOISE);
        let gyroscope = noisy(&mut rng, omega, GYROSCOPE_NOISE);
        let magnetometer = noisy(&mut rng, to_body * field, MAGNETOMETER_NOISE);

        let estimate = estimator.step(accelerometer, gyroscope, magnetometer, SAMPLE_PERIOD);

        let record = StepRecord {
            ground_truth_quat: Quaternion::from(*truth.quaternion()).into(),
            estimated_quat: estimate.into(),
        };
        println!("{}", serde_json::to_string(&record)?);
    }

    Ok(())
}
