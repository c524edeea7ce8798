//! Randomized checks of the algebraic properties of the rotation primitives

use attitude_estimation::{Angle, AngleUnit, Matrix, Quaternion, Vec3, normalize_periodic};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

const SEED: u64 = 0x5eed_a771;
const ITERATIONS: usize = 1000;

fn random_quaternion(rng: &mut Pcg64) -> Quaternion<f64> {
    Quaternion::new(
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
    )
}

fn random_integer_matrix<const R: usize, const C: usize>(rng: &mut Pcg64) -> Matrix<i64, R, C> {
    let mut matrix = Matrix::zeros();
    for row in 0..R {
        for col in 0..C {
            matrix
                .set(row, col, rng.random_range(-100..=100))
                .expect("index within shape");
        }
    }
    matrix
}

fn quaternion_distance(a: &Quaternion<f64>, b: &Quaternion<f64>) -> f64 {
    (*a - *b).norm()
}

#[test]
fn test_normalize_periodic_range_and_offset() {
    let mut rng = Pcg64::seed_from_u64(SEED);

    for unit in [AngleUnit::Degrees, AngleUnit::Radians] {
        let width: f64 = unit.full_turn();

        for _ in 0..ITERATIONS {
            let value = rng.random_range(-1.0e4..1.0e4);
            let result = normalize_periodic(value, 0.0, width);

            assert!(
                (0.0..width).contains(&result),
                "{} wrapped to {}",
                value,
                result
            );

            let turns = (value - result) / width;
            assert!(
                (turns - turns.round()).abs() < 1e-9,
                "{} - {} is not a whole number of turns",
                value,
                result
            );

            let angle = Angle::new(value, unit);
            assert_eq!(angle.value(), result);
        }
    }
}

#[test]
fn test_quaternion_product_is_associative() {
    let mut rng = Pcg64::seed_from_u64(SEED);

    for _ in 0..ITERATIONS {
        let a = random_quaternion(&mut rng);
        let b = random_quaternion(&mut rng);
        let c = random_quaternion(&mut rng);

        let left = (a * b) * c;
        let right = a * (b * c);
        assert!(quaternion_distance(&left, &right) < 1e-12);
    }
}

#[test]
fn test_quaternion_normalize_is_unit() {
    let mut rng = Pcg64::seed_from_u64(SEED);

    for _ in 0..ITERATIONS {
        let scale = rng.random_range(1e-3..1e3);
        let q = random_quaternion(&mut rng) * scale;
        assert!((q.normalize().norm() - 1.0).abs() < 1e-12);
    }

    let zero = Quaternion::new(0.0f64, 0.0, 0.0, 0.0);
    assert_eq!(zero.normalize(), Quaternion::identity());
}

#[test]
fn test_quaternion_conjugate_is_involution() {
    let mut rng = Pcg64::seed_from_u64(SEED);

    for _ in 0..ITERATIONS {
        let q = random_quaternion(&mut rng);
        assert_eq!(q.conjugate().conjugate(), q);
    }
}

#[test]
fn test_rotation_matrix_preserves_length() {
    let mut rng = Pcg64::seed_from_u64(SEED);

    for _ in 0..ITERATIONS {
        let dcm = random_quaternion(&mut rng).to_rotation_matrix();
        let v = Vec3::new(
            rng.random_range(-50.0..50.0),
            rng.random_range(-50.0..50.0),
            rng.random_range(-50.0..50.0),
        );
        assert!(((dcm * v).magnitude() - v.magnitude()).abs() < 1e-9);
    }
}

#[test]
fn test_transpose_is_involution() {
    let mut rng = Pcg64::seed_from_u64(SEED);

    for _ in 0..ITERATIONS {
        let m = random_integer_matrix::<3, 5>(&mut rng);
        assert_eq!(m.transpose().transpose(), m);
    }
}

#[test]
fn test_matrix_product_distributes_over_addition() {
    let mut rng = Pcg64::seed_from_u64(SEED);

    for _ in 0..ITERATIONS {
        let a = random_integer_matrix::<2, 3>(&mut rng);
        let b = random_integer_matrix::<3, 4>(&mut rng);
        let c = random_integer_matrix::<3, 4>(&mut rng);

        assert_eq!(a * (b + c), a * b + a * c);

        let d = random_integer_matrix::<2, 3>(&mut rng);
        assert_eq!((a + d) * b, a * b + d * b);
    }
}
