//! Rotation quaternion with Hamilton product semantics

use core::ops::{Add, Index, Mul, Sub};

use crate::math::Real;
use crate::matrix::{Matrix, Vec3};

/// Quaternion `w + xi + yj + zk`.
///
/// Values are not forced to unit length; operations that need a rotation
/// call [`normalize`](Self::normalize) explicitly. Indexing follows the
/// scalar-first order `[w, x, y, z]`, while [`new`](Self::new) takes the
/// vector part first.
///
/// # Example
/// ```
/// use attitude_estimation::Quaternion;
///
/// let q = Quaternion::new(0.0, 0.0, 0.0, 2.0f64);
/// assert_eq!(q.normalize(), Quaternion::identity());
/// assert_eq!(q[0], 2.0); // index 0 is w
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion<T> {
    x: T,
    y: T,
    z: T,
    w: T,
}

impl<T: Real> Quaternion<T> {
    /// Creates a quaternion from its vector part and scalar part
    pub fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    /// The identity rotation `(0, 0, 0, 1)`
    pub fn identity() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::one())
    }

    /// Pure quaternion carrying a 3D vector, with zero scalar part
    pub fn pure(vector: &Vec3<T>) -> Self {
        Self::new(vector.x(), vector.y(), vector.z(), T::zero())
    }

    pub fn x(&self) -> T {
        self.x
    }

    pub fn y(&self) -> T {
        self.y
    }

    pub fn z(&self) -> T {
        self.z
    }

    pub fn w(&self) -> T {
        self.w
    }

    pub fn set_x(&mut self, x: T) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: T) {
        self.y = y;
    }

    pub fn set_z(&mut self, z: T) {
        self.z = z;
    }

    pub fn set_w(&mut self, w: T) {
        self.w = w;
    }

    /// Component by scalar-first index: 0 is w, then x, y, z
    pub fn get(&self, index: usize) -> Option<T> {
        match index {
            0 => Some(self.w),
            1 => Some(self.x),
            2 => Some(self.y),
            3 => Some(self.z),
            _ => None,
        }
    }

    /// Vector part `(x, y, z)`
    pub fn vector(&self) -> Vec3<T> {
        Vec3::new(self.x, self.y, self.z)
    }

    fn norm_squared(&self) -> T {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude of the quaternion
    pub fn norm(&self) -> T {
        self.norm_squared().sqrt()
    }

    /// Scales to unit length.
    ///
    /// A quaternion with zero magnitude has no direction to keep, so the
    /// identity is returned instead.
    pub fn normalize(&self) -> Self {
        let squared = self.norm_squared();
        if squared <= T::zero() {
            return Self::identity();
        }

        *self * squared.sqrt().recip()
    }

    /// Negates the vector part
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Direction cosine matrix of the rotation.
    ///
    /// The quaternion is normalized first. The matrix maps body-frame vectors
    /// into the reference frame; its transpose maps the other way.
    pub fn to_rotation_matrix(&self) -> Matrix<T, 3, 3> {
        let q = self.normalize();
        let two = T::constant(2.0);
        let (w, x, y, z) = (q[0], q[1], q[2], q[3]);

        Matrix::from_rows([
            [
                w * w + x * x - y * y - z * z,
                two * (x * y - w * z),
                two * (x * z + w * y),
            ],
            [
                two * (x * y + w * z),
                w * w - x * x + y * y - z * z,
                two * (y * z - w * x),
            ],
            [
                two * (x * z - w * y),
                two * (w * x + y * z),
                w * w - x * x - y * y + z * z,
            ],
        ])
    }
}

impl<T: Real> Default for Quaternion<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> Index<usize> for Quaternion<T> {
    type Output = T;

    /// Scalar-first access. Panics for indices above 3, like slice indexing.
    fn index(&self, index: usize) -> &T {
        match index {
            0 => &self.w,
            1 => &self.x,
            2 => &self.y,
            3 => &self.z,
            _ => panic!("quaternion index {index} out of range 0..4"),
        }
    }
}

/// Hamilton product
impl<T: Real> Mul for Quaternion<T> {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        (nalgebra::Quaternion::from(self) * nalgebra::Quaternion::from(other)).into()
    }
}

impl<T: Real> Mul<T> for Quaternion<T> {
    type Output = Self;

    fn mul(self, factor: T) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor, self.w * factor)
    }
}

impl<T: Real> Add for Quaternion<T> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }
}

impl<T: Real> Sub for Quaternion<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }
}

impl<T: Real> From<Quaternion<T>> for nalgebra::Quaternion<T> {
    fn from(q: Quaternion<T>) -> Self {
        // nalgebra stores the vector part first
        nalgebra::Quaternion::from(nalgebra::Vector4::new(q.x, q.y, q.z, q.w))
    }
}

impl<T: Real> From<nalgebra::Quaternion<T>> for Quaternion<T> {
    fn from(q: nalgebra::Quaternion<T>) -> Self {
        Self::new(q.coords[0], q.coords[1], q.coords[2], q.coords[3])
    }
}
