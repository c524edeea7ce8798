//! Fixed-shape dense matrix used for sensor vectors and the filters' linear algebra
//!
//! The shape is part of the type, so adding two matrices of different shapes
//! or multiplying with mismatched inner dimensions does not compile. Only
//! operations that take runtime input (slices, indices) can fail at runtime,
//! and they report a [`MatrixError`] instead of writing anything.
//!
//! # Example
//! ```
//! use attitude_estimation::{Matrix, MatrixError};
//!
//! let mut m = Matrix::<i32, 2, 3>::from_element(1);
//! m.set(1, 2, 5)?;
//! assert_eq!(m.get(1, 2)?, 5);
//!
//! // row 2 does not exist even though column 0 does
//! assert!(matches!(m.set(2, 0, 9), Err(MatrixError::OutOfRange { .. })));
//!
//! let product = m * m.transpose();
//! assert_eq!((product.rows(), product.cols()), (2, 2));
//! # Ok::<(), MatrixError>(())
//! ```

use core::ops::{Add, Mul, Sub};

use nalgebra::{ClosedAddAssign, ClosedMulAssign, ClosedSubAssign, SMatrix, Scalar};
use num_traits::Num;

use crate::error::MatrixError;
use crate::math::Real;

/// Numeric entry type a [`Matrix`] can hold.
///
/// Any copyable number works, including integers; operations that need
/// square roots additionally require [`Real`].
pub trait Element:
    Scalar + Copy + Num + ClosedAddAssign + ClosedSubAssign + ClosedMulAssign
{
}

impl<T> Element for T where
    T: Scalar + Copy + Num + ClosedAddAssign + ClosedSubAssign + ClosedMulAssign
{
}

/// Dense `R x C` matrix backed by a statically sized nalgebra matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<T, const R: usize, const C: usize> {
    data: SMatrix<T, R, C>,
}

/// Column vector holding one X, Y, Z sensor sample.
pub type Vec3<T> = Matrix<T, 3, 1>;

impl<T: Element, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Creates a matrix with every entry set to `value`
    pub fn from_element(value: T) -> Self {
        Self {
            data: SMatrix::from_element(value),
        }
    }

    /// Creates a matrix of zeros
    pub fn zeros() -> Self {
        Self {
            data: SMatrix::zeros(),
        }
    }

    /// Creates a matrix from row-major nested arrays
    pub fn from_rows(rows: [[T; C]; R]) -> Self {
        Self::from_fn(|row, col| rows[row][col])
    }

    /// Creates a matrix from a row-major slice.
    ///
    /// Fails with [`MatrixError::ShapeMismatch`] unless the slice holds
    /// exactly `R * C` elements.
    pub fn from_row_slice(data: &[T]) -> Result<Self, MatrixError> {
        if data.len() != R * C {
            return Err(MatrixError::ShapeMismatch {
                expected: R * C,
                found: data.len(),
            });
        }
        Ok(Self {
            data: SMatrix::from_row_slice(data),
        })
    }

    fn from_fn(f: impl FnMut(usize, usize) -> T) -> Self {
        Self {
            data: SMatrix::from_fn(f),
        }
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        R
    }

    /// Number of columns
    pub const fn cols(&self) -> usize {
        C
    }

    fn check_index(row: usize, col: usize) -> Result<(), MatrixError> {
        if row < R && col < C {
            Ok(())
        } else {
            Err(MatrixError::OutOfRange {
                row,
                col,
                rows: R,
                cols: C,
            })
        }
    }

    /// Reads the entry at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Result<T, MatrixError> {
        Self::check_index(row, col)?;
        Ok(self.data[(row, col)])
    }

    /// Writes the entry at `(row, col)`.
    ///
    /// Both indices are checked; the matrix is untouched on error.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), MatrixError> {
        Self::check_index(row, col)?;
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Returns a new matrix with rows and columns swapped
    pub fn transpose(&self) -> Matrix<T, C, R> {
        Matrix {
            data: self.data.transpose(),
        }
    }

    /// Multiplies every entry by `factor`
    pub fn scale(&self, factor: T) -> Self {
        Self {
            data: self.data * factor,
        }
    }
}

impl<T: Real, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Euclidean norm of a row or column vector.
    ///
    /// Fails with [`MatrixError::UndefinedNorm`] unless exactly one
    /// dimension is 1.
    pub fn norm(&self) -> Result<T, MatrixError> {
        if (R == 1) == (C == 1) {
            return Err(MatrixError::UndefinedNorm { rows: R, cols: C });
        }

        Ok(self.data.dot(&self.data).sqrt())
    }
}

impl<T: Real, const N: usize> Matrix<T, N, 1> {
    /// Length of the column vector
    pub fn magnitude(&self) -> T {
        self.data.dot(&self.data).sqrt()
    }

    /// Unit vector in the same direction, or zeros when the length is zero
    pub fn normalize_or_zero(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude > T::zero() {
            self.scale(magnitude.recip())
        } else {
            Self::zeros()
        }
    }
}

impl<T: Element, const N: usize> Matrix<T, N, 1> {
    /// Components of the column vector, top to bottom
    pub fn into_array(self) -> [T; N] {
        core::array::from_fn(|row| self.data[(row, 0)])
    }
}

impl<T: Element> Matrix<T, 3, 1> {
    /// Creates a 3x1 vector from its components
    pub fn new(x: T, y: T, z: T) -> Self {
        Self::from_rows([[x], [y], [z]])
    }

    pub fn x(&self) -> T {
        self.data[(0, 0)]
    }

    pub fn y(&self) -> T {
        self.data[(1, 0)]
    }

    pub fn z(&self) -> T {
        self.data[(2, 0)]
    }

    /// Cross product `self x other`
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            data: self.data.cross(&other.data),
        }
    }

    pub fn dot(&self, other: &Self) -> T {
        self.data.dot(&other.data)
    }
}

impl<T: Element, const R: usize, const C: usize> Default for Matrix<T, R, C> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T: Element, const R: usize, const C: usize> Add for Matrix<T, R, C> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            data: self.data + other.data,
        }
    }
}

impl<T: Element, const R: usize, const C: usize> Sub for Matrix<T, R, C> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            data: self.data - other.data,
        }
    }
}

impl<T: Element, const R: usize, const C: usize, const K: usize> Mul<Matrix<T, C, K>>
    for Matrix<T, R, C>
{
    type Output = Matrix<T, R, K>;

    fn mul(self, other: Matrix<T, C, K>) -> Matrix<T, R, K> {
        Matrix {
            data: self.data * other.data,
        }
    }
}

impl<T: Element, const R: usize, const C: usize> Mul<T> for Matrix<T, R, C> {
    type Output = Self;

    fn mul(self, factor: T) -> Self {
        self.scale(factor)
    }
}

impl<T: Element, const R: usize, const C: usize> From<SMatrix<T, R, C>> for Matrix<T, R, C> {
    fn from(data: SMatrix<T, R, C>) -> Self {
        Self { data }
    }
}

impl<T: Element, const R: usize, const C: usize> From<Matrix<T, R, C>> for SMatrix<T, R, C> {
    fn from(matrix: Matrix<T, R, C>) -> Self {
        matrix.data
    }
}
