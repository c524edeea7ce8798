//! Error types for the matrix primitives

/// Errors reported by [`Matrix`](crate::Matrix) operations.
///
/// All of these are local domain errors returned to the immediate caller;
/// none of them leave the matrix in a modified state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixError {
    /// Input data does not match the matrix shape
    #[error("shape mismatch: expected {expected} elements, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    /// Row or column index outside the matrix
    #[error("index ({row}, {col}) out of range for a {rows}x{cols} matrix")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Euclidean norm requested on something that is not a row or column vector
    #[error("norm is undefined for a {rows}x{cols} matrix")]
    UndefinedNorm { rows: usize, cols: usize },
}
