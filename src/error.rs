use thiserror::Error;

/// Errors reported by the assignment solvers.
///
/// All of them are precondition violations: the algorithm itself is exact and
/// never fails on valid input.
#[derive(Error, Debug, Clone)]
pub enum AssignmentError {
    /// Matrix is empty, not square, or doesn't fit the chosen index type.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Matrix contains NaN or an infinite entry.
    #[error("non-finite cost at row {row}, column {column}")]
    NonFiniteValue { row: usize, column: usize },

    /// Integer costs are too large to keep exact dual potentials.
    #[error("cost magnitude {max_abs} is out of range for a matrix of size {size}")]
    CostOutOfRange { max_abs: f64, size: usize },
}
