use crate::cost::Cost;
use crate::error::AssignmentError;
use crate::matrix::{self, CostMatrix};
use crate::solution::{Direction, SolutionReport, UnsignedInt};
use tracing::trace;

/// Exact solver of the square linear assignment problem.
///
/// Implementors may keep scratch buffers between calls, but every call starts from
/// a clean state: the result depends only on `matrix` and `direction`.
pub trait AssignmentSolver<I: UnsignedInt, C: Cost> {
    /// Finds a perfect matching of agents to tasks with the optimal total cost.
    fn solve(
        &mut self,
        matrix: &CostMatrix<C>,
        direction: Direction,
    ) -> Result<SolutionReport<I, C>, AssignmentError>;

    /// Re-checks the matrix invariants and returns the size as the index type.
    ///
    /// `I::max_value()` marks unassigned slots, so the size must stay below it.
    fn validate_input(&self, matrix: &CostMatrix<C>) -> Result<I, AssignmentError> {
        matrix::validate(matrix.size(), matrix.values())?;
        let size = I::from_usize(matrix.size())
            .filter(|size| *size < I::max_value())
            .ok_or_else(|| {
                AssignmentError::InvalidInput(format!(
                    "matrix size {} doesn't fit the index type",
                    matrix.size()
                ))
            })?;
        trace!("validated matrix of size {}", size);
        Ok(size)
    }

    /// Tolerance used to certify a solution of `matrix`.
    fn get_toleration(&self, matrix: &CostMatrix<C>) -> f64 {
        matrix.toleration()
    }
}
