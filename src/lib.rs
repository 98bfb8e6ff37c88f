//! Exact solver for the dense linear assignment problem.
//!
//! Given an N x N matrix of costs between agents (rows) and tasks (columns), the
//! solvers find a one-to-one assignment of agents to tasks with the minimal (or
//! maximal) total cost. [`HungarianSolver`] implements the Hungarian
//! (Kuhn-Munkres) method in O(N^3) time.
//!
//! ```
//! use dense_linear_assignment::{solve_rows, Direction};
//!
//! let report = solve_rows(&[vec![4, 2, 8], vec![4, 3, 7], vec![3, 1, 6]], Direction::Minimize)?;
//! assert_eq!(report.objective, 12);
//! assert_eq!(report.agent_to_task, [1, 0, 2]);
//! # Ok::<(), dense_linear_assignment::AssignmentError>(())
//! ```
pub mod cost;
pub mod error;
#[cfg(any(test, feature = "exhaustive"))]
pub mod exhaustive;
pub mod hungarian;
pub mod labels;
pub mod matrix;
pub mod solution;
pub mod solver;

pub use cost::Cost;
pub use error::AssignmentError;
#[cfg(any(test, feature = "exhaustive"))]
pub use exhaustive::ExhaustiveSolver;
pub use hungarian::HungarianSolver;
pub use labels::{LabeledCostMatrix, LabeledPair};
pub use matrix::CostMatrix;
pub use solution::{Direction, DualPotentials, SolutionReport, UnsignedInt};
pub use solver::AssignmentSolver;

/// Solves `matrix` with a fresh [`HungarianSolver`].
pub fn solve<C: Cost>(
    matrix: &CostMatrix<C>,
    direction: Direction,
) -> Result<SolutionReport<usize, C>, AssignmentError> {
    HungarianSolver::new(matrix.size()).solve(matrix, direction)
}

/// Validates raw rows as a square matrix and solves it.
pub fn solve_rows<C: Cost, R: AsRef<[C]>>(
    rows: &[R],
    direction: Direction,
) -> Result<SolutionReport<usize, C>, AssignmentError> {
    let matrix = CostMatrix::from_rows(rows)?;
    solve(&matrix, direction)
}

#[cfg(test)]
mod testing;
