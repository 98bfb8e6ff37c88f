use crate::cost::Cost;
use crate::error::AssignmentError;
use crate::matrix::CostMatrix;
use crate::solution::{Direction, SolutionReport, UnsignedInt};
use crate::solver::AssignmentSolver;
use std::marker::PhantomData;
use tracing::trace;

/// Reference solver that tries every permutation of tasks.
///
/// Permutations are visited in lexicographic order and only a strictly better
/// total replaces the incumbent, so among tied optima the lexicographically
/// smallest assignment is returned.
#[derive(Clone, Debug)]
pub struct ExhaustiveSolver<I: UnsignedInt, C: Cost> {
    permutation: Vec<usize>,
    best: Vec<usize>,
    pub nits: u64,
    _marker: PhantomData<(I, C)>,
}

impl<I: UnsignedInt, C: Cost> ExhaustiveSolver<I, C> {
    /// Largest accepted matrix size.
    pub const MAX_SIZE: usize = 10;

    pub fn new() -> Self {
        Self {
            permutation: Vec::with_capacity(Self::MAX_SIZE),
            best: Vec::with_capacity(Self::MAX_SIZE),
            nits: 0,
            _marker: PhantomData,
        }
    }

    fn total(&self, matrix: &CostMatrix<C>) -> C {
        self.permutation
            .iter()
            .enumerate()
            .map(|(i, j)| matrix.get(i, *j))
            .sum()
    }
}

impl<I: UnsignedInt, C: Cost> Default for ExhaustiveSolver<I, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: UnsignedInt, C: Cost> AssignmentSolver<I, C> for ExhaustiveSolver<I, C> {
    fn solve(
        &mut self,
        matrix: &CostMatrix<C>,
        direction: Direction,
    ) -> Result<SolutionReport<I, C>, AssignmentError> {
        let size = self.validate_input(matrix)?;
        let n = matrix.size();
        if n > Self::MAX_SIZE {
            return Err(AssignmentError::InvalidInput(format!(
                "exhaustive search supports up to {} agents, got {}",
                Self::MAX_SIZE,
                n
            )));
        }

        self.nits = 0;
        self.permutation.clear();
        self.permutation.extend(0..n);
        self.best.clear();
        self.best.extend(0..n);
        let mut best_total = self.total(matrix);

        while next_permutation(&mut self.permutation) {
            self.nits += 1;
            let total = self.total(matrix);
            if direction.improves(total, best_total) {
                trace!("improved to {} with {:?}", total, self.permutation);
                best_total = total;
                self.best.copy_from_slice(&self.permutation);
            }
        }

        let task_ids: Vec<I> = num_iter::range(I::zero(), size).collect();
        let agent_to_task = self.best.iter().map(|j| task_ids[*j]).collect();
        Ok(SolutionReport::from_assignment(
            matrix,
            direction,
            agent_to_task,
            None,
        ))
    }
}

/// Rearranges `items` into the next permutation in lexicographic order.
/// Returns false, leaving `items` untouched, when it is already the last one.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let mut pivot = items.len() - 1;
    while pivot > 0 && items[pivot - 1] >= items[pivot] {
        pivot -= 1;
    }
    if pivot == 0 {
        return false;
    }
    let mut successor = items.len() - 1;
    while items[successor] <= items[pivot - 1] {
        successor -= 1;
    }
    items.swap(pivot - 1, successor);
    items[pivot..].reverse();
    true
}
