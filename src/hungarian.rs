use crate::cost::Cost;
use crate::error::AssignmentError;
use crate::matrix::CostMatrix;
use crate::solution::{Direction, DualPotentials, SolutionReport, UnsignedInt};
use crate::solver::AssignmentSolver;
use tracing::{debug, trace};

/// Solver for the dense assignment problem
/// Which finds an assignment of N agents -> N tasks with the Hungarian method.
///
/// Agents are inserted one by one. Each insertion grows a shortest augmenting path
/// through the equality subgraph and shifts the dual potentials by the minimum
/// slack of the search frontier whenever no tight edge leads further. Every step
/// visits one more task, so a single insertion takes at most N steps of O(N) work
/// and the whole solve is O(N^3).
///
/// Among equally cheap frontier tasks the lowest task index is taken, which makes
/// the result deterministic for a given input.
#[derive(Clone, Debug)]
pub struct HungarianSolver<I: UnsignedInt, C: Cost> {
    size: usize,
    // direction adjusted copy of the matrix, row-major
    costs: Vec<C>,
    agent_potentials: Vec<C>,
    // the extra last slot is the virtual task every search starts from
    task_potentials: Vec<C>,
    task_owner: Vec<I>,
    predecessor: Vec<I>,
    min_slack: Vec<C>,
    visited: Vec<bool>,

    pub nits: u32,
    pub nrelabels: u32,
}

impl<I: UnsignedInt, C: Cost> HungarianSolver<I, C> {
    /// Creates a solver with scratch space for matrices up to `capacity` x `capacity`.
    /// Larger matrices are still accepted, the buffers grow on demand.
    pub fn new(capacity: usize) -> Self {
        Self {
            size: 0,
            costs: Vec::with_capacity(capacity.saturating_mul(capacity)),
            agent_potentials: Vec::with_capacity(capacity),
            task_potentials: Vec::with_capacity(capacity + 1),
            task_owner: Vec::with_capacity(capacity + 1),
            predecessor: Vec::with_capacity(capacity + 1),
            min_slack: Vec::with_capacity(capacity + 1),
            visited: Vec::with_capacity(capacity + 1),
            nits: 0,
            nrelabels: 0,
        }
    }

    /// Copies the oriented costs and starts from the reduced matrix: agent potentials
    /// are row minima, task potentials are column minima after row reduction.
    fn init_solve(&mut self, matrix: &CostMatrix<C>, direction: Direction) {
        let n = matrix.size();
        self.size = n;
        self.nits = 0;
        self.nrelabels = 0;

        self.costs.clear();
        self.costs
            .extend(matrix.values().iter().map(|c| direction.orient(*c)));

        self.agent_potentials.clear();
        self.agent_potentials.extend(
            self.costs
                .chunks_exact(n)
                .map(|row| row.iter().copied().fold(C::unbounded(), min_cost)),
        );

        self.task_potentials.clear();
        self.task_potentials.resize(n + 1, C::unbounded());
        for (row, u) in self.costs.chunks_exact(n).zip(self.agent_potentials.iter()) {
            for (v, c) in self.task_potentials.iter_mut().zip(row.iter()) {
                *v = min_cost(*v, *c - *u);
            }
        }
        self.task_potentials[n] = C::zero();
        trace!("agent potentials: {:?}", self.agent_potentials);
        trace!("task potentials: {:?}", self.task_potentials);

        self.task_owner.clear();
        self.task_owner.resize(n + 1, I::max_value());
        self.predecessor.clear();
        self.predecessor.resize(n + 1, I::max_value());
        self.min_slack.clear();
        self.min_slack.resize(n + 1, C::unbounded());
        self.visited.clear();
        self.visited.resize(n + 1, false);
    }

    /// Matches `agent` by growing an augmenting path from the virtual task `size`.
    fn insert_agent(&mut self, agent: I, size: I) {
        let n = self.size;
        self.task_owner[n] = agent;
        self.min_slack.iter_mut().for_each(|s| *s = C::unbounded());
        self.visited.iter_mut().for_each(|v| *v = false);

        let mut current = size;
        loop {
            self.nits += 1;
            let current_usize: usize = current.as_();
            self.visited[current_usize] = true;
            let i: usize = self.task_owner[current_usize].as_();
            let u = self.agent_potentials[i];
            let row = &self.costs[i * n..(i + 1) * n];

            let mut delta = C::unbounded();
            let mut next = size;
            for j in num_iter::range(I::zero(), size) {
                let j_usize: usize = j.as_();
                if self.visited[j_usize] {
                    continue;
                }
                let slack = row[j_usize] - u - self.task_potentials[j_usize];
                if slack < self.min_slack[j_usize] {
                    self.min_slack[j_usize] = slack;
                    self.predecessor[j_usize] = current;
                }
                // strict comparison keeps the lowest task index on ties
                if self.min_slack[j_usize] < delta {
                    delta = self.min_slack[j_usize];
                    next = j;
                }
            }
            debug_assert!(next < size, "frontier must contain an unvisited task");

            if delta != C::zero() {
                self.nrelabels += 1;
                trace!("relabel by {} from agent {}", delta, i);
            }
            for j in 0..=n {
                if self.visited[j] {
                    let owner: usize = self.task_owner[j].as_();
                    self.agent_potentials[owner] += delta;
                    self.task_potentials[j] -= delta;
                } else {
                    self.min_slack[j] -= delta;
                }
            }

            current = next;
            let current_usize: usize = current.as_();
            if self.task_owner[current_usize] == I::max_value() {
                break;
            }
        }

        // flip the alternating path back to the virtual task
        while current != size {
            let current_usize: usize = current.as_();
            let previous = self.predecessor[current_usize];
            let previous_usize: usize = previous.as_();
            self.task_owner[current_usize] = self.task_owner[previous_usize];
            current = previous;
        }
        trace!("agent {} inserted, task owners: {:?}", agent, self.task_owner);
    }
}

impl<I: UnsignedInt, C: Cost> Default for HungarianSolver<I, C> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<I: UnsignedInt, C: Cost> AssignmentSolver<I, C> for HungarianSolver<I, C> {
    fn solve(
        &mut self,
        matrix: &CostMatrix<C>,
        direction: Direction,
    ) -> Result<SolutionReport<I, C>, AssignmentError> {
        let size = self.validate_input(matrix)?;
        self.init_solve(matrix, direction);

        for agent in num_iter::range(I::zero(), size) {
            self.insert_agent(agent, size);
        }

        let n = self.size;
        let mut agent_to_task = vec![I::max_value(); n];
        for task in num_iter::range(I::zero(), size) {
            let task_usize: usize = task.as_();
            let owner: usize = self.task_owner[task_usize].as_();
            agent_to_task[owner] = task;
        }
        let duals = DualPotentials {
            agents: self.agent_potentials.clone(),
            tasks: self.task_potentials[..n].to_vec(),
        };
        let report = SolutionReport::from_assignment(matrix, direction, agent_to_task, Some(duals));
        debug!(
            "solved {}x{} {:?}: objective {}, nits {}, nrelabels {}",
            n, n, direction, report.objective, self.nits, self.nrelabels
        );
        Ok(report)
    }
}

#[inline]
fn min_cost<C: Cost>(a: C, b: C) -> C {
    if b < a {
        b
    } else {
        a
    }
}

#[cfg(test)]
#[generic_tests::define]
mod index_tests {
    use super::HungarianSolver;
    use crate::exhaustive::ExhaustiveSolver;
    use crate::solution::{Direction, UnsignedInt};
    use crate::solver::AssignmentSolver;
    use crate::testing::uniform_i64;

    #[test]
    fn test_matches_exhaustive<I: UnsignedInt>() {
        let mut solver = HungarianSolver::<I, i64>::new(7);
        let mut reference = ExhaustiveSolver::<I, i64>::new();
        for size in 1..=7 {
            for seed in 0..10 {
                let matrix = uniform_i64(seed * 100 + size as u64, size, -50, 50);
                for &direction in &[Direction::Minimize, Direction::Maximize] {
                    let report = solver.solve(&matrix, direction).unwrap();
                    let expected = reference.solve(&matrix, direction).unwrap();
                    assert_eq!(report.objective, expected.objective);
                    assert!(report.is_permutation());
                    assert!(report.is_certified_optimal(&matrix, 0.0));
                }
            }
        }
    }

    #[test]
    fn test_known_instance<I: UnsignedInt>() {
        let matrix = crate::CostMatrix::from_rows(&[[4, 2, 8], [4, 3, 7], [3, 1, 6]]).unwrap();
        let report = HungarianSolver::<I, i32>::default()
            .solve(&matrix, Direction::Minimize)
            .unwrap();
        let tasks: Vec<usize> = report.pairs().map(|(_, task, _)| task).collect();
        assert_eq!(tasks, [1, 0, 2]);
        assert_eq!(report.objective, 12);
    }

    #[instantiate_tests(<u16>)]
    mod index_u16 {}

    #[instantiate_tests(<u32>)]
    mod index_u32 {}

    #[instantiate_tests(<usize>)]
    mod index_usize {}
}
