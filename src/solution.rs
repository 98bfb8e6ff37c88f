use crate::cost::Cost;
use crate::matrix::CostMatrix;
use num_traits::{AsPrimitive, FromPrimitive, NumAssign, PrimInt, Unsigned};
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

pub trait UnsignedInt:
    PrimInt
    + Unsigned
    + Display
    + Debug
    + AsPrimitive<usize>
    + AsPrimitive<f64>
    + FromPrimitive
    + NumAssign
    + Send
    + Sync
{
}

impl<T> UnsignedInt for T where
    T: PrimInt
        + Unsigned
        + Display
        + Debug
        + AsPrimitive<usize>
        + AsPrimitive<f64>
        + FromPrimitive
        + NumAssign
        + Send
        + Sync
{
}

/// Optimization direction of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Minimize,
    Maximize,
}

impl Direction {
    /// Maps an original cost into the minimization space used by the solvers.
    #[inline]
    pub fn orient<C: Cost>(self, cost: C) -> C {
        match self {
            Direction::Minimize => cost,
            Direction::Maximize => -cost,
        }
    }

    /// `true` if `candidate` is a strictly better objective than `incumbent`.
    #[inline]
    pub fn improves<C: Cost>(self, candidate: C, incumbent: C) -> bool {
        match self {
            Direction::Minimize => candidate < incumbent,
            Direction::Maximize => candidate > incumbent,
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Minimize
    }
}

/// Final dual potentials of the minimization problem.
///
/// For `Maximize` they refer to the negated costs. For every agent i and task j
/// `agents[i] + tasks[j] <= cost(i, j)`, with equality on assigned pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct DualPotentials<C> {
    pub agents: Vec<C>,
    pub tasks: Vec<C>,
}

/// Solution of the linear assignment problem.
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionReport<I, C>
where
    I: UnsignedInt,
    C: Cost,
{
    /// index i gives the task, j, assigned to agent i
    pub agent_to_task: Vec<I>,
    /// index j gives the agent, i, assigned to task j
    pub task_to_agent: Vec<I>,
    /// index i gives the original cost of the pair (i, agent_to_task[i])
    pub pair_costs: Vec<C>,
    /// sum of `pair_costs`
    pub objective: C,
    pub direction: Direction,
    /// optimality certificate, if the solver produces one
    pub duals: Option<DualPotentials<C>>,
}

impl<I, C> SolutionReport<I, C>
where
    I: UnsignedInt,
    C: Cost,
{
    /// Assembles a report from a complete agent to task mapping.
    ///
    /// `agent_to_task` must be a permutation of `0..matrix.size()`.
    pub fn from_assignment(
        matrix: &CostMatrix<C>,
        direction: Direction,
        agent_to_task: Vec<I>,
        duals: Option<DualPotentials<C>>,
    ) -> Self {
        debug_assert_eq!(agent_to_task.len(), matrix.size());
        let mut task_to_agent = vec![I::max_value(); matrix.size()];
        let mut pair_costs = Vec::with_capacity(matrix.size());
        let mut agent = I::zero();
        for (i, task) in agent_to_task.iter().enumerate() {
            let task_usize: usize = task.as_();
            task_to_agent[task_usize] = agent;
            pair_costs.push(matrix.get(i, task_usize));
            agent += I::one();
        }
        let objective = pair_costs.iter().copied().sum();
        Self {
            agent_to_task,
            task_to_agent,
            pair_costs,
            objective,
            direction,
            duals,
        }
    }

    /// Number of assigned pairs.
    #[inline]
    pub fn size(&self) -> usize {
        self.agent_to_task.len()
    }

    /// Iterates over `(agent, task, cost)` for every agent in index order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, C)> + '_ {
        self.agent_to_task
            .iter()
            .zip(self.pair_costs.iter())
            .enumerate()
            .map(|(agent, (task, cost))| (agent, AsPrimitive::<usize>::as_(*task), *cost))
    }

    /// Largest cost among the assigned pairs.
    pub fn max_pair_cost(&self) -> Option<C> {
        self.pair_costs
            .iter()
            .copied()
            .fold(None, |acc, c| match acc {
                Some(m) if m >= c => Some(m),
                _ => Some(c),
            })
    }

    /// Smallest cost among the assigned pairs.
    pub fn min_pair_cost(&self) -> Option<C> {
        self.pair_costs
            .iter()
            .copied()
            .fold(None, |acc, c| match acc {
                Some(m) if m <= c => Some(m),
                _ => Some(c),
            })
    }

    /// Counts pair costs per bin of `bin_width`, returning `(bin_start, count)`
    /// sorted by `bin_start`. Bins are half-open: `[start, start + bin_width)`.
    ///
    /// Returns `None` unless `bin_width` is finite and positive.
    pub fn cost_distribution(&self, bin_width: f64) -> Option<Vec<(f64, usize)>> {
        if !(bin_width.is_finite() && bin_width > 0.) {
            return None;
        }
        let mut bins: BTreeMap<i64, usize> = BTreeMap::new();
        for cost in self.pair_costs.iter() {
            let value: f64 = cost.as_();
            *bins.entry((value / bin_width).floor() as i64).or_insert(0) += 1;
        }
        Some(
            bins.into_iter()
                .map(|(bin, count)| (bin as f64 * bin_width, count))
                .collect(),
        )
    }

    /// Returns true if every agent and every task appears exactly once.
    pub fn is_permutation(&self) -> bool {
        let n = self.agent_to_task.len();
        if self.task_to_agent.len() != n || self.pair_costs.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for (i, task) in self.agent_to_task.iter().enumerate() {
            let j: usize = task.as_();
            if j >= n || seen[j] {
                return false;
            }
            seen[j] = true;
            let back: usize = self.task_to_agent[j].as_();
            if back != i {
                return false;
            }
        }
        true
    }

    /// Checks the LP duality certificate of the solution against `matrix`.
    ///
    /// The solution is optimal if the duals are feasible on every edge and tight on
    /// every assigned edge, up to `toleration`. Reports without duals are never
    /// certified.
    pub fn is_certified_optimal(&self, matrix: &CostMatrix<C>, toleration: f64) -> bool {
        let duals = match &self.duals {
            Some(duals) => duals,
            None => return false,
        };
        let n = matrix.size();
        if self.size() != n || duals.agents.len() != n || duals.tasks.len() != n {
            return false;
        }
        if !self.is_permutation() {
            return false;
        }
        for (i, row) in matrix.rows().enumerate() {
            let u: f64 = duals.agents[i].as_();
            let assigned: usize = self.agent_to_task[i].as_();
            for (j, cost) in row.iter().enumerate() {
                let v: f64 = duals.tasks[j].as_();
                let c: f64 = self.direction.orient(*cost).as_();
                let slack = c - u - v;
                if slack < -toleration {
                    return false;
                }
                if j == assigned && slack > toleration {
                    return false;
                }
            }
        }
        true
    }
}
