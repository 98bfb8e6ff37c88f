use crate::cost::Cost;
use crate::error::AssignmentError;
use crate::matrix::CostMatrix;
use crate::solution::{SolutionReport, UnsignedInt};

/// Cost matrix together with the names of its agents and tasks.
///
/// Solvers only see index positions; names are attached back to a report with
/// [`LabeledCostMatrix::labeled_pairs`].
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledCostMatrix<C: Cost> {
    agents: Vec<String>,
    tasks: Vec<String>,
    matrix: CostMatrix<C>,
}

/// Assigned pair with the names of its agent and task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledPair<'a, C> {
    pub agent: &'a str,
    pub task: &'a str,
    pub cost: C,
}

impl<C: Cost> LabeledCostMatrix<C> {
    pub fn new(
        agents: Vec<String>,
        tasks: Vec<String>,
        matrix: CostMatrix<C>,
    ) -> Result<Self, AssignmentError> {
        let n = matrix.size();
        if agents.len() != n || tasks.len() != n {
            return Err(AssignmentError::InvalidInput(format!(
                "{} agent and {} task labels for a matrix of size {}",
                agents.len(),
                tasks.len(),
                n
            )));
        }
        Ok(Self {
            agents,
            tasks,
            matrix,
        })
    }

    #[inline]
    pub fn matrix(&self) -> &CostMatrix<C> {
        &self.matrix
    }

    #[inline]
    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    #[inline]
    pub fn tasks(&self) -> &[String] {
        &self.tasks
    }

    /// Names every pair of `report`, in agent order.
    ///
    /// Fails if the report was produced for a matrix of a different size.
    pub fn labeled_pairs<'a, I: UnsignedInt>(
        &'a self,
        report: &SolutionReport<I, C>,
    ) -> Result<Vec<LabeledPair<'a, C>>, AssignmentError> {
        if report.size() != self.matrix.size() {
            return Err(AssignmentError::InvalidInput(format!(
                "report of size {} doesn't belong to a matrix of size {}",
                report.size(),
                self.matrix.size()
            )));
        }
        Ok(report
            .pairs()
            .map(|(agent, task, cost)| LabeledPair {
                agent: &self.agents[agent],
                task: &self.tasks[task],
                cost,
            })
            .collect())
    }
}
