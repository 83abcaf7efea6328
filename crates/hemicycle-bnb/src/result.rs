// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::stats::SolverStatistics;
use thiserror::Error;

/// An integer-feasible point of the mixed-integer program.
///
/// The assignment covers every column (auxiliary variables included); the
/// integral columns lie within tolerance of integers.
#[derive(Debug, Clone, PartialEq)]
pub struct MilpSolution {
    values: Vec<f64>,
    objective: f64,
}

impl MilpSolution {
    /// Constructs a new `MilpSolution`.
    #[inline]
    pub fn new(values: Vec<f64>, objective: f64) -> Self {
        Self { values, objective }
    }

    /// Returns the full variable assignment.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the objective value of this point.
    #[inline]
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Consumes the solution and returns the assignment vector.
    #[inline]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl std::fmt::Display for MilpSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MilpSolution(objective: {}, num_variables: {})",
            self.objective,
            self.values.len()
        )
    }
}

/// Result of the search after termination.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveResult {
    /// We have found a solution and proven its optimality.
    Optimal(MilpSolution),
    /// We have found a feasible solution, but not proven its optimality.
    Feasible(MilpSolution),
    /// We have proven that the problem is infeasible.
    Infeasible,
    /// The solver terminated without finding a solution and without
    /// proving infeasibility.
    Unknown,
}

impl SolveResult {
    /// Returns the solution if one was found, optimal or not.
    #[inline]
    pub fn solution(&self) -> Option<&MilpSolution> {
        match self {
            SolveResult::Optimal(solution) | SolveResult::Feasible(solution) => Some(solution),
            _ => None,
        }
    }
}

impl std::fmt::Display for SolveResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveResult::Optimal(solution) => {
                write!(f, "Optimal(objective={})", solution.objective())
            }
            SolveResult::Feasible(solution) => {
                write!(f, "Feasible(objective={})", solution.objective())
            }
            SolveResult::Infeasible => write!(f, "Infeasible"),
            SolveResult::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The solver found and proved optimality of a solution.
    OptimalityProven,
    /// The solver proved that the problem is infeasible.
    InfeasibilityProven,
    /// The solver aborted due to a search limit (time, nodes, etc.).
    /// The string contains information about the reason for abortion.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of the solver after termination.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    result: SolveResult,
    termination_reason: TerminationReason,
    statistics: SolverStatistics,
}

impl SolveOutcome {
    #[inline]
    pub fn optimal(solution: MilpSolution, statistics: SolverStatistics) -> Self {
        Self {
            result: SolveResult::Optimal(solution),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: SolverStatistics) -> Self {
        Self {
            result: SolveResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    #[inline]
    pub fn aborted<R>(
        solution: Option<MilpSolution>,
        reason: R,
        statistics: SolverStatistics,
    ) -> Self
    where
        R: Into<String>,
    {
        let termination_reason = TerminationReason::Aborted(reason.into());

        let result = match solution {
            Some(solution) => SolveResult::Feasible(solution),
            None => SolveResult::Unknown,
        };

        Self {
            result,
            termination_reason,
            statistics,
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolveResult {
        &self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }

    /// Returns `true` if the result is a proven optimum.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolveResult::Optimal(_))
    }

    /// Returns `true` if the problem was proven infeasible.
    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, SolveResult::Infeasible)
    }

    /// Returns `true` if any solution (optimal or not) is available.
    #[inline]
    pub fn has_solution(&self) -> bool {
        self.result.solution().is_some()
    }
}

impl std::fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolveOutcome(result: {}, reason: {})",
            self.result, self.termination_reason
        )
    }
}

/// Fatal invariant violations inside the solving engine.
///
/// These are not problem outcomes. Every variable of a well-formed
/// apportionment program is boxed, so its relaxations can never be
/// unbounded; if one is reported anyway, the model or the arithmetic is
/// broken and no result should be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("an LP relaxation reported an unbounded optimum over a boxed search space")]
    UnboundedRelaxation,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> SolverStatistics {
        SolverStatistics::default()
    }

    fn solution(objective: f64) -> MilpSolution {
        MilpSolution::new(vec![1.0, 2.0], objective)
    }

    #[test]
    fn test_optimal_outcome_pairs_result_and_reason() {
        let outcome = SolveOutcome::optimal(solution(3.0), stats());
        assert!(outcome.is_optimal());
        assert!(outcome.has_solution());
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::OptimalityProven
        );
    }

    #[test]
    fn test_infeasible_outcome_has_no_solution() {
        let outcome = SolveOutcome::infeasible(stats());
        assert!(outcome.is_infeasible());
        assert!(!outcome.has_solution());
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::InfeasibilityProven
        );
    }

    #[test]
    fn test_aborted_with_incumbent_is_feasible() {
        let outcome = SolveOutcome::aborted(Some(solution(4.0)), "time limit reached", stats());
        assert!(!outcome.is_optimal());
        assert!(outcome.has_solution());
        match outcome.termination_reason() {
            TerminationReason::Aborted(reason) => assert_eq!(reason, "time limit reached"),
            other => panic!("expected Aborted, got {other}"),
        }
    }

    #[test]
    fn test_aborted_without_incumbent_is_unknown() {
        let outcome = SolveOutcome::aborted(None, "node limit reached", stats());
        assert_eq!(outcome.result(), &SolveResult::Unknown);
        assert!(!outcome.has_solution());
    }

    #[test]
    fn test_solve_result_solution_access() {
        assert!(SolveResult::Optimal(solution(1.0)).solution().is_some());
        assert!(SolveResult::Feasible(solution(1.0)).solution().is_some());
        assert!(SolveResult::Infeasible.solution().is_none());
        assert!(SolveResult::Unknown.solution().is_none());
    }

    #[test]
    fn test_solver_error_message() {
        let message = SolverError::UnboundedRelaxation.to_string();
        assert!(message.contains("unbounded"));
    }
}
