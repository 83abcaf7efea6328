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

//! Branch-and-bound engine over LP relaxations.
//!
//! This module implements a stateful search engine that explores integer
//! assignments of the program's integral columns while pruning subtrees
//! via relaxation bounds and an incumbent solution. The `BnbSolver` holds
//! reusable structures (the frontier and the relaxation solver); a search
//! session object encapsulates per-run state, statistics, and timing, and
//! a fast `reset` keeps allocations across repeated solves.
//!
//! Per node: merge the node's integer bounds over the program's bounds,
//! solve the relaxation, then prune (infeasible or bound-dominated),
//! accept (all integral columns on integers), or branch (two children
//! around the fractional value picked by the `BranchingRule`). The
//! frontier is LIFO and the down child is pushed last, so the search dives
//! depth-first toward rounded-down allocations and finds a first incumbent
//! quickly.

use crate::{
    branching::BranchingRule,
    frontier::Frontier,
    monitor::search_monitor::{PruneReason, SearchCommand, SearchMonitor},
    node::{NodeState, SearchNode, SeatBounds},
    result::{MilpSolution, SolveOutcome, SolverError},
    stats::SolverStatistics,
};
use hemicycle_core::num::approx::approx_ge;
use hemicycle_lp::{LpOutcome, SimplexSolver};
use hemicycle_model::program::{LinearProgram, VariableBounds};

/// Sentinel for an integral column without a finite upper bound.
///
/// Well-formed apportionment programs box every integral column; the
/// sentinel only exists so hand-built programs degrade predictably (their
/// relaxations surface `Unbounded`, which the engine turns into an error).
const UNBOUNDED_ABOVE: i64 = i64::MAX;

/// A branch-and-bound solver enforcing integrality over a linear program.
///
/// The construction and navigation of the search tree is directed by a
/// `BranchingRule`, relaxations are solved by the embedded
/// `SimplexSolver`, and monitors observe or stop the run. The solver
/// itself only owns reusable storage.
#[derive(Clone, Debug, Default)]
pub struct BnbSolver {
    lp: SimplexSolver,
    frontier: Frontier,
}

impl BnbSolver {
    /// Creates a new solver with a default relaxation solver.
    #[inline]
    pub fn new() -> Self {
        Self {
            lp: SimplexSolver::new(),
            frontier: Frontier::new(),
        }
    }

    /// Creates a new solver around a configured relaxation solver.
    #[inline]
    pub fn with_lp_solver(lp: SimplexSolver) -> Self {
        Self {
            lp,
            frontier: Frontier::new(),
        }
    }

    /// Creates a new solver with preallocated frontier storage for a
    /// program with `num_integral` integral columns.
    #[inline]
    pub fn preallocated(num_integral: usize) -> Self {
        Self {
            lp: SimplexSolver::new(),
            frontier: Frontier::preallocated(num_integral),
        }
    }

    /// Returns the embedded relaxation solver.
    #[inline]
    pub fn lp_solver(&self) -> &SimplexSolver {
        &self.lp
    }

    /// Solves the program to proven integer optimality, or until a monitor
    /// stops the search.
    ///
    /// # Errors
    ///
    /// Returns `SolverError::UnboundedRelaxation` if any relaxation is
    /// unbounded; this cannot happen for programs whose integral columns
    /// all carry finite bounds.
    pub fn solve<R, M>(
        &mut self,
        program: &LinearProgram,
        rule: &R,
        monitor: M,
    ) -> Result<SolveOutcome, SolverError>
    where
        R: BranchingRule,
        M: SearchMonitor,
    {
        let session = BnbSearchSession::new(self, program, rule, monitor);
        let result = session.run();
        self.reset();
        result
    }

    /// Resets per-run state, keeping allocations.
    #[inline]
    fn reset(&mut self) {
        self.frontier.reset();
    }
}

/// A search session: the state and logic of a single run.
struct BnbSearchSession<'a, R, M> {
    solver: &'a mut BnbSolver,
    program: &'a LinearProgram,
    rule: &'a R,
    monitor: M,
    /// Integral columns of the program, ascending. Node bound vectors are
    /// parallel to this list.
    integral: Vec<usize>,
    incumbent: Option<MilpSolution>,
    stats: SolverStatistics,
    start_time: std::time::Instant,
}

impl<'a, R, M> BnbSearchSession<'a, R, M>
where
    R: BranchingRule,
    M: SearchMonitor,
{
    fn new(
        solver: &'a mut BnbSolver,
        program: &'a LinearProgram,
        rule: &'a R,
        monitor: M,
    ) -> Self {
        let integral: Vec<usize> = program.integral_columns().collect();
        Self {
            solver,
            program,
            rule,
            monitor,
            integral,
            incumbent: None,
            stats: SolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Integer bounds of the root node, taken from the program's own
    /// bounds. Fractional program bounds are tightened inward; an infinite
    /// upper bound maps to the sentinel.
    fn root_bounds(&self) -> Vec<SeatBounds> {
        self.integral
            .iter()
            .map(|&column| {
                let bounds = self.program.bounds()[column];
                let upper = if bounds.upper.is_finite() {
                    bounds.upper.floor() as i64
                } else {
                    UNBOUNDED_ABOVE
                };
                SeatBounds::new(bounds.lower.ceil() as i64, upper)
            })
            .collect()
    }

    /// The program's bounds with the node's integer bounds merged over the
    /// integral columns.
    fn effective_bounds(&self, node: &SearchNode) -> Vec<VariableBounds> {
        let mut bounds = self.program.bounds().to_vec();
        for (position, &column) in self.integral.iter().enumerate() {
            let seat = node.bounds()[position];
            let upper = if seat.upper == UNBOUNDED_ABOVE {
                f64::INFINITY
            } else {
                seat.upper as f64
            };
            bounds[column] = VariableBounds {
                lower: seat.lower as f64,
                upper,
            };
        }
        bounds
    }

    fn run(mut self) -> Result<SolveOutcome, SolverError> {
        self.monitor.on_enter_search(self.program, &self.stats);
        self.start_time = std::time::Instant::now();

        let root = SearchNode::root(self.root_bounds());
        self.solver.frontier.push(root);

        let epsilon = self.solver.lp.epsilon();

        while let Some(mut node) = self.solver.frontier.pop() {
            self.stats.on_node_explored();
            self.stats.on_depth_update(node.depth() as u64);
            self.monitor.on_step();

            if let SearchCommand::Terminate(reason) = self.monitor.search_command() {
                return Ok(self.finish_aborted(reason));
            }

            // Crossed bounds from opposing branch decisions need no LP.
            if node.has_empty_domain() {
                node.set_state(NodeState::Pruned);
                self.stats.on_pruning_infeasible();
                self.monitor.on_prune(PruneReason::Infeasible, &self.stats);
                continue;
            }

            let bounds = self.effective_bounds(&node);
            self.stats.on_relaxation_solved();
            let relaxation = self.solver.lp.solve(self.program, &bounds);
            node.set_state(NodeState::Relaxed);

            let solution = match relaxation {
                LpOutcome::Infeasible => {
                    node.set_state(NodeState::Pruned);
                    self.stats.on_pruning_infeasible();
                    self.monitor.on_prune(PruneReason::Infeasible, &self.stats);
                    continue;
                }
                LpOutcome::Unbounded => {
                    self.stats.set_total_time(self.start_time.elapsed());
                    self.monitor.on_exit_search(&self.stats);
                    return Err(SolverError::UnboundedRelaxation);
                }
                LpOutcome::Optimal(solution) => solution,
            };

            if self.stats.nodes_explored == 1 {
                self.stats.set_root_lower_bound(solution.objective());
            }
            self.monitor
                .on_relaxation_solved(node.depth(), solution.objective(), &self.stats);

            // Bound cut: the relaxation optimum bounds everything below
            // this node, so matching the incumbent is already a dead end.
            if let Some(best) = &self.incumbent {
                if approx_ge(solution.objective(), best.objective(), epsilon) {
                    node.set_state(NodeState::Pruned);
                    self.stats.on_pruning_bound();
                    self.monitor
                        .on_prune(PruneReason::BoundDominated, &self.stats);
                    continue;
                }
            }

            match self.rule.select(&self.integral, solution.values(), epsilon) {
                None => {
                    node.set_state(NodeState::IntegerFeasible);
                    let incumbent =
                        MilpSolution::new(solution.values().to_vec(), solution.objective());
                    self.stats.on_solution_found();
                    self.monitor.on_solution_found(&incumbent, &self.stats);
                    self.incumbent = Some(incumbent);
                }
                Some(position) => {
                    node.set_state(NodeState::Branched);
                    let column = self.integral[position];
                    let value = solution.values()[column];
                    self.stats.on_branching();
                    // Up first, down second: the LIFO frontier explores
                    // the rounded-down child first.
                    self.solver.frontier.push(node.child_up(position, value));
                    self.solver.frontier.push(node.child_down(position, value));
                }
            }
        }

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);

        match self.incumbent.take() {
            Some(best) => Ok(SolveOutcome::optimal(best, self.stats)),
            None => Ok(SolveOutcome::infeasible(self.stats)),
        }
    }

    fn finish_aborted(mut self, reason: String) -> SolveOutcome {
        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        SolveOutcome::aborted(self.incumbent.take(), reason, self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::MostFractional;
    use crate::monitor::no_op::NoOpMonitor;
    use crate::monitor::node_limit::NodeLimitMonitor;
    use crate::result::SolveResult;
    use crate::result::TerminationReason;
    use hemicycle_model::program::{LinearConstraint, Relation};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    /// minimize -x - y subject to x + y <= 3.5, x and y integral in [0, 5].
    /// The relaxation optimum is fractional; the integer optimum is -3.
    fn fractional_corner_program() -> LinearProgram {
        let mut program = LinearProgram::new(2);
        program.set_objective_coefficient(0, -1.0);
        program.set_objective_coefficient(1, -1.0);
        program.set_bounds(0, VariableBounds::new(0.0, 5.0));
        program.set_bounds(1, VariableBounds::new(0.0, 5.0));
        program.mark_integral(0);
        program.mark_integral(1);
        program.push_constraint(LinearConstraint::new(
            vec![1.0, 1.0],
            Relation::LessEqual,
            3.5,
        ));
        program
    }

    #[test]
    fn test_branching_reaches_the_integer_optimum() {
        let program = fractional_corner_program();
        let mut solver = BnbSolver::new();
        let outcome = solver
            .solve(&program, &MostFractional, NoOpMonitor::new())
            .unwrap();

        assert!(outcome.is_optimal());
        let solution = outcome.result().solution().unwrap();
        assert_close(solution.objective(), -3.0);
        assert_close(solution.values()[0] + solution.values()[1], 3.0);
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::OptimalityProven
        );
    }

    #[test]
    fn test_integral_root_needs_no_branching() {
        // minimize -(2x + 3y) subject to x + y <= 2, x and y integral in
        // [0, 2]: the relaxation optimum already sits on (0, 2).
        let mut program = LinearProgram::new(2);
        program.set_objective_coefficient(0, -2.0);
        program.set_objective_coefficient(1, -3.0);
        program.set_bounds(0, VariableBounds::new(0.0, 2.0));
        program.set_bounds(1, VariableBounds::new(0.0, 2.0));
        program.mark_integral(0);
        program.mark_integral(1);
        program.push_constraint(LinearConstraint::new(
            vec![1.0, 1.0],
            Relation::LessEqual,
            2.0,
        ));

        let mut solver = BnbSolver::new();
        let outcome = solver
            .solve(&program, &MostFractional, NoOpMonitor::new())
            .unwrap();

        assert!(outcome.is_optimal());
        let solution = outcome.result().solution().unwrap();
        assert_close(solution.objective(), -6.0);
        assert_close(solution.values()[0], 0.0);
        assert_close(solution.values()[1], 2.0);
        assert_eq!(outcome.statistics().branchings, 0);
    }

    #[test]
    fn test_infeasible_program_is_proven_infeasible() {
        // x integral in [0, 1] but required to reach 2.
        let mut program = LinearProgram::new(1);
        program.set_bounds(0, VariableBounds::new(0.0, 1.0));
        program.mark_integral(0);
        program.push_constraint(LinearConstraint::new(
            vec![1.0],
            Relation::GreaterEqual,
            2.0,
        ));

        let mut solver = BnbSolver::new();
        let outcome = solver
            .solve(&program, &MostFractional, NoOpMonitor::new())
            .unwrap();

        assert!(outcome.is_infeasible());
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::InfeasibilityProven
        );
    }

    #[test]
    fn test_unbounded_relaxation_is_an_internal_error() {
        // minimize -x with x integral and unbounded above.
        let mut program = LinearProgram::new(1);
        program.set_objective_coefficient(0, -1.0);
        program.mark_integral(0);

        let mut solver = BnbSolver::new();
        let result = solver.solve(&program, &MostFractional, NoOpMonitor::new());
        assert_eq!(result, Err(SolverError::UnboundedRelaxation));
    }

    #[test]
    fn test_node_limit_aborts_without_incumbent_as_unknown() {
        let program = fractional_corner_program();
        let mut solver = BnbSolver::new();
        let outcome = solver
            .solve(&program, &MostFractional, NodeLimitMonitor::new(0))
            .unwrap();

        assert_eq!(outcome.result(), &SolveResult::Unknown);
        match outcome.termination_reason() {
            TerminationReason::Aborted(reason) => assert!(reason.contains("node limit")),
            other => panic!("expected Aborted, got {other}"),
        }
    }

    #[test]
    fn test_node_limit_aborts_with_incumbent_as_feasible() {
        // Enough budget to dive to a first incumbent, not enough to close
        // the tree.
        let program = fractional_corner_program();
        let mut solver = BnbSolver::new();
        let outcome = solver
            .solve(&program, &MostFractional, NodeLimitMonitor::new(4))
            .unwrap();

        match outcome.result() {
            SolveResult::Feasible(solution) => {
                // Any incumbent found this early satisfies the rows.
                assert!(solution.objective() <= 0.0);
            }
            SolveResult::Unknown => {}
            other => panic!("expected a truncated outcome, got {other}"),
        }
        assert!(matches!(
            outcome.termination_reason(),
            TerminationReason::Aborted(_)
        ));
    }

    #[test]
    fn test_identical_runs_produce_identical_results() {
        let program = fractional_corner_program();
        let mut solver = BnbSolver::new();
        let first = solver
            .solve(&program, &MostFractional, NoOpMonitor::new())
            .unwrap();
        let second = solver
            .solve(&program, &MostFractional, NoOpMonitor::new())
            .unwrap();

        // Wall time differs between runs; results and counters must not.
        assert_eq!(first.result(), second.result());
        assert_eq!(
            first.statistics().nodes_explored,
            second.statistics().nodes_explored
        );
        assert_eq!(
            first.statistics().branchings,
            second.statistics().branchings
        );
    }

    #[test]
    fn test_statistics_are_populated() {
        let program = fractional_corner_program();
        let mut solver = BnbSolver::new();
        let outcome = solver
            .solve(&program, &MostFractional, NoOpMonitor::new())
            .unwrap();

        let stats = outcome.statistics();
        assert!(stats.nodes_explored >= 3);
        assert!(stats.relaxations_solved >= 3);
        assert!(stats.branchings >= 1);
        assert!(stats.solutions_found >= 1);
        let root_bound = stats.root_lower_bound.unwrap();
        assert_close(root_bound, -3.5);
    }
}
