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

//! The apportionment facade: configure, solve, extract.
//!
//! Wires the pipeline together: build the program from the instance, run
//! branch-and-bound under the configured monitors, and reshape the winning
//! assignment's seat columns into a `SeatMatrix`. Extraction rounds each
//! seat value to the nearest integer (the engine only accepts points whose
//! integral columns sit within tolerance of integers) and clamps residual
//! negative noise to zero.

use hemicycle_bnb::{
    bnb::BnbSolver,
    branching::MostFractional,
    monitor::{
        composite::CompositeMonitor, log::LogMonitor, node_limit::NodeLimitMonitor,
        time_limit::TimeLimitMonitor,
    },
    result::{MilpSolution, SolveResult, SolverError, TerminationReason},
    stats::SolverStatistics,
};
use hemicycle_core::num::approx::{DEFAULT_EPSILON, is_integral};
use hemicycle_lp::SimplexSolver;
use hemicycle_model::{
    builder::build_program, instance::ElectionInstance, layout::VariableLayout,
    solution::SeatMatrix, weights::DeviationWeights,
};
use std::time::Duration;

/// Result of an apportionment run.
///
/// Mirrors the engine's result variants with the seat columns already
/// reshaped; an allocation is only ever present when the engine produced
/// one, never partially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApportionmentResult {
    /// Proven optimal allocation.
    Optimal(SeatMatrix),
    /// Best allocation found before a budget ran out; not proven optimal.
    Feasible(SeatMatrix),
    /// No allocation satisfies the seat total and the regional minimums.
    Infeasible,
    /// A budget ran out before any allocation was found.
    Unknown,
}

impl ApportionmentResult {
    /// Returns the allocation if one is available, optimal or not.
    #[inline]
    pub fn allocation(&self) -> Option<&SeatMatrix> {
        match self {
            ApportionmentResult::Optimal(matrix) | ApportionmentResult::Feasible(matrix) => {
                Some(matrix)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ApportionmentResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApportionmentResult::Optimal(_) => write!(f, "Optimal"),
            ApportionmentResult::Feasible(_) => write!(f, "Feasible"),
            ApportionmentResult::Infeasible => write!(f, "Infeasible"),
            ApportionmentResult::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Full outcome of an apportionment run: result, termination reason, and
/// the engine's statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ApportionmentOutcome {
    result: ApportionmentResult,
    termination_reason: TerminationReason,
    statistics: SolverStatistics,
}

impl ApportionmentOutcome {
    /// Returns the apportionment result.
    #[inline]
    pub fn result(&self) -> &ApportionmentResult {
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

    /// Returns `true` if the allocation is proven optimal.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, ApportionmentResult::Optimal(_))
    }

    /// Returns `true` if the instance was proven infeasible.
    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, ApportionmentResult::Infeasible)
    }

    /// Returns `true` if any allocation (optimal or not) is available.
    #[inline]
    pub fn has_allocation(&self) -> bool {
        self.result.allocation().is_some()
    }
}

impl std::fmt::Display for ApportionmentOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ApportionmentOutcome(result: {}, reason: {})",
            self.result, self.termination_reason
        )
    }
}

/// Solver for proportional seat apportionment.
///
/// Configure through the builder, then call `solve` as often as needed;
/// the solver is immutable and reusable across instances.
///
/// # Examples
///
/// ```rust
/// use hemicycle_model::{instance::ElectionInstance, weights::DeviationWeights};
/// use hemicycle_solver::ApportionmentSolver;
/// use std::time::Duration;
///
/// let solver = ApportionmentSolver::builder()
///     .with_weights(DeviationWeights::new(1.0, 1.0, 2.0).unwrap())
///     .with_time_limit(Duration::from_secs(30))
///     .build();
///
/// let instance =
///     ElectionInstance::from_rows(&[vec![80, 20], vec![30, 70]], &[100, 100], 10, 0).unwrap();
/// let outcome = solver.solve(&instance).unwrap();
/// assert!(outcome.is_optimal());
/// ```
#[derive(Debug, Clone)]
pub struct ApportionmentSolver {
    weights: DeviationWeights,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
    epsilon: f64,
    progress_log: bool,
}

impl Default for ApportionmentSolver {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ApportionmentSolver {
    /// Creates a solver with default configuration: equal weights, no
    /// budgets, default tolerance.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts building a configured solver.
    #[inline]
    pub fn builder() -> ApportionmentSolverBuilder {
        ApportionmentSolverBuilder::new()
    }

    /// Returns the configured objective weights.
    #[inline]
    pub fn weights(&self) -> &DeviationWeights {
        &self.weights
    }

    /// Returns the configured wall-clock budget, if any.
    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Returns the configured node budget, if any.
    #[inline]
    pub fn node_limit(&self) -> Option<u64> {
        self.node_limit
    }

    /// Computes the seat allocation for one instance.
    ///
    /// # Errors
    ///
    /// Returns `SolverError` only on internal invariant violations; every
    /// regular outcome (including infeasibility and exhausted budgets) is
    /// a variant of `ApportionmentOutcome`.
    pub fn solve(
        &self,
        instance: &ElectionInstance,
    ) -> Result<ApportionmentOutcome, SolverError> {
        let layout = VariableLayout::for_instance(instance);
        let program = build_program(instance, &self.weights);

        let mut monitor = CompositeMonitor::new();
        if let Some(time_limit) = self.time_limit {
            monitor.add_monitor(Box::new(TimeLimitMonitor::new(time_limit)));
        }
        if let Some(node_limit) = self.node_limit {
            monitor.add_monitor(Box::new(NodeLimitMonitor::new(node_limit)));
        }
        if self.progress_log {
            monitor.add_monitor(Box::new(LogMonitor::default()));
        }

        let lp = SimplexSolver::new().with_epsilon(self.epsilon);
        let mut engine = BnbSolver::with_lp_solver(lp);
        let outcome = engine.solve(&program, &MostFractional, monitor)?;

        let termination_reason = outcome.termination_reason().clone();
        let statistics = outcome.statistics().clone();
        let result = match outcome.result() {
            SolveResult::Optimal(solution) => {
                ApportionmentResult::Optimal(extract_seats(&layout, solution))
            }
            SolveResult::Feasible(solution) => {
                ApportionmentResult::Feasible(extract_seats(&layout, solution))
            }
            SolveResult::Infeasible => ApportionmentResult::Infeasible,
            SolveResult::Unknown => ApportionmentResult::Unknown,
        };

        Ok(ApportionmentOutcome {
            result,
            termination_reason,
            statistics,
        })
    }
}

/// Builder for `ApportionmentSolver`.
#[derive(Debug, Clone)]
pub struct ApportionmentSolverBuilder {
    weights: DeviationWeights,
    time_limit: Option<Duration>,
    node_limit: Option<u64>,
    epsilon: f64,
    progress_log: bool,
}

impl Default for ApportionmentSolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ApportionmentSolverBuilder {
    /// Creates a builder with default configuration.
    #[inline]
    pub fn new() -> Self {
        Self {
            weights: DeviationWeights::default(),
            time_limit: None,
            node_limit: None,
            epsilon: DEFAULT_EPSILON,
            progress_log: false,
        }
    }

    /// Sets the objective weights.
    #[inline]
    pub fn with_weights(mut self, weights: DeviationWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Caps the wall-clock time of a run. On expiry the best allocation
    /// found so far is returned, marked feasible rather than optimal.
    #[inline]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Caps the number of explored nodes. The deterministic counterpart
    /// to the time limit.
    #[inline]
    pub fn with_node_limit(mut self, node_limit: u64) -> Self {
        self.node_limit = Some(node_limit);
        self
    }

    /// Overrides the numeric tolerance of the solving stack.
    #[inline]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Enables periodic progress lines on standard output.
    #[inline]
    pub fn with_progress_log(mut self, enabled: bool) -> Self {
        self.progress_log = enabled;
        self
    }

    /// Finalizes the configuration.
    #[inline]
    pub fn build(self) -> ApportionmentSolver {
        ApportionmentSolver {
            weights: self.weights,
            time_limit: self.time_limit,
            node_limit: self.node_limit,
            epsilon: self.epsilon,
            progress_log: self.progress_log,
        }
    }
}

/// Reshapes the seat columns of a winning assignment into the matrix.
///
/// Values are within tolerance of integers by construction; rounding
/// removes the numerical noise and the clamp removes the occasional
/// `-0.0000000001` the simplex leaves behind on zero seats.
fn extract_seats(layout: &VariableLayout, solution: &MilpSolution) -> SeatMatrix {
    let mut seats = Vec::with_capacity(layout.num_seat_columns());
    for column in 0..layout.num_seat_columns() {
        let value = solution.values()[column];
        debug_assert!(
            is_integral(value, 1e-6),
            "called `extract_seats` on a non-integral seat column: column {} holds {}",
            column,
            value
        );
        seats.push((value.round() as i64).max(0));
    }
    SeatMatrix::new(layout.num_parties(), seats)
}
