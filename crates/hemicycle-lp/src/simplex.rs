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

//! Two-phase simplex with Bland's rule.
//!
//! Phase 1 maximizes the negated sum of the artificial columns to find a
//! basic feasible solution; a residual artificial value above tolerance
//! proves infeasibility. Phase 2 optimizes the real objective with the
//! artificial columns barred from entering. Both phases pick the entering
//! column as the lowest eligible index and break leaving-row ratio ties by
//! the lowest basic column index, so the walk over the vertices is fully
//! deterministic and cannot cycle.

use crate::{
    outcome::{LpOutcome, LpSolution},
    tableau::Tableau,
};
use hemicycle_core::num::approx::{DEFAULT_EPSILON, approx_eq};
use hemicycle_model::program::{LinearProgram, VariableBounds};

enum PivotResult {
    Optimal,
    Unbounded,
}

/// Solver for continuous linear relaxations.
///
/// Stateless between calls; `solve` is a pure function of the program and
/// the effective bounds. The iteration cap is a backstop only, Bland's rule
/// reaches an optimal basis long before it on well-posed inputs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimplexSolver {
    epsilon: f64,
    max_iterations: usize,
}

impl Default for SimplexSolver {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_iterations: 10_000,
        }
    }
}

impl SimplexSolver {
    /// Creates a solver with the default tolerance and iteration cap.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the feasibility and optimality tolerance.
    #[inline]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Overrides the pivot iteration cap.
    #[inline]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Returns the tolerance this solver compares against.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Solves the continuous relaxation of `program` under the given
    /// effective bounds, ignoring integrality flags.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hemicycle_lp::SimplexSolver;
    /// # use hemicycle_model::program::{LinearConstraint, LinearProgram, Relation};
    ///
    /// // minimize 2x + 3y subject to x + y >= 4, x and y non-negative.
    /// let mut program = LinearProgram::new(2);
    /// program.set_objective_coefficient(0, 2.0);
    /// program.set_objective_coefficient(1, 3.0);
    /// program.push_constraint(LinearConstraint::new(
    ///     vec![1.0, 1.0],
    ///     Relation::GreaterEqual,
    ///     4.0,
    /// ));
    ///
    /// let outcome = SimplexSolver::new().solve(&program, program.bounds());
    /// let solution = outcome.solution().unwrap();
    /// assert!((solution.objective() - 8.0).abs() < 1e-6);
    /// ```
    pub fn solve(&self, program: &LinearProgram, bounds: &[VariableBounds]) -> LpOutcome {
        // Crossed bounds make the feasible box empty before any row is
        // looked at. Branching can produce such nodes.
        for bound in bounds {
            if bound.lower > bound.upper + self.epsilon {
                return LpOutcome::Infeasible;
            }
        }

        let mut tableau = Tableau::build(program, bounds);

        if tableau.has_artificial() && !self.phase1(&mut tableau) {
            return LpOutcome::Infeasible;
        }

        match self.phase2(&mut tableau) {
            PivotResult::Optimal => {}
            PivotResult::Unbounded => return LpOutcome::Unbounded,
        }

        let values = tableau.structural_values();
        let objective = program.objective_value(&values);
        LpOutcome::Optimal(LpSolution::new(values, objective))
    }

    /// Solves the relaxation under the program's own bounds.
    #[inline]
    pub fn solve_with_default_bounds(&self, program: &LinearProgram) -> LpOutcome {
        self.solve(program, program.bounds())
    }

    /// Lowest-index entering column among the first `limit` columns whose
    /// reduced cost still improves the (maximized) objective row.
    fn entering_column(&self, tableau: &Tableau, limit: usize) -> Option<usize> {
        let objective_row = tableau.num_rows();
        (0..limit).find(|&column| tableau.rows[objective_row][column] > self.epsilon)
    }

    /// Minimum-ratio leaving row; ties go to the lowest basic column index.
    fn leaving_row(&self, tableau: &Tableau, column: usize) -> Option<usize> {
        let rhs_col = tableau.rhs_col();
        let mut best: Option<(usize, f64)> = None;

        for row in 0..tableau.num_rows() {
            let coefficient = tableau.rows[row][column];
            if coefficient <= self.epsilon {
                continue;
            }
            let ratio = tableau.rows[row][rhs_col] / coefficient;
            best = match best {
                None => Some((row, ratio)),
                Some((best_row, best_ratio)) => {
                    let strictly_better = ratio < best_ratio - self.epsilon;
                    let tie_on_lower_basic = approx_eq(ratio, best_ratio, self.epsilon)
                        && tableau.basis[row] < tableau.basis[best_row];
                    if strictly_better || tie_on_lower_basic {
                        Some((row, ratio))
                    } else {
                        Some((best_row, best_ratio))
                    }
                }
            };
        }

        best.map(|(row, _)| row)
    }

    /// Drives the artificial columns to zero. Returns `false` if a positive
    /// artificial value remains, proving the constraint set empty.
    fn phase1(&self, tableau: &mut Tableau) -> bool {
        let objective_row = tableau.num_rows();
        let artificial_start = tableau.artificial_start();
        let rhs_col = tableau.rhs_col();

        let saved_objective = tableau.rows[objective_row].clone();

        // Phase-1 objective: maximize -(sum of artificials).
        for value in tableau.rows[objective_row].iter_mut() {
            *value = 0.0;
        }
        for column in artificial_start..rhs_col {
            tableau.rows[objective_row][column] = -1.0;
        }
        // Price out the artificial columns that start basic.
        for row in 0..tableau.num_rows() {
            if tableau.basis[row] >= artificial_start {
                let constraint_row = tableau.rows[row].clone();
                for (objective, value) in tableau.rows[objective_row]
                    .iter_mut()
                    .zip(constraint_row.iter())
                {
                    *objective += value;
                }
            }
        }

        for _ in 0..self.max_iterations {
            let Some(column) = self.entering_column(tableau, artificial_start) else {
                break;
            };
            let Some(row) = self.leaving_row(tableau, column) else {
                // The phase-1 objective is bounded; a failed ratio test here
                // is numerical breakdown, reported as infeasible.
                return false;
            };
            tableau.pivot(row, column);
        }

        for row in 0..tableau.num_rows() {
            if tableau.basis[row] >= artificial_start
                && tableau.rows[row][rhs_col] > self.epsilon
            {
                return false;
            }
        }

        // Pivot degenerate artificials out of the basis where a structural
        // or slack column is available; rows without one are redundant and
        // stay pinned at zero.
        for row in 0..tableau.num_rows() {
            if tableau.basis[row] >= artificial_start {
                let replacement = (0..artificial_start)
                    .find(|&column| tableau.rows[row][column].abs() > self.epsilon);
                if let Some(column) = replacement {
                    tableau.pivot(row, column);
                }
            }
        }

        // Restore the real objective and price out the current basis.
        tableau.rows[objective_row] = saved_objective;
        for row in 0..tableau.num_rows() {
            let basic = tableau.basis[row];
            let factor = tableau.rows[objective_row][basic];
            if factor.abs() > self.epsilon {
                let constraint_row = tableau.rows[row].clone();
                for (objective, value) in tableau.rows[objective_row]
                    .iter_mut()
                    .zip(constraint_row.iter())
                {
                    *objective -= factor * value;
                }
            }
        }

        true
    }

    /// Optimizes the real objective with artificial columns barred.
    fn phase2(&self, tableau: &mut Tableau) -> PivotResult {
        let limit = tableau.artificial_start();

        for _ in 0..self.max_iterations {
            let Some(column) = self.entering_column(tableau, limit) else {
                return PivotResult::Optimal;
            };
            let Some(row) = self.leaving_row(tableau, column) else {
                return PivotResult::Unbounded;
            };
            tableau.pivot(row, column);
        }

        PivotResult::Optimal
    }
}
