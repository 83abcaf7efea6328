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

//! Standard-form tableau construction.
//!
//! Converts a `LinearProgram` plus an effective bounds slice into the dense
//! simplex tableau:
//!
//! 1. Every column is shifted by its lower bound, so all working variables
//!    are non-negative. Finite upper bounds become explicit `<=` rows over
//!    the shifted variable.
//! 2. Rows with a negative right-hand side are negated (relation flipped)
//!    so all right-hand sides are non-negative.
//! 3. `<=` rows receive a slack column (initially basic). `>=` rows receive
//!    a surplus column plus an artificial column; `=` rows an artificial
//!    column. Artificial columns form the phase-1 starting basis.
//!
//! Column order is structural, then slack/surplus, then artificial, then
//! the right-hand side. The objective lives in the last row, stored negated
//! so the pivoting loop always maximizes.

use hemicycle_model::program::{LinearProgram, Relation, VariableBounds};

pub(crate) struct Tableau {
    /// Dense matrix, `num_rows() + 1` rows; the last row is the objective.
    pub(crate) rows: Vec<Vec<f64>>,
    /// The column currently basic in each constraint row.
    pub(crate) basis: Vec<usize>,
    pub(crate) num_structural: usize,
    pub(crate) num_slack: usize,
    pub(crate) num_artificial: usize,
    /// Lower bounds the structural columns were shifted by.
    pub(crate) shifts: Vec<f64>,
}

impl Tableau {
    /// Builds the tableau for `program` under the given effective bounds.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `bounds` does not cover every column of
    /// the program.
    pub(crate) fn build(program: &LinearProgram, bounds: &[VariableBounds]) -> Self {
        debug_assert!(
            bounds.len() == program.num_variables(),
            "called `Tableau::build` with mismatched bounds length: the program has {} columns but the bounds slice has {}",
            program.num_variables(),
            bounds.len()
        );

        let num_structural = program.num_variables();
        let shifts: Vec<f64> = bounds.iter().map(|b| b.lower).collect();

        // Normalized rows over shifted variables, right-hand sides still
        // signed at this point.
        let mut normalized: Vec<(Vec<f64>, Relation, f64)> =
            Vec::with_capacity(program.num_constraints());
        for constraint in program.constraints() {
            let coefficients = constraint.coefficients().to_vec();
            let shift_correction: f64 = coefficients
                .iter()
                .zip(&shifts)
                .map(|(a, l)| a * l)
                .sum();
            normalized.push((
                coefficients,
                constraint.relation(),
                constraint.rhs() - shift_correction,
            ));
        }
        for (column, bound) in bounds.iter().enumerate() {
            if bound.is_boxed() {
                let mut row = vec![0.0; num_structural];
                row[column] = 1.0;
                normalized.push((row, Relation::LessEqual, bound.upper - bound.lower));
            }
        }

        // Make all right-hand sides non-negative.
        for (coefficients, relation, rhs) in &mut normalized {
            if *rhs < 0.0 {
                for coefficient in coefficients.iter_mut() {
                    *coefficient = -*coefficient;
                }
                *rhs = -*rhs;
                *relation = match *relation {
                    Relation::LessEqual => Relation::GreaterEqual,
                    Relation::GreaterEqual => Relation::LessEqual,
                    Relation::Equal => Relation::Equal,
                };
            }
        }

        let num_slack = normalized
            .iter()
            .filter(|(_, relation, _)| !matches!(relation, Relation::Equal))
            .count();
        let num_artificial = normalized
            .iter()
            .filter(|(_, relation, _)| !matches!(relation, Relation::LessEqual))
            .count();

        let num_rows = normalized.len();
        let total_cols = num_structural + num_slack + num_artificial + 1;
        let rhs_col = total_cols - 1;

        let mut rows = vec![vec![0.0; total_cols]; num_rows + 1];
        let mut basis = vec![0; num_rows];

        let mut slack_col = num_structural;
        let mut artificial_col = num_structural + num_slack;
        for (i, (coefficients, relation, rhs)) in normalized.iter().enumerate() {
            rows[i][..num_structural].copy_from_slice(coefficients);
            rows[i][rhs_col] = *rhs;

            match relation {
                Relation::LessEqual => {
                    rows[i][slack_col] = 1.0;
                    basis[i] = slack_col;
                    slack_col += 1;
                }
                Relation::GreaterEqual => {
                    rows[i][slack_col] = -1.0;
                    slack_col += 1;
                    rows[i][artificial_col] = 1.0;
                    basis[i] = artificial_col;
                    artificial_col += 1;
                }
                Relation::Equal => {
                    rows[i][artificial_col] = 1.0;
                    basis[i] = artificial_col;
                    artificial_col += 1;
                }
            }
        }

        // Objective row, negated: pivoting maximizes, the program minimizes.
        for (column, &coefficient) in program.objective().iter().enumerate() {
            rows[num_rows][column] = -coefficient;
        }

        Self {
            rows,
            basis,
            num_structural,
            num_slack,
            num_artificial,
            shifts,
        }
    }

    /// Returns the number of constraint rows (excluding the objective row).
    #[inline]
    pub(crate) fn num_rows(&self) -> usize {
        self.basis.len()
    }

    /// Returns the index of the right-hand-side column.
    #[inline]
    pub(crate) fn rhs_col(&self) -> usize {
        self.num_structural + self.num_slack + self.num_artificial
    }

    /// Returns the first artificial column index.
    #[inline]
    pub(crate) fn artificial_start(&self) -> usize {
        self.num_structural + self.num_slack
    }

    /// Returns `true` if phase 1 is required.
    #[inline]
    pub(crate) fn has_artificial(&self) -> bool {
        self.num_artificial > 0
    }

    /// Performs one pivot: `pivot_col` enters the basis in `pivot_row`.
    pub(crate) fn pivot(&mut self, pivot_row: usize, pivot_col: usize) {
        self.basis[pivot_row] = pivot_col;

        let pivot_value = self.rows[pivot_row][pivot_col];
        debug_assert!(
            pivot_value.abs() > 0.0,
            "called `Tableau::pivot` on a zero pivot element at row {} col {}",
            pivot_row,
            pivot_col
        );
        for value in self.rows[pivot_row].iter_mut() {
            *value /= pivot_value;
        }

        for i in 0..self.rows.len() {
            if i == pivot_row {
                continue;
            }
            let factor = self.rows[i][pivot_col];
            if factor == 0.0 {
                continue;
            }
            // Row operation: rows[i] -= factor * rows[pivot_row].
            let (pivot_slice, target) = if i < pivot_row {
                let (head, tail) = self.rows.split_at_mut(pivot_row);
                (&tail[0], &mut head[i])
            } else {
                let (head, tail) = self.rows.split_at_mut(i);
                (&head[pivot_row], &mut tail[0])
            };
            for (t, p) in target.iter_mut().zip(pivot_slice.iter()) {
                *t -= factor * p;
            }
        }
    }

    /// Reads the structural assignment off the basis, shifted back to
    /// original coordinates.
    pub(crate) fn structural_values(&self) -> Vec<f64> {
        let rhs_col = self.rhs_col();
        let mut values = self.shifts.clone();
        for (row, &basic) in self.basis.iter().enumerate() {
            if basic < self.num_structural {
                values[basic] = self.shifts[basic] + self.rows[row][rhs_col];
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hemicycle_model::program::LinearConstraint;

    #[test]
    fn test_build_counts_slack_and_artificial_columns() {
        // x + y <= 4, x + y >= 1, x - y = 0, defaults to non-negative vars.
        let mut program = LinearProgram::new(2);
        program.set_objective_coefficient(0, 1.0);
        program.push_constraint(LinearConstraint::new(
            vec![1.0, 1.0],
            Relation::LessEqual,
            4.0,
        ));
        program.push_constraint(LinearConstraint::new(
            vec![1.0, 1.0],
            Relation::GreaterEqual,
            1.0,
        ));
        program.push_constraint(LinearConstraint::new(vec![1.0, -1.0], Relation::Equal, 0.0));

        let tableau = Tableau::build(&program, program.bounds());
        assert_eq!(tableau.num_rows(), 3);
        assert_eq!(tableau.num_slack, 2);
        assert_eq!(tableau.num_artificial, 2);
        assert!(tableau.has_artificial());

        // The <= row starts basic on its slack; the others on artificials.
        assert_eq!(tableau.basis[0], 2);
        assert_eq!(tableau.basis[1], 4);
        assert_eq!(tableau.basis[2], 5);
    }

    #[test]
    fn test_finite_upper_bounds_become_rows() {
        let mut program = LinearProgram::new(2);
        program.set_bounds(0, VariableBounds::new(0.0, 3.0));

        let tableau = Tableau::build(&program, program.bounds());
        // One bound row for column 0, none for the unbounded column 1.
        assert_eq!(tableau.num_rows(), 1);
        assert_eq!(tableau.rows[0][0], 1.0);
        assert_eq!(tableau.rows[0][tableau.rhs_col()], 3.0);
    }

    #[test]
    fn test_lower_bound_shift_corrects_rhs() {
        // x >= 2 folded into the bounds; row x <= 5 becomes y <= 3.
        let mut program = LinearProgram::new(1);
        program.set_bounds(0, VariableBounds::new(2.0, 5.0));

        let tableau = Tableau::build(&program, program.bounds());
        assert_eq!(tableau.shifts, vec![2.0]);
        assert_eq!(tableau.rows[0][tableau.rhs_col()], 3.0);
    }

    #[test]
    fn test_negative_rhs_rows_are_flipped() {
        // -x <= -2 over the shifted variable is x >= 2: surplus + artificial.
        let mut program = LinearProgram::new(1);
        program.push_constraint(LinearConstraint::new(
            vec![-1.0],
            Relation::LessEqual,
            -2.0,
        ));

        let tableau = Tableau::build(&program, program.bounds());
        assert_eq!(tableau.num_slack, 1);
        assert_eq!(tableau.num_artificial, 1);
        assert_eq!(tableau.rows[0][0], 1.0);
        assert_eq!(tableau.rows[0][tableau.rhs_col()], 2.0);
    }

    #[test]
    fn test_objective_row_is_negated() {
        let mut program = LinearProgram::new(2);
        program.set_objective_coefficient(0, 2.0);
        program.set_objective_coefficient(1, -3.0);

        let tableau = Tableau::build(&program, program.bounds());
        let objective_row = tableau.rows.last().unwrap();
        assert_eq!(objective_row[0], -2.0);
        assert_eq!(objective_row[1], 3.0);
    }

    #[test]
    fn test_structural_values_default_to_shifts() {
        let mut program = LinearProgram::new(2);
        program.set_bounds(0, VariableBounds::new(1.5, 4.0));

        let tableau = Tableau::build(&program, program.bounds());
        // Nothing structural is basic yet; values sit at the lower bounds.
        let values = tableau.structural_values();
        assert_eq!(values[0], 1.5);
        assert_eq!(values[1], 0.0);
    }
}
