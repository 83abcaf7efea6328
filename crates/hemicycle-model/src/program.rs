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

//! The abstract minimization problem consumed by the solver crates.
//!
//! A `LinearProgram` is a plain data description: a dense objective vector,
//! an ordered list of dense constraint rows, per-column box bounds, and an
//! integrality mask. It is built once by the model builder and never
//! mutated afterwards. Branch-and-bound never writes node-local bound
//! tightenings into the program; it passes an effective bounds slice
//! alongside the shared program instead.

use fixedbitset::FixedBitSet;

/// The relation of a constraint row to its right-hand side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    /// The row value must not exceed the right-hand side.
    LessEqual,
    /// The row value must reach at least the right-hand side.
    GreaterEqual,
    /// The row value must equal the right-hand side.
    Equal,
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::LessEqual => write!(f, "<="),
            Relation::GreaterEqual => write!(f, ">="),
            Relation::Equal => write!(f, "="),
        }
    }
}

/// A single dense constraint row.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearConstraint {
    coefficients: Vec<f64>,
    relation: Relation,
    rhs: f64,
}

impl LinearConstraint {
    /// Creates a new constraint row.
    #[inline]
    pub fn new(coefficients: Vec<f64>, relation: Relation, rhs: f64) -> Self {
        Self {
            coefficients,
            relation,
            rhs,
        }
    }

    /// Returns the dense coefficient vector of this row.
    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Returns the relation of this row.
    #[inline]
    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// Returns the right-hand side of this row.
    #[inline]
    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Evaluates the row's left-hand side at the given point.
    #[inline]
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        debug_assert!(
            values.len() == self.coefficients.len(),
            "called `LinearConstraint::evaluate` with mismatched point length: the row has {} columns but the point has {}",
            self.coefficients.len(),
            values.len()
        );

        self.coefficients
            .iter()
            .zip(values)
            .map(|(c, v)| c * v)
            .sum()
    }
}

/// Lower and upper bound of a single variable.
///
/// `upper` may be `f64::INFINITY` for an unbounded-above variable; `lower`
/// is always finite (every variable in this model is bounded below by zero
/// or a branching decision).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariableBounds {
    pub lower: f64,
    pub upper: f64,
}

impl VariableBounds {
    /// Creates an explicit bound pair.
    #[inline]
    pub fn new(lower: f64, upper: f64) -> Self {
        debug_assert!(
            lower <= upper,
            "called `VariableBounds::new` with crossed bounds: lower is {} but upper is {}",
            lower,
            upper
        );

        Self { lower, upper }
    }

    /// The non-negative half line `[0, +inf)`.
    #[inline]
    pub fn non_negative() -> Self {
        Self {
            lower: 0.0,
            upper: f64::INFINITY,
        }
    }

    /// Returns `true` if the upper bound is finite.
    #[inline]
    pub fn is_boxed(&self) -> bool {
        self.upper.is_finite()
    }
}

impl std::fmt::Display for VariableBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// A linear minimization problem with optional per-column integrality.
///
/// # Examples
///
/// ```rust
/// # use hemicycle_model::program::{LinearConstraint, LinearProgram, Relation, VariableBounds};
///
/// // minimize x + y subject to x + y >= 1, both non-negative, x integral.
/// let mut program = LinearProgram::new(2);
/// program.set_objective_coefficient(0, 1.0);
/// program.set_objective_coefficient(1, 1.0);
/// program.push_constraint(LinearConstraint::new(
///     vec![1.0, 1.0],
///     Relation::GreaterEqual,
///     1.0,
/// ));
/// program.mark_integral(0);
///
/// assert_eq!(program.num_variables(), 2);
/// assert_eq!(program.num_constraints(), 1);
/// assert!(program.is_integral(0));
/// assert!(!program.is_integral(1));
/// ```
#[derive(Clone, Debug)]
pub struct LinearProgram {
    objective: Vec<f64>,
    constraints: Vec<LinearConstraint>,
    bounds: Vec<VariableBounds>,
    integral: FixedBitSet,
}

impl LinearProgram {
    /// Creates an empty program over `num_variables` columns.
    ///
    /// All objective coefficients start at zero, all bounds at `[0, +inf)`,
    /// and no column is integral.
    pub fn new(num_variables: usize) -> Self {
        Self {
            objective: vec![0.0; num_variables],
            constraints: Vec::new(),
            bounds: vec![VariableBounds::non_negative(); num_variables],
            integral: FixedBitSet::with_capacity(num_variables),
        }
    }

    /// Returns the number of columns.
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    /// Returns the number of constraint rows.
    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Returns the minimization objective vector.
    #[inline]
    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    /// Returns the ordered constraint rows.
    #[inline]
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Returns the per-column bounds.
    #[inline]
    pub fn bounds(&self) -> &[VariableBounds] {
        &self.bounds
    }

    /// Returns `true` if the specified column must take an integer value.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `column` is not in `0..num_variables()`.
    #[inline]
    pub fn is_integral(&self, column: usize) -> bool {
        debug_assert!(
            column < self.num_variables(),
            "called `LinearProgram::is_integral` with column out of bounds: the len is {} but the index is {}",
            self.num_variables(),
            column
        );

        self.integral.contains(column)
    }

    /// Returns an iterator over the integral column indices in ascending
    /// order.
    #[inline]
    pub fn integral_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.integral.ones()
    }

    /// Sets the objective coefficient of one column.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `column` is not in `0..num_variables()`.
    #[inline]
    pub fn set_objective_coefficient(&mut self, column: usize, coefficient: f64) -> &mut Self {
        debug_assert!(
            column < self.num_variables(),
            "called `LinearProgram::set_objective_coefficient` with column out of bounds: the len is {} but the index is {}",
            self.num_variables(),
            column
        );

        self.objective[column] = coefficient;
        self
    }

    /// Sets the bounds of one column.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `column` is not in `0..num_variables()`.
    #[inline]
    pub fn set_bounds(&mut self, column: usize, bounds: VariableBounds) -> &mut Self {
        debug_assert!(
            column < self.num_variables(),
            "called `LinearProgram::set_bounds` with column out of bounds: the len is {} but the index is {}",
            self.num_variables(),
            column
        );

        self.bounds[column] = bounds;
        self
    }

    /// Marks one column as integral.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `column` is not in `0..num_variables()`.
    #[inline]
    pub fn mark_integral(&mut self, column: usize) -> &mut Self {
        debug_assert!(
            column < self.num_variables(),
            "called `LinearProgram::mark_integral` with column out of bounds: the len is {} but the index is {}",
            self.num_variables(),
            column
        );

        self.integral.insert(column);
        self
    }

    /// Appends a constraint row.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the row's coefficient vector does not have
    /// exactly `num_variables()` entries.
    #[inline]
    pub fn push_constraint(&mut self, constraint: LinearConstraint) -> &mut Self {
        debug_assert!(
            constraint.coefficients().len() == self.num_variables(),
            "called `LinearProgram::push_constraint` with mismatched row length: the program has {} columns but the row has {}",
            self.num_variables(),
            constraint.coefficients().len()
        );

        self.constraints.push(constraint);
        self
    }

    /// Evaluates the objective at the given point.
    #[inline]
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        debug_assert!(
            values.len() == self.num_variables(),
            "called `LinearProgram::objective_value` with mismatched point length: the program has {} columns but the point has {}",
            self.num_variables(),
            values.len()
        );

        self.objective.iter().zip(values).map(|(c, v)| c * v).sum()
    }
}

impl std::fmt::Display for LinearProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LinearProgram(num_variables: {}, num_constraints: {}, num_integral: {})",
            self.num_variables(),
            self.num_constraints(),
            self.integral.count_ones(..)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_program_starts_empty_and_non_negative() {
        let program = LinearProgram::new(3);
        assert_eq!(program.num_variables(), 3);
        assert_eq!(program.num_constraints(), 0);
        assert_eq!(program.objective(), &[0.0, 0.0, 0.0]);
        assert_eq!(program.bounds()[0], VariableBounds::non_negative());
        assert!(!program.is_integral(0));
        assert_eq!(program.integral_columns().count(), 0);
    }

    #[test]
    fn test_mark_integral_and_iterate() {
        let mut program = LinearProgram::new(4);
        program.mark_integral(1).mark_integral(3);
        let columns: Vec<usize> = program.integral_columns().collect();
        assert_eq!(columns, vec![1, 3]);
    }

    #[test]
    fn test_constraint_evaluate_and_objective_value() {
        let mut program = LinearProgram::new(2);
        program.set_objective_coefficient(0, 2.0);
        program.set_objective_coefficient(1, 3.0);
        program.push_constraint(LinearConstraint::new(
            vec![1.0, -1.0],
            Relation::LessEqual,
            4.0,
        ));

        let point = [5.0, 2.0];
        assert_eq!(program.constraints()[0].evaluate(&point), 3.0);
        assert_eq!(program.objective_value(&point), 16.0);
    }

    #[test]
    fn test_relation_display() {
        assert_eq!(Relation::LessEqual.to_string(), "<=");
        assert_eq!(Relation::GreaterEqual.to_string(), ">=");
        assert_eq!(Relation::Equal.to_string(), "=");
    }

    #[test]
    fn test_bounds_boxed_detection() {
        assert!(VariableBounds::new(0.0, 10.0).is_boxed());
        assert!(!VariableBounds::non_negative().is_boxed());
    }
}
