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

/// An optimal vertex of a linear program.
#[derive(Debug, Clone, PartialEq)]
pub struct LpSolution {
    values: Vec<f64>,
    objective: f64,
}

impl LpSolution {
    /// Constructs a new `LpSolution`.
    #[inline]
    pub fn new(values: Vec<f64>, objective: f64) -> Self {
        Self { values, objective }
    }

    /// Returns the variable assignment in original (unshifted) coordinates.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the objective value at this vertex.
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

impl std::fmt::Display for LpSolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LpSolution(objective: {}, num_variables: {})",
            self.objective,
            self.values.len()
        )
    }
}

/// Result of solving one continuous relaxation.
#[derive(Debug, Clone, PartialEq)]
pub enum LpOutcome {
    /// An optimal vertex was found.
    Optimal(LpSolution),
    /// The constraint set admits no point.
    Infeasible,
    /// The objective decreases without bound over the feasible set.
    Unbounded,
}

impl LpOutcome {
    /// Returns `true` if an optimal vertex was found.
    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self, LpOutcome::Optimal(_))
    }

    /// Returns `true` if the relaxation is infeasible.
    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self, LpOutcome::Infeasible)
    }

    /// Returns `true` if the relaxation is unbounded.
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        matches!(self, LpOutcome::Unbounded)
    }

    /// Returns the solution if one was found.
    #[inline]
    pub fn solution(&self) -> Option<&LpSolution> {
        match self {
            LpOutcome::Optimal(solution) => Some(solution),
            _ => None,
        }
    }
}

impl std::fmt::Display for LpOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LpOutcome::Optimal(solution) => write!(f, "Optimal(objective={})", solution.objective()),
            LpOutcome::Infeasible => write!(f, "Infeasible"),
            LpOutcome::Unbounded => write!(f, "Unbounded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_predicates_match_variants() {
        let optimal = LpOutcome::Optimal(LpSolution::new(vec![1.0], 1.0));
        assert!(optimal.is_optimal());
        assert!(optimal.solution().is_some());
        assert!(!optimal.is_infeasible());

        assert!(LpOutcome::Infeasible.is_infeasible());
        assert!(LpOutcome::Infeasible.solution().is_none());
        assert!(LpOutcome::Unbounded.is_unbounded());
    }

    #[test]
    fn test_solution_accessors() {
        let solution = LpSolution::new(vec![2.0, 0.5], 7.5);
        assert_eq!(solution.values(), &[2.0, 0.5]);
        assert_eq!(solution.objective(), 7.5);
        assert_eq!(solution.into_values(), vec![2.0, 0.5]);
    }
}
