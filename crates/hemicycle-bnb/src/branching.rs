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

//! Branching rules: which fractional column splits a node.
//!
//! A rule sees the integral columns and the relaxation optimum and returns
//! the position to branch on, or `None` when every integral column already
//! sits on an integer. Rules must be deterministic; the engine's
//! reproducibility guarantee depends on it.

use hemicycle_core::num::approx::fractionality;

/// Strategy interface for selecting the branching column.
pub trait BranchingRule {
    /// Returns the name of the rule.
    fn name(&self) -> &str;

    /// Picks the position (an index into `columns`) to branch on.
    ///
    /// `columns` lists the integral columns of the program in ascending
    /// order; `values` is the full relaxation optimum. Returns `None` if
    /// all listed columns are within `epsilon` of integers.
    fn select(&self, columns: &[usize], values: &[f64], epsilon: f64) -> Option<usize>;
}

/// Branches on the column whose value is furthest from any integer, ties
/// broken by the lowest position. The default rule.
///
/// Splitting the most undecided column tends to move both children's
/// relaxations the furthest from the parent, which tightens bounds early.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MostFractional;

impl BranchingRule for MostFractional {
    fn name(&self) -> &str {
        "MostFractional"
    }

    fn select(&self, columns: &[usize], values: &[f64], epsilon: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (position, &column) in columns.iter().enumerate() {
            let distance = fractionality(values[column]);
            if distance <= epsilon {
                continue;
            }
            // Strict comparison keeps the lowest position on ties.
            if best.is_none_or(|(_, best_distance)| distance > best_distance) {
                best = Some((position, distance));
            }
        }
        best.map(|(position, _)| position)
    }
}

/// Branches on the first fractional column in ascending order.
///
/// Cheaper per node than `MostFractional` and occasionally useful when the
/// column order itself encodes priority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LowestIndexFirst;

impl BranchingRule for LowestIndexFirst {
    fn name(&self) -> &str {
        "LowestIndexFirst"
    }

    fn select(&self, columns: &[usize], values: &[f64], epsilon: f64) -> Option<usize> {
        columns
            .iter()
            .position(|&column| fractionality(values[column]) > epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_most_fractional_picks_the_furthest_from_integer() {
        let columns = [0, 1, 2];
        let values = [1.1, 2.5, 3.8];
        // 2.5 is half a seat away from any integer, the others are closer.
        assert_eq!(MostFractional.select(&columns, &values, EPS), Some(1));
    }

    #[test]
    fn test_most_fractional_breaks_ties_by_lowest_position() {
        let columns = [0, 1];
        let values = [1.5, 2.5];
        assert_eq!(MostFractional.select(&columns, &values, EPS), Some(0));
    }

    #[test]
    fn test_most_fractional_ignores_integral_noise() {
        let columns = [0, 1];
        let values = [2.999_999_999_9, 4.000_000_000_1];
        assert_eq!(MostFractional.select(&columns, &values, EPS), None);
    }

    #[test]
    fn test_most_fractional_only_looks_at_listed_columns() {
        // Column 1 is fractional but not integral, so it is not listed.
        let columns = [0, 2];
        let values = [1.0, 7.5, 2.0];
        assert_eq!(MostFractional.select(&columns, &values, EPS), None);
    }

    #[test]
    fn test_lowest_index_first_picks_the_first_fractional() {
        let columns = [0, 1, 2];
        let values = [4.0, 1.2, 2.5];
        assert_eq!(LowestIndexFirst.select(&columns, &values, EPS), Some(1));
    }

    #[test]
    fn test_rules_report_their_names() {
        assert_eq!(MostFractional.name(), "MostFractional");
        assert_eq!(LowestIndexFirst.name(), "LowestIndexFirst");
    }
}
