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

use std::time::Duration;

/// Statistics collected during one branch-and-bound run.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverStatistics {
    /// Total nodes popped off the frontier.
    pub nodes_explored: u64,
    /// Total LP relaxations solved.
    pub relaxations_solved: u64,
    /// Nodes pruned because their relaxation (or bound set) was infeasible.
    pub prunings_infeasible: u64,
    /// Nodes pruned because their relaxation could not beat the incumbent.
    pub prunings_bound: u64,
    /// Nodes split into two children.
    pub branchings: u64,
    /// Integer-feasible solutions found (incumbent improvements).
    pub solutions_found: u64,
    /// The deepest level reached in the tree.
    pub max_depth: u64,
    /// Total wall time spent in the solver.
    pub time_total: Duration,
    /// The relaxation objective at the root node, if the root was solved.
    /// The gap between this and the final objective measures how much the
    /// integrality requirement costs.
    pub root_lower_bound: Option<f64>,
}

impl Default for SolverStatistics {
    fn default() -> Self {
        Self {
            nodes_explored: 0,
            relaxations_solved: 0,
            prunings_infeasible: 0,
            prunings_bound: 0,
            branchings: 0,
            solutions_found: 0,
            max_depth: 0,
            time_total: Duration::ZERO,
            root_lower_bound: None,
        }
    }
}

impl SolverStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_relaxation_solved(&mut self) {
        self.relaxations_solved = self.relaxations_solved.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_infeasible(&mut self) {
        self.prunings_infeasible = self.prunings_infeasible.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_branching(&mut self) {
        self.branchings = self.branchings.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn set_root_lower_bound(&mut self, bound: f64) {
        self.root_lower_bound = Some(bound);
    }
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Branch-and-Bound Statistics:")?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Relaxations solved:   {}", self.relaxations_solved)?;
        writeln!(f, "  Prunings (infeasible):{}", self.prunings_infeasible)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Branchings:           {}", self.branchings)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        match self.root_lower_bound {
            Some(bound) => writeln!(f, "  Root lower bound:     {:.6}", bound)?,
            None => writeln!(f, "  Root lower bound:     n/a")?,
        }
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_zero() {
        let stats = SolverStatistics::default();
        assert_eq!(stats.nodes_explored, 0);
        assert_eq!(stats.relaxations_solved, 0);
        assert_eq!(stats.max_depth, 0);
        assert_eq!(stats.root_lower_bound, None);
        assert_eq!(stats.time_total, Duration::ZERO);
    }

    #[test]
    fn test_counters_increment() {
        let mut stats = SolverStatistics::default();
        stats.on_node_explored();
        stats.on_node_explored();
        stats.on_relaxation_solved();
        stats.on_pruning_infeasible();
        stats.on_pruning_bound();
        stats.on_branching();
        stats.on_solution_found();

        assert_eq!(stats.nodes_explored, 2);
        assert_eq!(stats.relaxations_solved, 1);
        assert_eq!(stats.prunings_infeasible, 1);
        assert_eq!(stats.prunings_bound, 1);
        assert_eq!(stats.branchings, 1);
        assert_eq!(stats.solutions_found, 1);
    }

    #[test]
    fn test_depth_update_keeps_the_maximum() {
        let mut stats = SolverStatistics::default();
        stats.on_depth_update(3);
        stats.on_depth_update(1);
        assert_eq!(stats.max_depth, 3);
    }

    #[test]
    fn test_display_includes_root_bound_when_present() {
        let mut stats = SolverStatistics::default();
        assert!(format!("{}", stats).contains("n/a"));
        stats.set_root_lower_bound(1.25);
        assert!(format!("{}", stats).contains("1.250000"));
    }
}
