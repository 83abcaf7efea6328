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

use crate::{result::MilpSolution, stats::SolverStatistics};
use hemicycle_model::program::LinearProgram;

/// Instruction returned to the engine after each step.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Reasons for pruning a search node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The subtree is infeasible.
    Infeasible,
    /// The subtree is dominated by the incumbent's objective.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible => write!(f, "Infeasible"),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// Trait for monitoring and controlling the search process of the solver.
///
/// All callbacks default to no-ops so implementations only override what
/// they need. `search_command` is consulted once per node, before its
/// relaxation is solved.
pub trait SearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called when the search starts.
    fn on_enter_search(&mut self, _program: &LinearProgram, _statistics: &SolverStatistics) {}

    /// Called when the search ends.
    fn on_exit_search(&mut self, _statistics: &SolverStatistics) {}

    /// Called once per node popped off the frontier.
    fn on_step(&mut self) {}

    /// Called after a node's relaxation has been solved to optimality.
    fn on_relaxation_solved(
        &mut self,
        _depth: usize,
        _objective: f64,
        _statistics: &SolverStatistics,
    ) {
    }

    /// Called when a node is pruned.
    fn on_prune(&mut self, _reason: PruneReason, _statistics: &SolverStatistics) {}

    /// Called when a new incumbent is installed.
    fn on_solution_found(&mut self, _solution: &MilpSolution, _statistics: &SolverStatistics) {}

    /// Called to determine the next action of the search.
    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}

impl std::fmt::Debug for dyn SearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn SearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;

    impl SearchMonitor for Bare {
        fn name(&self) -> &str {
            "Bare"
        }
    }

    #[test]
    fn test_default_callbacks_continue() {
        let monitor = Bare;
        assert_eq!(monitor.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_command_and_prune_reason_display() {
        assert_eq!(SearchCommand::Continue.to_string(), "Continue");
        assert_eq!(
            SearchCommand::Terminate("budget".to_string()).to_string(),
            "Terminate: budget"
        );
        assert_eq!(PruneReason::Infeasible.to_string(), "Infeasible");
        assert_eq!(PruneReason::BoundDominated.to_string(), "BoundDominated");
    }
}
