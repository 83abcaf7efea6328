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

use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
use crate::stats::SolverStatistics;
use hemicycle_model::program::LinearProgram;

/// Stops the search after a fixed number of explored nodes.
///
/// Deterministic counterpart to the wall-clock budget: the same instance
/// with the same limit always stops at the same node, which makes
/// truncated runs reproducible in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeLimitMonitor {
    node_limit: u64,
    steps: u64,
}

impl NodeLimitMonitor {
    #[inline]
    pub fn new(node_limit: u64) -> Self {
        Self {
            node_limit,
            steps: 0,
        }
    }

    /// Returns the configured node budget.
    #[inline]
    pub fn node_limit(&self) -> u64 {
        self.node_limit
    }
}

impl SearchMonitor for NodeLimitMonitor {
    fn name(&self) -> &str {
        "NodeLimitMonitor"
    }

    fn on_enter_search(&mut self, _program: &LinearProgram, _statistics: &SolverStatistics) {
        self.steps = 0;
    }

    #[inline(always)]
    fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if self.steps > self.node_limit {
            return SearchCommand::Terminate("node limit reached".to_string());
        }
        SearchCommand::Continue
    }
}
