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

use crate::monitor::search_monitor::{PruneReason, SearchCommand, SearchMonitor};
use crate::result::MilpSolution;
use crate::stats::SolverStatistics;
use hemicycle_model::program::LinearProgram;

/// Fans every callback out to a list of monitors.
///
/// `search_command` short-circuits: the first monitor requesting
/// termination wins, so insertion order decides which reason is reported
/// when several limits trip in the same step.
#[derive(Default)]
pub struct CompositeMonitor {
    monitors: Vec<Box<dyn SearchMonitor>>,
}

impl CompositeMonitor {
    /// Creates an empty composite.
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Adds a monitor, builder style.
    #[inline]
    pub fn with_monitor<M>(mut self, monitor: M) -> Self
    where
        M: SearchMonitor + 'static,
    {
        self.monitors.push(Box::new(monitor));
        self
    }

    /// Adds an already boxed monitor.
    #[inline]
    pub fn add_monitor(&mut self, monitor: Box<dyn SearchMonitor>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of attached monitors.
    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if no monitors are attached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl SearchMonitor for CompositeMonitor {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, program: &LinearProgram, statistics: &SolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(program, statistics);
        }
    }

    fn on_exit_search(&mut self, statistics: &SolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    fn on_step(&mut self) {
        for monitor in &mut self.monitors {
            monitor.on_step();
        }
    }

    fn on_relaxation_solved(
        &mut self,
        depth: usize,
        objective: f64,
        statistics: &SolverStatistics,
    ) {
        for monitor in &mut self.monitors {
            monitor.on_relaxation_solved(depth, objective, statistics);
        }
    }

    fn on_prune(&mut self, reason: PruneReason, statistics: &SolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_prune(reason, statistics);
        }
    }

    fn on_solution_found(&mut self, solution: &MilpSolution, statistics: &SolverStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(solution, statistics);
        }
    }

    fn search_command(&self) -> SearchCommand {
        for monitor in &self.monitors {
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOpMonitor;
    use crate::monitor::node_limit::NodeLimitMonitor;

    struct AlwaysStop(&'static str);

    impl SearchMonitor for AlwaysStop {
        fn name(&self) -> &str {
            "AlwaysStop"
        }

        fn search_command(&self) -> SearchCommand {
            SearchCommand::Terminate(self.0.to_string())
        }
    }

    #[test]
    fn test_empty_composite_continues() {
        let composite = CompositeMonitor::new();
        assert!(composite.is_empty());
        assert_eq!(composite.search_command(), SearchCommand::Continue);
    }

    #[test]
    fn test_first_terminating_monitor_wins() {
        let composite = CompositeMonitor::new()
            .with_monitor(NoOpMonitor::new())
            .with_monitor(AlwaysStop("first"))
            .with_monitor(AlwaysStop("second"));

        assert_eq!(composite.len(), 3);
        assert_eq!(
            composite.search_command(),
            SearchCommand::Terminate("first".to_string())
        );
    }

    #[test]
    fn test_steps_are_fanned_out() {
        let mut composite =
            CompositeMonitor::new().with_monitor(NodeLimitMonitor::new(1));
        composite.on_step();
        composite.on_step();
        assert!(matches!(
            composite.search_command(),
            SearchCommand::Terminate(_)
        ));
    }
}
