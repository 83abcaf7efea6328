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

use crate::monitor::search_monitor::SearchMonitor;
use crate::result::MilpSolution;
use crate::stats::SolverStatistics;
use hemicycle_model::program::LinearProgram;
use std::time::{Duration, Instant};

/// Periodic console progress reporting.
///
/// Prints a table header on search entry and one line per logging interval
/// afterwards, plus a line whenever a new incumbent is installed. The
/// clock is only read every `2^k` steps via a bitmask filter, so the hot
/// path stays cheap between log lines.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    steps: u64,
    best_objective: Option<f64>,
}

impl LogMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            steps: 0,
            best_objective: None,
        }
    }

    #[inline(always)]
    fn print_header(&self) {
        println!(
            "{:<9} | {:<12} | {:<14} | {:<12} | {:<14}",
            "Elapsed", "Nodes", "Incumbent", "Branchings", "Pruned (Bound)"
        );
        println!("{}", "-".repeat(72));
    }

    #[inline(always)]
    fn log_line(&mut self, statistics: &SolverStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();

        let best_objective = match self.best_objective {
            Some(objective) => format!("{:.4}", objective),
            None => "Inf".to_string(),
        };

        println!(
            "{:<9} | {:<12} | {:<14} | {:<12} | {:<14}",
            format!("{:.1}s", elapsed),
            statistics.nodes_explored,
            best_objective,
            statistics.branchings,
            statistics.prunings_bound
        );

        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 0xFF)
    }
}

impl SearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, _program: &LinearProgram, _statistics: &SolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.steps = 0;
        self.best_objective = None;
        self.print_header();
    }

    fn on_exit_search(&mut self, statistics: &SolverStatistics) {
        self.log_line(statistics);
    }

    fn on_step(&mut self) {
        self.steps = self.steps.wrapping_add(1);
    }

    fn on_relaxation_solved(
        &mut self,
        _depth: usize,
        _objective: f64,
        statistics: &SolverStatistics,
    ) {
        if (self.steps & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(statistics);
        }
    }

    fn on_solution_found(&mut self, solution: &MilpSolution, statistics: &SolverStatistics) {
        self.best_objective = Some(solution.objective());
        self.log_line(statistics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_updates_cached_objective() {
        let mut monitor = LogMonitor::default();
        assert_eq!(monitor.best_objective, None);

        let solution = MilpSolution::new(vec![1.0], 2.5);
        monitor.on_solution_found(&solution, &SolverStatistics::default());
        assert_eq!(monitor.best_objective, Some(2.5));
    }

    #[test]
    fn test_enter_search_resets_state() {
        let mut monitor = LogMonitor::default();
        monitor.steps = 10;
        monitor.best_objective = Some(1.0);

        let program = LinearProgram::new(1);
        monitor.on_enter_search(&program, &SolverStatistics::default());
        assert_eq!(monitor.steps, 0);
        assert_eq!(monitor.best_objective, None);
    }
}
