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

//! Hemicycle-BnB: branch-and-bound over LP relaxations.
//!
//! A deterministic, single-threaded engine that enforces the integrality
//! flags of a `LinearProgram` by depth-first search. Every node solves the
//! continuous relaxation under node-local bound tightenings; subtrees are
//! pruned when the relaxation is infeasible or cannot beat the incumbent.
//!
//! Core flow
//! - Provide a `hemicycle_model::program::LinearProgram`.
//! - Choose a `branching::BranchingRule` (which fractional column splits).
//! - Optionally attach monitors (time limit, node limit, progress log).
//! - Run `bnb::BnbSolver::solve` and inspect the `SolveOutcome`.
//!
//! Design highlights
//! - Separation of concerns: the rule picks columns, monitors observe and
//!   stop the search, outcomes carry statistics alongside results.
//! - Nodes own their integer bounds outright, so popping a node restores
//!   the complete subproblem without replaying a trail.
//! - Deterministic given the fixed rule and the simplex pivoting order.
//!
//! Module map
//! - `bnb`: the engine and its per-run search session.
//! - `branching`: column-selection rules.
//! - `frontier`: the LIFO stack of open nodes.
//! - `monitor`: search monitors (composite, log, limits, no-op).
//! - `node`: search nodes and their integer bound sets.
//! - `result`: outcomes, termination reasons, the internal error.
//! - `stats`: lightweight counters and timing.

pub mod bnb;
pub mod branching;
pub mod frontier;
pub mod monitor;
pub mod node;
pub mod result;
pub mod stats;
