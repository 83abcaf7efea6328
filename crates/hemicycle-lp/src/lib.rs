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

//! Hemicycle-LP: the continuous relaxation solver.
//!
//! A dense two-phase simplex over the `LinearProgram` representation from
//! `hemicycle_model`. Integrality flags are ignored here; branch-and-bound
//! enforces them one level up by calling this solver with progressively
//! tighter variable bounds.
//!
//! Design choices
//! - Bland's rule for both the entering and the leaving variable. Slower
//!   per iteration than steepest-descent style rules, but it cannot cycle
//!   on degenerate vertices and it makes every run bit-for-bit
//!   reproducible, which the apportionment contract requires.
//! - Box bounds are folded into standard form: columns are shifted by
//!   their lower bound, finite upper bounds become explicit rows.
//! - Pure functions end to end: `SimplexSolver::solve` owns no state
//!   between calls.

pub mod outcome;
pub mod simplex;
mod tableau;

pub use outcome::{LpOutcome, LpSolution};
pub use simplex::SimplexSolver;
