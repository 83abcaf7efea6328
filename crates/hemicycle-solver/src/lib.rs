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

//! Hemicycle: proportional seat apportionment with a built-in MILP stack.
//!
//! The facade crate. Give it a validated `ElectionInstance`, get back an
//! integer seat matrix that minimizes the weighted sum of three absolute
//! deviation families: per-party national proportionality, per-region
//! per-party proportionality, and per-region turnout proportionality.
//!
//! ```rust
//! use hemicycle_model::instance::ElectionInstance;
//! use hemicycle_solver::ApportionmentSolver;
//!
//! let instance = ElectionInstance::from_rows(
//!     &[vec![80, 20], vec![30, 70]],
//!     &[100, 100],
//!     10,
//!     0,
//! )
//! .unwrap();
//!
//! let outcome = ApportionmentSolver::new().solve(&instance).unwrap();
//! let allocation = outcome.result().allocation().unwrap();
//! assert_eq!(allocation.total(), 10);
//! ```
//!
//! The solving pipeline underneath is deterministic: identical instances
//! and configuration always yield the identical matrix.

pub mod solver;

pub use solver::{ApportionmentOutcome, ApportionmentResult, ApportionmentSolver};
