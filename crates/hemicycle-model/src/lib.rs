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

//! Hemicycle-Model: election data and MILP formulation.
//!
//! This crate owns everything that describes *what* is being solved:
//!
//! - `instance`: the validated, immutable election input (vote matrix,
//!   seat count, regional minimums, registered voters).
//! - `weights`: the three objective weights trading national, regional,
//!   and turnout proportionality against each other.
//! - `program`: the abstract minimization problem (dense constraint rows,
//!   variable bounds, integrality mask) the solver crates consume.
//! - `layout`: the fixed mapping between (region, party) pairs and
//!   linear-program columns.
//! - `builder`: assembles the program from an instance, linearizing the
//!   absolute deviation terms into two-sided constraints on auxiliary
//!   variables.
//! - `solution`: the R x P integer seat matrix returned to callers.
//!
//! The crates further up the stack never look at votes or seats again;
//! they operate purely on the `LinearProgram` produced here.

pub mod builder;
pub mod error;
pub mod index;
pub mod instance;
pub mod layout;
pub mod program;
pub mod solution;
pub mod weights;
