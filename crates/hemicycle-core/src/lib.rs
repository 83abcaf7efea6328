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

//! Hemicycle-Core: shared primitives for the hemicycle solver stack.
//!
//! This crate collects the small, dependency-light building blocks used by
//! every other crate in the workspace:
//!
//! - `num`: floating-point tolerance semantics. Linear programming over
//!   `f64` needs one consistent notion of "equal within epsilon" and
//!   "integral within epsilon"; centralizing it here keeps the simplex
//!   pivoting, the branch-and-bound integrality tests, and the final seat
//!   rounding in agreement.
//! - `utils`: zero-cost strongly typed indices so region and party index
//!   spaces cannot be mixed up at compile time.

pub mod num;
pub mod utils;
