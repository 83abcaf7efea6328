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

//! # Tolerance-Based Floating-Point Comparisons
//!
//! One consistent epsilon discipline for the whole solver stack. Simplex
//! pivoting, branch-and-bound integrality checks, and the final seat
//! rounding all have to agree on what counts as "zero", otherwise a vertex
//! the LP declares optimal can be rejected as fractional one crate further
//! up. Every comparison in the workspace goes through these helpers.
//!
//! All functions are generic over `num_traits::Float`; the solver uses
//! `f64` throughout.

use num_traits::Float;

/// The default feasibility and optimality tolerance used across the solver.
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Returns `true` if `a` and `b` are equal within `epsilon`.
///
/// # Examples
///
/// ```rust
/// # use hemicycle_core::num::approx::approx_eq;
///
/// assert!(approx_eq(1.0, 1.0 + 1e-12, 1e-9));
/// assert!(!approx_eq(1.0, 1.1, 1e-9));
/// ```
#[inline(always)]
pub fn approx_eq<F>(a: F, b: F, epsilon: F) -> bool
where
    F: Float,
{
    (a - b).abs() <= epsilon
}

/// Returns `true` if `a <= b` within `epsilon`, i.e. `a` does not exceed
/// `b` by more than the tolerance.
///
/// # Examples
///
/// ```rust
/// # use hemicycle_core::num::approx::approx_le;
///
/// assert!(approx_le(1.0 + 1e-12, 1.0, 1e-9));
/// assert!(!approx_le(1.1, 1.0, 1e-9));
/// ```
#[inline(always)]
pub fn approx_le<F>(a: F, b: F, epsilon: F) -> bool
where
    F: Float,
{
    a <= b + epsilon
}

/// Returns `true` if `a >= b` within `epsilon`.
///
/// # Examples
///
/// ```rust
/// # use hemicycle_core::num::approx::approx_ge;
///
/// assert!(approx_ge(1.0 - 1e-12, 1.0, 1e-9));
/// assert!(!approx_ge(0.9, 1.0, 1e-9));
/// ```
#[inline(always)]
pub fn approx_ge<F>(a: F, b: F, epsilon: F) -> bool
where
    F: Float,
{
    a >= b - epsilon
}

/// Returns `true` if `value` lies within `epsilon` of an integer.
///
/// # Examples
///
/// ```rust
/// # use hemicycle_core::num::approx::is_integral;
///
/// assert!(is_integral(3.0, 1e-9));
/// assert!(is_integral(2.999_999_999_9, 1e-9));
/// assert!(!is_integral(2.5, 1e-9));
/// ```
#[inline(always)]
pub fn is_integral<F>(value: F, epsilon: F) -> bool
where
    F: Float,
{
    (value - value.round()).abs() <= epsilon
}

/// Returns the distance of `value` to its nearest integer.
///
/// The result lies in `[0, 0.5]`. Branching rules use this to rank
/// fractional variables; `0.5` is "as fractional as it gets".
///
/// # Examples
///
/// ```rust
/// # use hemicycle_core::num::approx::fractionality;
///
/// assert!((fractionality(2.5_f64) - 0.5).abs() < 1e-12);
/// assert!((fractionality(2.25_f64) - 0.25).abs() < 1e-12);
/// assert!(fractionality(3.0_f64) < 1e-12);
/// ```
#[inline(always)]
pub fn fractionality<F>(value: F) -> F
where
    F: Float,
{
    let frac = value - value.floor();
    frac.min(F::one() - frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq_within_and_outside_tolerance() {
        assert!(approx_eq(0.0, 0.0, DEFAULT_EPSILON));
        assert!(approx_eq(1.0, 1.0 + 1e-10, DEFAULT_EPSILON));
        assert!(approx_eq(-1.0, -1.0 - 1e-10, DEFAULT_EPSILON));
        assert!(!approx_eq(1.0, 1.0 + 1e-8, DEFAULT_EPSILON));
    }

    #[test]
    fn test_approx_le_and_ge_are_tolerant_at_the_boundary() {
        assert!(approx_le(1.0, 1.0, DEFAULT_EPSILON));
        assert!(approx_le(1.0 + 1e-10, 1.0, DEFAULT_EPSILON));
        assert!(!approx_le(1.0 + 1e-6, 1.0, DEFAULT_EPSILON));

        assert!(approx_ge(1.0, 1.0, DEFAULT_EPSILON));
        assert!(approx_ge(1.0 - 1e-10, 1.0, DEFAULT_EPSILON));
        assert!(!approx_ge(1.0 - 1e-6, 1.0, DEFAULT_EPSILON));
    }

    #[test]
    fn test_is_integral_accepts_noise_and_rejects_fractions() {
        assert!(is_integral(0.0, DEFAULT_EPSILON));
        assert!(is_integral(5.0 - 1e-10, DEFAULT_EPSILON));
        assert!(is_integral(-3.0 + 1e-10, DEFAULT_EPSILON));
        assert!(!is_integral(0.5, DEFAULT_EPSILON));
        assert!(!is_integral(4.2, DEFAULT_EPSILON));
    }

    #[test]
    fn test_fractionality_is_symmetric_around_half() {
        assert!((fractionality(2.3) - 0.3).abs() < 1e-12);
        assert!((fractionality(2.7) - 0.3).abs() < 1e-12);
        assert!((fractionality(-1.25) - 0.25).abs() < 1e-12);
        assert!(fractionality(7.0) < 1e-12);
    }
}
