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

use crate::error::InvalidInputError;

/// The three objective weights trading proportionality levels against each
/// other.
///
/// The minimized objective is
/// `national * sum(lambda) + regional * sum(mu) + turnout * sum(zeta)`,
/// where the auxiliary variables capture absolute deviations from national
/// party proportionality, per-region party proportionality, and per-region
/// turnout proportionality respectively. All weights are finite and
/// non-negative; the default weighs all three levels equally.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviationWeights {
    national: f64,
    regional: f64,
    turnout: f64,
}

impl DeviationWeights {
    /// Creates a validated weight set.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInputError::InvalidWeight` if any weight is negative,
    /// NaN, or infinite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hemicycle_model::weights::DeviationWeights;
    ///
    /// let weights = DeviationWeights::new(1.0, 2.0, 0.5).unwrap();
    /// assert_eq!(weights.regional(), 2.0);
    /// assert!(DeviationWeights::new(1.0, -1.0, 1.0).is_err());
    /// ```
    pub fn new(national: f64, regional: f64, turnout: f64) -> Result<Self, InvalidInputError> {
        for (name, value) in [
            ("national", national),
            ("regional", regional),
            ("turnout", turnout),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidInputError::InvalidWeight { name, value });
            }
        }

        Ok(Self {
            national,
            regional,
            turnout,
        })
    }

    /// Weight on the national per-party deviation terms.
    #[inline]
    pub fn national(&self) -> f64 {
        self.national
    }

    /// Weight on the per-region per-party deviation terms.
    #[inline]
    pub fn regional(&self) -> f64 {
        self.regional
    }

    /// Weight on the per-region turnout deviation terms.
    #[inline]
    pub fn turnout(&self) -> f64 {
        self.turnout
    }
}

impl Default for DeviationWeights {
    fn default() -> Self {
        Self {
            national: 1.0,
            regional: 1.0,
            turnout: 1.0,
        }
    }
}

impl std::fmt::Display for DeviationWeights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DeviationWeights(national: {}, regional: {}, turnout: {})",
            self.national, self.regional, self.turnout
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weighs_all_levels_equally() {
        let weights = DeviationWeights::default();
        assert_eq!(weights.national(), 1.0);
        assert_eq!(weights.regional(), 1.0);
        assert_eq!(weights.turnout(), 1.0);
    }

    #[test]
    fn test_new_accepts_zero_weights() {
        let weights = DeviationWeights::new(0.0, 0.0, 0.0).unwrap();
        assert_eq!(weights.national(), 0.0);
    }

    #[test]
    fn test_new_rejects_negative_and_non_finite_weights() {
        assert!(DeviationWeights::new(-0.1, 1.0, 1.0).is_err());
        assert!(DeviationWeights::new(1.0, f64::NAN, 1.0).is_err());
        assert!(DeviationWeights::new(1.0, 1.0, f64::INFINITY).is_err());
    }
}
