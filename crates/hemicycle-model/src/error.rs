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

//! Input validation errors.
//!
//! Every way an election instance or a weight set can be malformed is
//! rejected eagerly, before any model assembly starts. Structural
//! infeasibility (e.g. regional minimums exceeding the seat total) is NOT
//! an input error; it is a well-formed problem without a solution and is
//! reported by the solving engine as an infeasible outcome.

use thiserror::Error;

/// Rejections produced while validating election input data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInputError {
    /// The instance declares no regions.
    #[error("an election instance requires at least one region")]
    NoRegions,

    /// The instance declares no parties.
    #[error("an election instance requires at least one party")]
    NoParties,

    /// A vote row does not match the declared number of parties.
    #[error("vote row for region {region} has {found} entries but {expected} parties were declared")]
    VoteRowMismatch {
        region: usize,
        expected: usize,
        found: usize,
    },

    /// The number of vote rows does not match the declared number of regions.
    #[error("vote matrix has {found} rows but {expected} regions were declared")]
    VoteMatrixMismatch { expected: usize, found: usize },

    /// The number of seats to distribute must be positive.
    #[error("the number of seats must be positive, got {0}")]
    NonPositiveSeats(i64),

    /// The per-region seat minimum must be non-negative.
    #[error("the minimum number of seats per region must be non-negative, got {0}")]
    NegativeRegionMinimum(i64),

    /// The vote matrix sums to zero; vote shares would divide by zero.
    #[error("the vote matrix contains no votes")]
    ZeroTotalVotes,

    /// Every region must report a positive registered-voter count.
    #[error("region {0} must have a positive number of registered voters")]
    NonPositiveRegistered(usize),

    /// Objective weights must be finite and non-negative.
    #[error("objective weight '{name}' must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offending_value() {
        let err = InvalidInputError::NonPositiveSeats(0);
        assert_eq!(err.to_string(), "the number of seats must be positive, got 0");

        let err = InvalidInputError::VoteRowMismatch {
            region: 2,
            expected: 3,
            found: 4,
        };
        assert!(err.to_string().contains("region 2"));
        assert!(err.to_string().contains("3 parties"));

        let err = InvalidInputError::InvalidWeight {
            name: "turnout",
            value: -1.0,
        };
        assert!(err.to_string().contains("turnout"));
    }
}
