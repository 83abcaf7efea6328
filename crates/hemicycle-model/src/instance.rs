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

use crate::{
    error::InvalidInputError,
    index::{PartyIndex, RegionIndex},
};

#[inline(always)]
fn flatten_index(num_parties: usize, region_index: RegionIndex, party_index: PartyIndex) -> usize {
    region_index.get() * num_parties + party_index.get()
}

/// The immutable input data describing one apportionment problem.
///
/// This struct holds all pre-validated, queryable data:
/// - `votes[region * num_parties + party]`: per-(region, party) vote count,
///   stored region-major.
/// - `registered[region]`: registered voters per region, each positive.
/// - `total_seats`: the number of seats to distribute, positive.
/// - `min_seats_per_region`: the per-region seat floor, non-negative.
///
/// Derived totals (`total_votes`, `total_registered`) are computed once at
/// construction so vote-share denominators are never recomputed and never
/// zero.
///
/// Construction:
/// - Use `ElectionInstanceBuilder` and call `ElectionInstanceBuilder::build`
///   to obtain a validated `ElectionInstance`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElectionInstance {
    num_parties: usize,
    votes: Vec<u64>,      // len = num_regions * num_parties
    registered: Vec<u64>, // len = num_regions
    total_seats: i64,
    min_seats_per_region: i64,
    total_votes: u64,
    total_registered: u64,
}

impl ElectionInstance {
    /// Returns the number of regions in the instance.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hemicycle_model::instance::ElectionInstanceBuilder;
    ///
    /// let instance = ElectionInstanceBuilder::new(3, 2)
    ///     .set_total_seats(10)
    ///     .set_uniform_votes(1)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(instance.num_regions(), 3);
    /// ```
    #[inline]
    pub fn num_regions(&self) -> usize {
        self.registered.len()
    }

    /// Returns the number of parties in the instance.
    #[inline]
    pub fn num_parties(&self) -> usize {
        self.num_parties
    }

    /// Returns the number of seats to distribute.
    #[inline]
    pub fn total_seats(&self) -> i64 {
        self.total_seats
    }

    /// Returns the minimum number of seats each region must receive.
    #[inline]
    pub fn min_seats_per_region(&self) -> i64 {
        self.min_seats_per_region
    }

    /// Returns the vote count for the specified (region, party) pair.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `region_index` is not in `0..num_regions()`
    /// or `party_index` is not in `0..num_parties()`.
    #[inline]
    pub fn votes(&self, region_index: RegionIndex, party_index: PartyIndex) -> u64 {
        debug_assert!(
            region_index.get() < self.num_regions(),
            "called `ElectionInstance::votes` with region index out of bounds: the len is {} but the index is {}",
            self.num_regions(),
            region_index.get()
        );
        debug_assert!(
            party_index.get() < self.num_parties(),
            "called `ElectionInstance::votes` with party index out of bounds: the len is {} but the index is {}",
            self.num_parties(),
            party_index.get()
        );

        self.votes[flatten_index(self.num_parties, region_index, party_index)]
    }

    /// Returns the nationwide vote count for the specified party.
    #[inline]
    pub fn party_votes(&self, party_index: PartyIndex) -> u64 {
        debug_assert!(
            party_index.get() < self.num_parties(),
            "called `ElectionInstance::party_votes` with party index out of bounds: the len is {} but the index is {}",
            self.num_parties(),
            party_index.get()
        );

        (0..self.num_regions())
            .map(|j| self.votes[j * self.num_parties + party_index.get()])
            .sum()
    }

    /// Returns the vote count cast in the specified region across all parties.
    #[inline]
    pub fn region_votes(&self, region_index: RegionIndex) -> u64 {
        debug_assert!(
            region_index.get() < self.num_regions(),
            "called `ElectionInstance::region_votes` with region index out of bounds: the len is {} but the index is {}",
            self.num_regions(),
            region_index.get()
        );

        let start = region_index.get() * self.num_parties;
        self.votes[start..start + self.num_parties].iter().sum()
    }

    /// Returns the total number of votes cast. Always positive.
    #[inline]
    pub fn total_votes(&self) -> u64 {
        self.total_votes
    }

    /// Returns the registered-voter count for the specified region.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `region_index` is not in `0..num_regions()`.
    #[inline]
    pub fn registered(&self, region_index: RegionIndex) -> u64 {
        debug_assert!(
            region_index.get() < self.num_regions(),
            "called `ElectionInstance::registered` with region index out of bounds: the len is {} but the index is {}",
            self.num_regions(),
            region_index.get()
        );

        self.registered[region_index.get()]
    }

    /// Returns the total number of registered voters. Always positive.
    #[inline]
    pub fn total_registered(&self) -> u64 {
        self.total_registered
    }
}

impl std::fmt::Display for ElectionInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ElectionInstance(num_regions: {}, num_parties: {}, total_seats: {})",
            self.num_regions(),
            self.num_parties(),
            self.total_seats()
        )
    }
}

/// Builder for `ElectionInstance` with eager input validation.
///
/// # Defaults
///
/// The builder initializes with the following state:
///
/// | Field | Default Value | Semantics |
/// | :--- | :--- | :--- |
/// | `votes` | `0` | No votes recorded; at least one cell must be set. |
/// | `registered` | `1` | One registered voter per region (valid placeholder). |
/// | `total_seats` | `0` | Must be set; `build` rejects non-positive counts. |
/// | `min_seats_per_region` | `0` | No regional floor. |
///
/// # Examples
///
/// ```rust
/// # use hemicycle_model::index::{PartyIndex, RegionIndex};
/// # use hemicycle_model::instance::ElectionInstanceBuilder;
///
/// let instance = ElectionInstanceBuilder::new(2, 2)
///     .set_votes(RegionIndex::new(0), PartyIndex::new(0), 80)
///     .set_votes(RegionIndex::new(0), PartyIndex::new(1), 20)
///     .set_votes(RegionIndex::new(1), PartyIndex::new(0), 30)
///     .set_votes(RegionIndex::new(1), PartyIndex::new(1), 70)
///     .set_registered(RegionIndex::new(0), 100)
///     .set_registered(RegionIndex::new(1), 100)
///     .set_total_seats(10)
///     .build()
///     .unwrap();
/// assert_eq!(instance.total_votes(), 200);
/// ```
#[derive(Clone, Debug)]
pub struct ElectionInstanceBuilder {
    num_regions: usize,
    num_parties: usize,
    votes: Vec<u64>,
    registered: Vec<u64>,
    total_seats: i64,
    min_seats_per_region: i64,
}

impl ElectionInstanceBuilder {
    /// Creates a new builder for the given problem dimensions.
    pub fn new(num_regions: usize, num_parties: usize) -> Self {
        Self {
            num_regions,
            num_parties,
            votes: vec![0; num_regions * num_parties],
            registered: vec![1; num_regions],
            total_seats: 0,
            min_seats_per_region: 0,
        }
    }

    /// Returns the number of regions this builder was created for.
    #[inline]
    pub fn num_regions(&self) -> usize {
        self.num_regions
    }

    /// Returns the number of parties this builder was created for.
    #[inline]
    pub fn num_parties(&self) -> usize {
        self.num_parties
    }

    /// Sets the vote count for the specified (region, party) pair.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `region_index` is not in `0..num_regions()`
    /// or `party_index` is not in `0..num_parties()`.
    #[inline]
    pub fn set_votes(
        mut self,
        region_index: RegionIndex,
        party_index: PartyIndex,
        count: u64,
    ) -> Self {
        debug_assert!(
            region_index.get() < self.num_regions,
            "called `ElectionInstanceBuilder::set_votes` with region index out of bounds: the len is {} but the index is {}",
            self.num_regions,
            region_index.get()
        );
        debug_assert!(
            party_index.get() < self.num_parties,
            "called `ElectionInstanceBuilder::set_votes` with party index out of bounds: the len is {} but the index is {}",
            self.num_parties,
            party_index.get()
        );

        self.votes[flatten_index(self.num_parties, region_index, party_index)] = count;
        self
    }

    /// Sets every vote cell to the same count. Useful for tests and for
    /// seeding a matrix before overriding individual cells.
    #[inline]
    pub fn set_uniform_votes(mut self, count: u64) -> Self {
        self.votes.fill(count);
        self
    }

    /// Sets the registered-voter count for the specified region.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `region_index` is not in `0..num_regions()`.
    #[inline]
    pub fn set_registered(mut self, region_index: RegionIndex, count: u64) -> Self {
        debug_assert!(
            region_index.get() < self.num_regions,
            "called `ElectionInstanceBuilder::set_registered` with region index out of bounds: the len is {} but the index is {}",
            self.num_regions,
            region_index.get()
        );

        self.registered[region_index.get()] = count;
        self
    }

    /// Sets the total number of seats to distribute.
    #[inline]
    pub fn set_total_seats(mut self, total_seats: i64) -> Self {
        self.total_seats = total_seats;
        self
    }

    /// Sets the minimum number of seats every region must receive.
    #[inline]
    pub fn set_min_seats_per_region(mut self, min_seats: i64) -> Self {
        self.min_seats_per_region = min_seats;
        self
    }

    /// Validates the accumulated data and produces an `ElectionInstance`.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInputError` if the dimensions are degenerate, the
    /// seat count is non-positive, the regional minimum is negative, any
    /// region reports zero registered voters, or the vote matrix sums to
    /// zero.
    pub fn build(self) -> Result<ElectionInstance, InvalidInputError> {
        if self.num_regions == 0 {
            return Err(InvalidInputError::NoRegions);
        }
        if self.num_parties == 0 {
            return Err(InvalidInputError::NoParties);
        }
        if self.total_seats <= 0 {
            return Err(InvalidInputError::NonPositiveSeats(self.total_seats));
        }
        if self.min_seats_per_region < 0 {
            return Err(InvalidInputError::NegativeRegionMinimum(
                self.min_seats_per_region,
            ));
        }
        if let Some(region) = self.registered.iter().position(|&count| count == 0) {
            return Err(InvalidInputError::NonPositiveRegistered(region));
        }

        let total_votes: u64 = self.votes.iter().sum();
        if total_votes == 0 {
            return Err(InvalidInputError::ZeroTotalVotes);
        }
        let total_registered: u64 = self.registered.iter().sum();

        Ok(ElectionInstance {
            num_parties: self.num_parties,
            votes: self.votes,
            registered: self.registered,
            total_seats: self.total_seats,
            min_seats_per_region: self.min_seats_per_region,
            total_votes,
            total_registered,
        })
    }
}

impl ElectionInstance {
    /// Convenience constructor from row-per-region vote data.
    ///
    /// Unlike the builder's debug-only bounds checks, dimension mismatches
    /// here are reported as `InvalidInputError` values, since row data
    /// typically arrives from outside the program.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use hemicycle_model::instance::ElectionInstance;
    ///
    /// let instance = ElectionInstance::from_rows(
    ///     &[vec![80, 20], vec![30, 70]],
    ///     &[100, 100],
    ///     10,
    ///     0,
    /// )
    /// .unwrap();
    /// assert_eq!(instance.num_regions(), 2);
    /// assert_eq!(instance.num_parties(), 2);
    /// ```
    pub fn from_rows(
        votes: &[Vec<u64>],
        registered: &[u64],
        total_seats: i64,
        min_seats_per_region: i64,
    ) -> Result<Self, InvalidInputError> {
        if votes.is_empty() {
            return Err(InvalidInputError::NoRegions);
        }
        let num_parties = votes[0].len();
        if num_parties == 0 {
            return Err(InvalidInputError::NoParties);
        }
        if registered.len() != votes.len() {
            return Err(InvalidInputError::VoteMatrixMismatch {
                expected: registered.len(),
                found: votes.len(),
            });
        }
        for (region, row) in votes.iter().enumerate() {
            if row.len() != num_parties {
                return Err(InvalidInputError::VoteRowMismatch {
                    region,
                    expected: num_parties,
                    found: row.len(),
                });
            }
        }

        let mut builder = ElectionInstanceBuilder::new(votes.len(), num_parties)
            .set_total_seats(total_seats)
            .set_min_seats_per_region(min_seats_per_region);
        for (j, row) in votes.iter().enumerate() {
            for (p, &count) in row.iter().enumerate() {
                builder = builder.set_votes(RegionIndex::new(j), PartyIndex::new(p), count);
            }
        }
        for (j, &count) in registered.iter().enumerate() {
            builder = builder.set_registered(RegionIndex::new(j), count);
        }
        builder.build()
    }
}
