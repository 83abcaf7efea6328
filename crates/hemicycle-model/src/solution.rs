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

use crate::index::{PartyIndex, RegionIndex};

/// The final seat allocation, one integer cell per (region, party) pair.
///
/// Stored region-major in a single flat vector, matching the vote matrix
/// layout of the instance it was computed from. Row order follows the
/// instance's region order, column order its party order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeatMatrix {
    num_parties: usize,
    seats: Vec<i64>, // len = num_regions * num_parties
}

impl SeatMatrix {
    /// Constructs a new `SeatMatrix` from a region-major flat vector.
    ///
    /// # Panics
    ///
    /// Panics if `num_parties` is zero or `seats.len()` is not a multiple
    /// of `num_parties`.
    pub fn new(num_parties: usize, seats: Vec<i64>) -> Self {
        assert!(
            num_parties > 0,
            "called `SeatMatrix::new` with zero parties"
        );
        assert_eq!(
            seats.len() % num_parties,
            0,
            "called `SeatMatrix::new` with inconsistent dimensions: seats.len() = {} is not a multiple of num_parties = {}",
            seats.len(),
            num_parties
        );

        Self { num_parties, seats }
    }

    /// Returns the number of regions (rows).
    #[inline]
    pub fn num_regions(&self) -> usize {
        self.seats.len() / self.num_parties
    }

    /// Returns the number of parties (columns).
    #[inline]
    pub fn num_parties(&self) -> usize {
        self.num_parties
    }

    /// Returns the seats awarded to the specified (region, party) pair.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if either index is out of bounds.
    #[inline]
    pub fn seats(&self, region_index: RegionIndex, party_index: PartyIndex) -> i64 {
        debug_assert!(
            region_index.get() < self.num_regions(),
            "called `SeatMatrix::seats` with region index out of bounds: the len is {} but the index is {}",
            self.num_regions(),
            region_index.get()
        );
        debug_assert!(
            party_index.get() < self.num_parties(),
            "called `SeatMatrix::seats` with party index out of bounds: the len is {} but the index is {}",
            self.num_parties(),
            party_index.get()
        );

        self.seats[region_index.get() * self.num_parties + party_index.get()]
    }

    /// Returns one region's row as a slice.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `region_index` is out of bounds.
    #[inline]
    pub fn row(&self, region_index: RegionIndex) -> &[i64] {
        debug_assert!(
            region_index.get() < self.num_regions(),
            "called `SeatMatrix::row` with region index out of bounds: the len is {} but the index is {}",
            self.num_regions(),
            region_index.get()
        );

        let start = region_index.get() * self.num_parties;
        &self.seats[start..start + self.num_parties]
    }

    /// Returns an iterator over the region rows in region order.
    #[inline]
    pub fn rows(&self) -> impl Iterator<Item = &[i64]> {
        self.seats.chunks(self.num_parties)
    }

    /// Returns the seat total of one region.
    #[inline]
    pub fn region_total(&self, region_index: RegionIndex) -> i64 {
        self.row(region_index).iter().sum()
    }

    /// Returns the nationwide seat total of one party.
    #[inline]
    pub fn party_total(&self, party_index: PartyIndex) -> i64 {
        debug_assert!(
            party_index.get() < self.num_parties(),
            "called `SeatMatrix::party_total` with party index out of bounds: the len is {} but the index is {}",
            self.num_parties(),
            party_index.get()
        );

        (0..self.num_regions())
            .map(|j| self.seats[j * self.num_parties + party_index.get()])
            .sum()
    }

    /// Returns the total number of seats awarded.
    #[inline]
    pub fn total(&self) -> i64 {
        self.seats.iter().sum()
    }
}

impl std::fmt::Display for SeatMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Seat Allocation")?;
        writeln!(f, "   Total seats: {}", self.total())?;
        writeln!(f)?;

        write!(f, "   {:<10}", "Region")?;
        for p in 0..self.num_parties {
            write!(f, " | {:<8}", format!("Party {}", p))?;
        }
        writeln!(f)?;
        write!(f, "   {:-<10}", "")?;
        for _ in 0..self.num_parties {
            write!(f, "-+-{:-<8}", "")?;
        }
        writeln!(f)?;

        for (j, row) in self.rows().enumerate() {
            write!(f, "   {:<10}", j)?;
            for seats in row {
                write!(f, " | {:<8}", seats)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
