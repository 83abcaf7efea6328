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
    index::{PartyIndex, RegionIndex},
    instance::ElectionInstance,
};

/// The fixed column layout of the apportionment program.
///
/// Columns are laid out in four contiguous blocks:
///
/// | Block | Columns | Variable |
/// | :--- | :--- | :--- |
/// | seats | `0 .. R*P` | `x[region][party]`, region-major, integral |
/// | national | `R*P .. R*P + P` | `lambda[party]` |
/// | regional | `R*P + P .. 2*R*P + P` | `mu[region][party]`, region-major |
/// | turnout | `2*R*P + P .. 2*R*P + P + R` | `zeta[region]` |
///
/// The layout is shared between the model builder (writing rows) and the
/// result extractor (reading seat columns back out); both sides derive it
/// from the same instance so the mapping cannot drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariableLayout {
    num_regions: usize,
    num_parties: usize,
}

impl VariableLayout {
    /// Creates the layout for the given problem dimensions.
    #[inline]
    pub fn new(num_regions: usize, num_parties: usize) -> Self {
        Self {
            num_regions,
            num_parties,
        }
    }

    /// Creates the layout matching an instance's dimensions.
    #[inline]
    pub fn for_instance(instance: &ElectionInstance) -> Self {
        Self::new(instance.num_regions(), instance.num_parties())
    }

    /// Returns the number of regions.
    #[inline]
    pub fn num_regions(&self) -> usize {
        self.num_regions
    }

    /// Returns the number of parties.
    #[inline]
    pub fn num_parties(&self) -> usize {
        self.num_parties
    }

    /// Returns the number of seat columns (`R * P`).
    #[inline]
    pub fn num_seat_columns(&self) -> usize {
        self.num_regions * self.num_parties
    }

    /// Returns the total number of columns (`2*R*P + P + R`).
    #[inline]
    pub fn num_columns(&self) -> usize {
        2 * self.num_seat_columns() + self.num_parties + self.num_regions
    }

    /// Returns the column of the seat variable `x[region][party]`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if either index is out of bounds.
    #[inline]
    pub fn seat(&self, region_index: RegionIndex, party_index: PartyIndex) -> usize {
        debug_assert!(
            region_index.get() < self.num_regions,
            "called `VariableLayout::seat` with region index out of bounds: the len is {} but the index is {}",
            self.num_regions,
            region_index.get()
        );
        debug_assert!(
            party_index.get() < self.num_parties,
            "called `VariableLayout::seat` with party index out of bounds: the len is {} but the index is {}",
            self.num_parties,
            party_index.get()
        );

        region_index.get() * self.num_parties + party_index.get()
    }

    /// Returns the column of the national deviation variable
    /// `lambda[party]`.
    #[inline]
    pub fn national_deviation(&self, party_index: PartyIndex) -> usize {
        debug_assert!(
            party_index.get() < self.num_parties,
            "called `VariableLayout::national_deviation` with party index out of bounds: the len is {} but the index is {}",
            self.num_parties,
            party_index.get()
        );

        self.num_seat_columns() + party_index.get()
    }

    /// Returns the column of the regional deviation variable
    /// `mu[region][party]`.
    #[inline]
    pub fn regional_deviation(&self, region_index: RegionIndex, party_index: PartyIndex) -> usize {
        self.num_seat_columns()
            + self.num_parties
            + self.seat(region_index, party_index)
    }

    /// Returns the column of the turnout deviation variable `zeta[region]`.
    #[inline]
    pub fn turnout_deviation(&self, region_index: RegionIndex) -> usize {
        debug_assert!(
            region_index.get() < self.num_regions,
            "called `VariableLayout::turnout_deviation` with region index out of bounds: the len is {} but the index is {}",
            self.num_regions,
            region_index.get()
        );

        2 * self.num_seat_columns() + self.num_parties + region_index.get()
    }

    /// Returns the (region, party) pair a seat column belongs to.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `column` is not a seat column.
    #[inline]
    pub fn seat_position(&self, column: usize) -> (RegionIndex, PartyIndex) {
        debug_assert!(
            column < self.num_seat_columns(),
            "called `VariableLayout::seat_position` with a non-seat column: the seat block has {} columns but the index is {}",
            self.num_seat_columns(),
            column
        );

        (
            RegionIndex::new(column / self.num_parties),
            PartyIndex::new(column % self.num_parties),
        )
    }
}

impl std::fmt::Display for VariableLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VariableLayout(num_regions: {}, num_parties: {}, num_columns: {})",
            self.num_regions,
            self.num_parties,
            self.num_columns()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ri(i: usize) -> RegionIndex {
        RegionIndex::new(i)
    }

    fn pi(i: usize) -> PartyIndex {
        PartyIndex::new(i)
    }

    #[test]
    fn test_blocks_are_contiguous_and_disjoint() {
        // 3 regions, 2 parties: 6 seat, 2 national, 6 regional, 3 turnout.
        let layout = VariableLayout::new(3, 2);
        assert_eq!(layout.num_seat_columns(), 6);
        assert_eq!(layout.num_columns(), 17);

        assert_eq!(layout.seat(ri(0), pi(0)), 0);
        assert_eq!(layout.seat(ri(2), pi(1)), 5);
        assert_eq!(layout.national_deviation(pi(0)), 6);
        assert_eq!(layout.national_deviation(pi(1)), 7);
        assert_eq!(layout.regional_deviation(ri(0), pi(0)), 8);
        assert_eq!(layout.regional_deviation(ri(2), pi(1)), 13);
        assert_eq!(layout.turnout_deviation(ri(0)), 14);
        assert_eq!(layout.turnout_deviation(ri(2)), 16);
    }

    #[test]
    fn test_seat_position_inverts_seat() {
        let layout = VariableLayout::new(4, 3);
        for j in 0..4 {
            for p in 0..3 {
                let column = layout.seat(ri(j), pi(p));
                assert_eq!(layout.seat_position(column), (ri(j), pi(p)));
            }
        }
    }
}
