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

//! Assembles the apportionment program from a validated instance.
//!
//! The objective contains absolute deviations, which are not linear. Each
//! `|e|` term is replaced by an auxiliary non-negative variable `d` and two
//! rows `d >= e` and `d >= -e`; minimizing `d` then pins it to `|e|` at any
//! optimum. Three deviation families are linearized this way:
//!
//! - `lambda[p]`: party p's nationwide seat total vs. its proportional
//!   share of all seats.
//! - `mu[j][p]`: party p's seats in region j vs. its national vote share of
//!   the seats awarded to region j itself.
//! - `zeta[j]`: region j's seat total vs. its registered-voter share of all
//!   seats.
//!
//! On top of these the program carries the seat-conservation equality and
//! one minimum-seats row per region. Seat variables are integral with
//! bounds `[0, total_seats]`; auxiliary variables are continuous and
//! non-negative.

use crate::{
    index::{PartyIndex, RegionIndex},
    instance::ElectionInstance,
    layout::VariableLayout,
    program::{LinearConstraint, LinearProgram, Relation, VariableBounds},
    weights::DeviationWeights,
};

/// Builds the mixed-integer program for one apportionment instance.
///
/// Pure function: the same instance and weights always produce an
/// identical program, row for row. Row order is fixed (conservation,
/// regional minimums, then the lambda, mu, and zeta pairs) so the solving
/// pipeline downstream is deterministic.
///
/// Note that a regional minimum exceeding the seat total is deliberately
/// not rejected here; the resulting program is well formed and the engine
/// proves it infeasible.
///
/// # Examples
///
/// ```rust
/// # use hemicycle_model::builder::build_program;
/// # use hemicycle_model::instance::ElectionInstance;
/// # use hemicycle_model::weights::DeviationWeights;
///
/// let instance =
///     ElectionInstance::from_rows(&[vec![80, 20], vec![30, 70]], &[100, 100], 10, 0).unwrap();
/// let program = build_program(&instance, &DeviationWeights::default());
///
/// // 2x2 instance: 12 columns, 1 + 2 + 4 + 8 + 4 rows.
/// assert_eq!(program.num_variables(), 12);
/// assert_eq!(program.num_constraints(), 19);
/// ```
pub fn build_program(instance: &ElectionInstance, weights: &DeviationWeights) -> LinearProgram {
    let layout = VariableLayout::for_instance(instance);
    let num_regions = layout.num_regions();
    let num_parties = layout.num_parties();
    let num_columns = layout.num_columns();

    let total_seats = instance.total_seats() as f64;
    let total_votes = instance.total_votes() as f64;
    let total_registered = instance.total_registered() as f64;

    let mut program = LinearProgram::new(num_columns);

    for j in 0..num_regions {
        for p in 0..num_parties {
            let seat = layout.seat(RegionIndex::new(j), PartyIndex::new(p));
            program.set_bounds(seat, VariableBounds::new(0.0, total_seats));
            program.mark_integral(seat);
        }
    }
    for p in 0..num_parties {
        program.set_objective_coefficient(
            layout.national_deviation(PartyIndex::new(p)),
            weights.national(),
        );
    }
    for j in 0..num_regions {
        for p in 0..num_parties {
            program.set_objective_coefficient(
                layout.regional_deviation(RegionIndex::new(j), PartyIndex::new(p)),
                weights.regional(),
            );
        }
        program.set_objective_coefficient(
            layout.turnout_deviation(RegionIndex::new(j)),
            weights.turnout(),
        );
    }

    // Seat conservation: all seats are awarded, none invented.
    let mut row = vec![0.0; num_columns];
    for j in 0..num_regions {
        for p in 0..num_parties {
            row[layout.seat(RegionIndex::new(j), PartyIndex::new(p))] = 1.0;
        }
    }
    program.push_constraint(LinearConstraint::new(row, Relation::Equal, total_seats));

    // Per-region seat floor.
    let min_seats = instance.min_seats_per_region() as f64;
    for j in 0..num_regions {
        let mut row = vec![0.0; num_columns];
        for p in 0..num_parties {
            row[layout.seat(RegionIndex::new(j), PartyIndex::new(p))] = 1.0;
        }
        program.push_constraint(LinearConstraint::new(row, Relation::GreaterEqual, min_seats));
    }

    // lambda[p] >= +-(sum_j x[j][p] - target_p), target_p the party's
    // proportional share of all seats.
    for p in 0..num_parties {
        let party = PartyIndex::new(p);
        let target = total_seats * instance.party_votes(party) as f64 / total_votes;
        let lambda = layout.national_deviation(party);

        let mut above = vec![0.0; num_columns];
        let mut below = vec![0.0; num_columns];
        above[lambda] = 1.0;
        below[lambda] = 1.0;
        for j in 0..num_regions {
            let seat = layout.seat(RegionIndex::new(j), party);
            above[seat] = -1.0;
            below[seat] = 1.0;
        }
        program.push_constraint(LinearConstraint::new(above, Relation::GreaterEqual, -target));
        program.push_constraint(LinearConstraint::new(below, Relation::GreaterEqual, target));
    }

    // mu[j][p] >= +-(x[j][p] - share_p * sum_q x[j][q]), share_p the
    // party's national vote share. The reference scales with the seats
    // region j actually receives, so both sides of the deviation live on
    // the left-hand side and the right-hand side is zero.
    for j in 0..num_regions {
        let region = RegionIndex::new(j);
        for p in 0..num_parties {
            let party = PartyIndex::new(p);
            let share = instance.party_votes(party) as f64 / total_votes;
            let mu = layout.regional_deviation(region, party);

            let mut above = vec![0.0; num_columns];
            let mut below = vec![0.0; num_columns];
            above[mu] = 1.0;
            below[mu] = 1.0;
            for q in 0..num_parties {
                let seat = layout.seat(region, PartyIndex::new(q));
                above[seat] = share;
                below[seat] = -share;
            }
            let own = layout.seat(region, party);
            above[own] -= 1.0;
            below[own] += 1.0;
            program.push_constraint(LinearConstraint::new(above, Relation::GreaterEqual, 0.0));
            program.push_constraint(LinearConstraint::new(below, Relation::GreaterEqual, 0.0));
        }
    }

    // zeta[j] >= +-(sum_p x[j][p] - target_j), target_j the region's
    // registered-voter share of all seats.
    for j in 0..num_regions {
        let region = RegionIndex::new(j);
        let target = total_seats * instance.registered(region) as f64 / total_registered;
        let zeta = layout.turnout_deviation(region);

        let mut above = vec![0.0; num_columns];
        let mut below = vec![0.0; num_columns];
        above[zeta] = 1.0;
        below[zeta] = 1.0;
        for p in 0..num_parties {
            let seat = layout.seat(region, PartyIndex::new(p));
            above[seat] = -1.0;
            below[seat] = 1.0;
        }
        program.push_constraint(LinearConstraint::new(above, Relation::GreaterEqual, -target));
        program.push_constraint(LinearConstraint::new(below, Relation::GreaterEqual, target));
    }

    program
}
