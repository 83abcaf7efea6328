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

//! End-to-end apportionment scenarios.
//!
//! The optimality checks compare the solver against a brute-force oracle
//! that enumerates every feasible integer allocation of a tiny instance
//! and evaluates the deviation objective directly. Several optima can tie,
//! so the oracle compares objective values, never matrices.

use hemicycle_bnb::result::TerminationReason;
use hemicycle_model::{
    index::{PartyIndex, RegionIndex},
    instance::ElectionInstance,
    solution::SeatMatrix,
    weights::DeviationWeights,
};
use hemicycle_solver::{ApportionmentResult, ApportionmentSolver};

fn ri(i: usize) -> RegionIndex {
    RegionIndex::new(i)
}

fn pi(i: usize) -> PartyIndex {
    PartyIndex::new(i)
}

/// Evaluates the weighted deviation objective of an integer allocation.
///
/// For integer points the auxiliary variables of the linearized program
/// equal the absolute deviations at any optimum, so this direct evaluation
/// matches the engine's objective exactly.
fn objective_of(
    instance: &ElectionInstance,
    weights: &DeviationWeights,
    matrix: &SeatMatrix,
) -> f64 {
    let total_votes = instance.total_votes() as f64;
    let total_registered = instance.total_registered() as f64;
    let total_seats = instance.total_seats() as f64;

    let mut national = 0.0;
    for p in 0..instance.num_parties() {
        let target = total_seats * instance.party_votes(pi(p)) as f64 / total_votes;
        national += (matrix.party_total(pi(p)) as f64 - target).abs();
    }

    let mut regional = 0.0;
    for j in 0..instance.num_regions() {
        let region_seats = matrix.region_total(ri(j)) as f64;
        for p in 0..instance.num_parties() {
            let share = instance.party_votes(pi(p)) as f64 / total_votes;
            regional += (matrix.seats(ri(j), pi(p)) as f64 - share * region_seats).abs();
        }
    }

    let mut turnout = 0.0;
    for j in 0..instance.num_regions() {
        let target = total_seats * instance.registered(ri(j)) as f64 / total_registered;
        turnout += (matrix.region_total(ri(j)) as f64 - target).abs();
    }

    weights.national() * national + weights.regional() * regional + weights.turnout() * turnout
}

/// Enumerates every feasible allocation and returns the minimal objective.
fn brute_force_optimum(instance: &ElectionInstance, weights: &DeviationWeights) -> f64 {
    let num_cells = instance.num_regions() * instance.num_parties();
    let mut cells = vec![0i64; num_cells];
    let mut best = f64::INFINITY;
    enumerate(instance, weights, &mut cells, 0, instance.total_seats(), &mut best);
    assert!(
        best.is_finite(),
        "the oracle found no feasible allocation; the scenario is miswired"
    );
    best
}

fn enumerate(
    instance: &ElectionInstance,
    weights: &DeviationWeights,
    cells: &mut Vec<i64>,
    index: usize,
    remaining: i64,
    best: &mut f64,
) {
    if index == cells.len() - 1 {
        cells[index] = remaining;
        let matrix = SeatMatrix::new(instance.num_parties(), cells.clone());
        let feasible = (0..instance.num_regions())
            .all(|j| matrix.region_total(ri(j)) >= instance.min_seats_per_region());
        if feasible {
            let objective = objective_of(instance, weights, &matrix);
            if objective < *best {
                *best = objective;
            }
        }
        return;
    }
    for count in 0..=remaining {
        cells[index] = count;
        enumerate(instance, weights, cells, index + 1, remaining - count, best);
    }
}

fn assert_valid_allocation(instance: &ElectionInstance, matrix: &SeatMatrix) {
    assert_eq!(matrix.num_regions(), instance.num_regions());
    assert_eq!(matrix.num_parties(), instance.num_parties());
    assert_eq!(matrix.total(), instance.total_seats());
    for j in 0..instance.num_regions() {
        assert!(matrix.region_total(ri(j)) >= instance.min_seats_per_region());
        for p in 0..instance.num_parties() {
            assert!(matrix.seats(ri(j), pi(p)) >= 0);
        }
    }
}

#[test]
fn test_two_regions_two_parties_matches_the_oracle() {
    let instance =
        ElectionInstance::from_rows(&[vec![80, 20], vec![30, 70]], &[100, 100], 10, 0).unwrap();
    let weights = DeviationWeights::default();

    let outcome = ApportionmentSolver::new().solve(&instance).unwrap();
    assert!(outcome.is_optimal());
    assert_eq!(
        outcome.termination_reason(),
        &TerminationReason::OptimalityProven
    );

    let matrix = outcome.result().allocation().unwrap();
    assert_valid_allocation(&instance, matrix);

    let achieved = objective_of(&instance, &weights, matrix);
    let oracle = brute_force_optimum(&instance, &weights);
    assert!(
        (achieved - oracle).abs() < 1e-6,
        "solver achieved {achieved}, oracle proves {oracle}"
    );
}

#[test]
fn test_three_regions_with_floor_matches_the_oracle() {
    let instance = ElectionInstance::from_rows(
        &[vec![10, 5], vec![3, 8], vec![6, 6]],
        &[40, 30, 30],
        7,
        1,
    )
    .unwrap();
    let weights = DeviationWeights::new(1.0, 2.0, 0.5).unwrap();

    let outcome = ApportionmentSolver::builder()
        .with_weights(weights)
        .build()
        .solve(&instance)
        .unwrap();
    assert!(outcome.is_optimal());

    let matrix = outcome.result().allocation().unwrap();
    assert_valid_allocation(&instance, matrix);

    let achieved = objective_of(&instance, &weights, matrix);
    let oracle = brute_force_optimum(&instance, &weights);
    assert!(
        (achieved - oracle).abs() < 1e-6,
        "solver achieved {achieved}, oracle proves {oracle}"
    );
}

#[test]
fn test_regional_minimums_exceeding_seats_are_infeasible() {
    // Two regions demanding six seats each from a house of ten.
    let instance =
        ElectionInstance::from_rows(&[vec![80, 20], vec![30, 70]], &[100, 100], 10, 6).unwrap();

    let outcome = ApportionmentSolver::new().solve(&instance).unwrap();
    assert!(outcome.is_infeasible());
    assert_eq!(
        outcome.termination_reason(),
        &TerminationReason::InfeasibilityProven
    );
    assert!(!outcome.has_allocation());
}

#[test]
fn test_regional_minimums_bind_when_feasible() {
    // All the votes sit in region 0; the floor still guarantees region 1
    // two seats.
    let instance =
        ElectionInstance::from_rows(&[vec![90, 10], vec![1, 1]], &[100, 100], 10, 2).unwrap();

    let outcome = ApportionmentSolver::new().solve(&instance).unwrap();
    assert!(outcome.is_optimal());

    let matrix = outcome.result().allocation().unwrap();
    assert_valid_allocation(&instance, matrix);
    assert!(matrix.region_total(ri(1)) >= 2);
}

#[test]
fn test_single_cell_instance_takes_every_seat() {
    let instance = ElectionInstance::from_rows(&[vec![5]], &[1], 7, 0).unwrap();

    let outcome = ApportionmentSolver::new().solve(&instance).unwrap();
    assert!(outcome.is_optimal());

    let matrix = outcome.result().allocation().unwrap();
    assert_eq!(matrix.seats(ri(0), pi(0)), 7);

    // One region, one party: perfect proportionality at every level.
    let objective = objective_of(&instance, &DeviationWeights::default(), matrix);
    assert!(objective.abs() < 1e-9);
}

#[test]
fn test_identical_runs_yield_identical_matrices() {
    let instance = ElectionInstance::from_rows(
        &[vec![42, 17, 8], vec![11, 29, 30]],
        &[120, 80],
        9,
        1,
    )
    .unwrap();

    let solver = ApportionmentSolver::new();
    let first = solver.solve(&instance).unwrap();
    let second = solver.solve(&instance).unwrap();

    assert_eq!(first.result(), second.result());
    assert_eq!(
        first.statistics().nodes_explored,
        second.statistics().nodes_explored
    );
}

#[test]
fn test_raising_the_turnout_weight_never_raises_turnout_deviation() {
    // Registered voters pull the seats toward region 1, the votes pull
    // them toward region 0; the turnout weight arbitrates.
    let instance =
        ElectionInstance::from_rows(&[vec![60, 0], vec![0, 40]], &[10, 90], 5, 0).unwrap();

    let turnout_deviation_at = |turnout_weight: f64| -> f64 {
        let weights = DeviationWeights::new(1.0, 1.0, turnout_weight).unwrap();
        let outcome = ApportionmentSolver::builder()
            .with_weights(weights)
            .build()
            .solve(&instance)
            .unwrap();
        let matrix = outcome.result().allocation().unwrap().clone();

        let total_registered = instance.total_registered() as f64;
        (0..instance.num_regions())
            .map(|j| {
                let target = instance.total_seats() as f64 * instance.registered(ri(j)) as f64
                    / total_registered;
                (matrix.region_total(ri(j)) as f64 - target).abs()
            })
            .sum()
    };

    let relaxed = turnout_deviation_at(0.1);
    let strict = turnout_deviation_at(10.0);
    assert!(
        strict <= relaxed + 1e-9,
        "turnout deviation rose from {relaxed} to {strict} as its weight grew"
    );
}

#[test]
fn test_node_budget_of_zero_reports_unknown() {
    let instance =
        ElectionInstance::from_rows(&[vec![80, 20], vec![30, 70]], &[100, 100], 10, 0).unwrap();

    let outcome = ApportionmentSolver::builder()
        .with_node_limit(0)
        .build()
        .solve(&instance)
        .unwrap();

    assert_eq!(outcome.result(), &ApportionmentResult::Unknown);
    assert!(!outcome.has_allocation());
    match outcome.termination_reason() {
        TerminationReason::Aborted(reason) => assert!(reason.contains("node limit")),
        other => panic!("expected Aborted, got {other}"),
    }
}

#[test]
fn test_generous_node_budget_still_proves_optimality() {
    let instance =
        ElectionInstance::from_rows(&[vec![80, 20], vec![30, 70]], &[100, 100], 10, 0).unwrap();

    let outcome = ApportionmentSolver::builder()
        .with_node_limit(1_000_000)
        .build()
        .solve(&instance)
        .unwrap();

    assert!(outcome.is_optimal());
}
