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

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hemicycle_model::instance::ElectionInstance;
use hemicycle_solver::ApportionmentSolver;
use std::hint::black_box;

/// Deterministic pseudo-votes so the benchmark needs no data files.
fn synthetic_instance(num_regions: usize, num_parties: usize, seats: i64) -> ElectionInstance {
    let votes: Vec<Vec<u64>> = (0..num_regions)
        .map(|j| {
            (0..num_parties)
                .map(|p| ((j * 7 + p * 13 + 3) % 29 + 1) as u64 * 100)
                .collect()
        })
        .collect();
    let registered: Vec<u64> = (0..num_regions).map(|j| 10_000 + 1_000 * j as u64).collect();
    ElectionInstance::from_rows(&votes, &registered, seats, 1).unwrap()
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("apportionment_solve");

    for (num_regions, num_parties, seats) in [(2, 2, 10), (3, 3, 15), (4, 3, 21)] {
        let instance = synthetic_instance(num_regions, num_parties, seats);
        let solver = ApportionmentSolver::new();
        let label = format!("{num_regions}x{num_parties}-{seats}");

        group.bench_with_input(
            BenchmarkId::from_parameter(&label),
            &instance,
            |b, instance| {
                b.iter(|| {
                    let outcome = solver.solve(black_box(instance)).unwrap();
                    black_box(outcome)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
