// benches/intersection_benchmark.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quad_overlap::cooperative::intersect_cooperative_into;
use quad_overlap::generator::RectangleGenerator;
use quad_overlap::geometry::{inside_mask, CornerMask, Quad};
use quad_overlap::overlap::{intersect_into, IntersectionOutput};

fn create_bench_pairs() -> Vec<(Quad, Quad, CornerMask)> {
    const NUM_BENCH_PAIRS: usize = 100;
    let mut pairs = Vec::with_capacity(NUM_BENCH_PAIRS);
    for i in 0..NUM_BENCH_PAIRS {
        // Half chain-joint pairs, half aligned offset pairs, so both the
        // generic and the boundary-contact code paths get timed. The mask is
        // precomputed because hosts hand it in alongside the pair.
        let (quad1, quad2) = if i % 2 == 0 {
            RectangleGenerator::joint_pair()
        } else {
            RectangleGenerator::offset_pair()
        };
        let ones = inside_mask(&quad1, &quad2);
        pairs.push((quad1, quad2, ones));
    }
    pairs
}

fn overlap_benchmark_fn(c: &mut Criterion) {
    let pairs = create_bench_pairs();

    let mut group = c.benchmark_group("OverlapOperations");

    group.bench_function("serial_intersect_into_reused_output", |b| {
        let mut out = IntersectionOutput::default();
        let mut pair_iter = pairs.iter().cycle();

        b.iter(|| {
            let (quad1, quad2, ones) = pair_iter.next().unwrap();
            intersect_into(black_box(quad1), black_box(quad2), *ones, black_box(&mut out))
        })
    });

    group.bench_function("cooperative_intersect_into_reused_output", |b| {
        let mut out = IntersectionOutput::default();
        let mut pair_iter = pairs.iter().cycle();

        b.iter(|| {
            let (quad1, quad2, ones) = pair_iter.next().unwrap();
            intersect_cooperative_into(black_box(quad1), black_box(quad2), *ones, black_box(&mut out))
        })
    });

    group.finish();
}

criterion_group!(benches, overlap_benchmark_fn);
criterion_main!(benches);
