// Criterion comparison of the pipeline variants across input sizes.
// The full 40-element run is left to the binary; naive fib makes it too slow
// for repeated sampling.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lazy_pipelines::{Value, Variant};

fn variant_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("fib_inc_inc_take");

    for size in [10usize, 20, 25].iter() {
        let input: Vec<Value> = (0..*size as Value).collect();
        for variant in Variant::all() {
            group.bench_with_input(BenchmarkId::new(variant.label(), size), size, |b, &size| {
                b.iter(|| black_box(variant.run(black_box(&input), size)));
            });
        }
    }

    group.finish();
}

fn take_short_circuit_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("take_5_of_25");
    let input: Vec<Value> = (0..25).collect();

    for variant in Variant::all() {
        group.bench_function(variant.label(), |b| {
            b.iter(|| black_box(variant.run(black_box(&input), 5)));
        });
    }

    group.finish();
}

criterion_group!(benches, variant_benchmark, take_short_circuit_benchmark);
criterion_main!(benches);
