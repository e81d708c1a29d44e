//! Argon2 benchmark
use benches::{Benchmarker, criterion_group_bench};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use argon2::{Algorithm, Argon2, Block, Params};

const KIB: u32 = 1024;

fn context(algorithm: Algorithm, memory: u32, lanes: u32) -> Argon2 {
    let params = Params::builder()
        .algorithm(algorithm)
        .salt(b"somesalt")
        .iterations(1)
        .memory(memory)
        .lanes(lanes)
        .build()
        .expect("valid benchmark parameters");
    Argon2::new(params)
}

fn bench(c: &mut Benchmarker) {
    let mut group = c.benchmark_group("argon2");

    for algorithm in [Algorithm::Argon2d, Algorithm::Argon2i, Algorithm::Argon2id] {
        for memory in [KIB, 4 * KIB, 16 * KIB] {
            let ctx = context(algorithm, memory, 1);
            let mut blocks = vec![Block::new(); ctx.required_blocks()];
            let mut out = [0u8; 32];

            group.throughput(Throughput::Bytes(u64::from(memory) * 1024));

            group.bench_function(BenchmarkId::new(algorithm.ident(), memory), |b| {
                b.iter(|| ctx.fill_memory(b"password", &mut out, &mut blocks));
            });
        }
    }

    group.finish();
}

fn bench_lanes(c: &mut Benchmarker) {
    let mut group = c.benchmark_group("argon2id-lanes");

    for lanes in [1, 2, 4, 8] {
        let ctx = context(Algorithm::Argon2id, 16 * KIB, lanes);
        let mut blocks = vec![Block::new(); ctx.required_blocks()];
        let mut out = [0u8; 32];

        group.throughput(Throughput::Bytes(16 * 1024 * 1024));

        group.bench_function(BenchmarkId::new("fill_memory", lanes), |b| {
            b.iter(|| ctx.fill_memory(b"password", &mut out, &mut blocks));
        });
    }

    group.finish();
}

criterion_group_bench!(benches, bench);
criterion_group_bench!(benches_lanes, bench_lanes);
criterion_main!(benches, benches_lanes);
