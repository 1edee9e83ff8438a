//! Goldilocks field, scalar and Ed448 benchmarks.
//!
//! Run with: cargo bench -p goldilocks-crypto

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use goldilocks_crypto::curve448::{Ed448Group, Fe448, Scalar};
use goldilocks_crypto::{CurveGroup, Ed448KeyPair};

fn sample_fe(fill: u8) -> Fe448 {
    let mut bytes = [fill; 56];
    bytes[55] &= 0x7F;
    Fe448::deserialize(&bytes).unwrap()
}

fn bench_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("fe448");
    let a = sample_fe(0x5A);
    let b = sample_fe(0xC3);

    group.bench_function("mul", |bench| bench.iter(|| black_box(&a).mul(black_box(&b))));
    group.bench_function("sqr", |bench| bench.iter(|| black_box(&a).sqr()));
    group.bench_function("mulw", |bench| bench.iter(|| black_box(&a).mulw(39081)));
    group.bench_function("isr", |bench| bench.iter(|| black_box(&a).isr()));
    group.bench_function("invert", |bench| bench.iter(|| black_box(&a).invert()));

    group.finish();
}

fn bench_scalar(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar");
    let a = Scalar::decode_long(&[0x77u8; 114]);
    let b = Scalar::decode_long(&[0x21u8; 114]);

    group.bench_function("mul", |bench| bench.iter(|| black_box(&a).mul(black_box(&b))));
    group.bench_function("decode_long_114", |bench| {
        bench.iter(|| Scalar::decode_long(black_box(&[0x9Eu8; 114])))
    });
    group.bench_function("base_scalarmul", |bench| {
        bench.iter(|| Ed448Group::precomputed_base_scalarmul(black_box(&a)))
    });

    group.finish();
}

fn bench_ed448(c: &mut Criterion) {
    let mut group = c.benchmark_group("ed448");
    let kp = Ed448KeyPair::from_seed(&[0x42u8; 57]).unwrap();

    group.bench_function("keygen", |bench| {
        bench.iter(|| Ed448KeyPair::from_seed(black_box(&[0x42u8; 57])))
    });

    for size in [32usize, 1024, 16384] {
        let msg = vec![0xABu8; size];
        let sig = kp.sign(&msg).unwrap();

        group.bench_with_input(BenchmarkId::new("sign", size), &size, |bench, _| {
            bench.iter(|| kp.sign(black_box(&msg)))
        });
        group.bench_with_input(BenchmarkId::new("verify", size), &size, |bench, _| {
            bench.iter(|| kp.verify(black_box(&msg), black_box(&sig)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_field, bench_scalar, bench_ed448);
criterion_main!(benches);
