use criterion::{black_box, criterion_group, criterion_main, Criterion};
use num_bigint::BigUint;
use rare_finder::{big_isqrt, digital_root, is_rare, RareNumbers};

fn bench_big_isqrt(c: &mut Criterion) {
    let small = BigUint::from(99999980000001u64);
    let large: BigUint = "152415787532388367526596557677488187881".parse().unwrap();

    c.bench_function("isqrt_native_path", |b| {
        b.iter(|| big_isqrt(black_box(&small)))
    });
    c.bench_function("isqrt_newton_path", |b| {
        b.iter(|| big_isqrt(black_box(&large)))
    });
}

fn bench_is_rare(c: &mut Criterion) {
    let rare: BigUint = "22134434735752443122".parse().unwrap();
    let not_rare: BigUint = "22134434535752443122".parse().unwrap();

    c.bench_function("is_rare_hit", |b| b.iter(|| is_rare(black_box(&rare), None)));
    c.bench_function("is_rare_miss", |b| {
        b.iter(|| is_rare(black_box(&not_rare), None))
    });
}

fn bench_digital_root(c: &mut Criterion) {
    let n: BigUint = "12345678901234567890".parse().unwrap();
    c.bench_function("digital_root", |b| b.iter(|| digital_root(black_box(&n))));
}

fn bench_length_sweep(c: &mut Criterion) {
    c.bench_function("sweep_6_digits", |b| {
        b.iter(|| RareNumbers::new(black_box(6)).count())
    });
}

criterion_group!(
    benches,
    bench_big_isqrt,
    bench_is_rare,
    bench_digital_root,
    bench_length_sweep
);
criterion_main!(benches);
