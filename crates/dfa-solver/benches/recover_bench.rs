use criterion::{criterion_group, criterion_main, Criterion};

use dfa_solver::{parse_hex_blocks, recover, stages, SampleSet};

const CORRECT: &str = "3544e02ca33411cf4d5df8fcc6e7a5ec
d42c1b103455e3d5c712425c37b95a0d
d6478acfa61841918c8c51db6877e6f9";

const FAULTY: &str = "a57a261bbe46beaa53a6cef00a30f729
cc10869a6cdf3affe49d33f2fce4ef46
249c9c16f10e2980ad6f0adfa9efbfcf";

fn reference_samples() -> SampleSet {
    let correct = parse_hex_blocks(CORRECT).expect("correct ciphertexts");
    let faulty = parse_hex_blocks(FAULTY).expect("faulty ciphertexts");
    SampleSet::from_ciphertexts(&correct, &faulty).expect("sample set")
}

fn bench_recover(c: &mut Criterion) {
    let samples = reference_samples();

    let mut group = c.benchmark_group("recover");
    group.sample_size(10);
    group.bench_function("full_recovery_n3", |b| {
        b.iter(|| recover(&samples).expect("recovery"));
    });
    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let samples = reference_samples();

    let mut group = c.benchmark_group("stages");
    group.sample_size(20);
    group.bench_function("pair_search_k12_k9", |b| {
        b.iter(|| stages::solve_k12_k9(&samples).expect("stage 1"));
    });
    group.bench_function("byte_search_k2", |b| {
        b.iter(|| stages::solve_k2(&samples, 0x84, 0x84).expect("stage 6"));
    });
    group.finish();
}

criterion_group!(benches, bench_recover, bench_stages);
criterion_main!(benches);
