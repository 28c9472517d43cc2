//! Benchmarks of pattern density computation over windows and full intervals.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use motifprofile::{prelude::*, test_utilities::random_nucleotides};

const CHROM_LENGTH: usize = 1_000_000;

fn bench_window_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("window density");
    let pattern = Pattern::new("CG").expect("invalid pattern");

    for width in [100, 1_000, 10_000] {
        let seq = random_nucleotides(width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &seq, |b, seq| {
            b.iter(|| pattern.density(seq))
        });
    }
    group.finish();
}

fn bench_profile_interval(c: &mut Criterion) {
    let mut group = c.benchmark_group("profile interval");

    let seq = String::from_utf8(random_nucleotides(CHROM_LENGTH)).expect("invalid sequence");
    let sequences = NucleotideSequences::from_sequences(vec![("chr1".to_string(), seq)])
        .expect("could not build sequences");
    let seqlens = sequences.seqlens();
    let config = ProfileConfig::new("CG", 10_000, 100).expect("invalid configuration");
    let processor = CoordinateProcessor::new(&config, &seqlens, &sequences);
    let records = vec![CoordinateRecord::new("chr1", 500_000, Strand::Forward)];

    group.bench_function("in-memory 10kb interval", |b| {
        b.iter(|| {
            let mut windows = 0;
            processor
                .run(records.iter().cloned().map(Ok), |_| {
                    windows += 1;
                    Ok(())
                })
                .expect("profile failed");
            windows
        })
    });
    group.finish();
}

criterion_group!(benches, bench_window_density, bench_profile_interval);
criterion_main!(benches);
