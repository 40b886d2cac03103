use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use optalign_core::{
    traceback, AlignmentMatrix, Costs, GlobalAligner, Mode, ScoreScheme, TracebackParams,
};

fn generate_test_sequence(length: usize, pattern: &str) -> String {
    pattern.chars().cycle().take(length).collect()
}

fn bench_matrix_fill(c: &mut Criterion) {
    let seq1 = generate_test_sequence(1000, "ATCGATCG");
    let seq2 = generate_test_sequence(1000, "ATCCATGG");
    let scheme = ScoreScheme::edit_distance();

    c.bench_function("matrix_1kb", |b| {
        b.iter(|| black_box(AlignmentMatrix::build(black_box(&seq1), black_box(&seq2), &scheme)))
    });
}

fn bench_traceback_single_path(c: &mut Criterion) {
    let seq = generate_test_sequence(1000, "ATCGATCG");
    let matrix = AlignmentMatrix::build(&seq, &seq, &ScoreScheme::edit_distance());

    c.bench_function("traceback_identical_1kb", |b| {
        b.iter(|| black_box(traceback(&matrix, None, &TracebackParams::default())))
    });
}

fn bench_tied_enumeration(c: &mut Criterion) {
    // Free moves: every lattice path is optimal, path count grows fast.
    let scheme = ScoreScheme::new(Costs::new(0.0, 0.0, 0.0, 0.0), Mode::Minimize);
    let mut group = c.benchmark_group("tied_traceback");

    for n in [4usize, 6, 8] {
        let seq = generate_test_sequence(n, "ab");
        let matrix = AlignmentMatrix::build(&seq, &seq, &scheme);
        group.bench_with_input(BenchmarkId::from_parameter(n), &matrix, |b, matrix| {
            b.iter(|| black_box(traceback(matrix, None, &TracebackParams::unbounded())))
        });
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let scheme = ScoreScheme::new(Costs::new(20.0, -1.0, -1.0, -1.0), Mode::Maximize);
    let aligner = GlobalAligner::new(scheme);
    let seq1 = generate_test_sequence(200, "vintners");
    let seq2 = generate_test_sequence(200, "writers");

    c.bench_function("pipeline_200", |b| {
        b.iter(|| black_box(aligner.align(black_box(&seq1), black_box(&seq2))))
    });
}

criterion_group!(
    benches,
    bench_matrix_fill,
    bench_traceback_single_path,
    bench_tied_enumeration,
    bench_full_pipeline
);
criterion_main!(benches);
