use criterion::{black_box, criterion_group, criterion_main, Criterion};
use physalia_seq::{
    assemble, count_mismatches, trim_both, MergeConfig, SeqKind, SeqRecord, TrimConfig,
};

fn random_dna(len: usize, seed: u64) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut state = seed;
    for _ in 0..len {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        seq.push(bases[((state >> 33) % 4) as usize]);
    }
    seq
}

fn random_qual(len: usize, seed: u64) -> Vec<u8> {
    let mut qual = Vec::with_capacity(len);
    let mut state = seed;
    for _ in 0..len {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        qual.push(33 + ((state >> 33) % 41) as u8);
    }
    qual
}

/// A read pair sharing `overlap` bases of a common fragment.
fn overlapping_pair(read_len: usize, overlap: usize) -> (SeqRecord, SeqRecord) {
    let fragment = random_dna(2 * read_len - overlap, 42);
    let r1 = SeqRecord::without_quality(None, SeqKind::Dna, fragment[..read_len].to_vec());
    let r2 = SeqRecord::without_quality(
        None,
        SeqKind::Dna,
        fragment[read_len - overlap..].to_vec(),
    );
    (r1, r2)
}

fn bench_count_mismatches(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_mismatches");

    let s1 = random_dna(10_000, 7);
    let s2 = random_dna(10_000, 11);
    group.bench_function("10kb_10pct_budget", |b| {
        b.iter(|| {
            count_mismatches(
                black_box(&s1),
                black_box(&s2),
                0,
                0,
                s1.len(),
                s1.len() / 10,
            )
        })
    });

    let identical = random_dna(10_000, 13);
    group.bench_function("10kb_exact", |b| {
        b.iter(|| {
            count_mismatches(
                black_box(&identical),
                black_box(&identical),
                0,
                0,
                identical.len(),
                0,
            )
        })
    });

    group.finish();
}

fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");

    let (r1, r2) = overlapping_pair(150, 60);
    let config = MergeConfig {
        overlap_min: 10,
        ..MergeConfig::default()
    };
    group.bench_function("150bp_60bp_overlap", |b| {
        b.iter(|| assemble(black_box(&r1), black_box(&r2), &config))
    });

    let miss1 = SeqRecord::without_quality(None, SeqKind::Dna, random_dna(150, 17));
    let miss2 = SeqRecord::without_quality(None, SeqKind::Dna, random_dna(150, 19));
    group.bench_function("150bp_no_overlap", |b| {
        b.iter(|| assemble(black_box(&miss1), black_box(&miss2), &config))
    });

    group.finish();
}

fn bench_trim(c: &mut Criterion) {
    let mut group = c.benchmark_group("trim");

    let record = SeqRecord::new(
        None,
        SeqKind::Dna,
        random_dna(10_000, 23),
        Some(random_qual(10_000, 29)),
    )
    .unwrap();
    let config = TrimConfig::default();
    group.bench_function("10kb_both_ends", |b| {
        b.iter(|| trim_both(black_box(&record), &config))
    });

    group.finish();
}

criterion_group!(benches, bench_count_mismatches, bench_assemble, bench_trim);
criterion_main!(benches);
