use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use wu_archive::{crc32, encode_archive};
use wu_core::FileEntry;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len).map(|_| rng.gen()).collect()
}

fn bench_crc32(c: &mut Criterion) {
    let data_1k = random_bytes(1024);
    let data_1m = random_bytes(1024 * 1024);
    c.bench_function("crc32_1kb", |b| b.iter(|| black_box(crc32(black_box(&data_1k)))));
    c.bench_function("crc32_1mb", |b| b.iter(|| black_box(crc32(black_box(&data_1m)))));
}

fn bench_encode(c: &mut Criterion) {
    let small: Vec<FileEntry> = (0..5)
        .map(|i| FileEntry::new(format!("your-snippet/file-{i}.txt"), random_bytes(12 * 1024)))
        .collect();
    let many: Vec<FileEntry> = (0..1000)
        .map(|i| FileEntry::new(format!("dir/{i}.txt"), random_bytes(256)))
        .collect();
    c.bench_function("encode_5x12kb", |b| b.iter(|| black_box(encode_archive(black_box(&small)))));
    c.bench_function("encode_1000x256b", |b| b.iter(|| black_box(encode_archive(black_box(&many)))));
}

criterion_group!(benches, bench_crc32, bench_encode);
criterion_main!(benches);
