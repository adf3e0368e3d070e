use criterion::{black_box, criterion_group, criterion_main, Criterion};
use steganokit_core::media::transform::{forward_dct, inverse_dct, Block};

pub fn dct_round_trip(c: &mut Criterion) {
    let mut block: Block = [[0.0; 8]; 8];
    for (row, samples) in block.iter_mut().enumerate() {
        for (col, sample) in samples.iter_mut().enumerate() {
            *sample = ((row * 31 + col * 17) % 256) as f64;
        }
    }

    c.bench_function("Forward DCT 8x8", |b| {
        b.iter(|| forward_dct(black_box(&block)))
    });

    let coefficients = forward_dct(&block);
    c.bench_function("Inverse DCT 8x8", |b| {
        b.iter(|| inverse_dct(black_box(&coefficients)))
    });
}

criterion_group!(benches, dct_round_trip);
criterion_main!(benches);
