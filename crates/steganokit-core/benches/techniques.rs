use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use steganokit_core::{PixelBuffer, SteganoCore, Technique};

fn carrier() -> PixelBuffer {
    PixelBuffer::from_fn(256, 256, |x, y| {
        let blue = if (x + 2 * y) % 4 == 0 { 100 + x % 5 } else { 100 };
        [(x * 7 + y * 3) as u8, (x * 5 + y * 11) as u8, blue as u8, 255]
    })
}

pub fn technique_hiding(c: &mut Criterion) {
    let mut group = c.benchmark_group("Hide 'Hello World!'");
    for technique in Technique::all() {
        group.bench_with_input(BenchmarkId::from_parameter(technique), &technique, |b, t| {
            b.iter_batched_ref(
                carrier,
                |pixels| {
                    SteganoCore::hide_text(pixels, "Hello World!", t)
                        .expect("Cannot hide secret message")
                },
                criterion::BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

pub fn technique_unveiling(c: &mut Criterion) {
    let mut group = c.benchmark_group("Unveil 'Hello World!'");
    for technique in Technique::all() {
        let mut pixels = carrier();
        SteganoCore::hide_text(&mut pixels, "Hello World!", &technique)
            .expect("Cannot hide secret message");

        group.bench_with_input(BenchmarkId::from_parameter(technique), &pixels, |b, pixels| {
            b.iter(|| SteganoCore::unveil(pixels, &technique))
        });
    }
    group.finish();
}

criterion_group!(benches, technique_hiding, technique_unveiling);
criterion_main!(benches);
