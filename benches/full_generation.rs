//! Performance measurement for the complete generation pipeline

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use edgemaze::algorithm::executor::{GenerationRequest, Pipeline};
use edgemaze::io::store::ImageStore;
use image::{ImageBuffer, Rgb};
use std::hint::black_box;
use std::io::Cursor;
use std::sync::Arc;

fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
        let value = ((x * 255 / width.max(1)) ^ (y * 255 / height.max(1))) as u8;
        Rgb([value, value, value])
    });
    let mut cursor = Cursor::new(Vec::new());
    if img.write_to(&mut cursor, image::ImageFormat::Png).is_err() {
        return Vec::new();
    }
    cursor.into_inner()
}

/// Measures end-to-end generation at the default 50x50 size
fn bench_generate_default_size(c: &mut Criterion) {
    let store = Arc::new(ImageStore::new());
    let handle = store.store(gradient_png(128, 128), "bench.png");
    let pipeline = Pipeline::new(store);
    let request = GenerationRequest {
        handle,
        width: 50,
        height: 50,
    };

    c.bench_function("generate_50x50", |b| {
        b.iter(|| {
            let result = pipeline.generate(black_box(&request), 42);
            black_box(result).ok();
        });
    });
}

/// Measures generation at the admission ceiling of 10000 cells
fn bench_generate_max_size(c: &mut Criterion) {
    let store = Arc::new(ImageStore::new());
    let handle = store.store(gradient_png(128, 128), "bench.png");
    let pipeline = Pipeline::new(store);
    let request = GenerationRequest {
        handle,
        width: 100,
        height: 100,
    };

    c.bench_function("generate_100x100", |b| {
        b.iter(|| {
            let result = pipeline.generate(black_box(&request), 42);
            black_box(result).ok();
        });
    });
}

criterion_group!(
    benches,
    bench_generate_default_size,
    bench_generate_max_size
);
criterion_main!(benches);
