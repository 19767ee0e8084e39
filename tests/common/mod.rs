//! Shared image fixtures for integration tests

// Not every test binary uses every fixture
#![allow(dead_code)]

use image::{ImageBuffer, Rgb};
use std::io::Cursor;

/// Encode an RGB image produced by `pixel` into PNG bytes
pub fn png_from_fn(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_fn(width, height, |x, y| Rgb(pixel(x, y)));
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, image::ImageFormat::Png)
        .unwrap_or_else(|_| unreachable!("in-memory PNG encoding cannot fail"));
    cursor.into_inner()
}

/// Uniform mid-gray PNG with zero contrast
pub fn uniform_gray_png(width: u32, height: u32) -> Vec<u8> {
    png_from_fn(width, height, |_, _| [128, 128, 128])
}

/// Black left half, white right half, split at the vertical midline
pub fn high_contrast_png(width: u32, height: u32) -> Vec<u8> {
    png_from_fn(width, height, move |x, _| {
        if x < width / 2 { [0, 0, 0] } else { [255, 255, 255] }
    })
}
