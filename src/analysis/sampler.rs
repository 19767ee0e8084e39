//! Image decoding and brightness-plane resampling
//!
//! Decodes raw bytes with the `image` crate, then resamples to the maze
//! resolution with bilinear interpolation and collapses each sample to an
//! integer luminance value.

use ndarray::{Array2, Array3};
use tracing::{debug, warn};

use crate::io::configuration::LOW_CONTRAST_WARNING_RANGE;
use crate::io::error::{MazeError, Result};
use crate::math::interpolation::{bilinear_channel, source_position};

/// Rectangular plane of luminance values at maze resolution
#[derive(Debug, Clone)]
pub struct BrightnessGrid {
    data: Array2<u8>,
}

impl BrightnessGrid {
    /// Build a grid from a row-major luminance vector
    ///
    /// # Errors
    ///
    /// Returns `ResourceExhausted` if the vector length does not match
    /// the dimensions.
    pub fn from_vec(values: Vec<u8>, width: usize, height: usize) -> Result<Self> {
        let data = Array2::from_shape_vec((height, width), values).map_err(|_| {
            MazeError::ResourceExhausted {
                operation: "brightness grid shaping",
            }
        })?;
        Ok(Self { data })
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Luminance at (x, y), or `None` out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.data.get((y, x)).copied()
    }

    /// Minimum, maximum, and mean luminance across the grid
    pub fn brightness_summary(&self) -> (u8, u8, f64) {
        let mut min = u8::MAX;
        let mut max = u8::MIN;
        let mut total = 0u64;
        for &value in &self.data {
            min = min.min(value);
            max = max.max(value);
            total += u64::from(value);
        }
        if self.data.is_empty() {
            return (0, 0, 0.0);
        }
        (min, max, total as f64 / self.data.len() as f64)
    }
}

/// Decode raw bytes and resample to a brightness grid of exactly (width, height)
///
/// # Errors
///
/// Returns `Decode` if the bytes are not a supported raster format, or
/// `ResourceExhausted` if an intermediate buffer cannot be allocated.
pub fn sample(bytes: &[u8], width: usize, height: usize) -> Result<BrightnessGrid> {
    let raster = decode_to_raster(bytes)?;
    let grid = resample(&raster, width, height)?;

    let (min, max, mean) = grid.brightness_summary();
    let contrast = i32::from(max) - i32::from(min);
    debug!(min, max, mean, contrast, "sampled brightness grid");
    if contrast < LOW_CONTRAST_WARNING_RANGE {
        warn!(contrast, "low contrast range, few detectable edges likely");
    }

    Ok(grid)
}

// Decoded pixels as a row-major (height, width, channel) array; the
// decoder's own buffers die with this scope.
fn decode_to_raster(bytes: &[u8]) -> Result<Array3<u8>> {
    let decoded = image::load_from_memory(bytes).map_err(|e| MazeError::Decode { source: e })?;
    let rgb = decoded.to_rgb8();
    debug!(
        source_width = rgb.width(),
        source_height = rgb.height(),
        "decoded source image"
    );

    let (width, height) = rgb.dimensions();
    let len = height as usize * width as usize * 3;

    let mut backing = Vec::new();
    backing
        .try_reserve_exact(len)
        .map_err(|_| MazeError::ResourceExhausted {
            operation: "source raster allocation",
        })?;
    for pixel in rgb.pixels() {
        backing.extend_from_slice(&pixel.0);
    }

    Array3::from_shape_vec((height as usize, width as usize, 3), backing).map_err(|_| {
        MazeError::ResourceExhausted {
            operation: "source raster shaping",
        }
    })
}

fn resample(raster: &Array3<u8>, width: usize, height: usize) -> Result<BrightnessGrid> {
    let (source_height, source_width, _) = raster.dim();

    let mut backing = Vec::new();
    backing
        .try_reserve_exact(width * height)
        .map_err(|_| MazeError::ResourceExhausted {
            operation: "brightness grid allocation",
        })?;

    for y in 0..height {
        let sy = source_position(y, height, source_height);
        for x in 0..width {
            let sx = source_position(x, width, source_width);
            let r = bilinear_channel(raster, 0, sx, sy);
            let g = bilinear_channel(raster, 1, sx, sy);
            let b = bilinear_channel(raster, 2, sx, sy);
            backing.push(luminance(r, g, b));
        }
    }

    BrightnessGrid::from_vec(backing, width, height)
}

// ITU-R BT.601 luma weights, truncated to an integer
fn luminance(r: f64, g: f64, b: f64) -> u8 {
    let value = 0.299_f64.mul_add(r, 0.587_f64.mul_add(g, 0.114 * b));
    value.clamp(0.0, 255.0) as u8
}
