//! Bilinear interpolation for raster resampling
//!
//! Resampling maps each target index onto a fractional source position with
//! endpoints pinned to endpoints, then blends the four surrounding source
//! samples.

use ndarray::Array3;

/// Fractional source position for a target index
///
/// Maps `0` to `0.0` and `target_len - 1` to `source_len - 1`; a
/// single-sample target axis collapses to the source origin.
pub fn source_position(target_index: usize, target_len: usize, source_len: usize) -> f64 {
    if target_len <= 1 || source_len <= 1 {
        return 0.0;
    }
    target_index as f64 * (source_len - 1) as f64 / (target_len - 1) as f64
}

/// Bilinearly sample one channel of a `(height, width, channels)` raster
///
/// Source positions are clamped to the raster bounds, so querying exactly
/// on the last row or column degenerates to linear interpolation along the
/// remaining axis.
pub fn bilinear_channel(raster: &Array3<u8>, channel: usize, sx: f64, sy: f64) -> f64 {
    let (height, width, _) = raster.dim();
    if height == 0 || width == 0 {
        return 0.0;
    }

    let max_x = (width - 1) as f64;
    let max_y = (height - 1) as f64;
    let sx = sx.clamp(0.0, max_x);
    let sy = sy.clamp(0.0, max_y);

    let x0 = sx.floor() as usize;
    let y0 = sy.floor() as usize;
    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);

    let fx = sx - x0 as f64;
    let fy = sy - y0 as f64;

    let sample = |y: usize, x: usize| -> f64 {
        raster.get((y, x, channel)).copied().map_or(0.0, f64::from)
    };

    let top = sample(y0, x0).mul_add(1.0 - fx, sample(y0, x1) * fx);
    let bottom = sample(y1, x0).mul_add(1.0 - fx, sample(y1, x1) * fx);

    top.mul_add(1.0 - fy, bottom * fy)
}
