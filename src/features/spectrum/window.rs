//! Window functions

use std::f64::consts::PI;

/// Symmetric Hann window of `size` points
///
/// `w[j] = 0.5 * (1 - cos(2πj / (size - 1)))`. Both endpoints are zero.
/// A single-point window is `[1.0]`.
pub fn hann(size: usize) -> Vec<f32> {
    if size < 2 {
        return vec![1.0; size];
    }

    let denom = (size - 1) as f64;
    (0..size)
        .map(|j| (0.5 * (1.0 - (2.0 * PI * j as f64 / denom).cos())) as f32)
        .collect()
}

/// Blackman taper evaluated at `t ∈ [-1, 1]` (centre at 0), zero outside
///
/// Used to truncate the resampler's sinc kernel.
#[inline]
pub fn blackman(t: f64) -> f64 {
    if t.abs() >= 1.0 {
        return 0.0;
    }
    let x = PI * (t + 1.0);
    0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos()
}
