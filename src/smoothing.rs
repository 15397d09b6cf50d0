// ABOUTME: Edge-corrected centered moving average for per-window statistic series
// ABOUTME: Same-length uniform smoothing with explicit boundary weight compensation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Edge-corrected moving average.
//!
//! A centered uniform moving average computed with "same" convolution
//! semantics (out-of-range positions contribute zero), followed by a
//! boundary rescale that compensates for the kernel's partial overlap near
//! the edges. Without the rescale, zero padding biases edge values toward
//! zero; with it, a constant input passes through unchanged.
//!
//! The left and right corrections are asymmetric: with `n = ceil(S/2)`,
//! index `0` is rescaled by `S/n`, index `i` by `S/(i + n)`, and index
//! `M - i` by `S/(i + n - (S mod 2))` for `i` in `1..n`.

use crate::errors::{AppError, AppResult};

/// Smooth a series with an edge-corrected moving average of width `size`.
///
/// # Errors
///
/// Returns `AppError::InvalidInput` if `size` is zero or the series is
/// shorter than the smoothing window (the boundary corrections would
/// overlap and double-scale interior values).
pub fn smooth(series: &[f64], size: usize) -> AppResult<Vec<f64>> {
    if size == 0 {
        return Err(AppError::invalid_input("smoothing window must be positive"));
    }
    let len = series.len();
    if len < size {
        return Err(AppError::invalid_input(format!(
            "series of length {len} is shorter than smoothing window {size}"
        )));
    }

    let width = size as f64;
    // Centered kernel offset for "same" convolution: output index i averages
    // input indices [i + c - size + 1, i + c], clipped to the series.
    let center = (size - 1) / 2;

    let mut prefix = Vec::with_capacity(len + 1);
    prefix.push(0.0);
    for value in series {
        prefix.push(prefix[prefix.len() - 1] + value);
    }

    let mut smoothed = Vec::with_capacity(len);
    for i in 0..len {
        let hi = (i + center).min(len - 1);
        let lo = (i + center + 1).saturating_sub(size);
        smoothed.push((prefix[hi + 1] - prefix[lo]) / width);
    }

    // Boundary weight compensation
    let n = size.div_ceil(2);
    let parity = size % 2;
    smoothed[0] *= width / n as f64;
    for i in 1..n {
        smoothed[i] *= width / (i + n) as f64;
        smoothed[len - i] *= width / (i + n - parity) as f64;
    }

    Ok(smoothed)
}
