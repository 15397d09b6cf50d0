// ABOUTME: Windowed statistics extraction from the filtered composite acceleration
// ABOUTME: Splits the signal into fixed windows and reduces each to peak coefficient and dispersion
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-window statistics extraction.
//!
//! Partitions the filtered composite-acceleration signal into contiguous
//! windows of `chunk_size` samples and reduces each retained window to a
//! peak-based intensity coefficient and a sample standard deviation.
//!
//! The extractor keeps `floor(N / chunk_size) - 1` windows: the ragged tail
//! is excluded, and the last full window is dropped as well.
// TODO: the last-full-window drop is inherited from the reference pipeline
// and looks like an off-by-one; revisit if output compatibility is relaxed.

use rayon::prelude::*;
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::models::WindowStats;
use crate::physiological_constants::exertion;

/// Extracts per-window statistics from a filtered signal
#[derive(Debug, Clone)]
pub struct WindowStatsExtractor {
    chunk_size: usize,
}

impl WindowStatsExtractor {
    /// Create an extractor for the given window size.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `chunk_size` is below 2; the sample
    /// standard deviation is undefined on fewer than two samples.
    pub fn new(chunk_size: usize) -> AppResult<Self> {
        if chunk_size < 2 {
            return Err(AppError::config(format!(
                "chunk_size must be at least 2, got {chunk_size}"
            )));
        }
        Ok(Self { chunk_size })
    }

    /// Extract peak coefficients and dispersions from the signal.
    ///
    /// Windows are independent, so the reduction runs data-parallel.
    /// A signal too short to retain any window yields empty series.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidInput` if the signal contains non-finite
    /// samples.
    pub fn extract(&self, signal: &[f64]) -> AppResult<WindowStats> {
        if let Some(position) = signal.iter().position(|value| !value.is_finite()) {
            return Err(AppError::invalid_input(format!(
                "non-finite sample at index {position}"
            )));
        }

        let retained = (signal.len() / self.chunk_size).saturating_sub(1);
        if retained == 0 {
            debug!(
                samples = signal.len(),
                chunk_size = self.chunk_size,
                "signal too short to retain any window"
            );
            return Ok(WindowStats::default());
        }

        let (peak_coefficients, dispersions) = signal[..retained * self.chunk_size]
            .par_chunks_exact(self.chunk_size)
            .map(|window| {
                let max = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                (peak_coefficient(max), sample_std(window))
            })
            .unzip();

        debug!(windows = retained, "extracted window statistics");
        Ok(WindowStats {
            peak_coefficients,
            dispersions,
        })
    }
}

/// Peak-based intensity coefficient for a window.
///
/// Cubic growth above the acceleration threshold, flat floor below it:
/// `(max/10)^3 / 64` for `max >= 10`, else `1/64`. Continuous at the
/// threshold.
#[must_use]
pub fn peak_coefficient(max_value: f64) -> f64 {
    if max_value >= exertion::PEAK_THRESHOLD {
        (max_value / exertion::PEAK_THRESHOLD).powi(3) / exertion::PEAK_DIVISOR
    } else {
        1.0 / exertion::PEAK_DIVISOR
    }
}

/// Sample standard deviation (n - 1 divisor) of a window
fn sample_std(window: &[f64]) -> f64 {
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let sum_sq: f64 = window.iter().map(|value| (value - mean).powi(2)).sum();
    (sum_sq / (n - 1.0)).sqrt()
}
