// ABOUTME: Sensor CSV ingestion, unit conversion, and low-pass filtering
// ABOUTME: Produces the filtered composite-acceleration signal consumed by the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Preprocessing of raw wearable recordings.
//!
//! Reads a CSV of raw accelerometer/gyroscope counts, converts them to
//! physical units, composes the magnitude signals, and applies a zero-phase
//! Butterworth low-pass (forward-backward biquad cascade) to produce the
//! filtered composite acceleration the engine consumes.

use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::FilterParams;
use crate::errors::{AppError, AppResult};

/// Raw accelerometer full-scale conversion: counts to m/s^2 (+/-16 g range,
/// 16-bit signed)
const ACCEL_COUNTS_TO_MS2: f64 = 9.8 * 16.0 / 32_768.0;

/// Raw gyroscope full-scale conversion: counts to deg/s (+/-2000 deg/s
/// range, 16-bit signed)
const GYRO_COUNTS_TO_DPS: f64 = 2_000.0 / 32_768.0;

/// Standard gravity in m/s^2, subtracted for the offset-adjusted column
const STANDARD_GRAVITY: f64 = 9.806_65;

/// One raw sensor row as recorded by the wearable
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawSensorRow {
    /// Accelerometer X axis, raw counts
    #[serde(rename = "Accel1X")]
    pub accel_x: f64,
    /// Accelerometer Y axis, raw counts
    #[serde(rename = "Accel1Y")]
    pub accel_y: f64,
    /// Accelerometer Z axis, raw counts
    #[serde(rename = "Accel1Z")]
    pub accel_z: f64,
    /// Gyroscope X axis, raw counts
    #[serde(rename = "Gyro1X")]
    pub gyro_x: f64,
    /// Gyroscope Y axis, raw counts
    #[serde(rename = "Gyro1Y")]
    pub gyro_y: f64,
    /// Gyroscope Z axis, raw counts
    #[serde(rename = "Gyro1Z")]
    pub gyro_z: f64,
}

/// The derived channels of a preprocessed recording
#[derive(Debug, Clone, Default)]
pub struct PreprocessedRecording {
    /// Composite acceleration magnitude, m/s^2
    pub composite_accel: Vec<f64>,
    /// Composite angular rate magnitude, deg/s
    pub composite_gyro: Vec<f64>,
    /// Low-pass filtered composite acceleration (engine input)
    pub filtered_accel: Vec<f64>,
    /// Filtered composite acceleration with standard gravity subtracted
    pub filtered_accel_minus_1g: Vec<f64>,
    /// Jerk: first difference of the filtered signal scaled by the
    /// sampling rate, zero-padded at the front
    pub jerk: Vec<f64>,
}

impl PreprocessedRecording {
    /// Number of samples in the recording
    #[must_use]
    pub fn len(&self) -> usize {
        self.filtered_accel.len()
    }

    /// Whether the recording holds no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filtered_accel.is_empty()
    }
}

/// Load a raw sensor CSV and preprocess it.
///
/// # Errors
///
/// Returns `AppError::Csv`/`AppError::Io` for unreadable input and
/// `AppError::InvalidInput` for an empty recording.
pub fn load_recording(
    path: impl AsRef<Path>,
    filter: &FilterParams,
) -> AppResult<PreprocessedRecording> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path.as_ref())?;

    let mut rows = Vec::new();
    for record in reader.deserialize::<RawSensorRow>() {
        rows.push(record?);
    }
    info!(rows = rows.len(), path = %path.as_ref().display(), "loaded sensor recording");
    preprocess(&rows, filter)
}

/// Convert raw rows to physical units and derive the filtered channels.
///
/// # Errors
///
/// Returns `AppError::InvalidInput` for an empty recording.
pub fn preprocess(rows: &[RawSensorRow], filter: &FilterParams) -> AppResult<PreprocessedRecording> {
    if rows.is_empty() {
        return Err(AppError::invalid_input("recording contains no rows"));
    }

    let composite_accel: Vec<f64> = rows
        .iter()
        .map(|row| {
            let x = row.accel_x * ACCEL_COUNTS_TO_MS2;
            let y = row.accel_y * ACCEL_COUNTS_TO_MS2;
            let z = row.accel_z * ACCEL_COUNTS_TO_MS2;
            (x * x + y * y + z * z).sqrt()
        })
        .collect();

    let composite_gyro: Vec<f64> = rows
        .iter()
        .map(|row| {
            let x = row.gyro_x * GYRO_COUNTS_TO_DPS;
            let y = row.gyro_y * GYRO_COUNTS_TO_DPS;
            let z = row.gyro_z * GYRO_COUNTS_TO_DPS;
            (x * x + y * y + z * z).sqrt()
        })
        .collect();

    let sections = butterworth_lowpass(filter.order, filter.cutoff_hz, filter.sampling_rate_hz)?;
    let filtered_accel = filtfilt(&sections, &composite_accel);

    let filtered_accel_minus_1g = filtered_accel
        .iter()
        .map(|value| value - STANDARD_GRAVITY)
        .collect();

    let mut jerk = Vec::with_capacity(filtered_accel.len());
    jerk.push(0.0);
    for pair in filtered_accel.windows(2) {
        jerk.push((pair[1] - pair[0]) * filter.sampling_rate_hz);
    }

    debug!(samples = filtered_accel.len(), "preprocessing complete");
    Ok(PreprocessedRecording {
        composite_accel,
        composite_gyro,
        filtered_accel,
        filtered_accel_minus_1g,
        jerk,
    })
}

/// One second-order IIR section (direct form II transposed)
#[derive(Debug, Clone, Copy)]
pub struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl Biquad {
    /// Filter a signal through this section.
    ///
    /// State is initialized to the steady-state response for the first
    /// sample, suppressing the DC startup transient.
    fn filter(&self, signal: &[f64]) -> Vec<f64> {
        let mut output = Vec::with_capacity(signal.len());
        let (mut z1, mut z2) = self.steady_state(signal.first().copied().unwrap_or(0.0));
        for &x in signal {
            let y = self.b0 * x + z1;
            z1 = self.b1 * x - self.a1 * y + z2;
            z2 = self.b2 * x - self.a2 * y;
            output.push(y);
        }
        output
    }

    /// Internal state holding the section at its steady-state output for a
    /// constant input `x`
    fn steady_state(&self, x: f64) -> (f64, f64) {
        let gain = (self.b0 + self.b1 + self.b2) / (1.0 + self.a1 + self.a2);
        let y = gain * x;
        let z2 = self.b2 * x - self.a2 * y;
        let z1 = (self.b1 + self.b2) * x - (self.a1 + self.a2) * y;
        (z1, z2)
    }
}

/// Design a Butterworth low-pass as a cascade of biquad sections.
///
/// Analog prototype poles are mapped through the bilinear transform with
/// frequency pre-warping; each conjugate pole pair yields one section with
/// damping `sin((2k + 1) * pi / (2 * order))`.
///
/// # Errors
///
/// Returns `AppError::Config` for an odd or zero order, or a cutoff outside
/// `(0, sampling_rate / 2)`.
pub fn butterworth_lowpass(
    order: usize,
    cutoff_hz: f64,
    sampling_rate_hz: f64,
) -> AppResult<Vec<Biquad>> {
    if order == 0 || order % 2 != 0 {
        return Err(AppError::config(format!(
            "Butterworth cascade requires a positive even order, got {order}"
        )));
    }
    if cutoff_hz <= 0.0 || cutoff_hz >= sampling_rate_hz / 2.0 {
        return Err(AppError::config(format!(
            "cutoff {cutoff_hz} Hz outside (0, {}) Hz",
            sampling_rate_hz / 2.0
        )));
    }

    let warped = (std::f64::consts::PI * cutoff_hz / sampling_rate_hz).tan();
    let sections = (0..order / 2)
        .map(|k| {
            let damping =
                ((2 * k + 1) as f64 * std::f64::consts::PI / (2.0 * order as f64)).sin();
            let norm = 1.0 / (1.0 + 2.0 * damping * warped + warped * warped);
            let b0 = warped * warped * norm;
            Biquad {
                b0,
                b1: 2.0 * b0,
                b2: b0,
                a1: 2.0 * (warped * warped - 1.0) * norm,
                a2: (1.0 - 2.0 * damping * warped + warped * warped) * norm,
            }
        })
        .collect();
    Ok(sections)
}

/// Zero-phase filtering: forward pass, reversed pass, both over an
/// odd-extended signal so the edges see a continuous slope.
#[must_use]
pub fn filtfilt(sections: &[Biquad], signal: &[f64]) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }

    // Matches the conventional pad length of three times the filter length.
    let pad = (3 * (2 * sections.len() + 1)).min(signal.len() - 1);
    let mut extended = Vec::with_capacity(signal.len() + 2 * pad);
    let first = signal[0];
    let last = signal[signal.len() - 1];
    for i in (1..=pad).rev() {
        extended.push(2.0 * first - signal[i]);
    }
    extended.extend_from_slice(signal);
    for i in 1..=pad {
        extended.push(2.0 * last - signal[signal.len() - 1 - i]);
    }

    let mut filtered = extended;
    for section in sections {
        filtered = section.filter(&filtered);
    }
    filtered.reverse();
    for section in sections {
        filtered = section.filter(&filtered);
    }
    filtered.reverse();

    filtered[pad..pad + signal.len()].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_sections() -> Vec<Biquad> {
        butterworth_lowpass(4, 10.0, 100.0).unwrap()
    }

    #[test]
    fn test_dc_passthrough() {
        let signal = vec![9.8; 400];
        let filtered = filtfilt(&default_sections(), &signal);
        assert_eq!(filtered.len(), signal.len());
        for value in filtered {
            assert!((value - 9.8).abs() < 1e-9);
        }
    }

    #[test]
    fn test_attenuates_high_frequency() {
        // 40 Hz tone at 100 Hz sampling, cutoff 10 Hz: the 4th-order
        // zero-phase response should crush it by orders of magnitude.
        let signal: Vec<f64> = (0..500)
            .map(|i| (2.0 * std::f64::consts::PI * 40.0 * i as f64 / 100.0).sin())
            .collect();
        let filtered = filtfilt(&default_sections(), &signal);
        let peak = filtered[100..400]
            .iter()
            .fold(0.0f64, |acc, v| acc.max(v.abs()));
        assert!(peak < 1e-3, "peak {peak} too large");
    }

    #[test]
    fn test_passes_low_frequency() {
        // 1 Hz tone is well inside the passband.
        let signal: Vec<f64> = (0..1000)
            .map(|i| (2.0 * std::f64::consts::PI * 1.0 * i as f64 / 100.0).sin())
            .collect();
        let filtered = filtfilt(&default_sections(), &signal);
        let peak = filtered[200..800]
            .iter()
            .fold(0.0f64, |acc, v| acc.max(v.abs()));
        assert!(peak > 0.95, "peak {peak} attenuated");
    }

    #[test]
    fn test_rejects_odd_order() {
        assert!(butterworth_lowpass(3, 10.0, 100.0).is_err());
    }

    #[test]
    fn test_unit_conversion_and_channels() {
        // Pure 1 g on the Z axis in raw counts: 9.8 * 16 / 32768 per count,
        // so 2048 counts is 9.8 m/s^2.
        let rows = vec![
            RawSensorRow {
                accel_x: 0.0,
                accel_y: 0.0,
                accel_z: 2048.0,
                gyro_x: 0.0,
                gyro_y: 0.0,
                gyro_z: 16_384.0,
            };
            64
        ];
        let recording = preprocess(&rows, &FilterParams::default()).unwrap();
        assert_eq!(recording.len(), 64);
        assert!((recording.composite_accel[0] - 9.8).abs() < 1e-9);
        // 16384 counts at 2000/32768 deg/s per count = 1000 deg/s
        assert!((recording.composite_gyro[0] - 1000.0).abs() < 1e-9);
        // Constant input passes the filter unchanged
        assert!((recording.filtered_accel[32] - 9.8).abs() < 1e-6);
        assert!((recording.filtered_accel_minus_1g[32] - (9.8 - 9.806_65)).abs() < 1e-6);
        // Jerk of a constant signal is zero, with the zero front pad
        assert!(recording.jerk[0].abs() < 1e-12);
        assert!(recording.jerk[32].abs() < 1e-6);
    }

    #[test]
    fn test_rejects_empty_recording() {
        assert!(preprocess(&[], &FilterParams::default()).is_err());
    }
}
