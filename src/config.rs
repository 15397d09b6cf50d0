// ABOUTME: Configuration-driven parameters for the fatigue analysis pipeline replacing magic numbers
// ABOUTME: Provides type-safe, environment-configurable settings with documented defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed configuration for every pipeline stage.
//!
//! All tunable values live here as explicit, documented fields with
//! reference defaults; there is no module-level mutable state. Values may
//! be overridden via `FATIGUE_*` environment variables or the CLI.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::PersonalProfile;

/// Windowing, smoothing and simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Samples per statistics window (100 samples = 1 second at 100 Hz)
    pub chunk_size: usize,

    /// Moving-average window applied to both per-window series
    pub smoothing_window: usize,

    /// Dispersion value above which a window counts toward exercise onset
    pub exercise_threshold: f64,

    /// Consecutive above-threshold windows required to declare onset
    pub consecutive_count_required: usize,

    /// Initial energy reserve ("HP") and capacity ceiling
    pub initial_hp: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            chunk_size: 100,
            smoothing_window: 15,
            exercise_threshold: 3.0,
            consecutive_count_required: 15,
            initial_hp: 100.0,
        }
    }
}

/// Low-pass filter parameters for the preprocessing stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterParams {
    /// Butterworth filter order
    pub order: usize,

    /// Cutoff frequency in Hz
    pub cutoff_hz: f64,

    /// Sensor sampling rate in Hz
    pub sampling_rate_hz: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            order: 4,
            cutoff_hz: 10.0,
            sampling_rate_hz: 100.0,
        }
    }
}

/// Top-level configuration for an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueConfig {
    /// Windowing and simulation parameters
    pub analysis: AnalysisParams,

    /// Preprocessing filter parameters
    pub filter: FilterParams,

    /// Biometric parameters of the wearer
    pub profile: PersonalProfile,

    /// Path of the input sensor recording (CSV)
    pub data_file: String,

    /// Path of the output analysis report (JSON)
    pub output_file: String,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisParams::default(),
            filter: FilterParams::default(),
            profile: PersonalProfile::default(),
            data_file: "test_data.csv".into(),
            output_file: "fatigue_analysis.json".into(),
        }
    }
}

impl FatigueConfig {
    /// Build the default configuration with `FATIGUE_*` environment overrides.
    ///
    /// Recognized variables: `FATIGUE_CHUNK_SIZE`, `FATIGUE_SMOOTHING_WINDOW`,
    /// `FATIGUE_EXERCISE_THRESHOLD`, `FATIGUE_CONSECUTIVE_COUNT`,
    /// `FATIGUE_INITIAL_HP`, `FATIGUE_WEIGHT_KG`, `FATIGUE_HEIGHT_M`,
    /// `FATIGUE_AGE_YEARS`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a set variable fails to parse or the
    /// resulting configuration fails validation.
    pub fn from_environment() -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(value) = parse_env::<usize>("FATIGUE_CHUNK_SIZE")? {
            config.analysis.chunk_size = value;
        }
        if let Some(value) = parse_env::<usize>("FATIGUE_SMOOTHING_WINDOW")? {
            config.analysis.smoothing_window = value;
        }
        if let Some(value) = parse_env::<f64>("FATIGUE_EXERCISE_THRESHOLD")? {
            config.analysis.exercise_threshold = value;
        }
        if let Some(value) = parse_env::<usize>("FATIGUE_CONSECUTIVE_COUNT")? {
            config.analysis.consecutive_count_required = value;
        }
        if let Some(value) = parse_env::<f64>("FATIGUE_INITIAL_HP")? {
            config.analysis.initial_hp = value;
        }
        if let Some(value) = parse_env::<f64>("FATIGUE_WEIGHT_KG")? {
            config.profile.weight_kg = value;
        }
        if let Some(value) = parse_env::<f64>("FATIGUE_HEIGHT_M")? {
            config.profile.height_m = value;
        }
        if let Some(value) = parse_env::<u32>("FATIGUE_AGE_YEARS")? {
            config.profile.age_years = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` naming the offending field.
    pub fn validate(&self) -> AppResult<()> {
        if self.analysis.chunk_size < 2 {
            return Err(AppError::config(format!(
                "chunk_size must be at least 2 (standard deviation needs two samples), got {}",
                self.analysis.chunk_size
            )));
        }
        if self.analysis.smoothing_window == 0 {
            return Err(AppError::config("smoothing_window must be positive"));
        }
        if self.analysis.consecutive_count_required == 0 {
            return Err(AppError::config("consecutive_count_required must be positive"));
        }
        if self.analysis.exercise_threshold < 0.0 {
            return Err(AppError::config(format!(
                "exercise_threshold must be non-negative, got {}",
                self.analysis.exercise_threshold
            )));
        }
        if self.analysis.initial_hp <= 0.0 {
            return Err(AppError::config(format!(
                "initial_hp must be positive, got {}",
                self.analysis.initial_hp
            )));
        }
        if self.filter.order == 0 || self.filter.order % 2 != 0 {
            return Err(AppError::config(format!(
                "filter order must be a positive even number, got {}",
                self.filter.order
            )));
        }
        if self.filter.sampling_rate_hz <= 0.0 {
            return Err(AppError::config(format!(
                "sampling_rate_hz must be positive, got {}",
                self.filter.sampling_rate_hz
            )));
        }
        if self.filter.cutoff_hz <= 0.0 || self.filter.cutoff_hz >= self.filter.sampling_rate_hz / 2.0 {
            return Err(AppError::config(format!(
                "cutoff_hz must lie in (0, sampling_rate/2), got {}",
                self.filter.cutoff_hz
            )));
        }
        self.profile.validate()
    }
}

/// Parse an optional environment variable, mapping parse failures to config errors
fn parse_env<T: FromStr>(name: &str) -> AppResult<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::config(format!("cannot parse {name}={raw}"))),
        Err(_) => Ok(None),
    }
}
