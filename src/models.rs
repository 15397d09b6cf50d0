// ABOUTME: Domain types for the fatigue analysis pipeline
// ABOUTME: Biometric profile, per-window statistics, and simulation output bundles
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain models shared across the pipeline stages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Biometric parameters of the wearer, immutable inputs to the energy model
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PersonalProfile {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in meters
    pub height_m: f64,
    /// Age in years
    pub age_years: u32,
}

impl Default for PersonalProfile {
    fn default() -> Self {
        Self {
            weight_kg: 70.0,
            height_m: 1.78,
            age_years: 25,
        }
    }
}

impl PersonalProfile {
    /// Validate biometric parameters.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for non-positive weight or height.
    pub fn validate(&self) -> AppResult<()> {
        if self.weight_kg <= 0.0 || !self.weight_kg.is_finite() {
            return Err(AppError::config(format!(
                "weight_kg must be positive, got {}",
                self.weight_kg
            )));
        }
        if self.height_m <= 0.0 || !self.height_m.is_finite() {
            return Err(AppError::config(format!(
                "height_m must be positive, got {}",
                self.height_m
            )));
        }
        Ok(())
    }
}

/// Per-window statistics extracted from the filtered composite acceleration.
///
/// The two series are index-aligned: entry `i` describes window `i` of the
/// recording (after the trailing-window drop, see `window_stats`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WindowStats {
    /// Peak-based intensity coefficient per window
    pub peak_coefficients: Vec<f64>,
    /// Sample standard deviation per window
    pub dispersions: Vec<f64>,
}

impl WindowStats {
    /// Number of retained windows
    #[must_use]
    pub fn len(&self) -> usize {
        self.dispersions.len()
    }

    /// Whether no windows were retained
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dispersions.is_empty()
    }
}

/// The four index-aligned output series of the fatigue simulation.
///
/// One entry per retained window; `hp` and `ceiling` are percentages of
/// initial capacity, `hp` clamped to [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueSeries {
    /// Remaining energy reserve as percent of initial capacity
    pub hp: Vec<f64>,
    /// Capacity ceiling as percent of initial capacity
    pub ceiling: Vec<f64>,
    /// Recovery applied per step after the duration-dependent decay
    pub decayed_heal: Vec<f64>,
    /// Exercise intensity (dispersion x peak coefficient), unclamped
    pub intensity: Vec<f64>,
}

/// Scalar summaries of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatigueSummary {
    /// Final HP percentage, rounded to the nearest integer
    pub final_hp_percent: i64,
    /// Total estimated energy expenditure in kcal
    pub estimated_kcal: f64,
    /// First window index of the detected exercise run, if any
    pub onset_index: Option<usize>,
}

/// Full analysis report written by the CLI for downstream visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Report generation timestamp
    pub generated_at: DateTime<Utc>,
    /// Wearer biometrics used for the run
    pub profile: PersonalProfile,
    /// Scalar summaries
    pub summary: FatigueSummary,
    /// Index-aligned output series
    pub series: FatigueSeries,
}
