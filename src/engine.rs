// ABOUTME: Stateful fatigue recurrence producing HP, capacity ceiling, heal, and intensity series
// ABOUTME: Sequential fold over smoothed window statistics with duration-dependent multipliers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The fatigue simulation engine.
//!
//! A causal, history-dependent recurrence over the smoothed window series:
//! each step depends on the previous HP and ceiling plus the trailing runs
//! of exercise and recovery, so the fold is strictly sequential. The
//! trailing runs are tracked with amortized O(1) counters (reset on miss,
//! incremented on hit) instead of rescanning the growing history each step.
//!
//! Steps at or before the detected onset (or every step when no onset was
//! found) are baseline: HP and ceiling are pinned to initial capacity and
//! the histories record zero heal.

use tracing::{debug, info};

use crate::config::AnalysisParams;
use crate::energy;
use crate::errors::{AppError, AppResult};
use crate::models::{FatigueSeries, FatigueSummary, PersonalProfile, WindowStats};
use crate::onset::ExerciseOnsetDetector;
use crate::physiological_constants::{capacity, recovery};
use crate::smoothing;
use crate::window_stats::WindowStatsExtractor;

/// Classification of one recurrence step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPhase {
    /// At or before the exercise onset: HP pinned to initial capacity
    Baseline,
    /// After the onset: expenditure and recovery dynamics apply
    Active,
}

/// Amortized counter for the trailing run of values above a threshold.
///
/// Functionally identical to scanning the recorded history backward, but
/// O(1) per step.
#[derive(Debug, Clone, Copy, Default)]
struct TrailingRun {
    count: usize,
}

impl TrailingRun {
    /// Trailing run length converted to minutes (one entry per second)
    fn minutes(self) -> f64 {
        self.count as f64 / 60.0
    }

    /// Record the next history entry
    fn record(&mut self, hit: bool) {
        if hit {
            self.count += 1;
        } else {
            self.count = 0;
        }
    }
}

/// The stateful fatigue recurrence
#[derive(Debug, Clone)]
pub struct FatigueEngine {
    params: AnalysisParams,
    basal_rate: f64,
}

impl FatigueEngine {
    /// Create an engine for the given parameters and basal energy rate
    #[must_use]
    pub const fn new(params: AnalysisParams, basal_rate: f64) -> Self {
        Self { params, basal_rate }
    }

    /// Classify a step relative to the detected onset
    #[must_use]
    pub fn classify(onset: Option<usize>, index: usize) -> StepPhase {
        match onset {
            Some(start) if index > start => StepPhase::Active,
            _ => StepPhase::Baseline,
        }
    }

    /// Run the recurrence over smoothed window statistics.
    ///
    /// Inputs are assumed validated and equal-length (the upstream stages
    /// fail fast); only the alignment of the two series is re-checked since
    /// the recurrence indexes them in lockstep.
    ///
    /// # Errors
    ///
    /// Returns `AppError::SeriesLengthMismatch` for misaligned inputs,
    /// `AppError::InvalidInput` for an empty series, and
    /// `AppError::Internal` if the recurrence produces a non-finite value
    /// (a defect to surface, never to clamp away).
    pub fn simulate(
        &self,
        stats: &WindowStats,
        onset: Option<usize>,
    ) -> AppResult<(FatigueSeries, FatigueSummary)> {
        let len = stats.dispersions.len();
        if stats.peak_coefficients.len() != len {
            return Err(AppError::length_mismatch(format!(
                "{} peak coefficients vs {len} dispersions",
                stats.peak_coefficients.len()
            )));
        }
        if len == 0 {
            return Err(AppError::invalid_input(
                "cannot simulate over an empty window series",
            ));
        }

        let initial = self.params.initial_hp;
        let mut hp = Vec::with_capacity(len);
        let mut ceiling = vec![0.0; len];
        let mut decayed_heal = Vec::with_capacity(len);
        ceiling[0] = initial;

        let mut exercise_run = TrailingRun::default();
        let mut heal_run = TrailingRun::default();

        for i in 0..len {
            let dispersion = stats.dispersions[i];
            match Self::classify(onset, i) {
                StepPhase::Baseline => {
                    hp.push(initial);
                    ceiling[i] = initial;
                    decayed_heal.push(0.0);
                    exercise_run.record(dispersion > recovery::STILLNESS_THRESHOLD);
                    heal_run.record(false);
                }
                StepPhase::Active => {
                    // Trailing-run durations exclude the current step; the
                    // histories are appended after the update, as in the
                    // reference recurrence.
                    let ee = energy::expenditure(
                        dispersion,
                        self.basal_rate,
                        stats.peak_coefficients[i],
                    );
                    let ee_ramp = energy::expenditure_ramp(exercise_run.minutes());
                    let heal = energy::heal_amount(dispersion);
                    let heal_ramp = energy::heal_ramp(heal_run.minutes());

                    let previous_hp = hp[i - 1];
                    let previous_ceiling = ceiling[i - 1];

                    // HP can never exceed the current ceiling, even on a
                    // net-positive step.
                    let next_hp =
                        (previous_hp - ee * ee_ramp + heal * heal_ramp).min(previous_ceiling);
                    hp.push(next_hp);

                    ceiling[i] = if next_hp <= previous_hp {
                        // Erodes with the HP drop but still creeps upward by
                        // the per-step regeneration; floored at 20.
                        (previous_ceiling
                            + capacity::EROSION_RATE * (next_hp - previous_hp)
                            + capacity::REGEN_PER_STEP)
                            .max(capacity::FLOOR)
                    } else {
                        previous_ceiling + capacity::REGEN_PER_STEP
                    };

                    decayed_heal.push(heal * heal_ramp);
                    exercise_run.record(dispersion > recovery::STILLNESS_THRESHOLD);
                    heal_run.record(heal > 0.0);
                }
            }
        }

        // Rescale to percent of initial capacity; HP clamped into [0, 100].
        let scale = 100.0 / initial;
        let hp: Vec<f64> = hp
            .iter()
            .map(|value| (value * scale).clamp(0.0, 100.0))
            .collect();
        let ceiling: Vec<f64> = ceiling.iter().map(|value| value * scale).collect();

        if let Some(position) = hp
            .iter()
            .chain(ceiling.iter())
            .position(|value| !value.is_finite())
        {
            return Err(AppError::internal(format!(
                "recurrence produced a non-finite value near step {position}"
            )));
        }

        let intensity: Vec<f64> = stats
            .dispersions
            .iter()
            .zip(stats.peak_coefficients.iter())
            .map(|(dispersion, coefficient)| dispersion * coefficient)
            .collect();

        let final_hp_percent = hp.last().copied().unwrap_or(100.0).round() as i64;
        let estimated_kcal = self.basal_rate * stats.dispersions.iter().sum::<f64>();

        debug!(
            steps = len,
            final_hp_percent, estimated_kcal, "fatigue recurrence complete"
        );

        Ok((
            FatigueSeries {
                hp,
                ceiling,
                decayed_heal,
                intensity,
            },
            FatigueSummary {
                final_hp_percent,
                estimated_kcal,
                onset_index: onset,
            },
        ))
    }
}

/// Run the full analysis over a filtered composite-acceleration signal:
/// window statistics, smoothing of both series, onset detection, and the
/// fatigue recurrence.
///
/// # Errors
///
/// Returns `AppError::InvalidInput` if the signal is empty, contains
/// non-finite samples, or retains fewer windows than the smoothing window.
pub fn analyze_filtered_signal(
    signal: &[f64],
    profile: &PersonalProfile,
    params: &AnalysisParams,
) -> AppResult<(FatigueSeries, FatigueSummary)> {
    if signal.is_empty() {
        return Err(AppError::invalid_input("input signal is empty"));
    }
    profile.validate()?;

    let extractor = WindowStatsExtractor::new(params.chunk_size)?;
    let raw = extractor.extract(signal)?;
    if raw.len() < params.smoothing_window {
        return Err(AppError::invalid_input(format!(
            "recording retains {} windows, need at least {} for smoothing",
            raw.len(),
            params.smoothing_window
        )));
    }

    let smoothed = WindowStats {
        peak_coefficients: smoothing::smooth(&raw.peak_coefficients, params.smoothing_window)?,
        dispersions: smoothing::smooth(&raw.dispersions, params.smoothing_window)?,
    };

    let detector =
        ExerciseOnsetDetector::new(params.exercise_threshold, params.consecutive_count_required);
    let onset = detector.detect(&smoothed.dispersions);
    match onset {
        Some(index) => info!(onset_window = index, "exercise onset detected"),
        None => info!("no sustained exercise detected; whole recording is baseline"),
    }

    let basal_rate = energy::basal_rate_per_sec(profile);
    let engine = FatigueEngine::new(params.clone(), basal_rate);
    engine.simulate(&smoothed, onset)
}
