// ABOUTME: Main library entry point for the fatigue simulation engine
// ABOUTME: Exposes preprocessing, window statistics, smoothing, onset detection, and the recurrence
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Fatigue Engine
//!
//! Batch analysis of wearable accelerometer recordings: a per-window
//! exercise-intensity signal is extracted from the filtered composite
//! acceleration, and a sequential physiological simulation tracks a
//! depleting/recovering energy reserve ("HP") and a fatigue-adjusted
//! capacity ceiling over the recording.
//!
//! ## Pipeline
//!
//! 1. **Preprocessing** (`preprocessing`): CSV ingestion, unit conversion,
//!    zero-phase Butterworth low-pass.
//! 2. **Window statistics** (`window_stats`): peak coefficient and sample
//!    standard deviation per fixed-size window.
//! 3. **Smoothing** (`smoothing`): edge-corrected moving average over both
//!    per-window series.
//! 4. **Onset detection** (`onset`): first sustained run of high-dispersion
//!    windows.
//! 5. **Simulation** (`engine`): the stateful HP/ceiling recurrence, fed by
//!    the pure `energy` model.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fatigue_engine::config::FatigueConfig;
//! use fatigue_engine::engine::analyze_filtered_signal;
//! use fatigue_engine::errors::AppResult;
//! use fatigue_engine::preprocessing::load_recording;
//!
//! fn main() -> AppResult<()> {
//!     let config = FatigueConfig::from_environment()?;
//!     let recording = load_recording(&config.data_file, &config.filter)?;
//!     let (series, summary) = analyze_filtered_signal(
//!         &recording.filtered_accel,
//!         &config.profile,
//!         &config.analysis,
//!     )?;
//!     println!("final HP: {}%", summary.final_hp_percent);
//!     println!("series length: {}", series.hp.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod energy;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod models;
pub mod onset;
pub mod physiological_constants;
pub mod preprocessing;
pub mod smoothing;
pub mod window_stats;

pub use config::FatigueConfig;
pub use engine::{analyze_filtered_signal, FatigueEngine};
pub use errors::{AppError, AppResult};
pub use models::{AnalysisReport, FatigueSeries, FatigueSummary, PersonalProfile, WindowStats};
