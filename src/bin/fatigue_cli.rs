// ABOUTME: Command-line entry point for the fatigue analysis pipeline
// ABOUTME: Loads a sensor recording, runs the simulation, and writes a JSON report
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fatigue analysis CLI.
//!
//! Usage:
//! ```bash
//! # Analyze a recording with the default biometrics
//! fatigue-cli --data recording.csv --output fatigue_analysis.json
//!
//! # Override the wearer's biometrics
//! fatigue-cli --data recording.csv --weight 82.5 --height 1.84 --age 31
//! ```
//!
//! The report carries the four index-aligned output series (HP, capacity
//! ceiling, decayed heal, exercise intensity) plus scalar summaries, for a
//! downstream plotter to render.

use std::fs;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing::info;

use fatigue_engine::config::FatigueConfig;
use fatigue_engine::engine::analyze_filtered_signal;
use fatigue_engine::logging::{self, LogFormat, LoggingConfig};
use fatigue_engine::models::AnalysisReport;
use fatigue_engine::preprocessing::load_recording;

#[derive(Parser)]
#[command(
    name = "fatigue-cli",
    about = "Wearable fatigue analysis",
    long_about = "Analyzes a wearable accelerometer recording and simulates the wearer's \
                  energy reserve and capacity ceiling over the recording duration."
)]
struct Cli {
    /// Path of the input sensor recording (CSV)
    #[arg(long)]
    data: Option<String>,

    /// Path of the output report (JSON)
    #[arg(long)]
    output: Option<String>,

    /// Body weight in kilograms
    #[arg(long)]
    weight: Option<f64>,

    /// Height in meters
    #[arg(long)]
    height: Option<f64>,

    /// Age in years
    #[arg(long)]
    age: Option<u32>,

    /// Log output format (pretty, compact, json)
    #[arg(long, default_value = "compact")]
    log_format: String,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logging_config = LoggingConfig {
        level: if cli.verbose { "debug".into() } else { "info".into() },
        format: LogFormat::from_env_value(&cli.log_format),
    };
    logging::init(&logging_config)?;

    let mut config = FatigueConfig::from_environment()?;
    if let Some(data) = cli.data {
        config.data_file = data;
    }
    if let Some(output) = cli.output {
        config.output_file = output;
    }
    if let Some(weight) = cli.weight {
        config.profile.weight_kg = weight;
    }
    if let Some(height) = cli.height {
        config.profile.height_m = height;
    }
    if let Some(age) = cli.age {
        config.profile.age_years = age;
    }
    config.validate()?;

    info!(
        weight_kg = config.profile.weight_kg,
        height_m = config.profile.height_m,
        age_years = config.profile.age_years,
        "starting analysis"
    );

    let recording = load_recording(&config.data_file, &config.filter)
        .with_context(|| format!("failed to load recording from {}", config.data_file))?;

    let (series, summary) =
        analyze_filtered_signal(&recording.filtered_accel, &config.profile, &config.analysis)?;

    let report = AnalysisReport {
        generated_at: Utc::now(),
        profile: config.profile,
        summary: summary.clone(),
        series,
    };
    fs::write(&config.output_file, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("failed to write report to {}", config.output_file))?;

    info!(report = %config.output_file, "analysis complete");
    println!("Remaining HP: {}%", summary.final_hp_percent);
    println!("Estimated energy expenditure: {:.1} kcal", summary.estimated_kcal);

    Ok(())
}
