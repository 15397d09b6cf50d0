// ABOUTME: Physiological constants for the fatigue simulation model
// ABOUTME: Groups basal metabolism, exertion, recovery, and capacity parameters by concern
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Physiological constants used by the fatigue simulation.
//!
//! The model formulas are fixed by definition (see `energy` and `engine`);
//! these values parameterize them. They are not tunables: changing them
//! changes the model, not its configuration.

/// Resting energy expenditure (Ten Haaf & Weijs equation)
///
/// REE per day = 11.936*weight + 587.728*height - 8.19*age + 191.027, with a
/// fixed offset added before the per-second conversion.
/// Reference: Ten Haaf, T. & Weijs, P.J.M. (2014). Resting energy expenditure
/// prediction in recreational athletes. *PLoS ONE*, 9(11).
pub mod basal_metabolism {
    /// Weight coefficient (kcal/day per kg)
    pub const WEIGHT_COEFFICIENT: f64 = 11.936;

    /// Height coefficient (kcal/day per m)
    pub const HEIGHT_COEFFICIENT: f64 = 587.728;

    /// Age coefficient (kcal/day per year, subtractive)
    pub const AGE_COEFFICIENT: f64 = 8.19;

    /// Equation intercept (kcal/day)
    pub const INTERCEPT: f64 = 191.027;

    /// Fixed offset added to the daily estimate before conversion (kcal/day)
    pub const DAILY_OFFSET: f64 = 29.279;

    /// Seconds per day, the daily-to-per-second conversion divisor
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}

/// Exertion scaling applied to per-window statistics
pub mod exertion {
    /// Acceleration magnitude (m/s^2) above which the peak coefficient
    /// grows cubically; below it the coefficient is flat
    pub const PEAK_THRESHOLD: f64 = 10.0;

    /// Divisor normalizing the cubic peak coefficient
    pub const PEAK_DIVISOR: f64 = 64.0;

    /// Minutes of sustained exertion over which the expenditure multiplier
    /// ramps linearly from 1x to its cap
    pub const RAMP_MINUTES: f64 = 20.0;

    /// Expenditure multiplier cap after the ramp
    pub const RAMP_CAP: f64 = 2.0;
}

/// Recovery trickle and its duration-dependent decay
pub mod recovery {
    /// Dispersion at or below which the wearer is considered still enough
    /// for recovery
    pub const STILLNESS_THRESHOLD: f64 = 3.0;

    /// HP recovered per step while still
    pub const HEAL_PER_STEP: f64 = 0.04;

    /// Baseline of the recovery-surge curve
    pub const SURGE_FLOOR: f64 = 0.5;

    /// Amplitude of the Gaussian recovery surge
    pub const SURGE_AMPLITUDE: f64 = 9.5;

    /// Width parameter of the Gaussian surge
    pub const SURGE_WIDTH: f64 = 0.5;

    /// Minutes of continuous recovery at which the surge peaks
    pub const SURGE_PEAK_MINUTES: f64 = 1.0;

    /// Divisor normalizing the surge curve
    pub const SURGE_DIVISOR: f64 = 3.0;
}

/// Capacity ceiling ("sup HP") dynamics
pub mod capacity {
    /// Fraction of an HP drop that erodes the ceiling
    pub const EROSION_RATE: f64 = 0.3;

    /// Ceiling regeneration per step (full capacity per day)
    pub const REGEN_PER_STEP: f64 = 100.0 / 86_400.0;

    /// Ceiling never falls below this fraction of initial capacity
    pub const FLOOR: f64 = 20.0;
}
