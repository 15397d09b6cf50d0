// ABOUTME: Pure energy model functions for the fatigue simulation
// ABOUTME: Basal rate, per-step expenditure, recovery amount, and duration-dependent multipliers
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Energy model: pure, stateless functions consumed by the recurrence.

use crate::models::PersonalProfile;
use crate::physiological_constants::{basal_metabolism, exertion, recovery};

/// Resting energy expenditure per second, in kcal/s.
///
/// Ten Haaf equation evaluated per day, with a fixed offset, then converted
/// to per-second units:
///
/// `(11.936*weight + 587.728*height - 8.19*age + 191.027 + 29.279) / 86400`
#[must_use]
pub fn basal_rate_per_sec(profile: &PersonalProfile) -> f64 {
    let daily = basal_metabolism::WEIGHT_COEFFICIENT * profile.weight_kg
        + basal_metabolism::HEIGHT_COEFFICIENT * profile.height_m
        - basal_metabolism::AGE_COEFFICIENT * f64::from(profile.age_years)
        + basal_metabolism::INTERCEPT
        + basal_metabolism::DAILY_OFFSET;
    daily / basal_metabolism::SECONDS_PER_DAY
}

/// Energy expended in one step: dispersion scaled by the basal rate and the
/// window's peak coefficient
#[must_use]
pub fn expenditure(dispersion: f64, basal_rate: f64, peak_coefficient: f64) -> f64 {
    dispersion * basal_rate * peak_coefficient
}

/// Expenditure multiplier for sustained exertion.
///
/// Ramps linearly from 1x to 2x over the first 20 minutes of consecutive
/// exercise, capped at 2x thereafter.
#[must_use]
pub fn expenditure_ramp(consecutive_exercise_minutes: f64) -> f64 {
    if consecutive_exercise_minutes < exertion::RAMP_MINUTES {
        consecutive_exercise_minutes / exertion::RAMP_MINUTES + 1.0
    } else {
        exertion::RAMP_CAP
    }
}

/// Recovery trickle, gated by stillness: 0.04 HP per step while dispersion
/// stays at or below the stillness threshold, zero otherwise
#[must_use]
pub fn heal_amount(dispersion: f64) -> f64 {
    if dispersion > recovery::STILLNESS_THRESHOLD {
        0.0
    } else {
        recovery::HEAL_PER_STEP
    }
}

/// Recovery multiplier for continuous rest.
///
/// `(0.5 + 9.5*exp(-0.5*(minutes - 1)^2)) / 3` - a Gaussian surge peaking
/// at one minute of continuous recovery and decaying to a floor of about
/// 0.167 on both sides. The formula is reproduced exactly; no monotonicity
/// is assumed on either side of the peak.
#[must_use]
pub fn heal_ramp(consecutive_heal_minutes: f64) -> f64 {
    let offset = consecutive_heal_minutes - recovery::SURGE_PEAK_MINUTES;
    (recovery::SURGE_FLOOR
        + recovery::SURGE_AMPLITUDE * (-recovery::SURGE_WIDTH * offset * offset).exp())
        / recovery::SURGE_DIVISOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basal_rate_reference_profile() {
        // 70 kg / 1.78 m / 25 y:
        // (11.936*70 + 587.728*1.78 - 8.19*25 + 191.027 + 29.279) / 86400
        //   = 1897.23184 / 86400 = 0.0219587 kcal/s
        let profile = PersonalProfile {
            weight_kg: 70.0,
            height_m: 1.78,
            age_years: 25,
        };
        let rate = basal_rate_per_sec(&profile);
        assert!((rate - 0.021_958_7).abs() < 1e-6, "got {rate}");
    }

    #[test]
    fn test_basal_rate_increases_with_weight() {
        let lighter = PersonalProfile {
            weight_kg: 60.0,
            ..PersonalProfile::default()
        };
        let heavier = PersonalProfile {
            weight_kg: 90.0,
            ..PersonalProfile::default()
        };
        assert!(basal_rate_per_sec(&heavier) > basal_rate_per_sec(&lighter));
    }

    #[test]
    fn test_expenditure_ramp_shape() {
        assert!((expenditure_ramp(0.0) - 1.0).abs() < 1e-12);
        assert!((expenditure_ramp(10.0) - 1.5).abs() < 1e-12);
        assert!((expenditure_ramp(20.0) - 2.0).abs() < 1e-12);
        assert!((expenditure_ramp(90.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_heal_amount_gated_by_stillness() {
        assert!((heal_amount(0.0) - 0.04).abs() < 1e-12);
        assert!((heal_amount(3.0) - 0.04).abs() < 1e-12);
        assert!(heal_amount(3.01).abs() < 1e-12);
    }

    #[test]
    fn test_heal_ramp_peaks_at_one_minute() {
        let peak = heal_ramp(1.0);
        assert!((peak - 10.0 / 3.0).abs() < 1e-12);
        assert!(heal_ramp(0.0) < peak);
        assert!(heal_ramp(5.0) < peak);
        // Far from the peak the surge decays to its floor
        assert!((heal_ramp(30.0) - 0.5 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_expenditure_is_multiplicative() {
        assert!((expenditure(5.0, 0.02, 0.5) - 0.05).abs() < 1e-12);
        assert!(expenditure(0.0, 0.02, 0.5).abs() < 1e-15);
    }
}
