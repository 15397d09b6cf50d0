// ABOUTME: Exercise onset detection over the smoothed dispersion series
// ABOUTME: Finds the first sustained run of windows above the exercise threshold
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exercise onset detection.
//!
//! Scans the smoothed dispersion series left to right for the first run of
//! at least `required_run` consecutive values strictly above `threshold`.
//! The reported index is the first index of that run; everything at or
//! before it is treated as resting baseline by the simulation.

/// Detects the start of sustained exercise in a dispersion series
#[derive(Debug, Clone)]
pub struct ExerciseOnsetDetector {
    threshold: f64,
    required_run: usize,
}

impl ExerciseOnsetDetector {
    /// Create a detector with the given threshold and required run length.
    ///
    /// `required_run` must be positive; a zero-length run can never be
    /// matched. Debug builds assert this; `FatigueConfig::validate`
    /// rejects it on the configuration path.
    #[must_use]
    pub const fn new(threshold: f64, required_run: usize) -> Self {
        debug_assert!(required_run > 0);
        Self {
            threshold,
            required_run,
        }
    }

    /// Find the first index of a sustained above-threshold run.
    ///
    /// Returns `None` when no such run exists; the caller treats the whole
    /// series as baseline in that case.
    #[must_use]
    pub fn detect(&self, dispersions: &[f64]) -> Option<usize> {
        let mut consecutive = 0usize;
        for (index, value) in dispersions.iter().enumerate() {
            if *value > self.threshold {
                consecutive += 1;
                if consecutive == self.required_run {
                    return Some(index + 1 - self.required_run);
                }
            } else {
                consecutive = 0;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> ExerciseOnsetDetector {
        ExerciseOnsetDetector::new(3.0, 15)
    }

    #[test]
    fn test_all_below_threshold_is_not_found() {
        let series = vec![3.0; 100];
        assert_eq!(detector().detect(&series), None);
    }

    #[test]
    fn test_run_at_offset_reports_first_index() {
        let mut series = vec![0.5; 60];
        for value in &mut series[23..23 + 15] {
            *value = 4.0;
        }
        assert_eq!(detector().detect(&series), Some(23));
    }

    #[test]
    fn test_interrupted_run_resets() {
        // 14 above, one at threshold, then 14 above: no qualifying run
        let mut series = vec![4.0; 29];
        series[14] = 3.0;
        assert_eq!(detector().detect(&series), None);
    }

    #[test]
    fn test_threshold_is_strict() {
        let series = vec![3.0 + 1e-9; 15];
        assert_eq!(detector().detect(&series), Some(0));
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(detector().detect(&[]), None);
    }

    #[test]
    #[should_panic(expected = "required_run > 0")]
    fn test_zero_run_length_is_rejected() {
        let _ = ExerciseOnsetDetector::new(3.0, 0);
    }
}
