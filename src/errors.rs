// ABOUTME: Unified error handling for the fatigue analysis pipeline
// ABOUTME: Defines standard error types and codes shared across all modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Unified Error Handling
//!
//! Centralized error types for the fatigue engine. Upstream stages
//! (ingestion, windowing, smoothing) validate their preconditions and fail
//! fast; the recurrence assumes validated inputs and only surfaces numeric
//! defects. Partial results are never emitted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Input sequence or parameter failed validation
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// Two series that must be index-aligned have different lengths
    #[serde(rename = "SERIES_LENGTH_MISMATCH")]
    SeriesLengthMismatch,
    /// Configuration value out of range or inconsistent
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,
    /// Failure reading or parsing the input recording
    #[serde(rename = "INGESTION_ERROR")]
    IngestionError,
    /// Internal defect (e.g. NaN produced by the recurrence)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

/// Application error type for the fatigue analysis pipeline
#[derive(Debug, Error)]
pub enum AppError {
    /// Input data or personal parameters failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Index-aligned series have mismatched lengths
    #[error("Series length mismatch: {0}")]
    SeriesLengthMismatch(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// CSV parsing failure in the ingestion stage
    #[error("CSV ingestion failed: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure in the ingestion or report stage
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal defect that must be surfaced, never clamped away
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a series length mismatch error
    pub fn length_mismatch(message: impl Into<String>) -> Self {
        Self::SeriesLengthMismatch(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the error code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::SeriesLengthMismatch(_) => ErrorCode::SeriesLengthMismatch,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::Csv(_) | Self::Io(_) => ErrorCode::IngestionError,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }
}

/// Result type alias using `AppError`
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::invalid_input("empty").code(),
            ErrorCode::InvalidInput
        );
        assert_eq!(
            AppError::length_mismatch("3 vs 4").code(),
            ErrorCode::SeriesLengthMismatch
        );
        assert_eq!(AppError::internal("NaN").code(), ErrorCode::InternalError);
    }

    #[test]
    fn test_error_display() {
        let err = AppError::invalid_input("weight must be positive");
        assert_eq!(err.to_string(), "Invalid input: weight must be positive");
    }
}
