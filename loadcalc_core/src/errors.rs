//! # Error Types
//!
//! Structured error types for loadcalc_core.
//!
//! Step evaluation itself never fails: a rejected answer is a normal `false`
//! result and a missing prior answer reads as zero. `CalcError` covers the
//! boundaries where a real failure exists: resolving a scenario by id,
//! addressing a step outside the active list, and reading or writing
//! session snapshots.
//!
//! ## Example
//!
//! ```rust
//! use loadcalc_core::errors::{CalcError, CalcResult};
//! use loadcalc_core::scenarios::residential_scenario;
//!
//! fn name_of(id: &str) -> CalcResult<String> {
//!     Ok(residential_scenario(id)?.name.clone())
//! }
//!
//! assert_eq!(name_of("small_home").unwrap(), "Small Home");
//! assert_eq!(name_of("castle").unwrap_err().error_code(), "SCENARIO_NOT_FOUND");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for loadcalc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for engine boundary operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// No scenario with this id exists in the catalog
    #[error("Scenario not found: {scenario_id}")]
    ScenarioNotFound { scenario_id: String },

    /// Step index is past the end of the active step list
    #[error("Step index {index} out of range (scenario has {len} steps)")]
    StepOutOfRange { index: usize, len: usize },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create a ScenarioNotFound error
    pub fn scenario_not_found(scenario_id: impl Into<String>) -> Self {
        CalcError::ScenarioNotFound {
            scenario_id: scenario_id.into(),
        }
    }

    /// Create a StepOutOfRange error
    pub fn step_out_of_range(index: usize, len: usize) -> Self {
        CalcError::StepOutOfRange { index, len }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::ScenarioNotFound { .. } => "SCENARIO_NOT_FOUND",
            CalcError::StepOutOfRange { .. } => "STEP_OUT_OF_RANGE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::step_out_of_range(20, 17);
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("StepOutOfRange"));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::scenario_not_found("x").error_code(), "SCENARIO_NOT_FOUND");
        assert_eq!(CalcError::step_out_of_range(3, 2).error_code(), "STEP_OUT_OF_RANGE");
        assert_eq!(
            CalcError::file_error("read", "a.json", "missing").error_code(),
            "FILE_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        let error = CalcError::scenario_not_found("castle");
        assert_eq!(error.to_string(), "Scenario not found: castle");
    }
}
