//! Error types for telemetry processing.
//!
//! All errors implement the `std::error::Error` trait and carry structured
//! context so callers can decide whether to retry and what to tell the user.
//!
//! ## Error Categories
//!
//! - **Annotation Errors**: empty laps and malformed samples reaching the annotator
//! - **Source Errors**: session files that cannot be read or parsed, sessions the
//!   provider has no data for
//! - **Selection Errors**: unknown drivers or laps, unsupported seasons or session kinds
//! - **Configuration Errors**: inconsistent dashboard configuration
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use pitlane::TelemetryError;
//!
//! let error = TelemetryError::session_unavailable("2024 Monaco Race", "provider timed out");
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```
//!
//! ## Helper Constructors
//!
//! ```rust
//! use pitlane::TelemetryError;
//!
//! let empty = TelemetryError::empty_input("summarize");
//! let bad = TelemetryError::malformed_sample(12, "rpm", "value is not numeric");
//! assert!(!bad.is_retryable());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for telemetry operations.
pub type Result<T, E = TelemetryError> = std::result::Result<T, E>;

/// Main error type for telemetry operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TelemetryError {
    #[error("{operation} received an empty telemetry sequence")]
    EmptyInput { operation: String },

    #[error("Malformed sample {index}: field '{field}' {details}")]
    MalformedSample { index: usize, field: String, details: String },

    #[error("Session file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Season {year} is not supported (available: {earliest}-{latest})")]
    UnsupportedSeason { year: u16, earliest: u16, latest: u16 },

    #[error("Session '{name}' is not supported, expected Qualifying or Race")]
    UnsupportedSession { name: String },

    #[error("Session {key} is unavailable: {reason}")]
    SessionUnavailable {
        key: String,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Driver '{driver}' not found in session")]
    DriverNotFound { driver: String },

    #[error("Lap {lap} not found for driver '{driver}'")]
    LapNotFound { driver: String, lap: u32 },

    #[error("No telemetry recorded for driver '{driver}' lap {lap}")]
    TelemetryMissing { driver: String, lap: u32 },

    #[error("Invalid selection: {reason}")]
    InvalidSelection { reason: String },

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },
}

impl TelemetryError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            TelemetryError::SessionUnavailable { .. } => true,
            TelemetryError::File { source, .. } => matches!(
                source.kind(),
                std::io::ErrorKind::Interrupted | std::io::ErrorKind::WouldBlock
            ),
            TelemetryError::EmptyInput { .. }
            | TelemetryError::MalformedSample { .. }
            | TelemetryError::Parse { .. }
            | TelemetryError::UnsupportedSeason { .. }
            | TelemetryError::UnsupportedSession { .. }
            | TelemetryError::DriverNotFound { .. }
            | TelemetryError::LapNotFound { .. }
            | TelemetryError::TelemetryMissing { .. }
            | TelemetryError::InvalidSelection { .. }
            | TelemetryError::Config { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            TelemetryError::EmptyInput { .. } => vec![
                "Check the lap has telemetry recorded",
                "Select a different lap for this driver",
            ],
            TelemetryError::MalformedSample { .. } => vec![
                "Re-export the session from the provider",
                "Verify the sample columns are numeric",
                "Select a different lap for this driver",
            ],
            TelemetryError::File { .. } => vec![
                "Check the session file exists and is readable",
                "Verify the data root directory layout",
                "Check file permissions",
            ],
            TelemetryError::Parse { .. } => vec![
                "Check the session file is valid YAML or JSON",
                "Verify the column names match the provider export",
            ],
            TelemetryError::UnsupportedSeason { .. } => vec![
                "Choose a season from 2018 onwards",
                "Check the configured latest season",
            ],
            TelemetryError::UnsupportedSession { .. } => {
                vec!["Use Qualifying (Q) or Race (R) as the session"]
            }
            TelemetryError::SessionUnavailable { .. } => vec![
                "Retry loading the session",
                "Check the circuit name is spelled in English",
                "Verify the event has already taken place",
            ],
            TelemetryError::DriverNotFound { .. } => vec![
                "Use the driver number or three-letter abbreviation",
                "List the session drivers before selecting",
            ],
            TelemetryError::LapNotFound { .. } | TelemetryError::TelemetryMissing { .. } => vec![
                "Select the fastest lap instead of a lap number",
                "Check the driver completed the lap",
            ],
            TelemetryError::InvalidSelection { .. } => vec![
                "Select at least one driver",
                "Reduce the number of selected drivers",
            ],
            TelemetryError::Config { .. } => vec![
                "Check the configuration file against the documented defaults",
            ],
        }
    }

    /// Helper constructor for empty input errors.
    pub fn empty_input(operation: impl Into<String>) -> Self {
        TelemetryError::EmptyInput { operation: operation.into() }
    }

    /// Helper constructor for malformed sample errors.
    pub fn malformed_sample(
        index: usize,
        field: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        TelemetryError::MalformedSample { index, field: field.into(), details: details.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        TelemetryError::File { path, source }
    }

    /// Helper constructor for parse errors.
    pub fn parse_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        TelemetryError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for unavailable sessions.
    pub fn session_unavailable(key: impl Into<String>, reason: impl Into<String>) -> Self {
        TelemetryError::SessionUnavailable { key: key.into(), reason: reason.into(), source: None }
    }

    /// Helper constructor for unavailable sessions with source.
    pub fn session_unavailable_with_source(
        key: impl Into<String>,
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        TelemetryError::SessionUnavailable {
            key: key.into(),
            reason: reason.into(),
            source: Some(source),
        }
    }

    /// Helper constructor for invalid selections.
    pub fn invalid_selection(reason: impl Into<String>) -> Self {
        TelemetryError::InvalidSelection { reason: reason.into() }
    }

    /// Helper constructor for configuration errors.
    pub fn config(reason: impl Into<String>) -> Self {
        TelemetryError::Config { reason: reason.into() }
    }
}

impl From<std::io::Error> for TelemetryError {
    fn from(err: std::io::Error) -> Self {
        TelemetryError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}

impl From<serde_yaml_ng::Error> for TelemetryError {
    fn from(err: serde_yaml_ng::Error) -> Self {
        TelemetryError::Parse { context: "YAML deserialization".to_string(), details: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
          #[test]
          fn error_messages_carry_their_context(
            operation in "\\w+",
            index in 0usize..100_000usize,
            field in "[a-z_]+",
            details in ".*",
            driver in "[A-Z]{3}",
            lap in 1u32..80u32
          ) {
            let empty = TelemetryError::empty_input(operation.clone());
            prop_assert!(empty.to_string().contains(&operation));

            let malformed = TelemetryError::malformed_sample(index, field.clone(), details.clone());
            let msg = malformed.to_string();
            prop_assert!(msg.contains(&index.to_string()));
            prop_assert!(msg.contains(&field));
            prop_assert!(msg.contains(&details));

            let lap_err = TelemetryError::LapNotFound { driver: driver.clone(), lap };
            let msg = lap_err.to_string();
            prop_assert!(msg.contains(&driver));
            prop_assert!(msg.contains(&lap.to_string()));
          }

          #[test]
          fn unavailable_sessions_preserve_source_chain(
            key in "[0-9]{4} [A-Za-z]+",
            base_message in ".*"
          ) {
            let source: Box<dyn std::error::Error + Send + Sync> =
              Box::new(std::io::Error::other(base_message.clone()));
            let error = TelemetryError::session_unavailable_with_source(key.clone(), "load failed", source);

            prop_assert!(error.to_string().contains(&key));
            let inner = std::error::Error::source(&error);
            prop_assert!(inner.is_some());
            prop_assert_eq!(inner.map(|e| e.to_string()), Some(base_message));
          }
        }
    }

    #[test]
    fn error_constructors_validation() {
        let file_error = TelemetryError::file_error(
            PathBuf::from("/data/2024/monaco/race.yaml"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(file_error, TelemetryError::File { .. }));

        let empty = TelemetryError::empty_input("annotate");
        assert!(matches!(empty, TelemetryError::EmptyInput { .. }));

        let bad = TelemetryError::malformed_sample(3, "gear", "is out of range");
        assert!(matches!(bad, TelemetryError::MalformedSample { index: 3, .. }));
    }

    #[test]
    fn error_traits_validation() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<TelemetryError>();

        let error = TelemetryError::empty_input("summarize");
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn recovery_methods_work() {
        let unavailable = TelemetryError::session_unavailable("2024 Monaco Race", "not loaded");
        let malformed = TelemetryError::malformed_sample(0, "speed", "is missing");
        let empty = TelemetryError::empty_input("annotate");

        assert!(unavailable.is_retryable());
        assert!(!malformed.is_retryable());
        assert!(!empty.is_retryable());

        for error in [&unavailable, &malformed, &empty] {
            let suggestions = error.recovery_suggestions();
            assert!(!suggestions.is_empty());
            for suggestion in suggestions {
                assert!(suggestion.len() > 5);
            }
        }
    }

    #[test]
    fn only_unavailable_sessions_and_transient_io_retry() {
        let transient = TelemetryError::file_error(
            PathBuf::from("race.yaml"),
            std::io::Error::new(std::io::ErrorKind::Interrupted, "interrupted"),
        );
        assert!(transient.is_retryable());

        let permanent = [
            TelemetryError::file_error(
                PathBuf::from("race.yaml"),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ),
            TelemetryError::parse_error("Session", "bad YAML"),
            TelemetryError::UnsupportedSeason { year: 2017, earliest: 2018, latest: 2024 },
            TelemetryError::UnsupportedSession { name: "FP1".into() },
            TelemetryError::DriverNotFound { driver: "XYZ".into() },
            TelemetryError::LapNotFound { driver: "LEC".into(), lap: 9 },
            TelemetryError::TelemetryMissing { driver: "LEC".into(), lap: 1 },
            TelemetryError::invalid_selection("no drivers selected"),
            TelemetryError::config("cache_capacity must be at least 1"),
        ];
        for error in &permanent {
            assert!(!error.is_retryable(), "{error} should not be retryable");
            assert!(!error.recovery_suggestions().is_empty());
        }
    }

    #[test]
    fn from_conversions_work() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "session file");
        match TelemetryError::from(io_err) {
            TelemetryError::File { source, .. } => assert_eq!(source.to_string(), "session file"),
            other => panic!("Expected File error variant, got {other:?}"),
        }

        let yaml_err = serde_yaml_ng::from_str::<u32>("not: [a number").unwrap_err();
        assert!(matches!(TelemetryError::from(yaml_err), TelemetryError::Parse { .. }));
    }
}
