/// Structured error types for saveserve-core.
///
/// Uses `thiserror` so the relay crate and the CLI can match on variants.
/// Form validation failures are not errors: they come back as
/// [`crate::form::FieldErrors`] values.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for saveserve-core operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// I/O operation failed
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// JSON parsing or serialization failed
    #[error("JSON error at {context}: {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    /// Role string outside the fixed set offered by the form
    #[error("Unknown role '{value}'")]
    UnknownRole { value: String },

    /// A submit was attempted while another one is still loading
    #[error("A submission is already in flight")]
    SubmissionInFlight,

    /// Widget action not valid from its current status
    #[error("Workflow '{workflow}' cannot {action} while {status}")]
    InvalidTransition {
        workflow: String,
        action: &'static str,
        status: String,
    },

    /// Alternate outcome requested on a single-choice widget
    #[error("Workflow '{workflow}' has no alternate outcome")]
    NoAlternate { workflow: String },

    /// Clock string not in `hh:mm AM|PM` form
    #[error("Invalid clock time '{value}': {reason}")]
    InvalidClock { value: String, reason: String },

    /// Pickup adjustment outside the slider range or off its step
    #[error("Invalid pickup adjustment {minutes}m (expected -30..=60 in steps of 15)")]
    InvalidAdjustment { minutes: i32 },

    /// Timer scheduled outside a tokio runtime
    #[error("Cannot schedule '{task}' without a tokio runtime")]
    NoRuntime { task: String },

    /// Configuration error
    #[error("Configuration error at {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

/// Result type alias for saveserve-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Create a JSON error with context
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }

    /// Create an unknown role error
    pub fn unknown_role(value: impl Into<String>) -> Self {
        Self::UnknownRole {
            value: value.into(),
        }
    }

    /// Create an invalid transition error
    pub fn invalid_transition(
        workflow: impl Into<String>,
        action: &'static str,
        status: impl Into<String>,
    ) -> Self {
        Self::InvalidTransition {
            workflow: workflow.into(),
            action,
            status: status.into(),
        }
    }

    /// Create an invalid clock error
    pub fn invalid_clock(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidClock {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_transition("ngo-dispatch", "undo", "idle");
        assert_eq!(
            err.to_string(),
            "Workflow 'ngo-dispatch' cannot undo while idle"
        );

        let err = CoreError::unknown_role("Astronaut");
        assert!(err.to_string().contains("Astronaut"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: CoreError = io_err.into();

        assert!(matches!(err, CoreError::Io { .. }));
    }
}
