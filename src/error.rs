//! Error types for algoviz.
//!
//! User mistakes (starting a second run, tapping outside the grid, missing
//! Start/End) are never errors: they are reported as [`crate::Outcome`]
//! values. `VizError` covers genuine faults only.

use thiserror::Error;

/// Result type alias for algoviz operations.
pub type VizResult<T> = Result<T, VizError>;

/// Unified error type for all algoviz operations.
#[derive(Debug, Error)]
pub enum VizError {
    // ===== Invariant Guards =====
    /// A published snapshot no longer holds the multiset of input values.
    #[error("Guard: value multiset changed at frame {frame} ({detail})")]
    MultisetChanged {
        /// Frame index at which the violation was detected.
        frame: u64,
        /// Description of the difference.
        detail: String,
    },

    /// A grid snapshot holds more than one cell with a terminal role.
    #[error("Guard: {count} cells hold role {role} at frame {frame}")]
    DuplicateTerminal {
        /// Role name ("Start" or "End").
        role: &'static str,
        /// Number of cells holding that role.
        count: usize,
        /// Frame index at which the violation was detected.
        frame: u64,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Command Errors =====
    /// A command could not start with the given input.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// What was wrong with the input.
        message: String,
    },

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VizError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid-input error with a message.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Check if this error comes from an invariant guard (run must stop).
    #[must_use]
    pub const fn is_guard_violation(&self) -> bool {
        matches!(
            self,
            Self::MultisetChanged { .. } | Self::DuplicateTerminal { .. }
        )
    }
}
