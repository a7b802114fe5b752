//! Error types for Sugerir operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Sugerir operations.
///
/// Covers the two user-surfaced failure modes of the recommender core
/// (unknown users and empty evaluations) plus data-loading failures.
///
/// # Examples
///
/// ```
/// use sugerir::error::SugerirError;
///
/// let err = SugerirError::UnknownUser {
///     user_id: "u42".to_string(),
/// };
/// assert!(err.to_string().contains("u42"));
/// ```
#[derive(Debug)]
pub enum SugerirError {
    /// The user identifier does not exist in the training data.
    UnknownUser {
        /// The identifier that failed lookup
        user_id: String,
    },

    /// Evaluation produced zero includable observations (test set absent,
    /// empty, or every entry unpredictable).
    EmptyEvaluation,

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// A data file contained a line that could not be parsed.
    Parse {
        /// Path of the offending file
        path: String,
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for SugerirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SugerirError::UnknownUser { user_id } => {
                write!(f, "Unknown user: {user_id} is not in the training data")
            }
            SugerirError::EmptyEvaluation => {
                write!(f, "Empty evaluation: no predictable test observations")
            }
            SugerirError::Io(e) => write!(f, "I/O error: {e}"),
            SugerirError::Parse {
                path,
                line,
                message,
            } => {
                write!(f, "Parse error in {path} at line {line}: {message}")
            }
            SugerirError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SugerirError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SugerirError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SugerirError {
    fn from(err: std::io::Error) -> Self {
        SugerirError::Io(err)
    }
}

impl From<&str> for SugerirError {
    fn from(msg: &str) -> Self {
        SugerirError::Other(msg.to_string())
    }
}

impl From<String> for SugerirError {
    fn from(msg: String) -> Self {
        SugerirError::Other(msg)
    }
}

impl SugerirError {
    /// Create an unknown-user error for a failed training-table lookup.
    #[must_use]
    pub fn unknown_user(user_id: &str) -> Self {
        Self::UnknownUser {
            user_id: user_id.to_string(),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SugerirError>;
