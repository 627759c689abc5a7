//! Error types for the task board engine

use std::path::PathBuf;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// `before` did not sort strictly ahead of `after` when asking for a key between them
    #[error("ordering contract violated: {before:?} must sort before {after:?}")]
    OrderingViolation { before: String, after: String },

    /// A string could not be used as an order key
    #[error("invalid ordinal {value:?}: {reason}")]
    InvalidOrdinal { value: String, reason: String },

    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Duplicate ID
    #[error("duplicate {item_type} ID: {id}")]
    DuplicateId { item_type: String, id: String },

    /// Two siblings share an order key
    #[error("duplicate ordinal {ordinal} in {scope}")]
    DuplicateOrdinal { scope: String, ordinal: String },

    /// Task points at a column that does not exist
    #[error("task '{task}' references missing column '{column}'")]
    OrphanTask { task: String, column: String },

    /// Column has tasks and cannot be deleted
    #[error("column '{id}' has {count} tasks and cannot be deleted")]
    ColumnNotEmpty { id: String, count: usize },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// The data-fetch layer refused a mutation; local state was rolled back
    #[error("mutation rejected: {reason}")]
    MutationRejected { reason: String },

    /// Board file missing
    #[error("board not initialized at {path}")]
    NotInitialized { path: PathBuf },

    /// Board file already exists
    #[error("board already exists at {path}")]
    AlreadyExists { path: PathBuf },

    /// Lock is held by another process
    #[error("lock busy - another operation in progress")]
    LockBusy,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl BoardError {
    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate ID error
    pub fn duplicate_id(item_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            item_type: item_type.into(),
            id: id.into(),
        }
    }

    /// Create a rejected-mutation error
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::MutationRejected {
            reason: reason.into(),
        }
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockBusy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoardError::TaskNotFound {
            id: "abc123".into(),
        };
        assert_eq!(err.to_string(), "task not found: abc123");
    }

    #[test]
    fn test_ordering_violation_display() {
        let err = BoardError::OrderingViolation {
            before: "b".into(),
            after: "a".into(),
        };
        assert_eq!(
            err.to_string(),
            "ordering contract violated: \"b\" must sort before \"a\""
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(BoardError::LockBusy.is_retryable());
        assert!(!BoardError::rejected("nope").is_retryable());
        assert!(!BoardError::duplicate_id("task", "t1").is_retryable());
    }
}
