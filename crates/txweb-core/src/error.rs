//! Error types for txweb-core
//!
//! Error codes, severities and a serializable details struct used by the
//! HTTP layer when a repository operation fails.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Transaction not found
    TransactionNotFound,
    /// Backing store is not available
    StoreUnavailable,
    /// No identifier left to assign
    IdSpaceExhausted,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::TransactionNotFound => write!(f, "TRANSACTION_NOT_FOUND"),
            ErrorCode::StoreUnavailable => write!(f, "STORE_UNAVAILABLE"),
            ErrorCode::IdSpaceExhausted => write!(f, "ID_SPACE_EXHAUSTED"),
        }
    }
}

impl ErrorCode {
    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ErrorCode::TransactionNotFound => ErrorSeverity::Info,
            ErrorCode::StoreUnavailable => ErrorSeverity::Critical,
            ErrorCode::IdSpaceExhausted => ErrorSeverity::Error,
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational - expected outcome for bad input
    Info,
    /// Error - operation failed
    Error,
    /// Critical - the service cannot serve requests
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

impl ErrorSeverity {
    /// Level the error is logged at; `log` has nothing above `Error`
    pub fn log_level(&self) -> log::Level {
        match self {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Error | ErrorSeverity::Critical => log::Level::Error,
        }
    }
}

/// Main error type for txweb-core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: i64 },

    #[error("Transaction store is unavailable")]
    StoreUnavailable,

    #[error("No transaction id left to assign after {max_id}")]
    IdSpaceExhausted { max_id: i64 },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::TransactionNotFound { .. } => ErrorCode::TransactionNotFound,
            CoreError::StoreUnavailable => ErrorCode::StoreUnavailable,
            CoreError::IdSpaceExhausted { .. } => ErrorCode::IdSpaceExhausted,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        self.code().severity()
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::TransactionNotFound { id } => {
                details = details
                    .with_detail(serde_json::json!({ "id": id }))
                    .with_suggestion(
                        "Use the /api/Transactions endpoint to list all transactions.".to_string(),
                    );
            }
            CoreError::StoreUnavailable => {
                details = details.with_suggestion(
                    "The transaction store was not initialized; restart the service.".to_string(),
                );
            }
            CoreError::IdSpaceExhausted { max_id } => {
                details = details.with_detail(serde_json::json!({ "max_id": max_id }));
            }
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

// ==================== Tests ====================
