//! Unified error handling for the storage layer.
//!
//! Provides a single error type with:
//! - distinguishable "missing" kinds (never existed vs soft-deleted)
//! - a retry hint for transient failures
//! - a sanitised message that never exposes driver text

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("Resource has been deleted")]
    AlreadyDeleted,

    #[error("{0} already exists")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // Statement construction
    #[error("Failed to build statement: {0}")]
    Build(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(sea_orm::DbErr),

    #[error("{0} timed out")]
    Timeout(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::AlreadyDeleted => "ALREADY_DELETED",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Build(_) => "BUILD_ERROR",
            #[cfg(feature = "database")]
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Timeout(_) => "TIMEOUT",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True for both "never existed" and "soft-deleted" outcomes.
    pub fn is_missing(&self) -> bool {
        matches!(self, AppError::NotFound | AppError::AlreadyDeleted)
    }

    /// True when the caller may retry the operation with backoff.
    pub fn is_retryable(&self) -> bool {
        match self {
            #[cfg(feature = "database")]
            AppError::Database(_) => true,
            AppError::Timeout(_) => true,
            _ => false,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(msg) => msg.clone(),
            AppError::Conflict(msg) => {
                if msg.ends_with("already exists") {
                    msg.clone()
                } else {
                    format!("{} already exists", msg)
                }
            }

            // Hide details for internal errors
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Build(msg) => {
                tracing::error!("Statement build error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// Database Error Conversion
// =============================================================================

#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        if let Some(mapped) = err.sql_err().and_then(AppError::from_sql_err) {
            return mapped;
        }

        match err {
            sea_orm::DbErr::RecordNotFound(_) => AppError::NotFound,
            other => AppError::Database(other),
        }
    }
}

#[cfg(feature = "database")]
impl AppError {
    /// Classify a constraint failure reported by the driver.
    ///
    /// Returns `None` for kinds that stay opaque `Database` errors.
    pub fn from_sql_err(kind: sea_orm::SqlErr) -> Option<Self> {
        match kind {
            sea_orm::SqlErr::UniqueConstraintViolation(detail) => {
                tracing::debug!("Unique constraint violated: {}", detail);
                Some(AppError::Conflict("Record".to_string()))
            }
            _ => None,
        }
    }
}

#[cfg(feature = "database")]
impl From<sea_orm::sea_query::error::Error> for AppError {
    fn from(err: sea_orm::sea_query::error::Error) -> Self {
        AppError::Build(err.to_string())
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn build(msg: impl Into<String>) -> Self {
        AppError::Build(msg.into())
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        AppError::Timeout(operation.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
