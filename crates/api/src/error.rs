use laborlines_core::error::CoreError;
use laborlines_db::DbError;

use crate::config::ConfigError;
use crate::response::{ErrorType, ResolverError};

/// Message for every not-found outcome.
pub const NOT_FOUND_MESSAGE: &str = "labor line not found";

/// Application-level error type for resolver handlers.
///
/// Wraps [`CoreError`] for domain errors and adds resolver-specific variants.
/// [`AppError::into_resolver_error`] produces the envelope error, so every
/// failure path yields the same shape.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `laborlines_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store failure during `action` ("create", "update", ...).
    #[error("failed to {action} labor line")]
    Store {
        action: &'static str,
        #[source]
        source: DbError,
    },

    /// The `input` argument could not be decoded.
    #[error("invalid input: {0}")]
    BadInput(String),

    /// The event named an operation this resolver does not serve.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// The process is missing required configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An internal error with a human-readable message.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Wrap a store error with the action that was attempted.
    pub fn store(action: &'static str) -> impl FnOnce(DbError) -> AppError {
        move |source| AppError::Store { action, source }
    }

    /// Build the envelope error.
    ///
    /// Internal causes are logged here and replaced by a sanitized message.
    /// Conditional-check failures are reported as `InternalError` unless
    /// `surface_conflicts` is set.
    pub fn into_resolver_error(self, surface_conflicts: bool) -> ResolverError {
        match self {
            // --- CoreError variants ---
            AppError::Core(CoreError::Validation(msg)) => ResolverError::new(
                ErrorType::ValidationError,
                format!("validation failed: {msg}"),
            ),
            AppError::Core(CoreError::NotFound { .. }) => {
                ResolverError::new(ErrorType::NotFound, NOT_FOUND_MESSAGE)
            }

            // --- Store errors ---
            AppError::Store {
                source: DbError::NotFound,
                ..
            } => ResolverError::new(ErrorType::NotFound, NOT_FOUND_MESSAGE),
            AppError::Store {
                action,
                source: DbError::ConditionFailed,
            } => {
                tracing::warn!(action, "Conditional write rejected");
                let error_type = if surface_conflicts {
                    ErrorType::ConflictError
                } else {
                    ErrorType::InternalError
                };
                ResolverError::new(error_type, format!("failed to {action} labor line"))
            }
            AppError::Store { action, source } => {
                tracing::error!(action, error = %source, "Labor line store operation failed");
                ResolverError::new(
                    ErrorType::InternalError,
                    format!("failed to {action} labor line"),
                )
            }

            // --- Resolver-specific errors ---
            err @ AppError::BadInput(_) => {
                ResolverError::new(ErrorType::ValidationError, err.to_string())
            }
            AppError::Unsupported(name) => ResolverError::new(
                ErrorType::UnsupportedOperation,
                format!("unsupported operation: {name}"),
            )
            .with_info("fieldName", name),
            AppError::Config(err) => {
                tracing::error!(error = %err, "Resolver is not configured");
                ResolverError::new(ErrorType::ConfigurationError, err.to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                ResolverError::new(ErrorType::InternalError, "an internal error occurred")
            }
        }
    }
}
