//! Resolver response envelope.
//!
//! Every invocation answers with `{ "data": ... }` or
//! `{ "error": { "message", "type", "errorInfo"? } }`. The envelope is
//! always well-formed; failures never escape as transport errors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error categories reported in the envelope's `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorType {
    ValidationError,
    ConflictError,
    NotFound,
    UnsupportedOperation,
    InternalError,
    ConfigurationError,
}

impl ErrorType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValidationError => "ValidationError",
            Self::ConflictError => "ConflictError",
            Self::NotFound => "NotFound",
            Self::UnsupportedOperation => "UnsupportedOperation",
            Self::InternalError => "InternalError",
            Self::ConfigurationError => "ConfigurationError",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error returned to the GraphQL layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverError {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    #[serde(rename = "errorInfo", default, skip_serializing_if = "Option::is_none")]
    pub error_info: Option<Map<String, Value>>,
}

impl ResolverError {
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error_type,
            error_info: None,
        }
    }

    pub fn with_info(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.error_info
            .get_or_insert_with(Map::new)
            .insert(key.to_string(), value.into());
        self
    }
}

/// `{ data?, error? }` envelope. Exactly one side is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResolverError>,
}

impl ResolverResponse {
    pub fn data(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn error(error: ResolverError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The error type, if this is an error response.
    pub fn error_type(&self) -> Option<ErrorType> {
        self.error.as_ref().map(|e| e.error_type)
    }
}
