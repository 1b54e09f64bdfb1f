//! Typed error handling for the product catalog
//!
//! Domain outcomes such as "not found" or "already exists" are ordinary
//! variants, so callers match on them instead of inspecting messages.
//!
//! # Error Categories
//!
//! - [`CatalogError`]: what the domain service reports to its caller
//! - [`StoreError`]: what a [`ProductStore`](crate::core::store::ProductStore) reports
//! - [`ValidationErrors`]: every field-level rule violation of one payload
//!
//! # Example
//!
//! ```rust,ignore
//! match catalog.get_by_code("1111-2222").await {
//!     Ok(product) => println!("Found: {:?}", product),
//!     Err(CatalogError::NotFound { code }) => println!("No product {}", code),
//!     Err(CatalogError::Validation(errors)) => println!("Bad input: {}", errors),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// The complete set of rule violations found in one payload
///
/// An empty set means the payload is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for `field`
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldViolation {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// Whether at least one violation concerns `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|v| v.field == field)
    }

    /// `Ok(())` when empty, otherwise the violations as an error
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self
            .0
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        write!(f, "{}", msgs.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors reported by a product store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Insert hit an existing primary key
    #[error("product '{code}' is already stored")]
    Conflict { code: String },

    /// Update or remove targeted a code that is not stored
    #[error("product '{code}' is not stored")]
    Absent { code: String },

    /// Backend failure (connection, query, lock poisoning, ...)
    #[error("{backend} store error: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },

    /// The store call did not finish within the configured bound
    #[error("store call '{operation}' timed out after {elapsed_ms} ms")]
    Timeout {
        operation: &'static str,
        elapsed_ms: u64,
    },
}

impl StoreError {
    pub fn backend(backend: &'static str, message: impl fmt::Display) -> Self {
        StoreError::Backend {
            backend,
            message: message.to_string(),
        }
    }

    /// A call to `operation` that did not finish within `limit`
    pub fn timeout(operation: &'static str, limit: Duration) -> Self {
        StoreError::Timeout {
            operation,
            elapsed_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

// =============================================================================
// Catalog Errors
// =============================================================================

/// Failures of the catalog domain service
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// One or more field-level rule violations; the store was not touched
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Create attempted for a code that is already present
    #[error("Product with code '{code}' already exists")]
    AlreadyExists { code: String },

    /// Get, update or delete targeted a code that is not present
    #[error("Product with code '{code}' not found")]
    NotFound { code: String },

    /// Any other failure (store unavailable, I/O, timeout)
    #[error("Unexpected failure: {0}")]
    Unexpected(StoreError),
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        CatalogError::Validation(errors)
    }
}

/// Store conflicts and absences are domain outcomes, everything else is unexpected
impl From<StoreError> for CatalogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { code } => CatalogError::AlreadyExists { code },
            StoreError::Absent { code } => CatalogError::NotFound { code },
            other => CatalogError::Unexpected(other),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CatalogError {
    /// Whether the caller can fix the request and retry
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, CatalogError::Unexpected(_))
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::AlreadyExists { .. } => StatusCode::CONFLICT,
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Validation(_) => "VALIDATION_FAILED",
            CatalogError::AlreadyExists { .. } => "PRODUCT_ALREADY_EXISTS",
            CatalogError::NotFound { .. } => "PRODUCT_NOT_FOUND",
            CatalogError::Unexpected(_) => "UNEXPECTED_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            CatalogError::Validation(errors) => Some(serde_json::json!({ "fields": errors })),
            CatalogError::AlreadyExists { code } | CatalogError::NotFound { code } => {
                Some(serde_json::json!({ "code": code }))
            }
            CatalogError::Unexpected(_) => None,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}
