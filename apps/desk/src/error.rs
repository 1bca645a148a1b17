//! # API Error Type
//!
//! Unified error type for desk commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Aqua Quote                             │
//! │                                                                         │
//! │  Front end                   Rust Backend                               │
//! │  ─────────                   ────────────                               │
//! │                                                                         │
//! │  add_to_quote(...)                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store Error? ──── StoreError::Persistence { .. } ──┐            │  │
//! │  │         │                                           │            │  │
//! │  │         ▼                                           ▼            │  │
//! │  │  Core Error? ───── PricingError::MissingMargin ──► ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "PRICING_ERROR", "message": "A margin is required ..." }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is shown to the operator and the session continues. Nothing
//! is retried.

use serde::Serialize;
use ts_rs::TS;

use aqua_core::{CoreError, QuoteStateError};
use aqua_store::StoreError;

/// Error returned from desk commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "QUOTE_STATE",
///   "message": "A client name is required"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product id not in the catalog
    NotFound,

    /// Bad form field, quantity or pricing mode
    ValidationError,

    /// Missing, negative or unreadable margin
    PricingError,

    /// Export attempted on an empty quote or without a client
    QuoteState,

    /// Catalog file missing or unreadable (session continues empty)
    CatalogLoad,

    /// Catalog file could not be written
    Persistence,

    /// Quote document could not be written
    ExportFailed,
}

/// Result type for desk commands.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn export_failed(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ExportFailed, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::Pricing(e) => ApiError::new(ErrorCode::PricingError, e.to_string()),
            CoreError::QuoteState(e) => ApiError::from(e),
        }
    }
}

impl From<QuoteStateError> for ApiError {
    fn from(err: QuoteStateError) -> Self {
        ApiError::new(ErrorCode::QuoteState, err.to_string())
    }
}

impl From<aqua_core::ValidationError> for ApiError {
    fn from(err: aqua_core::ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<aqua_core::PricingError> for ApiError {
    fn from(err: aqua_core::PricingError) -> Self {
        ApiError::new(ErrorCode::PricingError, err.to_string())
    }
}

/// Converts store errors to API errors.
///
/// The store already logged the failure with its path; the message passed
/// on keeps the path so the operator knows which file to check.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::Load { .. } => ApiError::new(ErrorCode::CatalogLoad, err.to_string()),
            StoreError::Persistence { .. } => {
                tracing::error!("Catalog edit not saved: {}", err);
                ApiError::new(ErrorCode::Persistence, err.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
