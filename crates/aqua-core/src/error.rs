//! # Error Types
//!
//! Domain-specific error types for aqua-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  aqua-core errors (this file)                                          │
//! │  ├── CoreError        - Umbrella for everything below                  │
//! │  ├── ValidationError  - Bad product fields, bad quantity               │
//! │  ├── PricingError     - Bad margin, arithmetic overflow                │
//! │  ├── CatalogParseError - Catalog JSON malformed or invalid             │
//! │  └── QuoteStateError  - Export on empty quote / without client         │
//! │                                                                         │
//! │  aqua-store errors (separate crate)                                    │
//! │  └── StoreError       - Catalog file load / save failures              │
//! │                                                                         │
//! │  Desk app errors                                                       │
//! │  └── ApiError         - What the front end shows the operator          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Front end              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal. Every one of them is caused by operator input
//! and is shown back to the operator.

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No catalog entry carries this id.
    #[error("Product not found: {0}")]
    ProductNotFound(u32),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Pricing error (wraps PricingError).
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Quote is not in a state that allows the requested operation.
    #[error("Quote error: {0}")]
    QuoteState(#[from] QuoteStateError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before anything is mutated: a rejected product edit leaves the
/// catalog exactly as it was, a rejected quantity leaves the quote alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value does not parse, or parses to something the field cannot hold
    /// (negative money, fractional case count).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two catalog entries share an id.
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Shorthand for an [`ValidationError::InvalidFormat`].
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The field this error points at.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Duplicate { field, .. } => field,
        }
    }
}

// =============================================================================
// Pricing Error
// =============================================================================

/// Wholesale pricing could not be computed.
///
/// Retail pricing never fails; every variant here is about the margin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Wholesale mode was chosen but no margin was given.
    #[error("A margin percentage is required for wholesale pricing")]
    MissingMargin,

    /// Margin was given but is below zero.
    #[error("Margin must not be negative (got {margin}%)")]
    NegativeMargin { margin: Decimal },

    /// Margin text is not a decimal number.
    #[error("Margin must be a valid number (got '{input}')")]
    InvalidMargin { input: String },

    /// Margin is above the accepted ceiling.
    #[error("Margin must be at most {max}% (got {margin}%)")]
    MarginTooLarge { margin: Decimal, max: Decimal },

    /// The price or a total does not fit in a decimal.
    #[error("Amount is too large to compute")]
    Overflow,
}

// =============================================================================
// Catalog Parse Error
// =============================================================================

/// The catalog document could not be turned into a [`Catalog`](crate::Catalog).
#[derive(Debug, Error)]
pub enum CatalogParseError {
    /// Not JSON, or not the expected shape.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed JSON holding a product that fails validation.
    #[error("invalid product in catalog: {0}")]
    Invalid(#[from] ValidationError),
}

// =============================================================================
// Quote State Error
// =============================================================================

/// The quote cannot be exported in its current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuoteStateError {
    /// No line items have been added.
    #[error("The quote has no products")]
    Empty,

    /// Client name is blank.
    #[error("A client name is required")]
    MissingClient,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
