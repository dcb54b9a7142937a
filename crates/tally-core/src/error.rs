//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Basket and ledger failures                     │
//! │  └── ValidationError  - A field failed to parse or coerce              │
//! │                                                                         │
//! │  tally-sheet errors (separate crate)                                   │
//! │  └── SheetError       - Schema, missing file, workbook I/O             │
//! │                                                                         │
//! │  Register errors (in app)                                              │
//! │  └── ApiError         - What the cashier sees                          │
//! │                                                                         │
//! │  Flow: ValidationError → SheetError / CoreError → ApiError → Screen    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Basket and ledger errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The basket has no line with this item name.
    #[error("{0} is not in the basket")]
    NotInBasket(String),

    /// Committing would sell more units than the catalog holds.
    ///
    /// Only raised under [`OversellPolicy::Reject`](crate::OversellPolicy).
    #[error("Insufficient stock for {item}: available {available}, requested {requested}")]
    InsufficientStock {
        item: String,
        available: i64,
        requested: i64,
    },

    /// Basket has exceeded maximum allowed lines.
    #[error("Basket cannot have more than {max} items")]
    BasketTooLarge { max: usize },

    /// Line quantity exceeds maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The catalog behind the ledger failed (file missing, unreadable, ...).
    #[error("Catalog error: {0}")]
    Catalog(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl CoreError {
    /// Wraps a catalog implementation error.
    pub fn catalog(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        CoreError::Catalog(Box::new(err))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// `field` is always the snake_case field name (`sale_price`, `barcode`, ...)
/// so the register can point at the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// The text does not parse as the expected kind of value.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

impl ValidationError {
    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::Negative { field }
            | ValidationError::OutOfRange { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
