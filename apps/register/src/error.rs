//! # API Error Type
//!
//! Unified error type for register commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Tally POS                              │
//! │                                                                         │
//! │  Cashier types a line                                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Workbook Error? ─── SheetError::Schema { .. } ────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Basket Error? ─── CoreError::NotInBasket ─────── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Screen: "Error: Missing required columns: Barcode"                    │
//! │  JSON:   { "code": "SCHEMA_ERROR", "message": "..." }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is retried; the cashier decides what to do next.

use serde::Serialize;
use tally_core::CoreError;
use tally_sheet::SheetError;
use thiserror::Error;

/// API error returned from register commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 111"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or item not found
    NotFound,

    /// A field failed to parse
    ValidationError,

    /// Required header missing from the workbook
    SchemaError,

    /// Month workbook does not exist
    FileMissing,

    /// Workbook read/write failed
    StorageError,

    /// Basket operation failed
    BasketError,

    /// Insufficient stock
    InsufficientStock,

    /// Unrecognized register command
    UnknownCommand,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a basket error.
    pub fn basket(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BasketError, message)
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::StorageError, message)
    }
}

/// Converts workbook errors to API errors.
impl From<SheetError> for ApiError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::NotFound { entity, key } => ApiError::not_found(&entity, &key),
            SheetError::Validation(e) => ApiError::validation(e.to_string()),
            SheetError::Schema { .. } => ApiError::new(ErrorCode::SchemaError, err.to_string()),
            SheetError::FileMissing(_) => ApiError::new(ErrorCode::FileMissing, err.to_string()),
            SheetError::Read(e) => {
                tracing::error!("Workbook read failed: {}", e);
                ApiError::storage("Could not read the workbook")
            }
            SheetError::Write(e) => {
                tracing::error!("Workbook write failed: {}", e);
                ApiError::storage("Could not save the workbook")
            }
            SheetError::Io(e) => {
                tracing::error!("Workbook I/O failed: {}", e);
                ApiError::storage("Could not access the workbook file")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotInBasket(_) => ApiError::basket(err.to_string()),
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::BasketTooLarge { .. } | CoreError::QuantityTooLarge { .. } => {
                ApiError::basket(err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::Catalog(source) => match source.downcast::<SheetError>() {
                Ok(sheet) => ApiError::from(*sheet),
                Err(other) => {
                    tracing::error!("Catalog failed: {}", other);
                    ApiError::storage("Inventory is unavailable")
                }
            },
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

/// Failures that stop the register from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid setting: {0}")]
    Setting(#[from] tally_core::ValidationError),

    #[error(transparent)]
    Workbook(#[from] SheetError),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Unit Tests
// =============================================================================
