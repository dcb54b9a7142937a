//! # Sheet Error Types
//!
//! Error types for workbook operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  calamine::Error / XlsxError / io::Error / ValidationError             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SheetError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in register app) ← Code + short message                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cashier sees "Product not found", "Missing columns: ..."              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use tally_core::ValidationError;
use thiserror::Error;

/// Workbook operation errors.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Required headers are missing from row 1.
    ///
    /// ## When This Occurs
    /// - Someone renamed or deleted a header in Excel
    /// - The file was not created by this tool
    ///
    /// The file is never written when this is raised.
    #[error("Missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A field failed to parse, on the way in or on the way out.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No row matches the key.
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    /// A read-only open found no file for the month.
    #[error("Workbook not found: {}", .0.display())]
    FileMissing(PathBuf),

    /// The workbook could not be parsed.
    #[error("Failed to read workbook: {0}")]
    Read(#[from] calamine::Error),

    /// The workbook could not be serialized.
    #[error("Failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// Filesystem failure (directory creation, temp file, rename).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetError {
    /// Creates a NotFound error for a given entity type and key.
    pub fn not_found(entity: impl Into<String>, key: impl Into<String>) -> Self {
        SheetError::NotFound {
            entity: entity.into(),
            key: key.into(),
        }
    }

    /// True for [`SheetError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, SheetError::NotFound { .. })
    }
}

/// Result type for workbook operations.
pub type SheetResult<T> = Result<T, SheetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_message_lists_every_header() {
        let err = SheetError::Schema {
            missing: vec!["Barcode".to_string(), "Sale Price".to_string()],
        };
        assert_eq!(err.to_string(), "Missing required columns: Barcode, Sale Price");
    }

    #[test]
    fn test_not_found() {
        let err = SheetError::not_found("Item", "Milk");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Item not found: Milk");
    }
}
