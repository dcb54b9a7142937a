//! # tally-sheet: Workbook Layer for Tally POS
//!
//! This crate owns every byte of file I/O in Tally POS. Inventory lives in
//! one `.xlsx` workbook per month, read with calamine and rewritten with
//! rust_xlsxwriter.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally POS Data Flow                              │
//! │                                                                         │
//! │  Register command (scan / sell / add)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tally-sheet (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Workbook    │    │  Repository   │    │    Table     │  │   │
//! │  │   │ (workbook.rs) │    │ (catalog.rs)  │    │  (table.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ month → path  │───►│ CatalogStore  │───►│ load / save  │  │   │
//! │  │   │ create once   │    │ ColumnMap     │    │ atomic swap  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                data/POS_2024_05.xlsx  (sheet "May")             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`workbook`] - Monthly file naming and creation
//! - [`table`] - In-memory worksheet snapshot, load and atomic save
//! - [`columns`] - Header row → [`ColumnMap`]
//! - [`error`] - Workbook error types
//! - [`repository`] - Catalog store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_sheet::{SheetConfig, Workbook};
//! use tally_core::ItemForm;
//!
//! let workbook = Workbook::open(SheetConfig::new("data"))?;
//! let store = workbook.catalog();
//!
//! store.upsert(&ItemForm::new("111", "Milk", "1.80", "2.50", "10"))?;
//! let milk = store.get_by_barcode("111")?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod columns;
pub mod error;
pub mod repository;
pub mod table;
pub mod workbook;

// =============================================================================
// Re-exports
// =============================================================================

pub use columns::{resolve_columns, ColumnMap};
pub use error::{SheetError, SheetResult};
pub use table::{Cell, Table};
pub use workbook::{SheetConfig, Workbook};

// Repository re-exports for convenience
pub use repository::catalog::{CatalogStore, UpsertOutcome};
