//! # Store State
//!
//! Wraps the month's `Workbook` for use in commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub fn get_item(store: &StoreState, barcode: &str) -> Result<ItemDto, ApiError> {
//!     let record = store.catalog().get_by_barcode(barcode)?;
//!     ...
//! }
//! ```

use tally_sheet::{CatalogStore, Workbook};

/// Wrapper around the month's `Workbook`.
#[derive(Debug, Clone)]
pub struct StoreState {
    workbook: Workbook,
}

impl StoreState {
    pub fn new(workbook: Workbook) -> Self {
        StoreState { workbook }
    }

    /// Returns a reference to the inner Workbook.
    pub fn inner(&self) -> &Workbook {
        &self.workbook
    }

    /// Catalog store over the month's file.
    pub fn catalog(&self) -> CatalogStore {
        self.workbook.catalog()
    }
}
