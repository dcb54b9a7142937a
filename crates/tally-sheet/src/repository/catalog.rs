//! # Catalog Store
//!
//! Inventory rows of the monthly workbook.
//!
//! ## Key Operations
//! - Barcode-keyed upsert (validated before the file is touched)
//! - Typed read by barcode
//! - Single-unit stock decrement by item name
//!
//! ## Row Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    find_row_by_key(table, col, "111")                   │
//! │                                                                         │
//! │  row 1  │ Barcode │ Item Name │ ...   ← header, skipped                │
//! │  row 2  │ 222     │ Bread     │       ← "222" ≠ "111"                   │
//! │  row 3  │         │ Legacy    │       ← blank keys never match         │
//! │  row 4  │ 111.0   │ Milk      │ ← MATCH (whole number → "111")         │
//! │  row 5  │ 111     │ Milk dup  │       ← not reached, first wins        │
//! │                                                                         │
//! │  first_empty_row(table, col) → 3 (first blank key cell)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tally_core::validation::validate_form;
use tally_core::{Catalog, InventoryField, InventoryRecord, ItemForm, Money, ValidationError};
use tracing::{debug, info};

pub use crate::columns::{resolve_columns, ColumnMap};
use crate::error::{SheetError, SheetResult};
use crate::table::{number_text, Cell, Table, FIRST_DATA_ROW};

// =============================================================================
// Row Lookup
// =============================================================================

/// First data row whose `column` cell equals `key` (both trimmed).
///
/// A blank key matches nothing.
pub fn find_row_by_key(table: &Table, column: usize, key: &str) -> Option<usize> {
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    (FIRST_DATA_ROW..=table.last_row())
        .find(|&row| table.cell(row, column).key_text().as_deref() == Some(key))
}

/// First data row whose `key_column` cell is blank, else one past the last row.
pub fn first_empty_row(table: &Table, key_column: usize) -> usize {
    let last = table.last_row();
    (FIRST_DATA_ROW..=last)
        .find(|&row| table.cell(row, key_column).is_blank())
        .unwrap_or_else(|| (last + 1).max(FIRST_DATA_ROW))
}

// =============================================================================
// Read Coercion
// =============================================================================

/// Lenient: anything that is not a number reads as 0.
fn read_quantity(cell: &Cell) -> i64 {
    match cell {
        Cell::Number(n) if n.is_finite() => n.trunc() as i64,
        Cell::Text(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                })
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Strict: a price cell must be empty, a number, or numeric text.
fn read_price(field: InventoryField, cell: &Cell) -> Result<Money, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidFormat {
        field: field.name().to_string(),
        reason,
    };

    match cell {
        Cell::Empty => Ok(Money::zero()),
        Cell::Number(n) => {
            Money::from_major_f64(*n).ok_or_else(|| invalid(format!("{} is not a price", n)))
        }
        Cell::Text(s) if s.trim().is_empty() => Ok(Money::zero()),
        Cell::Text(s) => Money::parse(s).map_err(|e| invalid(e.to_string())),
        Cell::Bool(_) | Cell::Formula(_) => Err(invalid("cell is not a number".to_string())),
    }
}

fn read_text(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => s.trim().to_string(),
        Cell::Number(n) => number_text(*n),
        _ => String::new(),
    }
}

fn record_at(table: &Table, columns: &ColumnMap, row: usize) -> SheetResult<InventoryRecord> {
    Ok(InventoryRecord {
        barcode: read_text(table.cell(row, columns.barcode)),
        item_name: read_text(table.cell(row, columns.item_name)),
        inventory_quantity: read_quantity(table.cell(row, columns.inventory_quantity)),
        original_price: read_price(
            InventoryField::OriginalPrice,
            table.cell(row, columns.original_price),
        )?,
        sale_price: read_price(InventoryField::SalePrice, table.cell(row, columns.sale_price))?,
    })
}

// =============================================================================
// Catalog Store
// =============================================================================

/// Where an upsert landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UpsertOutcome {
    Inserted { row: usize },
    Updated { row: usize },
}

impl UpsertOutcome {
    pub fn row(&self) -> usize {
        match self {
            UpsertOutcome::Inserted { row } | UpsertOutcome::Updated { row } => *row,
        }
    }
}

/// Store for inventory rows in one workbook file.
///
/// Each call loads the file, works on the snapshot, and (for writes)
/// atomically replaces the file.
///
/// ## Usage
/// ```rust,ignore
/// let store = workbook.catalog();
///
/// store.upsert(&ItemForm::new("111", "Milk", "1.80", "2.50", "10"))?;
/// let milk = store.get_by_barcode("111")?;
/// let left = store.decrement_stock("Milk")?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Creates a store over an existing workbook file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CatalogStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> SheetResult<(Table, ColumnMap)> {
        if !self.path.exists() {
            return Err(SheetError::FileMissing(self.path.clone()));
        }
        let table = Table::load(&self.path)?;
        let columns = resolve_columns(&table)?;
        Ok((table, columns))
    }

    /// Inserts or updates the row keyed by the form's barcode.
    ///
    /// ## Order of Checks
    /// 1. Every field parses (else `Validation`, file untouched)
    /// 2. Row 1 carries every required header (else `Schema`, file untouched)
    /// 3. Barcode found → overwrite that row; otherwise first empty row
    pub fn upsert(&self, form: &ItemForm) -> SheetResult<UpsertOutcome> {
        let record = validate_form(form)?;
        let (mut table, columns) = self.load()?;

        let outcome = match find_row_by_key(&table, columns.barcode, &record.barcode) {
            Some(row) => UpsertOutcome::Updated { row },
            None => UpsertOutcome::Inserted {
                row: first_empty_row(&table, columns.barcode),
            },
        };
        let row = outcome.row();

        table.set(row, columns.barcode, Cell::text(record.barcode.as_str()));
        table.set(row, columns.item_name, Cell::text(record.item_name.as_str()));
        table.set(
            row,
            columns.inventory_quantity,
            Cell::Number(record.inventory_quantity as f64),
        );
        table.set(
            row,
            columns.original_price,
            Cell::Number(record.original_price.to_major_f64()),
        );
        table.set(
            row,
            columns.sale_price,
            Cell::Number(record.sale_price.to_major_f64()),
        );

        table.save(&self.path)?;

        info!(
            barcode = %record.barcode,
            item = %record.item_name,
            row = row,
            outcome = ?outcome,
            "Item saved"
        );
        Ok(outcome)
    }

    /// Reads the first row with this barcode.
    pub fn get_by_barcode(&self, barcode: &str) -> SheetResult<Option<InventoryRecord>> {
        debug!(barcode = %barcode, "Looking up item");

        let (table, columns) = self.load()?;
        find_row_by_key(&table, columns.barcode, barcode)
            .map(|row| record_at(&table, &columns, row))
            .transpose()
    }

    /// Current stock of the first row with this item name.
    pub fn stock_of(&self, item_name: &str) -> SheetResult<Option<i64>> {
        let (table, columns) = self.load()?;
        Ok(find_row_by_key(&table, columns.item_name, item_name)
            .map(|row| read_quantity(table.cell(row, columns.inventory_quantity))))
    }

    /// Removes one unit of stock, flooring at zero, and counts it in
    /// `Quantity Sold` when that column exists.
    ///
    /// Returns the new quantity. An unknown item name is
    /// [`SheetError::NotFound`] and leaves the file untouched.
    pub fn decrement_stock(&self, item_name: &str) -> SheetResult<i64> {
        let (mut table, columns) = self.load()?;

        let row = find_row_by_key(&table, columns.item_name, item_name)
            .ok_or_else(|| SheetError::not_found("Item", item_name.trim()))?;

        let current = read_quantity(table.cell(row, columns.inventory_quantity));
        let remaining = current.saturating_sub(1).max(0);
        table.set(row, columns.inventory_quantity, Cell::Number(remaining as f64));

        if let Some(sold_col) = columns.quantity_sold {
            let sold = read_quantity(table.cell(row, sold_col)).max(0).saturating_add(1);
            table.set(row, sold_col, Cell::Number(sold as f64));
        }

        table.save(&self.path)?;

        debug!(item = %item_name, row = row, from = current, to = remaining, "Stock decremented");
        Ok(remaining)
    }
}

impl Catalog for CatalogStore {
    type Error = SheetError;

    fn find_by_barcode(&self, barcode: &str) -> SheetResult<Option<InventoryRecord>> {
        CatalogStore::get_by_barcode(self, barcode)
    }

    fn stock_of(&self, item_name: &str) -> SheetResult<Option<i64>> {
        CatalogStore::stock_of(self, item_name)
    }

    fn decrement_stock(&self, item_name: &str) -> SheetResult<Option<i64>> {
        match CatalogStore::decrement_stock(self, item_name) {
            Ok(remaining) => Ok(Some(remaining)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
