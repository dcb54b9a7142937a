//! # Column Resolution
//!
//! Parses the header row into a [`ColumnMap`], once per load.
//!
//! ```text
//!   Row 1:  No │ Barcode │ Item Name │ Inventory Quantity │ Quantity Sold │ ...
//!            0 │    1    │     2     │         3          │       4       │
//!                   │          │              │                   │
//!                   ▼          ▼              ▼                   ▼
//!   ColumnMap { barcode: 1, item_name: 2, inventory_quantity: 3,
//!               quantity_sold: Some(4), ... }
//! ```
//!
//! Header order is free; only the header text matters.

use tally_core::InventoryField;

use crate::error::{SheetError, SheetResult};
use crate::table::{Cell, Table};

/// Header row of a freshly created monthly workbook.
pub const DEFAULT_HEADERS: [&str; 11] = [
    "No",
    "Barcode",
    "Item Name",
    "Inventory Quantity",
    "Quantity Sold",
    "Quantity Left",
    "Original Price",
    "Sale Price",
    "Total Profit",
    "Invested",
    "Clean Profit",
];

/// Header of the optional sold-units column.
pub const QUANTITY_SOLD_HEADER: &str = "Quantity Sold";

/// Column indexes (0-based) of the fields the store reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub barcode: usize,
    pub item_name: usize,
    pub inventory_quantity: usize,
    pub original_price: usize,
    pub sale_price: usize,
    pub quantity_sold: Option<usize>,
}

impl ColumnMap {
    /// Column of a required field.
    pub fn get(&self, field: InventoryField) -> usize {
        match field {
            InventoryField::Barcode => self.barcode,
            InventoryField::ItemName => self.item_name,
            InventoryField::InventoryQuantity => self.inventory_quantity,
            InventoryField::OriginalPrice => self.original_price,
            InventoryField::SalePrice => self.sale_price,
        }
    }
}

/// Resolves column positions from row 1.
///
/// Header text is compared after trimming. When a header appears twice
/// the leftmost wins. Fails with [`SheetError::Schema`] naming every
/// required header that is absent, in canonical field order.
pub fn resolve_columns(table: &Table) -> SheetResult<ColumnMap> {
    let position = |name: &str| {
        table
            .header()
            .iter()
            .position(|cell| matches!(cell, Cell::Text(h) if h.trim() == name))
    };

    let found: Vec<Option<usize>> = InventoryField::ALL
        .iter()
        .map(|field| position(field.header()))
        .collect();

    let missing: Vec<String> = InventoryField::ALL
        .iter()
        .zip(&found)
        .filter(|(_, col)| col.is_none())
        .map(|(field, _)| field.header().to_string())
        .collect();

    match found.as_slice() {
        [
            Some(barcode),
            Some(item_name),
            Some(inventory_quantity),
            Some(original_price),
            Some(sale_price),
        ] => Ok(ColumnMap {
            barcode: *barcode,
            item_name: *item_name,
            inventory_quantity: *inventory_quantity,
            original_price: *original_price,
            sale_price: *sale_price,
            quantity_sold: position(QUANTITY_SOLD_HEADER),
        }),
        _ => Err(SheetError::Schema { missing }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_headers(headers: &[&str]) -> Table {
        let mut table = Table::new("May");
        table.push_row(headers.iter().map(|h| Cell::text(*h)).collect());
        table
    }

    #[test]
    fn test_default_headers_resolve() {
        let map = resolve_columns(&table_with_headers(&DEFAULT_HEADERS)).unwrap();
        assert_eq!(map.barcode, 1);
        assert_eq!(map.item_name, 2);
        assert_eq!(map.inventory_quantity, 3);
        assert_eq!(map.original_price, 6);
        assert_eq!(map.sale_price, 7);
        assert_eq!(map.quantity_sold, Some(4));
        assert_eq!(map.get(InventoryField::SalePrice), 7);
    }

    #[test]
    fn test_order_independent_and_trimmed() {
        let map = resolve_columns(&table_with_headers(&[
            " Sale Price ",
            "Item Name",
            "Barcode",
            "Original Price",
            "Inventory Quantity",
        ]))
        .unwrap();
        assert_eq!(map.sale_price, 0);
        assert_eq!(map.barcode, 2);
        assert_eq!(map.quantity_sold, None);
    }

    #[test]
    fn test_missing_headers_all_reported() {
        let table = table_with_headers(&["Item Name", "Original Price"]);
        let err = resolve_columns(&table).unwrap_err();
        match err {
            SheetError::Schema { missing } => assert_eq!(
                missing,
                vec!["Barcode", "Inventory Quantity", "Sale Price"]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_table_misses_everything() {
        let err = resolve_columns(&Table::new("May")).unwrap_err();
        assert!(matches!(err, SheetError::Schema { missing } if missing.len() == 5));
    }
}
