//! # Product Commands
//!
//! Inventory form commands: add/update an item, look one up, prefill an edit.
//!
//! ## Add Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory Form Flow                                  │
//! │                                                                         │
//! │  add 111 | Milk | 1.80 | 2.50 | 10                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ItemForm (raw text, five fields)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogStore::upsert                                                  │
//! │   ├── parse fails ──► VALIDATION_ERROR "sale_price has invalid ..."    │
//! │   ├── header gone ──► SCHEMA_ERROR "Missing required columns: ..."     │
//! │   └── ok ─────────► "Item added/updated successfully!"                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::StoreState;
use tally_core::{InventoryRecord, ItemForm};
use tally_sheet::UpsertOutcome;

/// Item DTO for display and JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    pub barcode: String,
    pub item_name: String,
    pub inventory_quantity: i64,
    pub original_price_cents: i64,
    pub sale_price_cents: i64,
    pub unit_margin_cents: i64,
}

impl From<InventoryRecord> for ItemDto {
    fn from(r: InventoryRecord) -> Self {
        ItemDto {
            unit_margin_cents: r.unit_margin().cents(),
            barcode: r.barcode,
            item_name: r.item_name,
            inventory_quantity: r.inventory_quantity,
            original_price_cents: r.original_price.cents(),
            sale_price_cents: r.sale_price.cents(),
        }
    }
}

/// Result of saving the inventory form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSaved {
    pub outcome: UpsertOutcome,
    pub message: String,
}

/// Adds a new item or updates the row with the same barcode.
pub fn add_or_update_item(store: &StoreState, form: &ItemForm) -> Result<ItemSaved, ApiError> {
    debug!(barcode = %form.barcode, "add_or_update_item command");

    let outcome = store.catalog().upsert(form)?;
    Ok(ItemSaved {
        outcome,
        message: "Item added/updated successfully!".to_string(),
    })
}

/// Gets an item by barcode.
///
/// ## Returns
/// The item if found, or a `NOT_FOUND` error.
pub fn get_item(store: &StoreState, barcode: &str) -> Result<ItemDto, ApiError> {
    debug!(barcode = %barcode, "get_item command");

    let barcode = barcode.trim();
    store
        .catalog()
        .get_by_barcode(barcode)?
        .map(ItemDto::from)
        .ok_or_else(|| ApiError::not_found("Product", barcode))
}

/// Prefills the inventory form from an existing item (edit flow).
pub fn prefill_form(store: &StoreState, barcode: &str) -> Result<ItemForm, ApiError> {
    debug!(barcode = %barcode, "prefill_form command");

    let barcode = barcode.trim();
    store
        .catalog()
        .get_by_barcode(barcode)?
        .map(|record| ItemForm::from_record(&record))
        .ok_or_else(|| ApiError::not_found("Product", barcode))
}

/// Renders a form as the `add` line that would save it.
pub fn form_line(form: &ItemForm) -> String {
    format!(
        "add {} | {} | {} | {} | {}",
        form.barcode, form.item_name, form.original_price, form.sale_price, form.inventory_quantity
    )
}

/// Splits `BARCODE | NAME | ORIGINAL | SALE | QTY` into a form.
///
/// Exactly five `|`-separated parts are required; each part is passed on
/// untrimmed so validation sees what was typed.
pub fn parse_form(args: &str) -> Result<ItemForm, ApiError> {
    let parts: Vec<&str> = args.split('|').collect();
    match parts.as_slice() {
        [barcode, name, original, sale, qty] => {
            Ok(ItemForm::new(*barcode, *name, *original, *sale, *qty))
        }
        _ => Err(ApiError::validation(format!(
            "expected 5 fields (BARCODE | NAME | ORIGINAL | SALE | QTY), got {}",
            parts.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use tally_sheet::{SheetConfig, Workbook};
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> StoreState {
        let config =
            SheetConfig::new(dir.path()).date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        StoreState::new(Workbook::open(config).unwrap())
    }

    #[test]
    fn test_parse_form() {
        let form = parse_form("111 | Milk | 1.80 | 2.50 | 10").unwrap();
        assert_eq!(form.item_name, " Milk ");
        assert_eq!(form.inventory_quantity, " 10");

        let err = parse_form("111 | Milk").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_add_then_get() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let form = parse_form("111|Milk|1.80|2.50|10").unwrap();
        let saved = add_or_update_item(&store, &form).unwrap();
        assert_eq!(saved.outcome, UpsertOutcome::Inserted { row: 2 });
        assert_eq!(saved.message, "Item added/updated successfully!");

        let item = get_item(&store, " 111 ").unwrap();
        assert_eq!(item.item_name, "Milk");
        assert_eq!(item.sale_price_cents, 250);
        assert_eq!(item.unit_margin_cents, 70);
    }

    #[test]
    fn test_get_unknown_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = get_item(&store(&dir), "999").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 999");
    }

    #[test]
    fn test_bad_price_is_validation_error() {
        let dir = TempDir::new().unwrap();
        let err = add_or_update_item(&store(&dir), &parse_form("111|Milk|1.80|abc|10").unwrap())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.starts_with("sale_price"));
    }

    #[test]
    fn test_prefill_round_trips_through_add_line() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        add_or_update_item(&store, &parse_form("111 | Milk | 1.8 | 2.5 | 10").unwrap()).unwrap();

        let form = prefill_form(&store, "111").unwrap();
        let line = form_line(&form);
        assert_eq!(line, "add 111 | Milk | 1.80 | 2.50 | 10");

        let reparsed = parse_form(line.trim_start_matches("add ")).unwrap();
        let saved = add_or_update_item(&store, &reparsed).unwrap();
        assert_eq!(saved.outcome, UpsertOutcome::Updated { row: 2 });

        let err = prefill_form(&store, "404").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
