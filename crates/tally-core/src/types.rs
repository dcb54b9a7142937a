//! # Domain Types
//!
//! Core domain types used throughout Tally POS.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ InventoryRecord │   │    ItemForm     │   │ InventoryField  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  barcode (key)  │◄──│  raw text as    │   │  Barcode        │       │
//! │  │  item_name      │   │  typed by staff │   │  ItemName       │       │
//! │  │  quantity       │   │  (validated by  │   │  ...            │       │
//! │  │  prices (Money) │   │   validation)   │   │  header ↔ field │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ScanOutcome   │   │  CommitOutcome  │   │ OversellPolicy  │       │
//! │  │  Added          │   │  NothingToSell  │   │  Clamp (default)│       │
//! │  │  ProductNotFound│   │  Sold(summary)  │   │  Reject         │       │
//! │  │  Ignored        │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::basket::BasketLine;
use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Inventory Field
// =============================================================================

/// The five columns every monthly sheet must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryField {
    Barcode,
    ItemName,
    InventoryQuantity,
    OriginalPrice,
    SalePrice,
}

impl InventoryField {
    /// Canonical order, also the order missing headers are reported in.
    pub const ALL: [InventoryField; 5] = [
        InventoryField::Barcode,
        InventoryField::ItemName,
        InventoryField::InventoryQuantity,
        InventoryField::OriginalPrice,
        InventoryField::SalePrice,
    ];

    /// Header text in row 1 of the sheet.
    pub const fn header(&self) -> &'static str {
        match self {
            InventoryField::Barcode => "Barcode",
            InventoryField::ItemName => "Item Name",
            InventoryField::InventoryQuantity => "Inventory Quantity",
            InventoryField::OriginalPrice => "Original Price",
            InventoryField::SalePrice => "Sale Price",
        }
    }

    /// Field name used in validation messages.
    pub const fn name(&self) -> &'static str {
        match self {
            InventoryField::Barcode => "barcode",
            InventoryField::ItemName => "item_name",
            InventoryField::InventoryQuantity => "inventory_quantity",
            InventoryField::OriginalPrice => "original_price",
            InventoryField::SalePrice => "sale_price",
        }
    }
}

impl fmt::Display for InventoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Inventory Record
// =============================================================================

/// One inventory row, typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Scanner code. Unique among non-blank values.
    pub barcode: String,

    /// Display name; also the key the sale commit decrements by.
    pub item_name: String,

    /// Units on hand. Never below zero after a decrement.
    pub inventory_quantity: i64,

    /// Purchase cost per unit.
    pub original_price: Money,

    /// Shelf price per unit; snapshotted into the basket on first scan.
    pub sale_price: Money,
}

impl InventoryRecord {
    /// Margin per unit (sale price minus original price).
    pub fn unit_margin(&self) -> Money {
        self.sale_price - self.original_price
    }
}

// =============================================================================
// Item Form
// =============================================================================

/// The inventory form exactly as typed, before validation.
///
/// Every field is raw text so that parse failures can name the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemForm {
    pub barcode: String,
    pub item_name: String,
    pub original_price: String,
    pub sale_price: String,
    pub inventory_quantity: String,
}

impl ItemForm {
    /// Builds a form from anything string-like.
    pub fn new(
        barcode: impl Into<String>,
        item_name: impl Into<String>,
        original_price: impl Into<String>,
        sale_price: impl Into<String>,
        inventory_quantity: impl Into<String>,
    ) -> Self {
        ItemForm {
            barcode: barcode.into(),
            item_name: item_name.into(),
            original_price: original_price.into(),
            sale_price: sale_price.into(),
            inventory_quantity: inventory_quantity.into(),
        }
    }

    /// Prefills a form from an existing record (edit flow).
    pub fn from_record(record: &InventoryRecord) -> Self {
        ItemForm {
            barcode: record.barcode.clone(),
            item_name: record.item_name.clone(),
            original_price: record.original_price.to_string(),
            sale_price: record.sale_price.to_string(),
            inventory_quantity: record.inventory_quantity.to_string(),
        }
    }
}

// =============================================================================
// Oversell Policy
// =============================================================================

/// What a commit does when the basket asks for more units than are stocked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OversellPolicy {
    /// Decrement anyway; the store floors quantity at zero.
    #[default]
    Clamp,

    /// Refuse the whole commit before writing anything.
    Reject,
}

impl FromStr for OversellPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clamp" => Ok(OversellPolicy::Clamp),
            "reject" => Ok(OversellPolicy::Reject),
            other => Err(ValidationError::InvalidFormat {
                field: "oversell".to_string(),
                reason: format!("'{}' is not one of: clamp, reject", other),
            }),
        }
    }
}

// =============================================================================
// Ledger Outcomes
// =============================================================================

/// Result of scanning one code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// The item is in the basket with this quantity.
    Added { item_name: String, quantity: i64 },

    /// No catalog row has this barcode; the basket is unchanged.
    ProductNotFound { code: String },

    /// The code was blank.
    Ignored,
}

/// What a committed sale did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleSummary {
    /// Lines as they were in the basket at commit time.
    pub lines: Vec<BasketLine>,

    /// Basket total at commit time.
    pub total: Money,

    /// Units successfully decremented.
    pub units: i64,

    /// Item names the catalog could not find; their stock is unchanged.
    pub unmatched: Vec<String>,
}

/// Result of committing the basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommitOutcome {
    /// The basket was empty; nothing was written.
    NothingToSell,

    /// Stock was decremented and the basket cleared.
    Sold(SaleSummary),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_headers_and_names() {
        assert_eq!(InventoryField::SalePrice.header(), "Sale Price");
        assert_eq!(InventoryField::SalePrice.name(), "sale_price");
        assert_eq!(InventoryField::ItemName.to_string(), "item_name");
    }

    #[test]
    fn test_oversell_policy_default_and_parse() {
        assert_eq!(OversellPolicy::default(), OversellPolicy::Clamp);
        assert_eq!("Reject".parse::<OversellPolicy>().unwrap(), OversellPolicy::Reject);
        assert!("maybe".parse::<OversellPolicy>().is_err());
    }

    #[test]
    fn test_form_from_record() {
        let record = InventoryRecord {
            barcode: "111".to_string(),
            item_name: "Milk".to_string(),
            inventory_quantity: 10,
            original_price: Money::from_cents(180),
            sale_price: Money::from_cents(250),
        };
        let form = ItemForm::from_record(&record);
        assert_eq!(form.sale_price, "2.50");
        assert_eq!(form.inventory_quantity, "10");
        assert_eq!(record.unit_margin(), Money::from_cents(70));
    }

    #[test]
    fn test_scan_outcome_serializes_tagged() {
        let outcome = ScanOutcome::ProductNotFound {
            code: "999".to_string(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"outcome":"product_not_found","code":"999"}"#);
    }
}
