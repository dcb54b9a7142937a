//! # Validation Module
//!
//! Parsing and coercion of inventory form fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Register input                                               │
//! │  └── Raw text split into an ItemForm                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── trim, required, length                                            │
//! │  ├── prices → non-negative Money (2 decimals)                          │
//! │  └── quantity → non-negative integer                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog store                                                │
//! │  └── header schema check before any cell is written                    │
//! │                                                                         │
//! │  A form that fails here never reaches the workbook.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::validate_form;
//! use tally_core::ItemForm;
//!
//! let form = ItemForm::new("111", "Milk", "1.80", "2.50", "10");
//! let record = validate_form(&form).unwrap();
//! assert_eq!(record.sale_price.cents(), 250);
//! ```

use crate::error::ValidationError;
use crate::money::{Money, ParseMoneyError};
use crate::types::{InventoryField, InventoryRecord, ItemForm};
use crate::{MAX_BARCODE_LEN, MAX_ITEM_NAME_LEN, MAX_PRICE_CENTS, MAX_STOCK_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Form Validation
// =============================================================================

/// Validates every field of the form, first failure wins.
///
/// Field order matches the form: barcode, item name, original price,
/// sale price, inventory quantity.
pub fn validate_form(form: &ItemForm) -> ValidationResult<InventoryRecord> {
    let barcode = validate_barcode(&form.barcode)?;
    let item_name = validate_item_name(&form.item_name)?;
    let original_price = parse_price(InventoryField::OriginalPrice, &form.original_price)?;
    let sale_price = parse_price(InventoryField::SalePrice, &form.sale_price)?;
    let inventory_quantity =
        parse_stock(InventoryField::InventoryQuantity, &form.inventory_quantity)?;

    Ok(InventoryRecord {
        barcode,
        item_name,
        inventory_quantity,
        original_price,
        sale_price,
    })
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a barcode and returns it trimmed.
///
/// ## Rules
/// - Must not be blank (blank keys are reserved for legacy rows)
/// - At most 64 characters
/// - No interior whitespace
/// - Must not start with `+` or `-` (the register reads those as adjustments)
pub fn validate_barcode(barcode: &str) -> ValidationResult<String> {
    let field = InventoryField::Barcode.name();
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if barcode.chars().count() > MAX_BARCODE_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_BARCODE_LEN,
        });
    }

    if barcode.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }

    if barcode.starts_with(['+', '-']) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not start with '+' or '-'".to_string(),
        });
    }

    Ok(barcode.to_string())
}

/// Validates an item name and returns it trimmed.
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let field = InventoryField::ItemName.name();
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_ITEM_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_ITEM_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a price between 0 and `MAX_PRICE_CENTS`, rounded to two decimals.
pub fn parse_price(field: InventoryField, raw: &str) -> ValidationResult<Money> {
    let price = Money::parse(raw).map_err(|err| match err {
        ParseMoneyError::Empty => ValidationError::Required {
            field: field.name().to_string(),
        },
        other => ValidationError::InvalidFormat {
            field: field.name().to_string(),
            reason: other.to_string(),
        },
    })?;

    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: field.name().to_string(),
        });
    }

    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.name().to_string(),
            min: 0,
            max: MAX_PRICE_CENTS / 100,
        });
    }

    Ok(price)
}

/// Parses a whole number of units between 0 and `MAX_STOCK_QUANTITY`.
///
/// `"10"` and `" 10 "` are accepted; `"10.5"` and `"ten"` are not.
pub fn parse_stock(field: InventoryField, raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.name().to_string(),
        });
    }

    let quantity: i64 = raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: field.name().to_string(),
        reason: format!("'{}' is not a whole number", raw),
    })?;

    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: field.name().to_string(),
        });
    }

    if quantity > MAX_STOCK_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: field.name().to_string(),
            min: 0,
            max: MAX_STOCK_QUANTITY,
        });
    }

    Ok(quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_form_ok() {
        let form = ItemForm::new(" 111 ", " Milk ", "1.8", "2.50", " 10 ");
        let record = validate_form(&form).unwrap();

        assert_eq!(record.barcode, "111");
        assert_eq!(record.item_name, "Milk");
        assert_eq!(record.original_price.cents(), 180);
        assert_eq!(record.sale_price.cents(), 250);
        assert_eq!(record.inventory_quantity, 10);
    }

    #[test]
    fn test_validate_form_names_sale_price() {
        let form = ItemForm::new("111", "Milk", "1.80", "abc", "10");
        let err = validate_form(&form).unwrap_err();

        assert_eq!(err.field(), "sale_price");
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_validate_barcode() {
        assert_eq!(validate_barcode(" 8801234 ").unwrap(), "8801234");
        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("   ").is_err());
        assert!(validate_barcode("88 01").is_err());
        assert!(validate_barcode(&"1".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Banana Milk 240ml").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(
            parse_price(InventoryField::SalePrice, "0").unwrap(),
            Money::zero()
        );
        assert_eq!(
            parse_price(InventoryField::SalePrice, "-1"),
            Err(ValidationError::Negative {
                field: "sale_price".to_string()
            })
        );
        assert_eq!(
            parse_price(InventoryField::OriginalPrice, ""),
            Err(ValidationError::Required {
                field: "original_price".to_string()
            })
        );
    }

    #[test]
    fn test_parse_stock() {
        assert_eq!(parse_stock(InventoryField::InventoryQuantity, "0").unwrap(), 0);
        assert_eq!(parse_stock(InventoryField::InventoryQuantity, " 42 ").unwrap(), 42);
        assert!(parse_stock(InventoryField::InventoryQuantity, "10.5").is_err());
        assert!(parse_stock(InventoryField::InventoryQuantity, "ten").is_err());
        assert!(parse_stock(InventoryField::InventoryQuantity, "-3").is_err());
        assert!(parse_stock(InventoryField::InventoryQuantity, "").is_err());
    }

    #[test]
    fn test_price_upper_bound() {
        assert_eq!(
            parse_price(InventoryField::SalePrice, "1000000000").unwrap().cents(),
            MAX_PRICE_CENTS
        );
        assert_eq!(
            parse_price(InventoryField::SalePrice, "1000000000.01"),
            Err(ValidationError::OutOfRange {
                field: "sale_price".to_string(),
                min: 0,
                max: 1_000_000_000,
            })
        );

        let form = ItemForm::new("1", "Gold", "0", "90000000000000000", "5");
        assert_eq!(validate_form(&form).unwrap_err().field(), "sale_price");
    }

    #[test]
    fn test_stock_upper_bound() {
        let field = InventoryField::InventoryQuantity;
        assert_eq!(parse_stock(field, "1000000000").unwrap(), MAX_STOCK_QUANTITY);
        assert!(matches!(
            parse_stock(field, "1000000001"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_barcode_rejects_leading_sign() {
        let err = validate_barcode("-123").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
        assert!(validate_barcode("+123").is_err());
        assert_eq!(validate_barcode("123-4").unwrap(), "123-4");
    }
}
