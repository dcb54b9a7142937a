//! # Basket
//!
//! The current sale, held in memory only.
//!
//! ## Basket Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Basket Operations                                    │
//! │                                                                         │
//! │  Register Action          Ledger Call             Basket Change         │
//! │  ───────────────          ───────────             ─────────────         │
//! │                                                                         │
//! │  Scan barcode ───────────► scan() ──────────────► add_scanned(record)   │
//! │                                                                         │
//! │  + / - on a line ────────► adjust_quantity() ───► adjust(name, ±1)      │
//! │                                                                         │
//! │  Sell / Clear ───────────► commit_sale() / clear() ► clear()            │
//! │                                                                         │
//! │  Lines are keyed by item name. A line whose quantity reaches zero is   │
//! │  removed; scanning the item again starts a fresh line at 1.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::InventoryRecord;
use crate::{MAX_BASKET_LINES, MAX_ITEM_QUANTITY};

/// One line of the basket.
///
/// The unit price is frozen when the line is created; later catalog edits
/// do not reach an open basket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketLine {
    /// Barcode that created the line.
    pub barcode: String,

    /// Item name, the line key.
    pub item_name: String,

    /// Units in the basket, always >= 1.
    pub quantity: i64,

    /// Sale price at first scan.
    pub unit_price: Money,
}

impl BasketLine {
    /// Starts a line at quantity 1 from a catalog record.
    pub fn from_record(record: &InventoryRecord) -> Self {
        BasketLine {
            barcode: record.barcode.clone(),
            item_name: record.item_name.clone(),
            quantity: 1,
            unit_price: record.sale_price,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// The in-memory sale basket.
///
/// ## Invariants
/// - Lines are unique by `item_name`, in first-scan order
/// - Every line has 1 <= quantity <= MAX_ITEM_QUANTITY
/// - At most MAX_BASKET_LINES lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    lines: Vec<BasketLine>,
}

impl Basket {
    /// Creates a new empty basket.
    pub fn new() -> Self {
        Basket { lines: Vec::new() }
    }

    /// Adds one unit of a scanned record.
    ///
    /// Returns the line's quantity after the scan.
    pub fn add_scanned(&mut self, record: &InventoryRecord) -> CoreResult<i64> {
        if let Some(line) = self.line_mut(&record.item_name) {
            let new_qty = line.quantity + 1;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = new_qty;
            return Ok(new_qty);
        }

        if self.lines.len() >= MAX_BASKET_LINES {
            return Err(CoreError::BasketTooLarge {
                max: MAX_BASKET_LINES,
            });
        }

        self.lines.push(BasketLine::from_record(record));
        Ok(1)
    }

    /// Applies `delta` to a line's quantity.
    ///
    /// Returns the new quantity, or `None` when the line dropped to zero or
    /// below and was removed.
    pub fn adjust(&mut self, item_name: &str, delta: i64) -> CoreResult<Option<i64>> {
        let index = self
            .lines
            .iter()
            .position(|l| l.item_name == item_name)
            .ok_or_else(|| CoreError::NotInBasket(item_name.to_string()))?;

        let new_qty = self.lines[index].quantity.saturating_add(delta);
        if new_qty <= 0 {
            self.lines.remove(index);
            return Ok(None);
        }

        if new_qty > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: new_qty,
                max: MAX_ITEM_QUANTITY,
            });
        }

        self.lines[index].quantity = new_qty;
        Ok(Some(new_qty))
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in first-scan order.
    pub fn lines(&self) -> &[BasketLine] {
        &self.lines
    }

    /// Looks up a line by item name.
    pub fn line(&self, item_name: &str) -> Option<&BasketLine> {
        self.lines.iter().find(|l| l.item_name == item_name)
    }

    fn line_mut(&mut self, item_name: &str) -> Option<&mut BasketLine> {
        self.lines.iter_mut().find(|l| l.item_name == item_name)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals, recomputed on every call.
    pub fn total(&self) -> Money {
        self.lines.iter().map(BasketLine::line_total).sum()
    }

    /// Checks if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(barcode: &str, name: &str, sale_cents: i64) -> InventoryRecord {
        InventoryRecord {
            barcode: barcode.to_string(),
            item_name: name.to_string(),
            inventory_quantity: 10,
            original_price: Money::zero(),
            sale_price: Money::from_cents(sale_cents),
        }
    }

    fn assert_total_matches_lines(basket: &Basket) {
        let expected: i64 = basket
            .lines()
            .iter()
            .map(|l| l.quantity * l.unit_price.cents())
            .sum();
        assert_eq!(basket.total().cents(), expected);
    }

    #[test]
    fn test_add_scanned_creates_then_increments() {
        let mut basket = Basket::new();
        let milk = record("111", "Milk", 250);

        assert_eq!(basket.add_scanned(&milk).unwrap(), 1);
        assert_eq!(basket.add_scanned(&milk).unwrap(), 2);

        assert_eq!(basket.line_count(), 1);
        assert_eq!(basket.total().cents(), 500);
    }

    #[test]
    fn test_price_is_snapshotted_on_first_scan() {
        let mut basket = Basket::new();
        basket.add_scanned(&record("111", "Milk", 250)).unwrap();
        basket.add_scanned(&record("111", "Milk", 999)).unwrap();

        let line = basket.line("Milk").unwrap();
        assert_eq!(line.unit_price.cents(), 250);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_adjust_removes_at_zero_and_rescan_restarts() {
        let mut basket = Basket::new();
        let milk = record("111", "Milk", 250);
        basket.add_scanned(&milk).unwrap();
        basket.add_scanned(&milk).unwrap();

        assert_eq!(basket.adjust("Milk", -1).unwrap(), Some(1));
        assert_eq!(basket.adjust("Milk", -1).unwrap(), None);
        assert!(basket.is_empty());
        assert!(basket.total().is_zero());

        assert_eq!(basket.add_scanned(&milk).unwrap(), 1);
    }

    #[test]
    fn test_adjust_unknown_line() {
        let mut basket = Basket::new();
        let err = basket.adjust("Bread", 1).unwrap_err();
        assert!(matches!(err, CoreError::NotInBasket(name) if name == "Bread"));
    }

    #[test]
    fn test_total_tracks_every_mutation() {
        let mut basket = Basket::new();
        let milk = record("111", "Milk", 250);
        let bread = record("222", "Bread", 1999);

        basket.add_scanned(&milk).unwrap();
        assert_total_matches_lines(&basket);
        basket.add_scanned(&bread).unwrap();
        assert_total_matches_lines(&basket);
        basket.adjust("Bread", 3).unwrap();
        assert_total_matches_lines(&basket);
        basket.adjust("Milk", -5).unwrap();
        assert_total_matches_lines(&basket);

        assert_eq!(basket.total().cents(), 4 * 1999);
        assert_eq!(basket.total_quantity(), 4);
    }

    #[test]
    fn test_quantity_limit() {
        let mut basket = Basket::new();
        let milk = record("111", "Milk", 250);
        basket.add_scanned(&milk).unwrap();
        basket.adjust("Milk", MAX_ITEM_QUANTITY - 1).unwrap();

        assert!(matches!(
            basket.add_scanned(&milk),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert_eq!(basket.line("Milk").unwrap().quantity, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_line_limit() {
        let mut basket = Basket::new();
        for i in 0..MAX_BASKET_LINES {
            basket
                .add_scanned(&record(&i.to_string(), &format!("Item {}", i), 100))
                .unwrap();
        }

        let err = basket.add_scanned(&record("x", "One Too Many", 100)).unwrap_err();
        assert!(matches!(err, CoreError::BasketTooLarge { .. }));
    }

    #[test]
    fn test_full_basket_at_max_price_does_not_overflow() {
        let mut basket = Basket::new();
        for i in 0..MAX_BASKET_LINES {
            let item = record(&i.to_string(), &format!("Gold {}", i), crate::MAX_PRICE_CENTS);
            basket.add_scanned(&item).unwrap();
            basket.adjust(&item.item_name, MAX_ITEM_QUANTITY - 1).unwrap();
        }

        let expected = crate::MAX_PRICE_CENTS * MAX_ITEM_QUANTITY * MAX_BASKET_LINES as i64;
        assert_eq!(basket.total().cents(), expected);
        assert_total_matches_lines(&basket);
    }

    #[test]
    fn test_oversized_price_saturates_instead_of_panicking() {
        let mut basket = Basket::new();
        let gold = record("1", "Gold", 90_000_000_000_000_000);
        basket.add_scanned(&gold).unwrap();
        basket.add_scanned(&gold).unwrap();

        assert_eq!(basket.total().cents(), i64::MAX);
    }

    #[test]
    fn test_clear() {
        let mut basket = Basket::new();
        basket.add_scanned(&record("111", "Milk", 250)).unwrap();
        basket.clear();
        assert!(basket.is_empty());
        assert_eq!(basket.total(), Money::zero());
    }
}
