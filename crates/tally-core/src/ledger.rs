//! # Sale Ledger
//!
//! Basket accumulation and sale commit on top of a [`Catalog`].
//!
//! ## Commit Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        commit_sale()                                    │
//! │                                                                         │
//! │  basket empty? ──yes──► NothingToSell (no writes)                      │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  policy == Reject? ──yes──► stock_of(name) for every line              │
//! │       │                      shortfall ──► InsufficientStock (no writes)│
//! │       ▼                                                                 │
//! │  for line in basket:                                                    │
//! │      repeat line.quantity times: decrement_stock(line.item_name)       │
//! │          Some(_) ──► units += 1, basket line - 1                       │
//! │          None    ──► record in `unmatched`, drop line, next line       │
//! │          Err     ──► propagate, basket keeps unwritten units only      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  basket now empty ──► Sold(SaleSummary)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::mem;

use tracing::{debug, info, warn};

use crate::basket::Basket;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CommitOutcome, InventoryRecord, OversellPolicy, SaleSummary, ScanOutcome};

// =============================================================================
// Catalog Trait
// =============================================================================

/// The inventory the ledger sells from.
///
/// Lookups that find nothing return `Ok(None)`; `Err` is reserved for the
/// backing store failing.
pub trait Catalog {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Looks up a record by barcode (trimmed, first match wins).
    fn find_by_barcode(&self, barcode: &str) -> Result<Option<InventoryRecord>, Self::Error>;

    /// Current stock for an item name.
    fn stock_of(&self, item_name: &str) -> Result<Option<i64>, Self::Error>;

    /// Removes one unit of an item, flooring at zero.
    ///
    /// Returns the new quantity, or `None` when no row has this item name.
    fn decrement_stock(&self, item_name: &str) -> Result<Option<i64>, Self::Error>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    type Error = C::Error;

    fn find_by_barcode(&self, barcode: &str) -> Result<Option<InventoryRecord>, Self::Error> {
        (**self).find_by_barcode(barcode)
    }

    fn stock_of(&self, item_name: &str) -> Result<Option<i64>, Self::Error> {
        (**self).stock_of(item_name)
    }

    fn decrement_stock(&self, item_name: &str) -> Result<Option<i64>, Self::Error> {
        (**self).decrement_stock(item_name)
    }
}

// =============================================================================
// Sale Ledger
// =============================================================================

/// One register's open sale.
#[derive(Debug)]
pub struct SaleLedger<C> {
    catalog: C,
    basket: Basket,
    policy: OversellPolicy,
    input: String,
}

impl<C: Catalog> SaleLedger<C> {
    /// Creates a ledger with an empty basket and the default oversell policy.
    pub fn new(catalog: C) -> Self {
        Self::with_policy(catalog, OversellPolicy::default())
    }

    pub fn with_policy(catalog: C, policy: OversellPolicy) -> Self {
        SaleLedger {
            catalog,
            basket: Basket::new(),
            policy,
            input: String::new(),
        }
    }

    /// Scans one code into the basket.
    pub fn scan(&mut self, code: &str) -> CoreResult<ScanOutcome> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(ScanOutcome::Ignored);
        }

        let record = self
            .catalog
            .find_by_barcode(code)
            .map_err(CoreError::catalog)?;

        let Some(record) = record else {
            debug!(code = %code, "Scanned code not in catalog");
            return Ok(ScanOutcome::ProductNotFound {
                code: code.to_string(),
            });
        };

        let quantity = self.basket.add_scanned(&record)?;
        debug!(
            item = %record.item_name,
            quantity = quantity,
            total = %self.basket.total(),
            "Item scanned"
        );

        Ok(ScanOutcome::Added {
            item_name: record.item_name,
            quantity,
        })
    }

    /// The scan-input buffer.
    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    /// Scans whatever is in the input buffer. The buffer is empty afterwards
    /// whatever the outcome.
    pub fn submit_input(&mut self) -> CoreResult<ScanOutcome> {
        let code = mem::take(&mut self.input);
        self.scan(&code)
    }

    /// Changes a line's quantity by `delta`; the line goes away at zero.
    pub fn adjust_quantity(&mut self, item_name: &str, delta: i64) -> CoreResult<Option<i64>> {
        let quantity = self.basket.adjust(item_name, delta)?;
        debug!(item = %item_name, delta = delta, quantity = ?quantity, "Line adjusted");
        Ok(quantity)
    }

    pub fn total(&self) -> Money {
        self.basket.total()
    }

    /// Decrements stock for every unit in the basket, emptying it.
    ///
    /// Each unit leaves the basket as soon as its decrement is written, so
    /// after a storage error the basket holds exactly the unsold units.
    pub fn commit_sale(&mut self) -> CoreResult<CommitOutcome> {
        if self.basket.is_empty() {
            debug!("Commit with empty basket");
            return Ok(CommitOutcome::NothingToSell);
        }

        if self.policy == OversellPolicy::Reject {
            self.check_stock()?;
        }

        let lines = self.basket.lines().to_vec();
        let total = self.basket.total();
        let mut units = 0;
        let mut unmatched = Vec::new();

        for line in &lines {
            for _ in 0..line.quantity {
                let remaining = self
                    .catalog
                    .decrement_stock(&line.item_name)
                    .map_err(CoreError::catalog)?;

                if remaining.is_none() {
                    warn!(item = %line.item_name, "Sold item has no catalog row, stock unchanged");
                    unmatched.push(line.item_name.clone());
                    self.basket.adjust(&line.item_name, -line.quantity)?;
                    break;
                }
                // Written units leave the basket.
                self.basket.adjust(&line.item_name, -1)?;
                units += 1;
            }
        }

        info!(
            lines = lines.len(),
            units = units,
            total = %total,
            unmatched = unmatched.len(),
            "Sale committed"
        );

        Ok(CommitOutcome::Sold(SaleSummary {
            lines,
            total,
            units,
            unmatched,
        }))
    }

    fn check_stock(&self) -> CoreResult<()> {
        for line in self.basket.lines() {
            let available = self
                .catalog
                .stock_of(&line.item_name)
                .map_err(CoreError::catalog)?;

            if let Some(available) = available {
                if available < line.quantity {
                    return Err(CoreError::InsufficientStock {
                        item: line.item_name.clone(),
                        available,
                        requested: line.quantity,
                    });
                }
            }
        }
        Ok(())
    }

    /// Empties the basket without touching stock.
    pub fn clear(&mut self) {
        self.basket.clear();
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn policy(&self) -> OversellPolicy {
        self.policy
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Debug, thiserror::Error)]
    #[error("catalog offline")]
    struct Offline;

    /// Catalog held in memory. `fail_after` makes the n-th decrement fail.
    #[derive(Default)]
    struct MemoryCatalog {
        records: RefCell<Vec<InventoryRecord>>,
        fail_after: Cell<Option<usize>>,
    }

    impl MemoryCatalog {
        fn with(records: Vec<InventoryRecord>) -> Self {
            MemoryCatalog {
                records: RefCell::new(records),
                fail_after: Cell::new(None),
            }
        }

        fn quantity(&self, name: &str) -> i64 {
            self.records
                .borrow()
                .iter()
                .find(|r| r.item_name == name)
                .map(|r| r.inventory_quantity)
                .unwrap()
        }

        fn set_price(&self, barcode: &str, cents: i64) {
            let mut records = self.records.borrow_mut();
            let record = records.iter_mut().find(|r| r.barcode == barcode).unwrap();
            record.sale_price = Money::from_cents(cents);
        }
    }

    impl Catalog for MemoryCatalog {
        type Error = Offline;

        fn find_by_barcode(&self, barcode: &str) -> Result<Option<InventoryRecord>, Offline> {
            Ok(self
                .records
                .borrow()
                .iter()
                .find(|r| r.barcode == barcode.trim())
                .cloned())
        }

        fn stock_of(&self, item_name: &str) -> Result<Option<i64>, Offline> {
            Ok(self
                .records
                .borrow()
                .iter()
                .find(|r| r.item_name == item_name)
                .map(|r| r.inventory_quantity))
        }

        fn decrement_stock(&self, item_name: &str) -> Result<Option<i64>, Offline> {
            if let Some(left) = self.fail_after.get() {
                if left == 0 {
                    return Err(Offline);
                }
                self.fail_after.set(Some(left - 1));
            }

            let mut records = self.records.borrow_mut();
            Ok(records
                .iter_mut()
                .find(|r| r.item_name == item_name)
                .map(|r| {
                    r.inventory_quantity = (r.inventory_quantity - 1).max(0);
                    r.inventory_quantity
                }))
        }
    }

    fn item(barcode: &str, name: &str, sale_cents: i64, qty: i64) -> InventoryRecord {
        InventoryRecord {
            barcode: barcode.to_string(),
            item_name: name.to_string(),
            inventory_quantity: qty,
            original_price: Money::zero(),
            sale_price: Money::from_cents(sale_cents),
        }
    }

    fn milk_catalog() -> MemoryCatalog {
        MemoryCatalog::with(vec![
            item("111", "Milk", 250, 10),
            item("222", "Bread", 1999, 1),
        ])
    }

    #[test]
    fn test_scan_twice_then_commit() {
        let catalog = milk_catalog();
        let mut ledger = SaleLedger::new(&catalog);

        ledger.scan("111").unwrap();
        let outcome = ledger.scan("111").unwrap();
        assert_eq!(
            outcome,
            ScanOutcome::Added {
                item_name: "Milk".to_string(),
                quantity: 2
            }
        );
        assert_eq!(ledger.total().to_string(), "5.00");

        let CommitOutcome::Sold(summary) = ledger.commit_sale().unwrap() else {
            panic!("expected a sale");
        };
        assert_eq!(summary.units, 2);
        assert_eq!(summary.total.cents(), 500);
        assert!(summary.unmatched.is_empty());

        assert_eq!(catalog.quantity("Milk"), 8);
        assert!(ledger.basket().is_empty());
        assert_eq!(ledger.total().to_string(), "0.00");
    }

    #[test]
    fn test_unknown_barcode_leaves_basket_alone() {
        let catalog = milk_catalog();
        let mut ledger = SaleLedger::new(&catalog);
        ledger.scan("111").unwrap();

        let outcome = ledger.scan("999").unwrap();
        assert_eq!(
            outcome,
            ScanOutcome::ProductNotFound {
                code: "999".to_string()
            }
        );
        assert_eq!(ledger.basket().line_count(), 1);
        assert_eq!(ledger.total().cents(), 250);
    }

    #[test]
    fn test_blank_scan_is_ignored() {
        let mut ledger = SaleLedger::new(milk_catalog());
        assert_eq!(ledger.scan("   ").unwrap(), ScanOutcome::Ignored);
        assert!(ledger.basket().is_empty());
    }

    #[test]
    fn test_submit_input_always_clears_buffer() {
        let catalog = milk_catalog();
        let mut ledger = SaleLedger::new(&catalog);

        ledger.input_mut().push_str(" 111 ");
        assert!(matches!(ledger.submit_input().unwrap(), ScanOutcome::Added { .. }));
        assert!(ledger.input_mut().is_empty());

        ledger.input_mut().push_str("nope");
        assert!(matches!(
            ledger.submit_input().unwrap(),
            ScanOutcome::ProductNotFound { .. }
        ));
        assert!(ledger.input_mut().is_empty());
    }

    #[test]
    fn test_price_snapshot_survives_catalog_edit() {
        let catalog = milk_catalog();
        let mut ledger = SaleLedger::new(&catalog);

        ledger.scan("111").unwrap();
        catalog.set_price("111", 900);
        ledger.scan("111").unwrap();

        assert_eq!(ledger.total().cents(), 500);
    }

    #[test]
    fn test_adjust_to_zero_removes_line() {
        let catalog = milk_catalog();
        let mut ledger = SaleLedger::new(&catalog);
        ledger.scan("111").unwrap();

        assert_eq!(ledger.adjust_quantity("Milk", 1).unwrap(), Some(2));
        assert_eq!(ledger.adjust_quantity("Milk", -2).unwrap(), None);
        assert!(ledger.basket().is_empty());
        assert!(matches!(
            ledger.adjust_quantity("Milk", 1),
            Err(CoreError::NotInBasket(_))
        ));
    }

    #[test]
    fn test_commit_empty_basket() {
        let catalog = milk_catalog();
        let mut ledger = SaleLedger::new(&catalog);
        assert_eq!(ledger.commit_sale().unwrap(), CommitOutcome::NothingToSell);
        assert_eq!(catalog.quantity("Milk"), 10);
    }

    #[test]
    fn test_clamp_policy_floors_stock() {
        let catalog = milk_catalog();
        let mut ledger = SaleLedger::new(&catalog);
        ledger.scan("222").unwrap();
        ledger.adjust_quantity("Bread", 2).unwrap();

        let CommitOutcome::Sold(summary) = ledger.commit_sale().unwrap() else {
            panic!("expected a sale");
        };
        assert_eq!(summary.units, 3);
        assert_eq!(catalog.quantity("Bread"), 0);
    }

    #[test]
    fn test_reject_policy_writes_nothing() {
        let catalog = milk_catalog();
        let mut ledger = SaleLedger::with_policy(&catalog, OversellPolicy::Reject);
        ledger.scan("111").unwrap();
        ledger.scan("222").unwrap();
        ledger.scan("222").unwrap();

        let err = ledger.commit_sale().unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock { available: 1, requested: 2, .. }
        ));
        assert_eq!(catalog.quantity("Milk"), 10);
        assert_eq!(catalog.quantity("Bread"), 1);
        assert_eq!(ledger.basket().line_count(), 2);
    }

    #[test]
    fn test_unmatched_item_is_reported() {
        let catalog = milk_catalog();
        let mut ledger = SaleLedger::new(&catalog);
        ledger.scan("111").unwrap();
        ledger.scan("222").unwrap();

        // Bread renamed in the sheet after it was scanned.
        catalog.records.borrow_mut()[1].item_name = "Rye Bread".to_string();

        let CommitOutcome::Sold(summary) = ledger.commit_sale().unwrap() else {
            panic!("expected a sale");
        };
        assert_eq!(summary.unmatched, vec!["Bread".to_string()]);
        assert_eq!(summary.units, 1);
        assert_eq!(catalog.quantity("Milk"), 9);
        assert!(ledger.basket().is_empty());
    }

    #[test]
    fn test_storage_error_keeps_basket() {
        let catalog = milk_catalog();
        let mut ledger = SaleLedger::new(&catalog);
        ledger.scan("111").unwrap();
        ledger.scan("111").unwrap();
        ledger.scan("111").unwrap();

        catalog.fail_after.set(Some(1));
        let err = ledger.commit_sale().unwrap_err();

        assert!(matches!(err, CoreError::Catalog(_)));
        assert_eq!(catalog.quantity("Milk"), 9);
        assert_eq!(ledger.basket().line("Milk").unwrap().quantity, 2);
        assert_eq!(ledger.total().cents(), 500);
    }

    #[test]
    fn test_retry_after_storage_error_sells_each_unit_once() {
        let catalog = milk_catalog();
        let mut ledger = SaleLedger::new(&catalog);
        ledger.scan("111").unwrap();
        ledger.scan("111").unwrap();
        ledger.scan("111").unwrap();
        ledger.scan("222").unwrap();

        catalog.fail_after.set(Some(1));
        assert!(ledger.commit_sale().is_err());

        catalog.fail_after.set(None);
        let CommitOutcome::Sold(summary) = ledger.commit_sale().unwrap() else {
            panic!("expected a sale");
        };
        assert_eq!(summary.units, 3);
        assert_eq!(catalog.quantity("Milk"), 7);
        assert_eq!(catalog.quantity("Bread"), 0);
        assert!(ledger.basket().is_empty());
    }

    #[test]
    fn test_clear_resets_total() {
        let mut ledger = SaleLedger::new(milk_catalog());
        ledger.scan("111").unwrap();
        ledger.clear();
        assert!(ledger.total().is_zero());
        assert_eq!(ledger.catalog().quantity("Milk"), 10);
    }
}
