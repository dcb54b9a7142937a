//! # Ledger State
//!
//! The register's open sale.
//!
//! ## Sale Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger State Operations                              │
//! │                                                                         │
//! │  Cashier Input            Command                 Ledger Change         │
//! │  ─────────────            ───────                 ─────────────         │
//! │                                                                         │
//! │  8801234 ↵ ──────────────► scan() ──────────────► line qty + 1         │
//! │                                                                         │
//! │  + Milk / - Milk ────────► adjust() ────────────► qty ± 1, drop at 0   │
//! │                                                                         │
//! │  sell ───────────────────► commit() ────────────► stock - qty, clear   │
//! │                                                                         │
//! │  clear ──────────────────► clear() ─────────────► basket emptied       │
//! │                                                                         │
//! │  basket / total ─────────► basket() / total() ──► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_core::{OversellPolicy, SaleLedger};
use tally_sheet::CatalogStore;

/// The sale ledger bound to the month's catalog.
#[derive(Debug)]
pub struct LedgerState {
    ledger: SaleLedger<CatalogStore>,
}

impl LedgerState {
    /// Creates a ledger with an empty basket.
    pub fn new(catalog: CatalogStore, policy: OversellPolicy) -> Self {
        LedgerState {
            ledger: SaleLedger::with_policy(catalog, policy),
        }
    }

    pub fn ledger(&self) -> &SaleLedger<CatalogStore> {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut SaleLedger<CatalogStore> {
        &mut self.ledger
    }
}
