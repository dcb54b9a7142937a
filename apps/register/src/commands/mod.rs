//! # Register Commands
//!
//! Every action the cashier can take, as plain functions over the state.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Inventory form: add/update, look up
//! └── sale.rs     ◄─── Scan, adjust, total, sell, clear
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Register Command Flow                                │
//! │                                                                         │
//! │  Terminal                                                               │
//! │  ────────                                                               │
//! │  > 8801234                                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Register::execute (lib.rs) parses the line                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  fn scan_barcode(                                                       │
//! │      ledger: &mut LedgerState,  ◄── Only the state it needs            │
//! │      code: &str,                                                        │
//! │  ) -> Result<ScanOutcome, ApiError>                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Terminal prints: "Milk x1" or "Error: ..."                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command takes only the state it touches:
//! ```rust,ignore
//! // Only needs the workbook
//! fn get_item(store: &StoreState, barcode: &str)
//!
//! // Only needs the open sale
//! fn adjust_quantity(ledger: &mut LedgerState, item_name: &str, delta: i64)
//! ```

pub mod product;
pub mod sale;
