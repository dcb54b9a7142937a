//! # State Module
//!
//! Register state, split by concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  StoreState  │  │ LedgerState  │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Workbook    │  │  SaleLedger  │  │  data_dir        │              │
//! │  │  (month's    │  │  (basket +   │  │  currency_label  │              │
//! │  │   .xlsx)     │  │   catalog)   │  │  oversell        │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  Commands borrow only the state they need. The register is a single   │
//! │  thread, so LedgerState is borrowed mutably rather than locked.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod ledger;
mod store;

pub use config::{ConfigState, CONFIG_FILE};
pub use ledger::LedgerState;
pub use store::StoreState;
