//! # Tally Register Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally POS Register                               │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Terminal (stdin / stdout)                     │  │
//! │  │   > 8801234          > sell          > add 111 | Milk | ...     │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust Backend (this crate)                     │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► Runs the register, exits 1 on startup failure    │  │
//! │  │                                                                  │  │
//! │  │  lib.rs ─────► Logging, config, line dispatch                   │  │
//! │  │                                                                  │  │
//! │  │  commands/ ──► scan_barcode, complete_sale, add_or_update_item  │  │
//! │  │                                                                  │  │
//! │  │  state/ ─────► StoreState, LedgerState, ConfigState             │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                       Monthly Workbook                           │  │
//! │  │  data/POS_YYYY_MM.xlsx (one sheet, named after the month)        │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    match tally_register::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("register: {}", e);
            ExitCode::FAILURE
        }
    }
}
