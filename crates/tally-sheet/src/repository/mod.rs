//! # Repository Module
//!
//! Workbook-backed repositories for Tally POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository over a Workbook                           │
//! │                                                                         │
//! │  Register command                                                      │
//! │       │                                                                 │
//! │       │  workbook.catalog().get_by_barcode("111")                      │
//! │       ▼                                                                 │
//! │  CatalogStore                                                          │
//! │  ├── upsert(&self, form)                                               │
//! │  ├── get_by_barcode(&self, barcode)                                    │
//! │  ├── stock_of(&self, item_name)                                        │
//! │  └── decrement_stock(&self, item_name)                                 │
//! │       │                                                                 │
//! │       │  load → mutate → atomic replace                                │
//! │       ▼                                                                 │
//! │  data/POS_YYYY_MM.xlsx                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CatalogStore`](catalog::CatalogStore) - Inventory rows and stock

pub mod catalog;
