//! # tally-core: Pure Business Logic for Tally POS
//!
//! This crate is the **heart** of Tally POS. It contains the money type,
//! field parsing, the sale basket and the sale ledger, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Register (terminal)                          │   │
//! │  │    scan ──► adjust ──► sell          add / get inventory        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  basket   │  │  ledger   │  │   │
//! │  │   │ Inventory │  │   Money   │  │  Basket   │  │ SaleLedger│  │   │
//! │  │   │  Record   │  │           │  │BasketLine │  │  Catalog  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK • PURE FUNCTIONS                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ Catalog trait                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tally-sheet (Workbook Layer)                    │   │
//! │  │          POS_YYYY_MM.xlsx load, mutate, replace                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (InventoryRecord, InventoryField, outcomes)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field parsing and coercion
//! - [`basket`] - The in-memory sale basket
//! - [`ledger`] - Basket + catalog = sale commit
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::parse("2.50").unwrap();
//! let line = price * 2;
//! assert_eq!(line.to_string(), "5.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod error;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use basket::{Basket, BasketLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{Catalog, SaleLedger};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single basket.
///
/// ## Business Reason
/// Prevents runaway baskets and keeps commit time (one workbook rewrite
/// per unit) reasonable.
pub const MAX_BASKET_LINES: usize = 100;

/// Maximum quantity of a single item in the basket.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., a stuck scanner key).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest price accepted on the inventory form, in cents (1,000,000,000.00).
///
/// A full basket at this price (`MAX_BASKET_LINES` × `MAX_ITEM_QUANTITY`
/// units) still fits in i64 cents, and every accepted price survives the
/// f64 round-trip through a spreadsheet cell exactly.
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000;

/// Highest stock count accepted on the inventory form.
pub const MAX_STOCK_QUANTITY: i64 = 1_000_000_000;

/// Longest item name accepted on the inventory form.
pub const MAX_ITEM_NAME_LEN: usize = 200;

/// Longest barcode accepted on the inventory form.
pub const MAX_BARCODE_LEN: usize = 64;
