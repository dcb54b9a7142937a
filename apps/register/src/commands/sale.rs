//! # Sale Commands
//!
//! Scan, adjust, total, commit and clear for the open basket.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::LedgerState;
use tally_core::{BasketLine, CommitOutcome, ScanOutcome};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketLineDto {
    pub item_name: String,
    pub barcode: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

impl From<&BasketLine> for BasketLineDto {
    fn from(line: &BasketLine) -> Self {
        BasketLineDto {
            item_name: line.item_name.clone(),
            barcode: line.barcode.clone(),
            quantity: line.quantity,
            unit_price_cents: line.unit_price.cents(),
            line_total_cents: line.line_total().cents(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketResponse {
    pub lines: Vec<BasketLineDto>,
    pub total_cents: i64,
    pub line_count: usize,
    pub total_quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleResponse {
    pub lines: Vec<BasketLineDto>,
    pub total_cents: i64,
    pub units_sold: i64,
    /// Items sold that no catalog row matched; their stock is unchanged.
    pub unmatched: Vec<String>,
}

/// Scans whatever the cashier typed.
///
/// The code goes through the ledger's input buffer so the buffer is empty
/// after every scan, found or not.
pub fn scan_barcode(ledger: &mut LedgerState, code: &str) -> Result<ScanOutcome, ApiError> {
    debug!(code = %code, "scan_barcode command");

    let ledger = ledger.ledger_mut();
    let input = ledger.input_mut();
    input.clear();
    input.push_str(code);
    Ok(ledger.submit_input()?)
}

/// Adds or removes one unit of a basket line.
///
/// ## Returns
/// The new quantity, or `None` when the line was removed.
pub fn adjust_quantity(
    ledger: &mut LedgerState,
    item_name: &str,
    delta: i64,
) -> Result<Option<i64>, ApiError> {
    debug!(item = %item_name, delta = delta, "adjust_quantity command");

    Ok(ledger.ledger_mut().adjust_quantity(item_name.trim(), delta)?)
}

/// Current basket with totals.
pub fn get_basket(ledger: &LedgerState) -> BasketResponse {
    let basket = ledger.ledger().basket();
    BasketResponse {
        lines: basket.lines().iter().map(BasketLineDto::from).collect(),
        total_cents: basket.total().cents(),
        line_count: basket.line_count(),
        total_quantity: basket.total_quantity(),
    }
}

/// Decrements stock for the basket and clears it.
///
/// ## Returns
/// `None` when the basket was empty and nothing was written.
pub fn complete_sale(ledger: &mut LedgerState) -> Result<Option<SaleResponse>, ApiError> {
    debug!("complete_sale command");

    match ledger.ledger_mut().commit_sale()? {
        CommitOutcome::NothingToSell => Ok(None),
        CommitOutcome::Sold(summary) => {
            info!(
                units = summary.units,
                total = %summary.total,
                "Sale completed"
            );
            Ok(Some(SaleResponse {
                lines: summary.lines.iter().map(BasketLineDto::from).collect(),
                total_cents: summary.total.cents(),
                units_sold: summary.units,
                unmatched: summary.unmatched,
            }))
        }
    }
}

/// Empties the basket without touching stock.
pub fn clear_basket(ledger: &mut LedgerState) {
    debug!("clear_basket command");
    ledger.ledger_mut().clear();
}
