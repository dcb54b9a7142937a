//! # Tally Register Library
//!
//! The terminal register: reads one command per line, runs it against the
//! month's workbook, prints one short response.
//!
//! ## Module Organization
//! ```text
//! tally_register/
//! ├── lib.rs          ◄─── You are here (startup, line dispatch, loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── store.rs    ◄─── Month workbook wrapper
//! │   ├── ledger.rs   ◄─── Open sale (basket + catalog)
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── product.rs  ◄─── Inventory form commands
//! │   └── sale.rs     ◄─── Scan/adjust/sell commands
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Command Grammar
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Line                                  Action                           │
//! │  ────                                  ──────                           │
//! │  8801234                               scan one unit                    │
//! │  + Milk  /  - Milk                     one unit more / less             │
//! │  total                                 basket total                     │
//! │  sell                                  decrement stock, clear basket    │
//! │  clear                                 empty basket, stock untouched    │
//! │  basket                                basket as JSON                   │
//! │  add 111 | Milk | 1.80 | 2.50 | 10     add or update an item            │
//! │  get 111                               item as JSON                     │
//! │  edit 111                              prefilled add line for 111       │
//! │  help                                  this list                        │
//! │  quit / exit                           leave                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io::{self, BufRead, Write};

use serde::Serialize;
use tally_core::ScanOutcome;
use tally_sheet::Workbook;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::{product, sale};
use error::{ApiError, ErrorCode, StartupError};
use state::{ConfigState, LedgerState, StoreState};

const HELP: &str = "\
Commands:
  <barcode>                               scan one unit
  + NAME | - NAME                         one unit more / less
  total                                   show basket total
  sell                                    complete the sale
  clear                                   empty the basket
  basket                                  show basket as JSON
  add BARCODE | NAME | ORIGINAL | SALE | QTY
                                          add or update an item
  get BARCODE                             show an item
  edit BARCODE                            show the add line for an item
  help                                    show this list
  quit                                    leave the register";

/// What the loop does after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Print the text (if any) and read the next line.
    Continue(String),
    Quit,
}

/// The register: configuration, month workbook and open sale.
#[derive(Debug)]
pub struct Register {
    config: ConfigState,
    store: StoreState,
    ledger: LedgerState,
}

impl Register {
    /// Opens (or creates) the current month's workbook.
    pub fn open(config: ConfigState) -> Result<Self, StartupError> {
        let workbook = Workbook::open(config.sheet_config())?;
        Ok(Register::from_parts(config, workbook))
    }

    /// Builds a register over an already opened workbook.
    pub fn from_parts(config: ConfigState, workbook: Workbook) -> Self {
        let store = StoreState::new(workbook);
        let ledger = LedgerState::new(store.catalog(), config.oversell);
        Register {
            config,
            store,
            ledger,
        }
    }

    pub fn store(&self) -> &StoreState {
        &self.store
    }

    pub fn ledger(&self) -> &LedgerState {
        &self.ledger
    }

    /// Runs one input line. Errors become an `Error: ...` line; the
    /// register keeps going.
    pub fn execute(&mut self, line: &str) -> Step {
        let line = line.trim();
        match line {
            "quit" | "exit" => Step::Quit,
            _ => match self.dispatch(line) {
                Ok(text) => Step::Continue(text),
                Err(e) => Step::Continue(format!("Error: {}", e)),
            },
        }
    }

    fn dispatch(&mut self, line: &str) -> Result<String, ApiError> {
        if let Some(name) = line.strip_prefix('+') {
            return self.adjust(name, 1);
        }
        if let Some(name) = line.strip_prefix('-') {
            return self.adjust(name, -1);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "total" => Ok(format!(
                "Total: {}",
                self.config.format_currency(self.ledger.ledger().total())
            )),
            "sell" => self.sell(),
            "clear" => {
                sale::clear_basket(&mut self.ledger);
                Ok("Basket cleared".to_string())
            }
            "basket" => to_json(&sale::get_basket(&self.ledger)),
            "add" => {
                let form = product::parse_form(rest)?;
                Ok(product::add_or_update_item(&self.store, &form)?.message)
            }
            "get" => to_json(&product::get_item(&self.store, rest)?),
            "edit" => Ok(product::form_line(&product::prefill_form(&self.store, rest)?)),
            "help" => Ok(HELP.to_string()),
            _ if rest.is_empty() => self.scan(word),
            _ => Err(ApiError::new(
                ErrorCode::UnknownCommand,
                format!("Unknown command '{}', type help", word),
            )),
        }
    }

    fn scan(&mut self, code: &str) -> Result<String, ApiError> {
        match sale::scan_barcode(&mut self.ledger, code)? {
            ScanOutcome::Added {
                item_name,
                quantity,
            } => Ok(format!(
                "{} x{}    Total: {}",
                item_name,
                quantity,
                self.config.format_currency(self.ledger.ledger().total())
            )),
            ScanOutcome::ProductNotFound { .. } => Ok("Product not found".to_string()),
            ScanOutcome::Ignored => Ok(String::new()),
        }
    }

    fn adjust(&mut self, name: &str, delta: i64) -> Result<String, ApiError> {
        let name = name.trim();
        match sale::adjust_quantity(&mut self.ledger, name, delta)? {
            Some(quantity) => Ok(format!("{} x{}", name, quantity)),
            None => Ok(format!("{} removed", name)),
        }
    }

    fn sell(&mut self) -> Result<String, ApiError> {
        let Some(sold) = sale::complete_sale(&mut self.ledger)? else {
            return Ok("No items to sell. Add items first!".to_string());
        };

        let mut text = format!(
            "Sale completed! {} units, {}",
            sold.units_sold,
            self.config
                .format_currency(tally_core::Money::from_cents(sold.total_cents))
        );
        if !sold.unmatched.is_empty() {
            text.push_str(&format!(
                "\nNot in inventory, stock unchanged: {}",
                sold.unmatched.join(", ")
            ));
        }
        Ok(text)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::storage(e.to_string()))
}

/// Reads lines until `quit` or end of input.
pub fn run_loop<R: BufRead, W: Write>(
    register: &mut Register,
    input: R,
    mut out: W,
) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        match register.execute(&line?) {
            Step::Quit => break,
            Step::Continue(text) => {
                if !text.is_empty() {
                    writeln!(out, "{}", text)?;
                }
            }
        }
        write!(out, "> ")?;
        out.flush()?;
    }
    Ok(())
}

/// Runs the register on stdin/stdout.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Register Startup                                  │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: info,tally=debug, can be overridden with RUST_LOG        │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → register.toml → TALLY_* environment                    │
/// │                                                                         │
/// │  3. Open Month Workbook ──────────────────────────────────────────────► │
/// │     • data/POS_YYYY_MM.xlsx, created from the template if missing       │
/// │                                                                         │
/// │  4. Read Commands ────────────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), StartupError> {
    init_tracing();

    info!("Starting Tally POS register");

    let config = ConfigState::load()?;
    info!(
        data_dir = %config.data_dir.display(),
        oversell = ?config.oversell,
        "Configuration loaded"
    );

    let mut register = Register::open(config)?;
    info!(path = %register.store().inner().path().display(), "Workbook ready");

    println!("Tally POS register. Type help for commands.");
    let stdin = io::stdin();
    run_loop(&mut register, stdin.lock(), io::stdout().lock())?;

    info!("Register closed");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tally_sheet=trace` - Trace the workbook layer only
/// - Default: `info,tally=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_sheet::SheetConfig;
    use tempfile::TempDir;

    fn register(dir: &TempDir) -> Register {
        let config =
            SheetConfig::new(dir.path()).date(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        let workbook = Workbook::open(config).unwrap();
        Register::from_parts(ConfigState::default(), workbook)
    }

    fn text(step: Step) -> String {
        match step {
            Step::Continue(text) => text,
            Step::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn test_sale_session() {
        let dir = TempDir::new().unwrap();
        let mut reg = register(&dir);

        assert_eq!(
            text(reg.execute("add 111 | Milk | 1.80 | 2.50 | 10")),
            "Item added/updated successfully!"
        );
        assert_eq!(text(reg.execute("111")), "Milk x1    Total: 2.50 KRW");
        assert_eq!(text(reg.execute("111")), "Milk x2    Total: 5.00 KRW");
        assert_eq!(text(reg.execute("total")), "Total: 5.00 KRW");
        assert_eq!(text(reg.execute("sell")), "Sale completed! 2 units, 5.00 KRW");
        assert_eq!(text(reg.execute("total")), "Total: 0.00 KRW");
        assert_eq!(text(reg.execute("sell")), "No items to sell. Add items first!");

        let item: serde_json::Value = serde_json::from_str(&text(reg.execute("get 111"))).unwrap();
        assert_eq!(item["inventoryQuantity"], 8);
    }

    #[test]
    fn test_adjust_and_clear() {
        let dir = TempDir::new().unwrap();
        let mut reg = register(&dir);
        reg.execute("add 111 | Milk | 1.80 | 2.50 | 10");
        reg.execute("111");

        assert_eq!(text(reg.execute("+ Milk")), "Milk x2");
        assert_eq!(text(reg.execute("-Milk")), "Milk x1");
        assert_eq!(text(reg.execute("- Milk")), "Milk removed");
        assert_eq!(text(reg.execute("- Milk")), "Error: Milk is not in the basket");

        reg.execute("111");
        assert_eq!(text(reg.execute("clear")), "Basket cleared");
        assert_eq!(reg.ledger().ledger().basket().line_count(), 0);
    }

    #[test]
    fn test_errors_and_misses() {
        let dir = TempDir::new().unwrap();
        let mut reg = register(&dir);

        assert_eq!(text(reg.execute("404")), "Product not found");
        assert_eq!(text(reg.execute("   ")), "");
        assert_eq!(text(reg.execute("get 404")), "Error: Product not found: 404");
        assert!(text(reg.execute("add 1 | Tea | x | 1 | 1")).starts_with("Error: original_price"));
        assert_eq!(
            text(reg.execute("frobnicate now")),
            "Error: Unknown command 'frobnicate', type help"
        );
        assert_eq!(reg.execute("quit"), Step::Quit);
    }

    #[test]
    fn test_edit_prints_add_line() {
        let dir = TempDir::new().unwrap();
        let mut reg = register(&dir);
        reg.execute("add 111 | Milk | 1.8 | 2.5 | 10");

        assert_eq!(text(reg.execute("edit 111")), "add 111 | Milk | 1.80 | 2.50 | 10");
        assert_eq!(text(reg.execute("edit 404")), "Error: Product not found: 404");
    }

    #[test]
    fn test_signed_barcode_cannot_be_saved() {
        let dir = TempDir::new().unwrap();
        let mut reg = register(&dir);

        let reply = text(reg.execute("add -123 | Tea | 1 | 2 | 3"));
        assert!(reply.starts_with("Error: barcode"), "{reply}");
        assert_eq!(text(reg.execute("get -123")), "Error: Product not found: -123");
    }

    #[test]
    fn test_basket_json() {
        let dir = TempDir::new().unwrap();
        let mut reg = register(&dir);
        reg.execute("add 111 | Milk | 1.80 | 2.50 | 10");
        reg.execute("111");

        let basket: serde_json::Value = serde_json::from_str(&text(reg.execute("basket"))).unwrap();
        assert_eq!(basket["totalCents"], 250);
        assert_eq!(basket["lines"][0]["itemName"], "Milk");
    }

    #[test]
    fn test_run_loop_stops_at_quit() {
        let dir = TempDir::new().unwrap();
        let mut reg = register(&dir);
        let input = b"help\nquit\n111\n" as &[u8];
        let mut out = Vec::new();

        run_loop(&mut reg, input, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("> Commands:"));
        assert!(!out.contains("Product not found"));
    }
}
