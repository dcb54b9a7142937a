//! # Monthly Workbook
//!
//! Path resolution and first-open creation of the month's workbook.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Opening the Month                                  │
//! │                                                                         │
//! │  Register startup                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SheetConfig::new("data") ← base dir, prefix, template rows            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Workbook::open(config)                                                │
//! │       │                                                                 │
//! │       ├── data/POS_2024_05.xlsx exists ──► use it as is                │
//! │       │                                                                 │
//! │       └── missing                                                       │
//! │             ├── read_only ──► SheetError::FileMissing                  │
//! │             └── otherwise ──► create dir, write headers + formulas     │
//! │                               sheet named "May"                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  workbook.catalog() ──► CatalogStore (load/mutate/replace per call)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, info};

use crate::columns::DEFAULT_HEADERS;
use crate::error::{SheetError, SheetResult};
use crate::repository::catalog::CatalogStore;
use crate::table::{Cell, Table, FIRST_DATA_ROW};

// =============================================================================
// Configuration
// =============================================================================

/// Where monthly workbooks live and how new ones are laid out.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use tally_sheet::SheetConfig;
///
/// let config = SheetConfig::new("data")
///     .date(NaiveDate::from_ymd_opt(2024, 5, 17).unwrap());
///
/// assert!(config.file_path().ends_with("POS_2024_05.xlsx"));
/// assert_eq!(config.sheet_name(), "May");
/// ```
#[derive(Debug, Clone)]
pub struct SheetConfig {
    /// Directory holding the workbooks.
    /// Default: `data`
    pub base_dir: PathBuf,

    /// File name prefix, as in `POS_2024_05.xlsx`.
    /// Default: `POS`
    pub file_prefix: String,

    /// Data rows pre-seeded with profit formulas on creation.
    /// Default: 100 (rows 2..=101)
    pub template_rows: usize,

    /// Create the month's file when it does not exist.
    /// Default: true
    pub create_if_missing: bool,

    /// Fixed date instead of today.
    pub date: Option<NaiveDate>,
}

impl SheetConfig {
    /// Creates a configuration for the given base directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        SheetConfig {
            base_dir: base_dir.into(),
            file_prefix: "POS".to_string(),
            template_rows: 100,
            create_if_missing: true,
            date: None,
        }
    }

    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn template_rows(mut self, rows: usize) -> Self {
        self.template_rows = rows;
        self
    }

    /// Never create the file; opening a missing month fails with
    /// [`SheetError::FileMissing`].
    pub fn read_only(mut self) -> Self {
        self.create_if_missing = false;
        self
    }

    /// Pins the month (tests, back-office edits of a past month).
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    fn effective_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }

    /// `{base_dir}/{prefix}_{YYYY}_{MM}.xlsx`
    pub fn file_path(&self) -> PathBuf {
        let date = self.effective_date();
        self.base_dir.join(format!(
            "{}_{}_{:02}.xlsx",
            self.file_prefix,
            date.year(),
            date.month()
        ))
    }

    /// Full English month name.
    pub fn sheet_name(&self) -> String {
        self.effective_date().format("%B").to_string()
    }

    /// Header row plus the profit formulas for the template rows.
    ///
    /// `Total Profit = Sale Price × Quantity Sold`,
    /// `Invested = Inventory Quantity × Original Price`,
    /// `Clean Profit = Total Profit − Invested`.
    pub fn template_table(&self) -> Table {
        let mut table = Table::new(self.sheet_name());
        table.push_row(DEFAULT_HEADERS.iter().map(|h| Cell::text(*h)).collect());

        for row in FIRST_DATA_ROW..FIRST_DATA_ROW + self.template_rows {
            table.set(row, 8, Cell::formula(format!("H{row}*E{row}")));
            table.set(row, 9, Cell::formula(format!("D{row}*G{row}")));
            table.set(row, 10, Cell::formula(format!("I{row}-J{row}")));
        }
        table
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig::new("data")
    }
}

// =============================================================================
// Workbook
// =============================================================================

/// Handle on the month's workbook file.
///
/// Holds no open file; every store call loads and replaces the file.
#[derive(Debug, Clone)]
pub struct Workbook {
    path: PathBuf,
}

impl Workbook {
    /// Resolves the month's file, creating it when allowed.
    pub fn open(config: SheetConfig) -> SheetResult<Self> {
        let path = config.file_path();

        if path.exists() {
            debug!(path = %path.display(), "Using existing workbook");
            return Ok(Workbook { path });
        }

        if !config.create_if_missing {
            return Err(SheetError::FileMissing(path));
        }

        std::fs::create_dir_all(&config.base_dir)?;
        config.template_table().save(&path)?;

        info!(
            path = %path.display(),
            sheet = %config.sheet_name(),
            template_rows = config.template_rows,
            "Created monthly workbook"
        );
        Ok(Workbook { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the catalog store for this workbook.
    pub fn catalog(&self) -> CatalogStore {
        CatalogStore::new(self.path.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn may() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    #[test]
    fn test_config_builder() {
        let config = SheetConfig::new("/tmp/shop")
            .file_prefix("SHOP")
            .template_rows(5)
            .read_only()
            .date(may());

        assert_eq!(config.file_path(), PathBuf::from("/tmp/shop/SHOP_2024_05.xlsx"));
        assert_eq!(config.template_rows, 5);
        assert!(!config.create_if_missing);
    }

    #[test]
    fn test_template_formulas() {
        let table = SheetConfig::default().date(may()).template_table();

        assert_eq!(table.sheet_name(), "May");
        assert_eq!(table.cell(1, 1), &Cell::text("Barcode"));
        assert_eq!(table.cell(2, 8), &Cell::formula("H2*E2"));
        assert_eq!(table.cell(101, 9), &Cell::formula("D101*G101"));
        assert_eq!(table.cell(101, 10), &Cell::formula("I101-J101"));
        assert_eq!(table.cell(102, 8), &Cell::Empty);
    }

    #[test]
    fn test_open_creates_once() {
        let dir = TempDir::new().unwrap();
        let config = SheetConfig::new(dir.path().join("data")).date(may());

        let workbook = Workbook::open(config.clone()).unwrap();
        assert!(workbook.path().exists());

        let table = Table::load(workbook.path()).unwrap();
        assert_eq!(table.sheet_name(), "May");
        assert_eq!(table.cell(2, 10), &Cell::formula("I2-J2"));

        let before = std::fs::read(workbook.path()).unwrap();
        Workbook::open(config).unwrap();
        assert_eq!(std::fs::read(workbook.path()).unwrap(), before);
    }

    #[test]
    fn test_read_only_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = SheetConfig::new(dir.path()).date(may()).read_only();

        let err = Workbook::open(config).unwrap_err();
        assert!(matches!(err, SheetError::FileMissing(p) if p.ends_with("POS_2024_05.xlsx")));
    }
}
