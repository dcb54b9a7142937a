//! # Table Snapshot
//!
//! The single worksheet of a monthly workbook, held in memory.
//!
//! ## Load / Mutate / Replace
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One mutating call                                    │
//! │                                                                         │
//! │  Table::load(path)                                                     │
//! │   ├── calamine: values of the first sheet                              │
//! │   └── calamine: formulas of the first sheet (overlay, "=" prefixed)    │
//! │       (reader dropped here)                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  table.set(row, col, cell)   ← in memory only                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  table.save(path)                                                      │
//! │   ├── rust_xlsxwriter: every cell rewritten, formatting reapplied      │
//! │   ├── bytes → NamedTempFile in the same directory, fsync               │
//! │   └── persist() renames over the old file                              │
//! │                                                                         │
//! │  Any error before persist() drops the temp file; the old file stays.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows are 1-based like the sheet (row 1 is the header). Columns are
//! 0-based indexes.

use std::io::Write;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{SheetError, SheetResult};

/// Header row.
pub const HEADER_ROW: usize = 1;

/// First row holding data.
pub const FIRST_DATA_ROW: usize = 2;

const FONT_NAME: &str = "Calibri";
const FONT_SIZE: f64 = 11.0;
const PRICE_FORMAT: &str = "0.00";
const COLUMN_WIDTH: f64 = 16.0;

/// Headers whose columns are shown with two decimals.
pub const MONEY_HEADERS: [&str; 5] = [
    "Original Price",
    "Sale Price",
    "Total Profit",
    "Invested",
    "Clean Profit",
];

// =============================================================================
// Cell
// =============================================================================

/// One cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Formula text including the leading `=`.
    Formula(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Normalizes to a leading `=`.
    pub fn formula(value: impl AsRef<str>) -> Self {
        let value = value.as_ref().trim();
        if value.starts_with('=') {
            Cell::Formula(value.to_string())
        } else {
            Cell::Formula(format!("={}", value))
        }
    }

    /// Empty, or text that is only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// The cell as a lookup key.
    ///
    /// Text is trimmed. Whole numbers print without a fraction, so a barcode
    /// Excel turned into `8801234.0` still matches `"8801234"`. Blank cells,
    /// booleans and formulas are never keys.
    pub fn key_text(&self) -> Option<String> {
        match self {
            Cell::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Cell::Number(n) => Some(number_text(*n)),
            Cell::Empty | Cell::Bool(_) | Cell::Formula(_) => None,
        }
    }
}

/// Whole numbers without a trailing `.0`.
pub(crate) fn number_text(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<Data> for Cell {
    fn from(data: Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s),
            Data::Float(f) => Cell::Number(f),
            Data::Int(i) => Cell::Number(i as f64),
            Data::Bool(b) => Cell::Bool(b),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s),
            Data::Error(e) => Cell::Text(e.to_string()),
        }
    }
}

// =============================================================================
// Table
// =============================================================================

/// In-memory snapshot of one worksheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    sheet_name: String,
    /// `rows[0]` is sheet row 1.
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates an empty table.
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Table {
            sheet_name: sheet_name.into(),
            rows: Vec::new(),
        }
    }

    /// Loads the first worksheet of a workbook.
    ///
    /// Formula cells come back as [`Cell::Formula`], not their cached value.
    pub fn load(path: &Path) -> SheetResult<Self> {
        let mut workbook = open_workbook_auto(path)?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| SheetError::Schema {
                missing: vec!["worksheet".to_string()],
            })?;

        let values = workbook.worksheet_range(&sheet_name)?;
        let mut table = Table::new(sheet_name.clone());

        let (row_offset, col_offset) = values.start().unwrap_or((0, 0));
        for (row, col, data) in values.cells() {
            let cell = Cell::from(data.clone());
            if cell != Cell::Empty {
                table.set(
                    row_offset as usize + row + 1,
                    col_offset as usize + col,
                    cell,
                );
            }
        }

        let formulas = workbook.worksheet_formula(&sheet_name)?;
        let (row_offset, col_offset) = formulas.start().unwrap_or((0, 0));
        for (row, col, formula) in formulas.cells() {
            if formula.trim().is_empty() {
                continue;
            }
            table.set(
                row_offset as usize + row + 1,
                col_offset as usize + col,
                Cell::formula(formula),
            );
        }

        debug!(
            path = %path.display(),
            sheet = %table.sheet_name,
            rows = table.rows.len(),
            "Workbook loaded"
        );
        Ok(table)
    }

    /// Rewrites the whole workbook and atomically replaces `path`.
    ///
    /// Every cell is centered Calibri 11; the header row is bold; columns
    /// headed by one of [`MONEY_HEADERS`] use the `0.00` number format.
    pub fn save(&self, path: &Path) -> SheetResult<()> {
        let bytes = self.to_xlsx_bytes()?;

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| SheetError::Io(e.error))?;

        debug!(path = %path.display(), bytes = bytes.len(), "Workbook saved");
        Ok(())
    }

    fn to_xlsx_bytes(&self) -> SheetResult<Vec<u8>> {
        let header_format = Format::new()
            .set_font_name(FONT_NAME)
            .set_font_size(FONT_SIZE)
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        let body_format = Format::new()
            .set_font_name(FONT_NAME)
            .set_font_size(FONT_SIZE)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        let money_format = body_format.clone().set_num_format(PRICE_FORMAT);

        let money_columns: Vec<usize> = self
            .header()
            .iter()
            .enumerate()
            .filter(|(_, cell)| {
                matches!(cell, Cell::Text(h) if MONEY_HEADERS.contains(&h.trim()))
            })
            .map(|(col, _)| col)
            .collect();

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for col in 0..self.width() {
            worksheet.set_column_width(col_num(col)?, COLUMN_WIDTH)?;
        }

        for (index, cells) in self.rows.iter().enumerate() {
            let row = index + 1;
            for (col, cell) in cells.iter().enumerate() {
                let format = if row == HEADER_ROW {
                    &header_format
                } else if money_columns.contains(&col) {
                    &money_format
                } else {
                    &body_format
                };
                write_cell(worksheet, row, col, cell, format)?;
            }
        }

        Ok(workbook.save_to_buffer()?)
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// The cell at a 1-based row and 0-based column; out of range reads as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        row.checked_sub(1)
            .and_then(|r| self.rows.get(r))
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Sets a cell, growing the table as needed.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let Some(index) = row.checked_sub(1) else {
            return;
        };
        if self.rows.len() <= index {
            self.rows.resize_with(index + 1, Vec::new);
        }
        let cells = &mut self.rows[index];
        if cells.len() <= col {
            cells.resize(col + 1, Cell::Empty);
        }
        cells[col] = cell;
    }

    /// Row 1.
    pub fn header(&self) -> &[Cell] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Appends a row after the last one.
    pub fn push_row(&mut self, cells: Vec<Cell>) {
        self.rows.push(cells);
    }

    /// Last row holding any non-empty cell, or 0 for an empty table.
    pub fn last_row(&self) -> usize {
        self.rows
            .iter()
            .rposition(|cells| cells.iter().any(|c| *c != Cell::Empty))
            .map_or(0, |index| index + 1)
    }

    /// Widest row, in columns.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

fn col_num(col: usize) -> SheetResult<u16> {
    u16::try_from(col).map_err(|_| SheetError::Write(XlsxError::RowColumnLimitError))
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: usize,
    col: usize,
    cell: &Cell,
    format: &Format,
) -> SheetResult<()> {
    let row =
        u32::try_from(row - 1).map_err(|_| SheetError::Write(XlsxError::RowColumnLimitError))?;
    let col = col_num(col)?;

    match cell {
        Cell::Empty => {}
        Cell::Text(s) => {
            worksheet.write_string_with_format(row, col, s, format)?;
        }
        Cell::Number(n) => {
            worksheet.write_number_with_format(row, col, *n, format)?;
        }
        Cell::Bool(b) => {
            worksheet.write_boolean_with_format(row, col, *b, format)?;
        }
        Cell::Formula(f) => {
            worksheet.write_formula_with_format(row, col, f.as_str(), format)?;
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
