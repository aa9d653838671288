//! In-memory worksheet grid with 1-based addressing

use crate::types::CellValue;

static EMPTY: CellValue = CellValue::Empty;

/// A worksheet loaded into memory.
///
/// Rows and columns are 1-based, as in the spreadsheet UI. Reads outside the
/// populated extent return [`CellValue::Empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<CellValue>>,
    max_column: u32,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
            max_column: 0,
        }
    }

    /// Build a sheet from row-major values; `rows[0]` is spreadsheet row 1.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut sheet = Self::new(name);
        for (r, row) in rows.into_iter().enumerate() {
            for (c, value) in row.into_iter().enumerate() {
                sheet.set(r as u32 + 1, c as u32 + 1, value);
            }
        }
        sheet
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store `value` at (`row`, `col`). Empty values never grow the extent.
    pub fn set(&mut self, row: u32, col: u32, value: CellValue) {
        if row == 0 || col == 0 || value.is_empty() {
            return;
        }
        let (r, c) = (row as usize - 1, col as usize - 1);
        if self.rows.len() <= r {
            self.rows.resize_with(r + 1, Vec::new);
        }
        let cells = &mut self.rows[r];
        if cells.len() <= c {
            cells.resize(c + 1, CellValue::Empty);
        }
        cells[c] = value;
        self.max_column = self.max_column.max(col);
    }

    pub fn cell(&self, row: u32, col: u32) -> &CellValue {
        if row == 0 || col == 0 {
            return &EMPTY;
        }
        self.rows
            .get(row as usize - 1)
            .and_then(|cells| cells.get(col as usize - 1))
            .unwrap_or(&EMPTY)
    }

    /// Last populated row (1-based), 0 for an empty sheet.
    pub fn max_row(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Last populated column (1-based), 0 for an empty sheet.
    pub fn max_column(&self) -> u32 {
        self.max_column
    }

    /// Raw text of column 1 on rows 1 and 2: the XML preamble lines.
    ///
    /// Row 1 defaults to a plain UTF-8 declaration when blank.
    pub fn xml_preamble(&self) -> (String, String) {
        let declaration = self
            .cell(1, 1)
            .raw_text()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| r#"<?xml version="1.0" encoding="utf-8"?>"#.to_string());
        let root = self.cell(2, 1).raw_text().unwrap_or_default();
        (declaration, root)
    }
}
