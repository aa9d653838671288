//! Workbook reader implementation - Excel (.xlsx/.xlsm) → in-memory sheets

use crate::error::{ExportError, ExportResult};
use crate::excel::sheet::Sheet;
use crate::types::CellValue;
use calamine::{
    open_workbook_auto, Data, OdsError, Range, Reader, XlsError, XlsbError, XlsxError,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How formula cells are surfaced to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Formula cells read as their formula text (`=AT5`)
    Formulas,
    /// Formula cells read as the value last computed by the spreadsheet
    CachedValues,
}

/// A workbook fully loaded into memory.
///
/// The file handle is released as soon as [`WorkbookReader::read`] returns.
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    #[cfg(test)]
    pub(crate) fn from_sheets(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name()).collect()
    }

    pub fn try_sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    pub fn sheet(&self, name: &str) -> ExportResult<&Sheet> {
        self.try_sheet(name)
            .ok_or_else(|| ExportError::MissingSheet(name.to_string()))
    }
}

/// Loads workbooks through calamine
pub struct WorkbookReader {
    path: PathBuf,
}

impl WorkbookReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read every sheet of the workbook in the given mode
    pub fn read(&self, mode: ReadMode) -> ExportResult<Workbook> {
        if !self.path.exists() {
            return Err(ExportError::WorkbookNotFound(self.path.clone()));
        }

        let mut workbook = open_workbook_auto(&self.path).map_err(|e| self.map_error(e))?;
        let sheet_names = workbook.sheet_names().to_vec();

        let mut sheets = Vec::with_capacity(sheet_names.len());
        for sheet_name in sheet_names {
            let values = workbook
                .worksheet_range(&sheet_name)
                .map_err(|e| self.map_error(e))?;

            let formulas = match mode {
                ReadMode::Formulas => workbook.worksheet_formula(&sheet_name).ok(),
                ReadMode::CachedValues => None,
            };

            let sheet = self.build_sheet(&sheet_name, &values, formulas.as_ref());
            debug!(
                sheet = %sheet_name,
                rows = sheet.max_row(),
                columns = sheet.max_column(),
                "sheet loaded"
            );
            sheets.push(sheet);
        }

        Ok(Workbook { sheets })
    }

    fn build_sheet(
        &self,
        name: &str,
        values: &Range<Data>,
        formulas: Option<&Range<String>>,
    ) -> Sheet {
        let mut sheet = Sheet::new(name);

        if let Some((row0, col0)) = values.start() {
            for (r, c, data) in values.used_cells() {
                let row = row0 + r as u32 + 1;
                let col = col0 + c as u32 + 1;
                sheet.set(row, col, convert_data(data));
            }
        }

        // Formula text wins over the cached value in formulas mode
        if let Some(formulas) = formulas {
            if let Some((row0, col0)) = formulas.start() {
                for (r, c, formula) in formulas.used_cells() {
                    if formula.is_empty() {
                        continue;
                    }
                    // calamine strips the leading '='
                    let text = if formula.starts_with('=') {
                        formula.clone()
                    } else {
                        format!("={}", formula)
                    };
                    sheet.set(row0 + r as u32 + 1, col0 + c as u32 + 1, CellValue::Formula(text));
                }
            }
        }

        sheet
    }

    /// A workbook held open by the spreadsheet application fails to open
    /// with `PermissionDenied`, wrapped in the format-specific error.
    fn map_error(&self, err: calamine::Error) -> ExportError {
        match err {
            calamine::Error::Io(e)
            | calamine::Error::Xlsx(XlsxError::Io(e))
            | calamine::Error::Xls(XlsError::Io(e))
            | calamine::Error::Xlsb(XlsbError::Io(e))
            | calamine::Error::Ods(OdsError::Io(e)) => ExportError::from_io(e, &self.path),
            other => ExportError::Workbook(format!(
                "Failed to read {}: {}",
                self.path.display(),
                other
            )),
        }
    }
}

/// Convert a calamine cell into a [`CellValue`]
fn convert_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}
