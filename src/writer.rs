use crate::error::{ExportError, ExportResult};
use crate::types::ExportKind;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp embedded in output file names: `YYYYMMDD_HHMMSS`
pub fn file_timestamp(now: NaiveDateTime) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

/// Directory the export writes into: the caller's choice, else the folder
/// holding the workbook.
pub fn output_dir_for(workbook: &Path, output_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = output_dir {
        return dir.to_path_buf();
    }
    let absolute = std::path::absolute(workbook).unwrap_or_else(|_| workbook.to_path_buf());
    absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Full output path, e.g. `Plaques_Nesting_20260114_093015.xml`
pub fn output_path(
    kind: ExportKind,
    workbook: &Path,
    output_dir: Option<&Path>,
    now: NaiveDateTime,
) -> PathBuf {
    output_dir_for(workbook, output_dir).join(format!(
        "{}_{}.{}",
        kind.file_prefix(),
        file_timestamp(now),
        kind.extension()
    ))
}

/// Write the export file (UTF-8, content written as-is).
///
/// A file held open by another process surfaces as [`ExportError::FileLocked`].
pub fn write_output(path: &Path, contents: &str) -> ExportResult<()> {
    fs::write(path, contents).map_err(|e| ExportError::from_io(e, path))
}
