use std::path::PathBuf;
use thiserror::Error;

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Workbook not found: {}", .0.display())]
    WorkbookNotFound(PathBuf),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Sheet '{0}' not found in workbook")]
    MissingSheet(String),

    #[error("No data rows in sheet '{0}'")]
    NoDataRows(String),

    #[error("File locked: {}. Close the spreadsheet application and retry.", .0.display())]
    FileLocked(PathBuf),

    #[error("Unknown export type: {0} (valid types: txt, nesting, materials, edgebands)")]
    UnknownExportKind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExportError {
    /// Map a permission failure on `path` to [`ExportError::FileLocked`].
    ///
    /// A workbook kept open by the spreadsheet application shows up as
    /// `PermissionDenied` on Windows.
    pub fn from_io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            ExportError::FileLocked(path.into())
        } else {
            ExportError::Io(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_from_io_permission_denied_is_file_locked() {
        let err = ExportError::from_io(Error::from(ErrorKind::PermissionDenied), "out.xml");
        assert!(matches!(err, ExportError::FileLocked(ref p) if p == &PathBuf::from("out.xml")));
        assert!(err.to_string().contains("Close the spreadsheet application"));
    }

    #[test]
    fn test_from_io_other_errors_stay_io() {
        let err = ExportError::from_io(Error::from(ErrorKind::NotFound), "out.xml");
        assert!(matches!(err, ExportError::Io(_)));
    }
}
