//! swood-export - SWOOD / Optiplanning catalog exporter
//!
//! Turns the material and edgeband catalog workbook into the import files of
//! the nesting suite:
//!
//! - `txt`: Optiplanning material list (tab-delimited)
//! - `nesting`: SWOOD Nesting board list (XML)
//! - `materials`: SWOOD materials and edgebands catalog (XML)
//! - `edgebands`: SWOOD edgebands catalog (XML)
//!
//! The catalog XML is driven by the workbook itself: row 3 of each sheet tags
//! every column with its XML role and row 4 names it.
//!
//! # Example
//!
//! ```no_run
//! use swood_export::export::export;
//! use swood_export::types::ExportKind;
//! use std::path::Path;
//!
//! let report = export(
//!     ExportKind::Materials,
//!     Path::new("Outil_Material_Import.xlsm"),
//!     None,
//! )?;
//! println!("Written: {}", report.path.display());
//! # Ok::<(), swood_export::error::ExportError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod export;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{ExportError, ExportResult};
pub use export::{run_export, ExportReport, ExportSummary};
pub use types::{CellValue, ColumnSchema, ColumnTag, EdgeBandRecord, ExportKind, MaterialRecord};
