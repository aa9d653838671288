//! Export orchestration
//!
//! Each export opens the workbook, builds one output document and writes it
//! to a timestamped file. The `export_*` functions fail fast with
//! [`ExportError`]; [`run_export`] is the recovery boundary that logs the
//! failure and returns `None` instead.

use crate::core::extract::{
    read_material_summaries, read_materials, EDGEBANDS_SHEET, MATERIALS_SHEET,
};
use crate::core::{
    render_boards, render_optiplanning, render_sheet, GrainDirection, OptiplanningStats, SheetXml,
};
use crate::error::{ExportError, ExportResult};
use crate::excel::{ReadMode, Sheet, Workbook, WorkbookReader};
use crate::types::ExportKind;
use crate::writer::{output_path, write_output};
use chrono::Local;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Counts reported after a successful export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportSummary {
    Txt {
        lines: usize,
        long_boards: usize,
        default_cost: usize,
        missing_supplier_ref: usize,
    },
    Nesting {
        boards: usize,
        horizontal_grain: usize,
    },
    Materials {
        materials: usize,
        edgebands: usize,
    },
    EdgeBands {
        edgebands: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub kind: ExportKind,
    pub path: PathBuf,
    pub summary: ExportSummary,
}

fn open(workbook: &Path, mode: ReadMode) -> ExportResult<Workbook> {
    info!(
        workbook = %workbook.display(),
        mode = ?mode,
        "reading workbook"
    );
    WorkbookReader::new(workbook).read(mode)
}

/// Preamble lines followed by the sheet blocks, joined like the catalog
/// macro: each block loses the line break before its opening tag, so the
/// first block follows the root line directly.
fn catalog_document(declaration: &str, root: &str, blocks: &[&SheetXml]) -> String {
    let mut xml = format!("{declaration}\r\n{root}");
    for block in blocks {
        xml.push_str(block.body.strip_prefix("\r\n").unwrap_or(&block.body));
    }
    xml.push_str("\r\n</SWOODMat>");
    xml
}

fn write(
    kind: ExportKind,
    workbook: &Path,
    output_dir: Option<&Path>,
    contents: &str,
) -> ExportResult<PathBuf> {
    let path = output_path(kind, workbook, output_dir, Local::now().naive_local());
    write_output(&path, contents)?;
    info!(path = %path.display(), "file written");
    Ok(path)
}

/// Optiplanning TXT: one tab-separated line per material.
pub fn export_optiplanning_txt(
    workbook: &Path,
    output_dir: Option<&Path>,
) -> ExportResult<ExportReport> {
    let book = open(workbook, ReadMode::CachedValues)?;
    let materials = read_material_summaries(&book)?;
    if materials.is_empty() {
        return Err(ExportError::NoDataRows(MATERIALS_SHEET.to_string()));
    }

    let path = write(
        ExportKind::Txt,
        workbook,
        output_dir,
        &render_optiplanning(&materials),
    )?;

    let stats = OptiplanningStats::collect(&materials);
    info!(
        lines = stats.lines,
        long_boards = stats.long_boards,
        default_cost = stats.default_cost,
        "optiplanning export done"
    );
    if stats.missing_supplier_ref > 0 {
        warn!(
            count = stats.missing_supplier_ref,
            "lines without supplier reference"
        );
    }

    Ok(ExportReport {
        kind: ExportKind::Txt,
        path,
        summary: ExportSummary::Txt {
            lines: stats.lines,
            long_boards: stats.long_boards,
            default_cost: stats.default_cost,
            missing_supplier_ref: stats.missing_supplier_ref,
        },
    })
}

/// Board list for SWOOD Nesting, one `<Board>` per material.
pub fn export_xml_boards_nesting(
    workbook: &Path,
    output_dir: Option<&Path>,
) -> ExportResult<ExportReport> {
    let book = open(workbook, ReadMode::Formulas)?;
    let materials = read_materials(&book)?;
    if materials.is_empty() {
        return Err(ExportError::NoDataRows(MATERIALS_SHEET.to_string()));
    }

    let (declaration, root) = book.sheet(MATERIALS_SHEET)?.xml_preamble();
    let xml = render_boards(&declaration, &root, &materials, || {
        Uuid::new_v4().to_string()
    });
    let path = write(ExportKind::Nesting, workbook, output_dir, &xml)?;

    let horizontal_grain = materials
        .iter()
        .filter(|m| {
            GrainDirection::from_fiber_material(&m.fiber_material) == GrainDirection::Horizontal
        })
        .count();
    info!(boards = materials.len(), horizontal_grain, "nesting export done");

    Ok(ExportReport {
        kind: ExportKind::Nesting,
        path,
        summary: ExportSummary::Nesting {
            boards: materials.len(),
            horizontal_grain,
        },
    })
}

/// Full SWOOD catalog: the `Materials` block followed by the `EdgeBands`
/// block, both emitted from their sheet's tag and header rows.
pub fn export_xml_materials(
    workbook: &Path,
    output_dir: Option<&Path>,
) -> ExportResult<ExportReport> {
    let book = open(workbook, ReadMode::Formulas)?;
    let materials_sheet = book.sheet(MATERIALS_SHEET)?;
    let (declaration, root) = materials_sheet.xml_preamble();

    let materials = render_sheet(materials_sheet);
    info!(count = materials.count, "material elements emitted");
    if materials.count == 0 {
        warn!("no material rows found");
    }

    let edgebands = match book.try_sheet(EDGEBANDS_SHEET) {
        Some(sheet) => render_sheet(sheet),
        None => {
            warn!("sheet '{}' not found, no edgebands exported", EDGEBANDS_SHEET);
            SheetXml::default()
        }
    };
    info!(count = edgebands.count, "edgeband elements emitted");

    let xml = catalog_document(&declaration, &root, &[&materials, &edgebands]);
    let path = write(ExportKind::Materials, workbook, output_dir, &xml)?;

    Ok(ExportReport {
        kind: ExportKind::Materials,
        path,
        summary: ExportSummary::Materials {
            materials: materials.count,
            edgebands: edgebands.count,
        },
    })
}

/// SWOOD edgeband catalog alone.
///
/// The preamble is read from cached values, so a formula in A1/A2 yields its
/// last computed text. A workbook without an `EdgeBands` sheet still produces
/// a (block-less) document; the preamble then comes from the `Materials`
/// sheet.
pub fn export_xml_edgebands(
    workbook: &Path,
    output_dir: Option<&Path>,
) -> ExportResult<ExportReport> {
    let cached = open(workbook, ReadMode::CachedValues)?;
    let (declaration, root) = cached
        .try_sheet(EDGEBANDS_SHEET)
        .or_else(|| cached.try_sheet(MATERIALS_SHEET))
        .map(Sheet::xml_preamble)
        .unwrap_or_else(|| Sheet::new(EDGEBANDS_SHEET).xml_preamble());

    let book = open(workbook, ReadMode::Formulas)?;
    let edgebands = match book.try_sheet(EDGEBANDS_SHEET) {
        Some(sheet) => render_sheet(sheet),
        None => {
            warn!("sheet '{}' not found, no edgebands exported", EDGEBANDS_SHEET);
            SheetXml::default()
        }
    };
    info!(count = edgebands.count, "edgeband elements emitted");

    let xml = catalog_document(&declaration, &root, &[&edgebands]);
    let path = write(ExportKind::EdgeBands, workbook, output_dir, &xml)?;

    Ok(ExportReport {
        kind: ExportKind::EdgeBands,
        path,
        summary: ExportSummary::EdgeBands {
            edgebands: edgebands.count,
        },
    })
}

/// Run one export, failing fast.
pub fn export(
    kind: ExportKind,
    workbook: &Path,
    output_dir: Option<&Path>,
) -> ExportResult<ExportReport> {
    match kind {
        ExportKind::Txt => export_optiplanning_txt(workbook, output_dir),
        ExportKind::Nesting => export_xml_boards_nesting(workbook, output_dir),
        ExportKind::Materials => export_xml_materials(workbook, output_dir),
        ExportKind::EdgeBands => export_xml_edgebands(workbook, output_dir),
    }
}

/// Run one export; any failure is logged and reported as `None`.
pub fn run_export(
    kind: ExportKind,
    workbook: &Path,
    output_dir: Option<&Path>,
) -> Option<ExportReport> {
    info!(export = kind.title(), "export started");
    match export(kind, workbook, output_dir) {
        Ok(report) => {
            info!(path = %report.path.display(), "export finished");
            Some(report)
        }
        Err(ExportError::FileLocked(path)) => {
            error!(
                path = %path.display(),
                "file locked: close the spreadsheet application and retry"
            );
            None
        }
        Err(ExportError::NoDataRows(sheet)) => {
            error!(sheet = %sheet, "no material read, nothing exported");
            None
        }
        Err(e) => {
            error!(error = ?e, "export failed: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(body: &str, count: usize) -> SheetXml {
        SheetXml {
            body: body.to_string(),
            count,
        }
    }

    #[test]
    fn test_catalog_document_joins_blocks_without_break() {
        let materials = block("\r\n\t<Materials>\r\n\t\t<Material Name=\"A\" />\r\n\t</Materials>", 1);
        let edgebands = block("\r\n\t<EdgeBands>\r\n\t</EdgeBands>", 0);

        let xml = catalog_document("<?xml?>", "<SWOODMat>", &[&materials, &edgebands]);

        assert_eq!(
            xml,
            "<?xml?>\r\n<SWOODMat>\t<Materials>\r\n\t\t<Material Name=\"A\" />\r\n\t</Materials>\
             \t<EdgeBands>\r\n\t</EdgeBands>\r\n</SWOODMat>"
        );
    }

    #[test]
    fn test_catalog_document_skips_missing_block() {
        let xml = catalog_document("<?xml?>", "<SWOODMat>", &[&SheetXml::default()]);
        assert_eq!(xml, "<?xml?>\r\n<SWOODMat>\r\n</SWOODMat>");
    }
}
