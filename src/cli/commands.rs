use crate::error::{ExportError, ExportResult};
use crate::export::{run_export, ExportReport, ExportSummary};
use crate::types::ExportKind;
use colored::Colorize;
use std::path::Path;

/// Execute the export command.
///
/// Returns `Ok(None)` when the export ran but produced no file; the failure
/// has already been logged.
pub fn export(
    workbook: &Path,
    export_type: &str,
    output_dir: Option<&Path>,
    json: bool,
) -> ExportResult<Option<ExportReport>> {
    if !workbook.exists() {
        return Err(ExportError::WorkbookNotFound(workbook.to_path_buf()));
    }
    let kind: ExportKind = export_type.parse()?;

    if !json {
        println!("{}", kind.title().bold().green());
        println!("   Workbook: {}", workbook.display());
        if let Some(dir) = output_dir {
            println!("   Output dir: {}", dir.display());
        }
        println!();
    }

    let Some(report) = run_export(kind, workbook, output_dir) else {
        if !json {
            println!("{}", "Export failed, no file written".bold().red());
        }
        return Ok(None);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(Some(report))
}

fn print_summary(report: &ExportReport) {
    match report.summary {
        ExportSummary::Txt {
            lines,
            long_boards,
            default_cost,
            missing_supplier_ref,
        } => {
            println!("   {} lines", lines.to_string().bold());
            println!("   {} long boards (Destribois 5m)", long_boards);
            println!("   {} at default cost", default_cost);
            if missing_supplier_ref > 0 {
                println!(
                    "   {}",
                    format!("{missing_supplier_ref} without supplier reference").yellow()
                );
            }
        }
        ExportSummary::Nesting {
            boards,
            horizontal_grain,
        } => {
            println!("   {} boards", boards.to_string().bold());
            println!("   {} with horizontal grain", horizontal_grain);
        }
        ExportSummary::Materials {
            materials,
            edgebands,
        } => {
            println!("   {} materials", materials.to_string().bold());
            println!("   {} edgebands", edgebands.to_string().bold());
        }
        ExportSummary::EdgeBands { edgebands } => {
            println!("   {} edgebands", edgebands.to_string().bold());
        }
    }
    println!();
    println!(
        "{} {}",
        "Written:".bold().green(),
        report.path.display().to_string().bright_white()
    );
}
