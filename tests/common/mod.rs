//! Fixture workbooks for the integration tests
//!
//! Workbooks are written with rust_xlsxwriter into a temp dir and read back
//! through the real calamine path.

#![allow(dead_code)]

use rust_xlsxwriter::{Formula, Workbook, Worksheet};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;
pub const ROOT: &str = r#"<SWOODMat Version="1">"#;

/// 1-based cell write, the way the catalog is described.
fn text(sheet: &mut Worksheet, row: u32, col: u16, value: &str) {
    sheet.write_string(row - 1, col - 1, value).unwrap();
}

fn number(sheet: &mut Worksheet, row: u32, col: u16, value: f64) {
    sheet.write_number(row - 1, col - 1, value).unwrap();
}

fn preamble(sheet: &mut Worksheet, declaration: Option<&str>) {
    if let Some(declaration) = declaration {
        text(sheet, 1, 1, declaration);
    }
    text(sheet, 2, 1, ROOT);
}

fn schema(sheet: &mut Worksheet, tags: &[&str], headers: &[&str]) {
    for (i, tag) in tags.iter().enumerate() {
        if !tag.is_empty() {
            text(sheet, 3, i as u16 + 1, tag);
        }
    }
    for (i, header) in headers.iter().enumerate() {
        text(sheet, 4, i as u16 + 1, header);
    }
}

/// Small tag-driven catalog: attributes, a Properties block and a Layers
/// block on `Materials`, plain attributes on `EdgeBands`. The `EdgeBands`
/// declaration is blank and its root line is a formula.
pub fn tagged_catalog(dir: &Path, with_edgebands: bool) -> PathBuf {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Materials").unwrap();
    preamble(sheet, Some(DECLARATION));
    schema(
        sheet,
        &["", "", "Properties", "/Properties", "Layers", "/Layers"],
        &["Name", "Thickness", "Color", "Density", "LayerName", "Angle"],
    );
    text(sheet, 5, 1, "MEL-H1234");
    number(sheet, 5, 2, 19.0);
    text(sheet, 5, 3, "White");
    text(sheet, 5, 4, "0,8");
    text(sheet, 5, 5, "Top");
    number(sheet, 5, 6, 0.0);
    text(sheet, 6, 1, "PLY-18");
    number(sheet, 6, 2, 18.0);
    // Blank name: not a data row
    number(sheet, 7, 2, 25.0);

    if with_edgebands {
        let sheet = workbook.add_worksheet();
        sheet.set_name("EdgeBands").unwrap();
        // Root line copied from Materials by formula, cached as ROOT
        sheet
            .write_formula(1, 0, Formula::new("=Materials!A2").set_result(ROOT))
            .unwrap();
        schema(sheet, &["", ""], &["Name", "Thickness"]);
        text(sheet, 5, 1, "ABS-WHITE");
        number(sheet, 5, 2, 0.8);
    }

    let path = dir.join("tagged_catalog.xlsx");
    workbook.save(&path).unwrap();
    path
}

/// Full-width material catalog (49 columns) for the TXT and board exports.
///
/// Row 6 takes its supplier reference from row 5 through `=AT5`.
pub fn material_catalog(dir: &Path) -> PathBuf {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Materials").unwrap();
    preamble(sheet, Some(DECLARATION));
    for col in 1..=49u16 {
        text(sheet, 4, col, &format!("Col{col}"));
    }

    text(sheet, 5, 1, "MEL-H1234");
    text(sheet, 5, 2, "Melamine chene");
    text(sheet, 5, 3, "Panneaux");
    number(sheet, 5, 4, 19.0);
    number(sheet, 5, 5, 1.0);
    number(sheet, 5, 44, 3600.0);
    number(sheet, 5, 45, 2070.0);
    text(sheet, 5, 46, "EGG-H1234");
    text(sheet, 5, 47, "EGGER");

    text(sheet, 6, 1, "  PLY-18 ");
    number(sheet, 6, 4, 18.0);
    number(sheet, 6, 5, 0.0);
    number(sheet, 6, 6, 12.5);
    number(sheet, 6, 44, 2500.0);
    number(sheet, 6, 45, 1220.0);
    sheet
        .write_formula(5, 45, Formula::new("=AT5").set_result("EGG-H1234"))
        .unwrap();

    let path = dir.join("material_catalog.xlsx");
    workbook.save(&path).unwrap();
    path
}

/// `Materials` sheet with its preamble and schema rows but no data.
pub fn empty_catalog(dir: &Path) -> PathBuf {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Materials").unwrap();
    preamble(sheet, Some(DECLARATION));
    schema(sheet, &[""], &["Name"]);

    let path = dir.join("empty_catalog.xlsx");
    workbook.save(&path).unwrap();
    path
}

/// A workbook without any catalog sheet.
pub fn unrelated_workbook(dir: &Path) -> PathBuf {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sheet1").unwrap();
    text(sheet, 1, 1, "hello");

    let path = dir.join("unrelated.xlsx");
    workbook.save(&path).unwrap();
    path
}

/// The only file in `dir` whose name starts with `prefix`.
pub fn single_output(dir: &Path, prefix: &str) -> PathBuf {
    let mut matches: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(prefix))
        })
        .collect();
    assert_eq!(matches.len(), 1, "expected one {prefix} file in {dir:?}");
    matches.remove(0)
}

pub fn output_dir() -> TempDir {
    TempDir::new().unwrap()
}
