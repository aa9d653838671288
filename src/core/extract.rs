//! Catalog record extraction
//!
//! Every catalog sheet shares one layout: rows 1-2 hold the XML preamble,
//! row 3 the column tags, row 4 the column headers, and data starts at
//! row 5. A row is data iff its column 1 (the name) is non-blank after
//! formula resolution and trimming.

use crate::core::format::{
    compute_parametres, compute_saw_reference, format_cost, format_display_string,
};
use crate::error::ExportResult;
use crate::excel::{resolve, Sheet, Workbook};
use crate::types::{CellValue, ColumnSchema, EdgeBandRecord, MaterialRecord};
use tracing::{info, warn};

pub const MATERIALS_SHEET: &str = "Materials";
pub const EDGEBANDS_SHEET: &str = "EdgeBands";

pub const TAG_ROW: u32 = 3;
pub const HEADER_ROW: u32 = 4;
pub const DATA_START_ROW: u32 = 5;

/// Column positions (1-based) read by the abbreviated material schema
mod material_columns {
    pub const THICKNESS: u32 = 4;
    pub const FIBER_MATERIAL: u32 = 5;
    pub const COST: u32 = 6;
    pub const BOARD_L: u32 = 44;
    pub const BOARD_W: u32 = 45;
    pub const REF_FOURNISSEUR: u32 = 46;
}

/// Resolved, trimmed name of `row`, or `None` when the row is not data.
///
/// A numeric zero or a `FALSE` cell is not a name.
pub fn row_name(sheet: &Sheet, row: u32) -> Option<String> {
    match resolve(sheet, row, 1) {
        CellValue::Number(n) if *n == 0.0 => None,
        CellValue::Bool(false) => None,
        value => value
            .raw_text()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty()),
    }
}

/// Data rows of the sheet, from row 5 through the last populated row.
pub fn data_rows(sheet: &Sheet) -> impl Iterator<Item = u32> + '_ {
    (DATA_START_ROW..=sheet.max_row()).filter(move |&row| row_name(sheet, row).is_some())
}

/// Read the tag row and header row over the sheet's populated columns.
pub fn load_schema(sheet: &Sheet) -> ColumnSchema {
    let width = sheet.max_column();
    let read_row = |row: u32| -> Vec<String> {
        (1..=width)
            .map(|col| {
                sheet
                    .cell(row, col)
                    .raw_text()
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default()
            })
            .collect()
    };
    ColumnSchema::from_rows(&read_row(TAG_ROW), &read_row(HEADER_ROW))
}

/// All 49 columns of the material catalog, mapped positionally.
pub fn extract_materials(sheet: &Sheet) -> Vec<MaterialRecord> {
    data_rows(sheet)
        .filter_map(|row| {
            let name = row_name(sheet, row)?;
            let field = |col: u32| format_display_string(resolve(sheet, row, col));

            let mut material = MaterialRecord {
                name,
                description: field(2),
                path: field(3),
                thickness: field(4),
                fiber_material: field(5),
                cost: field(6),
                density: field(7),
                color: field(8),
                transparency: field(9),
                texture: field(10),
                texture_direction: field(11),
                saw_stock: field(12),
                saw_reference: field(13),
                saw_fiber: field(14),
                fiber_speed_factor: field(15),
                fiber_angle_correction: field(16),
                material_type: field(17),
                material_costing_type: field(18),
                top_color: field(19),
                top_texture: field(20),
                top_texture_angle: field(21),
                top_texture_image_direction: field(22),
                bottom_color: field(23),
                bottom_texture: field(24),
                bottom_texture_angle: field(25),
                bottom_texture_image_direction: field(26),
                end_texture: field(27),
                sw_material: field(28),
                image: field(29),
                edge_band_list: field(30),
                laminate_impact: field(31),
                allow_thickness_calibration: field(32),
                min_thickness_calibration: field(33),
                machining_cost_factor: field(34),
                sw_texture_height: field(35),
                top_texture_height: field(36),
                bottom_texture_height: field(37),
                material_name_top: field(38),
                grain_direction_top: field(39),
                stock_offset_top: field(40),
                material_name_bottom: field(41),
                grain_direction_bottom: field(42),
                stock_offset_bottom: field(43),
                board_l: field(44),
                board_w: field(45),
                ref_fournisseur: field(46),
                fournisseur: field(47),
                finish: field(48),
                glass: field(49),
                parametres: String::new(),
            };
            material.parametres = compute_parametres(&material.board_l);
            if material.saw_reference.is_empty() {
                material.saw_reference = compute_saw_reference(&material.name);
            }
            Some(material)
        })
        .collect()
}

/// The 7 columns the Optiplanning TXT needs, with derived fields filled in.
///
/// `saw_reference` is always the name here and `cost` is already formatted.
pub fn extract_material_summaries(sheet: &Sheet) -> Vec<MaterialRecord> {
    use self::material_columns::*;

    data_rows(sheet)
        .filter_map(|row| {
            let name = row_name(sheet, row)?;
            let field = |col: u32| format_display_string(resolve(sheet, row, col));
            let raw_cost = resolve(sheet, row, COST).raw_text().unwrap_or_default();

            let board_l = field(BOARD_L);
            Some(MaterialRecord {
                saw_reference: compute_saw_reference(&name),
                parametres: compute_parametres(&board_l),
                thickness: field(THICKNESS),
                fiber_material: field(FIBER_MATERIAL),
                cost: format_cost(&raw_cost),
                board_w: field(BOARD_W),
                ref_fournisseur: field(REF_FOURNISSEUR),
                board_l,
                name,
                ..Default::default()
            })
        })
        .collect()
}

/// The 23 columns of the edgeband catalog.
pub fn extract_edgebands(sheet: &Sheet) -> Vec<EdgeBandRecord> {
    data_rows(sheet)
        .filter_map(|row| {
            let name = row_name(sheet, row)?;
            let field = |col: u32| format_display_string(resolve(sheet, row, col));

            Some(EdgeBandRecord {
                name,
                id_val: field(2),
                description: field(3),
                path: field(4),
                cost: field(5),
                reference: field(6),
                thickness: field(7),
                color: field(8),
                image_path: field(9),
                creation_corps: field(10),
                stock_offset: field(11),
                width_min: field(12),
                width_max: field(13),
                width: field(14),
                force_stock_exclusion: field(15),
                shape_id: field(16),
                end_shape_id: field(17),
                use_mitre_cut: field(18),
                texture_height: field(19),
                eb_additional_shape_id: field(20),
                ebw_finish: field(21),
                finish: field(22),
                eb_supplier: field(23),
            })
        })
        .collect()
}

//==============================================================================
// Workbook-level readers
//==============================================================================

/// Full material catalog; the `Materials` sheet is required.
pub fn read_materials(workbook: &Workbook) -> ExportResult<Vec<MaterialRecord>> {
    let sheet = workbook.sheet(MATERIALS_SHEET)?;
    let materials = extract_materials(sheet);
    info!(count = materials.len(), "materials read (49 columns)");
    Ok(materials)
}

/// Abbreviated material catalog for the TXT export; `Materials` is required.
pub fn read_material_summaries(workbook: &Workbook) -> ExportResult<Vec<MaterialRecord>> {
    let sheet = workbook.sheet(MATERIALS_SHEET)?;
    let materials = extract_material_summaries(sheet);
    info!(count = materials.len(), "materials read");
    Ok(materials)
}

/// Edgeband catalog. A workbook without an `EdgeBands` sheet has no
/// edgebands; that is not an error.
pub fn read_edgebands(workbook: &Workbook) -> Vec<EdgeBandRecord> {
    match workbook.try_sheet(EDGEBANDS_SHEET) {
        Some(sheet) => {
            let edgebands = extract_edgebands(sheet);
            info!(count = edgebands.len(), "edgebands read");
            edgebands
        }
        None => {
            warn!("sheet '{}' not found, no edgebands read", EDGEBANDS_SHEET);
            Vec::new()
        }
    }
}
