use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ExportError;

//==============================================================================
// Cell values
//==============================================================================

/// A single worksheet cell as read from the workbook.
///
/// `Formula` holds the formula text including its leading `=`; it only
/// appears when the workbook is read in formulas mode.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Error(String),
    Formula(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Formula text (leading `=` included) if the cell reads as a formula.
    ///
    /// Literal text starting with `=` counts too, the spreadsheet gives no
    /// way to tell the two apart once read.
    pub fn formula_text(&self) -> Option<&str> {
        match self {
            CellValue::Formula(f) => Some(f),
            CellValue::Text(s) if s.starts_with('=') => Some(s),
            _ => None,
        }
    }

    /// Raw text of the cell, before any export formatting.
    ///
    /// Returns `None` for empty cells so callers can tell "blank" from "".
    pub fn raw_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) | CellValue::Error(s) | CellValue::Formula(s) => Some(s.clone()),
            CellValue::Number(n) => Some(format_number(*n)),
            CellValue::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
            CellValue::DateTime(dt) => Some(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

/// Integral numbers without decimals, others in shortest round-trip form
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

//==============================================================================
// Column schema (tag row + header row)
//==============================================================================

/// XML role of a sheet column, read from the tag row (row 3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnTag {
    /// Blank tag: plain attribute on the object element
    Attribute,
    /// `Properties`
    Properties,
    /// `Property`
    Property,
    /// `/Properties`
    PropertiesEnd,
    /// `Layers`
    Layers,
    /// `Layer`
    Layer,
    /// `/Layer`
    LayerEnd,
    /// `/Layers`
    LayersEnd,
    /// Anything else; the column emits nothing.
    Other(String),
}

impl ColumnTag {
    pub fn parse(tag: &str) -> Self {
        match tag.trim() {
            "" => ColumnTag::Attribute,
            "Properties" => ColumnTag::Properties,
            "Property" => ColumnTag::Property,
            "/Properties" => ColumnTag::PropertiesEnd,
            "Layers" => ColumnTag::Layers,
            "Layer" => ColumnTag::Layer,
            "/Layer" => ColumnTag::LayerEnd,
            "/Layers" => ColumnTag::LayersEnd,
            other => ColumnTag::Other(other.to_string()),
        }
    }

    /// Closing tags keep their structural effect even when the cell is blank.
    pub fn is_closing(&self) -> bool {
        matches!(
            self,
            ColumnTag::PropertiesEnd | ColumnTag::LayerEnd | ColumnTag::LayersEnd
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaColumn {
    pub tag: ColumnTag,
    pub header: String,
}

/// Per-sheet column schema: one `{tag, header}` pair per scanned column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnSchema {
    pub columns: Vec<SchemaColumn>,
}

impl ColumnSchema {
    /// Build a schema from the parallel tag and header rows.
    ///
    /// The shorter row is padded with blanks so both cover the same columns.
    pub fn from_rows<T: AsRef<str>, H: AsRef<str>>(tags: &[T], headers: &[H]) -> Self {
        let width = tags.len().max(headers.len());
        let columns = (0..width)
            .map(|i| SchemaColumn {
                tag: ColumnTag::parse(tags.get(i).map(|t| t.as_ref()).unwrap_or("")),
                header: headers
                    .get(i)
                    .map(|h| h.as_ref().trim().to_string())
                    .unwrap_or_default(),
            })
            .collect();
        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Tag of the column immediately before `index` in schema order.
    pub fn previous_tag(&self, index: usize) -> Option<&ColumnTag> {
        index.checked_sub(1).map(|i| &self.columns[i].tag)
    }
}

//==============================================================================
// Catalog records
//==============================================================================

/// One row of the `Materials` sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterialRecord {
    pub name: String,
    pub description: String,
    pub path: String,
    pub thickness: String,
    pub fiber_material: String,
    pub cost: String,
    pub density: String,
    pub color: String,
    pub transparency: String,
    pub texture: String,
    pub texture_direction: String,
    pub saw_stock: String,
    pub saw_reference: String,
    pub saw_fiber: String,
    pub fiber_speed_factor: String,
    pub fiber_angle_correction: String,
    pub material_type: String,
    pub material_costing_type: String,
    pub top_color: String,
    pub top_texture: String,
    pub top_texture_angle: String,
    pub top_texture_image_direction: String,
    pub bottom_color: String,
    pub bottom_texture: String,
    pub bottom_texture_angle: String,
    pub bottom_texture_image_direction: String,
    pub end_texture: String,
    pub sw_material: String,
    pub image: String,
    pub edge_band_list: String,
    pub laminate_impact: String,
    pub allow_thickness_calibration: String,
    pub min_thickness_calibration: String,
    pub machining_cost_factor: String,
    pub sw_texture_height: String,
    pub top_texture_height: String,
    pub bottom_texture_height: String,
    pub material_name_top: String,
    pub grain_direction_top: String,
    pub stock_offset_top: String,
    pub material_name_bottom: String,
    pub grain_direction_bottom: String,
    pub stock_offset_bottom: String,
    pub board_l: String,
    pub board_w: String,
    pub ref_fournisseur: String,
    pub fournisseur: String,
    pub finish: String,
    pub glass: String,
    /// Routing label derived from `board_l`
    pub parametres: String,
}

/// One row of the `EdgeBands` sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EdgeBandRecord {
    pub name: String,
    pub id_val: String,
    pub description: String,
    pub path: String,
    pub cost: String,
    pub reference: String,
    pub thickness: String,
    pub color: String,
    pub image_path: String,
    pub creation_corps: String,
    pub stock_offset: String,
    pub width_min: String,
    pub width_max: String,
    pub width: String,
    pub force_stock_exclusion: String,
    pub shape_id: String,
    pub end_shape_id: String,
    pub use_mitre_cut: String,
    pub texture_height: String,
    pub eb_additional_shape_id: String,
    pub ebw_finish: String,
    pub finish: String,
    pub eb_supplier: String,
}

//==============================================================================
// Export products
//==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    /// `Materiaux_a_importer_Optiplanning_<ts>.txt`
    Txt,
    /// `Plaques_Nesting_<ts>.xml`
    Nesting,
    /// `Import_Swood_Materiaux_<ts>.xml`
    Materials,
    /// `Import_Swood_Chants_<ts>.xml`
    EdgeBands,
}

impl ExportKind {
    pub const ALL: [ExportKind; 4] = [
        ExportKind::Txt,
        ExportKind::Nesting,
        ExportKind::Materials,
        ExportKind::EdgeBands,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Txt => "txt",
            ExportKind::Nesting => "nesting",
            ExportKind::Materials => "materials",
            ExportKind::EdgeBands => "edgebands",
        }
    }

    /// Human-readable title used in logs and the CLI banner.
    pub fn title(&self) -> &'static str {
        match self {
            ExportKind::Txt => "Export TXT Optiplanning",
            ExportKind::Nesting => "Export XML Plaques Nesting",
            ExportKind::Materials => "Export XML Materiaux SWOOD",
            ExportKind::EdgeBands => "Export XML Chants (EdgeBands)",
        }
    }

    /// Output file name prefix; the timestamp and extension follow.
    pub fn file_prefix(&self) -> &'static str {
        match self {
            ExportKind::Txt => "Materiaux_a_importer_Optiplanning",
            ExportKind::Nesting => "Plaques_Nesting",
            ExportKind::Materials => "Import_Swood_Materiaux",
            ExportKind::EdgeBands => "Import_Swood_Chants",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportKind::Txt => "txt",
            _ => "xml",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportKind {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ExportError::UnknownExportKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_raw_text() {
        assert_eq!(CellValue::Empty.raw_text(), None);
        assert_eq!(CellValue::Number(19.0).raw_text().unwrap(), "19");
        assert_eq!(CellValue::Number(0.8).raw_text().unwrap(), "0.8");
        assert_eq!(CellValue::Bool(true).raw_text().unwrap(), "TRUE");
        assert_eq!(
            CellValue::Formula("=AT5".to_string()).raw_text().unwrap(),
            "=AT5"
        );
    }

    #[test]
    fn test_formula_text_includes_literal_equals() {
        assert_eq!(
            CellValue::Text("=B2".to_string()).formula_text(),
            Some("=B2")
        );
        assert_eq!(CellValue::Text("B2".to_string()).formula_text(), None);
        assert_eq!(CellValue::Number(1.0).formula_text(), None);
    }

    #[test]
    fn test_column_tag_parse() {
        assert_eq!(ColumnTag::parse(""), ColumnTag::Attribute);
        assert_eq!(ColumnTag::parse(" Properties "), ColumnTag::Properties);
        assert_eq!(ColumnTag::parse("/Layers"), ColumnTag::LayersEnd);
        assert_eq!(
            ColumnTag::parse("Comment"),
            ColumnTag::Other("Comment".to_string())
        );
        assert!(ColumnTag::LayerEnd.is_closing());
        assert!(!ColumnTag::Layer.is_closing());
    }

    #[test]
    fn test_schema_pads_shorter_row() {
        let schema = ColumnSchema::from_rows(&["", "Properties"], &["Name"]);
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.columns[1].header, "");
        assert_eq!(schema.previous_tag(0), None);
        assert_eq!(schema.previous_tag(1), Some(&ColumnTag::Attribute));
    }

    #[test]
    fn test_export_kind_from_str() {
        assert_eq!("txt".parse::<ExportKind>().unwrap(), ExportKind::Txt);
        assert_eq!(
            "edgebands".parse::<ExportKind>().unwrap(),
            ExportKind::EdgeBands
        );
        assert!(matches!(
            "pdf".parse::<ExportKind>(),
            Err(ExportError::UnknownExportKind(_))
        ));
    }
}
