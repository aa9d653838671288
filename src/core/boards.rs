//! Board list for SWOOD Nesting
//!
//! Unlike the catalog XML, the board list has a fixed shape: one
//! self-closing `<Board>` per material with 27 attributes in a set order.
//! Catalog dimensions are millimeters; SWOOD expects meters here.

use crate::core::format::{format_general, parse_number};
use crate::types::MaterialRecord;

const DEFAULT_LENGTH_MM: f64 = 2800.0;
const DEFAULT_WIDTH_MM: f64 = 2070.0;
const DEFAULT_THICKNESS_MM: f64 = 19.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrainDirection {
    Horizontal,
    None,
}

impl GrainDirection {
    /// `fiber_material == "1"` marks a grained decor
    pub fn from_fiber_material(fiber_material: &str) -> Self {
        if fiber_material == "1" {
            GrainDirection::Horizontal
        } else {
            GrainDirection::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GrainDirection::Horizontal => "Horizontal",
            GrainDirection::None => "None",
        }
    }
}

/// Numeric board values derived from a material
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Meters
    pub length: f64,
    /// Meters
    pub width: f64,
    /// Meters
    pub thickness: f64,
    pub grain: GrainDirection,
    /// `length × width × unit cost`
    pub cost: f64,
}

impl Board {
    pub fn from_material(material: &MaterialRecord) -> Self {
        let mm = |raw: &str, default: f64| parse_number(raw).unwrap_or(default);

        let length = mm(&material.board_l, DEFAULT_LENGTH_MM) / 1000.0;
        let width = mm(&material.board_w, DEFAULT_WIDTH_MM) / 1000.0;
        let thickness = mm(&material.thickness, DEFAULT_THICKNESS_MM) / 1000.0;
        let unit_cost = parse_number(&material.cost).unwrap_or(0.0);

        Self {
            length,
            width,
            thickness,
            grain: GrainDirection::from_fiber_material(&material.fiber_material),
            cost: length * width * unit_cost,
        }
    }
}

/// One `<Board ... />` element, `id` being the 1-based position in the list.
pub fn board_element(material: &MaterialRecord, id: usize, library_uuid: &str) -> String {
    let board = Board::from_material(material);
    let materials = if material.saw_reference.is_empty() {
        &material.name
    } else {
        &material.saw_reference
    };

    let attributes: [(&str, String); 27] = [
        ("Name", material.name.clone()),
        ("Description", material.description.clone()),
        ("Path", material.path.clone()),
        ("BoardType", "Panel".to_string()),
        ("Length", format_general(board.length)),
        ("Width", format_general(board.width)),
        ("Thickness", format_general(board.thickness)),
        ("GrainDirection", board.grain.as_str().to_string()),
        ("Quantity", "10".to_string()),
        ("Cost", format!("{:.2}", board.cost)),
        ("MaterialID", "0".to_string()),
        ("Reference", material.ref_fournisseur.clone()),
        ("Supplier", material.fournisseur.clone()),
        ("SupplierReference", material.ref_fournisseur.clone()),
        ("NestingCorner", "Lower_Left".to_string()),
        ("NestingDirection", "X".to_string()),
        ("NestingUniformCollar", "0".to_string()),
        ("DefaultNestPriority", "1".to_string()),
        ("TopMaterial", String::new()),
        ("TopGrainAngle", "NaN".to_string()),
        ("BottomMaterial", String::new()),
        ("BottomGrainAngle", "NaN".to_string()),
        ("CanFlipTopBottom", "false".to_string()),
        ("LibraryUUID", library_uuid.to_string()),
        ("ID", id.to_string()),
        ("ForBoardEstimation", "true".to_string()),
        ("Materials", materials.clone()),
    ];

    let mut out = String::from("\r\n\t\t<Board");
    for (name, value) in &attributes {
        out.push_str(&format!(" {name}=\"{value}\""));
    }
    out.push_str(" />");
    out
}

/// Full board document: preamble lines, then `<Boards>` and `</SWOODMat>`.
///
/// `next_uuid` supplies one `LibraryUUID` per board.
pub fn render_boards<F>(
    declaration: &str,
    root: &str,
    materials: &[MaterialRecord],
    mut next_uuid: F,
) -> String
where
    F: FnMut() -> String,
{
    let mut out = format!("{declaration}\r\n{root}\r\n\t<Boards>");
    for (index, material) in materials.iter().enumerate() {
        out.push_str(&board_element(material, index + 1, &next_uuid()));
    }
    out.push_str("\r\n\t</Boards>\r\n</SWOODMat>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material() -> MaterialRecord {
        MaterialRecord {
            name: "MEL-H1234".to_string(),
            description: "Melamine chene".to_string(),
            thickness: "19".to_string(),
            fiber_material: "1".to_string(),
            cost: "10".to_string(),
            board_l: "3600".to_string(),
            board_w: "2070".to_string(),
            ref_fournisseur: "EGG-H1234".to_string(),
            fournisseur: "EGGER".to_string(),
            saw_reference: "MEL-H1234".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_board_dimensions_in_meters() {
        let board = Board::from_material(&material());
        assert_eq!(board.length, 3.6);
        assert_eq!(board.width, 2.07);
        assert_eq!(board.thickness, 0.019);
        assert_eq!(board.grain, GrainDirection::Horizontal);
        assert_eq!(format!("{:.2}", board.cost), "74.52");
    }

    #[test]
    fn test_board_defaults() {
        let board = Board::from_material(&MaterialRecord {
            name: "X".to_string(),
            board_l: "n/a".to_string(),
            ..Default::default()
        });
        assert_eq!(board.length, 2.8);
        assert_eq!(board.width, 2.07);
        assert_eq!(board.thickness, 0.019);
        assert_eq!(board.grain, GrainDirection::None);
        assert_eq!(board.cost, 0.0);
    }

    #[test]
    fn test_board_element_attribute_order() {
        let xml = board_element(&material(), 3, "00000000-0000-4000-8000-000000000000");
        assert_eq!(
            xml,
            "\r\n\t\t<Board Name=\"MEL-H1234\" Description=\"Melamine chene\" Path=\"\" \
             BoardType=\"Panel\" Length=\"3.6\" Width=\"2.07\" Thickness=\"0.019\" \
             GrainDirection=\"Horizontal\" Quantity=\"10\" Cost=\"74.52\" MaterialID=\"0\" \
             Reference=\"EGG-H1234\" Supplier=\"EGGER\" SupplierReference=\"EGG-H1234\" \
             NestingCorner=\"Lower_Left\" NestingDirection=\"X\" NestingUniformCollar=\"0\" \
             DefaultNestPriority=\"1\" TopMaterial=\"\" TopGrainAngle=\"NaN\" BottomMaterial=\"\" \
             BottomGrainAngle=\"NaN\" CanFlipTopBottom=\"false\" \
             LibraryUUID=\"00000000-0000-4000-8000-000000000000\" ID=\"3\" \
             ForBoardEstimation=\"true\" Materials=\"MEL-H1234\" />"
        );
    }

    #[test]
    fn test_render_boards_numbers_ids_and_uuids() {
        let mut n = 0;
        let xml = render_boards(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>",
            "<SWOODMat Version=\"2\">",
            &[material(), material()],
            || {
                n += 1;
                format!("uuid-{n}")
            },
        );
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n<SWOODMat Version=\"2\">\r\n\t<Boards>\r\n\t\t<Board "));
        assert!(xml.contains("LibraryUUID=\"uuid-1\" ID=\"1\""));
        assert!(xml.contains("LibraryUUID=\"uuid-2\" ID=\"2\""));
        assert!(xml.ends_with(" />\r\n\t</Boards>\r\n</SWOODMat>"));
    }
}
