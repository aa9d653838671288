//! Optiplanning material import (tab-delimited text)

use crate::core::format::{DEFAULT_COST, PARAMETRES_LONG_BOARD};
use crate::types::MaterialRecord;

/// One line: saw reference, length, width, thickness, fiber material, cost,
/// routing parameter, supplier reference.
pub fn optiplanning_line(material: &MaterialRecord) -> String {
    [
        material.saw_reference.as_str(),
        &material.board_l,
        &material.board_w,
        &material.thickness,
        &material.fiber_material,
        &material.cost,
        &material.parametres,
        &material.ref_fournisseur,
    ]
    .join("\t")
}

/// Lines joined with `\n`, no header and no trailing newline.
pub fn render_optiplanning(materials: &[MaterialRecord]) -> String {
    materials
        .iter()
        .map(optiplanning_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptiplanningStats {
    pub lines: usize,
    pub long_boards: usize,
    pub default_cost: usize,
    pub missing_supplier_ref: usize,
}

impl OptiplanningStats {
    pub fn collect(materials: &[MaterialRecord]) -> Self {
        Self {
            lines: materials.len(),
            long_boards: materials
                .iter()
                .filter(|m| m.parametres == PARAMETRES_LONG_BOARD)
                .count(),
            default_cost: materials.iter().filter(|m| m.cost == DEFAULT_COST).count(),
            missing_supplier_ref: materials
                .iter()
                .filter(|m| m.ref_fournisseur.is_empty())
                .count(),
        }
    }
}
