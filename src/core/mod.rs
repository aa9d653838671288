//! Export core: value formatting, record extraction and the output generators

pub mod boards;
pub mod emitter;
pub mod extract;
pub mod format;
pub mod optiplanning;

pub use boards::{render_boards, Board, GrainDirection};
pub use emitter::{emit_sheet, render_sheet, SheetXml, TagEmitter};
pub use extract::{
    extract_edgebands, extract_material_summaries, extract_materials, load_schema,
    read_edgebands, read_material_summaries, read_materials, EDGEBANDS_SHEET, MATERIALS_SHEET,
};
pub use optiplanning::{render_optiplanning, OptiplanningStats};
