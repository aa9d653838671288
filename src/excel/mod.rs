//! Workbook access
//!
//! - Reader: Excel (.xlsx/.xlsm) → in-memory [`Sheet`]s, in formulas or
//!   cached-values mode
//! - Resolver: single-hop `=COLROW` formula dereferencing

mod reader;
pub mod resolver;
mod sheet;

pub use reader::{ReadMode, Workbook, WorkbookReader};
pub use resolver::resolve;
pub use sheet::Sheet;
