//! Single-hop formula dereferencing
//!
//! A cell holding `=AT5` reads as the value of cell AT5. Only a direct
//! reference to one other cell is followed, and only one hop: if AT5 is
//! itself a formula, the original formula text is returned unresolved.

use crate::excel::sheet::Sheet;
use crate::types::CellValue;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^=([A-Z]{1,3})(\d+)$").expect("static pattern"))
}

/// Read cell (`row`, `col`), following a single-hop `=COLROW` reference.
pub fn resolve(sheet: &Sheet, row: u32, col: u32) -> &CellValue {
    let value = sheet.cell(row, col);
    let Some((ref_row, ref_col)) = value.formula_text().and_then(parse_reference) else {
        return value;
    };

    let target = sheet.cell(ref_row, ref_col);
    if target.formula_text().is_some() {
        debug!(
            sheet = sheet.name(),
            cell = %format!("{}{}", column_letters(col), row),
            target = %format!("{}{}", column_letters(ref_col), ref_row),
            "reference points at another formula, left unresolved"
        );
        return value;
    }
    target
}

/// Parse `=AT5` into (row 5, column 46). Anything else is `None`.
pub fn parse_reference(formula: &str) -> Option<(u32, u32)> {
    let captures = reference_pattern().captures(formula)?;
    let col = column_index(captures.get(1)?.as_str())?;
    let row = captures.get(2)?.as_str().parse::<u32>().ok()?;
    Some((row, col))
}

/// Convert column letters to a 1-based index (A→1, Z→26, AA→27).
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    letters.chars().try_fold(0u32, |acc, ch| {
        if ch.is_ascii_uppercase() {
            acc.checked_mul(26)?
                .checked_add(ch as u32 - 'A' as u32 + 1)
        } else {
            None
        }
    })
}

/// Convert a 1-based column index to letters (1→A, 26→Z, 27→AA).
pub fn column_letters(index: u32) -> String {
    let mut result = String::new();
    let mut num = index;

    while num > 0 {
        let remainder = (num - 1) % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        num = (num - 1) / 26;
    }

    result
}
