//! Cell value normalization for the export formats
//!
//! Spreadsheets are weakly typed, so every value crosses into the exports as
//! text. The rules here decide what that text looks like.

use crate::types::CellValue;

/// Unit cost written when the catalog leaves the cost blank
pub const DEFAULT_COST: &str = "1.50";

/// Boards strictly longer than this (mm) route to the 5 m saw
pub const LONG_BOARD_THRESHOLD_MM: f64 = 3200.0;

pub const PARAMETRES_DEFAULT: &str = "Destribois";
pub const PARAMETRES_LONG_BOARD: &str = "Destribois 5m";

/// Format a cell for the tag-driven XML: decimal commas become dots and
/// `TRUE`/`FALSE` are lowercased.
pub fn format_cell_value(value: &CellValue) -> String {
    let Some(raw) = value.raw_text() else {
        return String::new();
    };
    let s = raw.trim().replace(',', ".");
    if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") {
        s.to_lowercase()
    } else {
        s
    }
}

/// Format a cell for a catalog record: trimmed, with a `.0` suffix dropped
/// when the text is an integral number (`"19.0"` → `"19"`).
pub fn format_display_string(value: &CellValue) -> String {
    let Some(raw) = value.raw_text() else {
        return String::new();
    };
    strip_integral_suffix(raw.trim())
}

fn strip_integral_suffix(s: &str) -> String {
    if s.ends_with(".0") {
        if let Ok(n) = s.parse::<f64>() {
            if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e18 {
                return format!("{}", n as i64);
            }
        }
    }
    s.to_string()
}

/// Fixed two-decimal cost; blank or unparsable falls back to [`DEFAULT_COST`].
pub fn format_cost(raw: &str) -> String {
    match parse_number(raw) {
        Some(cost) => format!("{:.2}", cost),
        None => DEFAULT_COST.to_string(),
    }
}

/// `"true"` for `1`, `true`, `yes` and `oui` (any case), `"false"` otherwise.
pub fn format_boolean(raw: Option<&str>) -> &'static str {
    let truthy = raw
        .map(|s| s.trim().to_lowercase())
        .is_some_and(|s| matches!(s.as_str(), "1" | "true" | "yes" | "oui"));
    if truthy {
        "true"
    } else {
        "false"
    }
}

/// Routing label for the Optiplanning import, from the board length in mm.
pub fn compute_parametres(board_l: &str) -> String {
    match parse_number(board_l) {
        Some(length) if length > LONG_BOARD_THRESHOLD_MM => PARAMETRES_LONG_BOARD.to_string(),
        _ => PARAMETRES_DEFAULT.to_string(),
    }
}

/// Default saw reference: the material name itself.
pub fn compute_saw_reference(name: &str) -> String {
    name.to_string()
}

/// Parse trimmed text as a float; blank text is `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Shortest general form with six significant digits, like printf's `%g`.
pub fn format_general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string().to_lowercase();
    }

    // Exponent after rounding to 6 significant digits
    let sci = format!("{:.5e}", value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..6).contains(&exponent) {
        let mantissa = trim_fraction(mantissa);
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else {
        let decimals = (5 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
