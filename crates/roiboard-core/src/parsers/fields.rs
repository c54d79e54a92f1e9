//! Field-level helpers shared by the section parsers
//!
//! Rows are split on bare commas (no quoting, no escaping) and every numeric
//! cell goes through [`parse_number`].

use once_cell::sync::Lazy;
use regex::Regex;

/// Longest leading decimal literal, e.g. `42.8` in `42.8M`
static LEADING_DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("leading decimal regex is valid")
});

/// Split a data line into trimmed cells
///
/// Naive split: a comma inside a value always starts a new cell.
pub fn split_row(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).collect()
}

/// Parse a numeric cell, yielding `NaN` when nothing numeric is found
///
/// Strips a leading `+`, a leading `$` (also after a minus sign) and a
/// trailing `%`, then reads the longest decimal prefix. Trailing text after
/// the number is ignored, so `"$42.8M"` reads as `42.8`.
///
/// # Examples
///
/// ```
/// use roiboard_core::parsers::fields::parse_number;
///
/// assert_eq!(parse_number("$25000"), 25000.0);
/// assert_eq!(parse_number("18.5%"), 18.5);
/// assert_eq!(parse_number("+5.2"), 5.2);
/// assert_eq!(parse_number("$42.8M"), 42.8);
/// assert!(parse_number("n/a").is_nan());
/// ```
pub fn parse_number(raw: &str) -> f64 {
    let mut s = raw.trim();
    s = s.strip_prefix('+').unwrap_or(s);
    s = s.strip_suffix('%').unwrap_or(s).trim_end();

    let cleaned;
    let s = if let Some(rest) = s.strip_prefix("-$") {
        cleaned = format!("-{}", rest);
        cleaned.as_str()
    } else {
        s.strip_prefix('$').unwrap_or(s)
    };

    LEADING_DECIMAL
        .find(s)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Case-insensitive comparison of a cell against a header label
pub fn is_header_cell(cell: &str, label: &str) -> bool {
    cell.trim().eq_ignore_ascii_case(label)
}

/// Leading character that keeps a row's first cell from reading as a
/// section marker or a header label (spreadsheet-style `'` prefix)
pub const NAME_ESCAPE: char = '\'';

/// Strip one [`NAME_ESCAPE`] from the first cell of a data row
///
/// ```
/// use roiboard_core::parsers::fields::unescape_leading;
///
/// assert_eq!(unescape_leading("'# Top Channel"), "# Top Channel");
/// assert_eq!(unescape_leading("''Quoted"), "'Quoted");
/// assert_eq!(unescape_leading("Email"), "Email");
/// ```
pub fn unescape_leading(cell: &str) -> &str {
    cell.strip_prefix(NAME_ESCAPE).unwrap_or(cell)
}
