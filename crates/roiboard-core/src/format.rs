//! Display helpers for imported figures
//!
//! Every helper tolerates `NaN` (an unparsable cell) and renders
//! [`MISSING`] instead.

/// Fallback text for values that could not be parsed
pub const MISSING: &str = "—";

/// Dollars with thousands separators, e.g. `$25,000` or `$1,234.50`
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    match cents % 100 {
        0 => format!("{}${}", sign, whole),
        frac => format!("{}${}.{:02}", sign, whole, frac),
    }
}

/// Millions with one decimal, e.g. `$42.8M`
pub fn format_millions(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    format!("${:.1}M", value / 1_000_000.0)
}

/// Percent with one decimal, e.g. `18.5%`
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    format!("{:.1}%", value)
}

/// Signed percent change, e.g. `+5.2%` / `-1.4%`
pub fn format_change(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    if value > 0.0 {
        format!("+{:.1}%", value)
    } else {
        format!("{:.1}%", value)
    }
}

/// Whole count with thousands separators
pub fn format_count(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_thousands(rounded.abs() as u64))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
