//! FILENAME: core/export/src/number_format.rs
//! PURPOSE: Number-to-text conversions used by the export cells.
//! CONTEXT: Exported text must read exactly like the listing screen:
//! prices with two fixed decimals, rates in their shortest decimal form.

/// Star glyph appended to ratings.
pub const STAR_GLYPH: &str = "⭐";

/// Format a number with exactly `decimal_places` decimals.
/// Exact ties round away from zero (`0.125` -> `0.13`), matching the fixed-point
/// formatting of the listing screen rather than round-half-to-even.
pub fn format_fixed(value: f64, decimal_places: u8) -> String {
    let prec = decimal_places as usize;
    let abs = value.abs();
    let scale = 10f64.powi(decimal_places as i32);
    let scaled = abs * scale;

    let body = if is_exact_tie(abs, decimal_places) && scaled.is_finite() {
        let rounded = (scaled + 0.5).floor() / scale;
        format!("{:.prec$}", rounded, prec = prec)
    } else {
        format!("{:.prec$}", abs, prec = prec)
    };

    if value < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Whether `abs` lies exactly half-way between two representable outputs.
/// Only dyadic fractions can be exact ties: for two decimals those are the
/// odd eighths (x.125, x.375, x.625, x.875).
fn is_exact_tie(abs: f64, decimal_places: u8) -> bool {
    match decimal_places {
        0 => abs.fract() == 0.5,
        1 => (abs * 4.0).fract() == 0.0 && ((abs * 4.0) as u64) % 2 == 1,
        2 => (abs * 8.0).fract() == 0.0 && ((abs * 8.0) as u64) % 2 == 1,
        _ => false,
    }
}

/// Currency string with a leading dollar sign and two decimals, no grouping.
pub fn format_currency(value: f64) -> String {
    format!("${}", format_fixed(value, 2))
}

/// Shortest decimal form of a number: `3` for 3.0, `4.5` for 4.5.
pub fn format_general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Rating rate followed by the star glyph.
pub fn format_rating(rate: f64) -> String {
    format!("{} {}", format_general(rate), STAR_GLYPH)
}
