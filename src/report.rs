use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::constants::{MILLION, NOT_AVAILABLE, REPORT_HEADER, TOTAL_ROW_LABEL};
use crate::error::Result;
use crate::types::{Appraisal, Valuation};

/// Two decimals, exact halves going to the even digit: `0.125` -> `0.12`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Shortest decimal form, always with a fractional part: `5.25`, `2625000000.0`.
/// Magnitudes from `1e16` up, or below `1e-4`, use exponent form: `1.5e+16`.
pub fn format_decimal(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return format_exponent(value);
    }
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// `1.5e16` -> `1.5e+16`, `1e-5` -> `1e-05`
fn format_exponent(value: f64) -> String {
    let formatted = format!("{:e}", value);
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

/// `2625000000` -> `2625.0M`
pub fn format_isk_millions(value: f64) -> String {
    format!("{}M", format_decimal(round2(value / MILLION)))
}

/// Wrap in literal quotes so spreadsheets import the cell as text.
fn as_text_cell(content: &str) -> String {
    format!("\"{}\"", content)
}

pub fn valuation_row(valuation: &Valuation) -> [String; 5] {
    let average = valuation
        .average_price
        .map(|p| format_decimal(round2(p / MILLION)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let total = valuation
        .total_value
        .map(|t| format_decimal(round2(t)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    [
        valuation.record.name.clone(),
        valuation.record.quantity.to_string(),
        valuation.type_id_text.clone(),
        as_text_cell(&average),
        as_text_cell(&total),
    ]
}

pub fn summary_row(grand_total: f64) -> [String; 5] {
    [
        TOTAL_ROW_LABEL.to_string(),
        String::new(),
        String::new(),
        String::new(),
        format_isk_millions(grand_total),
    ]
}

/// Semicolon-separated report: header, one row per valuation, then the total.
pub fn write_report<W: Write>(writer: W, appraisal: &Appraisal) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    wtr.write_record(REPORT_HEADER)?;
    for valuation in &appraisal.rows {
        wtr.write_record(valuation_row(valuation))?;
    }
    wtr.write_record(summary_row(appraisal.grand_total))?;
    wtr.flush()?;
    Ok(())
}

pub fn write_report_file<P: AsRef<Path>>(path: P, appraisal: &Appraisal) -> Result<()> {
    let file = File::create(path)?;
    write_report(file, appraisal)
}
