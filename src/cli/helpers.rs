//! Shared helper functions for CLI commands
//!
//! Text and number formatting used across the dashboard views.

use csv::{Terminator, WriterBuilder};

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Write rows as CSV text with the same dialect as table exports
///
/// Fields are quoted only when needed (delimiter, quote, `\r` or `\n`).
pub fn csv_records<I, R>(records: I) -> String
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for record in records {
        if let Err(e) = writer.write_record(record) {
            tracing::warn!(error = %e, "skipping csv row");
        }
    }
    match writer.into_inner() {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::warn!(error = %e, "csv output dropped");
            String::new()
        }
    }
}

/// Insert thousands separators into a string of ASCII digits
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format dollars with cents and separators, e.g. `$1,234,567.89`
///
/// Negative values keep the sign after the symbol: `$-15,000.00`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("${}{}.{}", sign, group_thousands(whole), cents)
}

/// Format whole dollars with separators, e.g. `$50,000`
pub fn format_dollars(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("${}{}", sign, group_thousands(&value.unsigned_abs().to_string()))
}

/// Format a signed delta with one decimal, e.g. `+2.0`, `-1.0`, `+0.0`
pub fn format_signed(value: f64) -> String {
    format!("{:+.1}", value)
}
