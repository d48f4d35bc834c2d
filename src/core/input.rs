use crate::error::{Error, Result};

/// Keeps only ASCII digits and reads them as a whole amount.
///
/// Empty input reads as 0 and overlong digit runs saturate at `u64::MAX`.
pub fn parse_amount_text(text: &str) -> u64 {
    text.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'))
        })
}

/// Parses a percentage typed into a number field. Blank text reads as 0.
pub fn parse_percent_text(field: &'static str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::InvalidNumber {
            field,
            input: text.to_string(),
        }),
    }
}
