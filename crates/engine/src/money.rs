//! Conversion between major-unit strings and stored minor units.
//!
//! All monetary values in the engine are signed `i64` **minor units** of a
//! concrete [`Currency`]; this module is the only place that knows how many
//! fraction digits each currency carries.

use crate::{Currency, LedgerError, ResultLedger};

/// Formats a signed minor-unit amount as a major-unit string.
///
/// ```rust
/// use engine::{Currency, format_minor};
///
/// assert_eq!(format_minor(2005, Currency::Usd), "20.05");
/// assert_eq!(format_minor(-1010, Currency::Krw), "-1010");
/// ```
#[must_use]
pub fn format_minor(amount_minor: i64, currency: Currency) -> String {
    let digits = u32::from(currency.minor_units());
    if digits == 0 {
        return amount_minor.to_string();
    }

    let scale = 10_i64.pow(digits);
    let sign = if amount_minor < 0 { "-" } else { "" };
    let abs = amount_minor.unsigned_abs();
    let major = abs / scale.unsigned_abs();
    let minor = abs % scale.unsigned_abs();
    format!("{sign}{major}.{minor:0width$}", width = digits as usize)
}

/// Parses a major-unit string into minor units.
///
/// Accepts `.` or `,` as the decimal separator and rejects more fraction
/// digits than the currency uses.
///
/// ```rust
/// use engine::{Currency, parse_major};
///
/// assert_eq!(parse_major("20.05", Currency::Usd).unwrap(), 2005);
/// assert_eq!(parse_major("1000", Currency::Krw).unwrap(), 1000);
/// assert!(parse_major("10.5", Currency::Krw).is_err());
/// ```
pub fn parse_major(input: &str, currency: Currency) -> ResultLedger<i64> {
    let invalid = || LedgerError::InvalidAmount(format!("invalid amount: {input}"));

    let trimmed = input.trim();
    let (negative, trimmed) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let digits = usize::from(currency.minor_units());
    let (major_part, minor_part) = match trimmed.split_once(['.', ',']) {
        Some((major, minor)) => (major, minor),
        None => (trimmed, ""),
    };
    if major_part.is_empty() || minor_part.len() > digits {
        return Err(invalid());
    }
    if !major_part.bytes().all(|b| b.is_ascii_digit())
        || !minor_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let scale = 10_i64.pow(digits as u32);
    let major: i64 = major_part.parse().map_err(|_| invalid())?;
    let mut minor: i64 = if minor_part.is_empty() {
        0
    } else {
        minor_part.parse().map_err(|_| invalid())?
    };
    minor *= 10_i64.pow((digits - minor_part.len()) as u32);

    let amount = major
        .checked_mul(scale)
        .and_then(|v| v.checked_add(minor))
        .ok_or_else(invalid)?;
    Ok(if negative { -amount } else { amount })
}
