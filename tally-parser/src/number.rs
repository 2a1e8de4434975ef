use rust_decimal::Decimal;

use tally_core::{LedgerError, LedgerResult};

/// Parses a decimal literal such as `-1,234.50` into its exact value and the number of
/// digits written after the decimal point.
///
/// Thousands separators are dropped and a single leading sign is honored. Anything
/// else that is not a digit is rejected.
pub fn parse_decimal(literal: &str) -> LedgerResult<(Decimal, u32)> {
    let invalid = || LedgerError::InvalidAmount(literal.to_string());

    let cleaned = literal.replace(',', "");
    let (negative, unsigned) = match cleaned.as_bytes().first() {
        Some(b'-') => (true, &cleaned[1..]),
        Some(b'+') => (false, &cleaned[1..]),
        _ => (false, cleaned.as_str()),
    };
    let (integral, fraction) = match unsigned.find('.') {
        Some(dot) => (&unsigned[..dot], &unsigned[dot + 1..]),
        None => (unsigned, ""),
    };
    if integral.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !integral.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let scale = u32::try_from(fraction.len()).map_err(|_| invalid())?;
    let digits: i128 = format!("{}{}", integral, fraction)
        .parse()
        .map_err(|_| invalid())?;
    let mut number = Decimal::try_from_i128_with_scale(digits, scale).map_err(|_| invalid())?;
    number.set_sign_negative(negative);
    Ok((number, scale))
}
