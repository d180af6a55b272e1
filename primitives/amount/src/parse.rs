use num_bigint::BigInt;
use num_traits::Zero;
use thiserror::Error;

use crate::{pow10, FixedPointAmount, Locale};

/// Maximum number of significant decimal digits of a parsed amount (in smallest units)
pub const MAX_SIGNIFICANT_DIGITS: u32 = 38;

/// Reasons why [`parse_amount_text`] rejects a text.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ParseAmountError {
    #[error("text contains more than one kind of decimal separator")]
    AmbiguousSeparator,
    #[error("integer part is not a number")]
    InvalidInteger,
    #[error("amount exceeds 38 significant digits")]
    IntegerOverflow,
    #[error("too many fractional digits for this token")]
    TooManyFractionalDigits,
    #[error("fractional part is not a number")]
    InvalidFraction,
}

/// Parses an optionally signed integer of ascii digits.
///
/// Returns the sign separately, so that `-0` is still recognized as negative.
pub(crate) fn parse_integer(text: &str) -> Result<(bool, BigInt), ParseAmountError> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseAmountError::InvalidInteger);
    }
    let magnitude =
        BigInt::parse_bytes(digits.as_bytes(), 10).ok_or(ParseAmountError::InvalidInteger)?;
    Ok((negative, magnitude))
}

/// Parses the digits behind the decimal point into smallest units
fn parse_fraction(text: &str, decimals: u32) -> Result<BigInt, ParseAmountError> {
    if text.is_empty() {
        return Ok(BigInt::zero());
    }
    if text.chars().count() > decimals as usize {
        return Err(ParseAmountError::TooManyFractionalDigits);
    }
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseAmountError::InvalidFraction);
    }
    let padded = format!("{text:0<width$}", width = decimals as usize);
    BigInt::parse_bytes(padded.as_bytes(), 10).ok_or(ParseAmountError::InvalidFraction)
}

/// Parses user typed text into an exact amount of smallest units.
///
/// Accepts `.`, `,` and the locale's decimal point as separator, but only one kind of them per text.
/// Whitespace is ignored everywhere, so grouped output of [`Locale::simple`] parses back.
/// Empty text (or a lone separator) is zero.
///
/// The sign is taken from the integer side: `"-0.5"` is negative. A text that starts with the separator
/// (`",5"`) has no integer side and always yields the positive fractional amount.
pub fn parse_amount_text(
    text: &str,
    decimals: u8,
    locale: &Locale,
) -> Result<FixedPointAmount, ParseAmountError> {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let is_separator = |c: char| c == '.' || c == ',' || c == locale.decimal_point;

    let mut separator = None;
    for c in cleaned.chars().filter(|c| is_separator(*c)) {
        match separator {
            None => separator = Some(c),
            Some(used) if used != c => {
                log::debug!("rejecting amount '{text}': mixed decimal separators");
                return Err(ParseAmountError::AmbiguousSeparator);
            }
            Some(_) => (),
        }
    }

    let (integer_text, fraction_text) = separator
        .and_then(|sep| cleaned.split_once(sep))
        .unwrap_or((cleaned.as_str(), ""));
    if integer_text.is_empty() && fraction_text.is_empty() {
        return Ok(FixedPointAmount::zero());
    }

    let decimals = decimals as u32;
    if integer_text.is_empty() {
        return parse_fraction(fraction_text, decimals).map(FixedPointAmount::from);
    }

    let (negative, integer) = parse_integer(integer_text)?;
    let limit = pow10(MAX_SIGNIFICANT_DIGITS.saturating_sub(decimals));
    if integer >= limit {
        log::debug!("rejecting amount '{text}': too many digits");
        return Err(ParseAmountError::IntegerOverflow);
    }
    let fraction = parse_fraction(fraction_text, decimals)?;

    let units = integer * pow10(decimals) + fraction;
    Ok(FixedPointAmount::from(if negative { -units } else { units }))
}
