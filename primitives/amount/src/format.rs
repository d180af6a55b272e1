use core::fmt;
use core::ops::{BitOr, BitOrAssign};

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::{pow10, FixedPointAmount, Locale, Symbol};

/// Flags that control how [`format_amount`] renders an amount.
///
/// Flags compose with `|`; the default renders plain, unrounded amounts in the given locale.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct FormatOptions(u8);

impl FormatOptions {
    pub const NONE: FormatOptions = FormatOptions(0);
    /// Prefix positive amounts with the locale's plus sign
    pub const SIGNED: FormatOptions = FormatOptions(1);
    /// Cut fractional digits of large amounts for compact display
    pub const ROUNDED: FormatOptions = FormatOptions(1 << 1);
    /// Use [`Locale::simple`] instead of the given locale
    pub const SIMPLE: FormatOptions = FormatOptions(1 << 2);

    pub const fn contains(self, other: FormatOptions) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for FormatOptions {
    type Output = FormatOptions;

    fn bitor(self, rhs: Self) -> Self::Output {
        FormatOptions(self.0 | rhs.0)
    }
}

impl BitOrAssign for FormatOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Result of [`format_amount`].
///
/// `full_string` is always `integer_part + separator + fractional_part`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedAmount {
    /// Grouped integer digits including the sign glyph
    pub integer_part: String,
    /// Decimal point, or empty if there are no fractional digits to show
    pub separator: String,
    /// Fractional digits without trailing zeros
    pub fractional_part: String,
    pub full_string: String,
    pub symbol: Symbol,
}

impl fmt::Display for FormattedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.full_string, self.symbol)
    }
}

/// Integer magnitudes from which on rounded output keeps only a few fractional digits
const ROUNDING_STEPS: [(u64, u32); 2] = [(1_000_000, 3), (1_000, 6)];

/// Maximum number of fractional digits that rounded output keeps for the given integer magnitude
fn rounded_digits(integer: &BigInt) -> Option<u32> {
    ROUNDING_STEPS
        .iter()
        .find(|(threshold, _)| *integer >= BigInt::from(*threshold))
        .map(|(_, digits)| *digits)
}

/// Inserts the separator between groups of three digits, counted from the right
fn group_digits(digits: &str, separator: &str) -> String {
    if separator.is_empty() || digits.len() <= 3 {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

/// Formats an amount of smallest units for display.
///
/// The amount is split into integer and fractional digits according to `symbol.decimals`.
/// Trailing zeros of the fraction are never shown, and a zero amount is always rendered as `"0"`.
///
/// With [`FormatOptions::ROUNDED`] amounts of at least 1,000 display units keep at most 6 fractional
/// digits, and amounts of at least 1,000,000 keep at most 3. Dropped digits are cut (rounding toward zero).
/// Negative amounts always carry the locale's minus sign, [`FormatOptions::SIGNED`] adds the plus sign
/// to positive ones.
pub fn format_amount(
    amount: &FixedPointAmount,
    symbol: &Symbol,
    options: FormatOptions,
    locale: &Locale,
) -> FormattedAmount {
    let simple;
    let locale = if options.contains(FormatOptions::SIMPLE) {
        simple = Locale::simple();
        &simple
    } else {
        locale
    };

    let decimals = symbol.decimals as u32;
    let scale = pow10(decimals);
    let units = amount.as_units();
    // Truncating division keeps the sign on the integer side only
    let integer = (units / &scale).abs();
    let fractional = (units % &scale).abs();

    let max_digits = if options.contains(FormatOptions::ROUNDED) {
        rounded_digits(&integer)
    } else {
        None
    };
    let shown = match max_digits {
        Some(max) if max < decimals => {
            let granularity = pow10(decimals - max);
            &fractional / &granularity * &granularity
        }
        _ => fractional.clone(),
    };
    let precise = shown == fractional;

    let mut fractional_part = String::new();
    if !shown.is_zero() {
        let padded = format!("{:0>width$}", shown.to_string(), width = decimals as usize);
        fractional_part.push_str(padded.trim_end_matches('0'));
        if !precise {
            if let Some(max) = max_digits {
                fractional_part.truncate(max as usize);
            }
        }
    }

    let sign = if amount.is_negative() {
        locale.negative_sign.as_str()
    } else if amount.is_positive() && options.contains(FormatOptions::SIGNED) {
        locale.positive_sign.as_str()
    } else {
        ""
    };
    let integer_part = format!(
        "{sign}{}",
        group_digits(&integer.to_string(), &locale.group_separator)
    );
    let separator = if fractional_part.is_empty() {
        String::new()
    } else {
        locale.decimal_point.to_string()
    };
    let full_string = format!("{integer_part}{separator}{fractional_part}");

    FormattedAmount {
        integer_part,
        separator,
        fractional_part,
        full_string,
        symbol: symbol.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ton(units: i64, options: FormatOptions) -> FormattedAmount {
        format_amount(&units.into(), &Symbol::ton(), options, &Locale::simple())
    }

    #[test]
    fn zero_is_plain() {
        for decimals in [0, 2, 9, 18] {
            let symbol = Symbol::token("T", decimals);
            let all = FormatOptions::SIGNED | FormatOptions::ROUNDED;
            let f = format_amount(&FixedPointAmount::zero(), &symbol, all, &Locale::simple());
            assert_eq!(f.full_string, "0");
            assert_eq!(f.integer_part, "0");
            assert!(f.separator.is_empty());
            assert!(f.fractional_part.is_empty());
        }
    }

    #[test]
    fn trims_trailing_zeros() {
        let f = ton(1_500_000_000, FormatOptions::NONE);
        assert_eq!(f.integer_part, "1");
        assert_eq!(f.separator, ".");
        assert_eq!(f.fractional_part, "5");
        assert_eq!(f.full_string, "1.5");
        assert_eq!(ton(2_000_000_000, FormatOptions::NONE).full_string, "2");
        assert_eq!(ton(1, FormatOptions::NONE).full_string, "0.000000001");

        let symbol = Symbol::token("T", 4);
        let f = format_amount(&5000u64.into(), &symbol, FormatOptions::NONE, &Locale::simple());
        assert_eq!(f.full_string, "0.5");
    }

    #[test]
    fn groups_integer_digits() {
        assert_eq!(ton(1_234_567_000_000_000, FormatOptions::NONE).full_string, "1 234 567");
        assert_eq!(ton(123_000_000_000, FormatOptions::NONE).full_string, "123");
        assert_eq!(ton(1_000_100_000_000, FormatOptions::NONE).full_string, "1 000.1");

        let de = Locale::for_tag("de_DE");
        let f = format_amount(&1_234_567_890_000_000u64.into(), &Symbol::ton(), FormatOptions::NONE, &de);
        assert_eq!(f.full_string, "1.234.567,89");
        assert_eq!(f.separator, ",");
    }

    #[test]
    fn simple_overrides_locale() {
        let de = Locale::for_tag("de_DE");
        let f = format_amount(
            &1_234_500_000_000u64.into(),
            &Symbol::ton(),
            FormatOptions::SIMPLE,
            &de,
        );
        assert_eq!(f.full_string, "1 234.5");
    }

    #[test]
    fn signs() {
        assert_eq!(ton(1_500_000_000, FormatOptions::SIGNED).full_string, "+1.5");
        assert_eq!(ton(1_500_000_000, FormatOptions::NONE).full_string, "1.5");
        assert_eq!(ton(-1_500_000_000, FormatOptions::SIGNED).full_string, "-1.5");
        assert_eq!(ton(-1_500_000_000, FormatOptions::NONE).full_string, "-1.5");
        assert_eq!(ton(-500_000_000, FormatOptions::NONE).integer_part, "-0");
        assert_eq!(ton(-500_000_000, FormatOptions::NONE).full_string, "-0.5");

        let mut locale = Locale::simple();
        locale.positive_sign = String::new();
        let f = format_amount(&7u64.into(), &Symbol::token("T", 0), FormatOptions::SIGNED, &locale);
        assert_eq!(f.full_string, "7");
    }

    #[test]
    fn sign_property() {
        let locale = Locale::simple();
        for units in [1i64, 999, 1_000_000_000, 123_456_789_012_345] {
            let positive = format_amount(&units.into(), &Symbol::ton(), FormatOptions::SIGNED, &locale);
            let negative = format_amount(&(-units).into(), &Symbol::ton(), FormatOptions::SIGNED, &locale);
            assert!(positive.integer_part.starts_with(&locale.positive_sign));
            assert!(negative.integer_part.starts_with(&locale.negative_sign));
            assert_eq!(positive.fractional_part, negative.fractional_part);
        }
    }

    #[test]
    fn rounding_by_magnitude() {
        let r = FormatOptions::ROUNDED;
        // below 1,000 nothing is cut
        assert_eq!(ton(999_123_456_789, r).full_string, "999.123456789");
        // thousands keep 6 digits
        assert_eq!(ton(1_000_123_456_789, r).full_string, "1 000.123456");
        assert_eq!(ton(-1_000_123_456_789, r).full_string, "-1 000.123456");
        // millions keep 3 digits
        assert_eq!(ton(1_000_000_123_456_789, r).full_string, "1 000 000.123");
        // digits that would be cut to zero are not shown at all
        assert_eq!(ton(1_000_000_000_456_789, r).full_string, "1 000 000");
        // precise values are only trimmed
        assert_eq!(ton(1_000_000_100_000_000, r).full_string, "1 000 000.1");
        // without rounding everything is kept
        assert_eq!(
            ton(1_000_000_123_456_789, FormatOptions::NONE).full_string,
            "1 000 000.123456789"
        );
    }

    #[test]
    fn rounding_keeps_short_fractions() {
        let symbol = Symbol::token("T", 2);
        let f = format_amount(&123_456_78u64.into(), &symbol, FormatOptions::ROUNDED, &Locale::simple());
        assert_eq!(f.full_string, "123 456.78");
    }

    #[test]
    fn rounding_digit_counts() {
        let symbol = Symbol::token("T", 18);
        let one = symbol.one().into_units();
        let fraction = BigInt::from(123_456_789_012_345_678u64);
        for (integer, max) in [(5u64, 18usize), (5_000, 6), (5_000_000, 3), (5_000_000_000, 3)] {
            let units = BigInt::from(integer) * &one + &fraction;
            let f = format_amount(&units.into(), &symbol, FormatOptions::ROUNDED, &Locale::simple());
            assert!(f.fractional_part.len() <= max, "{}", f.full_string);
        }
    }

    #[test]
    fn formatted_display() {
        let f = ton(1_500_000_000, FormatOptions::NONE);
        assert_eq!(f.to_string(), "1.5 TON");
    }

    #[test]
    fn options_compose() {
        let mut options = FormatOptions::SIGNED | FormatOptions::ROUNDED;
        assert!(options.contains(FormatOptions::SIGNED));
        assert!(options.contains(FormatOptions::ROUNDED));
        assert!(!options.contains(FormatOptions::SIMPLE));
        options |= FormatOptions::SIMPLE;
        assert!(options.contains(FormatOptions::SIMPLE));
        assert_eq!(FormatOptions::default(), FormatOptions::NONE);
    }
}
