//! Exact fixed-point token amounts
//!
//! An amount is always an integer number of a token's *smallest units*. This crate turns such
//! amounts into display strings ([`format_amount`]), parses user typed text back into amounts
//! ([`parse_amount_text`]) and sanitizes amount input fields while the user types
//! ([`live_fix_amount_input`]). No floating point is involved anywhere.

use core::fmt;
use core::ops::{Add, Neg, Sub};
use core::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

#[cfg(feature = "serde")]
use serde::{
    de::{Error as DeError, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

mod format;
mod input;
mod locale;
mod parse;

pub use format::{format_amount, FormatOptions, FormattedAmount};
pub use input::{live_fix_amount_input, MAX_INTEGER_DIGITS};
pub use locale::Locale;
pub use parse::{parse_amount_text, ParseAmountError, MAX_SIGNIFICANT_DIGITS};

/// Returns `10^exp`
pub(crate) fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u8).pow(exp)
}

/// Display and parsing parameters of a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Symbol {
    /// Ticker that is shown next to an amount
    pub name: String,
    /// Number of fractional digits of the display unit
    pub decimals: u8,
    /// Whether this is the base currency of the native chain
    pub native: bool,
}

impl Symbol {
    /// Decimals of the native chain token (1 TON = 10^9 nanoton)
    pub const NATIVE_DECIMALS: u8 = 9;

    /// The native chain token
    pub fn ton() -> Self {
        Symbol {
            name: "TON".to_string(),
            decimals: Self::NATIVE_DECIMALS,
            native: true,
        }
    }

    /// Any other token tracked by the wallet
    pub fn token(name: impl Into<String>, decimals: u8) -> Self {
        Symbol {
            name: name.into(),
            decimals,
            native: false,
        }
    }

    pub fn is_native(&self) -> bool {
        self.native
    }

    /// Amount of smallest units in one display unit ( `10^decimals` )
    pub fn one(&self) -> FixedPointAmount {
        FixedPointAmount(pow10(self.decimals as u32))
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Signed token quantity, stored as an integer number of smallest units.
///
/// The scale (`10^decimals`) is not part of the value; it comes from the [`Symbol`] the amount belongs to.
/// `Display` and `FromStr` use the bare integer of smallest units, e.g. `1500000000` for 1.5 TON.
/// With the `serde` feature the amount is serialized as that integer in a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedPointAmount(BigInt);

impl FixedPointAmount {
    pub fn zero() -> Self {
        FixedPointAmount(BigInt::zero())
    }

    /// Creates an amount from an integer number of smallest units
    pub fn from_units(units: impl Into<BigInt>) -> Self {
        FixedPointAmount(units.into())
    }

    /// Returns a reference to the underlying integer
    pub fn as_units(&self) -> &BigInt {
        &self.0
    }

    pub fn into_units(self) -> BigInt {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn abs(&self) -> Self {
        FixedPointAmount(self.0.abs())
    }

    /// Returns the amount as `u64`, if it fits
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }
}

macro_rules! impl_from_int {
    ($($int:ty),*) => {
        $(
            impl From<$int> for FixedPointAmount {
                fn from(value: $int) -> Self {
                    FixedPointAmount(BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_int!(u32, i32, u64, i64, u128, i128);

impl From<BigInt> for FixedPointAmount {
    fn from(value: BigInt) -> Self {
        FixedPointAmount(value)
    }
}

impl From<FixedPointAmount> for BigInt {
    fn from(value: FixedPointAmount) -> Self {
        value.0
    }
}

impl Add for FixedPointAmount {
    type Output = FixedPointAmount;

    fn add(self, rhs: Self) -> Self::Output {
        FixedPointAmount(self.0 + rhs.0)
    }
}

impl Sub for FixedPointAmount {
    type Output = FixedPointAmount;

    fn sub(self, rhs: Self) -> Self::Output {
        FixedPointAmount(self.0 - rhs.0)
    }
}

impl Neg for FixedPointAmount {
    type Output = FixedPointAmount;

    fn neg(self) -> Self::Output {
        FixedPointAmount(-self.0)
    }
}

impl fmt::Display for FixedPointAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for FixedPointAmount {
    type Err = ParseAmountError;

    /// Parses a bare integer of smallest units (optional sign, no separators)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, magnitude) = parse::parse_integer(s)?;
        Ok(FixedPointAmount(if negative { -magnitude } else { magnitude }))
    }
}

#[cfg(feature = "serde")]
impl Serialize for FixedPointAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

#[cfg(feature = "serde")]
struct AmountVisitor;

#[cfg(feature = "serde")]
impl<'de> Visitor<'de> for AmountVisitor {
    type Value = FixedPointAmount;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "an integer number of smallest units as string")
    }

    fn visit_str<E>(self, v: &str) -> Result<FixedPointAmount, E>
    where
        E: DeError,
    {
        FixedPointAmount::from_str(v).map_err(DeError::custom)
    }

    fn visit_u64<E>(self, v: u64) -> Result<FixedPointAmount, E>
    where
        E: DeError,
    {
        Ok(v.into())
    }

    fn visit_i64<E>(self, v: i64) -> Result<FixedPointAmount, E>
    where
        E: DeError,
    {
        Ok(v.into())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for FixedPointAmount {
    fn deserialize<D>(deserializer: D) -> Result<FixedPointAmount, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(AmountVisitor)
    }
}
