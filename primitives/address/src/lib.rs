//! # Wallet addresses
//!
//! Classifies and cleans the three textual address forms a wallet deals with:
//!
//! * native *packed* addresses: 48 characters of url-safe base64 (`EQ...`, `UQ...`)
//! * native *raw* addresses: `<workchain>:<64 hex characters>` (e.g. `-1:fff...`)
//! * *foreign* addresses of another chain: `0x` followed by 40 hex characters
//!
//! Cleaning never fails; it just drops everything that cannot be part of an address of the detected form.
//! Whether an address is complete enough to be submitted is a separate check, see [`ParsedAddress::is_complete`].

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length of a packed native address
pub const PACKED_ADDRESS_LENGTH: usize = 48;

/// Number of hex digits behind the colon of a raw native address
pub const RAW_ADDRESS_HEX_LENGTH: usize = 64;

/// Number of hex digits behind the prefix of a foreign address
pub const FOREIGN_ADDRESS_HEX_LENGTH: usize = 40;

/// Maximum length of the workchain id of a raw address (including the sign)
pub const MAX_WORKCHAIN_LENGTH: usize = 2;

/// Prefix of foreign addresses
pub const FOREIGN_PREFIX: &str = "0x";

/// Textual form of an address
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AddressFamily {
    NativePacked,
    NativeRaw,
    Foreign,
}

/// Detects the address form of some (possibly incomplete) text.
///
/// A colon anywhere but in first place means raw form, a leading `0x` means foreign form,
/// everything else is treated as packed form.
pub fn detect_family(text: &str) -> AddressFamily {
    match text.find(':') {
        Some(index) if index > 0 => AddressFamily::NativeRaw,
        _ if text.starts_with(FOREIGN_PREFIX) => AddressFamily::Foreign,
        _ => AddressFamily::NativePacked,
    }
}

fn packed_filter() -> impl FnMut(char) -> bool {
    let mut len = 0;
    move |c| {
        let valid = c.is_ascii_alphanumeric() || c == '_' || c == '-';
        if valid && len < PACKED_ADDRESS_LENGTH {
            len += 1;
            return true;
        }
        false
    }
}

fn raw_filter() -> impl FnMut(char) -> bool {
    let mut in_workchain = true;
    let mut workchain = 0;
    let mut hex = 0;
    move |c| {
        if in_workchain {
            match c {
                ':' => in_workchain = false,
                '-' if workchain == 0 => workchain += 1,
                '0'..='9' if workchain < MAX_WORKCHAIN_LENGTH => workchain += 1,
                _ => return false,
            }
            true
        } else if c.is_ascii_hexdigit() && hex < RAW_ADDRESS_HEX_LENGTH {
            hex += 1;
            true
        } else {
            false
        }
    }
}

fn foreign_filter() -> impl FnMut(char) -> bool {
    let mut prefix = FOREIGN_PREFIX.len();
    let mut hex = 0;
    move |c| {
        if prefix > 0 {
            prefix -= 1;
            return true;
        }
        if c.is_ascii_hexdigit() && hex < FOREIGN_ADDRESS_HEX_LENGTH {
            hex += 1;
            return true;
        }
        false
    }
}

/// Removes every char that `keep` rejects.
///
/// The cursor (a char index) moves left by the number of removed chars in front of it.
fn retain_chars(text: &str, cursor: usize, mut keep: impl FnMut(char) -> bool) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut position = cursor;
    let mut len = 0;
    for (index, c) in text.chars().enumerate() {
        if keep(c) {
            out.push(c);
            len += 1;
        } else if index < cursor {
            position -= 1;
        }
    }
    (out, position.min(len))
}

/// Cleans the content of an address input field after every keystroke.
///
/// Returns the fixed text and the fixed cursor position (in chars). If `accept_foreign` is `false`,
/// text in foreign form is cleared completely.
pub fn live_fix_address_input(text: &str, cursor: usize, accept_foreign: bool) -> (String, usize) {
    match detect_family(text) {
        AddressFamily::NativePacked => retain_chars(text, cursor, packed_filter()),
        AddressFamily::NativeRaw => retain_chars(text, cursor, raw_filter()),
        AddressFamily::Foreign if accept_foreign => retain_chars(text, cursor, foreign_filter()),
        AddressFamily::Foreign => {
            log::trace!("foreign addresses are not accepted, clearing input");
            (String::new(), 0)
        }
    }
}

/// An address in one of the known forms, cleaned from invalid characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ParsedAddress {
    /// Address of the native chain, either packed or raw
    Native { text: String, is_packed: bool },
    /// `0x`-prefixed address of another chain
    Foreign { text: String },
}

/// Classifies some address text and cleans it according to its form.
///
/// Surrounding whitespace is ignored. This never fails; partial input yields a partial address.
pub fn classify_address(text: &str) -> ParsedAddress {
    let text = text.trim();
    match detect_family(text) {
        AddressFamily::NativePacked => ParsedAddress::Native {
            text: retain_chars(text, 0, packed_filter()).0,
            is_packed: true,
        },
        AddressFamily::NativeRaw => ParsedAddress::Native {
            text: retain_chars(text, 0, raw_filter()).0,
            is_packed: false,
        },
        AddressFamily::Foreign => ParsedAddress::Foreign {
            text: retain_chars(text, 0, foreign_filter()).0,
        },
    }
}

impl ParsedAddress {
    pub fn family(&self) -> AddressFamily {
        match self {
            ParsedAddress::Native {
                is_packed: true, ..
            } => AddressFamily::NativePacked,
            ParsedAddress::Native { .. } => AddressFamily::NativeRaw,
            ParsedAddress::Foreign { .. } => AddressFamily::Foreign,
        }
    }

    /// Returns the cleaned address text
    pub fn text(&self) -> &str {
        match self {
            ParsedAddress::Native { text, .. } | ParsedAddress::Foreign { text } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ParsedAddress::Native { text, .. } | ParsedAddress::Foreign { text } => text,
        }
    }

    /// Returns the workchain id of a raw address
    pub fn workchain(&self) -> Option<i32> {
        match self {
            ParsedAddress::Native {
                text,
                is_packed: false,
            } => text.split_once(':')?.0.parse().ok(),
            _ => None,
        }
    }

    /// Checks if the address has exactly the length of its form and can be submitted.
    ///
    /// Checksums of packed addresses are not verified here.
    pub fn is_complete(&self) -> bool {
        match self {
            ParsedAddress::Native {
                text,
                is_packed: true,
            } => text.len() == PACKED_ADDRESS_LENGTH,
            ParsedAddress::Native {
                text,
                is_packed: false,
            } => match text.split_once(':') {
                Some((workchain, hex)) => {
                    workchain.parse::<i32>().is_ok() && hex.len() == RAW_ADDRESS_HEX_LENGTH
                }
                None => false,
            },
            ParsedAddress::Foreign { text } => {
                text.len() == FOREIGN_PREFIX.len() + FOREIGN_ADDRESS_HEX_LENGTH
            }
        }
    }
}

impl fmt::Display for ParsedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
