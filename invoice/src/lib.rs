//! # Transfer links
//!
//! Parses and builds the small link format that is used to share payment requests
//! (as text, deep-link or QR code):
//!
//! ```text
//! [ton://][transfer/|stake/]<address>[?token=<name>&amount=<units>&text=<comment>]
//! ```
//!
//! Links are always emitted with the address as path. When parsing, the address may also be given
//! as `address=` parameter, which is used if the path is empty.

use core::fmt;

use walletkit_address::{classify_address, ParsedAddress};
use walletkit_amount::{FixedPointAmount, Symbol};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod query;

use query::Query;

/// Scheme of emitted links
pub const LINK_SCHEME: &str = "ton://";

/// Path prefix of transfer requests
pub const TRANSFER_PATH: &str = "transfer/";

/// Path prefix of stake requests
pub const STAKE_PATH: &str = "stake/";

/// Request to send an amount (with an optional comment) to an address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransferInvoice {
    pub address: String,
    pub amount: FixedPointAmount,
    pub comment: String,
    /// Name of the requested token, if it is not the native one
    pub token: Option<String>,
}

/// Request to stake an amount with a pool address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StakeInvoice {
    pub address: String,
    pub amount: FixedPointAmount,
}

/// A parsed request link
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Invoice {
    Transfer(TransferInvoice),
    Stake(StakeInvoice),
}

impl Invoice {
    /// Returns the cleaned address text
    pub fn address(&self) -> &str {
        match self {
            Invoice::Transfer(t) => &t.address,
            Invoice::Stake(s) => &s.address,
        }
    }

    pub fn amount(&self) -> &FixedPointAmount {
        match self {
            Invoice::Transfer(t) => &t.amount,
            Invoice::Stake(s) => &s.amount,
        }
    }

    /// Comment of a transfer request (always empty for stake requests)
    pub fn comment(&self) -> &str {
        match self {
            Invoice::Transfer(t) => &t.comment,
            Invoice::Stake(_) => "",
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Invoice::Transfer(t) => t.token.as_deref(),
            Invoice::Stake(_) => None,
        }
    }

    pub fn is_stake(&self) -> bool {
        matches!(self, Invoice::Stake(_))
    }

    /// Classifies the address of the request
    pub fn parsed_address(&self) -> ParsedAddress {
        classify_address(self.address())
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_invoice(self))
    }
}

/// Strips an ascii prefix, ignoring its case
fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}

/// Parses a pasted or deep-linked request.
///
/// This never fails: unknown parameters are ignored, a malformed amount becomes zero and the address is
/// cleaned the same way as [`classify_address`] does. Without a `stake/` prefix the link is a transfer request.
pub fn parse_invoice(raw: &str) -> Invoice {
    let link = raw.trim();
    let link = strip_prefix_ignore_case(link, LINK_SCHEME).unwrap_or(link);
    let (is_stake, rest) = if let Some(rest) = strip_prefix_ignore_case(link, STAKE_PATH) {
        (true, rest)
    } else if let Some(rest) = strip_prefix_ignore_case(link, TRANSFER_PATH) {
        (false, rest)
    } else {
        (false, link)
    };

    let (path, query_str) = rest.split_once('?').unwrap_or((rest, ""));
    let query = Query::parse(query_str);
    let address = if path.is_empty() {
        query.address.as_deref().unwrap_or_default()
    } else {
        path
    };
    let address = classify_address(address).into_text();
    let amount = FixedPointAmount::from(query.amount);

    if is_stake {
        Invoice::Stake(StakeInvoice { address, amount })
    } else {
        Invoice::Transfer(TransferInvoice {
            address,
            amount,
            comment: query.text,
            token: query.token,
        })
    }
}

fn build_link(
    path: &str,
    address: &str,
    token: Option<&str>,
    amount: &FixedPointAmount,
    comment: &str,
) -> String {
    let mut params = Vec::new();
    if let Some(token) = token {
        params.push(format!("token={}", urlencoding::encode(token)));
    }
    if amount.is_positive() {
        params.push(format!("amount={amount}"));
    }
    if !comment.is_empty() {
        params.push(format!("text={}", urlencoding::encode(comment)));
    }

    let mut link = format!("{LINK_SCHEME}{path}{address}");
    if !params.is_empty() {
        link.push('?');
        link.push_str(&params.join("&"));
    }
    link
}

/// Builds a shareable transfer link.
///
/// `token` is only added for non-native symbols, `amount` only if it is positive (as bare integer of
/// smallest units) and `text` only for a non-empty comment.
pub fn encode_transfer_link(
    address: &str,
    symbol: &Symbol,
    amount: &FixedPointAmount,
    comment: &str,
) -> String {
    let token = (!symbol.is_native()).then_some(symbol.name.as_str());
    build_link(TRANSFER_PATH, address, token, amount, comment)
}

/// Builds the canonical link of a request
pub fn encode_invoice(invoice: &Invoice) -> String {
    match invoice {
        Invoice::Transfer(t) => build_link(
            TRANSFER_PATH,
            &t.address,
            t.token.as_deref(),
            &t.amount,
            &t.comment,
        ),
        Invoice::Stake(s) => build_link(STAKE_PATH, &s.address, None, &s.amount, ""),
    }
}
