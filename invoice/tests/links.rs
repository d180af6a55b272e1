use rand::random_range;
use walletkit_address::{classify_address, live_fix_address_input, AddressFamily};
use walletkit_amount::{
    format_amount, parse_amount_text, FixedPointAmount, FormatOptions, Locale, Symbol,
};
use walletkit_invoice::*;

// Emulate having anyhow
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

const ADDRESS: &str = "UQBvW8Z5huBkMJYdnfAEM5JqTNkuWX3diqYENkWsIL0XggGG";

#[test]
fn transfer_link_roundtrip() {
    let link = encode_transfer_link(
        ADDRESS,
        &Symbol::ton(),
        &FixedPointAmount::from(1_500_000_000u64),
        "hi",
    );
    let invoice = parse_invoice(&link);
    assert_eq!(invoice.address(), ADDRESS);
    assert_eq!(invoice.amount(), &FixedPointAmount::from(1_500_000_000u64));
    assert_eq!(invoice.comment(), "hi");
    assert_eq!(invoice.token(), None);
}

#[test]
fn random_transfer_roundtrip() {
    let comments = ["", "hi", "for the pizza 🍕", "a&b=c", "50% off?", "line\nbreak"];
    for _ in 0..500 {
        let units = random_range(0..u64::MAX);
        let comment = comments[random_range(0..comments.len())];
        let link = encode_transfer_link(ADDRESS, &Symbol::ton(), &units.into(), comment);
        let invoice = parse_invoice(&link);
        assert_eq!(invoice.amount(), &FixedPointAmount::from(units), "{link}");
        assert_eq!(invoice.comment(), comment, "{link}");
        assert_eq!(invoice.address(), ADDRESS, "{link}");
    }
}

#[test]
fn typed_amount_to_link_and_back() -> Result<()> {
    let locale = Locale::for_tag("de_DE");
    let usdt = Symbol::token("USDT", 6);
    let amount = parse_amount_text("12,5", usdt.decimals, &locale)?;
    let link = encode_transfer_link(ADDRESS, &usdt, &amount, "Rechnung 42");
    assert_eq!(
        link,
        format!("ton://transfer/{ADDRESS}?token=USDT&amount=12500000&text=Rechnung%2042")
    );

    let invoice = parse_invoice(&link);
    assert_eq!(invoice.token(), Some("USDT"));
    let shown = format_amount(invoice.amount(), &usdt, FormatOptions::NONE, &locale);
    assert_eq!(shown.full_string, "12,5");
    assert_eq!(shown.to_string(), "12,5 USDT");
    Ok(())
}

#[test]
fn amounts_beyond_64_bits_are_dropped() {
    // the link format only carries unsigned 64 bit amounts
    let huge = FixedPointAmount::from(u128::from(u64::MAX) + 1);
    let link = encode_transfer_link(ADDRESS, &Symbol::ton(), &huge, "");
    assert!(link.ends_with("amount=18446744073709551616"));
    assert!(parse_invoice(&link).amount().is_zero());
}

#[test]
fn live_typed_address_in_link() {
    let typed = format!("0x{}zz", "c".repeat(45));
    let (fixed, cursor) = live_fix_address_input(&typed, typed.chars().count(), true);
    assert_eq!(cursor, 42);
    let link = encode_transfer_link(&fixed, &Symbol::token("jWBTC", 8), &1u64.into(), "");
    let invoice = parse_invoice(&link);
    let address = invoice.parsed_address();
    assert_eq!(address.family(), AddressFamily::Foreign);
    assert!(address.is_complete());
    assert_eq!(address, classify_address(&fixed));
}
