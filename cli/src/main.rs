use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use serde_json::json;

use walletkit_address::{classify_address, live_fix_address_input};
use walletkit_amount::{
    format_amount, parse_amount_text, FixedPointAmount, FormatOptions, Locale, Symbol,
};
use walletkit_invoice::{encode_transfer_link, parse_invoice};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Locale used for separators and signs, e.g. `de_DE.UTF-8` (defaults to LC_ALL, LC_NUMERIC or LANG)
    #[arg(short, long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Formats an amount that is given in smallest units
    Format {
        /// Amount in smallest units, e.g. 1500000000 for 1.5 TON
        #[arg(allow_hyphen_values = true)]
        units: String,

        #[command(flatten)]
        token: TokenArgs,

        /// Prefix positive amounts with a plus sign
        #[arg(long)]
        signed: bool,

        /// Cut fractional digits of large amounts
        #[arg(long)]
        rounded: bool,

        /// Ignore the locale and use '.' as decimal point
        #[arg(long)]
        simple: bool,
    },
    /// Parses a typed amount into smallest units
    Parse {
        #[arg(allow_hyphen_values = true)]
        text: String,

        #[command(flatten)]
        token: TokenArgs,
    },
    /// Cleans and classifies an address
    Address {
        text: String,

        /// Accept addresses of foreign chains (0x...)
        #[arg(long)]
        foreign: bool,
    },
    /// Parses a transfer or stake link and prints it as json
    Invoice { link: String },
    /// Builds a shareable transfer link
    Link {
        address: String,

        /// Amount as a user would type it, e.g. 1.5
        #[arg(short, long)]
        amount: Option<String>,

        /// Comment that is attached to the transfer
        #[arg(short, long, default_value = "")]
        comment: String,

        #[command(flatten)]
        token: TokenArgs,
    },
}

#[derive(Args, Debug)]
struct TokenArgs {
    /// Name of a non-native token (the native token is used if omitted)
    #[arg(short, long)]
    token: Option<String>,

    /// Decimals of the token
    #[arg(short, long)]
    decimals: Option<u8>,
}

impl TokenArgs {
    fn symbol(&self) -> Symbol {
        let mut symbol = match &self.token {
            Some(name) => Symbol::token(name.clone(), Symbol::NATIVE_DECIMALS),
            None => Symbol::ton(),
        };
        if let Some(decimals) = self.decimals {
            symbol.decimals = decimals;
        }
        symbol
    }
}

fn main() -> Result<()> {
    colog::init();
    let args = Cli::parse();
    let locale = match &args.locale {
        Some(tag) => Locale::for_tag(tag),
        None => Locale::from_env(),
    };
    debug!("Number glyphs: {locale:?}");

    match args.command {
        Command::Format {
            units,
            token,
            signed,
            rounded,
            simple,
        } => {
            let amount: FixedPointAmount = units
                .parse()
                .with_context(|| format!("'{units}' is not an integer amount of smallest units"))?;
            let mut options = FormatOptions::NONE;
            if signed {
                options |= FormatOptions::SIGNED;
            }
            if rounded {
                options |= FormatOptions::ROUNDED;
            }
            if simple {
                options |= FormatOptions::SIMPLE;
            }
            let formatted = format_amount(&amount, &token.symbol(), options, &locale);
            println!("{formatted}");
        }
        Command::Parse { text, token } => {
            let symbol = token.symbol();
            let amount = parse_amount_text(&text, symbol.decimals, &locale)
                .with_context(|| format!("Cannot read '{text}' as {symbol} amount"))?;
            println!("{amount}");
        }
        Command::Address { text, foreign } => {
            let (fixed, _) = live_fix_address_input(&text, text.chars().count(), foreign);
            if fixed != text {
                info!("Cleaned address input: '{text}' -> '{fixed}'");
            }
            let address = classify_address(&fixed);
            let out = json!({
                "address": address,
                "family": address.family(),
                "complete": address.is_complete(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Invoice { link } => {
            let invoice = parse_invoice(&link);
            println!("{}", serde_json::to_string_pretty(&invoice)?);
        }
        Command::Link {
            address,
            amount,
            comment,
            token,
        } => {
            let symbol = token.symbol();
            let address = classify_address(&address);
            if !address.is_complete() {
                bail!("'{address}' is not a complete address");
            }
            let amount = match amount {
                Some(text) => parse_amount_text(&text, symbol.decimals, &locale)
                    .with_context(|| format!("Cannot read '{text}' as {symbol} amount"))?,
                None => FixedPointAmount::zero(),
            };
            println!(
                "{}",
                encode_transfer_link(address.text(), &symbol, &amount, &comment)
            );
        }
    }

    Ok(())
}
