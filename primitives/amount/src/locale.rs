use std::env;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number glyphs of a locale, as used for formatting and parsing amounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Locale {
    /// Separates the integer from the fractional digits
    pub decimal_point: char,
    /// Inserted between groups of three integer digits (may be empty to disable grouping)
    pub group_separator: String,
    /// Prefix of positive amounts when signed output is requested
    pub positive_sign: String,
    /// Prefix of negative amounts
    pub negative_sign: String,
}

impl Locale {
    /// Fixed "C"-style locale that does not depend on the environment.
    ///
    /// Uses `.` as decimal point and groups digits with a plain space, so its output is always accepted by
    /// [`parse_amount_text`](crate::parse_amount_text).
    pub fn simple() -> Self {
        Self::with_glyphs('.', " ")
    }

    fn with_glyphs(decimal_point: char, group_separator: &str) -> Self {
        Locale {
            decimal_point,
            group_separator: group_separator.to_string(),
            positive_sign: "+".to_string(),
            negative_sign: "-".to_string(),
        }
    }

    /// Looks up the glyphs for a locale tag like `de_DE.UTF-8`, `en-US` or `C`.
    ///
    /// Unknown languages fall back to [`Locale::simple`].
    pub fn for_tag(tag: &str) -> Self {
        // Strip encoding ("en_US.UTF-8") and modifier ("de_DE@euro")
        let tag = tag.split(['.', '@']).next().unwrap_or_default();
        let mut parts = tag.split(['_', '-']);
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let region = parts.next().unwrap_or_default().to_ascii_uppercase();

        match (language.as_str(), region.as_str()) {
            ("" | "c" | "posix", _) => Self::simple(),
            ("de" | "it" | "fr", "CH") => Self::with_glyphs('.', "\u{2019}"),
            ("en" | "ja" | "zh" | "ko" | "he" | "th" | "hi", _) => Self::with_glyphs('.', ","),
            ("es", "MX") => Self::with_glyphs('.', ","),
            ("de" | "it" | "es" | "pt" | "nl" | "id" | "tr" | "da", _) => {
                Self::with_glyphs(',', ".")
            }
            ("fr", _) => Self::with_glyphs(',', "\u{202f}"),
            ("ru" | "uk" | "be" | "kk" | "pl" | "cs" | "sk" | "sv" | "fi" | "nb" | "no", _) => {
                Self::with_glyphs(',', "\u{a0}")
            }
            _ => {
                log::debug!("no number glyphs for locale '{tag}', using the simple locale");
                Self::simple()
            }
        }
    }

    /// Detects the locale from `LC_ALL`, `LC_NUMERIC` or `LANG` (in that order).
    pub fn from_env() -> Self {
        let tag = ["LC_ALL", "LC_NUMERIC", "LANG"]
            .into_iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.is_empty());
        match tag {
            Some(tag) => {
                log::debug!("using number glyphs of locale '{tag}'");
                Self::for_tag(&tag)
            }
            None => Self::simple(),
        }
    }
}

impl Default for Locale {
    /// Initializes with [`Locale::simple`]
    fn default() -> Self {
        Self::simple()
    }
}
