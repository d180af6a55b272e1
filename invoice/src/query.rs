/// Recognized parameters of a link query.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Query {
    /// Address given as `address=` parameter instead of the link path
    pub address: Option<String>,
    /// Amount in smallest units; zero if missing or malformed
    pub amount: u64,
    /// Percent-decoded comment
    pub text: String,
    /// Name of a non-native token
    pub token: Option<String>,
}

impl Query {
    /// Parses the part behind the `?` of a link.
    ///
    /// Keys are case-insensitive, pairs with an empty key or value are ignored and later pairs win.
    pub fn parse(query_str: &str) -> Query {
        let mut query = Query::default();
        // Split items at '&'
        for item in query_str.split('&') {
            let mut iter = item.splitn(2, '=');
            let key = iter.next().unwrap_or_default().to_ascii_lowercase();
            let value = iter.next().unwrap_or_default();
            if key.is_empty() || value.is_empty() {
                continue;
            }
            match key.as_str() {
                "amount" => query.amount = parse_units(value),
                "text" => query.text = decode(value),
                "token" => query.token = Some(decode(value)),
                "address" => query.address = Some(decode(value)),
                _ => log::trace!("ignoring unknown link parameter '{key}'"),
            }
        }
        query
    }
}

/// Parses a bare integer of smallest units, falling back to zero
fn parse_units(value: &str) -> u64 {
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        log::debug!("invalid amount '{value}' in link, using 0");
        return 0;
    }
    value.parse().unwrap_or_else(|_| {
        log::debug!("amount '{value}' in link does not fit into 64 bits, using 0");
        0
    })
}

/// Percent-decodes a value; invalid utf-8 is replaced
fn decode(value: &str) -> String {
    let bytes = urlencoding::decode_binary(value.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}
