use crate::Locale;

/// Maximum number of integer digits accepted while typing an amount
pub const MAX_INTEGER_DIGITS: usize = 9;

/// Cleans the content of an amount input field after every keystroke.
///
/// `previous` is the field content before the edit, `text` the content after it and `cursor` the cursor position
/// (in chars) inside `text`. Returns the fixed text and the fixed cursor position.
///
/// * A leading `.` or `,` gets a `0` in front of it.
/// * The first `.`, `,` or locale decimal point becomes the locale decimal point; any later one is removed.
/// * Digits are limited to [`MAX_INTEGER_DIGITS`] before and `decimals` after the separator;
///   everything else is removed.
/// * A lone `0` is completed to `0<sep>`, unless the field already started with `0`, in which case it is
///   cleared (the user is deleting the separator again).
pub fn live_fix_amount_input(
    previous: &str,
    text: &str,
    cursor: usize,
    decimals: u8,
    locale: &Locale,
) -> (String, usize) {
    let separator = locale.decimal_point;
    let is_separator = |c: char| c == '.' || c == ',' || c == separator;
    let accepts_fraction = decimals > 0;

    let mut chars: Vec<char> = text.chars().collect();
    let mut cursor = cursor.min(chars.len());
    match chars.first().copied() {
        None => return (String::new(), 0),
        Some(c) if accepts_fraction && is_separator(c) => {
            chars.insert(0, '0');
            cursor += 1;
        }
        _ => (),
    }

    let mut fixed = String::with_capacity(text.len() + 1);
    let mut position = cursor;
    let mut separator_found = false;
    let mut digits = 0;
    for (index, &c) in chars.iter().enumerate() {
        let limit = if separator_found {
            decimals as usize
        } else {
            MAX_INTEGER_DIGITS
        };
        if c.is_ascii_digit() && digits < limit {
            fixed.push(c);
            digits += 1;
        } else if accepts_fraction && !separator_found && is_separator(c) {
            fixed.push(separator);
            separator_found = true;
            digits = 0;
        } else if index < cursor {
            position -= 1;
        }
    }

    if fixed == "0" && position > 0 {
        if previous.starts_with('0') {
            return (String::new(), 0);
        }
        if accepts_fraction {
            fixed.push(separator);
            position += 1;
        }
    }
    (fixed, position)
}
