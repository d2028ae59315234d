//! Card data masking for diagnostic logs
//!
//! Every payload the client logs goes through [`mask_sensitive_card_data`]
//! first. When a text cannot be confirmed as masked it is replaced wholesale
//! by [`UNMASKABLE_SENTINEL`], so raw card data never reaches a log.

use std::sync::LazyLock;

use regex::Regex;

/// Returned when no card number, masked or not, can be located
pub const UNMASKABLE_SENTINEL: &str = "Find a credit card number but can't mask it!";

/// Replacement for expiry dates and security codes, quotes included
const MASKED_TOKEN: &str = "\"*\"";

const MASK_CHAR: char = '*';
const VISIBLE_PREFIX: usize = 6;
const VISIBLE_SUFFIX: usize = 4;

// Visa, MasterCard, Discover, Amex, Diners/Carte Blanche, JCB and enRoute.
// Alternatives are tried in order, so the leftmost match wins.
static CARD_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?:4[0-9]{12}(?:[0-9]{3})?",
        r"|5[1-5][0-9]{14}",
        r"|5[1-5][0-9]{12}",
        r"|6(?:011|5[0-9][0-9])[0-9]{12}",
        r"|3[47][0-9]{13}",
        r"|3(?:0[0-5]|[68][0-9])[0-9]{11}",
        r"|(?:2131|1800|35[0-9]{3})[0-9]{11})",
    ))
    .expect("must be valid regex")
});

static SECURITY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(?:[0-9]{3}|[0-9]{4})""#).expect("must be valid regex"));

static EXPIRATION_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[0-9]{1,2}/[0-9]{4}""#).expect("must be valid regex"));

static MASKED_CARD_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{6}\*+[0-9]{4}").expect("must be valid regex"));

/// Mask card number, expiry date and security code in `text`
///
/// The first card number keeps its first six and last four digits with
/// every digit in between replaced by `*`. Every quoted `"MM/YYYY"` date and
/// quoted 3–4 digit code becomes `"*"`. Text that already carries a masked
/// number only gets its dates and codes masked. Anything else yields
/// [`UNMASKABLE_SENTINEL`].
pub fn mask_sensitive_card_data(text: &str) -> String {
    if let Some(found) = CARD_NUMBER.find(text) {
        let number = found.as_str();
        let masked = text.replacen(number, &mask_card_number(number), 1);
        return mask_date_and_code(masked);
    }

    if MASKED_CARD_NUMBER.is_match(text) {
        return mask_date_and_code(text.to_owned());
    }

    UNMASKABLE_SENTINEL.to_owned()
}

/// Keep the first six and last four characters of a matched number
fn mask_card_number(number: &str) -> String {
    let hidden = number.len() - VISIBLE_PREFIX - VISIBLE_SUFFIX;

    let mut masked = String::with_capacity(number.len());
    masked.push_str(&number[..VISIBLE_PREFIX]);
    masked.extend(std::iter::repeat_n(MASK_CHAR, hidden));
    masked.push_str(&number[number.len() - VISIBLE_SUFFIX..]);
    masked
}

fn mask_date_and_code(text: String) -> String {
    let text = replace_all_if_present(&EXPIRATION_DATE, text);
    replace_all_if_present(&SECURITY_CODE, text)
}

fn replace_all_if_present(pattern: &Regex, text: String) -> String {
    if pattern.is_match(&text) {
        pattern.replace_all(&text, MASKED_TOKEN).into_owned()
    } else {
        text
    }
}
