//! Locator construction for card-data requests
//!
//! Set-code searches join one `s:CODE` term per code with ` or ` and put the
//! percent-encoded expression in the `q` parameter of the search endpoint.
//! Encoding matches JavaScript's `encodeURIComponent`, so a space becomes
//! `%20` rather than `+`.

use crate::{QueryError, QueryResult};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Characters escaped in a URI component: all but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a single query value or path segment
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}

/// Checks that a set code is non-empty ASCII alphanumeric
pub fn validate_set_code(code: &str) -> QueryResult<()> {
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(QueryError::InvalidSetCode(code.to_string()));
    }
    Ok(())
}

/// Builds the unencoded search expression for a list of set codes
///
/// ```
/// use booster_crack::query::set_search_term;
///
/// let term = set_search_term(&["BLB", "SPG"]).unwrap();
/// assert_eq!(term, "s:BLB or s:SPG");
/// ```
pub fn set_search_term<S: AsRef<str>>(codes: &[S]) -> QueryResult<String> {
    if codes.is_empty() {
        return Err(QueryError::NoSetCodes);
    }

    let terms = codes
        .iter()
        .map(|code| {
            let code = code.as_ref();
            validate_set_code(code)?;
            Ok(format!("s:{}", code))
        })
        .collect::<QueryResult<Vec<_>>>()?;

    Ok(terms.join(" or "))
}

/// Locator of the search endpoint for every card in the given sets
pub fn search_locator<S: AsRef<str>>(base: &Url, codes: &[S]) -> QueryResult<String> {
    let term = set_search_term(codes)?;
    Ok(format!(
        "{}/cards/search?q={}",
        root(base),
        encode_component(&term)
    ))
}

/// Locator of a single card, addressed by set code and collector number
pub fn card_locator(base: &Url, set_code: &str, number: &str) -> QueryResult<String> {
    validate_set_code(set_code)?;
    if number.trim().is_empty() {
        return Err(QueryError::EmptyIdentifier);
    }

    Ok(format!(
        "{}/cards/{}/{}",
        root(base),
        set_code.to_ascii_lowercase(),
        encode_component(number.trim())
    ))
}

/// Locator of the rulings list for a card id
pub fn rulings_locator(base: &Url, card_id: &str) -> QueryResult<String> {
    if card_id.trim().is_empty() {
        return Err(QueryError::EmptyIdentifier);
    }

    Ok(format!(
        "{}/cards/{}/rulings",
        root(base),
        encode_component(card_id.trim())
    ))
}

/// Base URL without trailing slash
fn root(base: &Url) -> &str {
    base.as_str().trim_end_matches('/')
}
