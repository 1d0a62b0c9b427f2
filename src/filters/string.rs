//! Filters operating on string
use lazy_static::lazy_static;
use regex::Regex;

#[cfg(feature = "urlencode")]
use percent_encoding::{percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::utils;

/// Everything but `A-Za-z0-9_.-~/`, what Python's `quote` leaves alone
#[cfg(feature = "urlencode")]
const URI_ENCODE_SET: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'/').remove(b'-').remove(b'_').remove(b'.').remove(b'~');

lazy_static! {
    static ref STRIPTAGS_RE: Regex = Regex::new(r"(<!--.*?-->|<[^>]*>)").unwrap();
    static ref SPACELESS_RE: Regex = Regex::new(r">\s+<").unwrap();
}

/// Removes leading and trailing whitespace
pub fn trim(value: &str) -> String {
    value.trim().to_string()
}

/// Tries to remove HTML tags from input. Does not guarantee well formed output if input is not valid HTML
pub fn striptags(value: &str) -> String {
    STRIPTAGS_RE.replace_all(value, "").to_string()
}

/// Removes spaces between html tags
pub fn spaceless(value: &str) -> String {
    SPACELESS_RE.replace_all(value, "><").to_string()
}

/// Escapes a value for HTML, see [`escape_html`](crate::escape_html)
pub fn escape_html(value: &str) -> String {
    utils::escape_html(value)
}

/// Escapes XML special characters
pub fn escape_xml(value: &str) -> String {
    let mut output = String::with_capacity(value.len() * 2);
    for c in value.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&apos;"),
            _ => output.push(c),
        }
    }
    output
}

/// Percent-encodes reserved URI characters
#[cfg(feature = "urlencode")]
pub fn urlencode(value: &str) -> String {
    percent_encode(value.as_bytes(), URI_ENCODE_SET).to_string()
}

/// Percent-encodes all non-alphanumeric characters
#[cfg(feature = "urlencode")]
pub fn urlencode_strict(value: &str) -> String {
    percent_encode(value.as_bytes(), NON_ALPHANUMERIC).to_string()
}
