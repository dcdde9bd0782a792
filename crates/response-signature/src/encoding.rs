//! Header transport encoding for signatures.
//!
//! The header value is `percent(base64_wrapped(signature))`: standard base64
//! broken into 60-character lines, each terminated by `\n`, then escaped so
//! it is a safe header value and a safe URL query component.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

const LINE_WIDTH: usize = 60;

/// Everything except `A-Z a-z 0-9 - . _ ~` is escaped.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Base64 with a line break after every 60 output characters and after the
/// final group. Empty input encodes to an empty string.
pub fn base64_wrapped(data: &[u8]) -> String {
    let encoded = STANDARD.encode(data);
    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / LINE_WIDTH + 1);
    for line in encoded.as_bytes().chunks(LINE_WIDTH) {
        // base64 output is ASCII, so chunk boundaries are char boundaries
        wrapped.extend(line.iter().map(|&b| b as char));
        wrapped.push('\n');
    }
    wrapped
}

pub fn percent_encode(text: &str) -> String {
    utf8_percent_encode(text, QUERY_COMPONENT).to_string()
}

/// Encodes raw signature bytes into the `Response-Signature` header value.
pub fn encode_signature(signature: &[u8]) -> String {
    percent_encode(&base64_wrapped(signature))
}
