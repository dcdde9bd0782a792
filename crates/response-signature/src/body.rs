//! Body values the middleware knows how to read for signing.
//!
//! A body is either a self-contained payload, a sequence of chunks, or a
//! wrapper exposing an inner payload. Reading never consumes the body; the
//! value handed downstream is the one the handler produced.

use std::borrow::Cow;
use std::sync::Arc;

use bytes::Bytes;

/// A response body whose content can be materialized for signing.
pub trait SignableBody {
    /// Returns the full body content as one contiguous buffer. Chunked bodies
    /// are concatenated in order.
    fn signable_bytes(&self) -> Cow<'_, [u8]>;
}

impl SignableBody for Bytes {
    fn signable_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl SignableBody for Vec<u8> {
    fn signable_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl SignableBody for String {
    fn signable_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl SignableBody for &'static str {
    fn signable_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl SignableBody for &'static [u8] {
    fn signable_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl SignableBody for Vec<Bytes> {
    fn signable_bytes(&self) -> Cow<'_, [u8]> {
        concat_chunks(self.iter().map(|chunk| chunk.as_ref()))
    }
}

impl SignableBody for Vec<Vec<u8>> {
    fn signable_bytes(&self) -> Cow<'_, [u8]> {
        concat_chunks(self.iter().map(Vec::as_slice))
    }
}

impl SignableBody for Vec<String> {
    fn signable_bytes(&self) -> Cow<'_, [u8]> {
        concat_chunks(self.iter().map(String::as_bytes))
    }
}

impl<B: SignableBody + ?Sized> SignableBody for Box<B> {
    fn signable_bytes(&self) -> Cow<'_, [u8]> {
        (**self).signable_bytes()
    }
}

impl<B: SignableBody + ?Sized> SignableBody for Arc<B> {
    fn signable_bytes(&self) -> Cow<'_, [u8]> {
        (**self).signable_bytes()
    }
}

fn concat_chunks<'a>(chunks: impl Iterator<Item = &'a [u8]>) -> Cow<'a, [u8]> {
    let chunks: Vec<&[u8]> = chunks.collect();
    match chunks.as_slice() {
        [] => Cow::Borrowed(&[]),
        [single] => Cow::Borrowed(single),
        many => Cow::Owned(many.concat()),
    }
}

fn is_strippable(byte: u8) -> bool {
    matches!(byte, b'\0' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r' | b' ')
}

/// Strips leading and trailing whitespace (NUL, HT, LF, VT, FF, CR and
/// space). Interior bytes are left alone.
pub fn normalize(body: &[u8]) -> &[u8] {
    let start = body.iter().position(|&b| !is_strippable(b)).unwrap_or(body.len());
    let end = body.iter().rposition(|&b| !is_strippable(b)).map_or(start, |i| i + 1);
    &body[start..end]
}
