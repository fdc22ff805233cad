//! Percent-encoding normalization for URI components.
//!
//! Every component stored by [`Uri`](super::Uri) passes through
//! [`normalize`] exactly once. The pass walks the raw text byte by byte:
//! a well-formed `%XX` escape is carried through verbatim (its hex case
//! untouched), a bare `%` that does not open an escape is itself escaped,
//! and every other run of characters is percent-encoded against the
//! component's encode set from RFC 3986 §2.
//!
//! Because the output contains only set-safe characters and well-formed
//! escapes, feeding it back through `normalize` returns it unchanged.
//! Already-encoded input is never double-encoded.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Encode set for registered names and userinfo.
///
/// Keeps the RFC 3986 `unreserved` and `sub-delims` characters literal;
/// everything else (including `:`, `@`, and `/`) is escaped.
pub(crate) const REG_NAME: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

/// Encode set for the path: `pchar` plus `/`.
pub(crate) const PATH: &AsciiSet = &REG_NAME.remove(b':').remove(b'@').remove(b'/');

/// Encode set for the query and fragment: `pchar` plus `/` and `?`.
pub(crate) const QUERY: &AsciiSet = &PATH.remove(b'?');

/// Returns `true` when `bytes[at]` opens a well-formed `%XX` escape.
fn is_escape(bytes: &[u8], at: usize) -> bool {
    at + 2 < bytes.len()
        && bytes[at] == b'%'
        && bytes[at + 1].is_ascii_hexdigit()
        && bytes[at + 2].is_ascii_hexdigit()
}

/// Percent-encodes `raw` against `encode_set`, preserving existing escapes.
///
/// Characters outside the set are emitted as uppercase `%XX` sequences
/// (UTF-8 bytes for non-ASCII input). Valid escapes already present in
/// `raw` pass through untouched, so the operation is idempotent.
pub(crate) fn normalize(raw: &str, encode_set: &'static AsciiSet) -> String {
    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            if is_escape(bytes, i) {
                out.push_str(&raw[i..i + 3]);
                i += 3;
            } else {
                // A `%` that opens no escape is literal data.
                out.push_str("%25");
                i += 1;
            }
            continue;
        }

        // Encode the whole run up to the next `%` in one go. `%` is
        // ASCII, so the slice boundaries always fall between chars.
        let start = i;
        while i < bytes.len() && bytes[i] != b'%' {
            i += 1;
        }
        out.extend(utf8_percent_encode(&raw[start..i], encode_set));
    }

    out
}
