//! Cookie jar reading.
//!
//! The jar is the hosting environment's raw `name=value; name=value` string
//! and is read-only from this crate's perspective. Absence of a cookie is a
//! normal outcome, not an error.

/// Look up a cookie by exact name.
///
/// Pairs are split on `;` and trimmed; the first pair whose key (the text
/// before the first `=`) equals `name` wins. The value is percent-decoded.
/// Returns `None` for an empty jar or when no key matches. Malformed
/// percent-escapes decode lossily rather than failing the lookup.
pub fn get_named_cookie(jar: &str, name: &str) -> Option<String> {
    if jar.is_empty() {
        return None;
    }
    for pair in jar.split(';') {
        let Some((key, value)) = pair.trim().split_once('=') else {
            continue;
        };
        if key == name {
            let decoded = urlencoding::decode_binary(value.as_bytes());
            return Some(String::from_utf8_lossy(&decoded).into_owned());
        }
    }
    None
}
