//! Header word-encoding (RFC 2047, "Q" form).

/// Encodes a header value as an RFC 2047 encoded-word when it needs it.
///
/// Printable-ASCII input is returned unchanged, so the encoding is
/// idempotent for plain subjects. Anything else becomes a single
/// `=?utf-8?q?...?=` word: space maps to `_`, the bytes `=`, `?` and `_`
/// plus everything outside printable ASCII map to `=XX` (uppercase hex),
/// and the rest is passed through.
///
/// No folding is performed; the result is always one logical line.
pub fn encode_header(text: &str) -> String {
    if !needs_encoding(text) {
        return text.to_string();
    }
    let mut encoded = String::with_capacity(text.len() * 3 + 12);
    encoded.push_str("=?utf-8?q?");
    for byte in text.bytes() {
        match byte {
            b' ' => encoded.push('_'),
            b'=' | b'?' | b'_' => push_hex(&mut encoded, byte),
            0x21..=0x7e => encoded.push(byte as char),
            _ => push_hex(&mut encoded, byte),
        }
    }
    encoded.push_str("?=");
    encoded
}

/// True when `text` contains anything outside the printable ASCII range.
pub(crate) fn needs_encoding(text: &str) -> bool {
    text.bytes().any(|b| !(0x20..=0x7e).contains(&b))
}

fn push_hex(out: &mut String, byte: u8) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    out.push('=');
    out.push(HEX[(byte >> 4) as usize] as char);
    out.push(HEX[(byte & 0x0f) as usize] as char);
}
