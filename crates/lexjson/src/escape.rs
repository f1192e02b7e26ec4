//! JSON string escapes.
//!
//! The parser keeps strings exactly as they appear between the quotes.
//! [`unescape`] turns such a payload into the text it denotes, and
//! [`escape_into`] goes the other way when a value is built from plain text.
use bstr::ByteSlice;

use crate::{error::ValueError, sink::Sink};

const HIGH_SURROGATES: core::ops::Range<u32> = 0xD800..0xDC00;
const LOW_SURROGATES: core::ops::Range<u32> = 0xDC00..0xE000;

/// Decodes an escaped string payload, handing decoded pieces to `emit` in
/// order.
///
/// Runs without backslashes are passed through untouched. `\uXXXX` escapes
/// are decoded to UTF-8, with UTF-16 surrogate pairs combined into one code
/// point. Unknown escape letters are kept as the letter itself.
///
/// ```
/// let mut out = Vec::new();
/// lexjson::unescape(br"a\u0041b\n", |piece| out.extend_from_slice(piece)).unwrap();
/// assert_eq!(out, b"aAb\n");
/// ```
///
/// # Errors
///
/// - [`ValueError::InvalidUnicode`] for a bad hex digit, a high surrogate
///   without a following low surrogate, or a lone low surrogate.
/// - [`ValueError::InvalidEscape`] for a backslash at the very end.
pub fn unescape<F: FnMut(&[u8])>(raw: &[u8], mut emit: F) -> Result<(), ValueError> {
    let mut rest = raw;
    while let Some(at) = rest.find_byte(b'\\') {
        if at > 0 {
            emit(&rest[..at]);
        }
        let Some(&tag) = rest.get(at + 1) else {
            return Err(ValueError::InvalidEscape);
        };
        rest = &rest[at + 2..];
        match tag {
            b'b' => emit(b"\x08"),
            b'f' => emit(b"\x0C"),
            b'n' => emit(b"\n"),
            b'r' => emit(b"\r"),
            b't' => emit(b"\t"),
            b'u' => {
                let (ch, tail) = decode_unicode(rest)?;
                rest = tail;
                let mut buf = [0_u8; 4];
                emit(ch.encode_utf8(&mut buf).as_bytes());
            }
            other => emit(&[other]),
        }
    }
    if !rest.is_empty() {
        emit(rest);
    }
    Ok(())
}

fn hex4(bytes: &[u8]) -> Result<u32, ValueError> {
    let digits = bytes.get(..4).ok_or(ValueError::InvalidUnicode)?;
    digits.iter().try_fold(0_u32, |acc, &b| {
        char::from(b)
            .to_digit(16)
            .map(|d| (acc << 4) | d)
            .ok_or(ValueError::InvalidUnicode)
    })
}

/// Decodes the code point after a `\u`, consuming a trailing low surrogate
/// escape when the first unit is a high surrogate.
fn decode_unicode(rest: &[u8]) -> Result<(char, &[u8]), ValueError> {
    let first = hex4(rest)?;
    let mut rest = &rest[4..];
    let code = if HIGH_SURROGATES.contains(&first) {
        let tail = rest.strip_prefix(b"\\u").ok_or(ValueError::InvalidUnicode)?;
        let second = hex4(tail)?;
        if !LOW_SURROGATES.contains(&second) {
            return Err(ValueError::InvalidUnicode);
        }
        rest = &tail[4..];
        0x10000 + ((first - HIGH_SURROGATES.start) << 10) + (second - LOW_SURROGATES.start)
    } else if LOW_SURROGATES.contains(&first) {
        return Err(ValueError::InvalidUnicode);
    } else {
        first
    };
    let ch = char::from_u32(code).ok_or(ValueError::InvalidUnicode)?;
    Ok((ch, rest))
}

/// Writes `src` as the inside of a JSON string literal, escaping quotes,
/// backslashes, control characters and the Unicode line separators.
///
/// # Errors
///
/// Whatever the sink reports.
pub fn escape_into<S: Sink + ?Sized>(src: &str, out: &mut S) -> Result<(), S::Error> {
    let mut start = 0;
    for (i, c) in src.char_indices() {
        let short: &[u8] = match c {
            '"' => b"\\\"",
            '\\' => b"\\\\",
            // Line separators trip up pre-2019 JSON parsers.
            '\u{2028}' | '\u{2029}' => b"",
            c if c.is_ascii_control() || (c.is_control() && u32::from(c) <= 0xFFFF) => b"",
            _ => continue,
        };
        out.write_bytes(&src.as_bytes()[start..i])?;
        if short.is_empty() {
            write_unicode_escape(u32::from(c), out)?;
        } else {
            out.write_bytes(short)?;
        }
        start = i + c.len_utf8();
    }
    out.write_bytes(&src.as_bytes()[start..])
}

fn write_unicode_escape<S: Sink + ?Sized>(code: u32, out: &mut S) -> Result<(), S::Error> {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let nibble = |shift: u32| HEX[((code >> shift) & 0xF) as usize];
    out.write_bytes(&[b'\\', b'u', nibble(12), nibble(8), nibble(4), nibble(0)])
}
