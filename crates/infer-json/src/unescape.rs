//! Inbound decoding of a JSON string literal's escapes into UTF-8 bytes.
//!
//! The input is the inner range of a string token (quotes excluded). Ordinary
//! bytes are copied through; escapes are resolved and re-encoded as UTF-8.
//!
//! Decoding is lenient and never fails:
//! - an unknown escape character is emitted without its backslash;
//! - a `\u` escape with a non-hex digit becomes U+FFFD;
//! - a high surrogate without a following low-surrogate escape is encoded as
//!   its own numeric value, which is not valid UTF-8;
//! - a trailing lone backslash is emitted and ends decoding;
//! - a `\u` escape cut short by the end of the range emits `?`.
//!
//! No byte outside the given range is ever read.

use alloc::vec::Vec;

use crate::escape_buffer::UnicodeEscapeBuffer;

const REPLACEMENT: u32 = 0xFFFD;
const HIGH_SURROGATES: core::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const LOW_SURROGATES: core::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

/// Up to four bytes holding one encoded code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utf8Seq {
    buf: [u8; 4],
    len: u8,
}

impl Utf8Seq {
    /// The encoded bytes, one to four of them.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..usize::from(self.len)]
    }
}

/// Result of [`decode_escape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// The encoded code point.
    pub bytes: Utf8Seq,
    /// Whether the following `\u` escape was consumed as a low surrogate.
    pub paired: bool,
}

/// Encodes `cp` with the standard variable-length UTF-8 scheme.
///
/// Surrogate values are encoded like any other value below `0x10000`. Values
/// above `0x10FFFF` cannot come out of a `\u` escape but still produce `?`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn encode_code_point(cp: u32) -> Utf8Seq {
    let mut buf = [0u8; 4];
    let len = match cp {
        0..=0x7F => {
            buf[0] = cp as u8;
            1
        }
        0x80..=0x7FF => {
            buf[0] = 0xC0 | ((cp >> 6) & 0x1F) as u8;
            buf[1] = 0x80 | (cp & 0x3F) as u8;
            2
        }
        0x800..=0xFFFF => {
            buf[0] = 0xE0 | ((cp >> 12) & 0x0F) as u8;
            buf[1] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            buf[2] = 0x80 | (cp & 0x3F) as u8;
            3
        }
        0x1_0000..=0x10_FFFF => {
            buf[0] = 0xF0 | ((cp >> 18) & 0x07) as u8;
            buf[1] = 0x80 | ((cp >> 12) & 0x3F) as u8;
            buf[2] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            buf[3] = 0x80 | (cp & 0x3F) as u8;
            4
        }
        _ => {
            buf[0] = b'?';
            1
        }
    };
    Utf8Seq { buf, len }
}

/// Combines the code unit of one `\u` escape with the code unit of the escape
/// right after it, if there is one.
///
/// A high surrogate followed by a low surrogate yields the supplementary code
/// point and `paired == true`. In every other case `unit` is encoded alone and
/// `next` is left for the caller to decode on its own.
#[must_use]
pub fn decode_escape(unit: u32, next: Option<u32>) -> Decoded {
    if HIGH_SURROGATES.contains(&unit) {
        if let Some(low) = next.filter(|low| LOW_SURROGATES.contains(low)) {
            let cp = 0x1_0000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            return Decoded {
                bytes: encode_code_point(cp),
                paired: true,
            };
        }
    }
    Decoded {
        bytes: encode_code_point(unit),
        paired: false,
    }
}

/// Decodes `src` into a new buffer.
#[must_use]
pub fn unescape(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    unescape_into(src, &mut out);
    out
}

/// Decodes `src`, appending the result to `out`.
pub fn unescape_into(src: &[u8], out: &mut Vec<u8>) {
    let mut i = 0;
    while i < src.len() {
        // Copy everything up to the next backslash at once.
        let Some(rel) = src[i..].iter().position(|&b| b == b'\\') else {
            out.extend_from_slice(&src[i..]);
            return;
        };
        out.extend_from_slice(&src[i..i + rel]);
        i += rel + 1;

        let Some(&esc) = src.get(i) else {
            out.push(b'\\');
            return;
        };
        i += 1;

        match esc {
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'"' | b'\\' | b'/' => out.push(esc),
            b'u' => {
                let Some(digits) = src.get(i..i + 4) else {
                    out.push(b'?');
                    continue;
                };
                i += 4;
                let unit = UnicodeEscapeBuffer::decode(digits).unwrap_or(REPLACEMENT);
                let next = if HIGH_SURROGATES.contains(&unit) {
                    next_unicode_escape(&src[i..])
                } else {
                    None
                };
                let decoded = decode_escape(unit, next);
                if decoded.paired {
                    i += 6;
                }
                out.extend_from_slice(decoded.bytes.as_bytes());
            }
            other => out.push(other),
        }
    }
}

/// Reads the code unit of a `\uXXXX` escape at the very start of `rest`.
fn next_unicode_escape(rest: &[u8]) -> Option<u32> {
    match rest.get(..6)? {
        [b'\\', b'u', digits @ ..] => UnicodeEscapeBuffer::decode(digits),
        _ => None,
    }
}
