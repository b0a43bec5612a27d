//! Outbound escaping of raw text into the body of a JSON string literal.
//!
//! Only the three bytes that would break a hand-built payload are rewritten:
//! `"` and `\` gain a backslash and a line feed becomes `\n`. Carriage returns
//! are dropped so platform line endings never reach the wire. Everything else,
//! including bytes `>= 0x80`, is copied verbatim; the escaper works on bytes
//! and never validates encoding.

use alloc::vec::Vec;
use core::fmt;

use bstr::BStr;

/// Text that is safe to place between the quotes of a JSON string literal.
///
/// The only way to obtain one is [`Escaped::new`], so holding an `Escaped`
/// means the bytes went through the escaper.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Escaped(Vec<u8>);

impl Escaped {
    /// Escapes `raw` into a newly allocated buffer.
    #[must_use]
    pub fn new(raw: &[u8]) -> Self {
        let mut out = Vec::with_capacity(raw.len() * 2 + 1);
        escape_into(raw, &mut out);
        Self(out)
    }

    /// The escaped bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length in bytes after escaping.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether escaping left nothing, e.g. for input made only of `\r`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwraps the escaped buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl fmt::Debug for Escaped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Escaped").field(&BStr::new(&self.0)).finish()
    }
}

/// Appends the escaped form of `raw` to `out`.
///
/// Each input byte expands to at most two output bytes.
pub fn escape_into(raw: &[u8], out: &mut Vec<u8>) {
    out.reserve(raw.len());
    // Copy runs of untouched bytes in one go.
    let mut run_start = 0;
    for (i, &b) in raw.iter().enumerate() {
        let replacement: &[u8] = match b {
            b'"' => b"\\\"",
            b'\\' => b"\\\\",
            b'\n' => b"\\n",
            b'\r' => b"",
            _ => continue,
        };
        out.extend_from_slice(&raw[run_start..i]);
        out.extend_from_slice(replacement);
        run_start = i + 1;
    }
    out.extend_from_slice(&raw[run_start..]);
}
