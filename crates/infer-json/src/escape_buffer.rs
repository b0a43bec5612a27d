//! Accumulation of the four hexadecimal digits of a `\uXXXX` escape.
//!
//! [`UnicodeEscapeBuffer`] folds ASCII hex digits (`0-9`, `A-F`, `a-f`) into a
//! `u32` as they arrive and yields the UTF-16 code unit once the fourth digit
//! has been fed. Surrogate halves are returned as-is; pairing them is the
//! caller's job. After yielding, the accumulator resets for the next escape.
//!
//! # Errors
//!
//! Feeding a byte that is not an ASCII hex digit returns
//! [`EscapeError::InvalidHexDigit`] and leaves the buffer reset.

use crate::error::EscapeError;

#[derive(Debug)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u32,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self { acc: 0, len: 0 }
    }

    pub fn reset(&mut self) {
        self.acc = 0;
        self.len = 0;
    }

    #[inline]
    fn hex_val(b: u8) -> Option<u32> {
        match b {
            b'0'..=b'9' => Some(u32::from(b - b'0')),
            b'a'..=b'f' => Some(u32::from(b - b'a') + 10),
            b'A'..=b'F' => Some(u32::from(b - b'A') + 10),
            _ => None,
        }
    }

    /// Feeds one byte of the escape.
    ///
    /// - `Ok(None)` while fewer than four digits have been seen.
    /// - `Ok(Some(unit))` on the fourth digit; the buffer is reset.
    /// - `Err` if `b` is not a hex digit; the buffer is reset.
    pub fn feed(&mut self, b: u8) -> Result<Option<u32>, EscapeError> {
        let Some(d) = Self::hex_val(b) else {
            self.reset();
            return Err(EscapeError::InvalidHexDigit(b));
        };

        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        self.reset();
        Ok(Some(unit))
    }

    /// Decodes a complete four-byte digit group.
    ///
    /// Returns `None` unless `digits` is exactly four hex digits.
    pub fn decode(digits: &[u8]) -> Option<u32> {
        if digits.len() != 4 {
            return None;
        }
        let mut buf = Self::new();
        for &b in digits {
            if let Some(unit) = buf.feed(b).ok()? {
                return Some(unit);
            }
        }
        None
    }
}
