//! Bounded, non-recursive JSON tokenizer.
//!
//! The tokenizer turns a byte buffer into a flat array of [`Token`]s in
//! document order. It never builds values and never recurses: open containers
//! live on an explicit stack, and the number of tokens it may emit is fixed up
//! front. A document that needs more tokens fails with
//! [`TokenizeError::NoMemory`] instead of growing without bound.
//!
//! Only as much grammar is checked as the locator needs to trust positions:
//! brackets must balance, strings must terminate with valid escapes, and keys
//! must be strings. Number syntax and missing commas are not validated.
//!
//! ```rust
//! use infer_json::{TokenKind, Tokenizer};
//!
//! let tokens = Tokenizer::new(8).tokenize(br#"{"a":[1,true]}"#).unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::Object,
//!         TokenKind::String,
//!         TokenKind::Array,
//!         TokenKind::Primitive,
//!         TokenKind::Primitive,
//!     ]
//! );
//! ```

use alloc::vec::Vec;

use crate::{
    error::TokenizeError,
    token::{Token, TokenKind},
};

#[cfg(test)]
mod tests;

/// Token capacity used by [`Tokenizer::default`].
pub const DEFAULT_TOKEN_CAPACITY: usize = 1024;

/// Upper bound on the initial allocation, so a huge capacity costs nothing
/// for small documents.
const INITIAL_RESERVE: usize = 64;

/// A tokenizer with a fixed token capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    capacity: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_CAPACITY)
    }
}

impl Tokenizer {
    /// A tokenizer that fails with [`TokenizeError::NoMemory`] rather than
    /// produce more than `capacity` tokens.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Most tokens one call to [`tokenize`](Self::tokenize) may return.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Scans `src` into at most [`capacity`](Self::capacity) tokens.
    ///
    /// # Errors
    ///
    /// - [`TokenizeError::NoMemory`] if the document needs more tokens.
    /// - [`TokenizeError::Invalid`] on a byte that cannot appear where it does.
    /// - [`TokenizeError::Partial`] if the input ends inside a string or an
    ///   unclosed container.
    pub fn tokenize(&self, src: &[u8]) -> Result<Vec<Token>, TokenizeError> {
        let mut scan = Scan {
            src,
            pos: 0,
            capacity: self.capacity,
            tokens: Vec::with_capacity(self.capacity.min(INITIAL_RESERVE)),
            parent: None,
            open: Vec::new(),
        };
        scan.run()?;
        Ok(scan.tokens)
    }
}

/// Scanning state for one call to [`Tokenizer::tokenize`].
struct Scan<'src> {
    src: &'src [u8],
    pos: usize,
    capacity: usize,
    tokens: Vec<Token>,
    /// Token that the next value attaches to: an open container, or a key
    /// right after its colon.
    parent: Option<usize>,
    /// Indices of containers whose closing bracket has not been seen yet.
    open: Vec<usize>,
}

impl Scan<'_> {
    fn run(&mut self) -> Result<(), TokenizeError> {
        while let Some(&b) = self.src.get(self.pos) {
            match b {
                b'{' => self.open_container(TokenKind::Object)?,
                b'[' => self.open_container(TokenKind::Array)?,
                b'}' => self.close_container(TokenKind::Object)?,
                b']' => self.close_container(TokenKind::Array)?,
                b'"' => self.string()?,
                b':' => self.colon()?,
                b',' => {
                    self.parent = self.open.last().copied();
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' | b'\n' => self.pos += 1,
                b'-' | b'0'..=b'9' | b't' | b'f' | b'n' => self.primitive()?,
                _ => return Err(self.invalid_at(self.pos)),
            }
        }

        match self.open.last() {
            Some(&idx) => Err(TokenizeError::Partial {
                offset: self.tokens[idx].start,
            }),
            None => Ok(()),
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) -> Result<usize, TokenizeError> {
        if self.tokens.len() >= self.capacity {
            return Err(TokenizeError::NoMemory {
                capacity: self.capacity,
            });
        }
        if let Some(p) = self.parent {
            self.tokens[p].size += 1;
        }
        self.tokens.push(Token {
            kind,
            start,
            end,
            size: 0,
            parent: self.parent,
        });
        Ok(self.tokens.len() - 1)
    }

    /// Whether the next token would sit in key position.
    fn expecting_key(&self) -> bool {
        self.parent
            .is_some_and(|p| self.tokens[p].kind == TokenKind::Object)
    }

    fn invalid_at(&self, offset: usize) -> TokenizeError {
        TokenizeError::Invalid {
            offset,
            byte: self.src[offset],
        }
    }

    fn open_container(&mut self, kind: TokenKind) -> Result<(), TokenizeError> {
        if self.expecting_key() {
            return Err(self.invalid_at(self.pos));
        }
        // `end` is fixed up when the closing bracket arrives.
        let idx = self.push(kind, self.pos, self.pos)?;
        self.open.push(idx);
        self.parent = Some(idx);
        self.pos += 1;
        Ok(())
    }

    fn close_container(&mut self, kind: TokenKind) -> Result<(), TokenizeError> {
        let Some(idx) = self.open.pop() else {
            return Err(self.invalid_at(self.pos));
        };
        if self.tokens[idx].kind != kind {
            return Err(self.invalid_at(self.pos));
        }
        self.pos += 1;
        self.tokens[idx].end = self.pos;
        self.parent = self.tokens[idx].parent;
        Ok(())
    }

    fn colon(&mut self) -> Result<(), TokenizeError> {
        let key = self.tokens.len().checked_sub(1);
        let is_key = key.is_some_and(|k| {
            let t = &self.tokens[k];
            t.kind == TokenKind::String && t.parent == self.parent
        });
        match key {
            Some(k) if is_key && self.expecting_key() => {
                self.parent = Some(k);
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.invalid_at(self.pos)),
        }
    }

    fn string(&mut self) -> Result<(), TokenizeError> {
        let quote = self.pos;
        let start = quote + 1;
        let mut i = start;
        loop {
            match self.src.get(i) {
                None => return Err(TokenizeError::Partial { offset: quote }),
                Some(b'"') => break,
                Some(b'\\') => i = self.escape(quote, i)?,
                Some(_) => i += 1,
            }
        }
        self.push(TokenKind::String, start, i)?;
        self.pos = i + 1;
        Ok(())
    }

    /// Validates the escape starting at the backslash at `at` and returns the
    /// offset just past it.
    fn escape(&self, quote: usize, at: usize) -> Result<usize, TokenizeError> {
        let partial = TokenizeError::Partial { offset: quote };
        match self.src.get(at + 1) {
            None => Err(partial),
            Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => Ok(at + 2),
            Some(b'u') => {
                for offset in at + 2..at + 6 {
                    match self.src.get(offset) {
                        None => return Err(partial),
                        Some(b) if b.is_ascii_hexdigit() => {}
                        Some(_) => return Err(self.invalid_at(offset)),
                    }
                }
                Ok(at + 6)
            }
            Some(_) => Err(self.invalid_at(at + 1)),
        }
    }

    fn primitive(&mut self) -> Result<(), TokenizeError> {
        if self.expecting_key() {
            return Err(self.invalid_at(self.pos));
        }
        let start = self.pos;
        let mut i = start;
        while let Some(&b) = self.src.get(i) {
            match b {
                b' ' | b'\t' | b'\r' | b'\n' | b',' | b']' | b'}' | b':' => break,
                0..=0x1F | 0x7F.. => return Err(self.invalid_at(i)),
                _ => i += 1,
            }
        }
        self.push(TokenKind::Primitive, start, i)?;
        self.pos = i;
        Ok(())
    }
}
