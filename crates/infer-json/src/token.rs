use core::ops::Range;

/// Lexical class of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
    /// String literal; the token range excludes the quotes.
    String,
    /// Number, `true`, `false` or `null`.
    Primitive,
}

impl TokenKind {
    /// Objects and arrays.
    #[must_use]
    pub fn is_container(self) -> bool {
        matches!(self, TokenKind::Object | TokenKind::Array)
    }
}

/// A classified, half-open byte range into the scanned buffer.
///
/// Tokens are read-only views: they say where a value lives, never what it
/// decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// What the range holds.
    pub kind: TokenKind,
    /// First byte of the range.
    pub start: usize,
    /// One past the last byte of the range.
    pub end: usize,
    /// Number of direct children: keys for objects, elements for arrays, and
    /// `1` for a string in key position (its value).
    pub size: usize,
    /// Index of the enclosing token, if any. The value of a key points at the
    /// key.
    pub parent: Option<usize>,
}

impl Token {
    /// `start..end`
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The bytes this token spans in `src`, or `None` if the range does not
    /// fit inside `src`.
    #[must_use]
    pub fn slice<'a>(&self, src: &'a [u8]) -> Option<&'a [u8]> {
        src.get(self.range())
    }
}
