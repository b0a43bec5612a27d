use thiserror::Error;

/// Failure to turn a response body into a bounded token array.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeError {
    /// The document needs more tokens than the tokenizer may produce.
    #[error("not enough tokens: document exceeds capacity of {capacity}")]
    NoMemory {
        /// The tokenizer's token limit.
        capacity: usize,
    },
    /// A byte that cannot start or continue a token at this position.
    #[error("invalid character {byte:#04x} at byte {offset}")]
    Invalid {
        /// Position of `byte` in the input.
        offset: usize,
        /// The offending byte.
        byte: u8,
    },
    /// Input ended inside a string or an open container.
    #[error("unexpected end of input, token opened at byte {offset}")]
    Partial {
        /// Where the unfinished string or container starts.
        offset: usize,
    },
}

/// A `\u` escape digit that is not hexadecimal.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EscapeError {
    #[error("invalid unicode escape sequence at byte: {0:#04x}")]
    InvalidHexDigit(u8),
}
