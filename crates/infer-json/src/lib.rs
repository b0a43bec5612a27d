//! Byte-level JSON text codec for chat-completion requests and replies.
//!
//! The crate never builds a JSON object model. Outbound text is escaped into
//! a hand-assembled request body; inbound bytes are tokenized into a bounded
//! array of `(kind, start, end)` ranges, the value of a named key is located
//! by scanning those ranges, and its escapes are decoded straight into UTF-8.
//!
//! ```rust
//! use infer_json::{Escaped, Payload, Tokenizer, locate, unescape};
//!
//! let prompt = Escaped::new(b"Say \"hi\"");
//! let payload = Payload::assemble("demo", &prompt, None);
//! assert!(payload.as_bytes().starts_with(br#"{"model":"demo","stream":false"#));
//!
//! let body = br#"{"choices":[{"message":{"content":"hi\nthere"}}]}"#;
//! let tokens = Tokenizer::default().tokenize(body).unwrap();
//! let value = locate(&tokens, body, b"content").unwrap();
//! assert_eq!(unescape(value.slice(body).unwrap()), b"hi\nthere");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod escape;
mod escape_buffer;
mod locate;
mod payload;
mod token;
mod tokenizer;
mod unescape;

#[cfg(test)]
mod tests;

pub use error::TokenizeError;
pub use escape::{Escaped, escape_into};
pub use locate::{LocateMode, locate, locate_with};
pub use payload::{Payload, SYSTEM_PROMPT};
pub use token::{Token, TokenKind};
pub use tokenizer::{DEFAULT_TOKEN_CAPACITY, Tokenizer};
pub use unescape::{Decoded, Utf8Seq, decode_escape, encode_code_point, unescape, unescape_into};
