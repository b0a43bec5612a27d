//! Finding the value token that belongs to a named key.
//!
//! Tokens are positional: a string token equal to the key is followed, in
//! array order, by the token holding its value. The default [`LocateMode::Flat`]
//! scan relies on that alone and so can be fooled by a value string that
//! happens to equal the key and comes before the real key.
//! [`LocateMode::Keys`] tracks nesting while scanning and only considers
//! strings in object key position.

use alloc::vec::Vec;

use crate::token::{Token, TokenKind};

/// How [`locate_with`] decides which string tokens are candidate keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocateMode {
    /// Every string token after the document token is a candidate.
    #[default]
    Flat,
    /// Only strings in key position of an object whose [`Token::size`]
    /// records exactly one value are candidates.
    Keys,
}

/// Returns the value token of the first string token equal to `key`.
///
/// Equivalent to `locate_with(tokens, src, key, LocateMode::Flat)`.
#[must_use]
pub fn locate<'t>(tokens: &'t [Token], src: &[u8], key: &[u8]) -> Option<&'t Token> {
    locate_with(tokens, src, key, LocateMode::Flat)
}

/// Returns the token right after the first candidate key token equal to
/// `key`.
///
/// Index 0 is the whole document and is never a candidate. Comparison is
/// exact and case-sensitive. Tokens whose range lies outside `src` never
/// match. `None` if there is no match or the match is the last token.
#[must_use]
pub fn locate_with<'t>(
    tokens: &'t [Token],
    src: &[u8],
    key: &[u8],
    mode: LocateMode,
) -> Option<&'t Token> {
    let idx = match mode {
        LocateMode::Flat => tokens
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, t)| is_key_match(t, src, key))
            .map(|(i, _)| i),
        LocateMode::Keys => find_in_key_position(tokens, src, key),
    }?;
    tokens.get(idx + 1)
}

fn is_key_match(token: &Token, src: &[u8], key: &[u8]) -> bool {
    token.kind == TokenKind::String && token.slice(src) == Some(key)
}

/// An open container seen while scanning.
struct Frame {
    end: usize,
    object: bool,
    /// Whether the next direct child of an object is a key.
    expect_key: bool,
}

/// Single pass that keeps one frame per enclosing container. The depth of a
/// token is the number of frames left after popping those it lies beyond.
fn find_in_key_position(tokens: &[Token], src: &[u8], key: &[u8]) -> Option<usize> {
    let mut frames: Vec<Frame> = Vec::new();
    for (i, t) in tokens.iter().enumerate() {
        while frames.last().is_some_and(|f| t.start >= f.end) {
            frames.pop();
        }

        let in_key_position = match frames.last_mut() {
            Some(f) if f.object => {
                let k = f.expect_key;
                f.expect_key = !k;
                k
            }
            _ => false,
        };
        if i > 0 && in_key_position && t.size == 1 && is_key_match(t, src, key) {
            return Some(i);
        }

        if t.kind.is_container() {
            frames.push(Frame {
                end: t.end,
                object: t.kind == TokenKind::Object,
                expect_key: true,
            });
        }
    }
    None
}
