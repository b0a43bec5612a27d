use bstr::BStr;
use infer_json::TokenizeError;
use thiserror::Error;

use crate::{config::ConfigError, transport::TransportError};

/// Longest response excerpt quoted in an error message.
const EXCERPT_LEN: usize = 200;

/// Everything that can end a run without printing a reply.
#[derive(Debug, Error)]
pub enum InferError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("could not parse response (HTTP {status}): {source}")]
    Tokenize {
        status: u16,
        #[source]
        source: TokenizeError,
        excerpt: String,
    },
    #[error("response has no \"{key}\" field (HTTP {status}): {excerpt}")]
    MissingField {
        key: &'static str,
        status: u16,
        excerpt: String,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Renders the start of a response body for diagnostics.
pub(crate) fn excerpt(body: &[u8]) -> String {
    let cut = body.len().min(EXCERPT_LEN);
    let mut s = BStr::new(&body[..cut]).to_string();
    if cut < body.len() {
        s.push_str("...");
    }
    s
}
