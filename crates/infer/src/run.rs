//! One request/response cycle: assemble, send, locate, decode.

use bstr::BStr;
use infer_json::{Payload, Tokenizer, locate, unescape};
use tracing::{debug, debug_span, trace};

use crate::{
    config::Config,
    error::{InferError, excerpt},
    transport::Transport,
};

/// Key whose string value is the reply text.
pub const CONTENT_KEY: &str = "content";

/// Sends `prompt` (and `context`, if any) and returns the decoded reply
/// content, without a trailing newline.
///
/// # Errors
///
/// - [`InferError::Transport`] if the exchange failed;
/// - [`InferError::Tokenize`] if the body could not be tokenized within the
///   tokenizer's capacity;
/// - [`InferError::MissingField`] if the body has no `content` key.
pub fn ask<T: Transport>(
    config: &Config,
    transport: &T,
    tokenizer: Tokenizer,
    prompt: &[u8],
    context: Option<&[u8]>,
) -> Result<Vec<u8>, InferError> {
    let span = debug_span!("ask", model = config.model());
    let _guard = span.enter();

    let payload = Payload::build(config.model(), prompt, context);
    debug!(
        bytes = payload.as_bytes().len(),
        context = context.map_or(0, <[u8]>::len),
        "assembled payload"
    );
    trace!(payload = %BStr::new(payload.as_bytes()));

    let response = transport.post_json(&config.endpoint(), config.api_key(), payload.into_bytes())?;
    extract_content(tokenizer, response.status, &response.body)
}

/// Finds and decodes the `content` value of a response body.
///
/// # Errors
///
/// See [`ask`].
pub fn extract_content(tokenizer: Tokenizer, status: u16, body: &[u8]) -> Result<Vec<u8>, InferError> {
    let tokens = tokenizer
        .tokenize(body)
        .map_err(|source| InferError::Tokenize {
            status,
            source,
            excerpt: excerpt(body),
        })?;
    debug!(tokens = tokens.len(), "tokenized response");

    let value = locate(&tokens, body, CONTENT_KEY.as_bytes())
        .and_then(|t| t.slice(body))
        .ok_or_else(|| InferError::MissingField {
            key: CONTENT_KEY,
            status,
            excerpt: excerpt(body),
        })?;
    Ok(unescape(value))
}
