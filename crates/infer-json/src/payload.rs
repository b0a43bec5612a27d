//! Assembly of the chat-completion request body.
//!
//! The body is built by concatenation rather than serialization. Its shape is
//! fixed: a non-streaming request with exactly two messages, `system` then
//! `user`.

use alloc::vec::Vec;
use core::fmt;

use bstr::BStr;

use crate::escape::Escaped;

/// Instruction sent as the `system` message of every request.
///
/// Inserted into the body without escaping, so it must not contain `"`, `\`
/// or control characters.
pub const SYSTEM_PROMPT: &str = "You are a CLI tool. Output plain text only. No yapping. \
     Keep the output concise. DO NOT USE MARKDOWNS. NO asterisks. NO backticks. \
     NO formatting. Just plain readable sentences.";

/// Separator between the prompt and piped context, already in escaped form.
const CONTEXT_MARKER: &[u8] = br"\n\nContext:\n";

/// A complete JSON request body.
#[derive(Clone, PartialEq, Eq)]
pub struct Payload(Vec<u8>);

impl Payload {
    /// Builds the request body from already escaped text.
    ///
    /// The context is included only when it is present and non-empty;
    /// otherwise the user message is the prompt alone.
    ///
    /// `model` is copied verbatim into a JSON string position and is not
    /// escaped.
    #[must_use]
    pub fn assemble(model: &str, prompt: &Escaped, context: Option<&Escaped>) -> Self {
        let context = context.filter(|c| !c.is_empty());

        let mut body = Vec::with_capacity(
            128 + model.len()
                + SYSTEM_PROMPT.len()
                + prompt.len()
                + context.map_or(0, |c| CONTEXT_MARKER.len() + c.len()),
        );
        body.extend_from_slice(br#"{"model":""#);
        body.extend_from_slice(model.as_bytes());
        body.extend_from_slice(br#"","stream":false,"messages":["#);
        body.extend_from_slice(br#"{"role":"system","content":""#);
        body.extend_from_slice(SYSTEM_PROMPT.as_bytes());
        body.extend_from_slice(br#""},{"role":"user","content":""#);
        body.extend_from_slice(prompt.as_bytes());
        if let Some(context) = context {
            body.extend_from_slice(CONTEXT_MARKER);
            body.extend_from_slice(context.as_bytes());
        }
        body.extend_from_slice(br#""}]}"#);
        Self(body)
    }

    /// Escapes raw prompt and context, then assembles the body.
    ///
    /// `None` context means no context was supplied; `Some(b"")` is treated
    /// the same way after escaping.
    #[must_use]
    pub fn build(model: &str, prompt: &[u8], context: Option<&[u8]>) -> Self {
        let prompt = Escaped::new(prompt);
        let context = context.map(Escaped::new);
        Self::assemble(model, &prompt, context.as_ref())
    }

    /// The request body.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Unwraps the body, ready to hand to a transport.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Payload").field(&BStr::new(&self.0)).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::string::String;

    use super::{CONTEXT_MARKER, Payload, SYSTEM_PROMPT};
    use crate::escape::Escaped;

    fn user_content(payload: &Payload) -> String {
        let v: serde_json::Value = serde_json::from_slice(payload.as_bytes()).unwrap();
        v["messages"][1]["content"].as_str().unwrap().into()
    }

    #[test]
    fn system_prompt_needs_no_escaping() {
        let escaped = Escaped::new(SYSTEM_PROMPT.as_bytes());
        assert_eq!(escaped.as_bytes(), SYSTEM_PROMPT.as_bytes());
        assert!(SYSTEM_PROMPT.bytes().all(|b| (0x20..0x7F).contains(&b)));
    }

    #[test]
    fn without_context_user_content_is_prompt() {
        let prompt = Escaped::new(b"Say \"hi\"");
        let payload = Payload::assemble("demo", &prompt, None);
        let body = payload.as_bytes();
        assert!(
            body.windows(prompt.len() + 3)
                .any(|w| w == [br#"":""#.as_slice(), prompt.as_bytes()].concat())
        );
        assert!(!body.windows(8).any(|w| w == b"Context:"));
        assert_eq!(user_content(&payload), "Say \"hi\"");
    }

    #[test]
    fn empty_context_is_dropped() {
        let prompt = Escaped::new(b"p");
        let empty = Escaped::new(b"\r\r");
        assert!(empty.is_empty());
        assert_eq!(
            Payload::assemble("m", &prompt, Some(&empty)),
            Payload::assemble("m", &prompt, None)
        );
        assert_eq!(Payload::build("m", b"p", Some(b"".as_slice())), Payload::build("m", b"p", None));
    }

    #[test]
    fn context_is_appended_after_marker() {
        let payload = Payload::build("m", b"Summarize", Some(b"line 1\r\nline \"2\"\n".as_slice()));
        assert!(payload.as_bytes().windows(CONTEXT_MARKER.len()).any(|w| w == CONTEXT_MARKER));
        assert_eq!(
            user_content(&payload),
            "Summarize\n\nContext:\nline 1\nline \"2\"\n"
        );
    }

    #[test]
    fn message_order_and_fields() {
        let payload = Payload::build("gpt-x", b"q", None);
        let v: serde_json::Value = serde_json::from_slice(payload.as_bytes()).unwrap();
        assert_eq!(v["model"], "gpt-x");
        assert_eq!(v["stream"], false);
        let messages = v["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], SYSTEM_PROMPT);
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "q");
    }

    #[test]
    fn model_is_not_escaped() {
        let payload = Payload::build("a\"b", b"q", None);
        assert!(payload.as_bytes().starts_with(br#"{"model":"a"b","#));
        assert!(serde_json::from_slice::<serde_json::Value>(payload.as_bytes()).is_err());
    }
}
