#![no_main]
use arbitrary::{Arbitrary, Unstructured};
use infer_json::{Escaped, LocateMode, Payload, Tokenizer, locate_with, unescape};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
        };
        Ok(ArbitraryValue(value))
    }
}

#[derive(Debug, Arbitrary)]
enum Reply {
    /// Raw bytes, mostly rejected by the tokenizer.
    Raw(Vec<u8>),
    /// A well-formed document, so the locator and decoder get real work.
    Json(ArbitraryValue),
}

#[derive(Debug, Arbitrary)]
struct Input {
    keys_mode: bool,
    capacity: u16,
    key: String,
    reply: Reply,
    prompt: Vec<u8>,
    context: Option<Vec<u8>>,
}

fn codec(input: Input) {
    let body = match &input.reply {
        Reply::Raw(bytes) => bytes.clone(),
        Reply::Json(value) => serde_json::to_vec(&value.0).expect("serialize arbitrary value"),
    };

    let tokenizer = Tokenizer::new(usize::from(input.capacity));
    if let Ok(tokens) = tokenizer.tokenize(&body) {
        assert!(tokens.len() <= tokenizer.capacity());
        for token in &tokens {
            assert!(token.start <= token.end && token.end <= body.len());
        }

        let mode = if input.keys_mode { LocateMode::Keys } else { LocateMode::Flat };
        if let Some(value) = locate_with(&tokens, &body, input.key.as_bytes(), mode) {
            let raw = value.slice(&body).expect("token range lies inside the body");
            let decoded = unescape(raw);
            if matches!(input.reply, Reply::Json(_)) && value.kind == infer_json::TokenKind::String {
                // serde_json only emits valid escapes and UTF-8.
                assert!(std::str::from_utf8(&decoded).is_ok());
            }
        }
    }

    // Escaping then decoding restores everything except carriage returns.
    let escaped = Escaped::new(&input.prompt);
    let expected: Vec<u8> = input.prompt.iter().copied().filter(|&b| b != b'\r').collect();
    assert_eq!(unescape(escaped.as_bytes()), expected);

    let payload = Payload::build("fuzz-model", &input.prompt, input.context.as_deref());
    // Only newlines and carriage returns are rewritten; other control bytes
    // stay raw and a strict parser would refuse them.
    let plain = |b: &[u8]| !b.iter().any(|&c| c < 0x20 && c != b'\n' && c != b'\r');
    if !plain(&input.prompt) || !input.context.as_deref().is_none_or(plain) {
        return;
    }
    if let (Ok(prompt), Ok(context)) = (
        std::str::from_utf8(&input.prompt),
        input.context.as_deref().map(std::str::from_utf8).transpose(),
    ) {
        let doc: Value = serde_json::from_slice(payload.as_bytes()).expect("payload is JSON");
        let mut content = prompt.replace('\r', "");
        if let Some(context) = context.map(|c| c.replace('\r', "")).filter(|c| !c.is_empty()) {
            content.push_str("\n\nContext:\n");
            content.push_str(&context);
        }
        assert_eq!(doc["messages"][1]["content"], Value::String(content));
    }
}

fuzz_target!(|input: Input| codec(input));
