use alloc::vec::Vec;

use super::*;

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

fn texts<'a>(tokens: &[Token], src: &'a [u8]) -> Vec<&'a [u8]> {
    tokens.iter().map(|t| &src[t.range()]).collect()
}

#[test]
fn empty_input_has_no_tokens() {
    assert_eq!(Tokenizer::default().tokenize(b"").unwrap(), Vec::new());
    assert_eq!(Tokenizer::default().tokenize(b" \n\t ").unwrap(), Vec::new());
}

#[test]
fn chat_completion_shape() {
    let src = br#"{"choices":[{"message":{"role":"assistant","content":"hi\nthere"}}]}"#;
    let tokens = Tokenizer::default().tokenize(src).unwrap();
    assert_eq!(
        kinds(&tokens),
        [
            TokenKind::Object,
            TokenKind::String,
            TokenKind::Array,
            TokenKind::Object,
            TokenKind::String,
            TokenKind::Object,
            TokenKind::String,
            TokenKind::String,
            TokenKind::String,
            TokenKind::String,
        ]
    );
    assert_eq!(
        texts(&tokens[1..], src),
        [
            b"choices".as_slice(),
            br#"[{"message":{"role":"assistant","content":"hi\nthere"}}]"#,
            br#"{"message":{"role":"assistant","content":"hi\nthere"}}"#,
            b"message",
            br#"{"role":"assistant","content":"hi\nthere"}"#,
            b"role",
            b"assistant",
            b"content",
            br"hi\nthere",
        ]
    );
    assert_eq!(tokens[0].range(), 0..src.len());
}

#[test]
fn sizes_and_parents_follow_nesting() {
    let src = br#"{"a":1,"b":[true,null,"x"]}"#;
    let tokens = Tokenizer::default().tokenize(src).unwrap();
    // object: two keys
    assert_eq!(tokens[0].size, 2);
    assert_eq!(tokens[0].parent, None);
    // key "a" owns its value
    assert_eq!(tokens[1].size, 1);
    assert_eq!(tokens[1].parent, Some(0));
    assert_eq!(tokens[2].parent, Some(1));
    // key "b" and its array of three
    assert_eq!(tokens[3].size, 1);
    assert_eq!(tokens[4].kind, TokenKind::Array);
    assert_eq!(tokens[4].size, 3);
    assert_eq!(tokens[4].parent, Some(3));
    for t in &tokens[5..] {
        assert_eq!(t.parent, Some(4));
    }
}

#[test]
fn string_ranges_exclude_quotes_and_keep_escapes() {
    let src = r#"["a\"b","é",""]"#.as_bytes();
    let tokens = Tokenizer::default().tokenize(src).unwrap();
    assert_eq!(
        texts(&tokens[1..], src),
        [br#"a\"b"#.as_slice(), "é".as_bytes(), b""]
    );
}

#[test]
fn primitives_end_at_delimiters() {
    let src = b"[-1.5e3 ,true,false\n,null]";
    let tokens = Tokenizer::default().tokenize(src).unwrap();
    assert_eq!(
        texts(&tokens[1..], src),
        [b"-1.5e3".as_slice(), b"true", b"false", b"null"]
    );
}

#[test]
fn top_level_primitive_runs_to_end_of_input() {
    let tokens = Tokenizer::default().tokenize(b"42").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].range(), 0..2);
}

#[test]
fn capacity_overflow_is_reported() {
    let src = br#"{"a":[1,2,3]}"#;
    assert_eq!(Tokenizer::new(6).tokenize(src).unwrap().len(), 6);
    assert_eq!(
        Tokenizer::new(5).tokenize(src),
        Err(TokenizeError::NoMemory { capacity: 5 })
    );
    assert_eq!(
        Tokenizer::new(0).tokenize(b"1"),
        Err(TokenizeError::NoMemory { capacity: 0 })
    );
}

#[test]
fn unterminated_string_is_partial() {
    assert_eq!(
        Tokenizer::default().tokenize(br#"{"content":"hel"#),
        Err(TokenizeError::Partial { offset: 11 })
    );
    assert_eq!(
        Tokenizer::default().tokenize(br#"["a\"#),
        Err(TokenizeError::Partial { offset: 1 })
    );
    assert_eq!(
        Tokenizer::default().tokenize(br#"["\u00"#),
        Err(TokenizeError::Partial { offset: 1 })
    );
}

#[test]
fn unclosed_container_is_partial() {
    assert_eq!(
        Tokenizer::default().tokenize(br#"{"a":[1,2]"#),
        Err(TokenizeError::Partial { offset: 0 })
    );
    assert_eq!(
        Tokenizer::default().tokenize(b"[[]"),
        Err(TokenizeError::Partial { offset: 0 })
    );
}

#[test]
fn mismatched_brackets_are_invalid() {
    assert_eq!(
        Tokenizer::default().tokenize(b"[}"),
        Err(TokenizeError::Invalid { offset: 1, byte: b'}' })
    );
    assert_eq!(
        Tokenizer::default().tokenize(b"]"),
        Err(TokenizeError::Invalid { offset: 0, byte: b']' })
    );
}

#[test]
fn keys_must_be_strings() {
    assert_eq!(
        Tokenizer::default().tokenize(b"{1:2}"),
        Err(TokenizeError::Invalid { offset: 1, byte: b'1' })
    );
    assert_eq!(
        Tokenizer::default().tokenize(b"{[]:2}"),
        Err(TokenizeError::Invalid { offset: 1, byte: b'[' })
    );
    assert_eq!(
        Tokenizer::default().tokenize(br#"["a":1]"#),
        Err(TokenizeError::Invalid { offset: 4, byte: b':' })
    );
}

#[test]
fn bad_escapes_are_invalid() {
    assert_eq!(
        Tokenizer::default().tokenize(br#"["\x"]"#),
        Err(TokenizeError::Invalid { offset: 3, byte: b'x' })
    );
    assert_eq!(
        Tokenizer::default().tokenize(br#"["\u12G4"]"#),
        Err(TokenizeError::Invalid { offset: 6, byte: b'G' })
    );
}

#[test]
fn stray_bytes_are_invalid() {
    assert_eq!(
        Tokenizer::default().tokenize(b"{\"a\":x}"),
        Err(TokenizeError::Invalid { offset: 5, byte: b'x' })
    );
    assert_eq!(
        Tokenizer::default().tokenize(b"[tru\x01e]"),
        Err(TokenizeError::Invalid { offset: 4, byte: 0x01 })
    );
}

#[test]
fn raw_utf8_inside_strings_is_kept() {
    let src = "{\"content\":\"héllo 👋\"}".as_bytes();
    let tokens = Tokenizer::default().tokenize(src).unwrap();
    assert_eq!(&src[tokens[2].range()], "héllo 👋".as_bytes());
}

#[test]
fn multiple_top_level_values() {
    let tokens = Tokenizer::default().tokenize(b"{} [] 1").unwrap();
    assert_eq!(
        kinds(&tokens),
        [TokenKind::Object, TokenKind::Array, TokenKind::Primitive]
    );
    assert!(tokens.iter().all(|t| t.parent.is_none()));
}
