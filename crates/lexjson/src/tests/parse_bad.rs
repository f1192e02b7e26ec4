use alloc::string::ToString;

use rstest::rstest;

use crate::{ErrorKind, ParseError, Parser, ParserOptions, Value, parse, parse_owned};

#[rstest]
#[case("", ErrorKind::MissingLeftBrace, 0)]
#[case("   ", ErrorKind::MissingLeftBrace, 3)]
#[case("1", ErrorKind::MissingLeftBrace, 0)]
#[case("[", ErrorKind::MissingRightBrace, 1)]
#[case("[1", ErrorKind::MissingRightBrace, 2)]
#[case(r#"{"a":1"#, ErrorKind::MissingRightBrace, 6)]
#[case("[1}", ErrorKind::MissingRightBrace, 2)]
#[case(r#"{"a":1]"#, ErrorKind::MissingRightBrace, 6)]
#[case("{a:1}", ErrorKind::MissingLeftQuote, 1)]
#[case(r#"{"a"#, ErrorKind::MissingRightQuote, 1)]
#[case(r#"["abc]"#, ErrorKind::MissingRightQuote, 1)]
#[case(r#"{"a" 1}"#, ErrorKind::MissingColon, 5)]
#[case(r#"{"a"}"#, ErrorKind::MissingColon, 4)]
#[case("[1 2]", ErrorKind::MissingComma, 3)]
#[case(r#"{"a":1 "b":2}"#, ErrorKind::MissingComma, 7)]
#[case("[[] []]", ErrorKind::MissingComma, 4)]
#[case("[nul]", ErrorKind::InvalidNull, 1)]
#[case("[nulll]", ErrorKind::InvalidNull, 1)]
#[case(r#"{"a":tru}"#, ErrorKind::InvalidBoolean, 5)]
#[case("[fals]", ErrorKind::InvalidBoolean, 1)]
#[case("[truex]", ErrorKind::InvalidBoolean, 1)]
#[case("[] x", ErrorKind::TrailingCharacters, 3)]
#[case("{}{}", ErrorKind::TrailingCharacters, 2)]
#[case("[],", ErrorKind::TrailingCharacters, 2)]
#[case(r#"{"a":}"#, ErrorKind::MissingValue, 5)]
#[case(r#"{"a":"#, ErrorKind::MissingValue, 5)]
#[case("[\0]", ErrorKind::MissingValue, 1)]
fn rejects(#[case] src: &str, #[case] kind: ErrorKind, #[case] offset: usize) {
    let err = parse(src).unwrap_err();
    assert_eq!((err.kind(), err.offset()), (kind, offset), "input {src:?}");
    assert_eq!(parse_owned(src.as_bytes()).unwrap_err(), err);
}

#[test]
fn escapes_are_only_checked_on_request() {
    let src = r#"["ok", "\uZZZZ"]"#;
    let v = parse(src).unwrap();
    assert_eq!(v[1].get::<alloc::string::String>(), Err(crate::ValueError::InvalidUnicode));

    let parser = Parser::new(ParserOptions {
        validate_escapes: true,
        ..Default::default()
    });
    let err = parser.parse(src).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidUnicode);
    assert_eq!(err.offset(), 7);
}

#[test]
fn failed_parse_into_keeps_previous_value() {
    let mut out = parse(r#"{"keep":true}"#).unwrap();
    let err = crate::parse_into(&mut out, r#"{"keep":fals}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidBoolean);
    assert_eq!(out["keep"], Value::Boolean(true));
}

#[rstest]
#[case(ErrorKind::Unknown, -1)]
#[case(ErrorKind::FileNotFound, -4)]
#[case(ErrorKind::FileNotSupport, -5)]
#[case(ErrorKind::FileInvalid, -6)]
#[case(ErrorKind::MissingLeftBrace, -7)]
#[case(ErrorKind::MissingRightBrace, -8)]
#[case(ErrorKind::MissingLeftQuote, -9)]
#[case(ErrorKind::MissingRightQuote, -10)]
#[case(ErrorKind::MissingColon, -11)]
#[case(ErrorKind::MissingComma, -12)]
#[case(ErrorKind::InvalidUnicode, -13)]
#[case(ErrorKind::InvalidNull, -14)]
#[case(ErrorKind::InvalidBoolean, -15)]
#[case(ErrorKind::TrailingCharacters, -16)]
#[case(ErrorKind::MissingValue, -17)]
fn error_codes(#[case] kind: ErrorKind, #[case] code: i32) {
    assert_eq!(kind.code(), code);
    assert_eq!(ParseError::from(kind).code(), code);
}

#[test]
fn error_display() {
    let err = parse("[1 2]").unwrap_err();
    assert_eq!(err.to_string(), "expected ',' between values at byte 3");
    insta::assert_snapshot!(parse("{\"a\"}").unwrap_err(), @"expected ':' after key at byte 4");
}
