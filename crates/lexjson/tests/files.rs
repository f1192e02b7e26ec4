#![expect(missing_docs)]

use std::{fs, io, path::PathBuf};

use lexjson::{ErrorKind, Parser, ParserOptions};

fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("lexjson-{}-{name}", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test_log::test]
fn parses_a_file() {
    let path = scratch_file("ok.json", br#"{"port": 8080, "hosts": ["a", "b"]}"#);
    let v = lexjson::parse_file(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(v["port"].get::<u16>(), Ok(8080));
    assert_eq!(v["hosts"][1].get::<&str>(), Ok("b"));
}

#[test]
fn missing_file() {
    let err = lexjson::parse_file("/nonexistent/lexjson/missing.json").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
    assert_eq!(err.offset(), 0);
}

#[test]
fn non_utf8_file() {
    let path = scratch_file("bad.json", b"[\"\xff\xfe\"]");
    let err = lexjson::parse_file(&path).unwrap_err();
    fs::remove_file(&path).unwrap();
    assert_eq!(err.kind(), ErrorKind::FileInvalid);
}

#[test]
fn syntax_errors_pass_through() {
    let path = scratch_file("syntax.json", b"{\"a\" 1}");
    let err = lexjson::parse_file(&path).unwrap_err();
    fs::remove_file(&path).unwrap();
    assert_eq!((err.kind(), err.offset()), (ErrorKind::MissingColon, 5));
}

#[test]
fn configured_parser() {
    let path = scratch_file("escape.json", br#"["\uZZZZ"]"#);
    let parser = Parser::new(ParserOptions {
        validate_escapes: true,
        ..Default::default()
    });
    let strict = lexjson::parse_file_with(&path, &parser).unwrap_err();
    let relaxed = lexjson::parse_file(&path);
    fs::remove_file(&path).unwrap();
    assert_eq!(strict.kind(), ErrorKind::InvalidUnicode);
    assert!(relaxed.is_ok());
}

#[test]
fn reader() {
    let v = lexjson::parse_reader(io::Cursor::new(b"[true, null]")).unwrap();
    assert_eq!(v, "[true,null]");

    struct Broken;
    impl io::Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("boom"))
        }
    }
    let err = lexjson::parse_reader(Broken).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotSupport);
}
