//! Parsing from files and readers. Needs the `std` feature.
use alloc::vec::Vec;
use std::{fs, io, path::Path};

use crate::{
    error::{ErrorKind, ParseError},
    parser::Parser,
    value::Value,
};

fn io_error(err: &io::Error) -> ParseError {
    let kind = match err.kind() {
        io::ErrorKind::NotFound => ErrorKind::FileNotFound,
        io::ErrorKind::InvalidData => ErrorKind::FileInvalid,
        _ => ErrorKind::FileNotSupport,
    };
    log::debug!("reading input failed: {err}");
    kind.into()
}

fn parse_contents(contents: &[u8], parser: &Parser) -> Result<Value<'static>, ParseError> {
    if core::str::from_utf8(contents).is_err() {
        log::debug!("input is not valid UTF-8");
        return Err(ErrorKind::FileInvalid.into());
    }
    parser.parse_owned(contents)
}

/// Reads the whole file at `path` and parses it with payloads copied, so the
/// result does not depend on the read buffer.
///
/// ```no_run
/// let config = lexjson::parse_file("config.json")?;
/// let port: u16 = config["port"].get_or(8080)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// [`ErrorKind::FileNotFound`] when the file does not exist,
/// [`ErrorKind::FileNotSupport`] when it cannot be read,
/// [`ErrorKind::FileInvalid`] when it is not UTF-8, and any parse error.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Value<'static>, ParseError> {
    parse_file_with(path, &Parser::default())
}

/// [`parse_file`] with a configured parser.
///
/// # Errors
///
/// As [`parse_file`].
pub fn parse_file_with<P: AsRef<Path>>(
    path: P,
    parser: &Parser,
) -> Result<Value<'static>, ParseError> {
    let path = path.as_ref();
    log::trace!("parsing {}", path.display());
    let contents = fs::read(path).map_err(|e| io_error(&e))?;
    parse_contents(&contents, parser)
}

/// Reads `reader` to the end and parses it like [`parse_file`].
///
/// # Errors
///
/// [`ErrorKind::FileNotSupport`] when reading fails,
/// [`ErrorKind::FileInvalid`] when the content is not UTF-8, and any parse
/// error.
pub fn parse_reader<R: io::Read>(mut reader: R) -> Result<Value<'static>, ParseError> {
    let mut contents = Vec::new();
    reader
        .read_to_end(&mut contents)
        .map_err(|e| io_error(&e))?;
    parse_contents(&contents, &Parser::default())
}
