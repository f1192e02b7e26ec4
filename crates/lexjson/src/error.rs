use thiserror::Error;

/// The kind of failure reported by the parser and the file adapters.
///
/// Every kind maps to a stable negative integer through [`ErrorKind::code`],
/// so callers that speak in status codes can keep doing so.
#[repr(i32)]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    #[error("unknown error")]
    Unknown = -1,
    #[error("file not found")]
    FileNotFound = -4,
    #[error("file could not be read")]
    FileNotSupport = -5,
    #[error("file content is not valid UTF-8")]
    FileInvalid = -6,
    #[error("expected '{{' or '['")]
    MissingLeftBrace = -7,
    #[error("expected a matching '}}' or ']'")]
    MissingRightBrace = -8,
    #[error("expected '\"' to open a key")]
    MissingLeftQuote = -9,
    #[error("unterminated string")]
    MissingRightQuote = -10,
    #[error("expected ':' after key")]
    MissingColon = -11,
    #[error("expected ',' between values")]
    MissingComma = -12,
    #[error("invalid unicode escape")]
    InvalidUnicode = -13,
    #[error("invalid literal, expected null")]
    InvalidNull = -14,
    #[error("invalid literal, expected true or false")]
    InvalidBoolean = -15,
    #[error("unexpected characters after the document")]
    TrailingCharacters = -16,
    #[error("expected a value")]
    MissingValue = -17,
}

impl ErrorKind {
    /// The status code of this kind. Always negative.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// A parse failure: what went wrong and the byte offset where it was noticed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at byte {offset}")]
pub struct ParseError {
    pub(crate) kind: ErrorKind,
    pub(crate) offset: usize,
}

impl ParseError {
    pub(crate) const fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Byte offset into the input. File adapter errors report `0`.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Shorthand for `self.kind().code()`.
    #[must_use]
    pub const fn code(&self) -> i32 {
        self.kind.code()
    }
}

impl From<ErrorKind> for ParseError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind, 0)
    }
}

/// Failures raised when reading, converting or building values.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueError {
    #[error("not an object")]
    NotObject,
    #[error("not an array")]
    NotArray,
    #[error("not a string")]
    NotString,
    #[error("not a number")]
    NotNumber,
    #[error("not a boolean")]
    NotBoolean,
    #[error("text is not a valid lexical form of the requested type")]
    BadConversion,
    #[error("value does not fit the formatting buffer")]
    BadFormat,
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid unicode escape sequence")]
    InvalidUnicode,
    #[error("dangling escape at the end of a string")]
    InvalidEscape,
    #[error("decoded string is not valid UTF-8")]
    InvalidUtf8,
}
