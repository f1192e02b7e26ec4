/// Configuration options for [`Parser`](crate::Parser).
///
/// None of the options change which documents are accepted except
/// [`validate_escapes`](ParserOptions::validate_escapes); the capacities only
/// tune how much memory is reserved up front.
///
/// # Examples
///
/// ```rust
/// use lexjson::{Parser, ParserOptions};
///
/// let parser = Parser::new(ParserOptions {
///     validate_escapes: true,
///     ..Default::default()
/// });
/// assert!(parser.parse(r#"["\u12"]"#).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(default))]
pub struct ParserOptions {
    /// Elements reserved in every object or array when it is opened.
    ///
    /// # Default
    ///
    /// `16`
    pub frame_capacity: usize,

    /// Open containers reserved on the parser's frame stack before the first
    /// byte is read. The stack still grows past this for deeper documents.
    ///
    /// # Default
    ///
    /// `16`
    pub stack_capacity: usize,

    /// Whether to decode every string and key while parsing, only to check
    /// it. Bad `\u` escapes then fail the parse with
    /// [`ErrorKind::InvalidUnicode`](crate::ErrorKind::InvalidUnicode)
    /// instead of failing later in [`Value::get`](crate::Value::get).
    ///
    /// # Default
    ///
    /// `false`
    pub validate_escapes: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            frame_capacity: 16,
            stack_capacity: 16,
            validate_escapes: false,
        }
    }
}
