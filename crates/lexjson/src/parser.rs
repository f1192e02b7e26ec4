//! The iterative JSON parser.
//!
//! Parsing is a single pass over a byte slice. Open objects and arrays live
//! on an explicit stack of frames instead of the call stack, so nesting depth
//! is bounded by memory, not by the thread's stack size.
//!
//! Scalars are not converted. Strings are located by scanning for the closing
//! quote and keep their escapes; anything that is not a string, a container or
//! a literal is sliced up to the next terminator and stored as
//! [`Value::NumberRef`]. Whether the payloads borrow the input or are copied
//! is decided by a [`MemoryPolicy`].
//!
//! # Examples
//!
//! ```rust
//! use lexjson::{Arena, Parser, ParserOptions};
//!
//! let arena = Arena::new();
//! let parser = Parser::new_in(ParserOptions::default(), &arena);
//! let v = parser.parse(r#"{"key": [null, true, 3.14]}"#).unwrap();
//! assert_eq!(v["key"][2].get::<f64>(), Ok(3.14));
//! assert_eq!(v, r#"{"key":[null,true,3.14]}"#);
//! ```
use bstr::ByteSlice;

use crate::{
    error::{ErrorKind, ParseError},
    lexeme::Lexeme,
    memory::{Allocator, Arena, Heap},
    options::ParserOptions,
    text::Text,
    value::{Array, Member, Object, Value},
    vector::Vector,
};

// ------------------------------------------------------------------------------------------------
// Byte classes
// ------------------------------------------------------------------------------------------------

const fn byte_class(members: &[u8]) -> [bool; 256] {
    let mut table = [false; 256];
    let mut i = 0;
    while i < members.len() {
        table[members[i] as usize] = true;
        i += 1;
    }
    table
}

static WHITESPACE: [bool; 256] = byte_class(b" \t\n\r");
/// Bytes skipped between values.
static SKIP: [bool; 256] = byte_class(b" \t\n\r,");
/// Bytes that end a bare number or literal.
static TERMINATOR: [bool; 256] = byte_class(b" \t\n\r,}]\0");

// ------------------------------------------------------------------------------------------------
// Memory policies
// ------------------------------------------------------------------------------------------------

/// Decides how the parser stores key, string and number payloads.
pub trait MemoryPolicy<'src, 'out> {
    /// Turns a payload sliced from the input into the lexeme stored in the
    /// tree.
    fn adopt<A: Allocator>(bytes: &'src [u8], alloc: &A) -> Lexeme<'out, A>;
}

/// Payloads borrow the input. The tree cannot outlive the input buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewPolicy;

impl<'out, 'src: 'out> MemoryPolicy<'src, 'out> for ViewPolicy {
    fn adopt<A: Allocator>(bytes: &'src [u8], _alloc: &A) -> Lexeme<'out, A> {
        Lexeme::Borrowed(bytes)
    }
}

/// Payloads are copied into the parser's allocator. The tree is independent
/// of the input buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyPolicy;

impl<'src, 'out> MemoryPolicy<'src, 'out> for CopyPolicy {
    fn adopt<A: Allocator>(bytes: &'src [u8], alloc: &A) -> Lexeme<'out, A> {
        Lexeme::Owned(Text::from_bytes_in(bytes, alloc.clone()))
    }
}

// ------------------------------------------------------------------------------------------------
// Frames
// ------------------------------------------------------------------------------------------------

/// Where a finished container goes in its parent.
enum Slot<'out, A: Allocator> {
    Element,
    Member(Lexeme<'out, A>),
}

enum Body<'out, A: Allocator> {
    Object(Object<'out, A>),
    Array(Array<'out, A>),
}

impl<'out, A: Allocator> Body<'out, A> {
    fn open(byte: u8, capacity: usize, alloc: &A) -> Self {
        if byte == b'{' {
            Self::Object(Vector::with_capacity_in(capacity, alloc.clone()))
        } else {
            Self::Array(Vector::with_capacity_in(capacity, alloc.clone()))
        }
    }

    const fn closer(&self) -> u8 {
        match self {
            Self::Object(_) => b'}',
            Self::Array(_) => b']',
        }
    }

    const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    fn is_empty(&self) -> bool {
        match self {
            Self::Object(members) => members.is_empty(),
            Self::Array(items) => items.is_empty(),
        }
    }

    fn push(&mut self, slot: Slot<'out, A>, value: Value<'out, A>) {
        match (self, slot) {
            (Self::Object(members), Slot::Member(key)) => members.push(Member { key, value }),
            (Self::Array(items), Slot::Element) => items.push(value),
            _ => unreachable!("slot kind always follows the enclosing container"),
        }
    }

    fn into_value(self) -> Value<'out, A> {
        match self {
            Self::Object(members) => Value::Object(members),
            Self::Array(items) => Value::Array(items),
        }
    }
}

/// An open container and the slot it will fill once closed.
struct Frame<'out, A: Allocator> {
    slot: Slot<'out, A>,
    body: Body<'out, A>,
}

// ------------------------------------------------------------------------------------------------
// Cursor
// ------------------------------------------------------------------------------------------------

struct Cursor<'src> {
    input: &'src [u8],
    pos: usize,
}

impl<'src> Cursor<'src> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| WHITESPACE[usize::from(b)]) {
            self.pos += 1;
        }
    }

    fn error(&self, kind: ErrorKind) -> ParseError {
        Self::error_at(kind, self.pos)
    }

    fn error_at(kind: ErrorKind, offset: usize) -> ParseError {
        log::debug!("parse failed: {kind} at byte {offset}");
        ParseError::new(kind, offset)
    }

    /// Scans a quoted string starting at the opening quote and returns the
    /// bytes between the quotes. A backslash always skips the next byte.
    fn scan_string(&mut self) -> Result<&'src [u8], ParseError> {
        let input = self.input;
        let open = self.pos;
        let mut i = open + 1;
        loop {
            let Some(hit) = input[i..].find_byteset(b"\"\\") else {
                return Err(Self::error_at(ErrorKind::MissingRightQuote, open));
            };
            i += hit;
            if input[i] == b'"' {
                self.pos = i + 1;
                return Ok(&input[open + 1..i]);
            }
            i += 2;
            if i > input.len() {
                return Err(Self::error_at(ErrorKind::MissingRightQuote, open));
            }
        }
    }

    /// Consumes `literal`, which must be followed by a terminator or the end.
    fn expect_literal(&mut self, literal: &[u8], kind: ErrorKind) -> Result<(), ParseError> {
        let end = self.pos + literal.len();
        let terminated = self
            .input
            .get(end)
            .is_none_or(|&b| TERMINATOR[usize::from(b)]);
        if self.input.get(self.pos..end) != Some(literal) || !terminated {
            return Err(self.error(kind));
        }
        self.pos = end;
        Ok(())
    }

    /// Consumes bytes up to the next terminator.
    fn scan_bare(&mut self) -> &'src [u8] {
        let input = self.input;
        let start = self.pos;
        while self.peek().is_some_and(|b| !TERMINATOR[usize::from(b)]) {
            self.pos += 1;
        }
        &input[start..self.pos]
    }
}

// ------------------------------------------------------------------------------------------------
// Parser
// ------------------------------------------------------------------------------------------------

/// A reusable JSON parser bound to an allocator.
///
/// The document root must be an object or an array. The grammar is relaxed
/// in two ways: commas before the first and after the last entry of a
/// container are skipped, and numbers are not validated until they are read
/// through [`Value::get`].
///
/// On failure the [`ParseError`] carries the byte offset where the problem
/// was noticed; nothing is written to the output of
/// [`parse_into`](Parser::parse_into).
#[derive(Debug, Clone)]
pub struct Parser<A: Allocator = Heap> {
    options: ParserOptions,
    alloc: A,
}

impl Parser<Heap> {
    /// A parser that builds trees on the heap.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self::new_in(options, Heap)
    }
}

impl Default for Parser<Heap> {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl<A: Allocator> Parser<A> {
    /// A parser that builds trees in `alloc`. Every container, copied
    /// payload and the frame stack itself come from it.
    pub fn new_in(options: ParserOptions, alloc: A) -> Self {
        Self { options, alloc }
    }

    /// The options this parser was created with.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Parses `input` with payloads borrowed from it.
    ///
    /// # Errors
    ///
    /// A [`ParseError`] describing the first problem found.
    pub fn parse<'src, I: AsRef<[u8]> + ?Sized>(
        &self,
        input: &'src I,
    ) -> Result<Value<'src, A>, ParseError> {
        self.run::<ViewPolicy>(input.as_ref())
    }

    /// Parses `input` with payloads copied into the parser's allocator.
    ///
    /// # Errors
    ///
    /// A [`ParseError`] describing the first problem found.
    pub fn parse_owned<I: AsRef<[u8]> + ?Sized>(
        &self,
        input: &I,
    ) -> Result<Value<'static, A>, ParseError> {
        self.run::<CopyPolicy>(input.as_ref())
    }

    /// Parses `input` into `out` under the memory policy `P`. `out` is only
    /// replaced when parsing succeeds.
    ///
    /// ```
    /// use lexjson::{CopyPolicy, Parser, Value};
    ///
    /// let parser = Parser::default();
    /// let mut out = Value::Null;
    /// let input = String::from("[1,2]");
    /// parser.parse_into::<CopyPolicy, _>(&mut out, &input).unwrap();
    /// drop(input);
    /// assert_eq!(out, "[1,2]");
    ///
    /// assert!(parser.parse_into::<CopyPolicy, _>(&mut out, "[3,").is_err());
    /// assert_eq!(out, "[1,2]");
    /// ```
    ///
    /// # Errors
    ///
    /// A [`ParseError`] describing the first problem found.
    pub fn parse_into<'src, 'out, P, I>(
        &self,
        out: &mut Value<'out, A>,
        input: &'src I,
    ) -> Result<(), ParseError>
    where
        P: MemoryPolicy<'src, 'out>,
        I: AsRef<[u8]> + ?Sized,
    {
        *out = self.run::<P>(input.as_ref())?;
        Ok(())
    }

    fn run<'src, 'out, P: MemoryPolicy<'src, 'out>>(
        &self,
        input: &'src [u8],
    ) -> Result<Value<'out, A>, ParseError> {
        let mut cur = Cursor { input, pos: 0 };
        let mut stack: Vector<Frame<'out, A>, A> =
            Vector::with_capacity_in(self.options.stack_capacity, self.alloc.clone());

        cur.skip_whitespace();
        match cur.peek() {
            Some(open @ (b'{' | b'[')) => self.open(&mut stack, &mut cur, open, Slot::Element),
            _ => return Err(cur.error(ErrorKind::MissingLeftBrace)),
        }

        loop {
            // Separators and closing brackets up to the next value.
            let mut separated = false;
            loop {
                let Some(byte) = cur.peek() else {
                    return Err(cur.error(ErrorKind::MissingRightBrace));
                };
                match byte {
                    b'}' | b']' => {
                        let Some(frame) = stack.pop() else {
                            return Err(cur.error(ErrorKind::Unknown));
                        };
                        if frame.body.closer() != byte {
                            return Err(cur.error(ErrorKind::MissingRightBrace));
                        }
                        log::trace!("close {} at byte {}, depth {}", char::from(byte), cur.pos, stack.len());
                        cur.pos += 1;
                        let value = frame.body.into_value();
                        match stack.last_mut() {
                            Some(parent) => {
                                parent.body.push(frame.slot, value);
                                separated = false;
                            }
                            None => return Self::finish(cur, value),
                        }
                    }
                    b if SKIP[usize::from(b)] => {
                        separated |= b == b',';
                        cur.pos += 1;
                    }
                    _ => break,
                }
            }

            let Some(top) = stack.last() else {
                return Err(cur.error(ErrorKind::Unknown));
            };
            if !top.body.is_empty() && !separated {
                return Err(cur.error(ErrorKind::MissingComma));
            }
            let slot = if top.body.is_object() {
                Slot::Member(self.key::<P>(&mut cur)?)
            } else {
                Slot::Element
            };

            let value = match cur.peek() {
                Some(open @ (b'{' | b'[')) => {
                    self.open(&mut stack, &mut cur, open, slot);
                    continue;
                }
                Some(b'"') => Value::String(self.string::<P>(&mut cur)?),
                Some(b'n') => {
                    cur.expect_literal(b"null", ErrorKind::InvalidNull)?;
                    Value::Null
                }
                Some(b't') => {
                    cur.expect_literal(b"true", ErrorKind::InvalidBoolean)?;
                    Value::Boolean(true)
                }
                Some(b'f') => {
                    cur.expect_literal(b"false", ErrorKind::InvalidBoolean)?;
                    Value::Boolean(false)
                }
                _ => {
                    let raw = cur.scan_bare();
                    if raw.is_empty() {
                        return Err(cur.error(ErrorKind::MissingValue));
                    }
                    Value::NumberRef(P::adopt(raw, &self.alloc))
                }
            };
            match stack.last_mut() {
                Some(top) => top.body.push(slot, value),
                None => return Err(cur.error(ErrorKind::Unknown)),
            }
        }
    }

    fn open<'out>(
        &self,
        stack: &mut Vector<Frame<'out, A>, A>,
        cur: &mut Cursor<'_>,
        byte: u8,
        slot: Slot<'out, A>,
    ) {
        log::trace!("open {} at byte {}, depth {}", char::from(byte), cur.pos, stack.len() + 1);
        let body = Body::open(byte, self.options.frame_capacity, &self.alloc);
        stack.push(Frame { slot, body });
        cur.pos += 1;
    }

    fn string<'src, 'out, P: MemoryPolicy<'src, 'out>>(
        &self,
        cur: &mut Cursor<'src>,
    ) -> Result<Lexeme<'out, A>, ParseError> {
        let at = cur.pos;
        let raw = cur.scan_string()?;
        if self.options.validate_escapes && crate::escape::unescape(raw, |_| {}).is_err() {
            return Err(Cursor::error_at(ErrorKind::InvalidUnicode, at));
        }
        Ok(P::adopt(raw, &self.alloc))
    }

    /// Parses `"key"` and the colon after it.
    fn key<'src, 'out, P: MemoryPolicy<'src, 'out>>(
        &self,
        cur: &mut Cursor<'src>,
    ) -> Result<Lexeme<'out, A>, ParseError> {
        if cur.peek() != Some(b'"') {
            return Err(cur.error(ErrorKind::MissingLeftQuote));
        }
        let key = self.string::<P>(cur)?;
        cur.skip_whitespace();
        if cur.peek() != Some(b':') {
            return Err(cur.error(ErrorKind::MissingColon));
        }
        cur.pos += 1;
        cur.skip_whitespace();
        Ok(key)
    }

    fn finish<'out>(mut cur: Cursor<'_>, root: Value<'out, A>) -> Result<Value<'out, A>, ParseError> {
        cur.skip_whitespace();
        if cur.peek().is_some() {
            return Err(cur.error(ErrorKind::TrailingCharacters));
        }
        Ok(root)
    }
}

// ------------------------------------------------------------------------------------------------
// Shorthands
// ------------------------------------------------------------------------------------------------

/// Parses `input` on the heap, borrowing payloads from it.
///
/// # Errors
///
/// A [`ParseError`] describing the first problem found.
pub fn parse<I: AsRef<[u8]> + ?Sized>(input: &I) -> Result<Value<'_>, ParseError> {
    Parser::default().parse(input)
}

/// Parses `input` on the heap, copying payloads so the result owns
/// everything.
///
/// # Errors
///
/// A [`ParseError`] describing the first problem found.
pub fn parse_owned<I: AsRef<[u8]> + ?Sized>(input: &I) -> Result<Value<'static>, ParseError> {
    Parser::default().parse_owned(input)
}

/// Parses `input` into `arena`, borrowing payloads from the input.
///
/// ```
/// let arena = lexjson::Arena::new();
/// let v = lexjson::parse_in("[1,[2,[3]]]", &arena).unwrap();
/// assert_eq!(v[1][1][0].get::<i32>(), Ok(3));
/// assert!(arena.allocated_bytes() > 0);
/// ```
///
/// # Errors
///
/// A [`ParseError`] describing the first problem found.
pub fn parse_in<'src, 'a, I: AsRef<[u8]> + ?Sized>(
    input: &'src I,
    arena: &'a Arena,
) -> Result<Value<'src, &'a Arena>, ParseError> {
    Parser::new_in(ParserOptions::default(), arena).parse(input)
}

/// Parses `input` into `out` on the heap, borrowing payloads from the input.
/// `out` is left untouched on failure.
///
/// # Errors
///
/// A [`ParseError`] describing the first problem found.
pub fn parse_into<'src: 'out, 'out, I: AsRef<[u8]> + ?Sized>(
    out: &mut Value<'out>,
    input: &'src I,
) -> Result<(), ParseError> {
    Parser::default().parse_into::<ViewPolicy, I>(out, input)
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn byte_classes() {
        for b in [b' ', b'\t', b'\n', b'\r', b','] {
            assert!(SKIP[usize::from(b)]);
            assert!(TERMINATOR[usize::from(b)]);
        }
        for b in [b'}', b']', 0] {
            assert!(!SKIP[usize::from(b)]);
            assert!(TERMINATOR[usize::from(b)]);
        }
        for b in [b':', b'"', b'1', b'-', b'{', b'['] {
            assert!(!SKIP[usize::from(b)]);
            assert!(!TERMINATOR[usize::from(b)]);
        }
        assert_eq!(SKIP.iter().filter(|b| **b).count(), 5);
        assert_eq!(TERMINATOR.iter().filter(|b| **b).count(), 8);
    }

    #[test]
    fn scan_string_skips_escaped_quotes() {
        let mut cur = Cursor {
            input: br#""a\"b\\" rest"#,
            pos: 0,
        };
        assert_eq!(cur.scan_string().unwrap(), br#"a\"b\\"#);
        assert_eq!(cur.peek(), Some(b' '));
    }

    #[test]
    fn scan_string_reports_the_opening_quote() {
        let mut cur = Cursor {
            input: br#"  "abc\"#,
            pos: 2,
        };
        let err = cur.scan_string().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRightQuote);
        assert_eq!(err.offset(), 2);
    }

    #[test_log::test]
    fn view_policy_borrows_copy_policy_owns() {
        let parser = Parser::default();
        let input = r#"{"k":"v","n":10}"#;
        let view = parser.parse(input).unwrap();
        let copy = parser.parse_owned(input).unwrap();
        let members = view.as_object().unwrap();
        assert!(members.iter().all(|m| m.key.is_borrowed()));
        assert!(matches!(&view["k"], Value::String(l) if l.is_borrowed()));
        assert!(matches!(&copy["k"], Value::String(l) if !l.is_borrowed()));
        assert!(matches!(&copy["n"], Value::NumberRef(l) if !l.is_borrowed()));
        assert_eq!(view, copy);
    }

    #[test_log::test]
    fn deep_nesting_does_not_recurse() {
        const DEPTH: usize = 100_000;
        let mut src = Vec::with_capacity(DEPTH * 2 + 1);
        src.resize(DEPTH, b'[');
        src.push(b'1');
        src.resize(DEPTH * 2 + 1, b']');

        let arena = Arena::new();
        let parser = Parser::new_in(
            ParserOptions {
                frame_capacity: 1,
                ..Default::default()
            },
            &arena,
        );
        let root = parser.parse(&src).unwrap();
        let mut depth = 0;
        let mut cur = &root;
        while let Value::Array(items) = cur {
            depth += 1;
            cur = &items[0];
        }
        assert_eq!(depth, DEPTH);
        assert_eq!(cur.get::<i32>(), Ok(1));
        drop(root);
    }

    #[test]
    fn stack_capacity_is_only_a_hint() {
        let parser = Parser::new(ParserOptions {
            stack_capacity: 0,
            frame_capacity: 0,
            validate_escapes: false,
        });
        let v = parser.parse("[[[[{}]]]]").unwrap();
        assert_eq!(v, "[[[[{}]]]]");
    }
}
