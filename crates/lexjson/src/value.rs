//! JSON value types.
//!
//! This module defines the [`Value`] enum. Scalars are kept in the form they
//! were written in: numbers as text, strings with their escapes intact. Typed
//! access decodes on demand through [`Value::get`].
use alloc::{string::String, vec::Vec};
use bstr::{BStr, BString};
use core::{
    fmt, mem,
    ops::{Index, IndexMut},
};

use crate::{
    error::ValueError,
    escape,
    lexeme::Lexeme,
    memory::{Allocator, Heap},
    sink::{FmtSink, Matcher, Sink},
    text::{Lexical, Text, TextFormat},
    vector::Vector,
};

/// The elements of a [`Value::Array`].
pub type Array<'src, A = Heap> = Vector<Value<'src, A>, A>;
/// The members of a [`Value::Object`], in document order.
pub type Object<'src, A = Heap> = Vector<Member<'src, A>, A>;

/// A JSON value as defined by [RFC 8259].
///
/// The `Value` enum can represent any JSON data type:
///
/// - Null
/// - Boolean
/// - Number, either formatted in code ([`Number`]) or sliced from the input
///   by the parser ([`NumberRef`])
/// - String
/// - Array
/// - Object, an ordered list of members where duplicate keys are kept
///
/// `'src` is the lifetime of the buffer borrowed payloads point into and `A`
/// the allocator every owned part lives in.
///
/// # Examples
///
/// ```
/// use lexjson::Value;
///
/// let v = lexjson::parse(r#"{"name":"lex","tags":[1,2.5,true,null]}"#).unwrap();
/// assert_eq!(v["name"].get::<&str>(), Ok("lex"));
/// assert_eq!(v["tags"][1].get::<f64>(), Ok(2.5));
/// assert!(v["tags"][3].is_null());
/// assert_eq!(v, r#"{"name":"lex","tags":[1,2.5,true,null]}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
/// [`Number`]: Value::Number
/// [`NumberRef`]: Value::NumberRef
#[derive(Clone, Debug)]
pub enum Value<'src, A: Allocator = Heap> {
    Null,
    Boolean(bool),
    /// A number formatted into owned text.
    Number(Text<A>),
    /// A number exactly as it appeared in the input. Not validated.
    NumberRef(Lexeme<'src, A>),
    /// A string payload without its quotes, escapes not yet decoded.
    String(Lexeme<'src, A>),
    Array(Array<'src, A>),
    Object(Object<'src, A>),
}

/// One `key: value` entry of an object.
#[derive(Clone, Debug)]
pub struct Member<'src, A: Allocator = Heap> {
    /// The key payload, escapes not yet decoded.
    pub key: Lexeme<'src, A>,
    pub value: Value<'src, A>,
}

/// The kind of a [`Value`]. Both number variants report [`ValueType::Number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

/// Typed extraction from a [`Value`], see [`Value::get`].
pub trait FromValue<'v, 'src, A: Allocator>: Sized {
    /// # Errors
    ///
    /// A type mismatch error for the wrong family of value, or a conversion
    /// error when the payload is not a valid `Self`.
    fn from_value(value: &'v Value<'src, A>) -> Result<Self, ValueError>;
}

macro_rules! number_conversions {
    ($($t:ty),* $(,)?) => {$(
        impl<'v, 'src, A: Allocator> FromValue<'v, 'src, A> for $t {
            fn from_value(value: &'v Value<'src, A>) -> Result<Self, ValueError> {
                value.number_bytes()?.to::<$t>()
            }
        }

        /// NaN and the infinities have no JSON form and become `Null`.
        impl<A: Allocator + Default> From<$t> for Value<'_, A> {
            fn from(n: $t) -> Self {
                if TextFormat::is_finite(n) {
                    Self::Number(Text::render_in(n, A::default()))
                } else {
                    Self::Null
                }
            }
        }
    )*};
}

number_conversions!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<'v, 'src, A: Allocator> FromValue<'v, 'src, A> for bool {
    fn from_value(value: &'v Value<'src, A>) -> Result<Self, ValueError> {
        match value {
            Value::Boolean(b) => Ok(*b),
            _ => Err(ValueError::NotBoolean),
        }
    }
}

/// The raw payload, escapes included.
impl<'v, 'src, A: Allocator> FromValue<'v, 'src, A> for &'v [u8] {
    fn from_value(value: &'v Value<'src, A>) -> Result<Self, ValueError> {
        value.string_bytes()
    }
}

/// The raw payload, escapes included.
impl<'v, 'src, A: Allocator> FromValue<'v, 'src, A> for &'v BStr {
    fn from_value(value: &'v Value<'src, A>) -> Result<Self, ValueError> {
        value.string_bytes().map(BStr::new)
    }
}

/// The raw payload, escapes included.
impl<'v, 'src, A: Allocator> FromValue<'v, 'src, A> for &'v str {
    fn from_value(value: &'v Value<'src, A>) -> Result<Self, ValueError> {
        core::str::from_utf8(value.string_bytes()?).map_err(|_| ValueError::InvalidUtf8)
    }
}

/// The decoded string.
impl<'v, 'src, A: Allocator> FromValue<'v, 'src, A> for BString {
    fn from_value(value: &'v Value<'src, A>) -> Result<Self, ValueError> {
        let mut out = Vec::new();
        escape::unescape(value.string_bytes()?, |piece| out.extend_from_slice(piece))?;
        Ok(BString::from(out))
    }
}

/// The decoded string.
impl<'v, 'src, A: Allocator> FromValue<'v, 'src, A> for String {
    fn from_value(value: &'v Value<'src, A>) -> Result<Self, ValueError> {
        let bytes = BString::from_value(value)?;
        String::from_utf8(bytes.into()).map_err(|_| ValueError::InvalidUtf8)
    }
}

/// The decoded string, in a fresh `B`.
impl<'v, 'src, A: Allocator, B: Allocator + Default> FromValue<'v, 'src, A> for Text<B> {
    fn from_value(value: &'v Value<'src, A>) -> Result<Self, ValueError> {
        let raw = value.string_bytes()?;
        let mut out = Text::with_capacity_in(raw.len(), B::default());
        escape::unescape(raw, |piece| out.push_bytes(piece))?;
        Ok(out)
    }
}

impl<'src> Value<'src, Heap> {
    /// Builds an object on the heap; members keep the given order.
    ///
    /// ```
    /// use lexjson::Value;
    ///
    /// let v = Value::object([("a", Value::from(1)), ("b", Value::array([Value::Null]))]);
    /// assert_eq!(v, r#"{"a":1,"b":[null]}"#);
    /// ```
    pub fn object<K, I>(pairs: I) -> Self
    where
        K: Into<Lexeme<'src>>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::object_in(pairs, Heap)
    }

    /// Builds a heap array from `items`, moving them in.
    pub fn array<I: IntoIterator<Item = Self>>(items: I) -> Self {
        Self::array_in(items, Heap)
    }

    /// See [`Value::escaped_in`].
    #[must_use]
    pub fn escaped(text: &str) -> Self {
        Self::escaped_in(text, Heap)
    }
}

impl<'src, A: Allocator> Value<'src, A> {
    /// [`Value::object`] in `alloc`. Keys are converted with `Into`, so
    /// borrowed keys stay borrowed.
    pub fn object_in<K, I>(pairs: I, alloc: A) -> Self
    where
        K: Into<Lexeme<'src, A>>,
        I: IntoIterator<Item = (K, Self)>,
    {
        let mut members = Vector::new_in(alloc);
        members.extend(pairs.into_iter().map(|(key, value)| Member {
            key: key.into(),
            value,
        }));
        Self::Object(members)
    }

    pub fn array_in<I: IntoIterator<Item = Self>>(items: I, alloc: A) -> Self {
        let mut out = Vector::new_in(alloc);
        out.extend(items);
        Self::Array(out)
    }

    /// Formats `n` into a [`Value::Number`] owned by `alloc`.
    ///
    /// # Errors
    ///
    /// See [`Text::format_in`].
    pub fn number_in<T: TextFormat>(n: T, alloc: A) -> Result<Self, ValueError> {
        Text::format_in(n, alloc).map(Self::Number)
    }

    /// Copies `payload` as a string. The text is stored verbatim and must
    /// already be valid JSON string content.
    pub fn string_in(payload: &str, alloc: A) -> Self {
        Self::String(Lexeme::Owned(Text::from_bytes_in(payload.as_bytes(), alloc)))
    }

    /// Stores plain `text` as a string, escaping what JSON requires, so that
    /// `get::<String>()` returns `text` again.
    ///
    /// ```
    /// use lexjson::Value;
    ///
    /// let v = Value::escaped("say \"hi\"\n");
    /// assert_eq!(v, r#""say \"hi\"\u000A""#);
    /// assert_eq!(v.get::<String>().unwrap(), "say \"hi\"\n");
    /// ```
    pub fn escaped_in(text: &str, alloc: A) -> Self {
        let mut payload = Text::with_capacity_in(text.len(), alloc);
        let Ok(()) = escape::escape_into(text, &mut payload);
        Self::String(Lexeme::Owned(payload))
    }

    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Number(_) | Self::NumberRef(_) => ValueType::Number,
            Self::String(_) => ValueType::String,
            Self::Array(_) => ValueType::Array,
            Self::Object(_) => ValueType::Object,
        }
    }

    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[doc(alias = "is_boolean")]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` for both [`Number`] and [`NumberRef`].
    ///
    /// [`Number`]: Value::Number
    /// [`NumberRef`]: Value::NumberRef
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(..) | Self::NumberRef(..))
    }

    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    pub(crate) fn number_bytes(&self) -> Result<&[u8], ValueError> {
        match self {
            Self::Number(text) => Ok(text.as_bytes()),
            Self::NumberRef(lexeme) => Ok(lexeme.as_bytes()),
            _ => Err(ValueError::NotNumber),
        }
    }

    fn string_bytes(&self) -> Result<&[u8], ValueError> {
        match self {
            Self::String(lexeme) => Ok(lexeme.as_bytes()),
            _ => Err(ValueError::NotString),
        }
    }

    /// Reads the value as `T`.
    ///
    /// Numbers convert to any primitive numeric type, booleans to `bool`.
    /// Strings come out raw as `&str`, `&[u8]` or `&BStr`, and decoded as
    /// `String`, `BString` or [`Text`].
    ///
    /// ```
    /// let v = lexjson::parse(r#"[300,"a\tb"]"#).unwrap();
    /// assert_eq!(v[0].get::<u16>(), Ok(300));
    /// assert!(v[0].get::<u8>().is_err());
    /// assert!(v[0].get::<bool>().is_err());
    /// assert_eq!(v[1].get::<&str>(), Ok(r"a\tb"));
    /// assert_eq!(v[1].get::<String>().unwrap(), "a\tb");
    /// ```
    ///
    /// # Errors
    ///
    /// [`ValueError::NotNumber`], [`ValueError::NotBoolean`] or
    /// [`ValueError::NotString`] when the value belongs to another family,
    /// [`ValueError::BadConversion`] when the text is not a valid `T`, and the
    /// escape errors of [`unescape`](crate::unescape) for decoded strings.
    pub fn get<'v, T: FromValue<'v, 'src, A>>(&'v self) -> Result<T, ValueError> {
        T::from_value(self)
    }

    /// Like [`get`](Value::get), but a `Null` value yields `default`.
    ///
    /// # Errors
    ///
    /// As [`get`](Value::get) for every non-null value.
    pub fn get_or<'v, T: FromValue<'v, 'src, A>>(&'v self, default: T) -> Result<T, ValueError> {
        if self.is_null() {
            Ok(default)
        } else {
            self.get()
        }
    }

    /// # Errors
    ///
    /// [`ValueError::NotObject`] for any other kind of value.
    pub fn as_object(&self) -> Result<&Object<'src, A>, ValueError> {
        match self {
            Self::Object(members) => Ok(members),
            _ => Err(ValueError::NotObject),
        }
    }

    /// # Errors
    ///
    /// [`ValueError::NotObject`] for any other kind of value.
    pub fn as_object_mut(&mut self) -> Result<&mut Object<'src, A>, ValueError> {
        match self {
            Self::Object(members) => Ok(members),
            _ => Err(ValueError::NotObject),
        }
    }

    /// # Errors
    ///
    /// [`ValueError::NotArray`] for any other kind of value.
    pub fn as_array(&self) -> Result<&Array<'src, A>, ValueError> {
        match self {
            Self::Array(items) => Ok(items),
            _ => Err(ValueError::NotArray),
        }
    }

    /// # Errors
    ///
    /// [`ValueError::NotArray`] for any other kind of value.
    pub fn as_array_mut(&mut self) -> Result<&mut Array<'src, A>, ValueError> {
        match self {
            Self::Array(items) => Ok(items),
            _ => Err(ValueError::NotArray),
        }
    }

    /// Looks up the first member whose raw key equals `key`. An absent key
    /// yields a shared `Null`.
    ///
    /// # Errors
    ///
    /// [`ValueError::NotObject`] if the value is not an object.
    pub fn get_key(&self, key: &str) -> Result<&Self, ValueError> {
        Ok(self
            .as_object()?
            .iter()
            .find(|m| m.key == *key)
            .map_or(&Self::Null, |m| &m.value))
    }

    /// Returns the first member named `key`, appending a `Null` one when
    /// there is none. The new key is copied into the object's allocator.
    ///
    /// ```
    /// use lexjson::Value;
    ///
    /// let mut v = lexjson::parse("{}").unwrap();
    /// *v.entry("k").unwrap() = Value::from(1);
    /// *v.entry("k").unwrap() = Value::from(2);
    /// assert_eq!(v, r#"{"k":2}"#);
    /// ```
    ///
    /// # Errors
    ///
    /// [`ValueError::NotObject`] if the value is not an object.
    pub fn entry(&mut self, key: &str) -> Result<&mut Self, ValueError> {
        let members = self.as_object_mut()?;
        let at = if let Some(at) = members.iter().position(|m| m.key == *key) {
            at
        } else {
            let key = Text::from_bytes_in(key.as_bytes(), members.allocator().clone());
            members.push(Member {
                key: Lexeme::Owned(key),
                value: Self::Null,
            });
            members.len() - 1
        };
        Ok(&mut members[at].value)
    }

    /// # Errors
    ///
    /// [`ValueError::NotArray`] or [`ValueError::IndexOutOfRange`].
    pub fn get_index(&self, index: usize) -> Result<&Self, ValueError> {
        self.as_array()?.at(index)
    }

    /// # Errors
    ///
    /// [`ValueError::NotArray`] or [`ValueError::IndexOutOfRange`].
    pub fn get_index_mut(&mut self, index: usize) -> Result<&mut Self, ValueError> {
        self.as_array_mut()?.at_mut(index)
    }

    /// Moves the value out, leaving `Null` behind.
    #[must_use]
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    /// Copies every borrowed payload into `alloc`, detaching the tree from
    /// the buffer it was parsed from.
    #[must_use]
    pub fn into_static(mut self, alloc: &A) -> Value<'static, A> {
        match &mut self {
            Self::Null => Value::Null,
            Self::Boolean(b) => Value::Boolean(*b),
            Self::Number(text) => Value::Number(mem::replace(text, Text::new_in(alloc.clone()))),
            Self::NumberRef(lexeme) => Value::NumberRef(take_lexeme(lexeme).into_static(alloc)),
            Self::String(lexeme) => Value::String(take_lexeme(lexeme).into_static(alloc)),
            Self::Array(items) => {
                let items = mem::replace(items, Vector::new_in(alloc.clone()));
                let mut out = Vector::with_capacity_in(items.len(), items.allocator().clone());
                out.extend(items.into_iter().map(|item| item.into_static(alloc)));
                Value::Array(out)
            }
            Self::Object(members) => {
                let members = mem::replace(members, Vector::new_in(alloc.clone()));
                let mut out = Vector::with_capacity_in(members.len(), members.allocator().clone());
                out.extend(members.into_iter().map(|m| Member {
                    key: m.key.into_static(alloc),
                    value: m.value.into_static(alloc),
                }));
                Value::Object(out)
            }
        }
    }

    /// Whether dropping this value would recurse more than one level.
    fn has_nested_containers(&self) -> bool {
        match self {
            Self::Array(items) => items.iter().any(Self::is_nonempty_container),
            Self::Object(members) => members.iter().any(|m| m.value.is_nonempty_container()),
            _ => false,
        }
    }

    fn is_nonempty_container(&self) -> bool {
        match self {
            Self::Array(items) => !items.is_empty(),
            Self::Object(members) => !members.is_empty(),
            _ => false,
        }
    }

    /// Moves the direct children out, leaving an empty container behind.
    fn detach_children(&mut self, into: &mut Vec<Self>) {
        match self {
            Self::Array(items) => {
                let alloc = items.allocator().clone();
                into.extend(mem::replace(items, Vector::new_in(alloc)));
            }
            Self::Object(members) => {
                let alloc = members.allocator().clone();
                let members = mem::replace(members, Vector::new_in(alloc));
                into.extend(members.into_iter().map(|m| m.value));
            }
            _ => {}
        }
    }

    /// Serializes the value in compact form: no whitespace, payloads written
    /// exactly as stored.
    ///
    /// # Errors
    ///
    /// Whatever the sink reports.
    pub fn write_to<S: Sink + ?Sized>(&self, out: &mut S) -> Result<(), S::Error> {
        match self {
            Self::Null => out.write_bytes(b"null"),
            Self::Boolean(true) => out.write_bytes(b"true"),
            Self::Boolean(false) => out.write_bytes(b"false"),
            Self::Number(text) => out.write_bytes(text.as_bytes()),
            Self::NumberRef(lexeme) => out.write_bytes(lexeme.as_bytes()),
            Self::String(lexeme) => write_quoted(lexeme.as_bytes(), out),
            Self::Array(items) => {
                out.write_bytes(b"[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.write_bytes(b",")?;
                    }
                    item.write_to(out)?;
                }
                out.write_bytes(b"]")
            }
            Self::Object(members) => {
                out.write_bytes(b"{")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        out.write_bytes(b",")?;
                    }
                    write_quoted(member.key.as_bytes(), out)?;
                    out.write_bytes(b":")?;
                    member.value.write_to(out)?;
                }
                out.write_bytes(b"}")
            }
        }
    }

    /// Serializes into a fresh [`Text`] owned by `alloc`.
    pub fn to_text_in<B: Allocator>(&self, alloc: B) -> Text<B> {
        let mut text = Text::new_in(alloc);
        let Ok(()) = self.write_to(&mut text);
        text
    }

    #[must_use]
    pub fn to_text(&self) -> Text {
        self.to_text_in(Heap)
    }

    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        let Ok(()) = self.write_to(&mut out);
        out
    }
}

fn take_lexeme<'src, A: Allocator>(lexeme: &mut Lexeme<'src, A>) -> Lexeme<'src, A> {
    mem::replace(lexeme, Lexeme::Borrowed(&[]))
}

fn write_quoted<S: Sink + ?Sized>(payload: &[u8], out: &mut S) -> Result<(), S::Error> {
    out.write_bytes(b"\"")?;
    out.write_bytes(payload)?;
    out.write_bytes(b"\"")
}

/// Tears nested containers down level by level so that dropping a deep tree
/// does not grow the call stack.
impl<A: Allocator> Drop for Value<'_, A> {
    fn drop(&mut self) {
        if !self.has_nested_containers() {
            return;
        }
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut value) = pending.pop() {
            value.detach_children(&mut pending);
        }
    }
}

impl<A: Allocator> Default for Value<'_, A> {
    fn default() -> Self {
        Self::Null
    }
}

impl<A: Allocator> From<bool> for Value<'_, A> {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// A borrowed string payload, stored verbatim.
impl<'src, A: Allocator> From<&'src str> for Value<'src, A> {
    fn from(payload: &'src str) -> Self {
        Self::String(Lexeme::Borrowed(payload.as_bytes()))
    }
}

/// A borrowed string payload, stored verbatim.
impl<'src, A: Allocator> From<&'src [u8]> for Value<'src, A> {
    fn from(payload: &'src [u8]) -> Self {
        Self::String(Lexeme::Borrowed(payload))
    }
}

/// An owned string payload, stored verbatim.
impl<A: Allocator> From<Text<A>> for Value<'_, A> {
    fn from(payload: Text<A>) -> Self {
        Self::String(Lexeme::Owned(payload))
    }
}

impl<'src, A: Allocator> From<Array<'src, A>> for Value<'src, A> {
    fn from(items: Array<'src, A>) -> Self {
        Self::Array(items)
    }
}

impl<'src, A: Allocator> From<Object<'src, A>> for Value<'src, A> {
    fn from(members: Object<'src, A>) -> Self {
        Self::Object(members)
    }
}

impl<'src, A: Allocator> Index<&str> for Value<'src, A> {
    type Output = Value<'src, A>;

    /// # Panics
    ///
    /// Panics if the value is not an object. Absent keys yield `Null`.
    fn index(&self, key: &str) -> &Self::Output {
        match self.get_key(key) {
            Ok(value) => value,
            Err(e) => panic!("cannot index with key {key:?}: {e}"),
        }
    }
}

impl<A: Allocator> IndexMut<&str> for Value<'_, A> {
    /// # Panics
    ///
    /// Panics if the value is not an object. Absent keys are inserted.
    fn index_mut(&mut self, key: &str) -> &mut Self::Output {
        match self.entry(key) {
            Ok(value) => value,
            Err(e) => panic!("cannot index with key {key:?}: {e}"),
        }
    }
}

impl<'src, A: Allocator> Index<usize> for Value<'src, A> {
    type Output = Value<'src, A>;

    /// # Panics
    ///
    /// Panics if the value is not an array or `index` is out of range.
    fn index(&self, index: usize) -> &Self::Output {
        match self.get_index(index) {
            Ok(value) => value,
            Err(e) => panic!("cannot index with {index}: {e}"),
        }
    }
}

impl<A: Allocator> IndexMut<usize> for Value<'_, A> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.get_index_mut(index) {
            Ok(value) => value,
            Err(e) => panic!("cannot index with {index}: {e}"),
        }
    }
}

impl<A: Allocator> fmt::Display for Value<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(&mut FmtSink(f))
    }
}

/// Compares the serialized form against `expected` without allocating.
impl<A: Allocator> PartialEq<[u8]> for Value<'_, A> {
    fn eq(&self, expected: &[u8]) -> bool {
        let mut matcher = Matcher::new(expected);
        self.write_to(&mut matcher).is_ok() && matcher.is_complete()
    }
}

impl<A: Allocator> PartialEq<str> for Value<'_, A> {
    fn eq(&self, expected: &str) -> bool {
        *self == *expected.as_bytes()
    }
}

impl<A: Allocator> PartialEq<&str> for Value<'_, A> {
    fn eq(&self, expected: &&str) -> bool {
        *self == *expected.as_bytes()
    }
}

/// Structural equality. Numbers compare by their text, so `Number` and
/// `NumberRef` with the same digits are equal, while `1` and `1.0` are not.
impl<A: Allocator, B: Allocator> PartialEq<Value<'_, B>> for Value<'_, A> {
    fn eq(&self, other: &Value<'_, B>) -> bool {
        let mut pending = Vec::new();
        let (mut a, mut b) = (self, other);
        loop {
            let same = match (a, b) {
                (Value::Null, Value::Null) => true,
                (Value::Boolean(x), Value::Boolean(y)) => x == y,
                (
                    Value::Number(_) | Value::NumberRef(_),
                    Value::Number(_) | Value::NumberRef(_),
                ) => a.number_bytes().ok() == b.number_bytes().ok(),
                (Value::String(x), Value::String(y)) => x == y,
                (Value::Array(x), Value::Array(y)) => {
                    pending.extend(x.iter().zip(y.iter()));
                    x.len() == y.len()
                }
                (Value::Object(x), Value::Object(y)) => {
                    pending.extend(x.iter().zip(y.iter()).map(|(m, n)| (&m.value, &n.value)));
                    x.len() == y.len() && x.iter().zip(y.iter()).all(|(m, n)| m.key == n.key)
                }
                _ => false,
            };
            if !same {
                return false;
            }
            match pending.pop() {
                Some((x, y)) => (a, b) = (x, y),
                None => return true,
            }
        }
    }
}

impl<A: Allocator, B: Allocator> PartialEq<Member<'_, B>> for Member<'_, A> {
    fn eq(&self, other: &Member<'_, B>) -> bool {
        self.key == other.key && self.value == other.value
    }
}
