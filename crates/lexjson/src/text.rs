//! Lexical text: byte views, an owned growable buffer, and conversion between
//! text and numbers or booleans.
//!
//! Numbers are never converted while parsing. They stay in their lexical form
//! and are only turned into a Rust number when asked for, through
//! [`Lexical::to`] on a view or [`Text::to`] on an owned buffer.
//!
//! ```
//! use lexjson::{Lexical, Text};
//!
//! assert_eq!("42".to::<i32>(), Ok(42));
//! assert!("42x".to::<i32>().is_err());
//!
//! let t = Text::format(2.5_f64).unwrap();
//! assert_eq!(t, "2.5");
//! assert_eq!(Text::format(true).unwrap(), "true");
//! ```
use bstr::BStr;
use core::{fmt, hash};

use crate::{
    error::ValueError,
    memory::{Allocator, Heap},
    vector::Vector,
};

/// Size of the scratch buffer numbers are formatted into.
const SCRATCH_LEN: usize = lexical_core::BUFFER_SIZE;

mod sealed {
    pub trait Sealed {}
}

/// Types that can be read from their lexical form.
pub trait TextParse: Sized + sealed::Sealed {
    /// Parses the whole of `bytes`.
    ///
    /// # Errors
    ///
    /// [`ValueError::BadConversion`] on empty input, trailing garbage or
    /// out-of-range values.
    fn parse_text(bytes: &[u8]) -> Result<Self, ValueError>;
}

/// Types that can be written in lexical form.
pub trait TextFormat: Copy + sealed::Sealed {
    /// Upper bound on the length of the formatted text.
    const MAX_LEN: usize;

    /// Whether the value has a JSON spelling. `false` only for NaN and the
    /// infinities.
    fn is_finite(self) -> bool {
        true
    }

    #[doc(hidden)]
    fn write_text(self, scratch: &mut [u8; SCRATCH_LEN]) -> &[u8];
}

fn integer_is_finite<T>(_: T) -> bool {
    true
}

macro_rules! lexical_numbers {
    ($finite:path; $($t:ty),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl TextParse for $t {
            fn parse_text(bytes: &[u8]) -> Result<Self, ValueError> {
                lexical_core::parse::<$t>(bytes).map_err(|_| ValueError::BadConversion)
            }
        }

        impl TextFormat for $t {
            const MAX_LEN: usize = <$t as lexical_core::FormattedSize>::FORMATTED_SIZE;

            fn is_finite(self) -> bool {
                $finite(self)
            }

            fn write_text(self, scratch: &mut [u8; SCRATCH_LEN]) -> &[u8] {
                lexical_core::write(self, scratch)
            }
        }
    )*};
}

lexical_numbers!(integer_is_finite; i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
lexical_numbers!(f32::is_finite; f32);
lexical_numbers!(f64::is_finite; f64);

impl sealed::Sealed for bool {}

impl TextParse for bool {
    fn parse_text(bytes: &[u8]) -> Result<Self, ValueError> {
        match bytes {
            b"true" => Ok(true),
            b"false" => Ok(false),
            _ => Err(ValueError::BadConversion),
        }
    }
}

impl TextFormat for bool {
    const MAX_LEN: usize = 5;

    fn write_text(self, scratch: &mut [u8; SCRATCH_LEN]) -> &[u8] {
        let text: &[u8] = if self { b"true" } else { b"false" };
        scratch[..text.len()].copy_from_slice(text);
        &scratch[..text.len()]
    }
}

/// Conversion of borrowed text into numbers and booleans.
pub trait Lexical {
    /// Parses the whole text as `T`.
    ///
    /// # Errors
    ///
    /// [`ValueError::BadConversion`] if the text is not exactly one `T`.
    fn to<T: TextParse>(&self) -> Result<T, ValueError>;
}

impl Lexical for [u8] {
    fn to<T: TextParse>(&self) -> Result<T, ValueError> {
        T::parse_text(self)
    }
}

impl Lexical for str {
    fn to<T: TextParse>(&self) -> Result<T, ValueError> {
        T::parse_text(self.as_bytes())
    }
}

impl Lexical for BStr {
    fn to<T: TextParse>(&self) -> Result<T, ValueError> {
        T::parse_text(self)
    }
}

/// An owned, growable byte string over an allocator.
///
/// The contents are usually UTF-8 but this is not enforced; display goes
/// through [`BStr`] and is lossy.
pub struct Text<A: Allocator = Heap> {
    bytes: Vector<u8, A>,
}

impl Text<Heap> {
    #[must_use]
    pub const fn new() -> Self {
        Self::new_in(Heap)
    }

    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_bytes_in(bytes, Heap)
    }

    /// Formats a number or boolean on the heap.
    ///
    /// # Errors
    ///
    /// See [`Text::format_in`].
    pub fn format<T: TextFormat>(value: T) -> Result<Self, ValueError> {
        Self::format_in(value, Heap)
    }
}

impl<A: Allocator> Text<A> {
    /// An empty text in `alloc`.
    pub const fn new_in(alloc: A) -> Self {
        Self {
            bytes: Vector::new_in(alloc),
        }
    }

    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        Self {
            bytes: Vector::with_capacity_in(capacity, alloc),
        }
    }

    pub fn from_bytes_in(bytes: &[u8], alloc: A) -> Self {
        let mut text = Self::with_capacity_in(bytes.len(), alloc);
        text.push_bytes(bytes);
        text
    }

    /// Formats a number or boolean into a buffer sized to fit exactly.
    ///
    /// # Errors
    ///
    /// [`ValueError::BadFormat`] for NaN and the infinities, or if `T` can
    /// need more room than the internal scratch buffer provides.
    pub fn format_in<T: TextFormat>(value: T, alloc: A) -> Result<Self, ValueError> {
        if T::MAX_LEN > SCRATCH_LEN || !value.is_finite() {
            return Err(ValueError::BadFormat);
        }
        Ok(Self::render_in(value, alloc))
    }

    pub(crate) fn render_in<T: TextFormat>(value: T, alloc: A) -> Self {
        const { assert!(T::MAX_LEN <= SCRATCH_LEN) };
        let mut scratch = [0_u8; SCRATCH_LEN];
        Self::from_bytes_in(value.write_text(&mut scratch), alloc)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    pub fn allocator(&self) -> &A {
        self.bytes.allocator()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.bytes.reserve(additional);
    }

    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        BStr::new(self.as_bytes())
    }

    /// Parses the whole buffer as `T`.
    ///
    /// # Errors
    ///
    /// [`ValueError::BadConversion`] if the text is not exactly one `T`.
    pub fn to<T: TextParse>(&self) -> Result<T, ValueError> {
        T::parse_text(self.as_bytes())
    }
}

impl<A: Allocator> Clone for Text<A> {
    fn clone(&self) -> Self {
        Self::from_bytes_in(self.as_bytes(), self.allocator().clone())
    }
}

impl<A: Allocator + Default> Default for Text<A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<A: Allocator> fmt::Write for Text<A> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_bytes(s.as_bytes());
        Ok(())
    }
}

impl<A: Allocator> fmt::Debug for Text<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_bstr(), f)
    }
}

impl<A: Allocator> fmt::Display for Text<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

impl<A: Allocator, B: Allocator> PartialEq<Text<B>> for Text<A> {
    fn eq(&self, other: &Text<B>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator> Eq for Text<A> {}

impl<A: Allocator> hash::Hash for Text<A> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl<A: Allocator> PartialEq<str> for Text<A> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator> PartialEq<&str> for Text<A> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator> PartialEq<[u8]> for Text<A> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl<A: Allocator> AsRef<[u8]> for Text<A> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
