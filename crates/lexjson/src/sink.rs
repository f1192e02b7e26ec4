//! Byte sinks the serializer writes into.
use alloc::vec::Vec;
use bstr::BStr;
use core::{convert::Infallible, fmt};

use crate::{memory::Allocator, text::Text};

/// Destination for serialized bytes.
///
/// ```
/// use lexjson::{Sink, Value};
///
/// let v = lexjson::parse(r#"{"a":[1,true]}"#).unwrap();
/// let mut out = Vec::new();
/// v.write_to(&mut out).unwrap();
/// assert_eq!(out, br#"{"a":[1,true]}"#);
/// ```
pub trait Sink {
    type Error;

    /// Appends `bytes` to the output.
    ///
    /// # Errors
    ///
    /// Whatever the underlying destination reports.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl<A: Allocator> Sink for Text<A> {
    type Error = Infallible;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Infallible> {
        self.push_bytes(bytes);
        Ok(())
    }
}

impl Sink for Vec<u8> {
    type Error = Infallible;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Infallible> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    type Error = S::Error;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), S::Error> {
        (**self).write_bytes(bytes)
    }
}

/// Adapts any [`std::io::Write`] into a [`Sink`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSink<W>(pub W);

#[cfg(feature = "std")]
impl<W: std::io::Write> Sink for IoSink<W> {
    type Error = std::io::Error;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), std::io::Error> {
        self.0.write_all(bytes)
    }
}

/// Feeds serialized bytes to a formatter, lossily for non UTF-8 payloads.
pub(crate) struct FmtSink<'a, 'b>(pub(crate) &'a mut fmt::Formatter<'b>);

impl Sink for FmtSink<'_, '_> {
    type Error = fmt::Error;

    fn write_bytes(&mut self, bytes: &[u8]) -> fmt::Result {
        fmt::Display::fmt(BStr::new(bytes), self.0)
    }
}

/// Compares serialized bytes against expected text as they are produced.
/// Stops at the first mismatch; needs no buffer.
pub(crate) struct Matcher<'e> {
    expected: &'e [u8],
    pos: usize,
}

pub(crate) struct Mismatch;

impl<'e> Matcher<'e> {
    pub(crate) const fn new(expected: &'e [u8]) -> Self {
        Self { expected, pos: 0 }
    }

    pub(crate) const fn is_complete(&self) -> bool {
        self.pos == self.expected.len()
    }
}

impl Sink for Matcher<'_> {
    type Error = Mismatch;

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Mismatch> {
        if self.expected[self.pos..].starts_with(bytes) {
            self.pos += bytes.len();
            Ok(())
        } else {
            Err(Mismatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matcher_tracks_prefix() {
        let mut m = Matcher::new(b"abc");
        assert!(m.write_bytes(b"ab").is_ok());
        assert!(!m.is_complete());
        assert!(m.write_bytes(b"cd").is_err());
        assert!(m.write_bytes(b"c").is_ok());
        assert!(m.is_complete());
        assert!(m.write_bytes(b"x").is_err());
    }
}
