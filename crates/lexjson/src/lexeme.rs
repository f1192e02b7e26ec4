use bstr::BStr;
use core::{fmt, ops::Deref};

use crate::{
    memory::{Allocator, Heap},
    text::Text,
};

/// The payload of a key, a string, or a number the parser produced: either a
/// view into the source buffer or text owned by an allocator.
pub enum Lexeme<'a, A: Allocator = Heap> {
    Borrowed(&'a [u8]),
    Owned(Text<A>),
}

impl<A: Allocator> Lexeme<'_, A> {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Borrowed(bytes) => bytes,
            Self::Owned(text) => text.as_bytes(),
        }
    }

    #[must_use]
    pub fn as_bstr(&self) -> &BStr {
        BStr::new(self.as_bytes())
    }

    #[must_use]
    pub const fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }

    /// Detaches the lexeme from its source by copying borrowed bytes into
    /// `alloc`. Owned text is kept as is.
    #[must_use]
    pub fn into_static(self, alloc: &A) -> Lexeme<'static, A> {
        match self {
            Self::Borrowed(bytes) => Lexeme::Owned(Text::from_bytes_in(bytes, alloc.clone())),
            Self::Owned(text) => Lexeme::Owned(text),
        }
    }
}

impl<A: Allocator> Deref for Lexeme<'_, A> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<A: Allocator> Clone for Lexeme<'_, A> {
    fn clone(&self) -> Self {
        match self {
            Self::Borrowed(bytes) => Self::Borrowed(bytes),
            Self::Owned(text) => Self::Owned(text.clone()),
        }
    }
}

impl<'a, A: Allocator> From<&'a str> for Lexeme<'a, A> {
    fn from(s: &'a str) -> Self {
        Self::Borrowed(s.as_bytes())
    }
}

impl<'a, A: Allocator> From<&'a [u8]> for Lexeme<'a, A> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Borrowed(bytes)
    }
}

impl<A: Allocator> From<Text<A>> for Lexeme<'_, A> {
    fn from(text: Text<A>) -> Self {
        Self::Owned(text)
    }
}

impl<A: Allocator, B: Allocator> PartialEq<Lexeme<'_, B>> for Lexeme<'_, A> {
    fn eq(&self, other: &Lexeme<'_, B>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator> Eq for Lexeme<'_, A> {}

impl<A: Allocator> PartialEq<str> for Lexeme<'_, A> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator> PartialEq<&str> for Lexeme<'_, A> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<A: Allocator> PartialEq<[u8]> for Lexeme<'_, A> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl<A: Allocator> fmt::Debug for Lexeme<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_bstr(), f)
    }
}

impl<A: Allocator> fmt::Display for Lexeme<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_bstr(), f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::*;

    #[test]
    fn borrowed_and_owned_compare_by_bytes() {
        let borrowed: Lexeme<'_> = "key".into();
        let owned: Lexeme<'_> = Text::from_bytes(b"key").into();
        assert!(borrowed.is_borrowed());
        assert!(!owned.is_borrowed());
        assert_eq!(borrowed, owned);
        assert_eq!(borrowed, "key");
        assert_eq!(owned.to_string(), "key");
    }

    #[test]
    fn into_static_outlives_the_source() {
        let source = vec![b'a', b'b'];
        let lexeme: Lexeme<'_> = Lexeme::Borrowed(&source);
        let detached = lexeme.into_static(&Heap);
        drop(source);
        assert_eq!(detached, "ab");
        assert!(!detached.is_borrowed());
    }
}
