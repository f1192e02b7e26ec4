//! A zero-copy JSON value model with an iterative, allocator-aware parser.
//!
//! [`parse`] reads a document into a [`Value`] tree without converting
//! anything: numbers keep their digits, strings keep their escapes, and both
//! borrow the input buffer unless a copying [`MemoryPolicy`] is chosen.
//! Conversion happens when a value is read through [`Value::get`].
//!
//! ```rust
//! use lexjson::Value;
//!
//! let src = r#"{"user":{"name":"Ada","langs":["en","fr"],"age":36}}"#;
//! let mut doc = lexjson::parse(src).unwrap();
//!
//! assert_eq!(doc["user"]["age"].get::<u32>(), Ok(36));
//! assert_eq!(doc["user"]["langs"][1].get::<String>().unwrap(), "fr");
//! assert_eq!(doc["user"]["email"].get_or("none"), Ok("none"));
//!
//! doc["user"]["age"] = Value::from(37);
//! assert_eq!(doc.to_string(), r#"{"user":{"name":"Ada","langs":["en","fr"],"age":37}}"#);
//! ```
//!
//! Trees can live in an [`Arena`] instead of the global heap, so that a whole
//! document is released at once:
//!
//! ```rust
//! let arena = lexjson::Arena::new();
//! let doc = lexjson::parse_in("[1,2,3]", &arena).unwrap();
//! assert_eq!(doc[2].get::<u8>(), Ok(3));
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod error;
mod escape;
mod lexeme;
mod memory;
mod options;
mod parser;
mod sink;
mod text;
mod value;
mod vector;

#[cfg(feature = "std")]
mod file;
#[cfg(any(test, feature = "serde"))]
mod ser;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, ParseError, ValueError};
pub use escape::{escape_into, unescape};
pub use lexeme::Lexeme;
pub use memory::{Allocator, Arena, DEFAULT_CHUNK_SIZE, Heap};
pub use options::ParserOptions;
pub use parser::{CopyPolicy, MemoryPolicy, Parser, ViewPolicy, parse, parse_in, parse_into, parse_owned};
pub use sink::Sink;
pub use text::{Lexical, Text, TextFormat, TextParse};
pub use value::{Array, FromValue, Member, Object, Value, ValueType};
pub use vector::{IntoIter, Vector};

#[cfg(feature = "std")]
pub use file::{parse_file, parse_file_with, parse_reader};
#[cfg(feature = "std")]
pub use sink::IoSink;
