//! `serde` support: a [`Value`] serializes as the JSON data it denotes, with
//! numbers converted and strings decoded.
use alloc::string::String;
use serde::{
    Serialize, Serializer,
    ser::{Error as _, SerializeMap, SerializeSeq},
};

use crate::{Lexeme, Lexical, Value, escape, memory::Allocator};

fn decode<E: serde::ser::Error>(raw: &[u8]) -> Result<String, E> {
    let mut out = alloc::vec::Vec::with_capacity(raw.len());
    escape::unescape(raw, |piece| out.extend_from_slice(piece)).map_err(E::custom)?;
    String::from_utf8(out).map_err(E::custom)
}

struct Decoded<'a, 'src, A: Allocator>(&'a Lexeme<'src, A>);

impl<A: Allocator> Serialize for Decoded<'_, '_, A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&decode::<S::Error>(self.0.as_bytes())?)
    }
}

impl<A: Allocator> Serialize for Value<'_, A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(_) | Value::NumberRef(_) => {
                let text = self.number_bytes().map_err(S::Error::custom)?;
                if let Ok(n) = text.to::<i64>() {
                    serializer.serialize_i64(n)
                } else if let Ok(n) = text.to::<u64>() {
                    serializer.serialize_u64(n)
                } else if let Ok(n) = text.to::<f64>() {
                    serializer.serialize_f64(n)
                } else {
                    Err(S::Error::custom(format_args!(
                        "invalid number {}",
                        bstr::BStr::new(text)
                    )))
                }
            }
            Value::String(lexeme) => Decoded(lexeme).serialize(serializer),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for member in members {
                    map.serialize_entry(&Decoded(&member.key), &member.value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;

    #[test]
    fn matches_serde_json() {
        let v = parse(r#"{"a":[1,-2,3.5,18446744073709551615],"b\n":"x\ty","c":null,"d":false}"#)
            .unwrap();
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "a": [1, -2, 3.5, 18_446_744_073_709_551_615_u64],
                "b\n": "x\ty",
                "c": null,
                "d": false,
            })
        );
    }

    #[test]
    fn invalid_number_is_an_error() {
        let v = parse("[abc]").unwrap();
        assert!(serde_json::to_string(&v).is_err());
    }
}
