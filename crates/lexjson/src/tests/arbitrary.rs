use alloc::string::String;

use quickcheck::{Arbitrary, Gen};

use crate::{Lexeme, Text, Value, escape_into};

/// A finite `f64`, since JSON has no spelling for NaN or infinities.
#[derive(Debug, Clone, Copy)]
pub(crate) struct JsonNumber(pub f64);

impl Arbitrary for JsonNumber {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }

        Self(value)
    }
}

/// A heap-owned document whose root is an object or an array, together with
/// the plain text of every string in it, in document order.
#[derive(Debug, Clone)]
pub(crate) struct Document {
    pub root: Value<'static>,
    pub strings: alloc::vec::Vec<String>,
}

fn escaped(text: &str) -> Lexeme<'static> {
    let mut payload = Text::new();
    let Ok(()) = escape_into(text, &mut payload);
    Lexeme::Owned(payload)
}

fn gen_scalar(g: &mut Gen, strings: &mut alloc::vec::Vec<String>) -> Value<'static> {
    match usize::arbitrary(g) % 5 {
        0 => Value::Null,
        1 => Value::Boolean(bool::arbitrary(g)),
        2 => Value::from(i64::arbitrary(g)),
        3 => Value::from(JsonNumber::arbitrary(g).0),
        _ => {
            let s = String::arbitrary(g);
            let value = Value::escaped(&s);
            strings.push(s);
            value
        }
    }
}

fn gen_container(g: &mut Gen, depth: usize, strings: &mut alloc::vec::Vec<String>) -> Value<'static> {
    let len = usize::arbitrary(g) % 4;
    if bool::arbitrary(g) {
        let mut items = Value::array([]);
        for _ in 0..len {
            let item = gen_val(g, depth, strings);
            if let Ok(items) = items.as_array_mut() {
                items.push(item);
            }
        }
        items
    } else {
        let mut members = Value::object::<&str, _>([]);
        for _ in 0..len {
            let key = String::arbitrary(g);
            let key_lexeme = escaped(&key);
            strings.push(key);
            let value = gen_val(g, depth, strings);
            if let Ok(members) = members.as_object_mut() {
                members.push(crate::Member {
                    key: key_lexeme,
                    value,
                });
            }
        }
        members
    }
}

fn gen_val(g: &mut Gen, depth: usize, strings: &mut alloc::vec::Vec<String>) -> Value<'static> {
    if depth == 0 || usize::arbitrary(g) % 3 != 0 {
        gen_scalar(g, strings)
    } else {
        gen_container(g, depth - 1, strings)
    }
}

impl Arbitrary for Document {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut strings = alloc::vec::Vec::new();
        let root = gen_container(g, 3, &mut strings);
        Self { root, strings }
    }
}
