#![expect(missing_docs)]

use core::fmt::Write;

use lexjson::{Value, ValueType};

/// One line per node: depth, path step, type and compact text.
fn outline(v: &Value<'_>) -> String {
    fn walk(v: &Value<'_>, depth: usize, step: &str, out: &mut String) {
        let kind = match v.value_type() {
            ValueType::Null => "null",
            ValueType::Boolean => "boolean",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        };
        writeln!(out, "{:indent$}{step} {kind} {v}", "", indent = depth * 2).unwrap();
        if let Ok(items) = v.as_array() {
            for (i, item) in items.iter().enumerate() {
                walk(item, depth + 1, &format!("[{i}]"), out);
            }
        } else if let Ok(members) = v.as_object() {
            for member in members {
                walk(&member.value, depth + 1, &format!(".{}", member.key), out);
            }
        }
    }
    let mut out = String::new();
    walk(v, 0, "$", &mut out);
    out
}

#[test]
fn snapshot_outline() {
    let v = lexjson::parse(r#" { "k" : [1, 2.50, {"x":"y"}], "s":"he\"llo", "n":null, "t":true } "#)
        .unwrap();
    insta::assert_snapshot!(outline(&v), @r#"
    $ object {"k":[1,2.50,{"x":"y"}],"s":"he\"llo","n":null,"t":true}
      .k array [1,2.50,{"x":"y"}]
        [0] number 1
        [1] number 2.50
        [2] object {"x":"y"}
          .x string "y"
      .s string "he\"llo"
      .n null null
      .t boolean true
    "#);
}

#[test]
fn snapshot_debug() {
    let v = lexjson::parse(r#"{"a":[1,"x",null,false]}"#).unwrap();
    insta::assert_snapshot!(format!("{v:?}"), @r#"Object([Member { key: "a", value: Array([NumberRef("1"), String("x"), Null, Boolean(false)]) }])"#);
}

#[test]
fn snapshot_edited_document() {
    let mut v = lexjson::parse(r#"{"user":{"name":"Ada","tags":["a"]}}"#).unwrap();
    v["user"]["name"] = Value::escaped("Ada \"L\"");
    *v["user"].entry("age").unwrap() = Value::from(36);
    v["user"]["tags"].as_array_mut().unwrap().push(Value::from(2.5));
    *v.entry("active").unwrap() = Value::from(true);
    insta::assert_snapshot!(v, @r#"{"user":{"name":"Ada \"L\"","tags":["a",2.5],"age":36},"active":true}"#);
}

#[test]
fn snapshot_built_values() {
    let v = Value::object([
        ("empty_array", Value::array([])),
        ("empty_object", Value::object::<&str, _>([])),
        ("numbers", Value::array([Value::from(-7_i64), Value::from(0.1_f64), Value::from(u64::MAX)])),
        ("text", Value::from("raw \\n stays")),
    ]);
    insta::assert_snapshot!(v, @r#"{"empty_array":[],"empty_object":{},"numbers":[-7,0.1,18446744073709551615],"text":"raw \n stays"}"#);
}
