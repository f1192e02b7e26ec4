#![expect(missing_docs)]

use lexjson::{Arena, CopyPolicy, Parser, ParserOptions, Value, ViewPolicy};
use rstest::rstest;

const DOC: &str = r#"{"id":7,"name":"arena","items":[{"k":"a\nb"},{"k":[1e3,-2]}]}"#;

#[test]
fn view_borrows_copy_owns() {
    let parser = Parser::default();
    let mut view = Value::Null;
    parser.parse_into::<ViewPolicy, _>(&mut view, DOC).unwrap();
    let Value::String(name) = &view["name"] else { panic!("not a string") };
    assert!(name.is_borrowed());

    let owned = {
        let buffer = DOC.to_owned();
        let mut out = Value::Null;
        parser.parse_into::<CopyPolicy, _>(&mut out, &buffer).unwrap();
        out
    };
    let Value::String(name) = &owned["name"] else { panic!("not a string") };
    assert!(!name.is_borrowed());
    assert_eq!(owned, view);
    assert_eq!(owned, DOC);
}

#[test]
fn into_static_detaches_a_view() {
    let buffer = DOC.to_owned();
    let view = lexjson::parse(&buffer).unwrap();
    let detached = view.into_static(&lexjson::Heap);
    drop(buffer);
    assert_eq!(detached["items"][0]["k"].get::<String>().unwrap(), "a\nb");
}

#[rstest]
#[case(64)]
#[case(4096)]
#[case(lexjson::DEFAULT_CHUNK_SIZE)]
fn arena_documents(#[case] chunk: usize) {
    let arena = Arena::with_capacity(chunk);
    let parser = Parser::new_in(ParserOptions::default(), &arena);
    let view = parser.parse(DOC).unwrap();
    let copy = parser.parse_owned(DOC).unwrap();
    assert_eq!(view, copy);
    assert_eq!(copy["items"][1]["k"][0].get::<f64>(), Ok(1000.0));
    assert!(arena.allocated_bytes() > 0);
    assert!(arena.allocated_bytes() <= arena.capacity());
}

#[test]
fn arena_reset_reuses_the_largest_chunk() {
    let mut arena = Arena::with_capacity(64);
    let first_capacity = {
        let v = lexjson::parse_in(DOC, &arena).unwrap();
        assert_eq!(v["id"].get::<u8>(), Ok(7));
        arena.capacity()
    };
    assert!(arena.chunk_count() > 1);

    arena.reset();
    assert_eq!(arena.chunk_count(), 1);
    assert_eq!(arena.allocated_bytes(), 0);
    assert!(arena.capacity() < first_capacity);

    let v = lexjson::parse_in("[[],{}]", &arena).unwrap();
    assert_eq!(v, "[[],{}]");
}

#[test]
fn edits_use_the_tree_allocator() {
    let arena = Arena::new();
    let mut v = lexjson::parse_in(DOC, &arena).unwrap();
    let used = arena.allocated_bytes();
    *v.entry("extra").unwrap() = Value::string_in("x", &arena);
    assert!(arena.allocated_bytes() > used);
    assert_eq!(v["extra"].get::<&str>(), Ok("x"));
    assert_eq!(v.to_text_in(&arena), v.to_string().as_str());
}

#[rstest]
#[case("[", "]")]
#[case(r#"{"k":"#, "}")]
fn deep_heap_trees_drop_and_compare(#[case] open: &str, #[case] close: &str) {
    const DEPTH: usize = 200_000;
    let src = format!("{}null{}", open.repeat(DEPTH), close.repeat(DEPTH));
    let view = lexjson::parse(&src).unwrap();
    let copy = lexjson::parse_owned(&src).unwrap();
    assert!(view == copy);
    drop(copy);
    drop(view);
}
