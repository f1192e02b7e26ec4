#![no_main]

use arbitrary::Arbitrary;
use lexjson::{Arena, Parser, ParserOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    frame_capacity: u8,
    stack_capacity: u8,
    validate_escapes: bool,
    data: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    let options = ParserOptions {
        frame_capacity: usize::from(input.frame_capacity),
        stack_capacity: usize::from(input.stack_capacity),
        validate_escapes: input.validate_escapes,
    };
    let parser = Parser::new(options);
    let view = parser.parse(input.data);
    let copy = parser.parse_owned(input.data);

    let arena = Arena::with_capacity(256);
    let in_arena = Parser::new_in(options, &arena).parse(input.data);

    match (&view, &copy, &in_arena) {
        (Ok(view), Ok(copy), Ok(in_arena)) => {
            assert_eq!(view, copy);
            assert_eq!(view, in_arena);

            // Serialized output parses back to the same tree.
            let text = view.to_bytes();
            let again = parser.parse(&text).expect("serialized output must parse");
            assert_eq!(&again, view);
            assert_eq!(again.to_bytes(), text);
        }
        (Err(a), Err(b), Err(c)) => {
            assert_eq!(a, b);
            assert_eq!(a, c);
            assert!(a.offset() <= input.data.len());
        }
        _ => panic!("policies disagree: {view:?} / {copy:?} / {in_arena:?}"),
    }

    // Whatever strict JSON accepts with a container root is accepted here too.
    if let Ok(strict) = serde_json::from_slice::<serde_json::Value>(input.data) {
        if strict.is_object() || strict.is_array() {
            assert!(view.is_ok(), "rejected valid JSON: {view:?}");
        }
    }
});
