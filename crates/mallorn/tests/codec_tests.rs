//! Round-trip and failure laws for the tagged-value codec

use pretty_assertions::assert_eq;

use mallorn::{decode, encode, DecodeError, Error, Record, Symbol, TagRegistry, Value};

fn simple_record_registry() -> TagRegistry {
    let mut registry = TagRegistry::new();
    registry.register_record(Symbol::namespaced("user", "SimpleRecord"), ["a"]);
    registry
}

#[test]
fn encode_produces_the_documented_form() {
    let rec = Record::new("user", "SimpleRecord").with_field("a", Value::Int(42));
    assert_eq!(encode(&rec.to_value()), "#user/SimpleRecord {:a 42}");
}

#[test]
fn round_trip_reproduces_the_record() {
    let registry = simple_record_registry();
    let rec = Record::new("user", "SimpleRecord").with_field("a", Value::Int(42));

    let text = encode(&rec.to_value());
    let decoded = decode(&text, &registry).unwrap();
    assert_eq!(decoded, rec.to_value());
}

#[test]
fn round_trip_over_varied_field_values() {
    let mut registry = TagRegistry::new();
    registry.register_record(
        Symbol::namespaced("user", "Mixed"),
        ["n", "f", "s", "k", "v", "m"],
    );

    let rec = Record::new("user", "Mixed")
        .with_field("n", Value::Int(-3))
        .with_field("f", Value::Float(2.5))
        .with_field("s", Value::string("line\nbreak"))
        .with_field("k", Value::keyword("flag"))
        .with_field("v", Value::vector(vec![Value::Int(1), Value::Nil]))
        .with_field(
            "m",
            Value::map([(Value::keyword("inner"), Value::Bool(true))]),
        );

    let text = encode(&rec.to_value());
    assert_eq!(decode(&text, &registry).unwrap(), rec.to_value());
}

#[test]
fn unknown_tag_fails_without_partial_value() {
    let registry = TagRegistry::new();
    let err = decode("#user/SimpleRecord {:a 42}", &registry).unwrap_err();
    assert_eq!(
        err,
        Error::Decode(DecodeError::UnknownTag {
            tag: Symbol::namespaced("user", "SimpleRecord"),
        })
    );
}

#[test]
fn unknown_tag_inside_a_collection_fails_the_whole_decode() {
    let registry = simple_record_registry();
    let err = decode("[1 #not/Registered {:a 1} 3]", &registry).unwrap_err();
    assert!(matches!(
        err,
        Error::Decode(DecodeError::UnknownTag { .. })
    ));
}

#[test]
fn encode_after_decode_is_idempotent() {
    let registry = simple_record_registry();
    let text = "#user/SimpleRecord {:a 42}";
    let decoded = decode(text, &registry).unwrap();
    assert_eq!(encode(&decoded), text);
}

#[test]
fn decode_normalizes_field_order_without_changing_equality() {
    let mut two_fields = TagRegistry::new();
    two_fields.register_record(Symbol::namespaced("user", "Pair"), ["x", "y"]);

    let decoded = decode("#user/Pair {:y 2, :x 1}", &two_fields).unwrap();
    assert_eq!(encode(&decoded), "#user/Pair {:x 1, :y 2}");

    let expected = Record::new("user", "Pair")
        .with_field("y", Value::Int(2))
        .with_field("x", Value::Int(1));
    assert_eq!(decoded, expected.to_value());
}

#[test]
fn nested_record_round_trips_at_both_levels() {
    let mut registry = TagRegistry::new();
    registry.register_record(Symbol::namespaced("user", "Inner"), ["x"]);
    registry.register_record(Symbol::namespaced("user", "Outer"), ["inner", "label"]);

    let inner = Record::new("user", "Inner").with_field("x", Value::Int(1));
    let outer = Record::new("user", "Outer")
        .with_field("inner", inner.to_value())
        .with_field("label", Value::string("wrapped"));

    let text = encode(&outer.to_value());
    assert_eq!(
        text,
        "#user/Outer {:inner #user/Inner {:x 1}, :label \"wrapped\"}"
    );

    let decoded = decode(&text, &registry).unwrap();
    assert_eq!(decoded, outer.to_value());

    // The inner record resolved too: re-encoding reproduces the text
    assert_eq!(encode(&decoded), text);
}

#[test]
fn nested_unknown_inner_tag_fails_before_outer_constructor_runs() {
    let mut registry = TagRegistry::new();
    registry.register_record(Symbol::namespaced("user", "Outer"), ["inner", "label"]);

    let err = decode(
        "#user/Outer {:inner #user/Inner {:x 1}, :label \"wrapped\"}",
        &registry,
    )
    .unwrap_err();
    assert_eq!(
        err,
        Error::Decode(DecodeError::UnknownTag {
            tag: Symbol::namespaced("user", "Inner"),
        })
    );
}

#[test]
fn constructor_arity_failures_surface() {
    let registry = simple_record_registry();

    let err = decode("#user/SimpleRecord {}", &registry).unwrap_err();
    assert!(matches!(
        err,
        Error::Decode(DecodeError::Constructor { ref reason, .. })
            if reason.contains("missing field :a")
    ));

    let err = decode("#user/SimpleRecord {:a 1, :b 2}", &registry).unwrap_err();
    assert!(matches!(
        err,
        Error::Decode(DecodeError::Constructor { ref reason, .. })
            if reason.contains("unexpected field :b")
    ));

    let err = decode("#user/SimpleRecord [1 2]", &registry).unwrap_err();
    assert!(matches!(
        err,
        Error::Decode(DecodeError::Constructor { ref reason, .. })
            if reason.contains("must be a map")
    ));
}

#[test]
fn malformed_literal_is_a_read_error() {
    let registry = simple_record_registry();
    let err = decode("#user/SimpleRecord {:a", &registry).unwrap_err();
    assert!(matches!(err, Error::Read(_)));
}

#[test]
fn fallback_keeps_unknown_tags_as_data() {
    let mut registry = simple_record_registry();
    registry.set_fallback(|tag, payload| Ok(Value::tagged(tag.clone(), payload)));

    let text = "#not/Registered {:a 1}";
    let decoded = decode(text, &registry).unwrap();
    assert_eq!(encode(&decoded), text);
}
