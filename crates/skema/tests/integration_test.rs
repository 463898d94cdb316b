//! End-to-end validation scenarios through the factory layer.

use serde_json::json;
use skema::factory::{array_of, bounded_number, date, email, integer, object, string};
use skema::{FailureContext, FailureKind, PathSegment, Schema, ValueKind};

#[test]
fn user_schema_accepts_a_conforming_value() {
    let schema = object([
        ("email", email()),
        ("name", string().range_length(10, 20)),
        ("gender", string().enum_of([json!("male"), json!("female")])),
    ]);

    let value = schema
        .evaluate(json!({
            "email": "hello@asdf.ca",
            "name": "basdfaasdfasdf",
            "gender": "female",
        }))
        .unwrap();
    assert_eq!(
        value,
        json!({
            "email": "hello@asdf.ca",
            "name": "basdfaasdfasdf",
            "gender": "female",
        })
    );
}

#[test]
fn first_failing_field_is_reported_with_its_path() {
    // email and name both pass; gender is the first failing field.
    let schema = object([
        ("email", email()),
        ("name", string().range_length(10, 20)),
        ("gender", string().enum_of([json!("male"), json!("female")])),
    ]);

    let failure = schema
        .evaluate(json!({
            "email": "hello@asdf.ca",
            "name": "basdfaasdfasdf",
            "gender": "malde",
        }))
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::EnumMismatch);
    assert_eq!(failure.path, vec![PathSegment::from("gender")]);
    assert_eq!(failure.message, "failed enum");
    assert_eq!(
        failure.context,
        FailureContext::Enum { allowed: vec![json!("male"), json!("female")] }
    );
    assert_eq!(failure.value, json!("malde"));
}

#[test]
fn nested_objects_accumulate_paths_outer_to_inner() {
    let schema = object([("a", object([("b", string())]))]);

    let failure = schema.evaluate(json!({"a": {"b": 5}})).unwrap_err();
    assert_eq!(failure.kind, FailureKind::TypeMismatch);
    assert_eq!(
        failure.path,
        vec![PathSegment::from("a"), PathSegment::from("b")]
    );
    assert_eq!(failure.path_string(), "a.b");
}

#[test]
fn objects_strip_unlisted_fields_on_success() {
    let schema = object([("x", integer()), ("y", integer())]);
    let value = schema
        .evaluate(json!({"x": 1, "y": 2, "z": "dropped"}))
        .unwrap();
    assert_eq!(value, json!({"x": 1, "y": 2}));
}

#[test]
fn field_transforms_propagate_into_the_surrounding_object() {
    let schema = object([(
        "name",
        string().alter(|value| match value {
            serde_json::Value::String(text) => json!(text.trim().to_lowercase()),
            other => other,
        }),
    )]);

    let value = schema.evaluate(json!({"name": "  Ada Lovelace "})).unwrap();
    assert_eq!(value, json!({"name": "ada lovelace"}));
}

#[test]
fn element_failures_carry_their_index() {
    let failure = array_of(ValueKind::Number)
        .evaluate(json!([1, 2, "x"]))
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::TypeMismatch);
    assert_eq!(failure.path, vec![PathSegment::from(2usize)]);
    assert_eq!(failure.path_string(), "[2]");
}

#[test]
fn arrays_of_objects_combine_index_and_key_segments() {
    let schema = Schema::new()
        .is_array()
        .each(|| object([("city", string())]));

    let failure = schema
        .evaluate(json!([
            {"city": "Lyon"},
            {"city": 7},
        ]))
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::TypeMismatch);
    assert_eq!(
        failure.path,
        vec![PathSegment::from(1usize), PathSegment::from("city")]
    );
    assert_eq!(failure.path_string(), "[1].city");
}

#[test]
fn date_and_bounded_number_compose_with_objects() {
    let schema = object([
        ("born", date()),
        ("score", bounded_number(0.0, 100.0)),
    ]);

    assert!(schema
        .evaluate(json!({"born": "1815-12-10", "score": 99.5}))
        .is_ok());

    let failure = schema
        .evaluate(json!({"born": "1815-12-10", "score": 101}))
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::OutOfRange);
    assert_eq!(failure.path, vec![PathSegment::from("score")]);
}

#[test]
fn failures_render_for_humans_and_machines() {
    let schema = object([("age", integer())]);
    let failure = schema.evaluate(json!({"age": 3.5})).unwrap_err();

    assert_eq!(failure.to_string(), "incorrect format at age");

    let encoded = serde_json::to_value(&failure).unwrap();
    assert_eq!(encoded["kind"], "incorrect_format");
    assert_eq!(encoded["path"], json!(["age"]));
    assert_eq!(encoded["context"]["format"], "integer");
}
