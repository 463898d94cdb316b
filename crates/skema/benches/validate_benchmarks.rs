//! Validation pipeline performance benchmarks.
//!
//! Measures evaluation cost for flat, nested, and element-wise schemas.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use serde_json::{Value, json};
use skema::factory::{array_of, email, object, string};
use skema::{Schema, ValueKind};

fn user_payload() -> Value {
    json!({
        "email": "hello@asdf.ca",
        "name": "basdfaasdfasdf",
        "gender": "female",
    })
}

fn bench_flat_object(c: &mut Criterion) {
    let schema = object([
        ("email", email()),
        ("name", string().range_length(10, 20)),
        ("gender", string().enum_of([json!("male"), json!("female")])),
    ]);

    c.bench_function("validate_flat_object", |b| {
        b.iter(|| schema.evaluate(black_box(user_payload())).unwrap())
    });
}

fn bench_nested_object(c: &mut Criterion) {
    let schema = object([(
        "user",
        object([("profile", object([("name", string())]))]),
    )]);
    let payload = json!({"user": {"profile": {"name": "ada"}}});

    c.bench_function("validate_nested_object", |b| {
        b.iter(|| schema.evaluate(black_box(payload.clone())).unwrap())
    });
}

fn bench_typed_array(c: &mut Criterion) {
    let schema = array_of(ValueKind::Number);
    let payload = Value::Array((0..1000).map(Value::from).collect());

    c.bench_function("validate_typed_array_1000", |b| {
        b.iter(|| schema.evaluate(black_box(payload.clone())).unwrap())
    });
}

fn bench_first_failure(c: &mut Criterion) {
    let schema = Schema::new()
        .type_of(ValueKind::String)
        .min_length(10)
        .max_length(20);

    c.bench_function("validate_first_failure", |b| {
        b.iter(|| schema.evaluate(black_box(json!(42))).unwrap_err())
    });
}

criterion_group!(
    benches,
    bench_flat_object,
    bench_nested_object,
    bench_typed_array,
    bench_first_failure
);
criterion_main!(benches);
