#![allow(dead_code)]

use panconv::document::Value;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Keys that are legal everywhere they might end up: object keys, CSV
/// headers, XML tag names, TOML bare keys.
pub fn arb_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

/// Strings kept clear of control characters; every codec quotes the
/// rest as needed.
fn arb_string() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 _.\\-]{0,11}"
}

/// Finite numbers only: NaN and the infinities are write errors in JSON
/// and excluded from round-trip laws.
fn arb_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<i32>().prop_map(f64::from),
        (-1.0e12..1.0e12f64),
    ]
}

pub fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        arb_number().prop_map(Value::Number),
        arb_string().prop_map(Value::String),
    ]
}

fn arb_scalar_no_null() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        arb_number().prop_map(Value::Number),
        arb_string().prop_map(Value::String),
    ]
}

/// Arbitrary value trees up to the given depth.
pub fn arb_value(depth: u32) -> BoxedStrategy<Value> {
    arb_scalar()
        .prop_recursive(depth, 64, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map(arb_key(), inner, 0..6).prop_map(Value::Object),
            ]
        })
        .boxed()
}

/// Null-free value trees, for the TOML laws.
pub fn arb_value_no_null(depth: u32) -> BoxedStrategy<Value> {
    arb_scalar_no_null()
        .prop_recursive(depth, 64, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map(arb_key(), inner, 0..6).prop_map(Value::Object),
            ]
        })
        .boxed()
}

/// Null-free object-rooted trees: the only documents TOML can hold.
pub fn arb_toml_document(depth: u32) -> BoxedStrategy<Value> {
    prop::collection::btree_map(arb_key(), arb_value_no_null(depth), 0..6)
        .prop_map(Value::Object)
        .boxed()
}
