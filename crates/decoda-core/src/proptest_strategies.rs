//! Property-based testing strategies for generating test data
//!
//! Random but well-formed `Value` trees covering every kind, including the
//! awkward ones (`NaN`, infinities, integral floats, big integers).

#![cfg(test)]

use crate::value::{Instance, Value};
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;

/// Strategy for generating field names
pub fn field_name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,12}"
}

/// Strategy for generating numbers, biased towards edge cases
pub fn number_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Int),
        (-1.0e6f64..1.0e6).prop_map(Value::Float),
        (-1000i64..1000).prop_map(|n| Value::Float(n as f64)),
        Just(Value::Float(f64::NAN)),
        Just(Value::Float(f64::INFINITY)),
        Just(Value::Float(f64::NEG_INFINITY)),
    ]
}

/// Strategy for generating scalar values of every kind
pub fn leaf_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        number_strategy(),
        any::<i64>().prop_map(|n| Value::BigInt(i128::from(n) * 1_000)),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
        "[A-Z][a-z]{0,8}".prop_map(|class| Value::Instance(Instance::new(class, ()))),
    ]
}

/// Strategy for generating arbitrary value trees with controlled depth
pub fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_value_strategy().prop_recursive(
        3,  // max depth
        24, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                vec(inner.clone(), 0..5).prop_map(Value::array),
                btree_map(field_name_strategy(), inner, 0..5).prop_map(Value::from),
            ]
        },
    )
}
