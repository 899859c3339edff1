//! Leaf decoders for primitive kinds and constants
//!
//! Each checks one kind tag and hands the value back unchanged, or fails with
//! a single `expected <name> but got <kind>` message.
//!
//! Copyright (c) 2025 Decoda Team
//! Licensed under the Apache-2.0 license

use super::Decoder;
use crate::decoding::{failure, DecodingResult};
use crate::value::Value;

/// The shared kind-mismatch message
pub(crate) fn mismatch<T>(expected: &str, input: &Value) -> DecodingResult<T> {
    failure(format!("expected {} but got {}", expected, input.kind()))
}

/// Accepts only `Value::Undefined`
#[derive(Debug, Clone, Copy, Default)]
pub struct UndefinedDecoder;

pub fn as_undefined() -> UndefinedDecoder {
    UndefinedDecoder
}

impl Decoder for UndefinedDecoder {
    type Output = Value;

    fn name(&self) -> &str {
        "undefined"
    }

    fn decode(&self, input: &Value) -> DecodingResult<Value> {
        match input {
            Value::Undefined => Ok(Value::Undefined),
            _ => mismatch(self.name(), input),
        }
    }

    fn test(&self, input: &Value) -> bool {
        input.is_undefined()
    }
}

/// Accepts only `Value::Null`
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDecoder;

pub fn as_null() -> NullDecoder {
    NullDecoder
}

impl Decoder for NullDecoder {
    type Output = Value;

    fn name(&self) -> &str {
        "null"
    }

    fn decode(&self, input: &Value) -> DecodingResult<Value> {
        match input {
            Value::Null => Ok(Value::Null),
            _ => mismatch(self.name(), input),
        }
    }

    fn test(&self, input: &Value) -> bool {
        input.is_null()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringDecoder;

pub fn as_string() -> StringDecoder {
    StringDecoder
}

impl Decoder for StringDecoder {
    type Output = String;

    fn name(&self) -> &str {
        "string"
    }

    fn decode(&self, input: &Value) -> DecodingResult<String> {
        match input {
            Value::String(s) => Ok(s.clone()),
            _ => mismatch(self.name(), input),
        }
    }

    fn test(&self, input: &Value) -> bool {
        matches!(input, Value::String(_))
    }
}

/// Accepts `Int` and `Float` values except `NaN`
///
/// The output is an `f64`, so integers beyond 2^53 round. Use
/// [`as_int`](super::as_int) to keep them exact.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberDecoder;

pub fn as_number() -> NumberDecoder {
    NumberDecoder
}

impl Decoder for NumberDecoder {
    type Output = f64;

    fn name(&self) -> &str {
        "number"
    }

    fn decode(&self, input: &Value) -> DecodingResult<f64> {
        match input.as_f64() {
            Some(n) if n.is_nan() => failure("expected number but got NaN"),
            Some(n) => Ok(n),
            None => mismatch(self.name(), input),
        }
    }

    fn test(&self, input: &Value) -> bool {
        input.as_f64().is_some_and(|n| !n.is_nan())
    }
}

/// Accepts big integers as well as integral numbers
#[derive(Debug, Clone, Copy, Default)]
pub struct BigIntDecoder;

pub fn as_bigint() -> BigIntDecoder {
    BigIntDecoder
}

// 2^127, the first float magnitude outside the i128 range
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

impl Decoder for BigIntDecoder {
    type Output = i128;

    fn name(&self) -> &str {
        "bigint"
    }

    fn decode(&self, input: &Value) -> DecodingResult<i128> {
        match input {
            Value::BigInt(n) => Ok(*n),
            Value::Int(n) => Ok(i128::from(*n)),
            Value::Float(n) if n.is_nan() => failure("expected bigint but got NaN"),
            Value::Float(n) if n.fract() == 0.0 && n.abs() < I128_BOUND => Ok(*n as i128),
            Value::Float(_) => failure("expected bigint but got float"),
            _ => mismatch(self.name(), input),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanDecoder;

pub fn as_boolean() -> BooleanDecoder {
    BooleanDecoder
}

impl Decoder for BooleanDecoder {
    type Output = bool;

    fn name(&self) -> &str {
        "boolean"
    }

    fn decode(&self, input: &Value) -> DecodingResult<bool> {
        match input {
            Value::Bool(b) => Ok(*b),
            _ => mismatch(self.name(), input),
        }
    }

    fn test(&self, input: &Value) -> bool {
        matches!(input, Value::Bool(_))
    }
}

/// Accepts exactly one constant
///
/// Scalars match by value. Arrays, objects and instances match by identity
/// only, so a structurally equal copy is rejected.
#[derive(Debug, Clone)]
pub struct ConstDecoder {
    value: Value,
    name: String,
}

pub fn as_const(value: impl Into<Value>) -> ConstDecoder {
    let value = value.into();
    let name = match &value {
        Value::String(s) => format!("\"{}\"", s),
        Value::BigInt(n) => format!("{}n", n),
        Value::Array(_) => "UniqueInstance<Array>".to_string(),
        Value::Object(_) => "UniqueInstance<Object>".to_string(),
        Value::Instance(instance) => format!("UniqueInstance<{}>", instance.class_name()),
        other => other.to_string(),
    };
    ConstDecoder { value, name }
}

impl ConstDecoder {
    /// The constant this decoder accepts
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Decoder for ConstDecoder {
    type Output = Value;

    fn name(&self) -> &str {
        &self.name
    }

    fn decode(&self, input: &Value) -> DecodingResult<Value> {
        if input.strict_eq(&self.value) {
            Ok(self.value.clone())
        } else if input.is_reference() {
            failure("expected instance did not match actual instance")
        } else if input.kind() == self.value.kind() {
            failure(format!("expected value {} but got {}", self.value, input))
        } else {
            failure(format!("expected value {} but got {}", self.value, input.kind()))
        }
    }

    fn test(&self, input: &Value) -> bool {
        input.strict_eq(&self.value)
    }
}
