//! Decoder contract and the concrete decoder families
//!
//! Every decoder exposes a display name, `decode` and `test`. The generic
//! operations (`parse`, `map`, `try_map`, `or`, ...) live on [`DecoderExt`],
//! which is implemented for every decoder, so concrete decoders only ever
//! provide the three core methods.
//!
//! The module is organized by decoder family:
//! - `basic`: leaf decoders for primitive kinds and constants
//! - `extras`: integers, `any`/`unknown` and custom decoders
//! - `object`: field-table object decoders
//! - `array` / `tuple`: homogeneous and fixed-arity sequences
//! - `union`: ordered alternatives
//! - `optional`: the tri-state optional wrapper
//! - `transform`: `map` and `try_map` adapters
//!
//! Copyright (c) 2025 Decoda Team
//! Licensed under the Apache-2.0 license

pub mod array;
pub mod basic;
pub mod extras;
pub mod object;
pub mod optional;
pub mod transform;
pub mod tuple;
pub mod union;


pub use array::{as_array, ArrayDecoder};
pub use basic::{
    as_bigint, as_boolean, as_const, as_null, as_number, as_string, as_undefined, BigIntDecoder,
    BooleanDecoder, ConstDecoder, NullDecoder, NumberDecoder, StringDecoder, UndefinedDecoder,
};
pub use extras::{as_any, as_custom, as_int, as_unknown, AnyDecoder, CustomDecoder, IntDecoder};
pub use object::{as_both_of, as_object, from_object, MergePolicy, ObjectDecoder};
pub use optional::{as_optional, as_optional_value, OptionalDecoder, OptionalValueDecoder};
pub use transform::{MapDecoder, TryMapDecoder};
pub use tuple::{as_tuple, TupleDecoder, TupleItems};
pub use union::{as_one_of, OneOf, OneOfDecoder, Or};

use crate::decoding::{DecodingFailure, DecodingResult};
use crate::error::{Error, Result};
use crate::value::Value;
use std::sync::Arc;

/// A shareable, type-erased decoder
pub type BoxDecoder<T> = Arc<dyn Decoder<Output = T> + Send + Sync>;

/// Validates a dynamic value and converts it into `Output`
///
/// Decoders are immutable: decoding never changes them, and composing them
/// always builds a new decoder.
pub trait Decoder {
    /// The type a successful decode produces
    type Output;

    /// Display name used in failure messages and diagnostics
    fn name(&self) -> &str;

    /// Decode `input`, reporting every problem as data
    fn decode(&self, input: &Value) -> DecodingResult<Self::Output>;

    /// Whether `decode` would succeed on `input`
    fn test(&self, input: &Value) -> bool {
        self.decode(input).is_ok()
    }
}

impl<D: Decoder + ?Sized> Decoder for &D {
    type Output = D::Output;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn decode(&self, input: &Value) -> DecodingResult<Self::Output> {
        (**self).decode(input)
    }

    fn test(&self, input: &Value) -> bool {
        (**self).test(input)
    }
}

impl<D: Decoder + ?Sized> Decoder for Box<D> {
    type Output = D::Output;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn decode(&self, input: &Value) -> DecodingResult<Self::Output> {
        (**self).decode(input)
    }

    fn test(&self, input: &Value) -> bool {
        (**self).test(input)
    }
}

impl<D: Decoder + ?Sized> Decoder for Arc<D> {
    type Output = D::Output;

    fn name(&self) -> &str {
        (**self).name()
    }

    fn decode(&self, input: &Value) -> DecodingResult<Self::Output> {
        (**self).decode(input)
    }

    fn test(&self, input: &Value) -> bool {
        (**self).test(input)
    }
}

/// Operations derived from `decode`, available on every decoder
pub trait DecoderExt: Decoder + Sized {
    /// Decode and return the value, panicking with the flattened failure
    /// message if the input does not conform.
    ///
    /// This is the only operation of the engine that panics. Use
    /// [`DecoderExt::try_parse`] or `decode` to handle failures as data.
    ///
    /// ```should_panic
    /// use decoda_core::{as_string, DecoderExt, Value};
    ///
    /// as_string().parse(&Value::Int(1)); // panics: $root: expected string but got number
    /// ```
    fn parse(&self, input: &Value) -> Self::Output {
        match self.decode(input) {
            Ok(value) => value,
            Err(failure) => {
                tracing::debug!(decoder = self.name(), "parse rejected input");
                panic!("{}", failure)
            }
        }
    }

    /// Decode and convert a failure into the crate [`Error`]
    fn try_parse(&self, input: &Value) -> Result<Self::Output> {
        self.decode(input).map_err(|failure: DecodingFailure| {
            tracing::debug!(decoder = self.name(), leaves = failure.leaf_count(), "try_parse rejected input");
            Error::from(failure)
        })
    }

    /// Transform the decoded value; failures pass through and the name is kept
    fn map<U, F>(self, transformer: F) -> MapDecoder<Self, F>
    where
        F: Fn(Self::Output) -> U,
    {
        MapDecoder::new(self, transformer)
    }

    /// Alias of [`DecoderExt::map`]
    fn transform<U, F>(self, transformer: F) -> MapDecoder<Self, F>
    where
        F: Fn(Self::Output) -> U,
    {
        self.map(transformer)
    }

    /// Apply a post-decode step that can itself fail
    ///
    /// ```
    /// use decoda_core::{as_string, failure, success, Decoder, DecoderExt, Value};
    ///
    /// let as_number_string = as_string().try_map(|s| match s.parse::<f64>() {
    ///     Ok(n) => success(n),
    ///     Err(_) => failure("expected number string"),
    /// });
    /// assert_eq!(as_number_string.decode(&Value::from("10")), Ok(10.0));
    /// assert!(as_number_string.decode(&Value::from("ten")).is_err());
    /// ```
    fn try_map<U, F>(self, operation: F) -> TryMapDecoder<Self, F>
    where
        F: Fn(Self::Output) -> DecodingResult<U>,
    {
        TryMapDecoder::new(self, operation)
    }

    /// Ordered alternative: `other` is only tried when `self` fails
    fn or<D>(self, other: D) -> Or<Self, D>
    where
        D: Decoder<Output = Self::Output>,
    {
        Or::new(self, other)
    }

    /// Erase the concrete type behind a shareable handle
    fn boxed(self) -> BoxDecoder<Self::Output>
    where
        Self: Send + Sync + 'static,
    {
        Arc::new(self)
    }

    /// Erase the concrete type and widen the output to [`Value`]
    fn erased(self) -> BoxDecoder<Value>
    where
        Self: Send + Sync + 'static,
        Self::Output: Into<Value>,
    {
        Arc::new(self.map(|value: Self::Output| -> Value { value.into() }))
    }
}

impl<D: Decoder> DecoderExt for D {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoding::{failure, success};

    #[test]
    fn test_parse_returns_value() {
        assert_eq!(as_string().parse(&Value::from("")), "");
    }

    #[test]
    #[should_panic(expected = "$root: expected string but got number")]
    fn test_parse_panics_with_flattened_message() {
        as_string().parse(&Value::Int(1));
    }

    #[test]
    fn test_try_parse() {
        assert_eq!(as_boolean().try_parse(&Value::Bool(true)).unwrap(), true);
        let err = as_boolean().try_parse(&Value::Null).unwrap_err();
        assert!(matches!(err, Error::Decoding { .. }));
        assert!(err.to_string().contains("$root: expected boolean but got null"));
    }

    #[test]
    fn test_map_and_transform() {
        let upper = as_string().map(|s| s.to_uppercase());
        assert_eq!(upper.decode(&Value::from("foo")), Ok("FOO".to_string()));
        assert_eq!(upper.name(), "string");

        let upper = as_string().transform(|s| s.to_uppercase());
        assert_eq!(
            upper.decode(&Value::Null).unwrap_err().reason(),
            "$root: expected string but got null"
        );
    }

    #[test]
    fn test_try_map() {
        let as_number_string = as_string().try_map(|s| match s.parse::<f64>() {
            Ok(n) => success(n),
            Err(_) => failure("expected number string"),
        });
        assert_eq!(
            as_number_string.decode(&Value::Int(10)).unwrap_err().reason(),
            "$root: expected string but got number"
        );
        assert_eq!(as_number_string.decode(&Value::from("10")), Ok(10.0));
        assert_eq!(
            as_number_string.decode(&Value::from("something else")).unwrap_err().reason(),
            "$root: expected number string"
        );
        assert!(!as_number_string.test(&Value::from("something else")));
    }

    #[test]
    fn test_boxed_and_erased_share_behavior() {
        let boxed: BoxDecoder<String> = as_string().boxed();
        assert_eq!(boxed.decode(&Value::from("a")), Ok("a".to_string()));
        assert_eq!(boxed.name(), "string");

        let erased = as_int().erased();
        assert_eq!(erased.decode(&Value::Int(4)), Ok(Value::Int(4)));
        assert!(!erased.test(&Value::Float(4.5)));
    }

    #[test]
    fn test_decoders_are_shareable_across_threads() {
        let decoder = as_array(as_string()).boxed();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let decoder = Arc::clone(&decoder);
                std::thread::spawn(move || decoder.test(&Value::array(vec![i.to_string()])))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
