//! Ordered alternatives
//!
//! The first alternative that succeeds wins and later ones are never run.
//! When every alternative fails, their failures are reported side by side
//! at the current path, left first.
//!
//! Copyright (c) 2025 Decoda Team
//! Licensed under the Apache-2.0 license

use super::Decoder;
use crate::decoding::DecodingResult;
use crate::value::Value;

/// Decoder returned by [`DecoderExt::or`](super::DecoderExt::or)
#[derive(Debug, Clone)]
pub struct Or<A, B> {
    first: A,
    second: B,
    name: String,
}

impl<A: Decoder, B: Decoder> Or<A, B> {
    pub(crate) fn new(first: A, second: B) -> Self {
        let name = format!("{} | {}", first.name(), second.name());
        Self { first, second, name }
    }
}

impl<A, B> Decoder for Or<A, B>
where
    A: Decoder,
    B: Decoder<Output = A::Output>,
{
    type Output = A::Output;

    fn name(&self) -> &str {
        &self.name
    }

    fn decode(&self, input: &Value) -> DecodingResult<A::Output> {
        match self.first.decode(input) {
            Ok(value) => Ok(value),
            Err(first) => self.second.decode(input).map_err(|second| first.concat(second)),
        }
    }

    fn test(&self, input: &Value) -> bool {
        self.first.test(input) || self.second.test(input)
    }
}

/// Output of a union whose alternatives decode to different types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OneOf<A, B> {
    First(A),
    Second(B),
}

impl<A, B> OneOf<A, B> {
    pub fn first(self) -> Option<A> {
        match self {
            OneOf::First(value) => Some(value),
            OneOf::Second(_) => None,
        }
    }

    pub fn second(self) -> Option<B> {
        match self {
            OneOf::First(_) => None,
            OneOf::Second(value) => Some(value),
        }
    }
}

impl<A: Into<Value>, B: Into<Value>> From<OneOf<A, B>> for Value {
    fn from(one_of: OneOf<A, B>) -> Self {
        match one_of {
            OneOf::First(value) => value.into(),
            OneOf::Second(value) => value.into(),
        }
    }
}

/// Union of two decoders with unrelated output types
#[derive(Debug, Clone)]
pub struct OneOfDecoder<A, B> {
    first: A,
    second: B,
    name: String,
}

/// Try `first`, then `second`, tagging the output with the branch that matched
///
/// ```
/// use decoda_core::{as_number, as_one_of, as_string, Decoder, OneOf, Value};
///
/// let id = as_one_of(as_number(), as_string());
/// assert_eq!(id.name(), "number | string");
/// assert_eq!(id.decode(&Value::from("a1")), Ok(OneOf::Second("a1".to_string())));
/// assert_eq!(
///     id.decode(&Value::Null).unwrap_err().reason(),
///     "$root: expected number but got null\n$root: expected string but got null"
/// );
/// ```
pub fn as_one_of<A: Decoder, B: Decoder>(first: A, second: B) -> OneOfDecoder<A, B> {
    let name = format!("{} | {}", first.name(), second.name());
    OneOfDecoder { first, second, name }
}

impl<A: Decoder, B: Decoder> Decoder for OneOfDecoder<A, B> {
    type Output = OneOf<A::Output, B::Output>;

    fn name(&self) -> &str {
        &self.name
    }

    fn decode(&self, input: &Value) -> DecodingResult<Self::Output> {
        match self.first.decode(input) {
            Ok(value) => Ok(OneOf::First(value)),
            Err(first) => match self.second.decode(input) {
                Ok(value) => Ok(OneOf::Second(value)),
                Err(second) => Err(first.concat(second)),
            },
        }
    }

    fn test(&self, input: &Value) -> bool {
        self.first.test(input) || self.second.test(input)
    }
}
