//! Fixed-arity sequence decoder
//!
//! Unlike arrays, tuples check the exact length first and then stop at the
//! first failing position. Positions after it are never decoded.

use super::basic::mismatch;
use super::Decoder;
use crate::decoding::{failure, DecodingResult, PathSegment};
use crate::value::Value;

/// A tuple of decoders, one per position
///
/// Implemented for tuples of 1 to 8 decoders.
pub trait TupleItems {
    type Output;

    /// Number of positions
    const ARITY: usize;

    /// Item decoder names in position order
    fn names(&self) -> Vec<&str>;

    /// Decode `items` position by position; missing positions read as undefined
    fn decode_items(&self, items: &[Value]) -> DecodingResult<Self::Output>;

    /// Check `items` position by position; missing positions read as undefined
    fn test_items(&self, items: &[Value]) -> bool;
}

macro_rules! tuple_items {
    ($arity:expr; $($idx:tt => $D:ident),+) => {
        impl<$($D: Decoder),+> TupleItems for ($($D,)+) {
            type Output = ($(<$D as Decoder>::Output,)+);

            const ARITY: usize = $arity;

            fn names(&self) -> Vec<&str> {
                vec![$(self.$idx.name()),+]
            }

            fn decode_items(&self, items: &[Value]) -> DecodingResult<Self::Output> {
                Ok(($(
                    self.$idx
                        .decode(items.get($idx).unwrap_or(&Value::Undefined))
                        .map_err(|failure| failure.at(PathSegment::index($idx)))?,
                )+))
            }

            fn test_items(&self, items: &[Value]) -> bool {
                $(self.$idx.test(items.get($idx).unwrap_or(&Value::Undefined)))&&+
            }
        }

        impl<$($D: Into<Value>),+> From<($($D,)+)> for Value {
            fn from(tuple: ($($D,)+)) -> Self {
                Value::array(vec![$(Into::<Value>::into(tuple.$idx)),+])
            }
        }
    };
}

tuple_items!(1; 0 => A);
tuple_items!(2; 0 => A, 1 => B);
tuple_items!(3; 0 => A, 1 => B, 2 => C);
tuple_items!(4; 0 => A, 1 => B, 2 => C, 3 => D);
tuple_items!(5; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E);
tuple_items!(6; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F);
tuple_items!(7; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G);
tuple_items!(8; 0 => A, 1 => B, 2 => C, 3 => D, 4 => E, 5 => F, 6 => G, 7 => H);

#[derive(Debug, Clone)]
pub struct TupleDecoder<T> {
    items: T,
    name: String,
}

/// Decode an array of exactly `items.len()` elements, one decoder per position
///
/// ```
/// use decoda_core::{as_boolean, as_string, as_tuple, Decoder, Value};
///
/// let pair = as_tuple((as_string(), as_boolean()));
/// assert_eq!(pair.name(), "Tuple<string, boolean>");
/// assert_eq!(
///     pair.decode(&Value::array(vec![Value::from("a"), Value::Bool(true)])),
///     Ok(("a".to_string(), true))
/// );
/// ```
pub fn as_tuple<T: TupleItems>(items: T) -> TupleDecoder<T> {
    let name = format!("Tuple<{}>", items.names().join(", "));
    TupleDecoder { items, name }
}

impl<T: TupleItems> Decoder for TupleDecoder<T> {
    type Output = T::Output;

    fn name(&self) -> &str {
        &self.name
    }

    fn decode(&self, input: &Value) -> DecodingResult<T::Output> {
        let Some(items) = input.as_array() else {
            return mismatch(&self.name, input);
        };
        if items.len() != T::ARITY {
            return failure(format!(
                "expected a tuple of exactly {} elements but got an array of length {}",
                T::ARITY,
                items.len()
            ));
        }
        self.items.decode_items(items)
    }

    fn test(&self, input: &Value) -> bool {
        input
            .as_array()
            .is_some_and(|items| items.len() == T::ARITY && self.items.test_items(items))
    }
}
