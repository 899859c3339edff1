//! Decoders that also accept absent values
//!
//! The input is tried as `undefined`, then `null`, then as the item. When all
//! three fail the three messages are reported side by side.

use super::basic::{as_null, as_undefined};
use super::Decoder;
use crate::decoding::DecodingResult;
use crate::optional::Optional;
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct OptionalDecoder<D> {
    item: D,
    name: String,
}

/// Accept a missing value, `null`, or a value `item` accepts
///
/// ```
/// use decoda_core::{as_optional, as_string, Decoder, Optional, Value};
///
/// let decoder = as_optional(as_string());
/// assert_eq!(decoder.decode(&Value::Undefined), Ok(Optional::Missing));
/// assert_eq!(decoder.decode(&Value::Null), Ok(Optional::Null));
/// assert_eq!(decoder.decode(&Value::from("x")), Ok(Optional::Present("x".to_string())));
/// ```
pub fn as_optional<D: Decoder>(item: D) -> OptionalDecoder<D> {
    let name = format!("Optional<{}>", item.name());
    OptionalDecoder { item, name }
}

impl<D: Decoder> Decoder for OptionalDecoder<D> {
    type Output = Optional<D::Output>;

    fn name(&self) -> &str {
        &self.name
    }

    fn decode(&self, input: &Value) -> DecodingResult<Self::Output> {
        let missing = match as_undefined().decode(input) {
            Ok(_) => return Ok(Optional::Missing),
            Err(failure) => failure,
        };
        let null = match as_null().decode(input) {
            Ok(_) => return Ok(Optional::Null),
            Err(failure) => failure,
        };
        self.item
            .decode(input)
            .map(Optional::Present)
            .map_err(|item| missing.concat(null).concat(item))
    }

    fn test(&self, input: &Value) -> bool {
        !input.is_defined() || self.item.test(input)
    }
}

/// Like [`OptionalDecoder`], collapsing both empty states into `None`
#[derive(Debug, Clone)]
pub struct OptionalValueDecoder<D> {
    inner: OptionalDecoder<D>,
    name: String,
}

/// Accept a missing value, `null`, or a value `item` accepts, as an `Option`
pub fn as_optional_value<D: Decoder>(item: D) -> OptionalValueDecoder<D> {
    let name = format!("OptionalValue<{}>", item.name());
    OptionalValueDecoder {
        inner: as_optional(item),
        name,
    }
}

impl<D: Decoder> Decoder for OptionalValueDecoder<D> {
    type Output = Option<D::Output>;

    fn name(&self) -> &str {
        &self.name
    }

    fn decode(&self, input: &Value) -> DecodingResult<Self::Output> {
        self.inner.decode(input).map(Optional::into_option)
    }

    fn test(&self, input: &Value) -> bool {
        self.inner.test(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{as_number, as_string};

    #[test]
    fn test_names() {
        assert_eq!(as_optional(as_string()).name(), "Optional<string>");
        assert_eq!(as_optional_value(as_number()).name(), "OptionalValue<number>");
    }

    #[test]
    fn test_three_states() {
        let decoder = as_optional(as_number());
        assert_eq!(decoder.decode(&Value::Undefined), Ok(Optional::Missing));
        assert_eq!(decoder.decode(&Value::Null), Ok(Optional::Null));
        assert_eq!(decoder.decode(&Value::Int(4)), Ok(Optional::Present(4.0)));
    }

    #[test]
    fn test_failure_lists_every_alternative() {
        let failure = as_optional(as_string()).decode(&Value::Int(1)).unwrap_err();
        assert_eq!(
            failure.reason(),
            "$root: expected undefined but got number\n\
             $root: expected null but got number\n\
             $root: expected string but got number"
        );
        assert!(!as_optional(as_string()).test(&Value::Int(1)));
    }

    #[test]
    fn test_optional_value() {
        let decoder = as_optional_value(as_string());
        assert_eq!(decoder.decode(&Value::Undefined), Ok(None));
        assert_eq!(decoder.decode(&Value::Null), Ok(None));
        assert_eq!(decoder.decode(&Value::from("y")), Ok(Some("y".to_string())));
        assert_eq!(decoder.decode(&Value::Bool(true)).unwrap_err().leaf_count(), 3);
    }
}
