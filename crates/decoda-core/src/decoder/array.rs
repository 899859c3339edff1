//! Homogeneous sequence decoder
//!
//! Every element is decoded even after a failure, so one decode reports all
//! bad positions at once.

use super::basic::mismatch;
use super::Decoder;
use crate::decoding::{DecodingFailure, DecodingResult, PathSegment};
use crate::value::Value;

#[derive(Debug, Clone)]
pub struct ArrayDecoder<D> {
    item: D,
    name: String,
}

/// Decode an array whose elements all satisfy `item`
pub fn as_array<D: Decoder>(item: D) -> ArrayDecoder<D> {
    let name = format!("Array<{}>", item.name());
    ArrayDecoder { item, name }
}

impl<D> ArrayDecoder<D> {
    /// The element decoder
    pub fn item(&self) -> &D {
        &self.item
    }
}

impl<D: Decoder> Decoder for ArrayDecoder<D> {
    type Output = Vec<D::Output>;

    fn name(&self) -> &str {
        &self.name
    }

    fn decode(&self, input: &Value) -> DecodingResult<Self::Output> {
        let Some(items) = input.as_array() else {
            return mismatch(&self.name, input);
        };

        let mut values = Vec::with_capacity(items.len());
        let mut errors = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match self.item.decode(item) {
                Ok(value) => values.push(value),
                Err(failure) => errors.extend(failure.at(PathSegment::index(index)).into_errors()),
            }
        }

        if errors.is_empty() {
            Ok(values)
        } else {
            Err(DecodingFailure::new(errors))
        }
    }

    fn test(&self, input: &Value) -> bool {
        input
            .as_array()
            .is_some_and(|items| items.iter().all(|item| self.item.test(item)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::{as_number, as_string};

    #[test]
    fn test_name() {
        assert_eq!(as_array(as_string()).name(), "Array<string>");
        assert_eq!(as_array(as_array(as_number())).name(), "Array<Array<number>>");
    }

    #[test]
    fn test_decodes_all_items() {
        let input = Value::array(vec!["a", "b"]);
        assert_eq!(
            as_array(as_string()).decode(&input),
            Ok(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(as_array(as_string()).decode(&Value::array(Vec::<Value>::new())), Ok(vec![]));
    }

    #[test]
    fn test_rejects_non_arrays() {
        assert_eq!(
            as_array(as_string()).decode(&Value::Null).unwrap_err().reason(),
            "$root: expected Array<string> but got null"
        );
        assert!(!as_array(as_string()).test(&Value::object([("0", "a")])));
    }

    #[test]
    fn test_collects_every_failing_index() {
        let input = Value::array(vec![Value::Int(1), Value::from("ok"), Value::Bool(false)]);
        let failure = as_array(as_string()).decode(&input).unwrap_err();
        assert_eq!(failure.leaf_count(), 2);
        assert_eq!(
            failure.reason(),
            "$root[0]: expected string but got number\n$root[2]: expected string but got boolean"
        );
    }
}
