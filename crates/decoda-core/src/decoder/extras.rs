//! Integers, pass-through decoders and custom decoders

use super::basic::{as_number, NumberDecoder};
use super::Decoder;
use crate::decoding::{failure, DecodingResult};
use crate::value::{float_to_i64, format_number, Value};
use std::fmt;
use std::sync::Arc;

/// Integer decoder: a number that is also integral and fits an `i64`
///
/// Runs the number decoder first, so it keeps the `number` name and reports
/// non-numbers the same way. `Int` inputs pass through exactly.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntDecoder {
    number: NumberDecoder,
}

fn integral(n: f64) -> DecodingResult<i64> {
    match float_to_i64(n) {
        Some(int) => Ok(int),
        None => failure(format!("expected integer but got {}", format_number(n))),
    }
}

/// Numbers without a fractional part
pub fn as_int() -> IntDecoder {
    IntDecoder { number: as_number() }
}

impl Decoder for IntDecoder {
    type Output = i64;

    fn name(&self) -> &str {
        self.number.name()
    }

    fn decode(&self, input: &Value) -> DecodingResult<i64> {
        match input {
            Value::Int(n) => Ok(*n),
            _ => self.number.decode(input).and_then(integral),
        }
    }

    fn test(&self, input: &Value) -> bool {
        match input {
            Value::Int(_) => true,
            Value::Float(n) => float_to_i64(*n).is_some(),
            _ => false,
        }
    }
}

/// Accepts every value and returns it unchanged
#[derive(Debug, Clone, Copy)]
pub struct AnyDecoder {
    name: &'static str,
}

pub fn as_any() -> AnyDecoder {
    AnyDecoder { name: "any" }
}

/// Same as [`as_any`], named for inputs that still need inspection
pub fn as_unknown() -> AnyDecoder {
    AnyDecoder { name: "unknown" }
}

impl Decoder for AnyDecoder {
    type Output = Value;

    fn name(&self) -> &str {
        self.name
    }

    fn decode(&self, input: &Value) -> DecodingResult<Value> {
        Ok(input.clone())
    }

    fn test(&self, _input: &Value) -> bool {
        true
    }
}

type DecodeFn<T> = Arc<dyn Fn(&Value) -> DecodingResult<T> + Send + Sync>;
type TestFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Decoder backed by arbitrary functions
///
/// `test` falls back to "decode succeeds" unless a dedicated predicate is
/// supplied with [`CustomDecoder::with_test`]. The predicate must agree with
/// the decode function.
///
/// ```
/// use decoda_core::{as_custom, failure, Decoder, Value};
///
/// let even = as_custom(|input: &Value| match input {
///     Value::Int(n) if n % 2 == 0 => Ok(*n),
///     _ => failure("expected even integer"),
/// })
/// .with_name("even");
///
/// assert_eq!(even.decode(&Value::Int(4)), Ok(4));
/// assert_eq!(even.name(), "even");
/// ```
pub struct CustomDecoder<T> {
    decode_fn: DecodeFn<T>,
    test_fn: Option<TestFn>,
    name: String,
}

pub fn as_custom<T, F>(decode_fn: F) -> CustomDecoder<T>
where
    F: Fn(&Value) -> DecodingResult<T> + Send + Sync + 'static,
{
    CustomDecoder {
        decode_fn: Arc::new(decode_fn),
        test_fn: None,
        name: "custom decoder".to_string(),
    }
}

impl<T> CustomDecoder<T> {
    pub fn with_test<P>(mut self, test_fn: P) -> Self
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.test_fn = Some(Arc::new(test_fn));
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<T> Clone for CustomDecoder<T> {
    fn clone(&self) -> Self {
        Self {
            decode_fn: Arc::clone(&self.decode_fn),
            test_fn: self.test_fn.clone(),
            name: self.name.clone(),
        }
    }
}

impl<T> fmt::Debug for CustomDecoder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomDecoder")
            .field("name", &self.name)
            .field("has_test", &self.test_fn.is_some())
            .finish()
    }
}

impl<T> Decoder for CustomDecoder<T> {
    type Output = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn decode(&self, input: &Value) -> DecodingResult<T> {
        (self.decode_fn)(input)
    }

    fn test(&self, input: &Value) -> bool {
        match &self.test_fn {
            Some(test_fn) => test_fn(input),
            None => (self.decode_fn)(input).is_ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoding::success;

    #[test]
    fn test_int() {
        assert_eq!(as_int().decode(&Value::Int(1)), Ok(1));
        assert_eq!(as_int().decode(&Value::Float(2.0)), Ok(2));
        assert_eq!(
            as_int().decode(&Value::Float(1.2)).unwrap_err().reason(),
            "$root: expected integer but got 1.2"
        );
        assert_eq!(
            as_int().decode(&Value::from("1")).unwrap_err().reason(),
            "$root: expected number but got string"
        );
        assert_eq!(
            as_int().decode(&Value::Float(f64::INFINITY)).unwrap_err().reason(),
            "$root: expected integer but got Infinity"
        );
        assert!(!as_int().test(&Value::Float(1e19)));
        assert_eq!(as_int().name(), "number");
    }

    #[test]
    fn test_int_keeps_wide_integers_exact() {
        assert_eq!(as_int().decode(&Value::Int(i64::MAX)), Ok(i64::MAX));
        assert_eq!(as_int().decode(&Value::Int(i64::MIN)), Ok(i64::MIN));
        assert_eq!(
            as_int().decode(&Value::Int(9_007_199_254_740_993)),
            Ok(9_007_199_254_740_993)
        );
        assert!(as_int().test(&Value::Int(i64::MAX)));
        assert!(!as_int().test(&Value::Float(f64::NAN)));
    }

    #[test]
    fn test_int_messages_use_exponent_form() {
        assert_eq!(
            as_int().decode(&Value::Float(1e-7)).unwrap_err().reason(),
            "$root: expected integer but got 1e-7"
        );
        assert_eq!(
            as_int().decode(&Value::Float(1e21)).unwrap_err().reason(),
            "$root: expected integer but got 1e+21"
        );
    }

    #[test]
    fn test_any_and_unknown() {
        let obj = Value::object([("a", 1)]);
        assert!(as_any().decode(&obj).unwrap().strict_eq(&obj));
        assert_eq!(as_any().decode(&Value::Undefined), Ok(Value::Undefined));
        assert!(as_unknown().test(&Value::Float(f64::NAN)));
        assert_eq!(as_any().name(), "any");
        assert_eq!(as_unknown().name(), "unknown");
    }

    #[test]
    fn test_custom_defaults() {
        let decoder = as_custom(|input: &Value| match input.as_str() {
            Some(s) if !s.is_empty() => success(s.to_string()),
            _ => failure("expected non-empty string"),
        });
        assert_eq!(decoder.name(), "custom decoder");
        assert_eq!(decoder.decode(&Value::from("x")), Ok("x".to_string()));
        assert!(decoder.test(&Value::from("x")));
        assert!(!decoder.test(&Value::from("")));
        assert_eq!(
            decoder.decode(&Value::Null).unwrap_err().reason(),
            "$root: expected non-empty string"
        );
    }

    #[test]
    fn test_custom_with_test_and_name() {
        let decoder = as_custom(|input: &Value| {
            if input.is_defined() {
                success(input.clone())
            } else {
                failure("expected defined value")
            }
        })
        .with_test(|input| input.is_defined())
        .with_name("defined");
        assert_eq!(decoder.name(), "defined");
        assert!(!decoder.test(&Value::Null));
        assert!(decoder.test(&Value::Bool(false)));
        assert!(decoder.clone().decode(&Value::Null).is_err());
    }
}
