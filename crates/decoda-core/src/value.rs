//! The dynamic input universe decoders operate on
//!
//! `Value` is a closed set of kinds. Scalars compare by value while arrays,
//! objects and instances are reference values: cloning shares the
//! allocation, and [`Value::strict_eq`] compares them by identity.
//!
//! Copyright (c) 2025 Decoda Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Ordered string-keyed map backing object values
pub type Map = BTreeMap<String, Value>;

static UNDEFINED: Value = Value::Undefined;

/// A dynamic, untyped input value
#[derive(Debug, Clone)]
pub enum Value {
    /// No value at all, e.g. a missing object field
    Undefined,
    /// An explicit empty value
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    BigInt(i128),
    String(String),
    Array(Arc<Vec<Value>>),
    Object(Arc<Map>),
    /// An opaque host object, only ever equal to itself
    Instance(Instance),
}

/// The observed kind of a value, as reported in failure messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Undefined,
    Null,
    Boolean,
    Number,
    BigInt,
    String,
    Array,
    Object,
    Instance,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::BigInt => "bigint",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Instance => "instance",
        };
        f.write_str(word)
    }
}

/// An opaque host object with a class name
#[derive(Clone)]
pub struct Instance {
    class_name: Arc<str>,
    data: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    /// Wrap `data` as a new, unique instance of `class_name`
    pub fn new<T: Any + Send + Sync>(class_name: impl Into<String>, data: T) -> Self {
        Self {
            class_name: Arc::from(class_name.into()),
            data: Arc::new(data),
        }
    }

    /// The name of the class this instance was created from
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Borrow the wrapped data if it is a `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }

    /// Whether both handles point at the same instance
    pub fn same_instance(&self, other: &Instance) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.data) as *const (),
            Arc::as_ptr(&other.data) as *const (),
        )
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class_name", &self.class_name)
            .finish_non_exhaustive()
    }
}

impl Value {
    /// Build an array value
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(Arc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Build an object value from key/value pairs
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(Arc::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Parse JSON text into a value
    pub fn from_json_str(text: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        Ok(Value::from(json))
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Undefined => ValueKind::Undefined,
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Int(_) | Value::Float(_) => ValueKind::Number,
            Value::BigInt(_) => ValueKind::BigInt,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::Instance(_) => ValueKind::Instance,
        }
    }

    /// Look up an object field; absent fields and non-objects yield `Undefined`
    pub fn get(&self, field: &str) -> &Value {
        match self {
            Value::Object(map) => map.get(field).unwrap_or(&UNDEFINED),
            _ => &UNDEFINED,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Neither undefined nor null
    pub fn is_defined(&self) -> bool {
        !self.is_undefined() && !self.is_null()
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Float(n) if n.is_nan())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric view of `Int` and `Float` values
    ///
    /// Lossy for integers beyond 2^53. Compare with [`Value::strict_eq`]
    /// instead of comparing the results.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Identity comparison: value equality for scalars, reference equality
    /// for arrays, objects and instances. `NaN` never matches.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => a.same_instance(b),
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(x)) | (Value::Float(x), Value::Int(a)) => {
                float_to_i64(*x) == Some(*a)
            }
            _ => false,
        }
    }

    /// Whether the value is compared by reference rather than by content
    pub fn is_reference(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_) | Value::Instance(_))
    }

    /// Convert back to JSON; fails for values JSON cannot carry
    pub fn to_json(&self) -> Result<serde_json::Value> {
        use serde_json::Value as Json;

        Ok(match self {
            Value::Undefined | Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(n) => Json::from(*n),
            Value::Float(n) => serde_json::Number::from_f64(*n)
                .map(Json::Number)
                .ok_or_else(|| Error::Conversion {
                    message: format!("{} has no JSON representation", format_number(*n)),
                })?,
            Value::BigInt(n) => {
                if let Ok(small) = i64::try_from(*n) {
                    Json::from(small)
                } else if let Ok(unsigned) = u64::try_from(*n) {
                    Json::from(unsigned)
                } else {
                    return Err(Error::Conversion {
                        message: format!("bigint {} does not fit a JSON number", n),
                    });
                }
            }
            Value::String(s) => Json::String(s.clone()),
            Value::Array(items) => Json::Array(
                items
                    .iter()
                    .map(Value::to_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(map) => {
                let mut out = serde_json::Map::new();
                for (key, value) in map.iter().filter(|(_, v)| !v.is_undefined()) {
                    out.insert(key.clone(), value.to_json()?);
                }
                Json::Object(out)
            }
            Value::Instance(instance) => {
                return Err(Error::Conversion {
                    message: format!("instance of {} has no JSON representation", instance.class_name()),
                })
            }
        })
    }
}

// -2^63 and 2^63 as floats; every integral float in [MIN, MAX) fits an i64
pub(crate) const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
pub(crate) const I64_MAX_F64: f64 = 9_223_372_036_854_775_808.0;

/// The `i64` a float stands for exactly, if any
pub(crate) fn float_to_i64(n: f64) -> Option<i64> {
    if n.fract() == 0.0 && (I64_MIN_F64..I64_MAX_F64).contains(&n) {
        Some(n as i64)
    } else {
        None
    }
}

/// Render a number the way it reads in a message: `2`, `30.5`, `NaN`,
/// `Infinity`, `1e-7`, `1.5e+300`
///
/// Magnitudes below `1e-6` or from `1e21` up use exponent notation with the
/// shortest round-tripping digits.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if (1e-6..1e21).contains(&n.abs()) {
        n.to_string()
    } else {
        let exp = format!("{:e}", n);
        match exp.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => exp,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => f.write_str(&format_number(*n)),
            Value::BigInt(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if item.is_defined() {
                        write!(f, "{}", item)?;
                    }
                }
                Ok(())
            }
            Value::Object(_) => f.write_str("[object Object]"),
            Value::Instance(instance) => write!(f, "[object {}]", instance.class_name()),
        }
    }
}

/// Structural equality, used for comparing decoded output.
/// Instances still compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => self.strict_eq(other),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::BigInt(i128::from(u))
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::array(items),
            Json::Object(map) => Value::object(map),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Value::BigInt(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(Arc::new(map))
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Instance(instance)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::array(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_words() {
        assert_eq!(Value::Undefined.kind().to_string(), "undefined");
        assert_eq!(Value::Int(1).kind().to_string(), "number");
        assert_eq!(Value::Float(1.5).kind().to_string(), "number");
        assert_eq!(Value::BigInt(1).kind().to_string(), "bigint");
        assert_eq!(Value::array(vec![1]).kind().to_string(), "array");
        assert_eq!(Value::Instance(Instance::new("DB", ())).kind().to_string(), "instance");
    }

    #[test]
    fn test_get_missing_field_is_undefined() {
        let obj = Value::object([("a", 1)]);
        assert_eq!(obj.get("a"), &Value::Int(1));
        assert!(obj.get("b").is_undefined());
        assert!(Value::Null.get("a").is_undefined());
    }

    #[test]
    fn test_strict_eq_identity_for_references() {
        let a = Value::object([("foo", 1)]);
        let b = Value::object([("foo", 1)]);
        assert!(a.strict_eq(&a.clone()));
        assert!(!a.strict_eq(&b));
        assert_eq!(a, b);

        assert!(Value::Int(2).strict_eq(&Value::Float(2.0)));
        assert!(!Value::Float(f64::NAN).strict_eq(&Value::Float(f64::NAN)));
        assert!(!Value::Null.strict_eq(&Value::Undefined));
    }

    #[test]
    fn test_strict_eq_wide_integers_are_exact() {
        let wide = 9_007_199_254_740_993i64;
        assert!(!Value::Int(wide).strict_eq(&Value::Int(wide - 1)));
        assert!(Value::Int(wide).strict_eq(&Value::Int(wide)));

        // 2^53 + 1 has no float representation; the nearest float is 2^53
        assert!(!Value::Int(wide).strict_eq(&Value::Float(wide as f64)));
        assert!(Value::Float((wide - 1) as f64).strict_eq(&Value::Int(wide - 1)));

        assert!(!Value::Int(i64::MAX).strict_eq(&Value::Float(9_223_372_036_854_775_808.0)));
        assert!(!Value::Int(1).strict_eq(&Value::Float(1.5)));
    }

    #[test]
    fn test_format_number_switches_to_exponent_form() {
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(5e-7), "5e-7");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(0.0000015), "0.0000015");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-1e21), "-1e+21");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1.5e300), "1.5e+300");
        assert_eq!(format_number(-2.5e-10), "-2.5e-10");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_instance_identity() {
        let db = Instance::new("DB", 42u32);
        let other = Instance::new("DB", 42u32);
        assert!(db.same_instance(&db.clone()));
        assert!(!db.same_instance(&other));
        assert_eq!(db.downcast_ref::<u32>(), Some(&42));
    }

    #[test]
    fn test_display_matches_message_rendering() {
        assert_eq!(Value::Float(30.5).to_string(), "30.5");
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::array(vec![Value::Int(1), Value::Null, Value::from("x")]).to_string(), "1,,x");
        assert_eq!(Value::object([("a", 1)]).to_string(), "[object Object]");
    }

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({"name": "Ada", "age": 30, "ratio": 0.5, "big": u64::MAX}));
        assert_eq!(value.get("name"), &Value::from("Ada"));
        assert_eq!(value.get("age"), &Value::Int(30));
        assert_eq!(value.get("ratio"), &Value::Float(0.5));
        assert_eq!(value.get("big"), &Value::BigInt(i128::from(u64::MAX)));
    }

    #[test]
    fn test_to_json_drops_undefined_fields() {
        let value = Value::object([("a", Value::Undefined), ("b", Value::Int(1))]);
        assert_eq!(value.to_json().unwrap(), json!({"b": 1}));

        let array = Value::array(vec![Value::Undefined, Value::Int(1)]);
        assert_eq!(array.to_json().unwrap(), json!([null, 1]));
    }

    #[test]
    fn test_to_json_rejects_unrepresentable() {
        assert!(Value::Float(f64::INFINITY).to_json().is_err());
        assert!(Value::BigInt(i128::MAX).to_json().is_err());
        assert!(Value::Instance(Instance::new("DB", ())).to_json().is_err());
    }

    #[test]
    fn test_from_json_str() {
        let value = Value::from_json_str(r#"[1, "two"]"#).unwrap();
        assert_eq!(value, Value::array(vec![Value::Int(1), Value::from("two")]));
        assert!(matches!(Value::from_json_str("{"), Err(Error::Json { .. })));
    }
}
