//! Decoda Core - Composable runtime decoders for dynamic values
//!
//! This crate validates untyped input values against an expected shape and
//! either produces a typed result or a path-addressed error tree that
//! flattens into `$root.field[0]: message` lines.
//!
//! # Main Components
//!
//! - **Values**: the closed input universe [`Value`], bridged from `serde_json`
//! - **Decoding results**: [`DecodingResult`], [`DecodingFailure`] and the printer
//! - **Decoders**: the [`Decoder`] trait, generic operations on [`DecoderExt`],
//!   and the primitive, object, array, tuple, union and optional decoders
//! - **Error Handling**: the crate [`Error`] type using `thiserror`
//!
//! # Example
//!
//! ```
//! use decoda_core::{as_int, as_object, as_string, Decoder, Value};
//!
//! let person = as_object()
//!     .with_field_alias("full_name", as_string(), "name")
//!     .with_field("age", as_int());
//!
//! let input = Value::from_json_str(r#"{"full_name": "Ada", "age": 30.5}"#).unwrap();
//! let failure = person.decode(&input).unwrap_err();
//! assert_eq!(failure.reason(), "$root.age: expected integer but got 30.5");
//! ```

pub mod decoder;
pub mod decoding;
pub mod error;
pub mod optional;
pub mod value;

mod proptest_strategies;

// Re-export main types for convenience
pub use decoder::{
    // Contract
    BoxDecoder, Decoder, DecoderExt,

    // Primitive decoders
    as_any, as_bigint, as_boolean, as_const, as_custom, as_int, as_null, as_number,
    as_string, as_undefined, as_unknown,

    // Structural decoders
    as_array, as_both_of, as_object, as_one_of, as_optional, as_optional_value, as_tuple,
    from_object,

    // Decoder types
    AnyDecoder, ArrayDecoder, BigIntDecoder, BooleanDecoder, ConstDecoder, CustomDecoder,
    IntDecoder, MapDecoder, MergePolicy, NullDecoder, NumberDecoder, ObjectDecoder,
    OneOf, OneOfDecoder, OptionalDecoder, OptionalValueDecoder, Or, StringDecoder,
    TryMapDecoder, TupleDecoder, TupleItems, UndefinedDecoder,
};
pub use decoding::{
    failure, pretty_print, render_lines, success, DecodingError, DecodingFailure,
    DecodingResult, PathSegment, RenderOptions, ROOT_LABEL,
};
pub use error::{Error, Result};
pub use optional::Optional;
pub use value::{Instance, Map, Value, ValueKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
