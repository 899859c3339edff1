//! Decoding failure types
//!
//! Copyright (c) 2025 Decoda Team
//! Licensed under the Apache-2.0 license

use super::printer::pretty_print;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a decode: the decoded value or the failure tree
pub type DecodingResult<T> = Result<T, DecodingFailure>;

/// One step of the access path leading to an error
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathSegment {
    /// An object field, rendered as `.name`
    Field(String),
    /// An array or tuple position, rendered as `[index]`
    Index(usize),
}

impl PathSegment {
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    pub fn index(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{}", name),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// A node of the error tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecodingError {
    /// A leaf message such as `expected string but got null`
    Message(String),
    /// Errors that occurred below a field or index
    Nested {
        path: PathSegment,
        errors: Vec<DecodingError>,
    },
}

impl DecodingError {
    pub fn message(message: impl Into<String>) -> Self {
        DecodingError::Message(message.into())
    }

    fn visit<'a>(&'a self, paths: &mut Vec<&'a PathSegment>, fun: &mut dyn FnMut(&'a str, &[&'a PathSegment])) {
        match self {
            DecodingError::Message(message) => fun(message, paths),
            DecodingError::Nested { path, errors } => {
                paths.push(path);
                for error in errors {
                    error.visit(paths, fun);
                }
                paths.pop();
            }
        }
    }
}

/// A failed decode, carrying every collected error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodingFailure {
    errors: Vec<DecodingError>,
}

impl DecodingFailure {
    pub fn new(errors: Vec<DecodingError>) -> Self {
        Self { errors }
    }

    /// A failure with a single leaf message at the current path
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            errors: vec![DecodingError::message(message)],
        }
    }

    pub fn errors(&self) -> &[DecodingError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<DecodingError> {
        self.errors
    }

    /// Place this failure's errors and then `other`'s side by side
    pub fn concat(mut self, other: DecodingFailure) -> Self {
        self.errors.extend(other.errors);
        self
    }

    /// Nest the whole failure under one path segment
    pub fn at(self, path: PathSegment) -> Self {
        Self {
            errors: vec![DecodingError::Nested {
                path,
                errors: self.errors,
            }],
        }
    }

    /// Visit every leaf message together with the path that leads to it,
    /// depth first and in collection order
    pub fn for_each<F>(&self, mut fun: F)
    where
        F: FnMut(&str, &[&PathSegment]),
    {
        let mut paths = Vec::new();
        for error in &self.errors {
            error.visit(&mut paths, &mut |message, path| fun(message, path));
        }
    }

    /// Transform every leaf message and its path
    pub fn map<U, F>(&self, mut fun: F) -> Vec<U>
    where
        F: FnMut(&str, &[&PathSegment]) -> U,
    {
        let mut out = Vec::new();
        self.for_each(|message, paths| out.push(fun(message, paths)));
        out
    }

    /// Number of leaf messages in the tree
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.for_each(|_, _| count += 1);
        count
    }

    /// The flattened, human readable rendering of every leaf
    pub fn reason(&self) -> String {
        pretty_print(self)
    }
}

impl From<DecodingError> for DecodingFailure {
    fn from(error: DecodingError) -> Self {
        Self { errors: vec![error] }
    }
}

impl fmt::Display for DecodingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason())
    }
}

impl std::error::Error for DecodingFailure {}

/// Successful decoding result
pub fn success<T>(value: T) -> DecodingResult<T> {
    Ok(value)
}

/// Failed decoding result with a single message
pub fn failure<T>(message: impl Into<String>) -> DecodingResult<T> {
    Err(DecodingFailure::message(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> DecodingFailure {
        DecodingFailure::new(vec![DecodingError::Nested {
            path: PathSegment::field("foo"),
            errors: vec![
                DecodingError::Nested {
                    path: PathSegment::field("bar"),
                    errors: vec![DecodingError::message("expected x but got y")],
                },
                DecodingError::Nested {
                    path: PathSegment::index(1),
                    errors: vec![DecodingError::message("expected 0 but got 1")],
                },
            ],
        }])
    }

    #[test]
    fn test_concat_preserves_order() {
        let joined = DecodingFailure::message("first").concat(DecodingFailure::message("second"));
        assert_eq!(
            joined.errors(),
            &[DecodingError::message("first"), DecodingError::message("second")]
        );
    }

    #[test]
    fn test_at_nests_everything() {
        let failure = DecodingFailure::message("a")
            .concat(DecodingFailure::message("b"))
            .at(PathSegment::index(3));
        assert_eq!(failure.errors().len(), 1);
        assert_eq!(failure.leaf_count(), 2);
        assert_eq!(failure.reason(), "$root[3]: a\n$root[3]: b");
    }

    #[test]
    fn test_for_each_traces_full_path() {
        let mut seen = Vec::new();
        nested().for_each(|message, paths| {
            let path: String = paths.iter().map(|p| p.to_string()).collect();
            seen.push(format!("{} {}", path, message));
        });
        assert_eq!(seen, vec![".foo.bar expected x but got y", ".foo[1] expected 0 but got 1"]);
    }

    #[test]
    fn test_map_collects_per_leaf() {
        let depths = nested().map(|_, paths| paths.len());
        assert_eq!(depths, vec![2, 2]);
    }

    #[test]
    fn test_helpers() {
        assert_eq!(success(5), Ok(5));
        let result: DecodingResult<i32> = failure("nope");
        assert_eq!(result.unwrap_err().reason(), "$root: nope");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(nested()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "errors": [{
                    "path": {"field": "foo"},
                    "errors": [
                        {"path": {"field": "bar"}, "errors": ["expected x but got y"]},
                        {"path": {"index": 1}, "errors": ["expected 0 but got 1"]}
                    ]
                }]
            })
        );
        let back: DecodingFailure = serde_json::from_value(json).unwrap();
        assert_eq!(back, nested());
    }
}
