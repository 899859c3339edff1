//! A tri-state optional value
//!
//! `Optional` keeps the two ways a value can be absent apart: a field that
//! was never there (`Missing`) and one that was explicitly empty (`Null`).
//! Call sites can then tell an intentionally absent field from a decode
//! failure and from each other.

use crate::value::Value;

/// Either no value (missing or explicitly null) or a present `T`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Optional<T> {
    /// The value was not there at all
    #[default]
    Missing,
    /// The value was explicitly empty
    Null,
    /// A present value
    Present(T),
}

impl<T> Optional<T> {
    /// True when a value is present
    pub fn has_value(&self) -> bool {
        matches!(self, Optional::Present(_))
    }

    /// True when no value is present
    pub fn is_empty(&self) -> bool {
        !self.has_value()
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Optional::Missing)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Optional::Null)
    }

    /// Borrow the contained value
    pub fn get(&self) -> Option<&T> {
        match self {
            Optional::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Optional<&T> {
        match self {
            Optional::Missing => Optional::Missing,
            Optional::Null => Optional::Null,
            Optional::Present(value) => Optional::Present(value),
        }
    }

    /// The contained value or `default`
    pub fn get_or_else(self, default: T) -> T {
        match self {
            Optional::Present(value) => value,
            _ => default,
        }
    }

    /// Whether a value is present and equal to `other`
    pub fn equals(&self, other: &T) -> bool
    where
        T: PartialEq,
    {
        self.get() == Some(other)
    }

    /// Whether a value is present and satisfies `predicate`
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&T) -> bool,
    {
        self.get().is_some_and(predicate)
    }

    /// Transform a present value; empty states carry over unchanged
    pub fn map<U, F>(self, transformer: F) -> Optional<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Optional::Missing => Optional::Missing,
            Optional::Null => Optional::Null,
            Optional::Present(value) => Optional::Present(transformer(value)),
        }
    }

    /// Like `map`, but the transformer returns an `Optional` itself
    pub fn flat_map<U, F>(self, transformer: F) -> Optional<U>
    where
        F: FnOnce(T) -> Optional<U>,
    {
        match self {
            Optional::Missing => Optional::Missing,
            Optional::Null => Optional::Null,
            Optional::Present(value) => transformer(value),
        }
    }

    /// This optional if it has a value, `alternative` otherwise
    pub fn or_else(self, alternative: Optional<T>) -> Optional<T> {
        if self.has_value() {
            self
        } else {
            alternative
        }
    }

    /// Collapse both empty states into `None`
    pub fn into_option(self) -> Option<T> {
        match self {
            Optional::Present(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Optional<Optional<T>> {
    /// Remove one level of nesting, keeping the innermost state
    pub fn flatten(self) -> Optional<T> {
        self.flat_map(|inner| inner)
    }
}

/// `None` is treated as an explicit empty value
impl<T> From<Option<T>> for Optional<T> {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Optional::Null, Optional::Present)
    }
}

impl<T: Into<Value>> From<Optional<T>> for Value {
    fn from(opt: Optional<T>) -> Self {
        match opt {
            Optional::Missing => Value::Undefined,
            Optional::Null => Value::Null,
            Optional::Present(value) => value.into(),
        }
    }
}
