//! Object decoder built from an ordered field table
//!
//! Each entry maps a source field of the input to a decoder and an output
//! alias. Decoding is superset matching: extra input fields are accepted and
//! dropped, and the output holds exactly the declared aliases.
//!
//! Builders never touch the receiver. `with_field`, `without_field` and
//! `and` return a new decoder with a copied table, so decoders published as
//! shared constants keep their behavior.
//!
//! ```
//! use decoda_core::{as_int, as_object, as_string, Decoder, Value};
//!
//! let person = as_object()
//!     .with_field_alias("full_name", as_string(), "name")
//!     .with_field("age", as_int());
//!
//! let input = Value::object([
//!     ("full_name", Value::from("Ada")),
//!     ("age", Value::Int(30)),
//!     ("extra", Value::Bool(true)),
//! ]);
//! let output = person.decode(&input).unwrap();
//! assert_eq!(output.keys().collect::<Vec<_>>(), vec!["age", "name"]);
//! ```
//!
//! Copyright (c) 2025 Decoda Team
//! Licensed under the Apache-2.0 license

use super::basic::mismatch;
use super::transform::TryMapDecoder;
use super::{BoxDecoder, Decoder, DecoderExt};
use crate::decoding::{DecodingFailure, DecodingResult, PathSegment};
use crate::error::{Error, Result};
use crate::value::{Map, Value};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// How `and_with` treats a source field declared on both sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// The right-hand entry replaces the left-hand one
    #[default]
    RightBiased,
    /// Fail when both sides declare the field with a different alias or decoder
    RejectConflicts,
}

#[derive(Clone)]
struct FieldEntry {
    field: String,
    alias: String,
    decoder: BoxDecoder<Value>,
}

impl FieldEntry {
    fn describe(&self) -> String {
        if self.field == self.alias {
            format!("{}: {}", self.field, self.decoder.name())
        } else {
            format!("{} as {}: {}", self.field, self.alias, self.decoder.name())
        }
    }

    fn same_as(&self, other: &FieldEntry) -> bool {
        self.alias == other.alias
            && std::ptr::eq(
                Arc::as_ptr(&self.decoder) as *const (),
                Arc::as_ptr(&other.decoder) as *const (),
            )
    }
}

/// Decoder for objects with a declared set of fields
#[derive(Clone)]
pub struct ObjectDecoder {
    fields: Vec<FieldEntry>,
    name: String,
}

/// An object decoder with no fields; it accepts any object
pub fn as_object() -> ObjectDecoder {
    ObjectDecoder::default()
}

/// Build an object decoder from `(field, decoder)` pairs, in order
pub fn from_object<I, K>(fields: I) -> ObjectDecoder
where
    I: IntoIterator<Item = (K, BoxDecoder<Value>)>,
    K: Into<String>,
{
    fields
        .into_iter()
        .fold(ObjectDecoder::default(), |decoder, (field, entry_decoder)| {
            let field = field.into();
            decoder.with_entry(FieldEntry {
                alias: field.clone(),
                field,
                decoder: entry_decoder,
            })
        })
}

/// Intersection of two object decoders, same as `left.and(right)`
pub fn as_both_of(left: &ObjectDecoder, right: &ObjectDecoder) -> ObjectDecoder {
    left.and(right)
}

impl Default for ObjectDecoder {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            name: "{}".to_string(),
        }
    }
}

impl ObjectDecoder {
    fn from_fields(fields: Vec<FieldEntry>) -> Self {
        let rendered: Vec<String> = fields
            .iter()
            .map(|entry| format!("{}: {}", entry.field, entry.decoder.name()))
            .collect();
        let name = format!("{{{}}}", rendered.join(", "));
        Self { fields, name }
    }

    /// Insert or replace the entry for `entry.field`, keeping table order
    fn with_entry(&self, entry: FieldEntry) -> Self {
        let mut fields = self.fields.clone();
        match fields.iter_mut().find(|existing| existing.field == entry.field) {
            Some(existing) => *existing = entry,
            None => fields.push(entry),
        }
        Self::from_fields(fields)
    }

    /// Declare `field`, output under the same name
    pub fn with_field<D>(&self, field: impl Into<String>, decoder: D) -> Self
    where
        D: Decoder + Send + Sync + 'static,
        D::Output: Into<Value>,
    {
        let field = field.into();
        self.with_field_alias(field.clone(), decoder, field)
    }

    /// Declare `field`, output under `alias`
    ///
    /// Re-declaring a field replaces its entry, whatever its previous alias.
    pub fn with_field_alias<D>(&self, field: impl Into<String>, decoder: D, alias: impl Into<String>) -> Self
    where
        D: Decoder + Send + Sync + 'static,
        D::Output: Into<Value>,
    {
        self.with_entry(FieldEntry {
            field: field.into(),
            alias: alias.into(),
            decoder: decoder.erased(),
        })
    }

    /// Remove the entry whose output alias is `alias`; unchanged if none matches
    pub fn without_field(&self, alias: &str) -> Self {
        if !self.fields.iter().any(|entry| entry.alias == alias) {
            return self.clone();
        }
        Self::from_fields(
            self.fields
                .iter()
                .filter(|entry| entry.alias != alias)
                .cloned()
                .collect(),
        )
    }

    /// Merge two field tables; on a shared source field the right-hand entry wins
    pub fn and(&self, other: &ObjectDecoder) -> Self {
        let mut fields = self.fields.clone();
        for entry in &other.fields {
            match fields.iter_mut().find(|existing| existing.field == entry.field) {
                Some(existing) => {
                    if !existing.same_as(entry) {
                        tracing::debug!(
                            field = %entry.field,
                            replaced = %existing.describe(),
                            with = %entry.describe(),
                            "right-hand field entry overrides left-hand entry"
                        );
                    }
                    *existing = entry.clone();
                }
                None => fields.push(entry.clone()),
            }
        }
        Self::from_fields(fields)
    }

    /// Merge two field tables under an explicit policy
    pub fn and_with(&self, other: &ObjectDecoder, policy: MergePolicy) -> Result<Self> {
        if policy == MergePolicy::RejectConflicts {
            for entry in &other.fields {
                let conflict = self
                    .fields
                    .iter()
                    .find(|existing| existing.field == entry.field && !existing.same_as(entry));
                if let Some(existing) = conflict {
                    return Err(Error::FieldConflict {
                        field: entry.field.clone(),
                        left: existing.describe(),
                        right: entry.describe(),
                    });
                }
            }
        }
        Ok(self.and(other))
    }

    /// Deserialize the decoded object into `T`
    ///
    /// A serde failure becomes a message at the object's own path.
    pub fn typed<T: DeserializeOwned>(&self) -> TryMapDecoder<ObjectDecoder, fn(Map) -> DecodingResult<T>> {
        self.clone()
            .try_map(deserialize_map::<T> as fn(Map) -> DecodingResult<T>)
    }

    /// Source field names in table order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|entry| entry.field.as_str()).collect()
    }

    /// Output aliases in table order
    pub fn aliases(&self) -> Vec<&str> {
        self.fields.iter().map(|entry| entry.alias.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn deserialize_map<T: DeserializeOwned>(map: Map) -> DecodingResult<T> {
    let json = Value::from(map)
        .to_json()
        .map_err(|err| DecodingFailure::message(err.to_string()))?;
    serde_json::from_value(json).map_err(|err| DecodingFailure::message(err.to_string()))
}

impl fmt::Debug for ObjectDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectDecoder")
            .field("name", &self.name)
            .field("aliases", &self.aliases())
            .finish()
    }
}

impl Decoder for ObjectDecoder {
    type Output = Map;

    fn name(&self) -> &str {
        &self.name
    }

    fn decode(&self, input: &Value) -> DecodingResult<Map> {
        if input.as_object().is_none() {
            tracing::trace!(decoder = %self.name, kind = %input.kind(), "object decoder rejected input");
            return mismatch("object", input);
        }

        let mut output = Map::new();
        let mut errors = Vec::new();
        for entry in &self.fields {
            match entry.decoder.decode(input.get(&entry.field)) {
                Ok(value) => {
                    output.insert(entry.alias.clone(), value);
                }
                Err(failure) => {
                    errors.extend(failure.at(PathSegment::field(&entry.field)).into_errors());
                }
            }
        }

        if errors.is_empty() {
            Ok(output)
        } else {
            Err(DecodingFailure::new(errors))
        }
    }

    fn test(&self, input: &Value) -> bool {
        input.as_object().is_some()
            && self
                .fields
                .iter()
                .all(|entry| entry.decoder.test(input.get(&entry.field)))
    }
}
