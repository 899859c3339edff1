//! Decoding results and the path-addressed error tree
//!
//! A decode either succeeds with a value or fails with a tree of errors in
//! which every leaf message can be traced back to the field and index
//! accesses that produced it. The printer flattens that tree into
//! `$root.field[0]: message` lines.
//!
//! Copyright (c) 2025 Decoda Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod printer;

pub use error::{failure, success, DecodingError, DecodingFailure, DecodingResult, PathSegment};
pub use printer::{pretty_print, render_lines, RenderOptions, ROOT_LABEL};
