//! Flattening of error trees into path-prefixed lines
//!
//! Each leaf becomes one line: the root label, then `.field` / `[index]` for
//! every segment on the way down, then `: ` and the message. Lines appear in
//! collection order.

use super::error::DecodingFailure;

/// Label every rendered path starts with
pub const ROOT_LABEL: &str = "$root";

/// Rendering options for the printer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Label printed in front of every path
    pub root_label: String,
    /// Text placed between rendered lines
    pub separator: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            root_label: ROOT_LABEL.to_string(),
            separator: "\n".to_string(),
        }
    }
}

impl RenderOptions {
    /// Use a different root label
    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = label.into();
        self
    }

    /// Use a different line separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Render a failure with these options
    pub fn render(&self, failure: &DecodingFailure) -> String {
        render_lines(failure, self).join(&self.separator)
    }
}

/// One line per leaf error
pub fn render_lines(failure: &DecodingFailure, options: &RenderOptions) -> Vec<String> {
    failure.map(|message, paths| {
        let mut line = options.root_label.clone();
        for segment in paths {
            line.push_str(&segment.to_string());
        }
        line.push_str(": ");
        line.push_str(message);
        line
    })
}

/// Render a failure with the default `$root` label, one line per leaf
pub fn pretty_print(failure: &DecodingFailure) -> String {
    RenderOptions::default().render(failure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoding::{DecodingError, PathSegment};

    #[test]
    fn test_root_message() {
        assert_eq!(pretty_print(&DecodingFailure::message("message")), "$root: message");
    }

    #[test]
    fn test_nested_paths() {
        let failure = DecodingFailure::new(vec![DecodingError::Nested {
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
        }]);

        assert_eq!(
            pretty_print(&failure),
            "$root.foo.bar: expected x but got y\n$root.foo[1]: expected 0 but got 1"
        );
    }

    #[test]
    fn test_custom_options() {
        let failure = DecodingFailure::message("a")
            .concat(DecodingFailure::message("b"))
            .at(PathSegment::field("x"));
        let options = RenderOptions::default().with_root_label("$").with_separator("; ");
        assert_eq!(options.render(&failure), "$.x: a; $.x: b");
    }

    #[test]
    fn test_empty_failure_renders_nothing() {
        assert_eq!(pretty_print(&DecodingFailure::new(Vec::new())), "");
    }
}
