//! Typed error handling for enumref.
//!
//! Every failure here is a build-time precondition violation: the
//! declaration text and the values handed to the table builder disagree, or
//! a manifest entry cannot be turned into a table. Lookups never fail; a miss
//! is an `Option::None`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for enumref operations.
#[derive(Error, Debug)]
pub enum ReflectError {
    /// The declaration text does not line up with the resolved values.
    #[error("Structural mismatch in `{type_name}`: expected {expected} enumerator(s), found {found}: {message}")]
    StructuralMismatch {
        type_name: String,
        expected: usize,
        found: usize,
        message: String,
    },

    /// The declaration text holds something that is not part of a
    /// `Name [= initializer]` clause.
    #[error("Unexpected `{text}` in `{type_name}` at byte {offset}: {message}")]
    UnexpectedText {
        type_name: String,
        offset: usize,
        text: String,
        message: String,
    },

    /// The declaration text ended inside a parenthesized initializer.
    #[error("Unbalanced parentheses in `{type_name}`: input ended at depth {depth}")]
    UnbalancedParentheses { type_name: String, depth: usize },

    /// Two enumerators share a name.
    #[error("Duplicate enumerator `{name}` in `{type_name}` (indices {first_index} and {second_index})")]
    DuplicateName {
        type_name: String,
        name: String,
        first_index: usize,
        second_index: usize,
    },

    /// An implicit enumerator follows the largest value of the representation.
    #[error("Implicit enumerator at index {index} overflows `{repr}`")]
    DiscriminantOverflow { index: usize, repr: &'static str },

    /// A literal initializer could not be read as a value of the representation.
    #[error("Invalid literal `{literal}` for `{repr}`: {message}")]
    InvalidLiteral {
        literal: String,
        repr: &'static str,
        message: String,
    },

    /// A manifest entry is unusable.
    #[error("Manifest error in entry `{entry}`: {message}")]
    Manifest { entry: String, message: String },

    /// No table with this name exists in a catalog.
    #[error("Unknown enum `{name}`")]
    UnknownEnum { name: String },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// I/O error when reading files
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl ReflectError {
    /// Create a structural mismatch error.
    pub fn mismatch(
        type_name: impl Into<String>,
        expected: usize,
        found: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::StructuralMismatch {
            type_name: type_name.into(),
            expected,
            found,
            message: message.into(),
        }
    }

    /// Create an unexpected text error.
    pub fn unexpected(
        type_name: impl Into<String>,
        offset: usize,
        text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::UnexpectedText {
            type_name: type_name.into(),
            offset,
            text: text.into(),
            message: message.into(),
        }
    }

    /// Create an invalid literal error.
    pub fn invalid_literal(
        literal: impl Into<String>,
        repr: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidLiteral {
            literal: literal.into(),
            repr,
            message: message.into(),
        }
    }

    /// Create a manifest error.
    pub fn manifest(entry: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Manifest {
            entry: entry.into(),
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Check if this error means the declaration itself is malformed.
    ///
    /// Structural errors are never recoverable: the declaration and its
    /// values must be fixed at the source.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::StructuralMismatch { .. }
                | Self::UnexpectedText { .. }
                | Self::UnbalancedParentheses { .. }
                | Self::DuplicateName { .. }
                | Self::DiscriminantOverflow { .. }
        )
    }

    /// Get the enum type name associated with this error, if any.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::StructuralMismatch { type_name, .. } => Some(type_name),
            Self::UnexpectedText { type_name, .. } => Some(type_name),
            Self::UnbalancedParentheses { type_name, .. } => Some(type_name),
            Self::DuplicateName { type_name, .. } => Some(type_name),
            Self::Manifest { entry, .. } => Some(entry),
            Self::UnknownEnum { name } => Some(name),
            _ => None,
        }
    }
}

/// Convenience type alias for enumref results.
pub type ReflectResult<T> = Result<T, ReflectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_display() {
        let err = ReflectError::mismatch("Ports", 4, 3, "too few identifiers");
        let text = err.to_string();
        assert!(text.contains("`Ports`"));
        assert!(text.contains("expected 4"));
        assert!(text.contains("found 3"));
        assert_eq!(err.type_name(), Some("Ports"));
    }

    #[test]
    fn test_is_structural() {
        assert!(ReflectError::mismatch("E", 1, 0, "").is_structural());
        assert!(ReflectError::DuplicateName {
            type_name: "E".into(),
            name: "A".into(),
            first_index: 0,
            second_index: 2,
        }
        .is_structural());
        assert!(!ReflectError::invalid_literal("x", "u8", "not a number").is_structural());
        assert!(!ReflectError::UnknownEnum { name: "E".into() }.is_structural());
    }

    #[test]
    fn test_unexpected_text_display() {
        let err = ReflectError::unexpected("Kw", 1, "#type", "expected `=` or `,` after `r`");
        assert!(err.is_structural());
        assert_eq!(err.type_name(), Some("Kw"));
        assert_eq!(
            err.to_string(),
            "Unexpected `#type` in `Kw` at byte 1: expected `=` or `,` after `r`"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = ReflectError::io(
            "/missing/enumref.toml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("/missing/enumref.toml"));
    }
}
