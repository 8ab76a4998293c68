// Error types for rule loading
//
// Schema errors are recorded (never raised) while a rule document is unpacked;
// they only surface to the caller folded into a ParseCountError. LoadError covers
// the failures that abort a load outright.

use crate::diagnostics::DocPath;
use std::fmt;
use thiserror::Error;

/// A single problem found while unpacking a rule document.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("expected {expected}, got {actual}")]
    InvalidType {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("missing required key {0:?}")]
    MissingKey(String),

    #[error("invalid value {value:?}, expected one of {}", .allowed.join(", "))]
    InvalidEnum {
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("invalid regex: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("value must not be empty")]
    EmptyValue,

    #[error("list must not be empty")]
    EmptyList,

    #[error("min ({min}) is greater than max ({max})")]
    InvalidRange { min: f64, max: f64 },

    #[error("precision {precision} is greater than the maximum of {max}")]
    PrecisionTooLarge { precision: usize, max: usize },

    #[error("node requires at least one of \"match\", \"actions\", or \"children\"")]
    EmptyNode,
}

/// A schema error qualified with the document location it was found at.
#[derive(Debug, Error)]
#[error("{path}: {error}")]
pub struct PathError {
    pub path: DocPath,
    #[source]
    pub error: SchemaError,
}

/// Aggregate error returned when at least one schema error was recorded.
///
/// `errors` is only populated when the loader used its own collector; an
/// external handler has already seen every error and owns them.
#[derive(Debug)]
pub struct ParseCountError {
    pub count: usize,
    pub name: String,
    pub errors: Vec<PathError>,
}

impl fmt::Display for ParseCountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} errors while parsing {:?}", self.count, self.name)?;
        for error in &self.errors {
            write!(f, "\n{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseCountError {}

/// Failure of a whole load call.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {name:?}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {name:?}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid YAML in {name:?}: {source}")]
    Yaml {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{name:?} is not a rule document: expected object or array, got {actual}")]
    NotARuleDocument { name: String, actual: &'static str },

    #[error(transparent)]
    Parse(#[from] ParseCountError),
}

/// Result type for whole-document load operations
pub type LoadResult<T> = Result<T, LoadError>;
