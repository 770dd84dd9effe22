//! Error types for class inspection

use thiserror::Error;

use crate::metadata::Visibility;

/// Errors raised by instantiation, descriptor building and class resolution
///
/// The lookup operations (`get_annotated_fields`, `get_all_declared_methods`)
/// never fail; an absent match is an empty set.
#[derive(Debug, Error)]
pub enum InspectError {
    /// No declared constructor satisfies the arity and per-argument checks
    #[error("Can't find matching constructor for {class} with {arity} argument(s)")]
    NoMatchingConstructor {
        /// Name of the inspected class
        class: String,
        /// Number of arguments supplied
        arity: usize,
    },

    /// The constructor body itself failed; carried through untouched
    #[error(transparent)]
    Invocation(anyhow::Error),

    /// The permission policy forbids suppressing access checks
    #[error("Permission denied: cannot open {visibility} constructor of {class}")]
    PermissionDenied {
        /// Name of the declaring class
        class: String,
        /// Visibility of the constructor that was matched
        visibility: Visibility,
    },

    /// A non-public constructor was invoked without being made accessible
    #[error("Illegal access: constructor of {class} is {visibility}")]
    IllegalAccess {
        /// Name of the declaring class
        class: String,
        /// Declared visibility
        visibility: Visibility,
    },

    /// Wrong number of arguments passed to a constructor handle
    #[error("Wrong number of arguments: expected {expected}, got {actual}")]
    ArgumentCount {
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        actual: usize,
    },

    /// An argument does not satisfy its parameter type
    #[error("Argument type mismatch at position {index}: expected {expected}")]
    IllegalArgument {
        /// Zero-based parameter position
        index: usize,
        /// Declared parameter type name
        expected: String,
    },

    /// The class is abstract, an interface or an annotation
    #[error("Cannot instantiate {0}")]
    Instantiation(String),

    /// The constructed value is not of the requested Rust type
    #[error("Instance of {actual} cannot be cast to {expected}")]
    ClassCast {
        /// Requested type name
        expected: String,
        /// Runtime class name
        actual: String,
    },

    /// Name lookup in a class registry failed
    #[error("Class not found: {0}")]
    ClassNotFound(String),

    /// A class definition is structurally invalid
    #[error("Invalid class definition: {0}")]
    InvalidDefinition(String),
}

impl InspectError {
    /// The error raised by a constructor body, if this is an invocation failure
    pub fn invocation_cause(&self) -> Option<&anyhow::Error> {
        match self {
            InspectError::Invocation(cause) => Some(cause),
            _ => None,
        }
    }

    /// Whether this is the constructor-not-found failure
    pub fn is_no_matching_constructor(&self) -> bool {
        matches!(self, InspectError::NoMatchingConstructor { .. })
    }
}

/// Result type for inspection operations
pub type InspectResult<T> = Result<T, InspectError>;

/// Errors raised while loading an inspector configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has the wrong shape
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A permission value could not be parsed
    #[error("Invalid permission value for {key}: {value}")]
    InvalidPermission {
        /// Key the value was attached to
        key: String,
        /// Offending value
        value: String,
    },
}
