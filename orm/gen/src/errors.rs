//! Error types for the ORM class generator.

use orm_define::LookupError;
use thiserror::Error;

/// Errors that can occur during class generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Configuration for a fragment is malformed or structurally insufficient.
    ///
    /// Every synthesis failure uses this kind. It aborts the assembly of the
    /// class being generated; no partial artifact is produced.
    #[error("Invalid input for class '{class}': {reason}")]
    InvalidInput {
        /// The class whose assembly failed.
        class: String,
        /// What was wrong with the configuration.
        reason: String,
    },

    /// A superclass or attribute reference did not resolve.
    #[error("Unresolved reference: {0}")]
    UnresolvedReference(#[from] LookupError),

    /// Superclass references within one generation stage form a cycle.
    #[error("Cyclic class hierarchy in {stage} stage involving: {classes}")]
    CyclicHierarchy {
        /// The stage whose ordering failed.
        stage: String,
        /// Comma-separated names of the classes left unordered.
        classes: String,
    },

    /// Failed to parse the metamodel file
    #[error("Failed to parse metamodel: {0}")]
    ParseError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Output directory does not exist
    #[error("Output directory does not exist: {0}")]
    OutputDirNotFound(String),

    /// Failed to serialize an XML descriptor
    #[error("Failed to serialize XML: {0}")]
    XmlError(#[from] quick_xml::SeError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

impl GeneratorError {
    /// Shorthand for [`GeneratorError::InvalidInput`].
    pub fn invalid(class: impl Into<String>, reason: impl Into<String>) -> Self {
        GeneratorError::InvalidInput {
            class: class.into(),
            reason: reason.into(),
        }
    }
}
