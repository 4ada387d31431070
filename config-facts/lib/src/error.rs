//! Error types for the config facts library.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while turning a configuration file into facts.
///
/// None of these reach the pipeline consuming the fact record: the guarded
/// entry point [`collect_facts`](crate::collect_facts) logs them and falls
/// back to the default record.
#[derive(Debug, Error)]
pub enum FactsError {
    /// No input path was supplied.
    #[error("no configuration file was given")]
    MissingPath,

    /// The configuration file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not a valid YAML document stream.
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A document has no usable `kind` and the policy says to abort.
    #[error("document {index} has no string `kind` field")]
    MissingKind { index: usize },

    /// The fact record could not be rendered as JSON.
    #[error("failed to serialize facts: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience Result type for config facts operations.
pub type Result<T> = std::result::Result<T, FactsError>;
