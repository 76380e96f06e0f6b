//! Error types for cmblocks

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// cmblocks errors
///
/// Only the structural variants (`SectionNotFound`, `MetadataParse`) abort
/// the pipeline on their own. Compliance violations are advisory and only
/// surface as `Compliance` under the strict policy.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{section} not found")]
    SectionNotFound { section: &'static str },

    #[error("Failed to parse BLOCK_JSON: {0}")]
    MetadataParse(#[source] serde_json::Error),

    #[error("BLOCK_JSON must be a JSON object, found {0}")]
    MetadataShape(&'static str),

    #[error("{} compliance violation(s) remain after auto-fix: {}", violations.len(), violations.join("; "))]
    Compliance { violations: Vec<String> },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_norway::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}
