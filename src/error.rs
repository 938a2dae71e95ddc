// src/error.rs
//! Error taxonomy for configuration and pipeline setup.
//!
//! Per-source fetch failures and dropped records are not errors at this level:
//! they are recovered inside the run and reported through `RunReport`.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported or malformed config document: {0}")]
    Parse(String),

    #[error("{var} points to non-existent path {path}")]
    EnvPath { var: &'static str, path: PathBuf },

    #[error("source registry is empty")]
    EmptyRegistry,

    #[error("duplicate source name: {0}")]
    DuplicateSource(String),

    #[error("invalid source entry: {0}")]
    InvalidSource(String),

    #[error("relevance vocabulary is empty")]
    EmptyVocabulary,

    #[error("classifier has no categories")]
    EmptyCategories,

    #[error("duplicate category name: {0}")]
    DuplicateCategory(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("building http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
