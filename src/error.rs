use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid regex in rule '{field}': {pattern}")]
    InvalidRegex {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Tree node has no string tag under key '{tag_key}'")]
    MissingTag { tag_key: String },

    #[error("Failed to parse tree {path}: {source}")]
    TreeParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TreeGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
