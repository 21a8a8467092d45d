//! Catalog error definitions.

use std::path::PathBuf;

use thiserror::Error;

use super::TreeError;
use crate::config::MatcherError;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{}': {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Catalog '{}' must contain a JSON object at the top level", .path.display())]
    NotAnObject { path: PathBuf },

    /// The catalog holds a value that cannot be a message, or a key that
    /// cannot be flattened.
    #[error("Malformed catalog '{locale}': {source}")]
    MalformedTree {
        locale: String,
        #[source]
        source: TreeError,
    },

    #[error(
        "Locale '{locale}' is defined by both '{}' and '{}'",
        .first.display(),
        .second.display()
    )]
    DuplicateLocale { locale: String, first: PathBuf, second: PathBuf },

    #[error("Reference language '{0}' not found")]
    ReferenceNotFound(String),

    #[error("No catalog files found in '{}'", .0.display())]
    NoCatalogs(PathBuf),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error("Unknown catalog '{0}'")]
    UnknownLocale(String),

    #[error("Failed to serialize catalog '{locale}': {source}")]
    Serialize {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
