use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading an exported activity file.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read activity file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse activity JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no work package context available; pass --created-at and --status")]
    MissingContext,

    #[error("invalid timestamp '{0}', expected RFC 3339 (e.g. 2026-01-08T14:00:00Z)")]
    InvalidTimestamp(String),
}

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown minimum unit '{0}', expected 'minute' or 'second'")]
    UnknownUnit(String),

    #[error("timeline.status_fields must name at least one field")]
    NoStatusFields,

    #[error("timeline.status_fields contains a blank name")]
    BlankStatusField,

    #[error("timeline.unknown_actor must not be blank")]
    BlankUnknownActor,
}
