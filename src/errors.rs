// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

use crate::output::OutputRecord;

#[derive(Error, Debug)]
pub enum ActrunError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Docker daemon not ready: {0}")]
    DaemonNotReady(String),

    #[error("Failed to materialize {what} at {path:?}: {cause:#}")]
    Materialize {
        what: &'static str,
        path: PathBuf,
        cause: anyhow::Error,
    },

    #[error("Failed to write event payload to file {path:?}: {cause:#}")]
    PayloadWrite {
        path: PathBuf,
        cause: anyhow::Error,
    },

    #[error("Failed to start process '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed waiting for process '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The runner terminated with a non-zero status. Outputs declared before
    /// termination are carried along for inspection.
    #[error("Process '{program}' exited with code {exit_code}")]
    ExecutionFailed {
        program: String,
        exit_code: i32,
        outputs: OutputRecord,
    },

    #[error("Output destination is not set: environment variable {0} is unset or empty")]
    OutputDestinationUnset(&'static str),

    #[error("Failed to write outputs to {path:?}: {cause:#}")]
    ResultWrite {
        path: PathBuf,
        cause: anyhow::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ActrunError>;
