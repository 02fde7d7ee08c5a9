//! Error types emitted by the MapScore CLI.
//!
//! Keep this error type reasonably small, as every command returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use mapscore_core::GridError;
use mapscore_scorer::ScoringError;
use thiserror::Error;

/// Errors emitted by the MapScore CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the offending option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// An option has a value the command cannot use.
    #[error("invalid {field} {value:?}: {reason}")]
    InvalidArgument {
        /// Name of the offending option.
        field: &'static str,
        /// Rejected value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Name of the offending option.
        field: &'static str,
        /// Path involved.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Name of the offending option.
        field: &'static str,
        /// Path involved.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Name of the offending option.
        field: &'static str,
        /// Path involved.
        path: Utf8PathBuf,
        #[source]
        /// Source error from std I/O.
        source: std::io::Error,
    },
    /// Opening a JSON input file failed.
    #[error("failed to open {field} at {path:?}: {source}")]
    OpenInput {
        /// Name of the offending option.
        field: &'static str,
        /// Path involved.
        path: Utf8PathBuf,
        #[source]
        /// Source error from std I/O.
        source: std::io::Error,
    },
    /// A JSON input file could not be decoded.
    #[error("failed to parse {field} JSON at {path:?}: {source}")]
    ParseInput {
        /// Name of the offending option.
        field: &'static str,
        /// Path involved.
        path: Utf8PathBuf,
        #[source]
        /// Source error from `serde_json`.
        source: serde_json::Error,
    },
    /// The case grid could not be built.
    #[error("failed to build case grid: {0}")]
    Grid(#[from] GridError),
    /// The probability field could not be loaded or scored.
    #[error("failed to score probability field: {0}")]
    Scoring(#[source] Box<ScoringError>),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}

impl From<ScoringError> for CliError {
    fn from(err: ScoringError) -> Self {
        Self::Scoring(Box::new(err))
    }
}
