//! Error types emitted by the staysift CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use staysift_core::{ExportError, ListingError};
use thiserror::Error;

/// Errors emitted by the staysift CLI.
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
        field: &'static str,
        env: &'static str,
    },
    /// An option carried a value the engine does not recognise.
    #[error("invalid {field} {value:?}: {source}")]
    InvalidArgument {
        field: &'static str,
        value: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading the listings file failed.
    #[error("failed to read listings at {path:?}: {source}")]
    ReadListings {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The listings file is not a JSON array of listing records.
    #[error("failed to parse listings JSON at {path:?}: {source}")]
    ParseListings {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A listing record failed validation.
    #[error("invalid listing in {path:?}: {source}")]
    InvalidListing {
        path: Utf8PathBuf,
        #[source]
        source: ListingError,
    },
    /// Exporting the selected aspects failed.
    #[error("failed to export selected aspects to {path:?}: {source}")]
    ExportAspects {
        path: Utf8PathBuf,
        #[source]
        source: ExportError,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
