//! Error types emitted by the NeighborFit CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use neighborfit_core::{AccountError, AreaId, UserId};
use neighborfit_scorer::EngineError;
use thiserror::Error;

/// Errors emitted by the NeighborFit CLI.
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
        /// Option name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The dataset path does not exist.
    #[error("dataset path {path:?} does not exist")]
    MissingDataset {
        /// Dataset path.
        path: Utf8PathBuf,
    },
    /// The dataset path exists but is not a file.
    #[error("dataset path {path:?} exists but is not a file")]
    DatasetNotFile {
        /// Dataset path.
        path: Utf8PathBuf,
    },
    /// Opening the dataset failed.
    #[error("failed to open dataset at {path:?}: {source}")]
    OpenDataset {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Dataset JSON could not be decoded.
    #[error("failed to parse dataset JSON at {path:?}: {source}")]
    ParseDataset {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// A favourite references an area missing from the dataset.
    #[error("user {user} favourites unknown area {area}")]
    UnknownFavoriteArea {
        /// User identity.
        user: UserId,
        /// Area identity.
        area: AreaId,
    },
    /// The dataset's accounts are inconsistent.
    #[error(transparent)]
    Account(#[from] AccountError),
    /// The engine rejected the request.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
