//! Error types for msd_plot.
//!
//! Each module owns a `thiserror` enum; this module folds them into one
//! crate-level error so callers can use a single `Result`.

use thiserror::Error;

use crate::charts::RenderError;
use crate::config::ConfigError;
use crate::data::LoaderError;
use crate::sim::{ExportError, ParameterError};

/// Result type alias for msd_plot operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur anywhere in the load → render or simulate → export pipelines.
#[derive(Debug, Error)]
pub enum Error {
    /// Dataset could not be loaded or lacks a required column.
    #[error(transparent)]
    Load(#[from] LoaderError),

    /// A chart could not be drawn or presented.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Simulation inputs are out of range.
    #[error(transparent)]
    Parameters(#[from] ParameterError),

    /// Writing simulation output failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Configuration file or values are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// True for the two fatal load kinds (missing/unreadable data, missing column).
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Load(_))
    }
}
