//! Error types shared by the library.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::form::FormErrors;

/// Errors that can occur while loading configuration, reading records or rendering reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// No usable font family could be loaded.
    #[error("failed to load fonts: {0}")]
    FontLoad(#[source] genpdf::error::Error),

    /// `genpdf` failed while laying out or writing the document.
    #[error("failed to render report: {0}")]
    Render(#[source] genpdf::error::Error),

    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration{}: {source}", display_path(.path))]
    Config {
        path: Option<PathBuf>,
        #[source]
        source: toml::de::Error,
    },

    /// A record file could not be parsed.
    #[error("invalid report record in {}: {message}", .path.display())]
    Input { path: PathBuf, message: String },

    /// Submitted form values failed validation.
    #[error(transparent)]
    Form(#[from] FormErrors),
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map(Path::display)
        .map(|path| format!(" in {path}"))
        .unwrap_or_default()
}
