//! Docvet error handling.
//!
//! Two error classes exist and they are deliberately distinct types:
//!
//! - [`DocvetError`] covers fatal conditions: a missing documentation
//!   directory, unreadable files, and malformed fenced blocks. These are
//!   never caught; they propagate to `main` and abort the run with a rendered
//!   diagnostic, because the documentation source itself needs fixing.
//! - [`ExecutionFailure`] covers a snippet that raised while evaluating. This
//!   is the only recoverable class: it is caught at the evaluation call site,
//!   stored on the snippet's outcome record, and the run continues.

use std::path::PathBuf;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias for fatal pipeline errors.
pub type Result<T> = std::result::Result<T, DocvetError>;

/// Fatal errors that abort the run.
#[derive(Debug, Error, Diagnostic)]
pub enum DocvetError {
    #[error("documentation directory not found: {}", .path.display())]
    #[diagnostic(
        code(docvet::docs_dir_missing),
        help("Pass an existing directory, or create it and add markdown files")
    )]
    DocsDirMissing { path: PathBuf },

    #[error("failed to scan {}", .path.display())]
    #[diagnostic(code(docvet::scan_failed))]
    ScanFailed {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {}", .path.display())]
    #[diagnostic(code(docvet::unreadable_file))]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed fenced block in {file_name}: {reason}")]
    #[diagnostic(
        code(docvet::extract::malformed_fence),
        help("A tagged fence must contain exactly one run of raw text; fix the documentation source")
    )]
    MalformedFence { file_name: String, reason: String },
}

/// A snippet's evaluation raised. Carries the engine's rendered error.
///
/// Stored on the outcome record of the snippet that raised it; never aborts
/// the run.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{detail}")]
pub struct ExecutionFailure {
    pub detail: String,
}

impl ExecutionFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
