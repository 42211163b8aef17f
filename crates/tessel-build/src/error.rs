/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for the batch build layer.

use std::path::PathBuf;
use tessel_emit::EmitError;
use tessel_template::CompileError;
use thiserror::Error;

/// Errors that can abort a generation run. Each names the file or unit it
/// came from; the run stops at the first one.
#[derive(Debug, Error)]
pub enum BuildError {
    /// I/O error reading templates or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source tree could not be walked.
    #[error("failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// A template file could not be decoded to text.
    #[error("{}: {detail}", .path.display())]
    Decode { path: PathBuf, detail: String },

    /// A template failed to compile.
    #[error("{}: {source}", .path.display())]
    Compile {
        path: PathBuf,
        #[source]
        source: CompileError,
    },

    /// A compiled unit failed to render.
    #[error("failed to render unit '{unit}': {source}")]
    Emit {
        unit: String,
        #[source]
        source: EmitError,
    },
}

/// Result type for generation runs.
pub type BuildResult<T> = Result<T, BuildError>;
