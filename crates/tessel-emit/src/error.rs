/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for formatter rendering.

use thiserror::Error;

/// Errors raised while rendering a formatter description.
///
/// These indicate a malformed fragment sequence handed over by an
/// interpolation strategy, not a user error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    /// A fragment carries a splice code but no argument.
    #[error("fragment '{text}' requires a {expected} argument")]
    MissingArgument { text: String, expected: String },

    /// A fragment's argument kind does not match its splice code.
    #[error("fragment '{text}' requires a {expected} argument, found a {found}")]
    ArgumentMismatch {
        text: String,
        expected: String,
        found: String,
    },
}
