/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for template parsing and compilation.

use crate::interpolate::TypeRef;
use thiserror::Error;

/// An ill-formed lexical sequence in a template.
///
/// Raised by the parser the first time an invalid transition is reached;
/// parsing does not resume afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at position {position}")]
pub struct SyntaxError {
    /// Code-point offset of the offending character, or of the end of input
    /// when the template stops inside an open marker.
    pub position: usize,

    /// What was expected and what was found.
    pub message: String,
}

/// Errors that can abort compilation of one template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The template text is not well-formed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The same variable name was declared or used with two different types.
    #[error("variable '{name}' has ambiguous types '{type_a}' and '{type_b}'")]
    NameTypeConflict {
        name: String,
        type_a: String,
        type_b: String,
    },

    /// The interpolation strategy refused to merge two inferred output types
    /// for one declared type.
    #[error(
        "variable type '{declared_type}' has ambiguous target types '{type_a}' and '{type_b}' that are not compatible"
    )]
    TargetTypeAmbiguity {
        declared_type: String,
        type_a: TypeRef,
        type_b: TypeRef,
    },

    /// No interpolation strategy is registered for the requested format.
    #[error("unsupported format '{format}'")]
    UnsupportedFormat { format: String },

    /// A declaration-only variable was used with a format whose strategy has
    /// no default target type.
    #[error("'{format}' format does not support default target types in placeholder variables")]
    UnsupportedDefaultTargetType { format: String },

    /// The interpolation strategy emitted a typed-fragment count inconsistent
    /// with the number of substitution sites. A strategy contract violation,
    /// not a user error.
    #[error("interpolator emitted {typed} typed fragments for {variables} substitution sites")]
    InternalArityMismatch { variables: usize, typed: usize },
}

/// Result type for template compilation.
pub type CompileResult<T> = Result<T, CompileError>;
