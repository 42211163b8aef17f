/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parser and formatter compiler for the tessel template language.
//!
//! A tessel template mixes literal text with typed markers:
//!
//! ```text
//! --{signature:Signature}--
//! Hello, {{audience:Audience}}!{# greeting line #}
//! ```
//!
//! Compiling a template produces a [`FormatterDescription`]: a generic,
//! strongly-typed formatter artifact with one type parameter per declared
//! type, one value parameter per variable, and a body assembled by a
//! per-format interpolation strategy. The description is rendered to source
//! text by an emission backend (the `tessel-emit` crate); this crate never
//! performs I/O and never renders target-language text itself.
//!
//! # Example
//!
//! ```
//! use tessel_template::Compiler;
//!
//! let compiler = Compiler::new();
//! let description = compiler
//!     .compile("txt", "Hello, {{audience:Audience}}!")
//!     .unwrap();
//! assert_eq!(description.type_parameters.len(), 1);
//! assert_eq!(description.value_parameters.len(), 1);
//! ```

pub mod ast;
pub mod compiler;
pub mod error;
pub mod interpolate;
pub mod parser;
pub mod text;

// Re-export main types at crate root
pub use ast::{ExpressionNode, Node, PlaceholderVariable};
pub use compiler::{Compiler, FormatterDescription, TypeParameter, ValueParameter};
pub use error::{CompileError, CompileResult, SyntaxError};
pub use interpolate::{Argument, Fragment, Interpolator, SymbolRef, TypeRef};
pub use parser::{Nodes, parse};
pub use text::TextInterpolator;
