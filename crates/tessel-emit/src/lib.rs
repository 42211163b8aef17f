/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Emission backend: renders a compiled [`FormatterDescription`] into Rust
//! source text.
//!
//! Two shapes are rendered per formatter: a generic `Formatter` trait taking
//! one input callback per type parameter, and a concrete `Instance` closing
//! over the value parameters, with a `formatter` constructor. Fragment texts
//! carry at most one splice code, interpreted here and nowhere else:
//!
//! | Code | Argument | Rendered as |
//! |------|----------|-------------|
//! | `%S` | constant | escaped Rust string literal |
//! | `%N` | constant | sanitized value identifier |
//! | `%M` | reference | fully qualified path |
//!
//! Identifier sanitization for the target language (template identifiers may
//! contain `-`, `'`, `&` and `,`) is entirely this crate's concern; the core
//! compiler passes names through untouched.
//!
//! [`FormatterDescription`]: tessel_template::FormatterDescription

pub mod error;
pub mod ident;
pub mod render;

pub use error::EmitError;
pub use ident::{module_ident, type_ident, value_ident};
pub use render::{Placement, UnitMember, render_formatter, render_unit};
