/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Runtime support for tessel-generated formatters.
//!
//! Generated formatter code evaluates to [`Text`], a persistent rope that
//! makes the `+` joins in an assembled formatter body O(1) regardless of how
//! many pieces a template concatenates. The final string is produced once,
//! with [`Text::compile`].

mod text;

pub use text::Text;
