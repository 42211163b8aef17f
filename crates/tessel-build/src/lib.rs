/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Batch compilation of tessel template trees.
//!
//! This layer owns everything the core compiler deliberately does not:
//! reading template files (honoring byte-order marks), discovering sibling
//! templates that share an output unit, and writing the rendered units to a
//! destination tree. The core only ever sees decoded text.
//!
//! A template `Greeting.txt.tessel` compiles under the `txt` format selector
//! into the `Greeting` unit; `Greeting.html.tessel` next to it lands in the
//! same unit. A bare `txt.tessel` is a base template whose unit name doubles
//! as its format selector.

pub mod discovery;
pub mod encoding;
pub mod error;
pub mod generate;

pub use discovery::{TEMPLATE_EXTENSION, TemplateGroup, discover};
pub use encoding::read_text_detecting_bom;
pub use error::{BuildError, BuildResult};
pub use generate::generate_all;
