/*
 * interpolate.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The interpolation strategy interface and its fragment vocabulary.
//!
//! An [`Interpolator`] converts the substitution-bearing nodes of one
//! template into the fragment sequence that becomes the formatter body. One
//! strategy exists per template format; the compiler selects it by format
//! key. The default plain-text strategy lives in [`crate::text`].

use crate::ast::ExpressionNode;
use crate::error::CompileError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fully qualified type in the emission target language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef(String);

impl TypeRef {
    pub fn new(path: impl Into<String>) -> Self {
        TypeRef(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A runtime or library symbol the emitted code needs to reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolRef(String);

impl SymbolRef {
    pub fn new(path: impl Into<String>) -> Self {
        SymbolRef(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The value spliced into a fragment's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Argument {
    /// An embedded string literal.
    Constant(String),

    /// A reference to a runtime/library symbol.
    Reference(SymbolRef),
}

/// One piece of the assembled formatter body.
///
/// `text` is target-language code carrying at most one splice code for
/// `argument`; `target_type` is set only on the fragment that opens a
/// substitution site, and names the output type the strategy inferred for
/// that variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    pub argument: Option<Argument>,
    pub target_type: Option<TypeRef>,
}

impl Fragment {
    /// A fragment of plain code text with nothing spliced in.
    pub fn plain(text: impl Into<String>) -> Self {
        Fragment {
            text: text.into(),
            argument: None,
            target_type: None,
        }
    }

    /// A fragment splicing an embedded string constant.
    pub fn constant(text: impl Into<String>, value: impl Into<String>) -> Self {
        Fragment {
            text: text.into(),
            argument: Some(Argument::Constant(value.into())),
            target_type: None,
        }
    }

    /// A fragment splicing a symbol reference.
    pub fn reference(text: impl Into<String>, symbol: SymbolRef) -> Self {
        Fragment {
            text: text.into(),
            argument: Some(Argument::Reference(symbol)),
            target_type: None,
        }
    }

    /// The opening fragment of a substitution site, carrying the inferred
    /// output type of the referenced variable.
    pub fn substitution(
        text: impl Into<String>,
        value: impl Into<String>,
        target_type: TypeRef,
    ) -> Self {
        Fragment {
            text: text.into(),
            argument: Some(Argument::Constant(value.into())),
            target_type: Some(target_type),
        }
    }
}

/// A per-format interpolation strategy.
///
/// Implementations must emit, from [`Interpolator::interpolate`], exactly the
/// fragments needed to reconstruct — in order — an expression equivalent to
/// the concatenation of the input literals and variable references, with one
/// `target_type`-carrying fragment per `Variable` node.
pub trait Interpolator {
    /// The type every assembled expression evaluates to.
    fn output_type(&self) -> TypeRef;

    /// The target type assumed for declaration-only variables.
    ///
    /// A strategy may return `None` to refuse support; compiling a document
    /// that contains placeholder-only declared types then fails.
    fn default_target_type(&self) -> Option<TypeRef>;

    /// Merge two inferred output types reported for the same declared type.
    ///
    /// The default is strict: identical types merge silently, anything else
    /// is an ambiguity error. A strategy may override this to accept
    /// compatible-but-distinct types.
    fn resolve_target_type(
        &self,
        declared_type: &str,
        a: TypeRef,
        b: TypeRef,
    ) -> Result<TypeRef, CompileError> {
        if a == b {
            Ok(a)
        } else {
            Err(CompileError::TargetTypeAmbiguity {
                declared_type: declared_type.to_string(),
                type_a: a,
                type_b: b,
            })
        }
    }

    /// Lazily convert substitution-bearing nodes into the fragment sequence
    /// forming the formatter body.
    fn interpolate<'a>(
        &self,
        nodes: &'a [ExpressionNode],
    ) -> Box<dyn Iterator<Item = Fragment> + 'a>;
}
