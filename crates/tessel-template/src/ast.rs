/*
 * ast.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Parsed template nodes.
//!
//! The parser produces a flat sequence of these; there is no nesting. The
//! split between [`ExpressionNode`] and [`PlaceholderVariable`] is
//! load-bearing: expression nodes contribute text to the assembled formatter
//! body, placeholders contribute type information only.

/// One parsed unit of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A node that contributes to the formatter body.
    Expression(ExpressionNode),

    /// A declaration-only marker: `--{name:type}--`. Declares the variable
    /// without substituting it; emits no text.
    Placeholder(PlaceholderVariable),
}

/// A substitution-bearing node, input to an interpolation strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionNode {
    /// Plain template text.
    Literal { text: String },

    /// Raw text from an inline-literal block `{⁅ … ⁆}`, exempt from marker
    /// interpretation.
    InlineLiteral { text: String },

    /// An inline substitution: `{{ name : type }}`.
    Variable { name: String, declared_type: String },
}

/// A variable declared by a declaration-only marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderVariable {
    pub name: String,
    pub declared_type: String,
}

impl ExpressionNode {
    /// The (name, declared type) pair of a substitution site, if this is one.
    pub fn as_variable(&self) -> Option<(&str, &str)> {
        match self {
            ExpressionNode::Variable {
                name,
                declared_type,
            } => Some((name, declared_type)),
            _ => None,
        }
    }
}

impl Node {
    /// The (name, declared type) pair this node declares, if any.
    pub fn declared_variable(&self) -> Option<(&str, &str)> {
        match self {
            Node::Expression(node) => node.as_variable(),
            Node::Placeholder(placeholder) => {
                Some((&placeholder.name, &placeholder.declared_type))
            }
        }
    }
}
