/*
 * compiler.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The formatter compiler: orchestrates the parser and an interpolation
//! strategy for one template, and assembles the typed artifact description.
//!
//! Strategies are looked up by format key. The `txt` strategy is registered
//! out of the box; additional formats register with [`Compiler::register`].

use crate::ast::{ExpressionNode, Node};
use crate::error::{CompileError, CompileResult};
use crate::interpolate::{Fragment, Interpolator, TypeRef};
use crate::parser::parse;
use crate::text::TextInterpolator;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One generic parameter of a compiled formatter: a declared type from the
/// template and the output type its input callback produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameter {
    pub declared_type: String,
    pub target_type: TypeRef,
}

/// One value parameter of a compiled formatter: a variable name and the
/// declared type whose generic parameter types it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueParameter {
    pub name: String,
    pub declared_type: String,
}

/// The compiled artifact for one template: everything the emission backend
/// needs to render the generic interface and its concrete instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterDescription {
    /// Generic parameters, one per distinct declared type, in document
    /// first-use order.
    pub type_parameters: Vec<TypeParameter>,

    /// Value parameters, one per distinct variable name, in document
    /// first-declaration order.
    pub value_parameters: Vec<ValueParameter>,

    /// The type the assembled body evaluates to.
    pub output_type: TypeRef,

    /// The assembled body: the full fragment sequence with its arguments.
    pub body: Vec<Fragment>,
}

/// Compiles templates into [`FormatterDescription`]s using per-format
/// interpolation strategies.
pub struct Compiler {
    formats: HashMap<String, Box<dyn Interpolator + Send + Sync>>,
}

impl Compiler {
    /// A compiler with the default `txt` strategy registered.
    pub fn new() -> Self {
        let mut compiler = Compiler {
            formats: HashMap::new(),
        };
        compiler.register("txt", Box::new(TextInterpolator));
        compiler
    }

    /// Register (or replace) the strategy for a format key.
    pub fn register(
        &mut self,
        format: impl Into<String>,
        interpolator: Box<dyn Interpolator + Send + Sync>,
    ) {
        self.formats.insert(format.into(), interpolator);
    }

    /// Compile one template under the given format selector.
    ///
    /// Every failure aborts this call; no partial description is returned.
    pub fn compile(&self, format: &str, source: &str) -> CompileResult<FormatterDescription> {
        let interpolator = self
            .formats
            .get(format)
            .ok_or_else(|| CompileError::UnsupportedFormat {
                format: format.to_string(),
            })?;
        let interpolator: &dyn Interpolator = interpolator.as_ref();

        let mut nodes = Vec::new();
        for node in parse(source) {
            nodes.push(node?);
        }
        debug!(format, nodes = nodes.len(), "parsed template");

        // Partition, preserving relative order within each side.
        let expressions: Vec<ExpressionNode> = nodes
            .iter()
            .filter_map(|node| match node {
                Node::Expression(expression) => Some(expression.clone()),
                Node::Placeholder(_) => None,
            })
            .collect();

        let fragments: Vec<Fragment> = interpolator.interpolate(&expressions).collect();

        // Zip substitution sites against the typed fragments to recover each
        // variable's inferred output type. A length mismatch means the
        // strategy broke its contract.
        let variables: Vec<(&str, &str)> = expressions
            .iter()
            .filter_map(ExpressionNode::as_variable)
            .collect();
        let inferred: Vec<&TypeRef> = fragments
            .iter()
            .filter_map(|fragment| fragment.target_type.as_ref())
            .collect();
        if variables.len() != inferred.len() {
            return Err(CompileError::InternalArityMismatch {
                variables: variables.len(),
                typed: inferred.len(),
            });
        }

        // Declarations and the generic-parameter key order come from
        // document order over all nodes.
        let mut declarations = Declarations::default();
        let mut type_order: Vec<String> = Vec::new();
        for node in &nodes {
            if let Some((name, declared_type)) = node.declared_variable() {
                declarations.declare(name, declared_type)?;
                if !type_order.iter().any(|ty| ty == declared_type) {
                    type_order.push(declared_type.to_string());
                }
            }
        }

        // Target types: substitution contributions merge first, so a
        // placeholder default never overrides an inferred type.
        let mut targets = TargetTypes::default();
        for ((_, declared_type), target) in variables.iter().zip(inferred.iter().copied()) {
            targets.merge(interpolator, declared_type, target.clone())?;
        }
        for node in &nodes {
            if let Node::Placeholder(placeholder) = node {
                targets.ensure_default(interpolator, format, &placeholder.declared_type)?;
            }
        }

        let type_parameters: Vec<TypeParameter> = type_order
            .into_iter()
            .filter_map(|declared_type| {
                targets
                    .get(&declared_type)
                    .cloned()
                    .map(|target_type| TypeParameter {
                        declared_type,
                        target_type,
                    })
            })
            .collect();

        let description = FormatterDescription {
            type_parameters,
            value_parameters: declarations.entries,
            output_type: interpolator.output_type(),
            body: fragments,
        };
        debug!(
            type_parameters = description.type_parameters.len(),
            value_parameters = description.value_parameters.len(),
            fragments = description.body.len(),
            "assembled formatter description"
        );
        Ok(description)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Compiler::new()
    }
}

/// The variable-declaration set: one declared type per name, in
/// first-declaration order.
#[derive(Default)]
struct Declarations {
    entries: Vec<ValueParameter>,
}

impl Declarations {
    fn declare(&mut self, name: &str, declared_type: &str) -> CompileResult<()> {
        match self.entries.iter().find(|entry| entry.name == name) {
            Some(existing) if existing.declared_type != declared_type => {
                Err(CompileError::NameTypeConflict {
                    name: name.to_string(),
                    type_a: existing.declared_type.clone(),
                    type_b: declared_type.to_string(),
                })
            }
            Some(_) => Ok(()),
            None => {
                self.entries.push(ValueParameter {
                    name: name.to_string(),
                    declared_type: declared_type.to_string(),
                });
                Ok(())
            }
        }
    }
}

/// The declared-type → output-type map, in first-contribution order.
#[derive(Default)]
struct TargetTypes {
    entries: Vec<(String, TypeRef)>,
}

impl TargetTypes {
    fn merge(
        &mut self,
        interpolator: &dyn Interpolator,
        declared_type: &str,
        target: TypeRef,
    ) -> CompileResult<()> {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.0 == declared_type)
        {
            Some(entry) => {
                entry.1 = interpolator.resolve_target_type(declared_type, entry.1.clone(), target)?;
                Ok(())
            }
            None => {
                self.entries.push((declared_type.to_string(), target));
                Ok(())
            }
        }
    }

    fn ensure_default(
        &mut self,
        interpolator: &dyn Interpolator,
        format: &str,
        declared_type: &str,
    ) -> CompileResult<()> {
        if self.entries.iter().any(|entry| entry.0 == declared_type) {
            return Ok(());
        }
        let default =
            interpolator
                .default_target_type()
                .ok_or_else(|| CompileError::UnsupportedDefaultTargetType {
                    format: format.to_string(),
                })?;
        self.entries.push((declared_type.to_string(), default));
        Ok(())
    }

    fn get(&self, declared_type: &str) -> Option<&TypeRef> {
        self.entries
            .iter()
            .find(|entry| entry.0 == declared_type)
            .map(|entry| &entry.1)
    }
}
