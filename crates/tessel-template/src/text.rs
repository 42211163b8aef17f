/*
 * text.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The plain-text interpolation strategy, registered as the `txt` format.
//!
//! Builds a right-nested catenation over the runtime text type: every node
//! renders as a constructor or callback application, and consecutive
//! renderings are joined with ` + (`, closed by one final run of `)`. The
//! right nesting keeps each join a two-operand `+`, which the runtime rope
//! makes O(1).

use crate::ast::ExpressionNode;
use crate::interpolate::{Fragment, Interpolator, SymbolRef, TypeRef};
use std::collections::VecDeque;

/// Fully qualified path of the runtime text type.
const TEXT_TYPE: &str = "tessel_runtime::Text";

/// Constructor the emitted code wraps literal chunks in.
const TEXT_CONSTRUCTOR: &str = "tessel_runtime::Text::from";

/// Plain-text interpolation: every substitution site evaluates to the
/// runtime text type, and so does the whole expression.
pub struct TextInterpolator;

impl Interpolator for TextInterpolator {
    fn output_type(&self) -> TypeRef {
        TypeRef::new(TEXT_TYPE)
    }

    fn default_target_type(&self) -> Option<TypeRef> {
        Some(self.output_type())
    }

    fn interpolate<'a>(
        &self,
        nodes: &'a [ExpressionNode],
    ) -> Box<dyn Iterator<Item = Fragment> + 'a> {
        Box::new(TextFragments {
            nodes,
            output_type: self.output_type(),
            index: 0,
            queue: VecDeque::new(),
            closed: false,
        })
    }
}

/// Lazy fragment stream over a node slice.
struct TextFragments<'a> {
    nodes: &'a [ExpressionNode],
    output_type: TypeRef,
    index: usize,
    queue: VecDeque<Fragment>,
    closed: bool,
}

impl Iterator for TextFragments<'_> {
    type Item = Fragment;

    fn next(&mut self) -> Option<Fragment> {
        loop {
            if let Some(fragment) = self.queue.pop_front() {
                return Some(fragment);
            }
            if self.index == self.nodes.len() {
                if self.closed || self.nodes.len() < 2 {
                    return None;
                }
                self.closed = true;
                return Some(Fragment::plain(")".repeat(self.nodes.len() - 1)));
            }
            if self.index > 0 {
                self.queue.push_back(Fragment::plain(" + ("));
            }
            match &self.nodes[self.index] {
                ExpressionNode::Literal { text } | ExpressionNode::InlineLiteral { text } => {
                    self.queue
                        .push_back(Fragment::reference("%M", SymbolRef::new(TEXT_CONSTRUCTOR)));
                    self.queue.push_back(Fragment::constant("(%S)", text.clone()));
                }
                ExpressionNode::Variable {
                    name,
                    declared_type,
                } => {
                    self.queue.push_back(Fragment::substitution(
                        "%N",
                        declared_type.clone(),
                        self.output_type.clone(),
                    ));
                    self.queue
                        .push_back(Fragment::constant("(&self.%N)", name.clone()));
                }
            }
            self.index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolate::Argument;
    use pretty_assertions::assert_eq;

    fn fragments(nodes: &[ExpressionNode]) -> Vec<Fragment> {
        TextInterpolator.interpolate(nodes).collect()
    }

    #[test]
    fn empty_input_yields_no_fragments() {
        assert_eq!(fragments(&[]), vec![]);
    }

    #[test]
    fn single_literal_has_no_join_and_no_closer() {
        let nodes = [ExpressionNode::Literal {
            text: "hi".to_string(),
        }];
        assert_eq!(
            fragments(&nodes),
            vec![
                Fragment::reference("%M", SymbolRef::new(TEXT_CONSTRUCTOR)),
                Fragment::constant("(%S)", "hi"),
            ]
        );
    }

    #[test]
    fn joins_are_right_nested_with_one_closing_run() {
        let nodes = [
            ExpressionNode::Literal {
                text: "Hello, ".to_string(),
            },
            ExpressionNode::Variable {
                name: "audience".to_string(),
                declared_type: "Audience".to_string(),
            },
            ExpressionNode::Literal {
                text: "!".to_string(),
            },
        ];
        assert_eq!(
            fragments(&nodes),
            vec![
                Fragment::reference("%M", SymbolRef::new(TEXT_CONSTRUCTOR)),
                Fragment::constant("(%S)", "Hello, "),
                Fragment::plain(" + ("),
                Fragment::substitution("%N", "Audience", TypeRef::new(TEXT_TYPE)),
                Fragment::constant("(&self.%N)", "audience"),
                Fragment::plain(" + ("),
                Fragment::reference("%M", SymbolRef::new(TEXT_CONSTRUCTOR)),
                Fragment::constant("(%S)", "!"),
                Fragment::plain("))"),
            ]
        );
    }

    #[test]
    fn exactly_one_typed_fragment_per_substitution_site() {
        let nodes = [
            ExpressionNode::Variable {
                name: "a".to_string(),
                declared_type: "T".to_string(),
            },
            ExpressionNode::InlineLiteral {
                text: "raw".to_string(),
            },
            ExpressionNode::Variable {
                name: "b".to_string(),
                declared_type: "U".to_string(),
            },
        ];
        let typed: Vec<Fragment> = fragments(&nodes)
            .into_iter()
            .filter(|f| f.target_type.is_some())
            .collect();
        assert_eq!(typed.len(), 2);
        assert_eq!(typed[0].argument, Some(Argument::Constant("T".to_string())));
        assert_eq!(typed[1].argument, Some(Argument::Constant("U".to_string())));
    }

    #[test]
    fn literal_text_is_reembedded_as_constant() {
        let nodes = [ExpressionNode::InlineLiteral {
            text: "{{raw}}".to_string(),
        }];
        let all = fragments(&nodes);
        assert_eq!(
            all[1].argument,
            Some(Argument::Constant("{{raw}}".to_string()))
        );
    }
}
