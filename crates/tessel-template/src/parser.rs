/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The template parser: one forward scan driven by an explicit state value.
//!
//! Markers share long common prefixes (`{`, `{{`, `{#`, `{⁅`; `-`, `--`,
//! `--{`, `--#`) and identifiers occur inside several marker kinds with
//! different follow-up requirements, so every "what has been recognized so
//! far" is its own [`State`] variant rather than a set of mode flags. The
//! driver consumes each code point exactly once; the first invalid transition
//! raises a [`SyntaxError`] and the scan does not resume.
//!
//! Offsets inside states are byte offsets into the source (for slicing);
//! error positions are code-point offsets, tracked separately.

use crate::ast::{ExpressionNode, Node, PlaceholderVariable};
use crate::error::SyntaxError;
use std::iter::FusedIterator;
use std::str::CharIndices;

/// Parse a template into a lazy node sequence.
///
/// The returned iterator yields nodes on demand and is fused after the first
/// error. Empty `Literal` nodes are filtered out.
pub fn parse(template: &str) -> Nodes<'_> {
    Nodes {
        source: template,
        chars: template.char_indices(),
        position: 0,
        // A synthetic preceding line break, so markers that must start a
        // line are recognized at the start of input.
        state: State::LineStart {
            start: 0,
            line_start: 0,
        },
        finished: false,
    }
}

/// Lazy iterator over the nodes of one template.
pub struct Nodes<'a> {
    source: &'a str,
    chars: CharIndices<'a>,
    /// Code-point offset of the next character.
    position: usize,
    state: State,
    finished: bool,
}

impl Iterator for Nodes<'_> {
    type Item = Result<Node, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            match self.chars.next() {
                Some((byte, c)) => {
                    let cp = self.position;
                    self.position += 1;
                    match step(self.source, self.state, byte, cp, c) {
                        Ok((next_state, node)) => {
                            self.state = next_state;
                            if let Some(node) = node {
                                if !is_empty_literal(&node) {
                                    return Some(Ok(node));
                                }
                            }
                        }
                        Err(error) => {
                            self.finished = true;
                            return Some(Err(error));
                        }
                    }
                }
                None => {
                    self.finished = true;
                    return match finish(self.source, self.state, self.position) {
                        Ok(Some(node)) if !is_empty_literal(&node) => Some(Ok(node)),
                        Ok(_) => None,
                        Err(error) => Some(Err(error)),
                    };
                }
            }
        }
    }
}

impl FusedIterator for Nodes<'_> {}

/// What has been recognized so far and what is expected next.
#[derive(Debug, Clone, Copy)]
enum State {
    /// Plain text; the pending literal starts at `start`.
    Literal { start: usize },

    /// Immediately after a line break (or at the start of input).
    LineStart { start: usize, line_start: usize },

    /// Leading whitespace on a fresh line.
    Indent { start: usize, line_start: usize },

    /// One `-` at the start of a line; `margin` is false when leading
    /// whitespace preceded it.
    Hyphen {
        start: usize,
        line_start: usize,
        margin: bool,
    },

    /// `--` at the start of a line.
    DoubleHyphen {
        start: usize,
        line_start: usize,
        margin: bool,
    },

    /// `{` inside literal text, at byte `brace`.
    Brace { start: usize, brace: usize },

    /// After `{{` or `--{`, before the variable name.
    MarkerOpen { placeholder: bool },

    /// Inside the variable name.
    VariableName { placeholder: bool, name_start: usize },

    /// Whitespace after the name, before `:`.
    BeforeColon {
        placeholder: bool,
        name_start: usize,
        name_end: usize,
    },

    /// After `:`, before the variable type.
    AfterColon {
        placeholder: bool,
        name_start: usize,
        name_end: usize,
    },

    /// Inside the variable type.
    VariableType {
        placeholder: bool,
        name_start: usize,
        name_end: usize,
        type_start: usize,
    },

    /// Whitespace after the type; the node is already emitted, the closing
    /// `}` is still owed.
    AwaitCloseBrace { placeholder: bool },

    /// First `}` of the closing sequence seen; a substitution owes a second
    /// `}`, a declaration owes `--`.
    CloseBrace { placeholder: bool },

    /// First `-` of a closing `--` seen.
    ClosingHyphen,

    /// A line-consuming marker closed; only a line break (or end of input)
    /// may follow.
    LineEnd,

    /// CR seen after a closed line-consuming marker; an immediately
    /// following LF is still part of the line terminator.
    LineEndCr,

    /// Inside `{⁅ … ⁆}`; `depth` counts open nested `⁅`.
    InlineLiteral { content_start: usize, depth: usize },

    /// A depth-zero `⁆` seen at byte `bracket`; `}` closes the block.
    InlineLiteralClose { content_start: usize, bracket: usize },

    /// Inside `{# … #}`.
    InlineComment,

    /// `#` run inside an inline comment; `}` closes.
    InlineCommentHash,

    /// Inside `--# … #--`.
    LineComment,

    /// `#` run inside a full-line comment; `--` closes.
    LineCommentHash,

    /// `#-` inside a full-line comment; one more `-` closes.
    LineCommentHashHyphen,
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '\'' | '&' | ',')
}

fn is_inline_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_marker_space(c: char) -> bool {
    is_inline_space(c) || c == '\r' || c == '\n'
}

fn literal(source: &str, start: usize, end: usize) -> Node {
    Node::Expression(ExpressionNode::Literal {
        text: source[start..end].to_string(),
    })
}

/// The final literal at end of input, with one trailing CR, LF, or CRLF
/// stripped.
fn terminal_literal(source: &str, start: usize) -> Node {
    let text = &source[start..];
    let text = if let Some(stripped) = text.strip_suffix("\r\n") {
        stripped
    } else if let Some(stripped) = text.strip_suffix('\n') {
        stripped
    } else if let Some(stripped) = text.strip_suffix('\r') {
        stripped
    } else {
        text
    };
    Node::Expression(ExpressionNode::Literal {
        text: text.to_string(),
    })
}

fn inline_literal(source: &str, start: usize, end: usize) -> Node {
    Node::Expression(ExpressionNode::InlineLiteral {
        text: source[start..end].to_string(),
    })
}

fn variable(
    source: &str,
    placeholder: bool,
    name_start: usize,
    name_end: usize,
    type_start: usize,
    type_end: usize,
) -> Node {
    let name = source[name_start..name_end].to_string();
    let declared_type = source[type_start..type_end].to_string();
    if placeholder {
        Node::Placeholder(PlaceholderVariable {
            name,
            declared_type,
        })
    } else {
        Node::Expression(ExpressionNode::Variable {
            name,
            declared_type,
        })
    }
}

fn is_empty_literal(node: &Node) -> bool {
    matches!(node, Node::Expression(ExpressionNode::Literal { text }) if text.is_empty())
}

fn invalid_identifier(position: usize, c: char, subject: &str) -> SyntaxError {
    SyntaxError {
        position,
        message: format!("'{c}' is not a valid identifier for a variable {subject}"),
    }
}

fn expected(position: usize, token: &str, c: char) -> SyntaxError {
    SyntaxError {
        position,
        message: format!("Expected '{token}', but '{c}' was found"),
    }
}

type Transition = (State, Option<Node>);

/// One state transition for the code point `c` at byte offset `byte` /
/// code-point offset `cp`.
fn step(
    source: &str,
    state: State,
    byte: usize,
    cp: usize,
    c: char,
) -> Result<Transition, SyntaxError> {
    let next_byte = byte + c.len_utf8();

    match state {
        State::Literal { start } => Ok(match c {
            '\r' | '\n' => (
                State::LineStart {
                    start,
                    line_start: next_byte,
                },
                None,
            ),
            '{' => (State::Brace { start, brace: byte }, None),
            _ => (state, None),
        }),

        State::LineStart { start, line_start } => Ok(match c {
            '\r' | '\n' => (
                State::LineStart {
                    start,
                    line_start: next_byte,
                },
                None,
            ),
            '{' => (State::Brace { start, brace: byte }, None),
            '-' => (
                State::Hyphen {
                    start,
                    line_start,
                    margin: true,
                },
                None,
            ),
            c if is_inline_space(c) => (State::Indent { start, line_start }, None),
            _ => (State::Literal { start }, None),
        }),

        State::Indent { start, line_start } => Ok(match c {
            c if is_inline_space(c) => (state, None),
            '\r' | '\n' => (
                State::LineStart {
                    start,
                    line_start: next_byte,
                },
                None,
            ),
            '{' => (State::Brace { start, brace: byte }, None),
            '-' => (
                State::Hyphen {
                    start,
                    line_start,
                    margin: false,
                },
                None,
            ),
            _ => (State::Literal { start }, None),
        }),

        State::Hyphen {
            start,
            line_start,
            margin,
        } => Ok(match c {
            '-' => (
                State::DoubleHyphen {
                    start,
                    line_start,
                    margin,
                },
                None,
            ),
            '{' => (State::Brace { start, brace: byte }, None),
            '\r' | '\n' => (
                State::LineStart {
                    start,
                    line_start: next_byte,
                },
                None,
            ),
            _ => (State::Literal { start }, None),
        }),

        State::DoubleHyphen {
            start,
            line_start,
            margin,
        } => match c {
            // The declaration consumes its whole line, leading whitespace
            // included; the pending literal ends where the line began.
            '{' => Ok((
                State::MarkerOpen { placeholder: true },
                Some(literal(source, start, line_start)),
            )),
            '#' if margin => Ok((State::LineComment, Some(literal(source, start, line_start)))),
            '\r' | '\n' => Ok((
                State::LineStart {
                    start,
                    line_start: next_byte,
                },
                None,
            )),
            // Reserved for future line-based syntax.
            c if margin && c.is_alphanumeric() => Err(SyntaxError {
                position: cp,
                message: format!("Unexpected character '{c}' following '--'"),
            }),
            _ => Ok((State::Literal { start }, None)),
        },

        State::Brace { start, brace } => match c {
            '{' => Ok((
                State::MarkerOpen { placeholder: false },
                Some(literal(source, start, brace)),
            )),
            '⁅' => Ok((
                State::InlineLiteral {
                    content_start: next_byte,
                    depth: 0,
                },
                Some(literal(source, start, brace)),
            )),
            '#' => Ok((State::InlineComment, Some(literal(source, start, brace)))),
            '\r' | '\n' => Ok((
                State::LineStart {
                    start,
                    line_start: next_byte,
                },
                None,
            )),
            c if is_inline_space(c) || is_identifier_char(c) => {
                Ok((State::Literal { start }, None))
            }
            _ => Err(SyntaxError {
                position: cp,
                message: format!("Unexpected character '{c}' following '{{'"),
            }),
        },

        State::MarkerOpen { placeholder } => match c {
            c if is_marker_space(c) => Ok((state, None)),
            c if is_identifier_char(c) => Ok((
                State::VariableName {
                    placeholder,
                    name_start: byte,
                },
                None,
            )),
            _ => Err(invalid_identifier(cp, c, "name")),
        },

        State::VariableName {
            placeholder,
            name_start,
        } => match c {
            ':' => Ok((
                State::AfterColon {
                    placeholder,
                    name_start,
                    name_end: byte,
                },
                None,
            )),
            c if is_marker_space(c) => Ok((
                State::BeforeColon {
                    placeholder,
                    name_start,
                    name_end: byte,
                },
                None,
            )),
            c if is_identifier_char(c) => Ok((state, None)),
            _ => Err(invalid_identifier(cp, c, "name")),
        },

        State::BeforeColon {
            placeholder,
            name_start,
            name_end,
        } => match c {
            ':' => Ok((
                State::AfterColon {
                    placeholder,
                    name_start,
                    name_end,
                },
                None,
            )),
            c if is_marker_space(c) => Ok((state, None)),
            _ => Err(expected(cp, ":", c)),
        },

        State::AfterColon {
            placeholder,
            name_start,
            name_end,
        } => match c {
            c if is_marker_space(c) => Ok((state, None)),
            c if is_identifier_char(c) => Ok((
                State::VariableType {
                    placeholder,
                    name_start,
                    name_end,
                    type_start: byte,
                },
                None,
            )),
            _ => Err(invalid_identifier(cp, c, "type")),
        },

        State::VariableType {
            placeholder,
            name_start,
            name_end,
            type_start,
        } => match c {
            '}' => Ok((
                State::CloseBrace { placeholder },
                Some(variable(
                    source,
                    placeholder,
                    name_start,
                    name_end,
                    type_start,
                    byte,
                )),
            )),
            c if is_marker_space(c) => Ok((
                State::AwaitCloseBrace { placeholder },
                Some(variable(
                    source,
                    placeholder,
                    name_start,
                    name_end,
                    type_start,
                    byte,
                )),
            )),
            c if is_identifier_char(c) => Ok((state, None)),
            _ => Err(invalid_identifier(cp, c, "type")),
        },

        State::AwaitCloseBrace { placeholder } => match c {
            '}' => Ok((State::CloseBrace { placeholder }, None)),
            c if is_marker_space(c) => Ok((state, None)),
            _ => Err(expected(cp, "}", c)),
        },

        State::CloseBrace { placeholder } => match (placeholder, c) {
            (false, '}') => Ok((State::Literal { start: next_byte }, None)),
            (false, _) => Err(expected(cp, "}", c)),
            (true, '-') => Ok((State::ClosingHyphen, None)),
            (true, _) => Err(expected(cp, "-", c)),
        },

        State::ClosingHyphen => match c {
            '-' => Ok((State::LineEnd, None)),
            _ => Err(expected(cp, "-", c)),
        },

        State::LineEnd => match c {
            '\n' => Ok((
                State::LineStart {
                    start: next_byte,
                    line_start: next_byte,
                },
                None,
            )),
            '\r' => Ok((State::LineEndCr, None)),
            _ => Err(SyntaxError {
                position: cp,
                message: format!("Expected a new line, but '{c}' was found"),
            }),
        },

        State::LineEndCr => Ok(match c {
            '\n' => (
                State::LineStart {
                    start: next_byte,
                    line_start: next_byte,
                },
                None,
            ),
            // A lone CR terminated the marker line; the current character
            // already belongs to the next literal.
            '\r' => (
                State::LineStart {
                    start: byte,
                    line_start: next_byte,
                },
                None,
            ),
            '{' => (
                State::Brace {
                    start: byte,
                    brace: byte,
                },
                None,
            ),
            _ => (State::Literal { start: byte }, None),
        }),

        State::InlineLiteral {
            content_start,
            depth,
        } => Ok(match c {
            '⁅' => (
                State::InlineLiteral {
                    content_start,
                    depth: depth + 1,
                },
                None,
            ),
            '⁆' if depth == 0 => (
                State::InlineLiteralClose {
                    content_start,
                    bracket: byte,
                },
                None,
            ),
            '⁆' => (
                State::InlineLiteral {
                    content_start,
                    depth: depth - 1,
                },
                None,
            ),
            _ => (state, None),
        }),

        State::InlineLiteralClose {
            content_start,
            bracket,
        } => Ok(match c {
            '}' => (
                State::Literal { start: next_byte },
                Some(inline_literal(source, content_start, bracket)),
            ),
            // The previous candidate bracket turns out to be content.
            '⁆' => (
                State::InlineLiteralClose {
                    content_start,
                    bracket: byte,
                },
                None,
            ),
            '⁅' => (
                State::InlineLiteral {
                    content_start,
                    depth: 1,
                },
                None,
            ),
            _ => (
                State::InlineLiteral {
                    content_start,
                    depth: 0,
                },
                None,
            ),
        }),

        State::InlineComment => Ok(match c {
            '#' => (State::InlineCommentHash, None),
            _ => (state, None),
        }),

        State::InlineCommentHash => Ok(match c {
            '#' => (state, None),
            '}' => (State::Literal { start: next_byte }, None),
            _ => (State::InlineComment, None),
        }),

        State::LineComment => Ok(match c {
            '#' => (State::LineCommentHash, None),
            _ => (state, None),
        }),

        State::LineCommentHash => Ok(match c {
            '#' => (state, None),
            '-' => (State::LineCommentHashHyphen, None),
            _ => (State::LineComment, None),
        }),

        State::LineCommentHashHyphen => Ok(match c {
            '#' => (State::LineCommentHash, None),
            '-' => (State::LineEnd, None),
            _ => (State::LineComment, None),
        }),
    }
}

/// End-of-input handling: flush the pending literal, or name the token an
/// open marker still expects.
fn finish(source: &str, state: State, position: usize) -> Result<Option<Node>, SyntaxError> {
    let missing = |token: &str| SyntaxError {
        position,
        message: format!("Expected '{token}', but the input has no more characters"),
    };
    let missing_a = |subject: &str| SyntaxError {
        position,
        message: format!("Expected a variable {subject}, but the input has no more characters"),
    };

    match state {
        State::Literal { start }
        | State::LineStart { start, .. }
        | State::Indent { start, .. }
        | State::Hyphen { start, .. }
        | State::DoubleHyphen { start, .. }
        | State::Brace { start, .. } => Ok(Some(terminal_literal(source, start))),

        State::LineEnd | State::LineEndCr => Ok(None),

        State::MarkerOpen { .. } => Err(missing_a("name")),
        State::VariableName { .. } | State::BeforeColon { .. } => Err(missing(":")),
        State::AfterColon { .. } => Err(missing_a("type")),
        State::VariableType { placeholder, .. } => {
            Err(missing(if placeholder { "}--" } else { "}}" }))
        }
        State::AwaitCloseBrace { .. } => Err(missing("}")),
        State::CloseBrace { placeholder } => Err(missing(if placeholder { "-" } else { "}" })),
        State::ClosingHyphen => Err(missing("-")),

        State::InlineLiteral { .. } => Err(missing("⁆}")),
        State::InlineLiteralClose { .. } => Err(missing("}")),
        State::InlineComment => Err(missing("#}")),
        State::InlineCommentHash => Err(missing("}")),
        State::LineComment => Err(missing("#--")),
        State::LineCommentHash => Err(missing("--")),
        State::LineCommentHashHyphen => Err(missing("-")),
    }
}
