/*
 * ident.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Mapping template identifiers onto legal Rust identifiers.
//!
//! Template names and types may contain `-`, `'`, `&` and `,`, and are
//! case-free as far as the template language is concerned. Runs of
//! alphanumerics become the words of the Rust identifier; a lower-to-upper
//! case change also starts a new word. Keywords get a trailing underscore.

/// Keywords that cannot be used as emitted identifiers.
const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
    "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
    "true", "type", "unsafe", "use", "where", "while",
];

fn dodge_keyword(ident: String) -> String {
    if KEYWORDS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident
    }
}

/// A snake_case value identifier (parameter, field, or module word).
pub fn value_ident(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut boundary = false;
    let mut prev_lower = false;
    for c in raw.chars() {
        if !c.is_alphanumeric() {
            boundary = true;
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower {
            boundary = true;
        }
        if boundary && !out.is_empty() {
            out.push('_');
        }
        boundary = false;
        out.extend(c.to_lowercase());
        prev_lower = c.is_lowercase() || c.is_numeric();
    }
    if out.is_empty() {
        return "value".to_string();
    }
    if out.starts_with(|c: char| c.is_numeric()) {
        return format!("v{out}");
    }
    dodge_keyword(out)
}

/// A CamelCase type-parameter identifier.
pub fn type_ident(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut upper_next = true;
    for c in raw.chars() {
        if !c.is_alphanumeric() {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        upper_next = false;
    }
    if out.is_empty() {
        return "Value".to_string();
    }
    if out.starts_with(|c: char| c.is_numeric()) {
        return format!("T{out}");
    }
    dodge_keyword(out)
}

/// A module name for an output unit or format selector.
pub fn module_ident(raw: &str) -> String {
    value_ident(raw)
}

/// An escaped Rust string literal for embedded template text.
pub fn string_literal(raw: &str) -> String {
    format!("{raw:?}")
}
