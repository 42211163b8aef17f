/*
 * render.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Rendering of formatter descriptions into Rust source text.

use crate::error::EmitError;
use crate::ident::{module_ident, string_literal, type_ident, value_ident};
use tessel_template::{Argument, Fragment, FormatterDescription, SymbolRef};

/// Where a rendered formatter lands: an output-unit name and, for formatters
/// nested inside a grouped unit, the enclosing unit's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub unit: String,
    pub enclosing_unit: Option<String>,
}

/// One format member of a grouped output unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitMember {
    pub format: String,
    pub description: FormatterDescription,
}

/// Render a single formatter as its own module (nested inside the enclosing
/// unit's module when the placement names one).
pub fn render_formatter(
    placement: &Placement,
    description: &FormatterDescription,
) -> Result<String, EmitError> {
    let mut out = String::new();
    match &placement.enclosing_unit {
        Some(enclosing) => {
            line(&mut out, 0, &format!("pub mod {} {{", module_ident(enclosing)));
            line(
                &mut out,
                1,
                &format!("pub mod {} {{", module_ident(&placement.unit)),
            );
            write_formatter_items(&mut out, 2, description)?;
            line(&mut out, 1, "}");
            line(&mut out, 0, "}");
        }
        None => {
            line(
                &mut out,
                0,
                &format!("pub mod {} {{", module_ident(&placement.unit)),
            );
            write_formatter_items(&mut out, 1, description)?;
            line(&mut out, 0, "}");
        }
    }
    Ok(out)
}

/// Render a grouped output unit: the base formatter's items (if any) at unit
/// level, plus one nested module per format member.
pub fn render_unit(
    unit: &str,
    base: Option<&FormatterDescription>,
    members: &[UnitMember],
) -> Result<String, EmitError> {
    let mut out = String::new();
    line(&mut out, 0, &format!("pub mod {} {{", module_ident(unit)));
    let mut first = true;
    if let Some(description) = base {
        write_formatter_items(&mut out, 1, description)?;
        first = false;
    }
    for member in members {
        if !first {
            out.push('\n');
        }
        first = false;
        line(
            &mut out,
            1,
            &format!("pub mod {} {{", module_ident(&member.format)),
        );
        write_formatter_items(&mut out, 2, &member.description)?;
        line(&mut out, 1, "}");
    }
    line(&mut out, 0, "}");
    Ok(out)
}

fn line(out: &mut String, indent: usize, content: &str) {
    for _ in 0..indent {
        out.push_str("    ");
    }
    out.push_str(content);
    out.push('\n');
}

/// The trait, instance, and constructor for one formatter.
fn write_formatter_items(
    out: &mut String,
    indent: usize,
    description: &FormatterDescription,
) -> Result<(), EmitError> {
    let generics: Vec<String> = description
        .type_parameters
        .iter()
        .map(|parameter| type_ident(&parameter.declared_type))
        .collect();
    let generic_list = if generics.is_empty() {
        String::new()
    } else {
        format!("<{}>", generics.join(", "))
    };

    // One input callback per type parameter: generic input in, target type
    // out.
    let mut signature = String::from("fn format(&self");
    for parameter in &description.type_parameters {
        signature.push_str(&format!(
            ", {}: &dyn Fn(&{}) -> {}",
            value_ident(&parameter.declared_type),
            type_ident(&parameter.declared_type),
            parameter.target_type.path(),
        ));
    }
    signature.push_str(&format!(") -> {}", description.output_type.path()));

    line(out, indent, &format!("pub trait Formatter{generic_list} {{"));
    line(out, indent + 1, &format!("{signature};"));
    line(out, indent, "}");
    out.push('\n');

    if description.value_parameters.is_empty() {
        line(out, indent, "pub struct Instance;");
    } else {
        line(out, indent, &format!("pub struct Instance{generic_list} {{"));
        for parameter in &description.value_parameters {
            line(
                out,
                indent + 1,
                &format!(
                    "pub {}: {},",
                    value_ident(&parameter.name),
                    type_ident(&parameter.declared_type)
                ),
            );
        }
        line(out, indent, "}");
    }
    out.push('\n');

    line(
        out,
        indent,
        &format!("impl{generic_list} Formatter{generic_list} for Instance{generic_list} {{"),
    );
    line(out, indent + 1, &format!("{signature} {{"));
    line(out, indent + 2, &render_body(description)?);
    line(out, indent + 1, "}");
    line(out, indent, "}");
    out.push('\n');

    let constructor_parameters: Vec<String> = description
        .value_parameters
        .iter()
        .map(|parameter| {
            format!(
                "{}: {}",
                value_ident(&parameter.name),
                type_ident(&parameter.declared_type)
            )
        })
        .collect();
    line(
        out,
        indent,
        &format!(
            "pub fn formatter{generic_list}({}) -> Instance{generic_list} {{",
            constructor_parameters.join(", ")
        ),
    );
    if description.value_parameters.is_empty() {
        line(out, indent + 1, "Instance");
    } else {
        let fields: Vec<String> = description
            .value_parameters
            .iter()
            .map(|parameter| value_ident(&parameter.name))
            .collect();
        line(
            out,
            indent + 1,
            &format!("Instance {{ {} }}", fields.join(", ")),
        );
    }
    line(out, indent, "}");
    Ok(())
}

/// The assembled body expression.
fn render_body(description: &FormatterDescription) -> Result<String, EmitError> {
    if description.body.is_empty() {
        return Ok(format!("{}::default()", description.output_type.path()));
    }
    let mut body = String::new();
    for fragment in &description.body {
        body.push_str(&render_fragment(fragment)?);
    }
    Ok(body)
}

fn render_fragment(fragment: &Fragment) -> Result<String, EmitError> {
    if let Some(index) = fragment.text.find("%S") {
        let value = constant_argument(fragment)?;
        return Ok(splice(&fragment.text, index, &string_literal(value)));
    }
    if let Some(index) = fragment.text.find("%N") {
        let value = constant_argument(fragment)?;
        return Ok(splice(&fragment.text, index, &value_ident(value)));
    }
    if let Some(index) = fragment.text.find("%M") {
        let symbol = reference_argument(fragment)?;
        return Ok(splice(&fragment.text, index, symbol.path()));
    }
    Ok(fragment.text.clone())
}

/// Replace the two-byte splice code at `index` with `replacement`.
fn splice(text: &str, index: usize, replacement: &str) -> String {
    format!("{}{}{}", &text[..index], replacement, &text[index + 2..])
}

fn constant_argument(fragment: &Fragment) -> Result<&str, EmitError> {
    match &fragment.argument {
        Some(Argument::Constant(value)) => Ok(value),
        Some(Argument::Reference(_)) => Err(EmitError::ArgumentMismatch {
            text: fragment.text.clone(),
            expected: "constant".to_string(),
            found: "reference".to_string(),
        }),
        None => Err(EmitError::MissingArgument {
            text: fragment.text.clone(),
            expected: "constant".to_string(),
        }),
    }
}

fn reference_argument(fragment: &Fragment) -> Result<&SymbolRef, EmitError> {
    match &fragment.argument {
        Some(Argument::Reference(symbol)) => Ok(symbol),
        Some(Argument::Constant(_)) => Err(EmitError::ArgumentMismatch {
            text: fragment.text.clone(),
            expected: "reference".to_string(),
            found: "constant".to_string(),
        }),
        None => Err(EmitError::MissingArgument {
            text: fragment.text.clone(),
            expected: "reference".to_string(),
        }),
    }
}
