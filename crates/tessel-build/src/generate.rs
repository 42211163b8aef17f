/*
 * generate.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! A generation run: compile every discovered template group and write the
//! rendered units beneath the destination directory.

use crate::discovery::{TemplateGroup, discover};
use crate::encoding::read_text_detecting_bom;
use crate::error::{BuildError, BuildResult};
use std::fs;
use std::path::Path;
use tessel_emit::{UnitMember, module_ident, render_unit};
use tessel_template::{Compiler, FormatterDescription};
use tracing::{debug, info};

/// Compile every template group under `source_root` and write one generated
/// file per output unit, mirroring the source-relative layout.
///
/// The destination directory is removed and recreated first; any error
/// aborts the run with nothing further written.
pub fn generate_all(
    compiler: &Compiler,
    source_root: &Path,
    destination: &Path,
) -> BuildResult<()> {
    if destination.exists() {
        fs::remove_dir_all(destination)?;
    }
    fs::create_dir_all(destination)?;

    let groups = discover(source_root)?;
    info!(groups = groups.len(), "generating formatter units");

    for group in &groups {
        let rendered = render_group(compiler, group)?;
        let directory = destination.join(&group.directory);
        fs::create_dir_all(&directory)?;
        let file = directory.join(format!("{}.rs", module_ident(&group.unit)));
        fs::write(&file, rendered)?;
        debug!(unit = %group.unit, path = %file.display(), "wrote unit");
    }
    Ok(())
}

fn render_group(compiler: &Compiler, group: &TemplateGroup) -> BuildResult<String> {
    let base = match &group.base {
        Some(path) => Some(compile_template(compiler, &group.unit, path)?),
        None => None,
    };
    let mut members = Vec::new();
    for (format, path) in &group.members {
        members.push(UnitMember {
            format: format.clone(),
            description: compile_template(compiler, format, path)?,
        });
    }
    let body = render_unit(&group.unit, base.as_ref(), &members).map_err(|error| {
        BuildError::Emit {
            unit: group.unit.clone(),
            source: error,
        }
    })?;
    Ok(format!("// Generated by tessel. Do not edit.\n\n{body}"))
}

fn compile_template(
    compiler: &Compiler,
    format: &str,
    path: &Path,
) -> BuildResult<FormatterDescription> {
    let source = read_text_detecting_bom(path)?;
    debug!(path = %path.display(), format, "compiling template");
    compiler
        .compile(format, &source)
        .map_err(|error| BuildError::Compile {
            path: path.to_path_buf(),
            source: error,
        })
}
