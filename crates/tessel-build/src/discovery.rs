/*
 * discovery.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Discovery and grouping of template files.
//!
//! Sibling templates that share a unit name within one directory compile
//! into a single output unit: `Greeting.txt.tessel` and
//! `Greeting.html.tessel` become the `Greeting` unit with `txt` and `html`
//! members. A stem with no inner extension (`txt.tessel`) is a base template
//! whose unit name doubles as its format selector.

use crate::error::BuildResult;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// File extension of template sources.
pub const TEMPLATE_EXTENSION: &str = "tessel";

const TEMPLATE_SUFFIX: &str = ".tessel";

/// Sibling templates sharing one output unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateGroup {
    /// Directory of the group, relative to the source root.
    pub directory: PathBuf,

    /// Output-unit name shared by the group.
    pub unit: String,

    /// A base template, compiled with the unit name as its format selector.
    pub base: Option<PathBuf>,

    /// (format selector, template path) pairs, sorted by format.
    pub members: Vec<(String, PathBuf)>,
}

/// Walk `root` and group every template file by directory and unit name.
///
/// Group and member order is deterministic: groups sort by (directory, unit),
/// members by format selector.
pub fn discover(root: &Path) -> BuildResult<Vec<TemplateGroup>> {
    let mut groups: BTreeMap<(PathBuf, String), TemplateGroup> = BTreeMap::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        let Some(stem) = name.strip_suffix(TEMPLATE_SUFFIX) else {
            continue;
        };
        if stem.is_empty() {
            continue;
        }

        let directory = entry.path().parent().unwrap_or(root);
        let relative = directory
            .strip_prefix(root)
            .unwrap_or(directory)
            .to_path_buf();

        let (unit, format) = match stem.rsplit_once('.') {
            Some((unit, format)) if !unit.is_empty() && !format.is_empty() => {
                (unit.to_string(), Some(format.to_string()))
            }
            _ => (stem.to_string(), None),
        };

        let group = groups
            .entry((relative.clone(), unit.clone()))
            .or_insert_with(|| TemplateGroup {
                directory: relative,
                unit,
                base: None,
                members: Vec::new(),
            });
        match format {
            Some(format) => group.members.push((format, entry.path().to_path_buf())),
            None => group.base = Some(entry.path().to_path_buf()),
        }
    }

    let mut result: Vec<TemplateGroup> = groups.into_values().collect();
    for group in &mut result {
        group.members.sort();
    }
    debug!(groups = result.len(), "discovered template groups");
    Ok(result)
}
