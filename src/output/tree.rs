// src/output/tree.rs

//! Renders the directory tree section of a digest.

use super::sibling_order;
use crate::core_types::FileEntry;
use crate::filtering::IgnoreFilter;
use log::{trace, warn};
use std::fs;
use std::io;
use std::path::Path;
use tracing::instrument;

const BRANCH_TEE: &str = "├── ";
const BRANCH_CORNER: &str = "└── ";
const PREFIX_BAR: &str = "│   ";
const PREFIX_BLANK: &str = "    ";

/// One visible entry of the tree, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    /// For every ancestor level below the root, whether that ancestor was the last
    /// visible sibling at its level. The length is the entry's depth.
    pub ancestors_last: Vec<bool>,
    /// Whether this entry is the last visible sibling in its directory.
    pub is_last: bool,
    /// The entry's file name.
    pub name: String,
}

impl TreeLine {
    /// Renders the line with box-drawing connectors.
    ///
    /// # Examples
    /// ```
    /// use repodigest::output::TreeLine;
    ///
    /// let line = TreeLine {
    ///     ancestors_last: vec![false, true],
    ///     is_last: true,
    ///     name: "mod.rs".to_string(),
    /// };
    /// assert_eq!(line.render(), "│       └── mod.rs");
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        for &ancestor_last in &self.ancestors_last {
            out.push_str(if ancestor_last { PREFIX_BLANK } else { PREFIX_BAR });
        }
        out.push_str(if self.is_last { BRANCH_CORNER } else { BRANCH_TEE });
        out.push_str(&self.name);
        out
    }
}

/// Renders every non-ignored entry under `root` as an indented tree.
///
/// Siblings are listed directories first, then by case-insensitive name. The binary
/// detector is not consulted: binary files appear here even though the content
/// section leaves them out. Symlinks are listed but never followed.
///
/// Returns the lines joined by `\n` with a trailing newline, or an empty string if
/// nothing is visible. If `root` cannot be read, a warning is logged and an empty
/// string is returned.
#[instrument(skip(filter), fields(root = %root.display()))]
pub fn render_tree(root: &Path, filter: &IgnoreFilter) -> String {
    let mut lines = Vec::new();
    if let Err(e) = collect_lines(root, Path::new(""), &[], filter, &mut lines) {
        warn!("Could not generate tree for '{}': {}", root.display(), e);
        return String::new();
    }
    if lines.is_empty() {
        return String::new();
    }
    let mut rendered = lines
        .iter()
        .map(TreeLine::render)
        .collect::<Vec<_>>()
        .join("\n");
    rendered.push('\n');
    rendered
}

/// Collects the lines for one directory level and recurses into visible subdirectories.
///
/// Errors listing `dir_relative` itself are returned; errors in deeper levels are
/// logged and leave that subdirectory without children.
fn collect_lines(
    root: &Path,
    dir_relative: &Path,
    ancestors_last: &[bool],
    filter: &IgnoreFilter,
    lines: &mut Vec<TreeLine>,
) -> io::Result<()> {
    let entries = visible_entries(root, dir_relative, filter)?;
    let count = entries.len();

    for (idx, entry) in entries.into_iter().enumerate() {
        let is_last = idx + 1 == count;
        let name = entry
            .relative_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        lines.push(TreeLine {
            ancestors_last: ancestors_last.to_vec(),
            is_last,
            name,
        });

        if entry.is_dir {
            let mut child_ancestors = ancestors_last.to_vec();
            child_ancestors.push(is_last);
            if let Err(e) = collect_lines(
                root,
                &entry.relative_path,
                &child_ancestors,
                filter,
                lines,
            ) {
                warn!(
                    "Could not read directory '{}': {}",
                    entry.absolute_path.display(),
                    e
                );
            }
        }
    }
    Ok(())
}

/// Lists one directory, dropping ignored entries, in display order.
fn visible_entries(
    root: &Path,
    dir_relative: &Path,
    filter: &IgnoreFilter,
) -> io::Result<Vec<FileEntry>> {
    let mut entries = Vec::new();
    for dir_entry in fs::read_dir(root.join(dir_relative))? {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry in '{}': {}", dir_relative.display(), e);
                continue;
            }
        };
        let is_dir = match dir_entry.file_type() {
            Ok(ft) => ft.is_dir(),
            Err(e) => {
                warn!(
                    "Skipping '{}' due to file type error: {}",
                    dir_entry.path().display(),
                    e
                );
                continue;
            }
        };
        let relative_path = dir_relative.join(dir_entry.file_name());
        if filter.is_ignored(&relative_path, is_dir) {
            trace!("Tree: ignoring '{}'", relative_path.display());
            continue;
        }
        entries.push(FileEntry {
            absolute_path: dir_entry.path(),
            relative_path,
            is_dir,
        });
    }

    entries.sort_by(|a, b| {
        sibling_order(
            a.is_dir,
            a.relative_path.file_name().unwrap_or_default(),
            b.is_dir,
            b.relative_path.file_name().unwrap_or_default(),
        )
    });
    Ok(entries)
}
