// src/output/content.rs

//! Concatenates the text of every included file into the content section.

use super::{sibling_order, to_slash_path};
use crate::filtering::{BinaryDetector, IgnoreFilter};
use log::{debug, trace, warn};
use std::fs;
use std::path::Path;
use tracing::instrument;
use walkdir::{DirEntry, WalkDir};

/// Prefix of the header line that opens each file block.
pub const FILE_HEADER_PREFIX: &str = "File: ";

/// Formats one file block: a header line, the raw content, and a trailing newline.
///
/// # Examples
/// ```
/// use repodigest::output::format_file_block;
///
/// assert_eq!(format_file_block("src/lib.rs", "pub fn f() {}\n"), "File: src/lib.rs\npub fn f() {}\n\n");
/// ```
pub fn format_file_block(relative_path: &str, content: &str) -> String {
    format!("{}{}\n{}\n", FILE_HEADER_PREFIX, relative_path, content)
}

/// Walks every file under `root` and returns the text blocks of the included ones.
///
/// Files are skipped when the filter ignores them (or one of their parent
/// directories), when `detector` reports them as binary, or when they cannot be read;
/// read failures are logged and do not stop the walk. Dotfiles are included unless
/// ignored. Symlinks are never followed.
///
/// Blocks are joined by `\n` and appear in the same order as the files in the tree:
/// directories before files, case-insensitive by name at each level. Invalid UTF-8
/// is replaced lossily.
#[instrument(skip(filter, detector), fields(root = %root.display()))]
pub fn extract_content(root: &Path, filter: &IgnoreFilter, detector: &dyn BinaryDetector) -> String {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by(|a, b| {
            sibling_order(
                a.file_type().is_dir(),
                a.file_name(),
                b.file_type().is_dir(),
                b.file_name(),
            )
        })
        .into_iter()
        .filter_entry(|entry| !is_ignored_entry(root, entry, filter));

    let mut blocks = Vec::new();
    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Walker error: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let absolute_path = entry.path();
        let relative_path = match absolute_path.strip_prefix(root) {
            Ok(rel) => to_slash_path(rel),
            Err(_) => continue,
        };

        if detector.is_binary(absolute_path) {
            debug!("Skipping binary file: {}", relative_path);
            continue;
        }

        match fs::read(absolute_path) {
            Ok(bytes) => {
                trace!("Including '{}' ({} bytes)", relative_path, bytes.len());
                blocks.push(format_file_block(
                    &relative_path,
                    &String::from_utf8_lossy(&bytes),
                ));
            }
            Err(e) => {
                warn!("Error reading file '{}', skipping: {}", relative_path, e);
            }
        }
    }

    debug!("Content extraction complete: {} files included", blocks.len());
    blocks.join("\n")
}

fn is_ignored_entry(root: &Path, entry: &DirEntry, filter: &IgnoreFilter) -> bool {
    match entry.path().strip_prefix(root) {
        Ok(rel) => {
            let ignored = filter.is_ignored(rel, entry.file_type().is_dir());
            if ignored {
                trace!("Content: ignoring '{}'", rel.display());
            }
            ignored
        }
        Err(_) => false,
    }
}
