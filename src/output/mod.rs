// src/output/mod.rs

//! Renders the digest sections and delivers the final text.
//!
//! - [`tree`]: the directory tree section.
//! - [`content`]: the concatenated file blocks.
//! - [`writer`]: stdout or clipboard delivery.

use icu_collator::{Collator, CollatorOptions, Strength};
use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::ffi::OsStr;
use std::path::{Component, Path};

pub mod content;
pub mod tree;
pub mod writer;

pub use content::{extract_content, format_file_block, FILE_HEADER_PREFIX};
pub use tree::{render_tree, TreeLine};
pub use writer::write_digest;

/// Root-locale collator at secondary strength: case is ignored, accents are not.
static NAME_COLLATOR: Lazy<Option<Collator>> = Lazy::new(|| {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Secondary);
    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            log::warn!("Collation data unavailable, ordering names by lowercase: {}", e);
            None
        }
    }
});

/// Orders two sibling entries: directories first, then case-insensitive,
/// locale-aware name.
///
/// Names that collate equal fall back to a byte comparison so the order is total.
pub(crate) fn sibling_order(a_is_dir: bool, a_name: &OsStr, b_is_dir: bool, b_name: &OsStr) -> Ordering {
    b_is_dir
        .cmp(&a_is_dir)
        .then_with(|| compare_names(a_name, b_name))
        .then_with(|| a_name.cmp(b_name))
}

fn compare_names(a: &OsStr, b: &OsStr) -> Ordering {
    let a = a.to_string_lossy();
    let b = b.to_string_lossy();
    match NAME_COLLATOR.as_ref() {
        Some(collator) => collator.compare(&a, &b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Renders a relative path with `/` separators regardless of platform.
pub(crate) fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
