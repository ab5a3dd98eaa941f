// tests/relative_root.rs
//
// Changes the process working directory, so it lives in its own test binary.

mod common;

use common::create_file;
use repodigest::{generate_digest, ConfigBuilder};
use std::path::Path;
use tempfile::tempdir;

#[test]
fn test_generate_digest_with_relative_root() -> anyhow::Result<()> {
    let temp = tempdir()?;
    create_file(temp.path(), "a/ab/keep.txt", "kept");
    create_file(temp.path(), "a/b/dropped.txt", "dropped");
    create_file(temp.path(), "a/top.txt", "top");

    let original_dir = std::env::current_dir()?;
    std::env::set_current_dir(temp.path())?;
    let config = ConfigBuilder::new().ignore_pattern("/b").build()?;
    let result = generate_digest(Path::new("a"), &config);
    std::env::set_current_dir(original_dir)?;

    let digest = result?;
    assert_eq!(digest.tree, "├── ab\n│   └── keep.txt\n└── top.txt\n");
    assert_eq!(
        digest.content,
        "File: ab/keep.txt\nkept\n\nFile: top.txt\ntop\n"
    );
    Ok(())
}
