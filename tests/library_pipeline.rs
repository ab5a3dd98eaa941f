// tests/library_pipeline.rs

mod common;

use common::create_file;
use repodigest::config::BinaryDetection;
use repodigest::filtering::IgnoreFilter;
use repodigest::output::{extract_content, render_tree, FILE_HEADER_PREFIX};
use repodigest::{generate_digest, run, ConfigBuilder, Error};
use std::path::Path;
use tempfile::tempdir;

/// Returns the file paths in the order their blocks appear in `content`.
fn block_paths(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| line.strip_prefix(FILE_HEADER_PREFIX))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_content_order_matches_tree_order() -> anyhow::Result<()> {
    let temp = tempdir()?;
    let root = temp.path();
    for name in [
        "zeta.txt",
        "Alpha.txt",
        "lib/Beta.rs",
        "lib/alpha.rs",
        "lib/nested/deep.txt",
        "docs/guide.md",
        ".editorconfig",
    ] {
        create_file(root, name, name);
    }

    let config = ConfigBuilder::new().build()?;
    let digest = generate_digest(root, &config)?;

    assert_eq!(
        digest.tree,
        "├── docs\n\
         │   └── guide.md\n\
         ├── lib\n\
         │   ├── nested\n\
         │   │   └── deep.txt\n\
         │   ├── alpha.rs\n\
         │   └── Beta.rs\n\
         ├── .editorconfig\n\
         ├── Alpha.txt\n\
         └── zeta.txt\n"
    );
    assert_eq!(
        block_paths(&digest.content),
        vec![
            "docs/guide.md",
            "lib/nested/deep.txt",
            "lib/alpha.rs",
            "lib/Beta.rs",
            ".editorconfig",
            "Alpha.txt",
            "zeta.txt",
        ]
    );
    Ok(())
}

#[test]
fn test_accented_names_sort_with_their_base_letter() -> anyhow::Result<()> {
    let temp = tempdir()?;
    let root = temp.path();
    for name in ["zebra.txt", "éclair.txt", "apple.txt", "Émile/notes.md", "docs/x.md"] {
        create_file(root, name, "x");
    }

    let digest = generate_digest(root, &ConfigBuilder::new().build()?)?;
    assert_eq!(
        digest.tree,
        "├── docs\n\
         │   └── x.md\n\
         ├── Émile\n\
         │   └── notes.md\n\
         ├── apple.txt\n\
         ├── éclair.txt\n\
         └── zebra.txt\n"
    );
    assert_eq!(
        block_paths(&digest.content),
        vec!["docs/x.md", "Émile/notes.md", "apple.txt", "éclair.txt", "zebra.txt"]
    );
    Ok(())
}

#[test]
fn test_shared_filter_hides_entries_from_both_passes() -> anyhow::Result<()> {
    let temp = tempdir()?;
    let root = temp.path();
    create_file(root, ".gitignore", "target/\n!.git\n");
    create_file(root, ".git/HEAD", "ref: refs/heads/main\n");
    create_file(root, "target/debug/app", "elf");
    create_file(root, "coverage/lcov.info", "TN:");
    create_file(root, "src/main.rs", "fn main() {}\n");

    let filter = IgnoreFilter::build(root, &["coverage".to_string()])?;
    let tree = render_tree(root, &filter);
    let content = extract_content(
        root,
        &filter,
        repodigest::filtering::detector_for(BinaryDetection::NullByte).as_ref(),
    );

    assert_eq!(tree, "├── src\n│   └── main.rs\n└── .gitignore\n");
    assert_eq!(block_paths(&content), vec!["src/main.rs", ".gitignore"]);
    Ok(())
}

#[test]
fn test_generate_digest_rejects_file_root() -> anyhow::Result<()> {
    let temp = tempdir()?;
    create_file(temp.path(), "only.txt", "x");

    let config = ConfigBuilder::new().build()?;
    let result = generate_digest(&temp.path().join("only.txt"), &config);
    assert!(matches!(result, Err(Error::NotADirectory(_))));
    Ok(())
}

#[test]
fn test_run_writes_nothing_on_invalid_url() -> anyhow::Result<()> {
    let config = ConfigBuilder::new()
        .input_path("ftp://example.com/archive")
        .build()?;

    let mut buffer = Vec::new();
    let result = run(&config, None, &mut buffer);
    assert!(matches!(result, Err(Error::InvalidRepositoryUrl(_))));
    assert!(buffer.is_empty());
    Ok(())
}

#[test]
fn test_run_leaves_working_directory_unchanged() -> anyhow::Result<()> {
    let temp = tempdir()?;
    create_file(temp.path(), "a.txt", "a");
    let before = std::env::current_dir()?;

    let config = ConfigBuilder::new()
        .input_path(temp.path().to_string_lossy())
        .build()?;
    let mut buffer = Vec::new();
    run(&config, None, &mut buffer)?;

    assert_eq!(std::env::current_dir()?, before);
    assert!(String::from_utf8(buffer)?.ends_with("File: a.txt\na\n"));
    Ok(())
}

#[test]
fn test_inspect_strategy_through_config() -> anyhow::Result<()> {
    let temp = tempdir()?;
    let root: &Path = temp.path();
    create_file(root, "utf16.txt", [0xFF, 0xFE, b'h', 0x00, b'i', 0x00]);
    create_file(root, "plain.txt", "plain");

    let lenient = generate_digest(root, &ConfigBuilder::new().build()?)?;
    assert_eq!(block_paths(&lenient.content), vec!["plain.txt"]);

    let strict = generate_digest(
        root,
        &ConfigBuilder::new()
            .binary_detection(BinaryDetection::Inspect)
            .build()?,
    )?;
    assert_eq!(block_paths(&strict.content), vec!["plain.txt"]);
    assert!(strict.tree.contains("utf16.txt"));
    Ok(())
}
