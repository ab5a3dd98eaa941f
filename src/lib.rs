// src/lib.rs

//! `repodigest` is a library and command-line tool that turns a repository into a
//! single text digest: a directory tree followed by the contents of every text file,
//! ready to paste into a large-language-model prompt.
//!
//! The input can be a local directory or a repository URL. GitHub and GitLab web
//! URLs (including `/tree/<branch>` links) are normalized into clone URLs, cloned
//! into a scratch directory, and cleaned up afterwards.
//!
//! The pipeline has three steps:
//! 1.  **Classify**: [`git::classify`] decides whether the input is local or remote.
//! 2.  **Resolve**: [`workspace::resolve_target`] produces a local root directory.
//! 3.  **Digest**: [`generate_digest`] renders the tree and the content using one
//!     shared [`filtering::IgnoreFilter`].
//!
//! # Example: Library Usage
//!
//! ```
//! use repodigest::{generate_digest, ConfigBuilder};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().unwrap();
//! fs::create_dir(temp_dir.path().join("src")).unwrap();
//! fs::write(temp_dir.path().join("src/main.rs"), "fn main() {}\n").unwrap();
//! fs::write(temp_dir.path().join(".gitignore"), "*.log\n").unwrap();
//! fs::write(temp_dir.path().join("debug.log"), "noise").unwrap();
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let digest = generate_digest(temp_dir.path(), &config).unwrap();
//!
//! assert_eq!(digest.tree, "├── src\n│   └── main.rs\n└── .gitignore\n");
//! assert!(digest.content.starts_with("File: src/main.rs\nfn main() {}\n"));
//! assert!(!digest.content.contains("noise"));
//! ```

pub mod cli;
pub mod config;
pub mod core_types;
pub mod errors;
pub mod filtering;
pub mod git;
pub mod output;
pub mod progress;
pub mod workspace;

pub use config::{Config, ConfigBuilder, OutputDestination};
pub use core_types::{Digest, RepositoryTarget};
pub use errors::{Error, Result};

use crate::filtering::{detector_for, IgnoreFilter};
use crate::progress::ProgressReporter;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

/// Builds the digest for the local directory `root`.
///
/// `root` may be relative; it is canonicalized first.
///
/// The ignore filter is built once from `root/.gitignore` and
/// `config.extra_ignore_patterns` and shared by the tree and content passes. The
/// binary detector follows `config.binary_detection`.
///
/// # Errors
/// Returns [`Error::PathNotFound`] if `root` does not exist, [`Error::NotADirectory`]
/// if it is not a directory, and [`Error::IgnorePattern`] for invalid patterns. No
/// partial output is produced in these cases. Unreadable files and subdirectories
/// are logged and skipped.
#[instrument(skip(config), fields(root = %root.display()))]
pub fn generate_digest(root: &Path, config: &Config) -> Result<Digest> {
    let root = workspace::resolve_local_path(root)?;

    let filter = IgnoreFilter::build(&root, &config.extra_ignore_patterns)?;
    let detector = detector_for(config.binary_detection);

    let tree = output::render_tree(&root, &filter);
    let content = output::extract_content(&root, &filter, detector.as_ref());
    log::debug!(
        "Digest generated: {} tree bytes, {} content bytes",
        tree.len(),
        content.len()
    );
    Ok(Digest { tree, content })
}

/// Classifies `config.input`, resolves it to a local directory (cloning if needed),
/// and builds its digest.
///
/// Any scratch directory used for a clone is removed before this function returns.
///
/// # Errors
/// Propagates classification, clone, and digest errors.
pub fn execute(config: &Config, progress: Option<Arc<dyn ProgressReporter>>) -> Result<Digest> {
    let target = git::classify(&config.input)?;
    let resolved = workspace::resolve_target(&target, config, progress)?;
    generate_digest(resolved.root(), config)
}

/// Executes the complete pipeline and delivers the digest.
///
/// The digest goes to `stdout` or, when `config.output_destination` is
/// [`OutputDestination::Clipboard`], to the system clipboard.
///
/// # Errors
/// Propagates errors from [`execute`] and from writing the output.
pub fn run(
    config: &Config,
    progress: Option<Arc<dyn ProgressReporter>>,
    stdout: &mut dyn Write,
) -> Result<()> {
    let digest = execute(config, progress)?;
    output::write_digest(&digest, &config.output_destination, stdout)
}
