// src/core_types.rs

//! Defines core data structures used throughout the extraction pipeline.

use std::fmt;
use std::path::PathBuf;

/// Heading that introduces the tree section of a rendered digest.
pub const TREE_SECTION_HEADER: &str = "Repository Tree Structure:";

/// Heading that introduces the content section of a rendered digest.
pub const CONTENT_SECTION_HEADER: &str = "Repository Content:";

/// The classified input: either a local directory or a remote repository to clone.
///
/// Produced once per invocation by [`crate::git::classify`].
///
/// # Examples
///
/// ```
/// use repodigest::core_types::RepositoryTarget;
/// use repodigest::git::classify;
///
/// let target = classify("https://github.com/rust-lang/cargo/tree/master").unwrap();
/// assert_eq!(
///     target,
///     RepositoryTarget::Remote {
///         clone_url: "https://github.com/rust-lang/cargo.git".to_string(),
///         branch: Some("master".to_string()),
///     }
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryTarget {
    /// A path on the local filesystem.
    Local {
        /// The path exactly as given by the caller.
        path: PathBuf,
    },
    /// A remote repository that must be cloned first.
    Remote {
        /// Canonical clone URL, always ending in `.git`.
        clone_url: String,
        /// Branch to check out; `None` means the remote's default branch.
        branch: Option<String>,
    },
}

impl RepositoryTarget {
    /// Returns `true` for remote targets.
    pub fn is_remote(&self) -> bool {
        matches!(self, RepositoryTarget::Remote { .. })
    }
}

/// A filesystem entry seen while walking a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// The absolute path on disk.
    pub absolute_path: PathBuf,
    /// The path relative to the repository root.
    pub relative_path: PathBuf,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

/// The combined tree and content text for one repository.
///
/// # Examples
///
/// ```
/// use repodigest::core_types::Digest;
///
/// let digest = Digest {
///     tree: "└── a.txt\n".to_string(),
///     content: "File: a.txt\nhello\n".to_string(),
/// };
/// assert_eq!(
///     digest.to_string(),
///     "Repository Tree Structure:\n└── a.txt\n\n\nRepository Content:\nFile: a.txt\nhello\n"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Digest {
    /// The rendered directory tree, one line per visible entry.
    pub tree: String,
    /// The concatenated per-file content blocks.
    pub content: String,
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{}\n\n{}\n{}",
            TREE_SECTION_HEADER, self.tree, CONTENT_SECTION_HEADER, self.content
        )
    }
}
