// src/errors.rs

//! Defines application-specific error types.
//!
//! This module provides the `Error` enum used across the library, along with the
//! more specific `GitError` and `ClipboardError` types it wraps. Library functions
//! return [`Result<T>`]; the binary converts these into a message and exit code.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// A specialized `Result` type for repodigest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a repository and building its digest.
#[derive(Error, Debug)]
pub enum Error {
    /// The local repository path does not exist.
    #[error("Repository path does not exist: '{}'", .0.display())]
    PathNotFound(PathBuf),

    /// The local repository path exists but is not a directory.
    #[error("Repository path is not a directory: '{}'", .0.display())]
    NotADirectory(PathBuf),

    /// The input looked like a URL but is not a recognized repository URL.
    #[error("Invalid repository URL: '{0}'")]
    InvalidRepositoryUrl(String),

    /// Cloning or checking out a remote repository failed.
    #[error(transparent)]
    Clone(#[from] GitError),

    /// A remote repository was requested but the binary was built without git support.
    #[error("Remote repositories are not supported in this build (missing 'git' feature): '{0}'")]
    GitUnavailable(String),

    /// Error occurring during file or directory access.
    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        /// The path that caused the I/O error.
        path: String,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    /// A caller-supplied ignore pattern could not be compiled.
    #[error("Invalid ignore pattern '{pattern}': {reason}")]
    IgnorePattern {
        /// The offending pattern.
        pattern: String,
        /// Why the pattern was rejected.
        reason: String,
    },

    /// Invalid configuration settings or combinations.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Error related to clipboard operations.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

/// Errors specific to cloning remote repositories.
#[derive(Error, Debug)]
pub enum GitError {
    /// The clone itself failed (network, authentication, unknown repository...).
    #[error("Failed to clone repository from '{url}': {source}")]
    CloneFailed {
        /// The clone URL that was attempted.
        url: String,
        /// The underlying git error.
        #[source]
        source: anyhow::Error,
    },

    /// The requested branch does not exist on the remote.
    #[error("Branch '{branch}' not found in repository '{url}'")]
    BranchNotFound {
        /// The branch that was requested.
        branch: String,
        /// The clone URL.
        url: String,
    },

    /// Creating the scratch directory for the clone failed.
    #[error("Failed to create temporary directory for clone: {0}")]
    TempDir(#[source] std::io::Error),
}

/// Errors specific to clipboard operations.
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// The system clipboard could not be opened.
    #[error("Failed to initialize clipboard: {0}")]
    Initialization(String),
    /// The clipboard rejected the content.
    #[error("Failed to set clipboard content: {0}")]
    SetContent(String),
    /// Clipboard support was not compiled in.
    #[error("Clipboard support is not available in this build (missing 'clipboard' feature)")]
    Unavailable,
}

/// Helper function to create an `Error::Io` with path context.
pub fn io_error_with_path<P: AsRef<Path>>(source: std::io::Error, path: P) -> Error {
    Error::Io {
        path: path.as_ref().display().to_string(),
        source,
    }
}
