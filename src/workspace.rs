// src/workspace.rs

//! Turns a [`RepositoryTarget`] into a local directory the pipeline can read.
//!
//! Local targets are validated and canonicalized. Remote targets are cloned into a
//! scratch directory that lives exactly as long as the returned
//! [`ResolvedRepository`]; it is removed when that value is dropped, whether the run
//! succeeded or not.

use crate::config::Config;
use crate::core_types::RepositoryTarget;
use crate::errors::{io_error_with_path, Error, Result};
use crate::progress::ProgressReporter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Prefix for scratch directories created for remote clones.
pub const SCRATCH_DIR_PREFIX: &str = "repodigest-";

/// A scratch directory removed on drop. Removal failures are logged, never raised.
#[derive(Debug)]
pub struct ScratchDir {
    dir: Option<TempDir>,
}

impl ScratchDir {
    /// Creates a new, uniquely named scratch directory under the system temp dir.
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_DIR_PREFIX)
            .tempdir()?;
        log::debug!("Created scratch directory '{}'", dir.path().display());
        Ok(Self { dir: Some(dir) })
    }

    /// The scratch directory's path.
    pub fn path(&self) -> &Path {
        self.dir
            .as_ref()
            .map(TempDir::path)
            .unwrap_or_else(|| Path::new(""))
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            match dir.close() {
                Ok(()) => log::debug!("Removed scratch directory '{}'", path.display()),
                Err(e) => log::warn!(
                    "Failed to remove temporary directory '{}': {}",
                    path.display(),
                    e
                ),
            }
        }
    }
}

/// A repository available on the local filesystem.
#[derive(Debug)]
pub struct ResolvedRepository {
    root: PathBuf,
    scratch: Option<ScratchDir>,
}

impl ResolvedRepository {
    /// The absolute root directory of the repository.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns `true` if the repository was cloned into a scratch directory.
    pub fn is_cloned(&self) -> bool {
        self.scratch.is_some()
    }
}

/// Resolves `target` to a local directory, cloning remote repositories.
///
/// `config.branch` takes precedence over a branch embedded in a remote URL.
///
/// # Errors
/// - [`Error::PathNotFound`] / [`Error::NotADirectory`] for bad local paths.
/// - [`Error::Clone`] when cloning fails.
/// - [`Error::GitUnavailable`] for remote targets in builds without the `git` feature.
pub fn resolve_target(
    target: &RepositoryTarget,
    config: &Config,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<ResolvedRepository> {
    match target {
        RepositoryTarget::Local { path } => Ok(ResolvedRepository {
            root: resolve_local_path(path)?,
            scratch: None,
        }),
        RepositoryTarget::Remote { clone_url, branch } => {
            let branch = config.branch.clone().or_else(|| branch.clone());
            clone_into_scratch(clone_url, branch, config.depth, progress)
        }
    }
}

/// Checks that `path` is an existing directory and returns its canonical form.
///
/// # Errors
/// Returns [`Error::PathNotFound`] if nothing exists at `path` and
/// [`Error::NotADirectory`] if it is a file.
pub fn resolve_local_path(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(Error::PathNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(Error::NotADirectory(path.to_path_buf()));
    }
    path.canonicalize().map_err(|e| io_error_with_path(e, path))
}

#[cfg(feature = "git")]
fn clone_into_scratch(
    clone_url: &str,
    branch: Option<String>,
    depth: Option<u32>,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<ResolvedRepository> {
    use crate::errors::GitError;
    use crate::git::{clone_repository, ParsedRepoUrl};

    let scratch = ScratchDir::new().map_err(GitError::TempDir)?;
    let repo = ParsedRepoUrl {
        clone_url: clone_url.to_string(),
        branch,
    };
    // On failure `scratch` is dropped here, removing the partial clone.
    clone_repository(&repo, scratch.path(), depth, progress)?;

    Ok(ResolvedRepository {
        root: scratch.path().to_path_buf(),
        scratch: Some(scratch),
    })
}

#[cfg(not(feature = "git"))]
fn clone_into_scratch(
    clone_url: &str,
    _branch: Option<String>,
    _depth: Option<u32>,
    _progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<ResolvedRepository> {
    Err(Error::GitUnavailable(clone_url.to_string()))
}
