// src/filtering/ignore_rules.rs

use crate::errors::{Error, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Name of the version-control metadata directory that is always excluded.
pub const VCS_METADATA_DIR: &str = ".git";

/// A compiled, immutable ignore predicate for one repository root.
///
/// The filter is the union of independent pattern sources, in order:
/// 1. the version-control metadata directory at the root,
/// 2. the root `.gitignore`, if present,
/// 3. caller-supplied extra patterns.
///
/// Each source follows gitignore semantics on its own (negation, directory-only
/// patterns, anchoring), but sources never override one another: a path excluded by
/// any source is excluded. A `!.git` line in `.gitignore` therefore cannot re-include
/// the metadata directory.
///
/// All paths passed to [`IgnoreFilter::is_ignored`] are relative to the root the
/// filter was built for.
///
/// # Examples
/// ```
/// use repodigest::filtering::IgnoreFilter;
/// use std::path::Path;
/// # fn main() -> repodigest::errors::Result<()> {
/// let temp = tempfile::tempdir().unwrap();
/// std::fs::write(temp.path().join(".gitignore"), "*.log\n").unwrap();
///
/// let filter = IgnoreFilter::build(temp.path(), &["dist/".to_string()])?;
/// assert!(filter.is_ignored(Path::new(".git"), true));
/// assert!(filter.is_ignored(Path::new("logs/app.log"), false));
/// assert!(filter.is_ignored(Path::new("dist"), true));
/// assert!(!filter.is_ignored(Path::new("src/main.rs"), false));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct IgnoreFilter {
    root: PathBuf,
    sources: Vec<Gitignore>,
}

impl IgnoreFilter {
    /// Builds the filter for `root`, reading `root/.gitignore` if it exists.
    ///
    /// # Errors
    /// Returns [`Error::IgnorePattern`] if one of `extra_patterns` is not a valid glob.
    /// A missing or unreadable `.gitignore` is not an error.
    pub fn build(root: &Path, extra_patterns: &[String]) -> Result<Self> {
        let mut sources = Vec::with_capacity(3);

        let mut vcs = GitignoreBuilder::new(root);
        vcs.add_line(None, &format!("/{}", VCS_METADATA_DIR))
            .map_err(|e| pattern_error(VCS_METADATA_DIR, e))?;
        sources.push(vcs.build().map_err(|e| pattern_error(VCS_METADATA_DIR, e))?);

        let gitignore_path = root.join(".gitignore");
        if gitignore_path.is_file() {
            let mut builder = GitignoreBuilder::new(root);
            if let Some(e) = builder.add(&gitignore_path) {
                // Partial errors still leave the valid lines in the builder.
                warn!(
                    "Problem reading '{}', some rules may be skipped: {}",
                    gitignore_path.display(),
                    e
                );
            }
            match builder.build() {
                Ok(gitignore) => {
                    debug!(
                        "Loaded {} rules from '{}'",
                        gitignore.num_ignores() + gitignore.num_whitelists(),
                        gitignore_path.display()
                    );
                    sources.push(gitignore);
                }
                Err(e) => warn!(
                    "Ignoring unusable '{}': {}",
                    gitignore_path.display(),
                    e
                ),
            }
        } else {
            debug!("No .gitignore found at '{}'", root.display());
        }

        if !extra_patterns.is_empty() {
            let mut builder = GitignoreBuilder::new(root);
            for pattern in extra_patterns {
                builder
                    .add_line(None, pattern)
                    .map_err(|e| pattern_error(pattern, e))?;
                debug!("Added extra ignore pattern: {}", pattern);
            }
            sources.push(builder.build().map_err(|e| Error::IgnorePattern {
                pattern: extra_patterns.join(", "),
                reason: e.to_string(),
            })?);
        }

        Ok(Self {
            root: root.to_path_buf(),
            sources,
        })
    }

    /// Returns `true` if the root-relative `path` is excluded by any source.
    ///
    /// A path inside an excluded directory is itself excluded. The empty path (the
    /// root itself) is never excluded.
    pub fn is_ignored(&self, relative_path: &Path, is_dir: bool) -> bool {
        if relative_path.as_os_str().is_empty() || relative_path.has_root() {
            return false;
        }
        // The matcher strips its root as a text prefix; a bare `ab/x` under root `a`
        // would be matched as `b/x`.
        let candidate = self.root.join(relative_path);
        self.sources.iter().any(|source| {
            source
                .matched_path_or_any_parents(&candidate, is_dir)
                .is_ignore()
        })
    }
}

fn pattern_error(pattern: &str, err: ignore::Error) -> Error {
    Error::IgnorePattern {
        pattern: pattern.to_string(),
        reason: err.to_string(),
    }
}
