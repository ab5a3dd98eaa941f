// src/git/clone.rs
//! Clones remote repositories into a caller-owned directory using `git2`.

use super::url::ParsedRepoUrl;
use crate::errors::GitError;
use crate::progress::ProgressReporter;
use git2::{build::RepoBuilder, Cred, FetchOptions, RemoteCallbacks};
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;

/// Sets up remote callbacks for authentication and progress reporting.
fn create_remote_callbacks(
    progress: Option<Arc<dyn ProgressReporter>>,
) -> RemoteCallbacks<'static> {
    let mut callbacks = RemoteCallbacks::new();

    // Authentication: Try SSH agent first, then the default key path.
    callbacks.credentials(|_url, username_from_url, _allowed_types| {
        let username = username_from_url.unwrap_or("git");
        debug!("Attempting SSH authentication for user: {}", username);

        if let Ok(cred) = Cred::ssh_key_from_agent(username) {
            debug!("Authenticated via SSH agent");
            return Ok(cred);
        }

        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map(std::path::PathBuf::from)
            .unwrap_or_default();
        if let Ok(cred) = Cred::ssh_key(username, None, &home.join(".ssh").join("id_rsa"), None)
        {
            debug!("Authenticated via default SSH key path");
            return Ok(cred);
        }

        warn!("SSH authentication failed: No agent or default keys found.");
        Err(git2::Error::from_str(
            "Authentication failed: could not connect with SSH agent or default keys",
        ))
    });

    if let Some(p) = progress {
        callbacks.transfer_progress(move |stats| {
            if stats.received_objects() == stats.total_objects() {
                p.set_length(stats.total_deltas() as u64);
                p.set_position(stats.indexed_deltas() as u64);
                p.set_message("Resolving deltas...".to_string());
            } else if stats.total_objects() > 0 {
                p.set_length(stats.total_objects() as u64);
                p.set_position(stats.received_objects() as u64);
                p.set_message("Receiving objects...".to_string());
            }
            true
        });
    }

    callbacks
}

fn create_fetch_options(
    depth: Option<u32>,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> FetchOptions<'static> {
    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(create_remote_callbacks(progress));
    if let Some(depth) = depth {
        fetch_options.depth(depth as i32);
        debug!("Set shallow clone depth to: {}", depth);
    }
    fetch_options
}

/// Clones `repo.clone_url` into `dest`, checking out `repo.branch` when one is given.
///
/// `dest` must be an empty (or not yet existing) directory. The caller owns it and is
/// responsible for removing it afterwards.
///
/// # Errors
/// Returns [`GitError::BranchNotFound`] when the requested branch does not exist on the
/// remote, and [`GitError::CloneFailed`] for every other failure, carrying the
/// underlying git diagnostic.
pub fn clone_repository(
    repo: &ParsedRepoUrl,
    dest: &Path,
    depth: Option<u32>,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<(), GitError> {
    info!(
        "Cloning git repository from '{}'{} into '{}'...",
        repo.clone_url,
        repo.branch
            .as_deref()
            .map(|b| format!(" (branch '{}')", b))
            .unwrap_or_default(),
        dest.display()
    );

    let mut repo_builder = RepoBuilder::new();
    repo_builder.fetch_options(create_fetch_options(depth, progress.clone()));
    if let Some(branch) = &repo.branch {
        repo_builder.branch(branch);
    }

    let result = repo_builder.clone(&repo.clone_url, dest);

    if let Some(p) = &progress {
        p.finish();
    }

    match result {
        Ok(_) => {
            info!("Clone complete.");
            Ok(())
        }
        Err(e) => {
            debug!("git2 clone error: class={:?} code={:?}", e.class(), e.code());
            match &repo.branch {
                Some(branch)
                    if e.code() == git2::ErrorCode::NotFound
                        && e.class() == git2::ErrorClass::Reference =>
                {
                    Err(GitError::BranchNotFound {
                        branch: branch.clone(),
                        url: repo.clone_url.clone(),
                    })
                }
                _ => Err(GitError::CloneFailed {
                    url: repo.clone_url.clone(),
                    source: e.into(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    /// Creates a non-bare repository in a directory ending in `.git` so that its
    /// `file://` URL survives normalization unchanged.
    fn setup_origin() -> (TempDir, String) {
        let temp = tempdir().unwrap();
        let origin = temp.path().join("origin.git");
        let repo = git2::Repository::init(&origin).unwrap();
        fs::write(origin.join("README.md"), "# Origin").unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = git2::Signature::now("Test User", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .unwrap();

        let url = format!("file://{}", origin.to_str().unwrap().replace('\\', "/"));
        (temp, url)
    }

    #[test]
    fn test_clone_default_branch() {
        let (_origin, url) = setup_origin();
        let dest = tempdir().unwrap();
        let target = dest.path().join("checkout");
        let repo = ParsedRepoUrl {
            clone_url: url,
            branch: None,
        };

        clone_repository(&repo, &target, None, None).unwrap();
        assert_eq!(
            fs::read_to_string(target.join("README.md")).unwrap(),
            "# Origin"
        );
    }

    #[test]
    fn test_clone_missing_branch_fails() {
        let (_origin, url) = setup_origin();
        let dest = tempdir().unwrap();
        let repo = ParsedRepoUrl {
            clone_url: url,
            branch: Some("does-not-exist".to_string()),
        };

        let result = clone_repository(&repo, &dest.path().join("checkout"), None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_clone_nonexistent_remote_fails() {
        let dest = tempdir().unwrap();
        let repo = ParsedRepoUrl {
            clone_url: "file:///definitely/not/here/repo.git".to_string(),
            branch: None,
        };
        let result = clone_repository(&repo, &dest.path().join("checkout"), None, None);
        assert!(matches!(result, Err(GitError::CloneFailed { .. })));
    }
}
