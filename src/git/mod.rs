// src/git/mod.rs
//! Recognizes repository URLs and clones remote repositories.
//!
//! This module provides functionality to:
//! - Decide whether an input string is a repository URL or a local path.
//! - Normalize GitHub/GitLab web URLs into a clone URL plus optional branch.
//! - Clone a remote repository into a scratch directory using `git2`.

#[cfg(feature = "git")]
mod clone;
mod url;

#[cfg(feature = "git")]
pub use clone::clone_repository;
pub use url::{classify, is_repository_url, normalize, ParsedRepoUrl};
