// src/git/url.rs

//! Classifies repository inputs and normalizes git/GitHub/GitLab URLs.

use crate::core_types::RepositoryTarget;
use crate::errors::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

/// A repository URL reduced to what the clone step needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRepoUrl {
    /// The URL to clone from. Always ends in exactly one `.git`.
    pub clone_url: String,
    /// The branch named in the URL, if any. `None` means the default branch.
    pub branch: Option<String>,
}

/// `git@host:owner/repo(.git)`
static SSH_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^git@([^:/\s]+):([^\s]+/[^\s/]+)$").unwrap());

/// Any scheme-qualified URL that already names a `.git` repository.
static DOT_GIT_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:https?|ssh|git|file)://[^\s]+\.git$").unwrap());

/// `https://github.com/owner/repo/tree/branch[/path...]`
static GITHUB_TREE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:www\.)?github\.com/([^/\s]+)/([^/\s]+)/tree/([^/\s]+)(?:/.*)?$")
        .unwrap()
});

/// `https://github.com/owner/repo`
static GITHUB_REPO_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:www\.)?github\.com/([^/\s]+)/([^/\s]+)$").unwrap()
});

/// `https://gitlab.com/group[/subgroup...]/repo/-/tree/branch[/path...]`
static GITLAB_TREE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:www\.)?gitlab\.com/([^\s]+?)/-/tree/([^/\s]+)(?:/.*)?$").unwrap()
});

/// `https://gitlab.com/group[/subgroup...]/repo`
static GITLAB_REPO_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?:www\.)?gitlab\.com/([^/\s]+(?:/[^/\s]+)+)$").unwrap()
});

/// Returns `true` if the input names a remote repository this crate can clone.
///
/// Inputs that match none of the recognized URL shapes are local paths.
///
/// # Examples
/// ```
/// use repodigest::git::is_repository_url;
///
/// assert!(is_repository_url("https://github.com/user/repo"));
/// assert!(is_repository_url("git@github.com:user/repo.git"));
/// assert!(is_repository_url("https://gitlab.com/group/repo/-/tree/dev"));
/// assert!(!is_repository_url("./src"));
/// assert!(!is_repository_url("/local/path/to/repo"));
/// ```
pub fn is_repository_url(input: &str) -> bool {
    parse_repo_url(input).is_some()
}

/// Normalizes a repository URL into a clone URL and optional branch.
///
/// # Errors
/// Returns [`Error::InvalidRepositoryUrl`] if the input is not a recognized URL shape.
///
/// # Examples
/// ```
/// use repodigest::git::{normalize, ParsedRepoUrl};
///
/// let parsed = normalize("https://github.com/rust-lang/cargo/tree/master/src").unwrap();
/// assert_eq!(parsed, ParsedRepoUrl {
///     clone_url: "https://github.com/rust-lang/cargo.git".to_string(),
///     branch: Some("master".to_string()),
/// });
///
/// let root = normalize("https://github.com/rust-lang/cargo/").unwrap();
/// assert_eq!(root.clone_url, "https://github.com/rust-lang/cargo.git");
/// assert_eq!(root.branch, None);
/// ```
pub fn normalize(input: &str) -> Result<ParsedRepoUrl> {
    parse_repo_url(input).ok_or_else(|| Error::InvalidRepositoryUrl(input.to_string()))
}

/// Classifies a raw input string as a local path or a remote repository.
///
/// Strings that carry a URL scheme (or the `git@` SSH prefix) but match no recognized
/// repository shape are rejected, since they cannot be local paths either.
///
/// # Errors
/// Returns [`Error::InvalidRepositoryUrl`] for URL-like inputs that cannot be normalized.
pub fn classify(input: &str) -> Result<RepositoryTarget> {
    if let Some(parsed) = parse_repo_url(input) {
        log::debug!("Input classified as remote repository: {:?}", parsed);
        return Ok(RepositoryTarget::Remote {
            clone_url: parsed.clone_url,
            branch: parsed.branch,
        });
    }
    if looks_like_url(input) {
        return Err(Error::InvalidRepositoryUrl(input.to_string()));
    }
    log::debug!("Input classified as local path: {}", input);
    Ok(RepositoryTarget::Local {
        path: PathBuf::from(input),
    })
}

fn looks_like_url(input: &str) -> bool {
    input.starts_with("git@") || input.contains("://")
}

fn parse_repo_url(input: &str) -> Option<ParsedRepoUrl> {
    let input = input.trim();
    let is_web = input.starts_with("http://") || input.starts_with("https://");
    let url = if is_web {
        // Browser URLs may carry a query string or fragment that has no meaning for cloning.
        input.split(['?', '#']).next().unwrap_or(input)
    } else {
        input
    };
    let url = url.trim_end_matches('/');

    if let Some(caps) = SSH_URL_RE.captures(url) {
        return Some(ParsedRepoUrl {
            clone_url: format!("git@{}:{}", &caps[1], with_git_suffix(&caps[2])),
            branch: None,
        });
    }

    if let Some(caps) = GITHUB_TREE_URL_RE.captures(url) {
        return Some(ParsedRepoUrl {
            clone_url: format!(
                "https://github.com/{}/{}",
                &caps[1],
                with_git_suffix(&caps[2])
            ),
            branch: Some(caps[3].to_string()),
        });
    }

    if let Some(caps) = GITLAB_TREE_URL_RE.captures(url) {
        let project = &caps[1];
        if has_gitlab_separator(project) {
            return None;
        }
        return Some(ParsedRepoUrl {
            clone_url: format!("https://gitlab.com/{}", with_git_suffix(project)),
            branch: Some(caps[2].to_string()),
        });
    }

    if let Some(caps) = GITHUB_REPO_URL_RE.captures(url) {
        return Some(ParsedRepoUrl {
            clone_url: format!(
                "https://github.com/{}/{}",
                &caps[1],
                with_git_suffix(&caps[2])
            ),
            branch: None,
        });
    }

    if let Some(caps) = GITLAB_REPO_URL_RE.captures(url) {
        let project = &caps[1];
        // `/-/blob/...`, `/-/issues/...` and friends point inside a project, not at it.
        if has_gitlab_separator(project) {
            return None;
        }
        return Some(ParsedRepoUrl {
            clone_url: format!("https://gitlab.com/{}", with_git_suffix(project)),
            branch: None,
        });
    }

    if DOT_GIT_URL_RE.is_match(url) {
        return Some(ParsedRepoUrl {
            clone_url: with_git_suffix(url),
            branch: None,
        });
    }

    None
}

fn has_gitlab_separator(project: &str) -> bool {
    project.split('/').any(|segment| segment == "-")
}

/// Strips any number of trailing `.git` suffixes and appends exactly one.
fn with_git_suffix(path: &str) -> String {
    let mut base = path.trim_end_matches('/');
    while let Some(stripped) = base.strip_suffix(".git") {
        base = stripped;
    }
    format!("{}.git", base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(clone_url: &str, branch: Option<&str>) -> ParsedRepoUrl {
        ParsedRepoUrl {
            clone_url: clone_url.to_string(),
            branch: branch.map(str::to_string),
        }
    }

    #[test]
    fn test_github_tree_url_extracts_branch() {
        assert_eq!(
            normalize("https://github.com/BurntSushi/ripgrep/tree/master").unwrap(),
            parsed("https://github.com/BurntSushi/ripgrep.git", Some("master"))
        );
    }

    #[test]
    fn test_github_tree_url_discards_subdirectory() {
        assert_eq!(
            normalize("https://github.com/BurntSushi/ripgrep/tree/master/crates/ignore/").unwrap(),
            parsed("https://github.com/BurntSushi/ripgrep.git", Some("master"))
        );
    }

    #[test]
    fn test_github_root_url_has_no_branch() {
        assert_eq!(
            normalize("https://github.com/rust-lang/rust").unwrap(),
            parsed("https://github.com/rust-lang/rust.git", None)
        );
        assert_eq!(
            normalize("https://github.com/rust-lang/rust/").unwrap(),
            parsed("https://github.com/rust-lang/rust.git", None)
        );
        assert_eq!(
            normalize("https://www.github.com/rust-lang/rust.git").unwrap(),
            parsed("https://github.com/rust-lang/rust.git", None)
        );
    }

    #[test]
    fn test_github_url_with_query_and_fragment() {
        assert_eq!(
            normalize("https://github.com/user/repo/tree/dev?tab=readme#top").unwrap(),
            parsed("https://github.com/user/repo.git", Some("dev"))
        );
    }

    #[test]
    fn test_gitlab_tree_url_extracts_branch() {
        assert_eq!(
            normalize("https://gitlab.com/gitlab-org/gitlab-runner/-/tree/main").unwrap(),
            parsed("https://gitlab.com/gitlab-org/gitlab-runner.git", Some("main"))
        );
    }

    #[test]
    fn test_gitlab_subgroup_urls() {
        assert_eq!(
            normalize("https://gitlab.com/group/subgroup/project").unwrap(),
            parsed("https://gitlab.com/group/subgroup/project.git", None)
        );
        assert_eq!(
            normalize("https://gitlab.com/group/subgroup/project/-/tree/v1.2/docs").unwrap(),
            parsed("https://gitlab.com/group/subgroup/project.git", Some("v1.2"))
        );
    }

    #[test]
    fn test_gitlab_rejects_non_tree_project_paths() {
        assert!(!is_repository_url(
            "https://gitlab.com/group/project/-/blob/main/README.md"
        ));
        assert!(!is_repository_url("https://gitlab.com/group/project/-/issues"));
    }

    #[test]
    fn test_ssh_url() {
        assert_eq!(
            normalize("git@github.com:rust-lang/cargo.git").unwrap(),
            parsed("git@github.com:rust-lang/cargo.git", None)
        );
        assert_eq!(
            normalize("git@gitlab.com:group/sub/project").unwrap(),
            parsed("git@gitlab.com:group/sub/project.git", None)
        );
    }

    #[test]
    fn test_generic_dot_git_url() {
        assert_eq!(
            normalize("https://git.example.com/team/tool.git/").unwrap(),
            parsed("https://git.example.com/team/tool.git", None)
        );
        assert_eq!(
            normalize("file:///srv/git/project.git").unwrap(),
            parsed("file:///srv/git/project.git", None)
        );
    }

    #[test]
    fn test_double_git_suffix_collapses() {
        assert_eq!(with_git_suffix("owner/repo.git.git"), "owner/repo.git");
        assert_eq!(with_git_suffix("owner/repo"), "owner/repo.git");
    }

    #[test]
    fn test_local_paths_are_not_urls() {
        for path in [".", "..", "src", "./my-repo", "/home/user/repo", "C:\\code\\repo", "repo.git"] {
            assert!(!is_repository_url(path), "{} should be a local path", path);
        }
    }

    #[test]
    fn test_unrecognized_web_urls() {
        assert!(!is_repository_url("https://example.com/some/page"));
        assert!(!is_repository_url("https://github.com/just-a-user"));
        assert!(normalize("https://example.com/some/page").is_err());
    }

    #[test]
    fn test_classify_local_and_remote() {
        assert_eq!(
            classify("some/dir").unwrap(),
            RepositoryTarget::Local {
                path: PathBuf::from("some/dir")
            }
        );
        assert_eq!(
            classify("https://github.com/user/repo/tree/feature").unwrap(),
            RepositoryTarget::Remote {
                clone_url: "https://github.com/user/repo.git".to_string(),
                branch: Some("feature".to_string()),
            }
        );
    }

    #[test]
    fn test_classify_rejects_unrecognized_url() {
        let result = classify("https://example.com/not/a/repo");
        assert!(matches!(result, Err(Error::InvalidRepositoryUrl(_))));
    }
}
