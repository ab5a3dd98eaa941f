// src/cli.rs

use crate::config::BinaryDetection;
use clap::Parser;

/// Turn a repository into a single text digest for LLM prompts.
///
/// repodigest prints a directory tree of the repository followed by the contents
/// of every text file, skipping the .git directory, anything matched by the root
/// .gitignore, anything matched by --ignore, and binary files. The repository can
/// be a local path or a git URL (including GitHub/GitLab web URLs such as
/// https://github.com/owner/repo/tree/branch).
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Local path or repository URL to process.
    #[arg(default_value = ".")]
    pub repository: String,

    /// Copy the digest to the clipboard instead of printing it.
    #[arg(short = 'c', long, action = clap::ArgAction::SetTrue)]
    pub copy: bool,

    /// Additional gitignore-style pattern to exclude (repeatable).
    #[arg(short = 'i', long = "ignore", value_name = "GLOB")]
    pub ignore: Vec<String>,

    /// For repository URLs, check out this branch (overrides a branch in the URL).
    #[arg(short = 'b', long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// For repository URLs, perform a shallow clone with this history depth.
    #[arg(long, value_name = "DEPTH")]
    pub depth: Option<u32>,

    /// How to recognize binary files that are left out of the content section.
    #[arg(long, value_enum, value_name = "STRATEGY", default_value_t = BinaryDetection::NullByte)]
    pub binary_detection: BinaryDetection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["repodigest"]);
        assert_eq!(cli.repository, ".");
        assert!(!cli.copy);
        assert!(cli.ignore.is_empty());
        assert_eq!(cli.binary_detection, BinaryDetection::NullByte);
    }

    #[test]
    fn test_ignore_takes_one_value_per_flag() {
        let cli = Cli::parse_from(["repodigest", "--ignore", "*.md", "repo"]);
        assert_eq!(cli.repository, "repo");
        assert_eq!(cli.ignore, vec!["*.md"]);
    }

    #[test]
    fn test_unknown_detection_strategy_rejected() {
        let result = Cli::try_parse_from(["repodigest", "--binary-detection", "magic"]);
        assert!(result.is_err());
    }
}
