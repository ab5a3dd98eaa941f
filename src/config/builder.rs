// src/config/builder.rs

use super::{BinaryDetection, Config, OutputDestination};
use crate::cli::Cli;
use crate::errors::{Error, Result};
use ignore::gitignore::GitignoreBuilder;

/// A builder for creating a `Config` instance programmatically.
///
/// # Examples
///
/// ```
/// use repodigest::config::{BinaryDetection, ConfigBuilder, OutputDestination};
///
/// let config = ConfigBuilder::new()
///     .input_path("https://github.com/user/repo")
///     .ignore_pattern("*.lock")
///     .ignore_pattern("docs/")
///     .branch("develop")
///     .copy_to_clipboard(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.input, "https://github.com/user/repo");
/// assert_eq!(config.extra_ignore_patterns, vec!["*.lock", "docs/"]);
/// assert_eq!(config.branch.as_deref(), Some("develop"));
/// assert_eq!(config.binary_detection, BinaryDetection::NullByte);
/// assert_eq!(config.output_destination, OutputDestination::Clipboard);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ConfigBuilder {
    input: Option<String>,
    ignore_patterns: Vec<String>,
    branch: Option<String>,
    depth: Option<u32>,
    binary_detection: Option<BinaryDetection>,
    copy: Option<bool>,
}

impl ConfigBuilder {
    /// Creates a new `ConfigBuilder` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `ConfigBuilder` pre-populated from parsed command-line arguments.
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            input: Some(cli.repository),
            ignore_patterns: cli.ignore,
            branch: cli.branch,
            depth: cli.depth,
            binary_detection: Some(cli.binary_detection),
            copy: Some(cli.copy),
        }
    }

    /// Sets the repository to process: a local path or a repository URL. Defaults to `.`.
    pub fn input_path(mut self, path: impl Into<String>) -> Self {
        self.input = Some(path.into());
        self
    }

    /// Adds one extra gitignore-style pattern.
    pub fn ignore_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_patterns.push(pattern.into());
        self
    }

    /// Adds several extra gitignore-style patterns.
    pub fn ignore_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets the branch to check out for remote repositories.
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Requests a shallow clone with the given history depth.
    pub fn depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Selects the binary detection strategy.
    pub fn binary_detection(mut self, strategy: BinaryDetection) -> Self {
        self.binary_detection = Some(strategy);
        self
    }

    /// Sends the digest to the clipboard instead of stdout.
    pub fn copy_to_clipboard(mut self, copy: bool) -> Self {
        self.copy = Some(copy);
        self
    }

    /// Validates the settings and builds the `Config`.
    ///
    /// # Errors
    /// Returns [`Error::Config`] for an empty input or a zero clone depth, and
    /// [`Error::IgnorePattern`] for a pattern that is not a valid glob.
    pub fn build(self) -> Result<Config> {
        let input = self.input.unwrap_or_else(|| ".".to_string());
        if input.trim().is_empty() {
            return Err(Error::Config("repository path must not be empty".to_string()));
        }
        if self.depth == Some(0) {
            return Err(Error::Config("--depth must be 1 or greater".to_string()));
        }
        if let Some(branch) = &self.branch {
            if branch.trim().is_empty() {
                return Err(Error::Config("--branch must not be empty".to_string()));
            }
        }
        validate_patterns(&self.ignore_patterns)?;

        let config = Config {
            input,
            extra_ignore_patterns: self.ignore_patterns,
            branch: self.branch,
            depth: self.depth,
            binary_detection: self.binary_detection.unwrap_or_default(),
            output_destination: if self.copy.unwrap_or(false) {
                OutputDestination::Clipboard
            } else {
                OutputDestination::Stdout
            },
        };
        log::debug!("Built configuration: {:?}", config);
        Ok(config)
    }
}

/// Compiles each pattern once so bad globs fail before any I/O happens.
fn validate_patterns(patterns: &[String]) -> Result<()> {
    let mut builder = GitignoreBuilder::new("");
    for pattern in patterns {
        builder
            .add_line(None, pattern)
            .map_err(|e| Error::IgnorePattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            })?;
    }
    Ok(())
}
