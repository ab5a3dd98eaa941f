// src/config/mod.rs

//! Defines the `Config` struct consumed by the extraction pipeline.
//!
//! A `Config` is produced once per invocation, either from parsed command-line
//! arguments (`ConfigBuilder::from_cli`) or programmatically through the fluent
//! [`ConfigBuilder`] API. There is exactly one configuration shape; every option
//! has a default so callers only set what they need.

pub use builder::ConfigBuilder;
mod builder;

/// Strategy used to decide whether a file is binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BinaryDetection {
    /// A NUL byte within the first few kilobytes marks the file as binary.
    #[default]
    NullByte,
    /// Only valid UTF-8 (with or without BOM) counts as text.
    Inspect,
}

/// Represents the destination for the generated output.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum OutputDestination {
    /// Write to standard output.
    #[default]
    Stdout,
    /// Copy the output to the system clipboard (requires the `clipboard` feature).
    Clipboard,
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The repository as given by the user: a local path or a repository URL.
    pub input: String,
    /// Extra gitignore-style patterns applied on top of `.gitignore`.
    pub extra_ignore_patterns: Vec<String>,
    /// Branch to check out for remote inputs. Overrides a branch embedded in the URL.
    pub branch: Option<String>,
    /// History depth for shallow clones of remote inputs.
    pub depth: Option<u32>,
    /// How binary files are recognized.
    pub binary_detection: BinaryDetection,
    /// Where the finished digest goes.
    pub output_destination: OutputDestination,
}

impl Config {
    /// Returns `true` if the digest should be copied to the clipboard.
    pub fn copy_to_clipboard(&self) -> bool {
        self.output_destination == OutputDestination::Clipboard
    }
}
