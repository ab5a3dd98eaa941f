// src/output/writer.rs

//! Delivers the rendered digest to its destination (stdout or clipboard).

use crate::config::OutputDestination;
use crate::core_types::Digest;
use crate::errors::{io_error_with_path, ClipboardError, Result};
use std::io::Write;

/// Writes `digest` to the configured destination.
///
/// For [`OutputDestination::Stdout`] the text goes to `writer`. For
/// [`OutputDestination::Clipboard`] it is placed on the system clipboard and
/// `writer` is left untouched.
///
/// # Errors
/// Returns an error if writing fails or the clipboard is unavailable.
///
/// # Examples
/// ```
/// use repodigest::config::OutputDestination;
/// use repodigest::core_types::Digest;
/// use repodigest::output::write_digest;
///
/// let digest = Digest { tree: "└── a.txt\n".into(), content: "File: a.txt\nA\n".into() };
/// let mut buffer = Vec::new();
/// write_digest(&digest, &OutputDestination::Stdout, &mut buffer).unwrap();
/// assert!(String::from_utf8(buffer).unwrap().starts_with("Repository Tree Structure:\n"));
/// ```
pub fn write_digest(
    digest: &Digest,
    destination: &OutputDestination,
    writer: &mut dyn Write,
) -> Result<()> {
    let rendered = digest.to_string();
    match destination {
        OutputDestination::Stdout => {
            writer
                .write_all(rendered.as_bytes())
                .and_then(|_| writer.flush())
                .map_err(|e| io_error_with_path(e, "<stdout>"))?;
        }
        OutputDestination::Clipboard => {
            copy_to_clipboard(&rendered)?;
            log::info!("Copied {} bytes to the clipboard.", rendered.len());
        }
    }
    Ok(())
}

#[cfg(feature = "clipboard")]
fn copy_to_clipboard(content: &str) -> std::result::Result<(), ClipboardError> {
    use arboard::Clipboard;
    let mut clipboard =
        Clipboard::new().map_err(|e| ClipboardError::Initialization(e.to_string()))?;
    clipboard
        .set_text(content)
        .map_err(|e| ClipboardError::SetContent(e.to_string()))?;
    Ok(())
}

#[cfg(not(feature = "clipboard"))]
fn copy_to_clipboard(_content: &str) -> std::result::Result<(), ClipboardError> {
    Err(ClipboardError::Unavailable)
}
