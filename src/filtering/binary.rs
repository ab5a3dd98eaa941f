// src/filtering/binary.rs

use content_inspector::ContentType;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str;

/// Number of leading bytes inspected when classifying a file.
pub const BINARY_SNIFF_LEN: usize = 8000;

/// Decides whether a file should be treated as binary and left out of the content.
///
/// Implementations must not fail: a file that cannot be inspected is reported as
/// text, and the content reader deals with the I/O error itself.
pub trait BinaryDetector: fmt::Debug {
    /// Returns `true` if `path` looks like a binary file.
    fn is_binary(&self, path: &Path) -> bool;
}

/// Treats a file as binary if a NUL byte occurs in its first [`BINARY_SNIFF_LEN`] bytes.
///
/// # Examples
/// ```
/// use repodigest::filtering::{BinaryDetector, NullByteDetector};
/// # fn main() -> std::io::Result<()> {
/// let temp = tempfile::tempdir()?;
/// let text = temp.path().join("notes.txt");
/// let blob = temp.path().join("blob.bin");
/// std::fs::write(&text, "plain text")?;
/// std::fs::write(&blob, b"\x7fELF\0\0\x01")?;
///
/// assert!(!NullByteDetector.is_binary(&text));
/// assert!(NullByteDetector.is_binary(&blob));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NullByteDetector;

impl BinaryDetector for NullByteDetector {
    fn is_binary(&self, path: &Path) -> bool {
        match read_head(path) {
            Ok(head) => head.contains(&0),
            Err(e) => {
                log::debug!(
                    "Could not inspect '{}', treating as text: {}",
                    path.display(),
                    e
                );
                false
            }
        }
    }
}

/// A stricter detector built on `content_inspector`.
///
/// The head of the file counts as text only if it is detected as UTF-8 (with or
/// without BOM) and actually decodes as UTF-8. UTF-16 text and any other encoding
/// are reported as binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentInspectorDetector;

impl BinaryDetector for ContentInspectorDetector {
    fn is_binary(&self, path: &Path) -> bool {
        match read_head(path) {
            Ok(head) => !is_likely_text_from_buffer(&head),
            Err(e) => {
                log::debug!(
                    "Could not inspect '{}', treating as text: {}",
                    path.display(),
                    e
                );
                false
            }
        }
    }
}

/// Checks if a byte buffer is likely text-based.
///
/// # Examples
/// ```
/// use repodigest::filtering::is_likely_text_from_buffer;
///
/// assert!(is_likely_text_from_buffer(b"This is valid UTF-8 text."));
/// assert!(!is_likely_text_from_buffer(b"This contains a null byte \0."));
/// assert!(!is_likely_text_from_buffer(&[0x48, 0x65, 0x6c, 0x6c, 0x80, 0x6f]));
/// ```
pub fn is_likely_text_from_buffer(buffer: &[u8]) -> bool {
    match content_inspector::inspect(buffer) {
        ContentType::UTF_8_BOM => true,
        ContentType::UTF_8 => utf8_prefix_is_valid(buffer),
        _ => false,
    }
}

/// Validates UTF-8, tolerating a multi-byte sequence cut off by the sniff limit.
fn utf8_prefix_is_valid(buffer: &[u8]) -> bool {
    match str::from_utf8(buffer) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none() && buffer.len() >= BINARY_SNIFF_LEN,
    }
}

fn read_head(path: &Path) -> std::io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut head = Vec::with_capacity(BINARY_SNIFF_LEN);
    file.take(BINARY_SNIFF_LEN as u64).read_to_end(&mut head)?;
    Ok(head)
}
