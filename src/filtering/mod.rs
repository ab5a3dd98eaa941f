// src/filtering/mod.rs

//! Decides which paths take part in a digest.
//!
//! [`IgnoreFilter`] answers "is this path excluded?" for both the tree and the
//! content pass. [`BinaryDetector`] implementations answer "is this file binary?"
//! for the content pass only.

mod binary;
mod ignore_rules;

pub use binary::{
    is_likely_text_from_buffer, BinaryDetector, ContentInspectorDetector, NullByteDetector,
    BINARY_SNIFF_LEN,
};
pub use ignore_rules::{IgnoreFilter, VCS_METADATA_DIR};

use crate::config::BinaryDetection;

/// Returns the detector implementing the configured strategy.
pub fn detector_for(strategy: BinaryDetection) -> Box<dyn BinaryDetector> {
    match strategy {
        BinaryDetection::NullByte => Box::new(NullByteDetector),
        BinaryDetection::Inspect => Box::new(ContentInspectorDetector),
    }
}
