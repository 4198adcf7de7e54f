//! Error types for the asset editing components.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations raised by the editing components.
///
/// Nothing here is fatal to the process; the worst outcome of any
/// component call is a no-op or a retained previous state.
#[derive(Error, Debug)]
pub enum Error {
    /// A persisted fit mode was not one of `cover`, `contain`, `fill`.
    #[error("Unknown fit mode: {0}")]
    UnknownFitMode(String),

    /// An item with this id is already present in the ordered sequence.
    #[error("Duplicate item id: {0}")]
    DuplicateItemId(String),

    /// A drop was reported for an item the controller does not hold.
    #[error("Unknown item id: {0}")]
    UnknownItem(String),

    /// A drop was reported without an active drag gesture.
    #[error("No drag gesture in progress")]
    NoActiveDrag,
}

/// User-facing reasons an attachment candidate or batch was refused.
///
/// These are surfaced to the caller as structured rejection data for
/// messaging; they never propagate as panics past the component
/// boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The batch contained a file outside the allowlist.
    #[error("Invalid file type: please upload only PDF, TXT, PPTX, or DOCX files")]
    UnsupportedType,

    /// The working set already holds a PDF.
    #[error("Multiple PDF files are not allowed: please select only one PDF file")]
    DuplicatePdf,

    /// The batch itself contained more than one PDF.
    #[error("Multiple PDF files are not allowed in a single selection")]
    MultiplePdfInBatch,

    /// A direct upload exceeded the size limit.
    #[error("File size should be less than 5MB")]
    SizeExceeded {
        size_bytes: u64,
        limit_bytes: u64,
    },

    /// A direct upload was not an image.
    #[error("Please upload an image file")]
    NotAnImage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_reasons_are_user_facing() {
        assert_eq!(
            RejectReason::SizeExceeded {
                size_bytes: 6 * 1024 * 1024,
                limit_bytes: 5 * 1024 * 1024,
            }
            .to_string(),
            "File size should be less than 5MB"
        );
        assert!(RejectReason::UnsupportedType
            .to_string()
            .contains("PDF, TXT, PPTX, or DOCX"));
    }
}
