//! Admission, deduplication, and constraint enforcement for the
//! client-side attachment working set.
//!
//! Every file-selection entry point (drag-drop and file picker alike)
//! passes its candidates through [`admit`] before they join the
//! working set. Rejections are structured data for user-facing
//! messaging, never panics.

use serde::{Deserialize, Serialize};

use crate::error::RejectReason;
use crate::types::AttachmentFile;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_TXT: &str = "text/plain";
pub const MIME_PPTX: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// The four admissible attachment types.
pub const ALLOWED_TYPES: [&str; 4] = [MIME_PDF, MIME_TXT, MIME_PPTX, MIME_DOCX];

/// Maximum size for a single-file direct upload.
pub const DIRECT_UPLOAD_LIMIT_BYTES: u64 = 5 * 1024 * 1024;

/// Result of admitting a candidate batch against the working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admission {
    /// Candidates cleared to join the working set, in input order.
    pub accepted: Vec<AttachmentFile>,
    /// Candidates refused, in input order.
    pub rejected: Vec<AttachmentFile>,
    /// Why anything was refused; `None` when nothing was.
    pub reason: Option<RejectReason>,
}

impl Admission {
    fn accept_all(accepted: Vec<AttachmentFile>) -> Self {
        Self {
            accepted,
            rejected: Vec::new(),
            reason: None,
        }
    }

    fn reject_all(rejected: Vec<AttachmentFile>, reason: RejectReason) -> Self {
        Self {
            accepted: Vec::new(),
            rejected,
            reason: Some(reason),
        }
    }
}

/// Validate a batch of candidate files against the current working set.
///
/// Constraint order:
/// 1. Type allowlist, all-or-nothing: one invalid type rejects the
///    whole batch (`UnsupportedType`).
/// 2. More than one PDF inside the batch rejects the whole batch
///    (`MultiplePdfInBatch`).
/// 3. If the working set already holds a PDF, PDF candidates are
///    individually rejected (`DuplicatePdf`); the rest may proceed.
/// 4. A candidate whose identity is already present (in the working
///    set or earlier in the batch) is silently skipped; re-selecting
///    the same file is a no-op, not a failure.
pub fn admit(candidates: Vec<AttachmentFile>, current: &[AttachmentFile]) -> Admission {
    if candidates
        .iter()
        .any(|c| !ALLOWED_TYPES.contains(&c.mime_type.as_str()))
    {
        return Admission::reject_all(candidates, RejectReason::UnsupportedType);
    }

    if candidates.iter().filter(|c| c.is_pdf()).count() > 1 {
        return Admission::reject_all(candidates, RejectReason::MultiplePdfInBatch);
    }

    let set_has_pdf = current.iter().any(AttachmentFile::is_pdf);
    let mut accepted: Vec<AttachmentFile> = Vec::new();
    let mut rejected: Vec<AttachmentFile> = Vec::new();
    let mut reason = None;

    for candidate in candidates {
        if set_has_pdf && candidate.is_pdf() {
            reason = Some(RejectReason::DuplicatePdf);
            rejected.push(candidate);
            continue;
        }
        let duplicate = current
            .iter()
            .chain(accepted.iter())
            .any(|f| f.identity == candidate.identity);
        if duplicate {
            log::debug!("skipping duplicate attachment {}", candidate.identity);
            continue;
        }
        accepted.push(candidate);
    }

    match reason {
        Some(reason) => Admission {
            accepted,
            rejected,
            reason: Some(reason),
        },
        None => Admission::accept_all(accepted),
    }
}

/// Remove the attachment with the given identity from the working set.
/// Unknown identities are a no-op, so removal is idempotent.
pub fn remove(current: &mut Vec<AttachmentFile>, identity: &str) {
    current.retain(|f| f.identity != identity);
}

/// Pre-check for the single-file direct-upload path (image assets).
///
/// Enforces the 5 MiB cap and the image MIME requirement
/// independently, each with its own user-facing reason.
pub fn precheck_direct_upload(
    size_bytes: u64,
    mime_type: &str,
) -> std::result::Result<(), RejectReason> {
    if size_bytes > DIRECT_UPLOAD_LIMIT_BYTES {
        return Err(RejectReason::SizeExceeded {
            size_bytes,
            limit_bytes: DIRECT_UPLOAD_LIMIT_BYTES,
        });
    }
    if !mime_type.starts_with("image/") {
        return Err(RejectReason::NotAnImage);
    }
    Ok(())
}
