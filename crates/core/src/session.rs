//! Session-scoped editing state.
//!
//! One [`EditSession`] per open editing surface: it owns the
//! attachment working set, the slide reorder controller, and one
//! placement mapper per edited asset instance. Sessions are explicit
//! handles rather than ambient globals, so parallel sessions stay
//! independent and tests construct them directly.

use std::collections::HashMap;

use crate::attachments::{self, Admission};
use crate::placement::PlacementMapper;
use crate::reorder::ReorderController;
use crate::types::{AttachmentFile, PlacementState};

/// All mutable state owned by one editing session.
///
/// Discarded when the session closes; `reset` clears the attachment
/// working set without tearing the session down.
#[derive(Debug, Default)]
pub struct EditSession {
    attachments: Vec<AttachmentFile>,
    reorder: ReorderController,
    placements: HashMap<String, PlacementMapper>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The attachment working set, in admission order.
    pub fn attachments(&self) -> &[AttachmentFile] {
        &self.attachments
    }

    /// Run a candidate batch through admission and absorb the accepted
    /// files into the working set.
    pub fn admit_attachments(&mut self, candidates: Vec<AttachmentFile>) -> Admission {
        let admission = attachments::admit(candidates, &self.attachments);
        self.attachments.extend(admission.accepted.iter().cloned());
        admission
    }

    /// Remove an attachment by identity; unknown identities no-op.
    pub fn remove_attachment(&mut self, identity: &str) {
        attachments::remove(&mut self.attachments, identity);
    }

    /// The slide reorder controller for this session.
    pub fn reorder(&mut self) -> &mut ReorderController {
        &mut self.reorder
    }

    /// The placement mapper for one asset instance, created with
    /// defaults on first access.
    pub fn placement(&mut self, asset_key: &str) -> &mut PlacementMapper {
        self.placements
            .entry(asset_key.to_string())
            .or_insert_with(PlacementMapper::new)
    }

    /// Seed an asset's placement from a persisted value, replacing any
    /// in-session state for that asset.
    pub fn seed_placement(&mut self, asset_key: impl Into<String>, state: PlacementState) {
        self.placements
            .insert(asset_key.into(), PlacementMapper::from_persisted(state));
    }

    /// Discard the attachment working set (session reset).
    pub fn reset_attachments(&mut self) {
        self.attachments.clear();
    }
}
