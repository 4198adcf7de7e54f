//! Request/response contracts for the backend collaborators.
//!
//! The engine consumes these services (asset search, image generation,
//! upload/storage, listings, deletion) but never performs the network
//! interaction itself; it only shapes the requests and normalizes the
//! eventual results. Every reference a collaborator returns goes
//! through the path normalizer before it is rendered or compared.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::path::{self, NormalizedRef};
use crate::types::{AssetReference, CanonicalPath};

/// Asset search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub limit: u32,
}

/// Image generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// What the upload service echoes back for a stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub reference: AssetReference,
}

impl UploadReceipt {
    /// The canonical address of the uploaded asset, if the echo
    /// carried one.
    pub fn canonical(&self) -> Option<CanonicalPath> {
        match path::normalize_ref(&self.reference) {
            NormalizedRef::Missing => None,
            NormalizedRef::Resolved { path, .. } => Some(path),
        }
    }
}

/// One entry from a list-uploaded or list-previous-generated call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAsset {
    pub id: String,
    pub reference: AssetReference,
    #[serde(default)]
    pub extras: HashMap<String, String>,
}

/// A stored asset whose reference has been canonicalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedAsset {
    pub id: String,
    pub path: CanonicalPath,
    pub extras: HashMap<String, String>,
}

/// Outcome of a delete-by-id call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub success: bool,
    pub message: String,
}

/// Canonicalize a collaborator listing, dropping entries with no
/// usable reference.
pub fn canonicalize_listing(assets: Vec<StoredAsset>) -> Vec<ListedAsset> {
    assets
        .into_iter()
        .filter_map(|asset| match path::normalize_ref(&asset.reference) {
            NormalizedRef::Missing => {
                log::warn!("dropping listed asset {} with empty reference", asset.id);
                None
            }
            NormalizedRef::Resolved { path, .. } => Some(ListedAsset {
                id: asset.id,
                path,
                extras: asset.extras,
            }),
        })
        .collect()
}

/// Drop a deleted asset from a canonicalized listing by id.
pub fn apply_deletion(listing: &mut Vec<ListedAsset>, deleted_id: &str) {
    listing.retain(|asset| asset.id != deleted_id);
}
