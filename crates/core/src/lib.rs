//! Asset reference canonicalization, placement mapping, reorder
//! interaction, and attachment admission for slide editing surfaces.

pub mod attachments;
pub mod collaborators;
pub mod error;
pub mod path;
pub mod placement;
pub mod reorder;
pub mod session;
pub mod types;

pub use attachments::{admit, precheck_direct_upload, Admission};
pub use error::{Error, RejectReason, Result};
pub use path::{normalize, NormalizeOrigin, NormalizedRef};
pub use placement::{FocusUpdate, PlacementCommit, PlacementMapper};
pub use reorder::{GestureOutcome, ReorderController, CLICK_QUIESCENCE_MS};
pub use session::EditSession;
pub use types::{
    AssetReference, AttachmentFile, CanonicalPath, ContainerRect, FitMode, FocusPoint,
    OrderableItem, PlacementState,
};
