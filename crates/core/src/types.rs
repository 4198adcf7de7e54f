//! Domain types shared by the asset editing components.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A raw asset reference exactly as received from any source:
/// user paste, a service response, or an upload echo.
///
/// No guarantees are made about its shape until it has passed through
/// [`crate::path::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetReference {
    /// The reference string, opaque as received.
    pub raw: String,
}

impl AssetReference {
    /// Create a reference from any raw string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}

impl From<&str> for AssetReference {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// A normalized asset address: scheme-free, host-free, always prefixed
/// with a single `/`. Equality is string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalPath(String);

impl CanonicalPath {
    /// Wrap an already-canonical string. Callers outside the
    /// normalizer should go through [`crate::path::normalize`].
    pub(crate) fn new(path: String) -> Self {
        debug_assert!(path.starts_with('/'));
        Self(path)
    }

    /// The canonical path string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A percentage-based coordinate identifying the visually anchored
/// region of an image under non-uniform scaling. Both axes are held in
/// `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusPoint {
    pub x: f64,
    pub y: f64,
}

impl FocusPoint {
    /// The centered default.
    pub const CENTER: FocusPoint = FocusPoint { x: 50.0, y: 50.0 };
}

impl Default for FocusPoint {
    fn default() -> Self {
        Self::CENTER
    }
}

/// Scaling policy applied when rendering an asset into a fixed-aspect
/// container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    Cover,
    Contain,
    Fill,
}

impl Default for FitMode {
    fn default() -> Self {
        Self::Cover
    }
}

impl fmt::Display for FitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
            Self::Fill => "fill",
        };
        f.write_str(s)
    }
}

impl FromStr for FitMode {
    type Err = Error;

    /// Parse a persisted fit mode. Anything outside the three known
    /// modes is a contract violation, never silently coerced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cover" => Ok(Self::Cover),
            "contain" => Ok(Self::Contain),
            "fill" => Ok(Self::Fill),
            other => Err(Error::UnknownFitMode(other.to_string())),
        }
    }
}

/// Focus point and fit mode for one rendered asset instance.
///
/// Created with defaults unless seeded from a previously persisted
/// value; mutated only through [`crate::placement::PlacementMapper`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlacementState {
    pub focus: FocusPoint,
    pub fit: FitMode,
}

/// The bounding rectangle of the container an asset is rendered into,
/// in the same coordinate space as pointer events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    /// True when the rect can safely be used as a divisor: finite
    /// position and strictly positive, finite extent.
    pub fn is_usable(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// An item in a reorderable sequence.
///
/// `id` is unique and stable across reorders; `position` is its 0-based
/// index, contiguous across the whole sequence at all times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderableItem {
    pub id: String,
    pub position: usize,
}

impl OrderableItem {
    pub fn new(id: impl Into<String>, position: usize) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

/// A file held in the client-side attachment working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentFile {
    /// Duplicate-suppression key derived from the file metadata.
    /// Not a content hash; two files with the same
    /// `(name, last modified, size)` triple collide by design.
    pub identity: String,
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

impl AttachmentFile {
    /// Build an attachment from selection metadata, deriving its
    /// identity from the `(name, last_modified_ms, size_bytes)` triple.
    /// An empty name falls back to `unnamed`.
    pub fn new(
        name: impl Into<String>,
        last_modified_ms: u64,
        size_bytes: u64,
        mime_type: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let name = if name.is_empty() {
            "unnamed".to_string()
        } else {
            name
        };
        let identity = format!("{}-{}-{}", name, last_modified_ms, size_bytes);
        Self {
            identity,
            name,
            size_bytes,
            mime_type: mime_type.into(),
        }
    }

    /// True when the file is a PDF.
    pub fn is_pdf(&self) -> bool {
        self.mime_type == crate::attachments::MIME_PDF
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_mode_round_trip() {
        for mode in [FitMode::Cover, FitMode::Contain, FitMode::Fill] {
            let parsed: FitMode = mode.to_string().parse().unwrap();
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn test_fit_mode_rejects_unknown() {
        let err = "stretch".parse::<FitMode>().unwrap_err();
        assert!(matches!(err, Error::UnknownFitMode(ref m) if m == "stretch"));
    }

    #[test]
    fn test_placement_state_defaults() {
        let state = PlacementState::default();
        assert_eq!(state.focus, FocusPoint { x: 50.0, y: 50.0 });
        assert_eq!(state.fit, FitMode::Cover);
    }

    #[test]
    fn test_container_rect_usability() {
        let ok = ContainerRect {
            left: 0.0,
            top: 0.0,
            width: 640.0,
            height: 480.0,
        };
        assert!(ok.is_usable());

        let zero = ContainerRect { width: 0.0, ..ok };
        assert!(!zero.is_usable());

        let nan = ContainerRect {
            height: f64::NAN,
            ..ok
        };
        assert!(!nan.is_usable());

        let negative = ContainerRect { width: -10.0, ..ok };
        assert!(!negative.is_usable());
    }

    #[test]
    fn test_attachment_identity_from_triple() {
        let file = AttachmentFile::new("notes.txt", 1700000000000, 2048, "text/plain");
        assert_eq!(file.identity, "notes.txt-1700000000000-2048");
    }

    #[test]
    fn test_attachment_identity_unnamed_fallback() {
        let file = AttachmentFile::new("", 0, 0, "text/plain");
        assert_eq!(file.identity, "unnamed-0-0");
        assert_eq!(file.name, "unnamed");
    }

    #[test]
    fn test_identical_triples_collide() {
        let a = AttachmentFile::new("report.pdf", 1000, 500, "application/pdf");
        let b = AttachmentFile::new("report.pdf", 1000, 500, "application/pdf");
        assert_eq!(a.identity, b.identity);
    }
}
