//! Canonicalization of heterogeneous asset references.
//!
//! Service responses, upload echoes, and user input refer to assets as
//! absolute URLs, relative paths, or already-canonical paths. Every
//! reference passes through [`normalize`] before being rendered or
//! compared, yielding one addressable form: a scheme-free, host-free
//! path with a single leading `/`.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::types::{AssetReference, CanonicalPath};

/// Regex to detect an absolute-looking reference (RFC 3986 scheme
/// followed by a colon).
static SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());

/// Which branch produced a normalized reference.
///
/// Tagged so callers (and tests) can assert on the path taken instead
/// of inferring it from the output string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeOrigin {
    /// The input parsed as an absolute URL; scheme, host, query, and
    /// fragment were discarded.
    ParsedUrl,
    /// The input was a relative path and gained a leading `/`.
    RelativePath,
    /// The input was already in canonical form.
    AlreadyCanonical,
    /// The input looked absolute but could not be parsed; the raw
    /// string was kept as a best-effort path.
    FallbackUsed,
}

/// Result of normalizing one raw reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedRef {
    /// Empty input: no asset. Distinct from every valid path.
    Missing,
    /// A canonical path, tagged with the branch that produced it.
    Resolved {
        path: CanonicalPath,
        origin: NormalizeOrigin,
    },
}

impl NormalizedRef {
    /// The canonical path, if the input referred to an asset at all.
    pub fn path(&self) -> Option<&CanonicalPath> {
        match self {
            Self::Missing => None,
            Self::Resolved { path, .. } => Some(path),
        }
    }

    /// The branch that produced this result, if any.
    pub fn origin(&self) -> Option<NormalizeOrigin> {
        match self {
            Self::Missing => None,
            Self::Resolved { origin, .. } => Some(*origin),
        }
    }
}

/// Normalize a raw asset reference into its canonical form.
///
/// Never fails: a malformed absolute-looking string falls back to
/// being treated as a path (with a diagnostic logged), and empty input
/// maps to [`NormalizedRef::Missing`]. Idempotent: feeding a canonical
/// path back in returns it unchanged.
pub fn normalize(raw: &str) -> NormalizedRef {
    if raw.trim().is_empty() {
        return NormalizedRef::Missing;
    }

    if SCHEME_REGEX.is_match(raw) {
        match Url::parse(raw) {
            Ok(url) => {
                let path = ensure_leading_slash(url.path());
                return NormalizedRef::Resolved {
                    path: CanonicalPath::new(path),
                    origin: NormalizeOrigin::ParsedUrl,
                };
            }
            Err(e) => {
                log::warn!("invalid URL {:?}: {}; keeping raw string as path", raw, e);
                return NormalizedRef::Resolved {
                    path: CanonicalPath::new(ensure_leading_slash(raw)),
                    origin: NormalizeOrigin::FallbackUsed,
                };
            }
        }
    }

    if raw.starts_with('/') {
        NormalizedRef::Resolved {
            path: CanonicalPath::new(raw.to_string()),
            origin: NormalizeOrigin::AlreadyCanonical,
        }
    } else {
        NormalizedRef::Resolved {
            path: CanonicalPath::new(format!("/{}", raw)),
            origin: NormalizeOrigin::RelativePath,
        }
    }
}

/// Normalize a typed reference.
pub fn normalize_ref(reference: &AssetReference) -> NormalizedRef {
    normalize(&reference.raw)
}

/// Normalize a whole collaborator listing, dropping entries that carry
/// no asset.
pub fn normalize_all<'a, I>(raws: I) -> Vec<CanonicalPath>
where
    I: IntoIterator<Item = &'a AssetReference>,
{
    raws.into_iter()
        .filter_map(|r| match normalize_ref(r) {
            NormalizedRef::Missing => None,
            NormalizedRef::Resolved { path, .. } => Some(path),
        })
        .collect()
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(raw: &str) -> (String, NormalizeOrigin) {
        match normalize(raw) {
            NormalizedRef::Resolved { path, origin } => (path.as_str().to_string(), origin),
            NormalizedRef::Missing => panic!("expected a resolved path for {:?}", raw),
        }
    }

    #[test]
    fn test_absolute_url_keeps_only_path() {
        let (path, origin) = resolved("https://host/app_data/images/a.png?x=1");
        assert_eq!(path, "/app_data/images/a.png");
        assert_eq!(origin, NormalizeOrigin::ParsedUrl);
    }

    #[test]
    fn test_fragment_and_query_discarded() {
        let (path, _) = resolved("http://example.com/deck/cover.jpg?w=800#top");
        assert_eq!(path, "/deck/cover.jpg");
    }

    #[test]
    fn test_relative_path_gains_slash() {
        let (path, origin) = resolved("images/a.png");
        assert_eq!(path, "/images/a.png");
        assert_eq!(origin, NormalizeOrigin::RelativePath);
    }

    #[test]
    fn test_canonical_input_passes_through() {
        let (path, origin) = resolved("/app_data/images/a.png");
        assert_eq!(path, "/app_data/images/a.png");
        assert_eq!(origin, NormalizeOrigin::AlreadyCanonical);
    }

    #[test]
    fn test_empty_input_is_missing() {
        assert_eq!(normalize(""), NormalizedRef::Missing);
        assert_eq!(normalize("   "), NormalizedRef::Missing);
    }

    #[test]
    fn test_malformed_url_falls_back() {
        // Scheme present but nothing parseable behind it.
        let (path, origin) = resolved("http://");
        assert_eq!(origin, NormalizeOrigin::FallbackUsed);
        assert!(path.starts_with('/'));
    }

    #[test]
    fn test_idempotence() {
        let inputs = [
            "https://host/app_data/images/a.png?x=1",
            "images/a.png",
            "/images/a.png",
            "http://",
            "ftp://files.example.com/deck.pptx",
            "a.png",
        ];
        for input in inputs {
            let first = normalize(input);
            let path = first.path().unwrap().as_str().to_string();
            let second = normalize(&path);
            assert_eq!(
                second.path().unwrap().as_str(),
                path,
                "normalize not idempotent for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_leading_slash_invariant() {
        for input in ["x", "a/b/c.png", "https://h/p.png", "http://", "weird:thing"] {
            let norm = normalize(input);
            assert!(norm.path().unwrap().as_str().starts_with('/'));
        }
    }

    #[test]
    fn test_path_with_colon_is_not_a_scheme() {
        // Colon after a slash cannot start a scheme.
        let (path, origin) = resolved("assets/v1:final.png");
        assert_eq!(path, "/assets/v1:final.png");
        assert_eq!(origin, NormalizeOrigin::RelativePath);
    }

    #[test]
    fn test_normalize_all_skips_missing() {
        let refs = vec![
            AssetReference::new("images/a.png"),
            AssetReference::new(""),
            AssetReference::new("https://host/b.png"),
        ];
        let paths = normalize_all(&refs);
        let strings: Vec<&str> = paths.iter().map(|p| p.as_str()).collect();
        assert_eq!(strings, vec!["/images/a.png", "/b.png"]);
    }
}
