//! Document identity.
//!
//! A document is a single `.ink` file inside the story workspace. Its
//! identity is the workspace-relative path with the extension stripped and
//! forward slashes on every platform, so the same story addresses the same
//! preview route on macOS, Linux and Windows.

use std::fmt;
use std::path::{Path, PathBuf};

/// Stable identifier of a story document.
///
/// `chapters/one.ink` → `chapters/one`. Ordering and hashing follow the
/// underlying string, which makes `DocId` usable as a map key across the
/// actor system and the preview cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocId(String);

impl DocId {
    /// Build from a workspace-relative path. Returns `None` for anything
    /// that is not an `.ink` file.
    pub fn from_rel_path(rel: &Path) -> Option<Self> {
        if rel.extension().and_then(|e| e.to_str()) != Some("ink") {
            return None;
        }

        let stem = rel.with_extension("");
        let parts: Vec<_> = stem
            .components()
            .filter_map(|c| match c {
                std::path::Component::Normal(s) => s.to_str(),
                _ => None,
            })
            .collect();

        if parts.is_empty() {
            return None;
        }

        Some(Self(parts.join("/")))
    }

    /// Build from an already-normalized identifier (e.g. a URL route).
    ///
    /// Rejects empty ids and path traversal so a request cannot escape the
    /// workspace.
    pub fn from_route(route: &str) -> Option<Self> {
        let trimmed = route.trim_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        if trimmed
            .split('/')
            .any(|seg| seg.is_empty() || seg == "." || seg == "..")
        {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// The source file path of this document under `root`.
    pub fn source_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for seg in self.0.split('/') {
            path.push(seg);
        }
        path.set_extension("ink");
        path
    }

    /// Last path segment, used as a default export file stem.
    pub fn file_stem(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_id_from_rel_path() {
        let id = DocId::from_rel_path(Path::new("chapters/one.ink")).unwrap();
        assert_eq!(id.as_str(), "chapters/one");
        assert_eq!(id.file_stem(), "one");
    }

    #[test]
    fn test_doc_id_rejects_non_ink() {
        assert!(DocId::from_rel_path(Path::new("notes.txt")).is_none());
        assert!(DocId::from_rel_path(Path::new("story.json")).is_none());
    }

    #[test]
    fn test_doc_id_requires_exact_extension() {
        // Extension match is exact so the derived source path always
        // round-trips on case-sensitive filesystems
        assert!(DocId::from_rel_path(Path::new("Intro.INK")).is_none());
    }

    #[test]
    fn test_doc_id_source_path_roundtrip() {
        let id = DocId::from_rel_path(Path::new("chapters/one.ink")).unwrap();
        let path = id.source_path(Path::new("/stories"));
        assert_eq!(path, PathBuf::from("/stories/chapters/one.ink"));
    }

    #[test]
    fn test_doc_id_from_route() {
        let id = DocId::from_route("/chapters/one").unwrap();
        assert_eq!(id.as_str(), "chapters/one");
    }

    #[test]
    fn test_doc_id_from_route_rejects_traversal() {
        assert!(DocId::from_route("../etc/passwd").is_none());
        assert!(DocId::from_route("a//b").is_none());
        assert!(DocId::from_route("").is_none());
        assert!(DocId::from_route("/").is_none());
    }
}
