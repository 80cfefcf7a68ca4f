//! Document collaborator boundary.
//!
//! The story workspace is a directory of `.ink` files; this module is the
//! narrow contract the pipeline needs from it: list documents and read
//! their content. Persistence, rename and delete belong to the editor (or
//! the filesystem) - never to the compile pipeline.

use std::io;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use crate::core::DocId;

/// Read-only view over the story workspace.
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect all documents in the workspace, sorted by id.
    pub fn scan(&self) -> Vec<DocId> {
        let mut docs: Vec<DocId> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let path = e.path();
                let rel = path.strip_prefix(&self.root).ok()?;
                if is_hidden(rel) {
                    return None;
                }
                DocId::from_rel_path(rel)
            })
            .collect();
        docs.sort();
        docs
    }

    /// Document id for an absolute path inside the workspace, if it is one.
    pub fn doc_for_path(&self, path: &Path) -> Option<DocId> {
        let rel = path.strip_prefix(&self.root).ok()?;
        if is_hidden(rel) {
            return None;
        }
        DocId::from_rel_path(rel)
    }

    /// Read a document's current content.
    pub fn read(&self, doc: &DocId) -> io::Result<String> {
        std::fs::read_to_string(doc.source_path(&self.root))
    }

    pub fn exists(&self, doc: &DocId) -> bool {
        doc.source_path(&self.root).is_file()
    }
}

/// Any dot-prefixed component hides a file from the workspace
/// (editor state dirs, `.git`, etc.)
fn is_hidden(rel: &Path) -> bool {
    rel.components().any(|c| {
        c.as_os_str()
            .to_str()
            .is_some_and(|s| s.starts_with('.'))
    })
}
