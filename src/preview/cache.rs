//! Published preview artifacts.
//!
//! Written by the PreviewActor, read by HTTP request threads. The previous
//! artifact stays published while a newer compile is in flight; only fresh
//! outcomes overwrite an entry, so a browser never regresses to stale
//! content mid-request.

use std::sync::{Arc, LazyLock};

use dashmap::DashMap;

use crate::core::DocId;
use crate::preview::RenderedArtifact;

static PREVIEW_CACHE: LazyLock<DashMap<DocId, Arc<RenderedArtifact>>> =
    LazyLock::new(DashMap::new);

/// Publish the latest artifact for a document.
pub fn publish(doc: &DocId, artifact: Arc<RenderedArtifact>) {
    PREVIEW_CACHE.insert(doc.clone(), artifact);
}

/// Latest published artifact, if any compile has completed yet.
pub fn get(doc: &DocId) -> Option<Arc<RenderedArtifact>> {
    PREVIEW_CACHE.get(doc).map(|entry| Arc::clone(entry.value()))
}

/// Drop a removed document's artifact.
pub fn remove(doc: &DocId) {
    PREVIEW_CACHE.remove(doc);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(html: &str) -> Arc<RenderedArtifact> {
        Arc::new(RenderedArtifact {
            html: html.to_string(),
        })
    }

    #[test]
    fn test_publish_and_get() {
        let doc = DocId::from_route("cache-test/publish").unwrap();
        assert!(get(&doc).is_none());

        publish(&doc, artifact("<html>one</html>"));
        assert_eq!(get(&doc).unwrap().html, "<html>one</html>");

        publish(&doc, artifact("<html>two</html>"));
        assert_eq!(get(&doc).unwrap().html, "<html>two</html>");

        remove(&doc);
        assert!(get(&doc).is_none());
    }
}
