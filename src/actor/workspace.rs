//! Workspace Actor
//!
//! Watches the story directory and feeds document edits to the CompileActor.
//! Implements the "Watcher-First" pattern: the watcher starts buffering
//! events immediately, so saves during the startup seed pass are not lost.
//!
//! No debouncing happens here. Raw saves are forwarded as they land and the
//! CompileActor's per-document quiet period absorbs the burst a single
//! editor save produces.

use std::path::Path;
use std::sync::Arc;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::messages::CompileMsg;
use crate::document::DocumentStore;

/// Workspace Actor - watches for document changes
pub struct WorkspaceActor {
    /// Channel to receive notify events (sync -> async bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    /// Channel to send messages to CompileActor
    compile_tx: mpsc::Sender<CompileMsg>,
    /// Workspace view for path→document mapping and reads
    store: Arc<DocumentStore>,
}

impl WorkspaceActor {
    /// Create a new WorkspaceActor with Watcher-First pattern
    pub fn new(
        store: Arc<DocumentStore>,
        compile_tx: mpsc::Sender<CompileMsg>,
    ) -> notify::Result<Self> {
        // Create sync channel for notify (it doesn't support async)
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        // Create and configure watcher IMMEDIATELY
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;
        watcher.watch(store.root(), RecursiveMode::Recursive)?;

        // Events are now buffering in notify_rx while the caller seeds

        Ok(Self {
            notify_rx,
            watcher,
            compile_tx,
            store,
        })
    }

    /// Run the actor event loop
    pub async fn run(self) {
        let notify_rx = self.notify_rx;
        let compile_tx = self.compile_tx;
        let store = self.store;
        // Watcher must outlive the loop or events stop coming
        let _watcher = self.watcher;

        let (async_tx, mut async_rx) = tokio::sync::mpsc::channel::<notify::Event>(64);

        // Spawn a thread to poll notify events and send to async channel
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        while let Some(event) = async_rx.recv().await {
            if forward_event(&event, &store, &compile_tx).await.is_err() {
                break; // CompileActor shut down
            }
        }
    }
}

/// Map one notify event onto compile messages
///
/// Returns `Err(())` if the CompileActor shut down
async fn forward_event(
    event: &notify::Event,
    store: &DocumentStore,
    compile_tx: &mpsc::Sender<CompileMsg>,
) -> Result<(), ()> {
    use notify::EventKind;

    let removal = match event.kind {
        EventKind::Create(_) => false,
        EventKind::Remove(_) => true,
        EventKind::Modify(modify) => {
            // Ignore metadata-only changes (mtime/atime/chmod noise)
            if matches!(modify, notify::event::ModifyKind::Metadata(_)) {
                return Ok(());
            }
            false
        }
        _ => return Ok(()),
    };

    for path in &event.paths {
        if is_temp_file(path) {
            continue;
        }
        let Some(doc) = store.doc_for_path(path) else {
            continue;
        };

        if removal && !store.exists(&doc) {
            crate::debug!("watch"; "removed: {}", doc);
            compile_tx
                .send(CompileMsg::Removed { doc })
                .await
                .map_err(|_| ())?;
            continue;
        }

        // Renames surface as a failing read on the old path
        match store.read(&doc) {
            Ok(text) => {
                crate::debug!("watch"; "changed: {}", doc);
                compile_tx
                    .send(CompileMsg::TextChanged { doc, text })
                    .await
                    .map_err(|_| ())?;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                compile_tx
                    .send(CompileMsg::Removed { doc })
                    .await
                    .map_err(|_| ())?;
            }
            Err(e) => crate::debug!("watch"; "read failed for {}: {}", doc, e),
        }
    }

    Ok(())
}

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_temp_file() {
        assert!(is_temp_file(Path::new("/w/story.ink.swp")));
        assert!(is_temp_file(Path::new("/w/story.ink~")));
        assert!(is_temp_file(Path::new("/w/.story.ink.tmp")));
        assert!(is_temp_file(Path::new("/w/#backup#.bak")));
        assert!(!is_temp_file(Path::new("/w/story.ink")));
        assert!(!is_temp_file(Path::new("/w/chapters/one.ink")));
    }
}
