//! Preview Actor - Rendering and Publishing
//!
//! Receives fresh render modes from the CompileActor (stale outcomes never
//! get this far), renders them through the deduplicating renderer, publishes
//! the artifact for HTTP request threads and notifies the WebSocket actor
//! when a document's preview actually changed.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::messages::{PreviewMsg, WsMsg};
use crate::core::DocId;
use crate::logger;
use crate::preview::{HarnessOptions, PreviewRenderer, RenderMode, cache};

/// Preview Actor - owns the renderer and its per-document state
pub struct PreviewActor {
    rx: mpsc::Receiver<PreviewMsg>,
    ws_tx: mpsc::Sender<WsMsg>,
    renderer: PreviewRenderer,
}

impl PreviewActor {
    pub fn new(
        rx: mpsc::Receiver<PreviewMsg>,
        ws_tx: mpsc::Sender<WsMsg>,
        options: HarnessOptions,
    ) -> Self {
        Self {
            rx,
            ws_tx,
            renderer: PreviewRenderer::new(options),
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                PreviewMsg::Render { doc, mode } => self.on_render(doc, mode).await,
                PreviewMsg::Removed { doc } => self.on_removed(doc).await,
                PreviewMsg::Shutdown => {
                    crate::debug!("preview"; "shutting down");
                    break;
                }
            }
        }
    }

    async fn on_render(&mut self, doc: DocId, mode: RenderMode) {
        let previous = cache::get(&doc);
        let artifact = self.renderer.render(&doc, &mode);

        // Unchanged payload reuses the same Arc; no reload, no log noise
        let changed = previous.is_none_or(|prev| !Arc::ptr_eq(&prev, &artifact));
        cache::publish(&doc, artifact);

        if !changed {
            logger::status_unchanged(&doc.to_string());
            return;
        }

        match &mode {
            RenderMode::CompilerError(msg) => {
                logger::status_error(&format!("compile failed: {doc}"), msg);
            }
            _ => logger::status_success(&format!("previewed: {doc} ({})", mode.label())),
        }

        let _ = self
            .ws_tx
            .send(WsMsg::Changed {
                doc,
                reason: mode.label().to_string(),
            })
            .await;
    }

    async fn on_removed(&mut self, doc: DocId) {
        self.renderer.forget(&doc);
        cache::remove(&doc);
        logger::status_unchanged(&format!("removed: {doc}"));
        let _ = self
            .ws_tx
            .send(WsMsg::Changed {
                doc,
                reason: "removed".to_string(),
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::RuntimeSource;
    use std::time::Duration;

    fn spawn_actor() -> (mpsc::Sender<PreviewMsg>, mpsc::Receiver<WsMsg>) {
        let (tx, rx) = mpsc::channel(32);
        let (ws_tx, ws_rx) = mpsc::channel(32);
        let actor = PreviewActor::new(
            rx,
            ws_tx,
            HarnessOptions {
                runtime: RuntimeSource::Cdn,
                reload_ws_port: Some(35729),
            },
        );
        tokio::spawn(actor.run());
        (tx, ws_rx)
    }

    async fn recv_timeout(rx: &mut mpsc::Receiver<WsMsg>, ms: u64) -> Option<WsMsg> {
        tokio::time::timeout(Duration::from_millis(ms), rx.recv())
            .await
            .ok()
            .flatten()
    }

    #[tokio::test]
    async fn test_render_publishes_and_notifies() {
        let (tx, mut ws_rx) = spawn_actor();
        let doc = DocId::from_route("preview-actor/pub").unwrap();

        tx.send(PreviewMsg::Render {
            doc: doc.clone(),
            mode: RenderMode::Compiled(r#"{"inkVersion":21}"#.to_string()),
        })
        .await
        .unwrap();

        match recv_timeout(&mut ws_rx, 1000).await.unwrap() {
            WsMsg::Changed { doc: d, reason } => {
                assert_eq!(d, doc);
                assert_eq!(reason, "compiled");
            }
            _ => panic!("expected Changed"),
        }
        assert!(cache::get(&doc).is_some());
        cache::remove(&doc);
    }

    #[tokio::test]
    async fn test_unchanged_render_sends_no_reload() {
        let (tx, mut ws_rx) = spawn_actor();
        let doc = DocId::from_route("preview-actor/dedup").unwrap();
        let mode = RenderMode::Compiled(r#"{"inkVersion":21}"#.to_string());

        for _ in 0..2 {
            tx.send(PreviewMsg::Render {
                doc: doc.clone(),
                mode: mode.clone(),
            })
            .await
            .unwrap();
        }

        assert!(recv_timeout(&mut ws_rx, 1000).await.is_some());
        // Second identical render: artifact reused, no second notification
        assert!(recv_timeout(&mut ws_rx, 200).await.is_none());
        cache::remove(&doc);
    }

    #[tokio::test]
    async fn test_removed_clears_cache_and_notifies() {
        let (tx, mut ws_rx) = spawn_actor();
        let doc = DocId::from_route("preview-actor/rm").unwrap();

        tx.send(PreviewMsg::Render {
            doc: doc.clone(),
            mode: RenderMode::Empty,
        })
        .await
        .unwrap();
        assert!(recv_timeout(&mut ws_rx, 1000).await.is_some());

        tx.send(PreviewMsg::Removed { doc: doc.clone() }).await.unwrap();
        match recv_timeout(&mut ws_rx, 1000).await.unwrap() {
            WsMsg::Changed { reason, .. } => assert_eq!(reason, "removed"),
            _ => panic!("expected Changed"),
        }
        assert!(cache::get(&doc).is_none());
    }
}
