//! Actor Coordinator - Wires up the Live Preview Actor System
//!
//! The Coordinator is a thin orchestrator that:
//! - Creates communication channels
//! - Resolves the compiler once and hands it to the CompileActor
//! - Seeds the pipeline with the existing documents
//! - Runs the actors concurrently until shutdown
//!
//! With watching disabled the workspace actor is skipped entirely: the seed
//! pass still compiles every document once, previews just stop updating.

use std::sync::Arc;

use anyhow::Result;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::compile::CompileActor;
use super::messages::{CompileMsg, PreviewMsg, WsMsg};
use super::preview::PreviewActor;
use super::workspace::WorkspaceActor;
use super::ws::WsActor;
use crate::config::StudioConfig;
use crate::document::DocumentStore;
use crate::preview::{HarnessOptions, RuntimeSource, server};

const CHANNEL_BUFFER: usize = 32;

/// Coordinator - wires up and runs the actor system.
pub struct Coordinator {
    config: Arc<StudioConfig>,
    store: Arc<DocumentStore>,
    ws_port: Option<u16>,
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    pub fn new(config: Arc<StudioConfig>, store: Arc<DocumentStore>) -> Self {
        Self {
            config,
            store,
            ws_port: None,
            shutdown_rx: None,
        }
    }

    /// Set WebSocket base port (only meaningful with watching enabled).
    pub fn with_ws_port(mut self, port: u16) -> Self {
        self.ws_port = Some(port);
        self
    }

    /// Set shutdown signal receiver.
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system.
    pub async fn run(mut self) -> Result<()> {
        let watch = self.config.serve.watch;

        let (compile_tx, compile_rx) = mpsc::channel::<CompileMsg>(CHANNEL_BUFFER);
        let (preview_tx, preview_rx) = mpsc::channel::<PreviewMsg>(CHANNEL_BUFFER);
        let (ws_tx, ws_rx) = mpsc::channel::<WsMsg>(CHANNEL_BUFFER);

        let reload_ws_port = match self.ws_port.filter(|_| watch) {
            Some(port) => match server::start_ws_server(port, ws_tx.clone()) {
                Ok(actual_port) => {
                    crate::debug!("ws"; "reload socket on port {}", actual_port);
                    Some(actual_port)
                }
                Err(e) => {
                    crate::log!("actor"; "websocket server failed: {}", e);
                    None
                }
            },
            None => None,
        };

        // Watcher-First: attach before seeding so saves during the seed pass
        // are buffered, not lost
        let workspace = if watch {
            Some(
                WorkspaceActor::new(Arc::clone(&self.store), compile_tx.clone())
                    .map_err(|e| anyhow::anyhow!("watcher failed: {}", e))?,
            )
        } else {
            None
        };

        // One discovery per process; every preview compile reuses it
        let compiler_exe = crate::compiler::locate();
        if compiler_exe.is_none() {
            crate::log!("compile"; "inklecate not found - previews will show install instructions");
        }

        let compile_actor = CompileActor::new(
            compile_rx,
            compile_tx.clone(),
            preview_tx.clone(),
            compiler_exe,
            self.config.preview.debounce(),
            self.config
                .compiler
                .timeout_secs
                .map(std::time::Duration::from_secs),
        );

        let preview_actor = PreviewActor::new(
            preview_rx,
            ws_tx.clone(),
            HarnessOptions {
                runtime: RuntimeSource::from_config(&self.config),
                reload_ws_port,
            },
        );

        let ws_actor = WsActor::new(ws_rx);

        crate::debug!("actor"; "start");
        if let Some(workspace) = workspace {
            tokio::spawn(async move { workspace.run().await });
        }
        let compile_handle = tokio::spawn(async move { compile_actor.run().await });
        let preview_handle = tokio::spawn(async move { preview_actor.run().await });
        let ws_handle = tokio::spawn(async move { ws_actor.run().await });

        // Warm previews for everything already in the workspace. Runs after
        // the actors so a large workspace cannot back up the inbox.
        self.seed_documents(&compile_tx).await;

        match self.shutdown_rx.take() {
            Some(rx) => loop {
                if rx.try_recv().is_ok() {
                    crate::debug!("actor"; "shutdown signal received");
                    break;
                }
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            },
            None => {
                tokio::select! {
                    _ = compile_handle => {}
                    _ = preview_handle => {}
                }
            }
        }

        // Drain order mirrors the pipeline so in-flight work still lands
        let _ = compile_tx.send(CompileMsg::Shutdown).await;
        let _ = preview_tx.send(PreviewMsg::Shutdown).await;
        let _ = ws_tx.send(WsMsg::Shutdown).await;
        let _ = tokio::time::timeout(std::time::Duration::from_millis(500), ws_handle).await;

        crate::debug!("actor"; "stopped");
        Ok(())
    }

    /// Send every existing document through the pipeline once.
    async fn seed_documents(&self, compile_tx: &mpsc::Sender<CompileMsg>) {
        let docs = self.store.scan();
        if !docs.is_empty() {
            crate::log!("watch"; "{} document(s) in workspace", docs.len());
        }
        for doc in docs {
            match self.store.read(&doc) {
                Ok(text) => {
                    let _ = compile_tx.send(CompileMsg::TextChanged { doc, text }).await;
                }
                Err(e) => crate::debug!("watch"; "seed read failed for {}: {}", doc, e),
            }
        }
    }
}
