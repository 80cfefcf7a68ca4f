//! Compile Actor - the coordination centerpiece
//!
//! Converts the stream of raw document edits into the minimal necessary
//! sequence of compiler invocations, and only ever delivers the freshest
//! outcome:
//!
//! - every edit bumps the document's generation and supersedes any pending
//!   work for it (debounce restart, not queuing)
//! - empty and already-compiled input is answered immediately, without a
//!   process
//! - script input waits out a quiet period, then runs one compiler process;
//!   at most one is in flight per document
//! - outcomes are re-validated against the generation map before rendering,
//!   so an old compile finishing late can never overwrite a newer preview
//!
//! Staleness is checked at three points: task-side after the debounce wait,
//! task-side after process exit, and actor-side on outcome receipt. The
//! actor-side check is authoritative; the task-side checks just avoid
//! pointless work.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rustc_hash::FxHashMap;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::messages::{CompileMsg, PreviewMsg};
use crate::compiler::{self, CompileError, SourceClass};
use crate::core::DocId;
use crate::preview::RenderMode;

/// Per-document coordination state.
struct DocState {
    /// Latest generation issued for this document. Shared with the
    /// in-flight pipeline task for cooperative staleness checks.
    latest: Arc<AtomicU64>,
    /// The document's single pipeline task (debounce wait + compile).
    task: Option<JoinHandle<()>>,
}

impl DocState {
    fn new() -> Self {
        Self {
            latest: Arc::new(AtomicU64::new(0)),
            task: None,
        }
    }
}

/// Compile Actor - debounce, single-flight and staleness control
pub struct CompileActor {
    rx: mpsc::Receiver<CompileMsg>,
    /// Loopback sender handed to pipeline tasks for outcome delivery
    self_tx: mpsc::Sender<CompileMsg>,
    preview_tx: mpsc::Sender<PreviewMsg>,
    /// Compiler executable resolved once at startup; `None` = tool missing
    compiler_exe: Option<PathBuf>,
    /// Quiet period between the last edit and a compile
    debounce: Duration,
    /// Optional bound on external compiler time
    timeout: Option<Duration>,
    docs: FxHashMap<DocId, DocState>,
}

impl CompileActor {
    pub fn new(
        rx: mpsc::Receiver<CompileMsg>,
        self_tx: mpsc::Sender<CompileMsg>,
        preview_tx: mpsc::Sender<PreviewMsg>,
        compiler_exe: Option<PathBuf>,
        debounce: Duration,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            rx,
            self_tx,
            preview_tx,
            compiler_exe,
            debounce,
            timeout,
            docs: FxHashMap::default(),
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                CompileMsg::TextChanged { doc, text } => self.on_text_changed(doc, text).await,
                CompileMsg::Removed { doc } => self.on_removed(doc).await,
                CompileMsg::Outcome {
                    doc,
                    generation,
                    outcome,
                } => self.on_outcome(doc, generation, outcome).await,
                CompileMsg::Shutdown => {
                    crate::debug!("compile"; "shutting down");
                    for state in self.docs.values_mut() {
                        if let Some(task) = state.task.take() {
                            task.abort();
                        }
                    }
                    break;
                }
            }
        }
    }

    /// Handle one edit: bump generation, supersede pending work, classify,
    /// and either answer immediately or schedule a debounced compile.
    async fn on_text_changed(&mut self, doc: DocId, text: String) {
        let state = self.docs.entry(doc.clone()).or_insert_with(DocState::new);
        let generation = state.latest.fetch_add(1, Ordering::SeqCst) + 1;

        // Supersede: the pending wait is abandoned, a running compiler
        // process is reclaimed (kill_on_drop). Never two processes per doc.
        if let Some(task) = state.task.take() {
            task.abort();
        }

        match compiler::classify_source(&text) {
            SourceClass::Empty => {
                crate::debug!("compile"; "{}: empty input, no compile", doc);
                self.deliver(doc, RenderMode::Empty).await;
            }
            SourceClass::Compiled => {
                crate::debug!("compile"; "{}: compiled JSON input, passthrough", doc);
                self.deliver(doc, RenderMode::PassthroughRaw(text)).await;
            }
            SourceClass::Script => {
                crate::debug!("compile"; "{}: scheduled (gen {})", doc, generation);
                state.task = Some(spawn_pipeline(PipelineJob {
                    doc,
                    text,
                    generation,
                    latest: Arc::clone(&state.latest),
                    exe: self.compiler_exe.clone(),
                    debounce: self.debounce,
                    timeout: self.timeout,
                    outcome_tx: self.self_tx.clone(),
                }));
            }
        }
    }

    /// Apply a finished pipeline task, unless a newer edit superseded it.
    async fn on_outcome(
        &mut self,
        doc: DocId,
        generation: u64,
        outcome: Result<String, CompileError>,
    ) {
        let Some(state) = self.docs.get_mut(&doc) else {
            // Document removed while its compile ran
            return;
        };

        if state.latest.load(Ordering::SeqCst) != generation {
            crate::debug!("compile"; "{}: stale outcome (gen {}), discarded", doc, generation);
            return;
        }
        state.task = None;

        let mode = match outcome {
            Ok(json) => RenderMode::Compiled(json),
            Err(e) => RenderMode::CompilerError(e.to_string()),
        };
        self.deliver(doc, mode).await;
    }

    async fn on_removed(&mut self, doc: DocId) {
        if let Some(mut state) = self.docs.remove(&doc)
            && let Some(task) = state.task.take()
        {
            task.abort();
        }
        let _ = self.preview_tx.send(PreviewMsg::Removed { doc }).await;
    }

    async fn deliver(&self, doc: DocId, mode: RenderMode) {
        let _ = self.preview_tx.send(PreviewMsg::Render { doc, mode }).await;
    }
}

/// Everything one pipeline task needs, captured at schedule time.
struct PipelineJob {
    doc: DocId,
    text: String,
    generation: u64,
    latest: Arc<AtomicU64>,
    exe: Option<PathBuf>,
    debounce: Duration,
    timeout: Option<Duration>,
    outcome_tx: mpsc::Sender<CompileMsg>,
}

/// Spawn the single pipeline task for a document generation:
/// quiet period, staleness check, compile, staleness check, deliver.
fn spawn_pipeline(job: PipelineJob) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(job.debounce).await;

        // End of quiet period: bail if a newer edit arrived while waiting
        if job.latest.load(Ordering::SeqCst) != job.generation {
            return;
        }

        let outcome = match &job.exe {
            Some(exe) => compiler::invoke(exe, &job.text, job.timeout).await,
            None => Err(CompileError::ToolMissing),
        };

        // After process exit: bail before touching shared state
        if job.latest.load(Ordering::SeqCst) != job.generation {
            return;
        }

        let _ = job
            .outcome_tx
            .send(CompileMsg::Outcome {
                doc: job.doc,
                generation: job.generation,
                outcome,
            })
            .await;
    })
}
