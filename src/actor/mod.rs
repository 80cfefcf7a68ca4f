//! Actor System for Live Preview
//!
//! Message-passing concurrency for the compile-and-preview pipeline:
//!
//! ```text
//! WorkspaceActor --> CompileActor --> PreviewActor --> WsActor
//!    (watch)       (debounce/invoke)  (render/publish)  (broadcast)
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types for inter-actor communication
//! - `workspace` - File system watcher feeding document edits
//! - `compile` - Per-document debounce, generation tracking, compiler runs
//! - `preview` - Artifact rendering and publishing
//! - `ws` - WebSocket broadcast to preview pages
//! - `coordinator` - Wires up and runs actors

pub mod compile;
pub mod coordinator;
pub mod messages;
pub mod preview;
pub mod workspace;
pub mod ws;

pub use coordinator::Coordinator;
