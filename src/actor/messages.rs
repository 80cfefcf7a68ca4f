//! Actor Message Definitions
//!
//! Message types for inter-actor communication.
//!
//! ```text
//! WorkspaceActor --TextChanged--> CompileActor --Render--> PreviewActor --Changed--> WsActor
//! ```

use crate::compiler::CompileError;
use crate::core::DocId;
use crate::preview::RenderMode;

// =============================================================================
// CompileActor Messages
// =============================================================================

/// Messages to the Compile Actor
#[derive(Debug)]
pub enum CompileMsg {
    /// A document's text changed (editor save or initial scan)
    TextChanged { doc: DocId, text: String },
    /// A document disappeared from the workspace
    Removed { doc: DocId },
    /// A pipeline task finished (sent by the task itself)
    Outcome {
        doc: DocId,
        generation: u64,
        outcome: Result<String, CompileError>,
    },
    /// Shutdown
    Shutdown,
}

// =============================================================================
// PreviewActor Messages
// =============================================================================

/// Messages to the Preview Actor
#[derive(Debug)]
pub enum PreviewMsg {
    /// Render a fresh outcome for a document
    Render { doc: DocId, mode: RenderMode },
    /// Drop a removed document's preview
    Removed { doc: DocId },
    /// Shutdown
    Shutdown,
}

// =============================================================================
// WsActor Messages
// =============================================================================

/// Messages to the WebSocket Actor
pub enum WsMsg {
    /// A document's published preview changed
    Changed { doc: DocId, reason: String },
    /// Add client (raw stream, handshake happens in the actor)
    AddClient(std::net::TcpStream),
    /// Shutdown
    Shutdown,
}
