//! Preview rendering.
//!
//! Turns compile outcomes into displayable HTML artifacts:
//!
//! - `render` - `RenderMode` → harness bundle, with redundant-render dedup
//! - `escape` - JS string escaping for embedded story content
//! - `message` - WebSocket protocol between server and preview pages
//! - `cache` - published artifacts, read by HTTP request threads
//! - `server` - WebSocket accept loop feeding the WsActor

pub mod cache;
mod escape;
pub mod message;
mod render;
pub mod server;

pub use escape::escape_js_string;
pub use render::{
    HarnessOptions, PreviewRenderer, RenderMode, RenderedArtifact, RuntimeSource, build_artifact,
};
