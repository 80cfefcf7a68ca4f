//! `[story]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [story]
//! dir = "."          # Directory of .ink documents (relative to project root)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Story workspace settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    /// Directory scanned for `.ink` documents.
    pub dir: PathBuf,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}
