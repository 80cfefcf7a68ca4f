//! `[preview]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [preview]
//! debounce_ms = 600            # Quiet period before recompiling a document
//! runtime_js = "ink.min.js"    # Local inkjs runtime to inline (CDN if unset)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default quiet period between the last edit and a compile.
pub const DEFAULT_DEBOUNCE_MS: u64 = 600;

/// Live preview settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Quiet period (milliseconds) a document must stay unedited before its
    /// compile starts. Every further edit restarts the wait.
    pub debounce_ms: u64,

    /// Path to a local inkjs runtime file to inline into previews and web
    /// exports. When unset the harness references the CDN build.
    pub runtime_js: Option<PathBuf>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            runtime_js: None,
        }
    }
}

impl PreviewConfig {
    pub fn debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::time::Duration;

    #[test]
    fn test_preview_config() {
        let config = test_parse_config("[preview]\ndebounce_ms = 250");
        assert_eq!(config.preview.debounce(), Duration::from_millis(250));
    }

    #[test]
    fn test_preview_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.preview.debounce_ms, 600);
        assert!(config.preview.runtime_js.is_none());
    }
}
