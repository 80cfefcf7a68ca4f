//! `[compiler]` section configuration.
//!
//! Settings for the external `inklecate` compiler.
//!
//! # Example
//!
//! ```toml
//! [compiler]
//! path = "~/tools/inklecate"   # Explicit compiler path (skips discovery)
//! timeout_secs = 20            # Kill compiles that run longer than this
//! ```
//!
//! Without `path`, the compiler is discovered at runtime: `INKLECATE` env
//! var, a sibling of the inkpot executable, well-known install locations,
//! then `$PATH`.
//!
//! Without `timeout_secs` a hung compiler hangs its compile request; set it
//! to bound external-process time.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// External compiler settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Explicit path to the inklecate executable. Tilde-expanded.
    pub path: Option<PathBuf>,

    /// Maximum seconds a single compile may run. `None` = unbounded.
    pub timeout_secs: Option<u64>,
}

impl CompilerConfig {
    /// Tilde-expanded explicit compiler path, if configured.
    pub fn expanded_path(&self) -> Option<PathBuf> {
        let raw = self.path.as_ref()?.to_str()?;
        Some(PathBuf::from(shellexpand::tilde(raw).into_owned()))
    }

    /// Warn about a configured path that does not exist. Discovery still
    /// runs, so this is a hint rather than a hard error.
    pub fn validate(&self) {
        if let Some(path) = self.expanded_path()
            && !path.exists()
        {
            crate::log!(
                "config";
                "[compiler] path `{}` does not exist, falling back to discovery",
                path.display()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_compiler_config() {
        let config =
            test_parse_config("[compiler]\npath = \"/opt/ink/inklecate\"\ntimeout_secs = 20");
        assert_eq!(
            config.compiler.expanded_path().unwrap(),
            std::path::PathBuf::from("/opt/ink/inklecate")
        );
        assert_eq!(config.compiler.timeout_secs, Some(20));
    }

    #[test]
    fn test_compiler_config_defaults() {
        let config = test_parse_config("");
        assert!(config.compiler.path.is_none());
        assert!(config.compiler.timeout_secs.is_none());
    }

    #[test]
    fn test_compiler_path_tilde_expansion() {
        let config = test_parse_config("[compiler]\npath = \"~/bin/inklecate\"");
        let expanded = config.compiler.expanded_path().unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("bin/inklecate"));
    }
}
