//! Studio configuration management for `inkpot.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── story      # [story]
//! │   ├── compiler   # [compiler]
//! │   ├── preview    # [preview]
//! │   └── serve      # [serve]
//! ├── error          # ConfigError
//! ├── handle         # Global config handle (arc-swap)
//! └── mod.rs         # StudioConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section      | Purpose                                            |
//! |--------------|----------------------------------------------------|
//! | `[story]`    | Story workspace (directory of `.ink` documents)    |
//! | `[compiler]` | External `inklecate` compiler (path, timeout)      |
//! | `[preview]`  | Live preview behavior (debounce, inkjs runtime)    |
//! | `[serve]`    | Development server (interface, port, watch)        |

mod error;
mod handle;
pub mod section;

pub use error::ConfigError;
pub use handle::{cfg, init_config};
pub use section::{CompilerConfig, PreviewConfig, ServeConfig, StoryConfig};

use crate::cli::Cli;
use crate::log;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name, searched upward from the working directory.
pub const CONFIG_FILE: &str = "inkpot.toml";

/// Root configuration structure representing inkpot.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StudioConfig {
    /// Absolute path to the config file, empty when running on defaults
    /// (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file, or cwd (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Story workspace settings
    pub story: StoryConfig,

    /// External compiler settings
    pub compiler: CompilerConfig,

    /// Live preview settings
    pub preview: PreviewConfig,

    /// Development server settings
    pub serve: ServeConfig,
}

impl StudioConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. Unlike a site generator
    /// there is no mandatory project scaffold: a missing config file means
    /// defaults, with the working directory as workspace root.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match Self::resolve_config_path(cli)? {
            Some(path) => Self::from_path(&path)?,
            None => Self {
                root: std::env::current_dir().context("cannot determine working directory")?,
                ..Self::default()
            },
        };

        config.apply_cli_overrides(cli);
        config.compiler.validate();
        Ok(config)
    }

    /// Parse a config file, warning about unrecognized keys.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        let mut config = Self::parse(&content)?;
        config.config_path = path.to_path_buf();
        config.root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(config)
    }

    /// Deserialize TOML, collecting ignored keys for diagnostics.
    fn parse(content: &str) -> Result<Self, ConfigError> {
        let deserializer = toml::Deserializer::new(content);
        let mut unknown = Vec::new();
        let config: Self = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            unknown.push(path.to_string());
        })?;

        for key in unknown {
            log!("config"; "unknown key `{}` in {}", key, CONFIG_FILE);
        }

        Ok(config)
    }

    /// Locate the config file: explicit `-C` path, or upward search.
    fn resolve_config_path(cli: &Cli) -> Result<Option<PathBuf>> {
        if let Some(explicit) = &cli.config {
            let path = explicit
                .canonicalize()
                .with_context(|| format!("config file `{}` not found", explicit.display()))?;
            return Ok(Some(path));
        }

        let mut dir = std::env::current_dir().context("cannot determine working directory")?;
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                return Ok(Some(candidate));
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    /// Apply CLI flag overrides on top of file values.
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        use crate::cli::Commands;

        if let Some(dir) = &cli.story {
            self.story.dir = dir.clone();
        }

        if let Commands::Serve {
            interface,
            port,
            watch,
        } = &cli.command
        {
            if let Some(interface) = interface {
                self.serve.interface = *interface;
            }
            if let Some(port) = port {
                self.serve.port = *port;
            }
            if let Some(watch) = watch {
                self.serve.watch = *watch;
            }
        }
    }

    /// Absolute path of the story workspace directory.
    pub fn story_dir(&self) -> PathBuf {
        self.root_join(&self.story.dir)
    }

    /// Join a possibly-relative path onto the project root.
    pub fn root_join(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Parse config from a TOML string (test helper).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> StudioConfig {
    StudioConfig::parse(content).expect("test config should parse")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = test_parse_config("");
        assert_eq!(config.story.dir, PathBuf::from("."));
        assert_eq!(config.preview.debounce_ms, 600);
        assert!(config.serve.watch);
    }

    #[test]
    fn test_unknown_keys_do_not_fail() {
        let config = test_parse_config("[story]\ndir = \"tales\"\nfuture_knob = 1");
        assert_eq!(config.story.dir, PathBuf::from("tales"));
    }

    #[test]
    fn test_story_dir_join() {
        let mut config = StudioConfig::default();
        config.root = PathBuf::from("/work/novel");
        config.story.dir = PathBuf::from("drafts");
        assert_eq!(config.story_dir(), PathBuf::from("/work/novel/drafts"));
    }

    #[test]
    fn test_root_join_absolute_passthrough() {
        let mut config = StudioConfig::default();
        config.root = PathBuf::from("/work/novel");
        assert_eq!(
            config.root_join(Path::new("/opt/ink")),
            PathBuf::from("/opt/ink")
        );
    }
}
