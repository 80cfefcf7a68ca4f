//! Compiler discovery.
//!
//! Resolves the path of the `inklecate` executable once per process. Search
//! order, first existing hit wins:
//!
//! 1. `[compiler] path` from inkpot.toml (tilde-expanded)
//! 2. `INKLECATE` environment variable
//! 3. an `inklecate` binary next to the inkpot executable (bundled install)
//! 4. well-known install locations
//! 5. `$PATH` lookup
//!
//! A miss is a normal outcome, not an error: callers map `None` to
//! [`CompileError::ToolMissing`](super::CompileError::ToolMissing) and the
//! studio stays usable.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::config::{CompilerConfig, cfg};

/// Executable name, resolved against `$PATH` as the final fallback.
const COMPILER_BIN: &str = "inklecate";

/// Fixed install locations probed before `$PATH`.
const WELL_KNOWN_PATHS: &[&str] = &["/opt/homebrew/bin/inklecate", "/usr/local/bin/inklecate"];

/// Cached discovery result. Installation state rarely changes mid-session,
/// so one probe per process is enough.
static LOCATED: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Resolve the compiler executable, cached for the process lifetime.
pub fn locate() -> Option<PathBuf> {
    LOCATED
        .get_or_init(|| {
            let found = first_existing(&candidate_paths(&cfg().compiler))
                .or_else(|| which::which(COMPILER_BIN).ok());
            match &found {
                Some(path) => crate::debug!("compiler"; "using inklecate at {}", path.display()),
                None => crate::debug!("compiler"; "inklecate not found on this system"),
            }
            found
        })
        .clone()
}

/// Ordered candidate list ahead of the `$PATH` fallback.
fn candidate_paths(config: &CompilerConfig) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = config.expanded_path() {
        candidates.push(path);
    }

    if let Ok(env_path) = std::env::var("INKLECATE")
        && !env_path.is_empty()
    {
        candidates.push(PathBuf::from(shellexpand::tilde(&env_path).into_owned()));
    }

    // Bundled: shipped next to the inkpot executable itself
    if let Ok(exe) = std::env::current_exe()
        && let Some(dir) = exe.parent()
    {
        candidates.push(dir.join(COMPILER_BIN));
    }

    candidates.extend(WELL_KNOWN_PATHS.iter().map(PathBuf::from));
    candidates
}

/// First candidate that exists as a file.
fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.is_file()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &std::path::Path) {
        std::fs::write(path, b"#!/bin/sh\n").unwrap();
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("inkpot-locate-{}-{}", std::process::id(), tag));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_first_existing_none_when_all_missing() {
        let dir = scratch_dir("miss");
        let candidates = vec![dir.join("a"), dir.join("b")];
        assert_eq!(first_existing(&candidates), None);
    }

    #[test]
    fn test_first_existing_respects_order() {
        let dir = scratch_dir("order");
        let first = dir.join("first");
        let second = dir.join("second");
        touch(&first);
        touch(&second);

        let candidates = vec![dir.join("missing"), first.clone(), second];
        assert_eq!(first_existing(&candidates), Some(first));
    }

    #[test]
    fn test_first_existing_skips_directories() {
        let dir = scratch_dir("dirs");
        let sub = dir.join("inklecate");
        std::fs::create_dir_all(&sub).unwrap();
        let real = dir.join("real");
        touch(&real);

        let candidates = vec![sub, real.clone()];
        assert_eq!(first_existing(&candidates), Some(real));
    }

    #[test]
    fn test_candidate_paths_config_override_first() {
        let dir = scratch_dir("config");
        let configured = dir.join("my-inklecate");

        let config = CompilerConfig {
            path: Some(configured.clone()),
            timeout_secs: None,
        };
        let candidates = candidate_paths(&config);
        assert_eq!(candidates.first(), Some(&configured));
        // Well-known locations stay in the list after the override
        assert!(
            candidates
                .iter()
                .any(|p| p == std::path::Path::new("/usr/local/bin/inklecate"))
        );
    }
}
