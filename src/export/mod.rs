//! Export Pipeline
//!
//! Produces the three shareable artifact kinds from a document's current
//! text. Exports are explicit one-shot actions: every call runs its own
//! fresh compile (no debounce, no reuse of an in-flight preview compile),
//! so the artifact always reflects the text exactly as passed in.

use std::path::Path;

use thiserror::Error;

use crate::compiler::{self, CompileError};
use crate::config::StudioConfig;
use crate::preview::{HarnessOptions, RenderMode, RuntimeSource, build_artifact};

/// Artifact kind to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Raw Ink source, no compilation.
    Source,
    /// Compiled story JSON.
    Json,
    /// Standalone HTML bundle embedding the interpreter harness and the
    /// compiled JSON inline.
    Web,
}

/// A finished export, ready to be written wherever the caller wants.
#[derive(Debug)]
pub struct ExportArtifact {
    pub content: String,
    /// Conventional file extension for this artifact kind.
    pub extension: &'static str,
}

/// Export failure, surfaced to the user as a blocking error.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Run one export against the process-wide compiler.
pub async fn export(
    title: &str,
    source: &str,
    kind: ExportKind,
    config: &StudioConfig,
) -> Result<ExportArtifact, ExportError> {
    export_with(compiler::locate().as_deref(), title, source, kind, config).await
}

/// Run one export against an explicit compiler executable (`None` = tool
/// missing).
pub(crate) async fn export_with(
    exe: Option<&Path>,
    title: &str,
    source: &str,
    kind: ExportKind,
    config: &StudioConfig,
) -> Result<ExportArtifact, ExportError> {
    match kind {
        ExportKind::Source => Ok(ExportArtifact {
            content: source.to_string(),
            extension: "ink",
        }),
        ExportKind::Json => Ok(ExportArtifact {
            content: compile(exe, source, config).await?,
            extension: "json",
        }),
        ExportKind::Web => {
            let json = compile(exe, source, config).await?;
            let mode = RenderMode::Compiled(json);
            let options = HarnessOptions::standalone(RuntimeSource::from_config(config));
            let artifact = build_artifact(title, &mode.story_content(), &options);
            Ok(ExportArtifact {
                content: artifact.html,
                extension: "html",
            })
        }
    }
}

async fn compile(
    exe: Option<&Path>,
    source: &str,
    config: &StudioConfig,
) -> Result<String, CompileError> {
    let Some(exe) = exe else {
        return Err(CompileError::ToolMissing);
    };
    let timeout = config
        .compiler
        .timeout_secs
        .map(std::time::Duration::from_secs);
    compiler::invoke(exe, source, timeout).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[cfg(unix)]
    fn fake_compiler(tag: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = std::env::temp_dir().join(format!(
            "inkpot-export-fake-{}-{}",
            std::process::id(),
            tag
        ));
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_source_export_is_verbatim_and_uncompiled() {
        let config = StudioConfig::default();
        // No compiler available; source export must not care
        let artifact = export_with(None, "intro", "Hello\n-> END", ExportKind::Source, &config)
            .await
            .unwrap();
        assert_eq!(artifact.content, "Hello\n-> END");
        assert_eq!(artifact.extension, "ink");
    }

    #[tokio::test]
    async fn test_json_export_without_compiler_is_tool_missing() {
        let config = StudioConfig::default();
        let err = export_with(None, "intro", "Hello\n-> END", ExportKind::Json, &config)
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Compile(CompileError::ToolMissing)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_json_export_returns_compiled_artifact() {
        let exe = fake_compiler("json", r#"printf '{"inkVersion":21,"root":[]}' > "$2""#);
        let config = StudioConfig::default();
        let artifact = export_with(
            Some(&exe),
            "intro",
            "Hello\n-> END",
            ExportKind::Json,
            &config,
        )
        .await
        .unwrap();
        assert_eq!(artifact.content, r#"{"inkVersion":21,"root":[]}"#);
        assert_eq!(artifact.extension, "json");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_web_export_inlines_compiled_json() {
        let exe = fake_compiler("web", r#"printf '{"inkVersion":21,"root":[]}' > "$2""#);
        let config = StudioConfig::default();
        let artifact = export_with(
            Some(&exe),
            "intro",
            "Hello\n-> END",
            ExportKind::Web,
            &config,
        )
        .await
        .unwrap();
        assert_eq!(artifact.extension, "html");
        // The bundle embeds the JSON (JS-string escaped) and is standalone
        assert!(
            artifact
                .content
                .contains(r#"var storyContent = "{\"inkVersion\":21,\"root\":[]}";"#)
        );
        assert!(!artifact.content.contains("WebSocket"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_web_export_surfaces_compile_failure() {
        let exe = fake_compiler("fail", r#"printf 'ERROR: no END' >&2; exit 1"#);
        let config = StudioConfig::default();
        let err = export_with(Some(&exe), "intro", "Hello", ExportKind::Web, &config)
            .await
            .unwrap_err();
        match err {
            ExportError::Compile(CompileError::Process(msg)) => {
                assert_eq!(msg, "ERROR: no END");
            }
            other => panic!("expected Process failure, got {other:?}"),
        }
    }
}
