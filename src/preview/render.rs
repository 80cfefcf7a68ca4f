//! RenderMode → displayable artifact.
//!
//! The renderer is a pure function of its per-document state: no disk, no
//! network. Rebuilding the harness bundle for identical content is the
//! expensive no-op this module exists to suppress - a document that
//! recompiles to the same JSON keeps its previous artifact untouched.

use std::borrow::Cow;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::config::StudioConfig;
use crate::core::DocId;
use crate::embed;
use crate::preview::escape_js_string;

/// What the preview must show for a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderMode {
    /// Nothing written yet.
    Empty,
    /// Input already looks like compiled story JSON; shown verbatim.
    PassthroughRaw(String),
    /// Fresh compiler output.
    Compiled(String),
    /// Compile failed; payload is the full diagnostic text.
    CompilerError(String),
}

impl RenderMode {
    /// The story content string the harness embeds. Errors carry the
    /// distinguished prefix the harness dispatches on.
    pub fn story_content(&self) -> Cow<'_, str> {
        match self {
            Self::Empty => Cow::Borrowed(""),
            Self::PassthroughRaw(text) | Self::Compiled(text) => Cow::Borrowed(text),
            Self::CompilerError(msg) => Cow::Owned(format!("COMPILER_ERROR: {msg}")),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::CompilerError(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::PassthroughRaw(_) => "passthrough",
            Self::Compiled(_) => "compiled",
            Self::CompilerError(_) => "error",
        }
    }
}

/// Where the inkjs runtime comes from.
#[derive(Debug, Clone)]
pub enum RuntimeSource {
    /// Reference the CDN build (needs network in the browser).
    Cdn,
    /// Inline a local runtime file into every bundle.
    Inline(String),
}

impl RuntimeSource {
    /// Resolve from config, falling back to CDN when the configured file
    /// cannot be read.
    pub fn from_config(config: &StudioConfig) -> Self {
        let Some(path) = &config.preview.runtime_js else {
            return Self::Cdn;
        };
        let path = config.root_join(path);
        match std::fs::read_to_string(&path) {
            Ok(js) => Self::Inline(js),
            Err(e) => {
                crate::log!(
                    "config";
                    "[preview] runtime_js `{}` unreadable ({}), using CDN runtime",
                    path.display(),
                    e
                );
                Self::Cdn
            }
        }
    }

    fn tag(&self) -> Cow<'_, str> {
        match self {
            Self::Cdn => Cow::Borrowed(embed::preview::CDN_RUNTIME_TAG),
            Self::Inline(js) => Cow::Owned(embed::preview::inline_runtime_tag(js)),
        }
    }
}

/// Harness construction options, fixed per renderer.
#[derive(Debug, Clone)]
pub struct HarnessOptions {
    pub runtime: RuntimeSource,
    /// WebSocket port for live reload. `None` produces standalone bundles
    /// (web export).
    pub reload_ws_port: Option<u16>,
}

impl HarnessOptions {
    /// Standalone bundle options (exports): no reload machinery.
    pub fn standalone(runtime: RuntimeSource) -> Self {
        Self {
            runtime,
            reload_ws_port: None,
        }
    }
}

/// A complete displayable preview bundle.
#[derive(Debug)]
pub struct RenderedArtifact {
    pub html: String,
}

/// Per-document render state, owned exclusively by the renderer.
struct PreviewState {
    last_content: String,
    artifact: Arc<RenderedArtifact>,
}

/// Builds preview artifacts, suppressing redundant rebuilds.
pub struct PreviewRenderer {
    options: HarnessOptions,
    state: FxHashMap<DocId, PreviewState>,
    /// Artifact constructions since startup (dedup visibility).
    builds: u64,
}

impl PreviewRenderer {
    pub fn new(options: HarnessOptions) -> Self {
        Self {
            options,
            state: FxHashMap::default(),
            builds: 0,
        }
    }

    /// Render `mode` for `doc`. Identical content returns the previously
    /// built artifact without reconstructing it.
    pub fn render(&mut self, doc: &DocId, mode: &RenderMode) -> Arc<RenderedArtifact> {
        let content = mode.story_content();

        if let Some(state) = self.state.get(doc)
            && state.last_content == content.as_ref()
        {
            crate::debug!("preview"; "{}: content unchanged, artifact reused", doc);
            return Arc::clone(&state.artifact);
        }

        let artifact = Arc::new(build_artifact(doc.as_str(), &content, &self.options));
        self.builds += 1;
        crate::debug!("preview"; "{}: artifact built (total {})", doc, self.builds);

        self.state.insert(
            doc.clone(),
            PreviewState {
                last_content: content.into_owned(),
                artifact: Arc::clone(&artifact),
            },
        );
        artifact
    }

    /// Drop state for a removed document.
    pub fn forget(&mut self, doc: &DocId) {
        self.state.remove(doc);
    }

    #[cfg(test)]
    fn build_count(&self) -> u64 {
        self.builds
    }
}

/// Construct the harness bundle for one story content string.
pub fn build_artifact(title: &str, story_content: &str, options: &HarnessOptions) -> RenderedArtifact {
    let reload_tag = match options.reload_ws_port {
        Some(port) => embed::serve::reload_tag(title, port),
        None => String::new(),
    };

    let html = embed::preview::PREVIEW_HTML.render(&embed::preview::PreviewVars {
        title,
        story_js: &escape_js_string(story_content),
        runtime_tag: &options.runtime.tag(),
        reload_tag: &reload_tag,
    });

    RenderedArtifact { html }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str) -> DocId {
        DocId::from_route(id).unwrap()
    }

    fn renderer() -> PreviewRenderer {
        PreviewRenderer::new(HarnessOptions {
            runtime: RuntimeSource::Cdn,
            reload_ws_port: Some(35729),
        })
    }

    #[test]
    fn test_render_is_idempotent_for_unchanged_payload() {
        let mut r = renderer();
        let mode = RenderMode::Compiled(r#"{"inkVersion":21}"#.to_string());

        let first = r.render(&doc("intro"), &mode);
        let second = r.render(&doc("intro"), &mode);

        assert_eq!(r.build_count(), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_render_rebuilds_on_changed_payload() {
        let mut r = renderer();
        r.render(&doc("intro"), &RenderMode::Compiled("{\"a\":1}".to_string()));
        r.render(&doc("intro"), &RenderMode::Compiled("{\"a\":2}".to_string()));
        assert_eq!(r.build_count(), 2);
    }

    #[test]
    fn test_render_state_is_per_document() {
        let mut r = renderer();
        let mode = RenderMode::Compiled("{\"a\":1}".to_string());
        r.render(&doc("one"), &mode);
        r.render(&doc("two"), &mode);
        // Same payload, different documents: both build
        assert_eq!(r.build_count(), 2);
    }

    #[test]
    fn test_error_mode_embeds_diagnostic_verbatim() {
        let mut r = renderer();
        let artifact = r.render(
            &doc("intro"),
            &RenderMode::CompilerError("Line 3: unexpected token".to_string()),
        );
        assert!(artifact.html.contains("COMPILER_ERROR: Line 3: unexpected token"));
    }

    #[test]
    fn test_error_mode_escapes_for_js_embedding() {
        let mut r = renderer();
        let artifact = r.render(
            &doc("intro"),
            &RenderMode::CompilerError("bad \"quote\"\npath \\x".to_string()),
        );
        assert!(artifact.html.contains(r#"bad \"quote\"\npath \\x"#));
    }

    #[test]
    fn test_empty_mode_embeds_empty_content() {
        let mut r = renderer();
        let artifact = r.render(&doc("intro"), &RenderMode::Empty);
        assert!(artifact.html.contains(r#"var storyContent = "";"#));
    }

    #[test]
    fn test_compiled_json_embedded_escaped() {
        let mut r = renderer();
        let artifact = r.render(
            &doc("intro"),
            &RenderMode::Compiled(r#"{"inkVersion":21,"root":[]}"#.to_string()),
        );
        assert!(
            artifact
                .html
                .contains(r#"var storyContent = "{\"inkVersion\":21,\"root\":[]}";"#)
        );
    }

    #[test]
    fn test_served_artifact_carries_reload_script() {
        let mut r = renderer();
        let artifact = r.render(&doc("intro"), &RenderMode::Empty);
        assert!(artifact.html.contains("WebSocket"));
    }

    #[test]
    fn test_standalone_artifact_has_no_reload_script() {
        let artifact = build_artifact(
            "intro",
            r#"{"inkVersion":21}"#,
            &HarnessOptions::standalone(RuntimeSource::Cdn),
        );
        assert!(!artifact.html.contains("WebSocket"));
        assert!(!artifact.html.contains("__RELOAD__"));
    }

    #[test]
    fn test_forget_drops_state() {
        let mut r = renderer();
        let mode = RenderMode::Compiled("{\"a\":1}".to_string());
        r.render(&doc("intro"), &mode);
        r.forget(&doc("intro"));
        r.render(&doc("intro"), &mode);
        assert_eq!(r.build_count(), 2);
    }
}
