//! Embedded static resources for Inkpot.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `preview` - The ink preview harness (preview.html)
//! - `serve` - Dev server templates (welcome.html, reload.js)
//!
//! # Usage
//!
//! ```ignore
//! use embed::preview::{PREVIEW_HTML, PreviewVars};
//!
//! let html = PREVIEW_HTML.render(&PreviewVars {
//!     title: "intro",
//!     story_js: &escaped_content,
//!     runtime_tag: &runtime,
//!     reload_tag: "",
//! });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod preview {
    use super::{Template, TemplateVars};

    /// Script tag referencing the CDN inkjs build, used when no local
    /// runtime is configured.
    pub const CDN_RUNTIME_TAG: &str =
        r#"<script src="https://unpkg.com/inkjs/dist/ink.js"></script>"#;

    /// Build a script tag that inlines a local inkjs runtime.
    pub fn inline_runtime_tag(runtime_js: &str) -> String {
        format!("<script>\n{runtime_js}\n</script>")
    }

    /// Variables for preview.html.
    pub struct PreviewVars<'a> {
        /// Page title (the document id).
        pub title: &'a str,
        /// Story content, already escaped for a double-quoted JS literal.
        pub story_js: &'a str,
        /// inkjs runtime script tag (CDN reference or inlined).
        pub runtime_tag: &'a str,
        /// Live reload script tag, empty for standalone exports.
        pub reload_tag: &'a str,
    }

    impl TemplateVars for PreviewVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__TITLE__", self.title)
                .replace("__INK_RUNTIME__", self.runtime_tag)
                .replace("__STORY_CONTENT__", self.story_js)
                .replace("__RELOAD__", self.reload_tag)
        }
    }

    /// The interpreter harness: detects empty / compiled JSON /
    /// `COMPILER_ERROR:`-prefixed content and drives the continue/choose
    /// loop over inkjs.
    pub const PREVIEW_HTML: Template = Template::new(include_str!("preview.html"));
}

pub mod serve {
    use super::{Template, TemplateVars};

    /// Variables for reload.js.
    pub struct ReloadVars<'a> {
        /// Document this page is watching (`*` matches everything).
        pub doc: &'a str,
        pub ws_port: u16,
    }

    impl TemplateVars for ReloadVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__INKPOT_DOC__", self.doc)
                .replace("__INKPOT_WS_PORT__", &self.ws_port.to_string())
        }
    }

    /// Live reload JavaScript with document + WebSocket port injection.
    pub const RELOAD_JS: Template = Template::new(include_str!("reload.js"));

    /// Render reload.js wrapped in a script tag, ready for `__RELOAD__`.
    pub fn reload_tag(doc: &str, ws_port: u16) -> String {
        let js = RELOAD_JS.render(&ReloadVars { doc, ws_port });
        format!("<script>\n{js}\n</script>")
    }

    /// Variables for welcome.html.
    pub struct WelcomeVars<'a> {
        pub title: &'a str,
        pub version: &'a str,
        /// Pre-rendered document list markup.
        pub doc_list: &'a str,
    }

    impl TemplateVars for WelcomeVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__TITLE__", self.title)
                .replace("__VERSION__", self.version)
                .replace("__DOC_LIST__", self.doc_list)
        }
    }

    /// Workspace index page template.
    pub const WELCOME_HTML: Template = Template::new(include_str!("welcome.html"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_template_substitution() {
        let vars = preview::PreviewVars {
            title: "intro",
            story_js: r#"{\"inkVersion\":21}"#,
            runtime_tag: preview::CDN_RUNTIME_TAG,
            reload_tag: "",
        };
        let html = preview::PREVIEW_HTML.render(&vars);
        assert!(html.contains(r#"var storyContent = "{\"inkVersion\":21}";"#));
        assert!(html.contains("unpkg.com/inkjs"));
        assert!(html.contains("<title>intro</title>"));
        assert!(!html.contains("__STORY_CONTENT__"));
        assert!(!html.contains("__RELOAD__"));
    }

    #[test]
    fn test_reload_tag_injects_doc_and_port() {
        let tag = serve::reload_tag("chapters/one", 35729);
        assert!(tag.contains(r#"var DOC = "chapters/one";"#));
        assert!(tag.contains("35729"));
        assert!(!tag.contains("__INKPOT_DOC__"));
        assert!(!tag.contains("__INKPOT_WS_PORT__"));
    }

    #[test]
    fn test_welcome_template() {
        let vars = serve::WelcomeVars {
            title: "Ink stories",
            version: "0.3.1",
            doc_list: "<ul><li><a href=\"/preview/intro\">intro</a></li></ul>",
        };
        let html = serve::WELCOME_HTML.render(&vars);
        assert!(html.contains("/preview/intro"));
        assert!(html.contains("0.3.1"));
        assert!(!html.contains("__DOC_LIST__"));
    }

    #[test]
    fn test_inline_runtime_tag() {
        let tag = preview::inline_runtime_tag("var inkjs = {};");
        assert!(tag.starts_with("<script>"));
        assert!(tag.contains("var inkjs = {};"));
        assert!(tag.ends_with("</script>"));
    }
}
