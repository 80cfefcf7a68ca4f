//! JS string escaping for story content embedded into the harness.

/// Escape text for embedding inside a double-quoted JS string literal.
///
/// Backslash first, then quotes and newlines; carriage returns are dropped.
/// Everything else passes through untouched so compiler diagnostics stay
/// readable character-for-character.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_backslash_before_quote() {
        // A literal \" must become \\\" - backslash pass runs first
        assert_eq!(escape_js_string(r#"a\"b"#), r#"a\\\"b"#);
    }

    #[test]
    fn test_escape_newlines() {
        assert_eq!(escape_js_string("line one\nline two"), "line one\\nline two");
    }

    #[test]
    fn test_escape_drops_carriage_returns() {
        assert_eq!(escape_js_string("a\r\nb"), "a\\nb");
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_js_string("Hello world -> END"), "Hello world -> END");
    }

    #[test]
    fn test_escape_json_payload() {
        assert_eq!(
            escape_js_string(r#"{"inkVersion":21}"#),
            r#"{\"inkVersion\":21}"#
        );
    }
}
