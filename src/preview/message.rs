//! Live Preview Message Protocol
//!
//! Defines the JSON message format for WebSocket communication between the
//! development server and preview pages.
//!
//! # Message Types
//!
//! - `connected`: Handshake after a client attaches
//! - `reload`: A document's preview changed; pages viewing it refetch

use serde::{Deserialize, Serialize};

/// Message sent over the preview WebSocket
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PreviewMessage {
    /// Connection established
    Connected {
        /// Server version for compatibility check
        version: String,
    },

    /// A document's published preview changed
    Reload {
        /// Document id the change applies to
        doc: String,
        /// Optional human-readable reason
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl PreviewMessage {
    /// Create a connected message
    pub fn connected() -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Create a reload message
    pub fn reload(doc: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Reload {
            doc: doc.into(),
            reason: Some(reason.into()),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"reload","doc":"*"}"#.to_string())
    }

    /// Parse from JSON string
    pub fn from_json(s: &str) -> Option<Self> {
        serde_json::from_str(s).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_message_serialization() {
        let msg = PreviewMessage::reload("chapters/one", "recompiled");
        let json = msg.to_json();
        assert!(json.contains(r#""type":"reload""#));
        assert!(json.contains(r#""doc":"chapters/one""#));
        assert!(json.contains(r#""reason":"recompiled""#));

        match PreviewMessage::from_json(&json).unwrap() {
            PreviewMessage::Reload { doc, reason } => {
                assert_eq!(doc, "chapters/one");
                assert_eq!(reason.as_deref(), Some("recompiled"));
            }
            other => panic!("expected Reload, got {other:?}"),
        }
    }

    #[test]
    fn test_reason_omitted_when_none() {
        let msg = PreviewMessage::Reload {
            doc: "intro".to_string(),
            reason: None,
        };
        assert!(!msg.to_json().contains("reason"));
    }

    #[test]
    fn test_connected_carries_version() {
        let json = PreviewMessage::connected().to_json();
        assert!(json.contains(r#""type":"connected""#));
        assert!(json.contains(env!("CARGO_PKG_VERSION")));
    }
}
