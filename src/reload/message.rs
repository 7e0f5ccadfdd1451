//! Live reload message protocol.
//!
//! JSON messages sent over WebSocket to browser clients:
//!
//! - `reload`: trigger a full page reload
//! - `css`: re-request stylesheets in place (no page reload)
//! - `error`: a rebuild failed; surface it in the browser console
//! - `connected`: handshake greeting with the server version

use serde::{Deserialize, Serialize};

/// Message sent to connected browser clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReloadMessage {
    /// Full page reload.
    Reload {
        /// What changed (a category label), for client-side logging.
        #[serde(skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },

    /// Stylesheet-only update: swap `<link>` hrefs, keep the page.
    Css,

    /// A rebuild failed; shown in the browser console.
    Error { message: String },

    /// Connection established.
    Connected { version: String },
}

impl ReloadMessage {
    pub fn reload(reason: impl Into<String>) -> Self {
        Self::Reload {
            reason: Some(reason.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn connected() -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"type":"reload"}"#.to_string())
    }

    /// Parse from JSON string.
    pub fn from_json(s: &str) -> Option<Self> {
        serde_json::from_str(s).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_serialization() {
        let msg = ReloadMessage::reload("html");
        let json = msg.to_json();
        assert!(json.contains(r#""type":"reload""#));
        assert!(json.contains(r#""reason":"html""#));

        assert_eq!(ReloadMessage::from_json(&json).unwrap(), msg);
    }

    #[test]
    fn test_css_is_bare() {
        assert_eq!(ReloadMessage::Css.to_json(), r#"{"type":"css"}"#);
    }

    #[test]
    fn test_reason_omitted_when_none() {
        let msg = ReloadMessage::Reload { reason: None };
        assert_eq!(msg.to_json(), r#"{"type":"reload"}"#);
    }

    #[test]
    fn test_error_roundtrip() {
        let msg = ReloadMessage::error("scss: expected \"}\"");
        let parsed = ReloadMessage::from_json(&msg.to_json()).unwrap();
        assert_eq!(parsed, msg);
    }
}
