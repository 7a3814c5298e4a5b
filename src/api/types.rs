//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::session::SessionKey;

/// Request to send a chat message.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ChatRequest {
    /// The user's message. A missing message is treated as empty text.
    #[serde(default)]
    pub message: Option<String>,
    /// Conversation key; omitted or blank selects the shared default session.
    #[serde(default)]
    pub session: Option<String>,
}

impl ChatRequest {
    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }

    pub fn session_key(&self) -> SessionKey {
        SessionKey::from_optional(self.session.clone())
    }
}

/// Reply to a chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

impl ChatResponse {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

/// Service information.
#[derive(Debug, Clone, Serialize)]
pub struct ApiInfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    /// Number of live conversations.
    pub sessions: usize,
}
