//! Session key type.

use std::fmt;

/// Key used when the caller does not name a session.
pub const DEFAULT_SESSION: &str = "default";

/// Opaque, caller-supplied session identifier.
///
/// Keys are compared verbatim. A missing or blank key maps to
/// [`DEFAULT_SESSION`], so anonymous callers share one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey(String);

impl SessionKey {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        if key.trim().is_empty() {
            Self::default()
        } else {
            Self(key)
        }
    }

    /// Build a key from an optional request field.
    pub fn from_optional(key: Option<String>) -> Self {
        key.map(Self::new).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_SESSION
    }
}

impl Default for SessionKey {
    fn default() -> Self {
        Self(DEFAULT_SESSION.to_string())
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SessionKey {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
