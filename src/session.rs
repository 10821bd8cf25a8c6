//! Session flash storage collaborator.
//!
//! Flash values survive exactly one redirect: the failed submit writes them,
//! the next request's page render reads them back and the framework discards
//! them. Only the write half is modeled here; reading flash state is the
//! hosting framework's job.

use std::collections::HashMap;
use std::sync::RwLock;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors that can occur writing to the session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to write a session key.
    #[error("failed to write session key `{key}`: {reason}")]
    WriteError {
        /// The session key
        key: String,
        /// Backend-specific cause
        reason: String,
    },
}

/// Flash key holding the per-field error messages after a failed submit.
pub const FLASH_ERRORS: &str = "flash.errors";

/// Flash key holding the submitted values for form repopulation.
pub const FLASH_OLD: &str = "flash.old";

/// Request-session key/value store owned by the hosting framework.
pub trait SessionStore: Send + Sync {
    /// Write a value under a key, replacing any previous value.
    fn set(&self, key: &str, value: serde_json::Value) -> SessionResult<()>;
}

/// In-memory session (for development/testing).
#[derive(Debug, Default)]
pub struct MemorySession {
    entries: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemorySession {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a key back. Real sessions are read by the framework on the next
    /// request; this exists so tests can observe what was flashed.
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.entries.read().ok()?.get(key).cloned()
    }
}

impl SessionStore for MemorySession {
    fn set(&self, key: &str, value: serde_json::Value) -> SessionResult<()> {
        let mut entries = self.entries.write().map_err(|e| SessionError::WriteError {
            key: key.to_string(),
            reason: format!("failed to acquire lock: {e}"),
        })?;

        entries.insert(key.to_string(), value);
        Ok(())
    }
}
