//! Edit sessions and the process-wide session registry.

use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;

use super::error::{EditError, EditResult};
use super::metadata::EditTableMetadata;

/// Server-side state for one table open for interactive editing.
///
/// A session starts uninitialized. Session-management logic attaches the
/// table metadata exactly once when introspection completes; from then on
/// the session serves concurrent read-only queries without locking.
#[derive(Debug)]
pub struct EditSession {
    owner_uri: String,
    // Write-once so concurrent readers never observe a partial attachment.
    metadata: OnceCell<EditTableMetadata>,
}

impl EditSession {
    /// Create an uninitialized session for an owner URI.
    pub fn new(owner_uri: impl Into<String>) -> Self {
        Self {
            owner_uri: owner_uri.into(),
            metadata: OnceCell::new(),
        }
    }

    /// Create a session with metadata already attached.
    pub fn initialized(owner_uri: impl Into<String>, metadata: EditTableMetadata) -> Self {
        let session = Self::new(owner_uri);
        let _ = session.metadata.set(metadata);
        session
    }

    /// The owner URI this session is registered under.
    pub fn owner_uri(&self) -> &str {
        &self.owner_uri
    }

    /// Attach the table metadata produced by introspection.
    ///
    /// Fails if the session was already initialized; the first attachment
    /// stays in place.
    pub fn initialize(&self, metadata: EditTableMetadata) -> EditResult<()> {
        self.metadata
            .set(metadata)
            .map_err(|_| EditError::SessionAlreadyInitialized(self.owner_uri.clone()))
    }

    /// Whether metadata has been attached.
    pub fn is_initialized(&self) -> bool {
        self.metadata.get().is_some()
    }

    /// The attached metadata, if the session is initialized.
    pub fn metadata(&self) -> Option<&EditTableMetadata> {
        self.metadata.get()
    }
}

/// Concurrent mapping from owner URI to live edit session.
///
/// Shared across all in-flight requests. The query path only looks sessions
/// up; registration and removal belong to session lifecycle logic. Lookups
/// for the same key are linearizable with respect to inserts and removals.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Arc<EditSession>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the session registered under an owner URI.
    pub fn get(&self, owner_uri: &str) -> Option<Arc<EditSession>> {
        self.sessions.get(owner_uri).map(|entry| entry.value().clone())
    }

    /// Register a session under its owner URI, replacing any previous
    /// session with the same key. Returns the shared handle.
    pub fn register(&self, session: EditSession) -> Arc<EditSession> {
        let session = Arc::new(session);
        self.sessions
            .insert(session.owner_uri().to_string(), session.clone());
        session
    }

    /// Remove the session registered under an owner URI.
    pub fn remove(&self, owner_uri: &str) -> Option<Arc<EditSession>> {
        self.sessions.remove(owner_uri).map(|(_, session)| session)
    }

    /// Whether a session is registered under an owner URI.
    pub fn contains(&self, owner_uri: &str) -> bool {
        self.sessions.contains_key(owner_uri)
    }

    /// Number of registered sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the registry holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
