//! Session storage and the investor session token
//!
//! The access gate is the only writer of the token and the investor portal
//! the only reader. The portal trusts whatever the gate stored and does not
//! check the document again.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// Key written by the access gate
pub const SESSION_KEY: &str = "documento_investidor";

/// Ephemeral key/value storage, dropped with the session
#[derive(Debug, Clone, Default)]
pub struct SessionStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl SessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    pub(crate) fn set(&self, key: &str, value: impl Into<String>) {
        self.entries.write().insert(key.to_string(), value.into());
    }

    /// End the session
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

/// Investor session token over [`SESSION_KEY`]
pub struct InvestorSession;

impl InvestorSession {
    /// Record a document that passed the access check.
    pub(crate) fn grant(storage: &SessionStorage, documento: &str) {
        tracing::info!("investor access granted");
        storage.set(SESSION_KEY, documento);
    }

    /// Document the portal was opened for, read without revalidation
    pub fn current(storage: &SessionStorage) -> Option<String> {
        storage.get(SESSION_KEY)
    }
}
