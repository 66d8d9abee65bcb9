//! Session storage abstraction and the in-process implementation.

use ac_core::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::session::Session;

/// Keyed session storage. Implementations decide durability; callers only
/// get/set/delete by sender key.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Session>>;
    async fn set(&self, session: Session) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Existing session for `key`, or a fresh one at `menu`.
    async fn load_or_create(&self, key: &str) -> Result<Session> {
        Ok(self.get(key).await?.unwrap_or_else(|| Session::new(key)))
    }
}

/// Process-local map. Sessions live until deleted or the process exits.
///
/// Each call holds the lock only for its own read or write; a get followed by
/// a set is not atomic, so concurrent turns of one sender keep the last write.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        // A panic mid-insert cannot leave a half-written Session behind.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<Session>> {
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, session: Session) -> Result<()> {
        self.lock().insert(session.sender.clone(), session);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.lock().remove(key).is_some())
    }
}
