// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Persistence of whole session records.
use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};

use parking_lot::RwLock;
use thiserror::Error;

use crate::session::{GameSession, SessionId};

/// Failure reported by a [`SessionStore`].
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum StoreError {
    /// The stored record changed since it was loaded.
    #[error("session {id} was modified concurrently (expected version {expected}, found {found})")]
    Conflict {
        id: SessionId,
        expected: u64,
        found: u64,
    },

    /// The backing store could not be reached.
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Storage for session records.
///
/// `save` is a compare-and-swap on [`GameSession::version`]: it succeeds only if the
/// stored record still has the version the caller loaded (zero for a record that was
/// never saved), and the stored copy then carries the next version.
pub trait SessionStore: Send + Sync {
    /// Allocate a fresh session id.
    fn next_id(&self) -> Result<SessionId, StoreError>;

    /// Load the record for `id`, if there is one.
    fn load(&self, id: SessionId) -> Result<Option<GameSession>, StoreError>;

    /// Persist `session`, returning the version it was stored at.
    fn save(&self, session: &GameSession) -> Result<u64, StoreError>;
}

/// A [`SessionStore`] held in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    last_id: AtomicU64,
    sessions: RwLock<HashMap<SessionId, GameSession>>,
}

impl MemoryStore {
    /// Construct an empty store.
    pub fn new() -> Self {
        Default::default()
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Returns true if no session was ever saved.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn next_id(&self) -> Result<SessionId, StoreError> {
        Ok(SessionId::from(self.last_id.fetch_add(1, Ordering::Relaxed) + 1))
    }

    fn load(&self, id: SessionId) -> Result<Option<GameSession>, StoreError> {
        Ok(self.sessions.read().get(&id).cloned())
    }

    fn save(&self, session: &GameSession) -> Result<u64, StoreError> {
        let mut sessions = self.sessions.write();
        let found = sessions.get(&session.id()).map_or(0, GameSession::version);
        if found != session.version() {
            return Err(StoreError::Conflict {
                id: session.id(),
                expected: session.version(),
                found,
            });
        }
        let mut stored = session.clone();
        stored.set_version(found + 1);
        sessions.insert(stored.id(), stored);
        Ok(found + 1)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::session::PlayerId;

    #[test]
    fn ids_are_unique() {
        let store = MemoryStore::new();
        let first = store.next_id().unwrap();
        let second = store.next_id().unwrap();
        assert_ne!(first, second);
        assert!(store.is_empty());
    }

    #[test]
    fn save_bumps_the_version() {
        let store = MemoryStore::new();
        let id = store.next_id().unwrap();
        let session = GameSession::new(id, PlayerId::from("alice"));
        assert_eq!(store.save(&session), Ok(1));

        let loaded = store.load(id).unwrap().unwrap();
        assert_eq!(loaded.version(), 1);
        assert_eq!(store.save(&loaded), Ok(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn stale_save_is_a_conflict() {
        let store = MemoryStore::new();
        let id = store.next_id().unwrap();
        store
            .save(&GameSession::new(id, PlayerId::from("alice")))
            .unwrap();

        let first = store.load(id).unwrap().unwrap();
        let second = store.load(id).unwrap().unwrap();
        store.save(&first).unwrap();
        assert_eq!(
            store.save(&second),
            Err(StoreError::Conflict {
                id,
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn missing_session_loads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.load(SessionId::from(42)), Ok(None));
    }
}
