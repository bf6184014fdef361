// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory session store: the single writer for core API tokens.
//!
//! One entry per logged-in browser session, keyed by the session id carried
//! in the gateway JWT. Every authenticated upstream call reads the access
//! token from here at call time, so removing an entry immediately stops any
//! further use of its tokens.

use crate::models::{TokenPair, User};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

/// Token pair plus cached profile for one session.
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub token: TokenPair,
    pub user: User,
    /// Login time; entries older than the JWT lifetime are swept.
    pub created_at: DateTime<Utc>,
}

/// Process-wide session store.
///
/// All mutation goes through methods on this type; readers get clones.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<Uuid, SessionEntry>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly logged-in session and return its id.
    pub fn insert(&self, token: TokenPair, user: User) -> Uuid {
        let session_id = Uuid::new_v4();
        self.sessions.insert(
            session_id,
            SessionEntry {
                token,
                user,
                created_at: Utc::now(),
            },
        );
        session_id
    }

    /// Look up a session. None means logged out or never logged in.
    pub fn get(&self, session_id: Uuid) -> Option<SessionEntry> {
        self.sessions.get(&session_id).map(|e| e.value().clone())
    }

    /// Current access token for a session, read at call time.
    pub fn access_token(&self, session_id: Uuid) -> Option<String> {
        self.sessions
            .get(&session_id)
            .map(|e| e.value().token.access.clone())
    }

    /// Replace the token pair after a refresh.
    pub fn set_token(&self, session_id: Uuid, token: TokenPair) {
        if let Some(mut entry) = self.sessions.get_mut(&session_id) {
            entry.token = token;
        }
    }

    /// Replace the cached profile after a re-fetch or profile edit.
    pub fn set_user(&self, session_id: Uuid, user: User) {
        if let Some(mut entry) = self.sessions.get_mut(&session_id) {
            entry.user = user;
        }
    }

    /// Remove a session. Used by logout and forced logout on auth failure.
    pub fn remove(&self, session_id: Uuid) -> bool {
        self.sessions.remove(&session_id).is_some()
    }

    /// Drop sessions older than `ttl`.
    ///
    /// The gateway JWT expires after the same interval, so an entry past it
    /// can never be reached again; the sweep reclaims it. A browser that
    /// simply closes never calls logout, which is why this exists.
    /// Returns the number dropped.
    pub fn evict_expired(&self, ttl: chrono::Duration) -> usize {
        let cutoff = Utc::now() - ttl;
        let before = self.sessions.len();
        self.sessions.retain(|_, e| e.created_at > cutoff);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn test_user() -> User {
        User {
            id: 42,
            email: "member@example.com".to_string(),
            first_name: "Test".to_string(),
            last_name: "Member".to_string(),
            role: Role::Member,
            phone_number: None,
            address: None,
            profile_picture_url: None,
            join_date: None,
        }
    }

    fn test_token() -> TokenPair {
        TokenPair {
            access: "access-1".to_string(),
            refresh: "refresh-1".to_string(),
        }
    }

    #[test]
    fn test_insert_and_read_back() {
        let store = SessionStore::new();
        let id = store.insert(test_token(), test_user());

        let entry = store.get(id).expect("session should exist");
        assert_eq!(entry.user.id, 42);
        assert_eq!(store.access_token(id).as_deref(), Some("access-1"));
    }

    #[test]
    fn test_remove_clears_token_reads() {
        let store = SessionStore::new();
        let id = store.insert(test_token(), test_user());

        assert!(store.remove(id));
        assert!(store.get(id).is_none());
        assert!(store.access_token(id).is_none());
        // Second remove is a no-op
        assert!(!store.remove(id));
    }

    #[test]
    fn test_set_token_replaces_pair() {
        let store = SessionStore::new();
        let id = store.insert(test_token(), test_user());

        store.set_token(
            id,
            TokenPair {
                access: "access-2".to_string(),
                refresh: "refresh-2".to_string(),
            },
        );

        assert_eq!(store.access_token(id).as_deref(), Some("access-2"));
        assert_eq!(store.get(id).unwrap().token.refresh, "refresh-2");
    }

    #[test]
    fn test_set_token_on_missing_session_is_noop() {
        let store = SessionStore::new();
        store.set_token(Uuid::new_v4(), test_token());
        assert!(store.is_empty());
    }

    #[test]
    fn test_evict_expired_drops_only_old_sessions() {
        let store = SessionStore::new();
        let id = store.insert(test_token(), test_user());

        // Fresh session survives a generous TTL
        assert_eq!(store.evict_expired(chrono::Duration::days(30)), 0);
        assert!(store.get(id).is_some());

        // Zero TTL evicts everything
        assert_eq!(store.evict_expired(chrono::Duration::zero()), 1);
        assert!(store.get(id).is_none());
    }
}
