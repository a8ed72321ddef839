//! # Client-side session store
//!
//! The backend issues a bearer token with the signed-in user's record. [`AuthStore`]
//! holds that pair and notifies subscribers whenever it changes (sign-in, sign-out,
//! profile refresh). Views subscribe once and mirror the user for their lifetime.
//!
//! On wasm the record is persisted to `localStorage` under [`persist::STORAGE_KEY`]
//! so a reload restores the session; [`AuthStore::restore`] drops it when the token
//! has expired.

mod flows;
mod persist;
pub mod token;

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::models::UserInfo;

pub use persist::STORAGE_KEY;

/// Token plus the user it was issued for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthRecord {
    pub token: String,
    pub user: UserInfo,
}

impl AuthRecord {
    pub fn is_valid(&self) -> bool {
        token::is_valid_at(&self.token, Utc::now())
    }
}

/// Shared, observable session. Clones share the same state.
#[derive(Debug, Clone)]
pub struct AuthStore {
    state: Arc<watch::Sender<Option<AuthRecord>>>,
    persistent: bool,
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthStore {
    /// An empty store kept in memory only.
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self {
            state: Arc::new(state),
            persistent: false,
        }
    }

    /// A store backed by browser storage, restored from the last saved session.
    pub fn restore() -> Self {
        let mut store = Self::new();
        store.persistent = true;
        match persist::load() {
            Some(record) if record.is_valid() => {
                tracing::info!(user = %record.user.id, "restored session");
                store.state.send_replace(Some(record));
            }
            Some(_) => {
                tracing::info!("stored session expired");
                persist::clear();
            }
            None => {}
        }
        store
    }

    /// Receiver notified on every change to the session.
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthRecord>> {
        self.state.subscribe()
    }

    pub fn record(&self) -> Option<AuthRecord> {
        self.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().as_ref().map(|r| r.token.clone())
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.state.borrow().as_ref().map(|r| r.user.clone())
    }

    /// Whether a session is held and its token has not expired.
    pub fn is_valid(&self) -> bool {
        self.state.borrow().as_ref().is_some_and(AuthRecord::is_valid)
    }

    pub fn save(&self, record: AuthRecord) {
        if self.persistent {
            persist::save(&record);
        }
        self.state.send_replace(Some(record));
    }

    /// Replace the user model, keeping the token. No-op when signed out.
    pub fn update_user(&self, user: UserInfo) {
        let Some(mut record) = self.record() else {
            return;
        };
        record.user = user;
        self.save(record);
    }

    pub fn clear(&self) {
        if self.persistent {
            persist::clear();
        }
        self.state.send_replace(None);
    }
}

#[cfg(test)]
mod tests {
    use super::token::token_expiring_at;
    use super::*;

    fn user(name: &str) -> UserInfo {
        UserInfo {
            id: "u1".into(),
            collection_id: "_pb_users_auth_".into(),
            collection_name: "users".into(),
            email: "ada@example.com".into(),
            name: name.into(),
            avatar: String::new(),
            verified: true,
        }
    }

    fn record(exp: i64) -> AuthRecord {
        AuthRecord {
            token: token_expiring_at(exp),
            user: user("Ada"),
        }
    }

    #[test]
    fn subscribers_see_changes() {
        let store = AuthStore::new();
        let rx = store.subscribe();
        assert!(rx.borrow().is_none());

        store.save(record(4_000_000_000));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow().as_ref().map(|r| r.user.name.as_str()), Some("Ada"));
        assert!(store.is_valid());

        store.clear();
        assert!(rx.borrow().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn expired_session_is_not_valid() {
        let store = AuthStore::new();
        store.save(record(1_000_000_000));
        assert!(store.user().is_some());
        assert!(!store.is_valid());
    }

    #[test]
    fn update_user_keeps_token() {
        let store = AuthStore::new();
        store.update_user(user("Nobody"));
        assert!(store.record().is_none());

        store.save(record(4_000_000_000));
        let token = store.token();
        store.update_user(user("Grace"));
        assert_eq!(store.token(), token);
        assert_eq!(store.user().unwrap().name, "Grace");
    }

    #[test]
    fn clones_share_state() {
        let store = AuthStore::new();
        let other = store.clone();
        other.save(record(4_000_000_000));
        assert!(store.user().is_some());
    }

    #[test]
    fn restore_without_storage_is_signed_out() {
        assert!(AuthStore::restore().record().is_none());
    }
}
