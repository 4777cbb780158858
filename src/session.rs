//! The logged-in user for one running client.
//!
//! Created by the composition root and handed to whatever needs it; there is
//! no process-wide current user.

use std::sync::{Arc, RwLock};

use tokio::sync::watch;

use crate::models::User;

#[derive(Debug, Clone, Default)]
struct Credentials {
    user: Option<User>,
    access_token: Option<String>,
}

/// Shared handle to the current user and access token.
///
/// Cloning yields another handle onto the same session.
#[derive(Debug, Clone)]
pub struct Session {
    credentials: Arc<RwLock<Credentials>>,
    user_tx: Arc<watch::Sender<Option<User>>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A logged-out session.
    pub fn new() -> Self {
        let (user_tx, _) = watch::channel(None);
        Self {
            credentials: Arc::new(RwLock::new(Credentials::default())),
            user_tx: Arc::new(user_tx),
        }
    }

    pub fn login(&self, user: User, access_token: impl Into<String>) {
        tracing::info!(user_id = user.id, "session logged in");
        {
            let mut credentials = self.write();
            credentials.user = Some(user.clone());
            credentials.access_token = Some(access_token.into());
        }
        self.user_tx.send_replace(Some(user));
    }

    /// Replace the user record, keeping the token.
    pub fn refresh(&self, user: User) {
        {
            let mut credentials = self.write();
            if credentials.access_token.is_none() {
                return;
            }
            credentials.user = Some(user.clone());
        }
        self.user_tx.send_replace(Some(user));
    }

    pub fn logout(&self) {
        tracing::info!("session logged out");
        *self.write() = Credentials::default();
        self.user_tx.send_replace(None);
    }

    pub fn user(&self) -> Option<User> {
        self.read().user.clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().access_token.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().user.is_some()
    }

    /// Watch the current user; the receiver starts with the present value.
    pub fn observe(&self) -> watch::Receiver<Option<User>> {
        self.user_tx.subscribe()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Credentials> {
        self.credentials
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Credentials> {
        self.credentials
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
