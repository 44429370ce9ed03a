//! Simulated sign-in.
//!
//! There is no authentication backend: signing in writes a [`User`] record
//! to the store and signing out deletes it. Role checks go through
//! [`Capability`] rather than comparing role names at each call site.

use std::sync::Mutex;

use thiserror::Error;
use tracing::instrument;

use rethread_core::Capability;

use crate::models::User;
use crate::models::session::keys;
use crate::store::{KeyValueStore, StoreError, load_json, save_json};

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Nobody is signed in.
    #[error("not signed in")]
    NotSignedIn,

    /// The signed-in role lacks the required capability.
    #[error("{role} accounts cannot {capability:?}")]
    Forbidden {
        role: rethread_core::Role,
        capability: Capability,
    },

    /// Store error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Reads and writes the persisted session user.
pub struct SessionStore<S> {
    store: S,
    lock: Mutex<()>,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub const fn new(store: S) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Sign `user` in, replacing any existing session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the record cannot be written.
    #[instrument(skip(self, user), fields(email = %user.email, role = %user.role))]
    pub fn login(&self, user: &User) -> Result<(), SessionError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        save_json(&self.store, keys::USER, user)?;
        tracing::info!("User signed in");
        Ok(())
    }

    /// Sign out. Signing out with no session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the record cannot be removed.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), SessionError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        self.store.remove(keys::USER)?;
        tracing::info!("User signed out");
        Ok(())
    }

    /// The signed-in user, if any. A malformed record counts as no session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the store cannot be read.
    pub fn current_user(&self) -> Result<Option<User>, SessionError> {
        Ok(load_json(&self.store, keys::USER)?)
    }

    /// The signed-in user, provided their role grants `capability`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotSignedIn` with no session, or
    /// `SessionError::Forbidden` if the role lacks `capability`.
    pub fn require(&self, capability: Capability) -> Result<User, SessionError> {
        let user = self.current_user()?.ok_or(SessionError::NotSignedIn)?;
        if user.can(capability) {
            Ok(user)
        } else {
            tracing::warn!(role = %user.role, ?capability, "Capability check failed");
            Err(SessionError::Forbidden {
                role: user.role,
                capability,
            })
        }
    }
}
