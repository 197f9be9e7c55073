//! Durable authentication state. `SessionStore` is the only owner of the
//! persisted token and user entries; everything else reads the session
//! through [`SessionStore::current`]. The token is held as a `SecretString`
//! and must never be logged.
//!
//! Persisted layout: two entries keyed `token` (opaque string) and `user`
//! (JSON-encoded [`User`]). Both are written and removed together.

pub mod storage;

use crate::errors::AppError;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{
    fmt,
    sync::{PoisonError, RwLock},
};
use tracing::{debug, warn};

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Backend record identifier; the platform has used both numeric ids and document ids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(formatter, "{id}"),
            Self::Text(id) => formatter.write_str(id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    /// Remaining backend fields, kept so persistence round-trips losslessly.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Current authentication state. `user` is only present if `token` is.
#[derive(Clone, Default)]
pub struct Session {
    token: Option<SecretString>,
    user: Option<User>,
}

impl Session {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            token: None,
            user: None,
        }
    }

    /// A session with a token and, when the backend supplied one, its user.
    #[must_use]
    pub fn new(token: SecretString, user: Option<User>) -> Self {
        Self {
            token: Some(token),
            user,
        }
    }

    #[must_use]
    pub const fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.token.is_none() && self.user.is_none()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        let same_token = match (&self.token, &other.token) {
            (Some(left), Some(right)) => left.expose_secret() == right.expose_secret(),
            (None, None) => true,
            _ => false,
        };
        same_token && self.user == other.user
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .finish()
    }
}

pub struct SessionStore {
    storage: Box<dyn KeyValueStorage>,
    current: RwLock<Session>,
}

impl SessionStore {
    /// Wraps a storage backend. The in-memory session starts empty until `restore`.
    #[must_use]
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            current: RwLock::new(Session::empty()),
        }
    }

    /// Store backed by an in-process map.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Rebuilds the session from persisted state.
    ///
    /// A missing token or user, or a user entry that does not parse, yields an
    /// empty session and purges whatever partial state was left behind.
    pub fn restore(&self) -> Session {
        let session = match self.read_persisted() {
            Ok(Some(session)) => session,
            Ok(None) => {
                self.purge();
                Session::empty()
            }
            Err(err) => {
                warn!("discarding persisted session: {err}");
                self.purge();
                Session::empty()
            }
        };

        debug!(
            authenticated = session.is_authenticated(),
            "session restored"
        );
        self.set_current(session.clone());
        session
    }

    /// Persists token and user together and updates the in-memory session.
    /// Without a user, only the token is kept and any stale user entry is removed.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if the user cannot be encoded or storage fails;
    /// the in-memory session is left unchanged in that case.
    pub fn save(&self, token: SecretString, user: Option<User>) -> Result<(), AppError> {
        match &user {
            Some(user) => {
                let encoded = serde_json::to_string(user)
                    .map_err(|err| AppError::Storage(format!("Failed to encode user: {err}")))?;
                self.storage.set_all(&[
                    (TOKEN_KEY, token.expose_secret()),
                    (USER_KEY, encoded.as_str()),
                ])?;
            }
            None => {
                self.storage
                    .replace(&[(TOKEN_KEY, token.expose_secret())], &[USER_KEY])?;
            }
        }

        debug!(has_user = user.is_some(), "session saved");
        self.set_current(Session::new(token, user));
        Ok(())
    }

    /// Removes both persisted entries and empties the in-memory session.
    /// Clearing an already empty store succeeds.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if persisted entries cannot be removed; the
    /// in-memory session is emptied regardless.
    pub fn clear(&self) -> Result<(), AppError> {
        self.set_current(Session::empty());
        self.storage.remove_all(&[TOKEN_KEY, USER_KEY])?;
        debug!("session cleared");
        Ok(())
    }

    /// In-memory session; never touches persistence.
    #[must_use]
    pub fn current(&self) -> Session {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_current(&self, session: Session) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    fn read_persisted(&self) -> Result<Option<Session>, AppError> {
        let token = self.storage.get(TOKEN_KEY)?.filter(|token| !token.is_empty());
        let user = self.storage.get(USER_KEY)?;

        let (Some(token), Some(user)) = (token, user) else {
            return Ok(None);
        };

        let user: User = serde_json::from_str(&user)
            .map_err(|err| AppError::Parse(format!("Persisted user is invalid: {err}")))?;

        Ok(Some(Session::new(SecretString::from(token), Some(user))))
    }

    fn purge(&self) {
        if let Err(err) = self.storage.remove_all(&[TOKEN_KEY, USER_KEY]) {
            warn!("failed to purge persisted session: {err}");
        }
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SessionStore")
            .field("current", &self.current())
            .finish_non_exhaustive()
    }
}
