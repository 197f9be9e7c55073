//! Request and response payloads for the auth endpoints. Credentials carry a
//! password, so they must never be logged.

use crate::session::User;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl Registration {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Login result; `user` may be absent even when a token is issued.
#[derive(Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

impl LoginResponse {
    /// The user record, if present and well-formed.
    pub fn user(&self) -> Option<User> {
        let user = self.user.as_ref().filter(|user| !user.is_null())?;
        serde_json::from_value(user.clone()).ok()
    }
}

#[derive(Deserialize)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// "Who am I" payload: `{user}`, the older `{success, loggedUser}`, or a bare record.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum CurrentUserResponse {
    Wrapped { user: User },
    Legacy {
        #[serde(rename = "loggedUser")]
        logged_user: User,
    },
    Bare(User),
}

impl CurrentUserResponse {
    pub fn into_user(self) -> User {
        match self {
            Self::Wrapped { user } => user,
            Self::Legacy { logged_user } => logged_user,
            Self::Bare(user) => user,
        }
    }
}
