use crate::{
    auth::types::{Credentials, CurrentUserResponse, LoginResponse, MessageResponse, Registration},
    config::ApiPaths,
    errors::AppError,
    gateway::{Method, Payload, RequestGateway, decode, ensure_success, response},
    session::{Session, SessionStore, User},
};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{debug, info, warn};

const LOGIN_WITHOUT_TOKEN: &str = "Login response did not include a token.";
const NOT_LOGGED_IN: &str = "Not logged in. Please log in first.";

/// Session-affecting operations layered over the gateway and the session store.
#[derive(Clone, Debug)]
pub struct AuthFacade {
    gateway: RequestGateway,
    paths: ApiPaths,
}

impl AuthFacade {
    #[must_use]
    pub const fn new(gateway: RequestGateway, paths: ApiPaths) -> Self {
        Self { gateway, paths }
    }

    fn session(&self) -> &Arc<SessionStore> {
        self.gateway.session()
    }

    /// Logs in and persists the issued token (and user, when returned).
    ///
    /// # Errors
    /// Returns `AppError::Auth` when the backend rejects the credentials or
    /// issues no token. Transport failures are returned unchanged so callers
    /// can tell a bad password from an unreachable server.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AppError> {
        let payload = Payload::json(credentials)
            .map_err(|err| AppError::Serialization(format!("Failed to encode login: {err}")))?;

        let body = match self.gateway.send(&self.paths.login, Method::Post, payload).await {
            Ok(body) => body,
            Err(AppError::Backend { status, message }) => {
                return Err(AppError::Auth {
                    message,
                    status: Some(status),
                });
            }
            Err(err) => return Err(err),
        };

        let login: LoginResponse = decode(body.clone()).map_err(|err| AppError::Auth {
            message: err.message().to_string(),
            status: None,
        })?;

        let user = login.user();
        let Some(token) = login.token.filter(|token| !token.trim().is_empty()) else {
            let message = response::error_message(&body)
                .unwrap_or_else(|| LOGIN_WITHOUT_TOKEN.to_string());
            return Err(AppError::Auth {
                message,
                status: None,
            });
        };

        if user.is_none() {
            warn!("login returned a token without a usable user record");
        }

        self.session().save(SecretString::from(token), user)?;
        info!("logged in");
        Ok(self.session().current())
    }

    /// Registers a new account. Registration does not log the user in.
    ///
    /// # Errors
    /// Returns the normalized gateway failure.
    pub async fn register(&self, details: &Registration) -> Result<String, AppError> {
        let payload = Payload::json(details).map_err(|err| {
            AppError::Serialization(format!("Failed to encode registration: {err}"))
        })?;

        let body = self
            .gateway
            .send(&self.paths.register, Method::Post, payload)
            .await?;
        let body = ensure_success(body, 200, "Registration failed.")?;
        let message = decode::<MessageResponse>(body)
            .ok()
            .and_then(|registered| registered.message);

        Ok(message.unwrap_or_else(|| "Registration successful.".to_string()))
    }

    /// Fetches the authenticated user and refreshes the cached record.
    ///
    /// # Errors
    /// Returns `AppError::Session` when no token is held or the backend no
    /// longer accepts it; the session is cleared in the latter case. Other
    /// failures are returned as normalized by the gateway.
    pub async fn fetch_current_user(&self) -> Result<User, AppError> {
        let Some(token) = self.session().current().token().cloned() else {
            return Err(AppError::Session(NOT_LOGGED_IN.to_string()));
        };

        let body = match self
            .gateway
            .send(&self.paths.current_user, Method::Get, Payload::empty())
            .await
        {
            Ok(body) => body,
            Err(AppError::Backend {
                status: 401,
                message,
            }) => {
                debug!("token rejected, clearing session");
                self.session().clear()?;
                return Err(AppError::Session(message));
            }
            Err(err) => return Err(err),
        };

        let body = ensure_success(body, 200, "Failed to load the current user.")?;
        let user = decode::<CurrentUserResponse>(body)?.into_user();
        self.session().save(token, Some(user.clone()))?;
        Ok(user)
    }

    /// Clears the session. Any navigation afterwards is up to the caller.
    ///
    /// # Errors
    /// Returns `AppError::Storage` if persisted entries cannot be removed.
    pub fn logout(&self) -> Result<(), AppError> {
        self.session().clear()?;
        info!("logged out");
        Ok(())
    }
}
