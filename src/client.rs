//! Wiring for the whole client: one session store, one gateway, and the
//! feature clients that share them.

use crate::{
    auth::AuthFacade,
    config::AppConfig,
    errors::AppError,
    gateway::RequestGateway,
    inquiries::InquiryClient,
    properties::PropertyClient,
    session::{FileStorage, KeyValueStorage, SessionStore},
};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct AdminClient {
    pub session: Arc<SessionStore>,
    pub gateway: RequestGateway,
    pub auth: AuthFacade,
    pub properties: PropertyClient,
    pub inquiries: InquiryClient,
}

impl AdminClient {
    /// Builds the client over the given storage and restores any persisted session.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be constructed.
    pub fn new(config: &AppConfig, storage: impl KeyValueStorage + 'static) -> Result<Self, AppError> {
        let session = Arc::new(SessionStore::new(storage));
        session.restore();

        let gateway = RequestGateway::new(config, Arc::clone(&session))?;
        Ok(Self {
            auth: AuthFacade::new(gateway.clone(), config.paths.clone()),
            properties: PropertyClient::new(gateway.clone(), config.paths.clone()),
            inquiries: InquiryClient::new(gateway.clone(), config.paths.clone()),
            session,
            gateway,
        })
    }

    /// Builds the client over the session file named in the config.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(config, FileStorage::new(config.session_file.clone()))
    }
}
