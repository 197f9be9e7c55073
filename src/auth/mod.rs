//! Auth feature: login, registration, current-user lookup and logout. Login
//! persists the issued token through the session store; nothing else in the
//! crate writes session state. Credentials pass through here, so nothing in
//! this module logs request payloads.

pub mod client;
pub mod types;

pub use client::AuthFacade;
pub use types::{Credentials, Registration};
