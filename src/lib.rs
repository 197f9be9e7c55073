//! # Estate Admin
//!
//! Client for the real-estate listing platform's admin backend. It signs an
//! admin in, keeps the session across restarts and manages property listings
//! and inbound inquiries over the platform's REST API.
//!
//! ## Session & Requests
//!
//! - **Session:** [`session::SessionStore`] owns the persisted bearer token and
//!   user record. Both are written and removed together, and a corrupt record
//!   on start-up degrades to "logged out" and is purged.
//! - **Gateway:** [`gateway::RequestGateway`] is the only path to the backend.
//!   It attaches `Authorization: Bearer` whenever a token is held, leaves the
//!   content type to the transport for multipart uploads and reduces every
//!   failure to a message plus an optional status code ([`errors::AppError`]).
//! - **Auth:** [`auth::AuthFacade`] logs in, registers, looks up the current user
//!   and logs out. Navigation after logout is the caller's concern.
//!
//! Endpoint paths and the base address are configuration
//! ([`config::AppConfig`]), never per-call constants.

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod inquiries;
pub mod properties;
pub mod session;

pub use client::AdminClient;
pub use errors::{AppError, NormalizedResult};

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
