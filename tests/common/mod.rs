#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use estate_admin::{
    AdminClient,
    config::AppConfig,
    session::{MemoryStorage, TOKEN_KEY, USER_KEY},
};
use std::{net::TcpListener, sync::Arc};
use wiremock::MockServer;

pub const TOKEN: &str = "token-123";
pub const USER_JSON: &str = r#"{"id":1,"name":"Admin","email":"admin@example.com","isAdmin":true}"#;

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

pub fn config(server: &MockServer) -> AppConfig {
    AppConfig::new(&server.uri()).expect("mock server uri is a valid base url")
}

/// Client over in-memory storage; the storage handle stays inspectable.
pub fn client_with(server: &MockServer, storage: &Arc<MemoryStorage>) -> AdminClient {
    AdminClient::new(&config(server), Arc::clone(storage)).expect("client builds")
}

pub fn logged_out() -> Arc<MemoryStorage> {
    Arc::new(MemoryStorage::new())
}

pub fn logged_in() -> Arc<MemoryStorage> {
    Arc::new(MemoryStorage::with_entries(&[
        (TOKEN_KEY, TOKEN),
        (USER_KEY, USER_JSON),
    ]))
}
