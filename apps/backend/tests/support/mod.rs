//! Shared helpers for integration tests.

use std::time::{Duration, SystemTime};

use backend::infra::state::build_state;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use uuid::Uuid;

/// Security config shared by the tests; tokens minted with it validate
/// against app state built from it.
pub fn test_security() -> SecurityConfig {
    SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
}

/// App state backed by the in-memory stores, so no database is needed.
pub async fn memory_state(security: SecurityConfig) -> AppState {
    build_state()
        .with_memory()
        .with_security(security)
        .build()
        .await
        .expect("state should build")
}

/// Full Authorization header value including the "Bearer " prefix.
#[allow(dead_code)]
pub fn bearer_header(email: &str, user_id: Uuid, security: &SecurityConfig) -> String {
    let token = backend::mint_access_token(email, user_id, SystemTime::now(), security)
        .expect("should mint token successfully");
    format!("Bearer {token}")
}

/// Mint an already-expired token for expiry scenarios.
#[allow(dead_code)]
pub fn mint_expired_token(email: &str, user_id: Uuid, security: &SecurityConfig) -> String {
    let past = SystemTime::now() - Duration::from_secs(2 * security.token_ttl_secs as u64);
    backend::mint_access_token(email, user_id, past, security)
        .expect("should mint expired token successfully")
}
