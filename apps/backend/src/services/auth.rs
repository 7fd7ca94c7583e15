//! Signup and login orchestration over the credential store.

use std::time::SystemTime;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::jwt::mint_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::repos::users::{NewUser, UserStore};
use crate::state::security_config::SecurityConfig;

/// Response body returned by both signup and login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

pub async fn sign_up(
    store: &dyn UserStore,
    security: &SecurityConfig,
    name: &str,
    email: &str,
    password: &str,
) -> Result<TokenResponse, AppError> {
    if store.exists_by_email(email).await? {
        warn!(email = %Redacted(email), "signup rejected: email already registered");
        return Err(AppError::duplicate_email());
    }

    let password_hash = hash_password(password)?;

    // The store's unique constraint backstops the pre-check: a concurrent
    // duplicate insert surfaces as the same conflict.
    let user = store
        .save(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, email = %Redacted(&user.email), "user created");
    issue(security, &user.email, user.id)
}

pub async fn login(
    store: &dyn UserStore,
    security: &SecurityConfig,
    email: &str,
    password: &str,
) -> Result<TokenResponse, AppError> {
    // Unknown email and wrong password collapse into the same error value,
    // so the two cases are indistinguishable from the outside.
    let user = store
        .find_by_email(email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(password, &user.password_hash) {
        return Err(AppError::invalid_credentials());
    }

    info!(user_id = %user.id, "login succeeded");
    issue(security, &user.email, user.id)
}

fn issue(security: &SecurityConfig, email: &str, user_id: Uuid) -> Result<TokenResponse, AppError> {
    let token = mint_access_token(email, user_id, SystemTime::now(), security)?;
    Ok(TokenResponse {
        token,
        token_type: "Bearer",
        expires_in: security.token_ttl_secs,
    })
}
