use std::collections::BTreeMap;
use std::sync::LazyLock;

use actix_web::{web, HttpResponse};
use regex::Regex;
use serde::Deserialize;

use crate::auth::policy::PasswordPolicy;
use crate::error::AppError;
use crate::extractors::validated_json::ValidatedJson;
use crate::services::auth as auth_service;
use crate::state::app_state::AppState;

/// SAFETY: This regex pattern is a vetted literal that compiles successfully
fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}$").unwrap()
    });
    &EMAIL_REGEX
}

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl SignUpRequest {
    fn validate(&self, policy: &PasswordPolicy) -> Result<(), AppError> {
        let mut errors = BTreeMap::new();

        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), "Name is required".to_string());
        }

        if self.email.trim().is_empty() {
            errors.insert("email".to_string(), "Email is required".to_string());
        } else if !email_regex().is_match(&self.email) {
            errors.insert("email".to_string(), "Email should be valid".to_string());
        }

        if self.password.is_empty() {
            errors.insert("password".to_string(), "Password is required".to_string());
        } else if let Err(message) = policy.check(&self.password) {
            errors.insert("password".to_string(), message);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(errors))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    fn validate(&self) -> Result<(), AppError> {
        let mut errors = BTreeMap::new();

        if self.email.trim().is_empty() {
            errors.insert("email".to_string(), "Email is required".to_string());
        }
        if self.password.is_empty() {
            errors.insert("password".to_string(), "Password is required".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(errors))
        }
    }
}

async fn sign_up(
    req: ValidatedJson<SignUpRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    req.validate(&app_state.security().password_policy)?;

    let response = auth_service::sign_up(
        app_state.users(),
        app_state.security(),
        req.name.trim(),
        &req.email,
        &req.password,
    )
    .await?;

    Ok(HttpResponse::Created().json(response))
}

async fn login(
    req: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    req.validate()?;

    let response =
        auth_service::login(app_state.users(), app_state.security(), &req.email, &req.password)
            .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Liveness endpoint, exempt from authentication.
async fn health() -> HttpResponse {
    HttpResponse::Ok().body("Auth service is healthy")
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/signup").route(web::post().to(sign_up)))
        .service(web::resource("/login").route(web::post().to(login)))
        .service(web::resource("/health").route(web::get().to(health)));
}
