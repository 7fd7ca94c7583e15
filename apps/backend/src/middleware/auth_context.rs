//! Request authorization middleware.
//!
//! Extracts a bearer token from the Authorization header, validates it,
//! and binds the authenticated identity to request extensions for the
//! rest of the request. It never rejects: requests with a missing or
//! invalid token continue anonymous and are refused at the resource
//! boundary by the `CurrentUser` extractor. Routes that don't require
//! identity (signup, login, health) are therefore unaffected by whatever
//! is in the header.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::auth::jwt::verify_access_token;
use crate::extractors::current_user::CurrentUser;
use crate::state::app_state::AppState;

pub struct AuthContext;

impl<S, B> Transform<S, ServiceRequest> for AuthContext
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthContextMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthContextMiddleware { service }))
    }
}

pub struct AuthContextMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthContextMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(token) = bearer_token(&req) {
            if let Some(app_state) = req.app_data::<web::Data<AppState>>() {
                match verify_access_token(&token, app_state.security()) {
                    Ok(claims) => {
                        req.extensions_mut().insert(CurrentUser {
                            user_id: claims.user_id,
                            email: claims.sub,
                        });
                    }
                    Err(_) => {
                        // Leave the request anonymous; routes that need
                        // identity reject it at the resource boundary.
                        debug!("bearer token rejected; continuing unauthenticated");
                    }
                }
            }
        }

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}

/// Parse "Bearer <token>" out of the Authorization header. Any deviation
/// from the expected shape yields None (anonymous), never an error.
fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
