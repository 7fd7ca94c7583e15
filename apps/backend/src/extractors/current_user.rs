use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Authenticated identity bound to the request by the auth middleware
/// after a bearer token validated.
///
/// Lives for one request: written once by the middleware, read by
/// handlers, discarded with the request. Extracting it on a request with
/// no bound identity is the resource-level "authentication required"
/// check and yields 401.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub email: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        std::future::ready(
            req.extensions()
                .get::<CurrentUser>()
                .cloned()
                .ok_or_else(AppError::unauthorized),
        )
    }
}
