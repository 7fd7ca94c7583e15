use std::ops::{Deref, DerefMut};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::debug;

use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::web::trace_ctx;

/// JSON body extractor that converts parse failures into the standard
/// 400 error shape instead of actix's default error response.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    /// Extract the inner value from the ValidatedJson wrapper
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for ValidatedJson<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let trace_id = trace_ctx::trace_id();

            // Collect the request body into BytesMut
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    debug!(trace_id = %trace_id, error = %e, "Failed to read request body chunk");
                    AppError::bad_request("Failed to read request body")
                })?;
                body.extend_from_slice(&chunk);
            }

            // Attempt to parse JSON
            let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
                let detail = classify_json_error(&e);

                debug!(
                    trace_id = %trace_id,
                    error = %Redacted(&e.to_string()),
                    body_size = body.len(),
                    "JSON parsing failed"
                );

                AppError::bad_request(detail)
            })?;

            Ok(ValidatedJson(parsed))
        })
    }
}

/// Classify serde_json::Error and return a sanitized error message
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            let line = error.line();
            format!("Invalid JSON at line {line}")
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "Invalid JSON: wrong types for one or more fields".to_string()
        }
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}
