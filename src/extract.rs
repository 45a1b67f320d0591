//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::types::{is_truthy, ValidationError};

/// A JSON body that may be absent.
///
/// An empty body, `null`, `{}` or `[]` all extract as `None` so handlers can
/// decide what a missing body means. Malformed JSON, a non-object body, or an
/// object that does not fit `T` is rejected as a bad request.
pub struct JsonBody<T>(pub Option<T>);

impl<T> JsonBody<T> {
    /// The body, or a bad request when it is absent.
    pub fn required(self) -> Result<T, ApiError> {
        self.0.ok_or(ApiError::BadRequest(ValidationError::MissingBody))
    }
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::BadRequest(ValidationError::MalformedBody))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(None));
        }

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|_| ApiError::BadRequest(ValidationError::MalformedBody))?;
        if !is_truthy(&value) {
            return Ok(Self(None));
        }
        // Serde would otherwise accept an array as a struct in sequence form.
        if !value.is_object() {
            return Err(ApiError::BadRequest(ValidationError::MalformedBody));
        }

        let body = serde_json::from_value(value)
            .map_err(|_| ApiError::BadRequest(ValidationError::MalformedBody))?;
        Ok(Self(Some(body)))
    }
}
