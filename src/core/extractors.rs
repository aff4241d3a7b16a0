//! Axum extractors for record requests
//!
//! Both extractors reject with a [`SuiteError`], so malformed ids and bodies
//! come back in the same JSON error shape as every other failure.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::core::error::{RequestError, SuiteError};

/// Internal record id taken from the `{id}` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = SuiteError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| RequestError::InvalidRecordId {
                id: rejection.body_text(),
            })?;

        raw.parse::<i64>()
            .map(RecordId)
            .map_err(|_| RequestError::InvalidRecordId { id: raw }.into())
    }
}

/// JSON body extractor whose rejection is a typed [`RequestError::InvalidBody`]
#[derive(Debug, Clone)]
pub struct RecordJson<T>(pub T);

impl<T, S> FromRequest<S> for RecordJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = SuiteError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| RequestError::InvalidBody {
                message: rejection.body_text(),
            })?;
        Ok(RecordJson(value))
    }
}
