//! Request extractors with this API's rejection rules.
//!
//! axum's own `Json` rejects missing fields with 422; this API reports every
//! unreadable body as 400 and a non-JSON `Content-Type` as 415. List
//! queries keep the first value of a repeated key instead of failing.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{AppError, EXPECTED_JSON, MALFORMED_DATA};

/// Deserializes the request body as `T` after checking `Content-Type`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(req.headers()) {
            return Err(AppError::UnsupportedMediaType(EXPECTED_JSON.into()));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            tracing::debug!(error = %e, "Rejected malformed JSON body");
            AppError::BadRequest(MALFORMED_DATA.into())
        })
    }
}

/// Deserializes the query string as `T`, where `T` has only optional
/// string fields. Unknown keys are ignored.
#[derive(Debug, Clone)]
pub struct ListQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ListQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        serde_json::from_value(Value::Object(first_values(pairs)))
            .map(ListQuery)
            .map_err(|e| AppError::BadRequest(format!("Invalid query string: {e}")))
    }
}

/// Collapse query pairs to one value per key, keeping the first occurrence.
pub fn first_values(pairs: Vec<(String, String)>) -> Map<String, Value> {
    let mut map = Map::new();
    for (key, value) in pairs {
        map.entry(key).or_insert(Value::String(value));
    }
    map
}

/// Whether the media type of `Content-Type` is `application/json`.
/// Parameters such as `charset` are ignored.
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|media| media.trim().eq_ignore_ascii_case("application/json"))
}
