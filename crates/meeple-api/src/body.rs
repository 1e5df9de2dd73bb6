//! JSON body extraction with the API's canonical failure messages.

use axum::Json;
use axum::async_trait;
use axum::extract::{FromRequest, Request};
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};

/// A request body that parsed as a JSON object.
///
/// Unparsable bodies and non-object payloads reject with the body-format
/// error rather than axum's default rejection text, so every client sees
/// the same `{"msg": ...}` shape.
#[derive(Debug)]
pub struct JsonObject(pub Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|_| ApiError::bad_body_format())?;
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(ApiError::bad_body_format()),
        }
    }
}

impl JsonObject {
    /// A required string field. Absent or null fields are an
    /// insufficient-information error, non-string values an invalid request.
    pub fn require_str(&self, field: &str) -> ApiResult<String> {
        match self.0.get(field) {
            None | Some(Value::Null) => Err(ApiError::insufficient_information()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(ApiError::invalid_request()),
        }
    }

    /// An optional string field; a present non-string is an invalid request.
    pub fn optional_str(&self, field: &str) -> ApiResult<Option<String>> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(ApiError::invalid_request()),
        }
    }

    /// A required integer field; fractions, strings and booleans are an
    /// invalid request.
    pub fn require_int(&self, field: &str) -> ApiResult<i64> {
        match self.0.get(field) {
            None | Some(Value::Null) => Err(ApiError::insufficient_information()),
            Some(Value::Number(n)) => n.as_i64().ok_or_else(ApiError::invalid_request),
            Some(_) => Err(ApiError::invalid_request()),
        }
    }
}
