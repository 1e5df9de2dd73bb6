//! The API's error taxonomy and wire shape.
//!
//! Every failure leaves the service as `{"msg": "..."}` with a canonical
//! message per kind, regardless of where it originated.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use meeple_store::StoreError;

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Wire shape of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub msg: String,
}

/// An API failure: the status it maps to plus the client-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// The request body was unparsable or not a JSON object.
    #[must_use]
    pub fn bad_body_format() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid body format".to_string(),
        }
    }

    /// A required body field is missing.
    #[must_use]
    pub fn insufficient_information() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Insufficient information to make request".to_string(),
        }
    }

    /// A path or body value has the wrong shape.
    #[must_use]
    pub fn invalid_request() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid request".to_string(),
        }
    }

    /// The addressed entity does not exist.
    #[must_use]
    pub fn not_found(entity: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("{entity} not found"),
        }
    }

    /// A body field references a row that does not exist.
    #[must_use]
    pub fn missing_reference() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "Referenced resource not found".to_string(),
        }
    }

    /// A unique key is already taken.
    #[must_use]
    pub fn conflict(entity: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: format!("{entity} already exists"),
        }
    }

    /// Unspecified server-side failure; details stay in the logs.
    #[must_use]
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "Internal server error".to_string(),
        }
    }

    /// The HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { msg: self.message })).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity } => Self::not_found(entity),
            StoreError::AlreadyExists { entity } => Self::conflict(entity),
            StoreError::MissingReference => Self::missing_reference(),
            StoreError::Database(source) => {
                tracing::error!(error = %source, "store failure");
                Self::internal()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_messages_and_statuses() {
        let cases = [
            (ApiError::bad_body_format(), 400, "Invalid body format"),
            (
                ApiError::insufficient_information(),
                400,
                "Insufficient information to make request",
            ),
            (ApiError::invalid_request(), 400, "Invalid request"),
            (ApiError::not_found("Review"), 404, "Review not found"),
            (
                ApiError::missing_reference(),
                404,
                "Referenced resource not found",
            ),
            (
                ApiError::conflict("Category"),
                409,
                "Category already exists",
            ),
            (ApiError::internal(), 500, "Internal server error"),
        ];
        for (error, status, message) in cases {
            assert_eq!(error.status().as_u16(), status);
            assert_eq!(error.message(), message);
        }
    }

    #[test]
    fn store_errors_map_onto_the_taxonomy() {
        let err: ApiError = StoreError::NotFound { entity: "User" }.into();
        assert_eq!(err, ApiError::not_found("User"));

        let err: ApiError = StoreError::AlreadyExists { entity: "Category" }.into();
        assert_eq!(err, ApiError::conflict("Category"));

        let err: ApiError = StoreError::MissingReference.into();
        assert_eq!(err, ApiError::missing_reference());
    }
}
