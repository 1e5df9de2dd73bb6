//! Top-level router assembly.

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower::limit::ConcurrencyLimitLayer;
use tower::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, ErrorBody};
use crate::routes;
use crate::state::AppState;

/// Assembles the application router over `state`.
#[must_use]
pub fn app_router(state: AppState) -> Router {
    let request_timeout = state.config.request_timeout;
    let concurrency_limit = state.config.concurrency_limit;

    let router = Router::new()
        .merge(routes::api::routes())
        .merge(routes::categories::routes())
        .merge(routes::reviews::routes())
        .merge(routes::comments::routes())
        .merge(routes::users::routes())
        .method_not_allowed_fallback(unknown_route)
        .fallback(unknown_route)
        .layer(TraceLayer::new_for_http());

    let router = match concurrency_limit {
        Some(limit) => router.layer(ConcurrencyLimitLayer::new(limit)),
        None => router,
    };

    let router = match request_timeout {
        Some(timeout) => router.layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .layer(TimeoutLayer::new(timeout)),
        ),
        None => router,
    };

    router.with_state(state)
}

/// Unmatched paths and unmatched methods on matched paths both answer
/// with the canonical not-found shape.
async fn unknown_route() -> ApiError {
    ApiError::not_found("Route")
}

async fn handle_timeout_error(_err: tower::BoxError) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorBody {
            msg: "Request timed out".to_string(),
        }),
    )
}
