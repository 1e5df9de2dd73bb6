//! Comment routes: lookup, vote adjustment and deletion of single
//! comments. Creation and listing live under the owning review.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use meeple_store::Comment;

use crate::body::JsonObject;
use crate::error::{ApiResult, ErrorBody};
use crate::routes::parse_id;
use crate::state::AppState;

/// Envelope for a single comment.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    /// The addressed comment.
    #[schema(value_type = Object)]
    pub comment: Comment,
}

/// Mounts the comment routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/comments/:comment_id",
        get(get_comment).patch(patch_comment).delete(delete_comment),
    )
}

/// Serves one comment by id.
#[utoipa::path(
    get,
    path = "/api/comments/{comment_id}",
    tag = "comments",
    params(("comment_id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "The addressed comment", body = CommentResponse),
        (status = 400, description = "Non-numeric id", body = ErrorBody),
        (status = 404, description = "No such comment", body = ErrorBody),
    )
)]
pub(crate) async fn get_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> ApiResult<Json<CommentResponse>> {
    let comment = state.comments.get(parse_id(&comment_id)?).await?;
    Ok(Json(CommentResponse { comment }))
}

/// Adjusts a comment's votes by the body's `inc_votes`.
#[utoipa::path(
    patch,
    path = "/api/comments/{comment_id}",
    tag = "comments",
    params(("comment_id" = i64, Path, description = "Comment id")),
    responses(
        (status = 200, description = "The updated comment", body = CommentResponse),
        (status = 400, description = "Malformed or incomplete body", body = ErrorBody),
        (status = 404, description = "No such comment", body = ErrorBody),
    )
)]
pub(crate) async fn patch_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
    body: JsonObject,
) -> ApiResult<Json<CommentResponse>> {
    let delta = body.require_int("inc_votes")?;
    let comment = state
        .comments
        .adjust_votes(parse_id(&comment_id)?, delta)
        .await?;
    Ok(Json(CommentResponse { comment }))
}

/// Deletes a comment.
#[utoipa::path(
    delete,
    path = "/api/comments/{comment_id}",
    tag = "comments",
    params(("comment_id" = i64, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, description = "No such comment", body = ErrorBody),
    )
)]
pub(crate) async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.comments.delete(parse_id(&comment_id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
