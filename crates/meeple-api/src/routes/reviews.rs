//! Review routes: filtered listing with totals, lookup with comment
//! aggregates, vote adjustment and CRUD, plus the per-review comment
//! collection.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use meeple_store::{
    Comment, CommentQuery, NewComment, NewReview, Review, ReviewDetail, ReviewQuery,
    ReviewSummary,
};

use crate::body::JsonObject;
use crate::error::{ApiResult, ErrorBody};
use crate::routes::comments::CommentResponse;
use crate::routes::parse_id;
use crate::state::AppState;

/// Envelope for a review listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewsResponse {
    /// One page of review summaries.
    #[schema(value_type = Vec<Object>)]
    pub reviews: Vec<ReviewSummary>,
    /// Reviews matching the filters, ignoring pagination.
    pub total_count: i64,
}

/// Envelope for a review with its comment aggregate.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    /// The addressed review.
    #[schema(value_type = Object)]
    pub review: ReviewDetail,
}

/// Envelope for an updated review row; updates return the row alone,
/// without the comment aggregate.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatedReviewResponse {
    /// The updated review.
    #[schema(value_type = Object)]
    pub review: Review,
}

/// Envelope for one review's comment listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentsResponse {
    /// One page of comments.
    #[schema(value_type = Vec<Object>)]
    pub comments: Vec<Comment>,
}

/// Mounts the review routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/reviews", get(get_reviews).post(post_review))
        .route(
            "/api/reviews/:review_id",
            get(get_review).patch(patch_review).delete(delete_review),
        )
        .route(
            "/api/reviews/:review_id/comments",
            get(get_review_comments).post(post_review_comment),
        )
}

/// Lists reviews, filtered, sorted and paginated by the query string.
#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = "reviews",
    responses((status = 200, description = "One page of reviews plus the filter-wide total", body = ReviewsResponse))
)]
pub(crate) async fn get_reviews(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<ReviewsResponse>> {
    let query = ReviewQuery::from_query(&params);
    let (reviews, total_count) = state.reviews.list(&query).await?;
    Ok(Json(ReviewsResponse {
        reviews,
        total_count,
    }))
}

/// Creates a review.
#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "reviews",
    responses(
        (status = 201, description = "The stored review", body = ReviewResponse),
        (status = 400, description = "Malformed or incomplete body", body = ErrorBody),
        (status = 404, description = "Unknown owner or category", body = ErrorBody),
    )
)]
pub(crate) async fn post_review(
    State(state): State<AppState>,
    body: JsonObject,
) -> ApiResult<(StatusCode, Json<ReviewResponse>)> {
    let new = NewReview {
        owner: body.require_str("owner")?,
        title: body.require_str("title")?,
        review_body: body.require_str("review_body")?,
        designer: body.optional_str("designer")?,
        category: body.require_str("category")?,
        review_img_url: body.optional_str("review_img_url")?,
    };
    let review = state.reviews.insert(&new).await?;
    Ok((StatusCode::CREATED, Json(ReviewResponse { review })))
}

/// Serves one review with its comment count.
#[utoipa::path(
    get,
    path = "/api/reviews/{review_id}",
    tag = "reviews",
    params(("review_id" = i64, Path, description = "Review id")),
    responses(
        (status = 200, description = "The addressed review", body = ReviewResponse),
        (status = 400, description = "Non-numeric id", body = ErrorBody),
        (status = 404, description = "No such review", body = ErrorBody),
    )
)]
pub(crate) async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> ApiResult<Json<ReviewResponse>> {
    let review = state.reviews.get(parse_id(&review_id)?).await?;
    Ok(Json(ReviewResponse { review }))
}

/// Adjusts a review's votes by the body's `inc_votes`.
#[utoipa::path(
    patch,
    path = "/api/reviews/{review_id}",
    tag = "reviews",
    params(("review_id" = i64, Path, description = "Review id")),
    responses(
        (status = 200, description = "The updated review", body = UpdatedReviewResponse),
        (status = 400, description = "Malformed or incomplete body", body = ErrorBody),
        (status = 404, description = "No such review", body = ErrorBody),
    )
)]
pub(crate) async fn patch_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    body: JsonObject,
) -> ApiResult<Json<UpdatedReviewResponse>> {
    let delta = body.require_int("inc_votes")?;
    let review = state.reviews.adjust_votes(parse_id(&review_id)?, delta).await?;
    Ok(Json(UpdatedReviewResponse { review }))
}

/// Deletes a review; its comments cascade away.
#[utoipa::path(
    delete,
    path = "/api/reviews/{review_id}",
    tag = "reviews",
    params(("review_id" = i64, Path, description = "Review id")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 404, description = "No such review", body = ErrorBody),
    )
)]
pub(crate) async fn delete_review(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.reviews.delete(parse_id(&review_id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lists one review's comments.
#[utoipa::path(
    get,
    path = "/api/reviews/{review_id}/comments",
    tag = "reviews",
    params(("review_id" = i64, Path, description = "Review id")),
    responses(
        (status = 200, description = "One page of the review's comments", body = CommentsResponse),
        (status = 404, description = "No such review", body = ErrorBody),
    )
)]
pub(crate) async fn get_review_comments(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<CommentsResponse>> {
    let query = CommentQuery::from_query(&params);
    let comments = state
        .comments
        .list_for_review(parse_id(&review_id)?, &query)
        .await?;
    Ok(Json(CommentsResponse { comments }))
}

/// Adds a comment to a review.
#[utoipa::path(
    post,
    path = "/api/reviews/{review_id}/comments",
    tag = "reviews",
    params(("review_id" = i64, Path, description = "Review id")),
    responses(
        (status = 201, description = "The stored comment", body = CommentResponse),
        (status = 400, description = "Malformed or incomplete body", body = ErrorBody),
        (status = 404, description = "Unknown review or author", body = ErrorBody),
    )
)]
pub(crate) async fn post_review_comment(
    State(state): State<AppState>,
    Path(review_id): Path<String>,
    body: JsonObject,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let new = NewComment {
        author: body.require_str("username")?,
        body: body.require_str("body")?,
    };
    let comment = state
        .comments
        .insert_for_review(parse_id(&review_id)?, &new)
        .await?;
    Ok((StatusCode::CREATED, Json(CommentResponse { comment })))
}
