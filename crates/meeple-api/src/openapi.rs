//! `OpenAPI` specification generation for the review API.
//!
//! The generated spec complements the runtime catalog served from `/api`:
//! the catalog is for API consumers at runtime, the spec for client
//! generation and change detection in CI.

use utoipa::OpenApi;

/// `OpenAPI` documentation for the review REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Meeple API",
        description = "Board-game review REST API"
    ),
    paths(
        crate::routes::api::get_endpoints,
        crate::routes::categories::get_categories,
        crate::routes::categories::post_category,
        crate::routes::categories::get_category,
        crate::routes::categories::patch_category,
        crate::routes::categories::delete_category,
        crate::routes::reviews::get_reviews,
        crate::routes::reviews::post_review,
        crate::routes::reviews::get_review,
        crate::routes::reviews::patch_review,
        crate::routes::reviews::delete_review,
        crate::routes::reviews::get_review_comments,
        crate::routes::reviews::post_review_comment,
        crate::routes::comments::get_comment,
        crate::routes::comments::patch_comment,
        crate::routes::comments::delete_comment,
        crate::routes::users::get_users,
        crate::routes::users::post_user,
        crate::routes::users::get_user,
        crate::routes::users::patch_user,
        crate::routes::users::delete_user,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::routes::categories::CategoriesResponse,
        crate::routes::categories::CategoryResponse,
        crate::routes::reviews::ReviewsResponse,
        crate::routes::reviews::ReviewResponse,
        crate::routes::reviews::UpdatedReviewResponse,
        crate::routes::reviews::CommentsResponse,
        crate::routes::comments::CommentResponse,
        crate::routes::users::UsersResponse,
        crate::routes::users::UserResponse,
    )),
    tags(
        (name = "discovery", description = "Endpoint catalog"),
        (name = "categories", description = "Category operations"),
        (name = "reviews", description = "Review operations"),
        (name = "comments", description = "Comment operations"),
        (name = "users", description = "User operations"),
    )
)]
pub struct ApiDoc;

/// Returns the generated `OpenAPI` spec.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Returns the generated spec serialized as pretty JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails (should not happen).
pub fn openapi_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&openapi())
}
