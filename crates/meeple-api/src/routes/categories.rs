//! Category routes: listing, lookup and CRUD.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use meeple_store::{Category, CategoryQuery, NewCategory};

use crate::body::JsonObject;
use crate::error::{ApiResult, ErrorBody};
use crate::state::AppState;

/// Envelope for a category listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoriesResponse {
    /// One page of categories.
    #[schema(value_type = Vec<Object>)]
    pub categories: Vec<Category>,
}

/// Envelope for a single category.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    /// The addressed category.
    #[schema(value_type = Object)]
    pub category: Category,
}

/// Mounts the category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/categories", get(get_categories).post(post_category))
        .route(
            "/api/categories/:slug",
            get(get_category)
                .patch(patch_category)
                .delete(delete_category),
        )
}

/// Lists categories, sorted and paginated by the query string.
#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "categories",
    responses((status = 200, description = "One page of categories", body = CategoriesResponse))
)]
pub(crate) async fn get_categories(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<CategoriesResponse>> {
    let query = CategoryQuery::from_query(&params);
    let categories = state.categories.list(&query).await?;
    Ok(Json(CategoriesResponse { categories }))
}

/// Creates a category.
#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "categories",
    responses(
        (status = 201, description = "The stored category", body = CategoryResponse),
        (status = 400, description = "Malformed or incomplete body", body = ErrorBody),
        (status = 409, description = "Slug already taken", body = ErrorBody),
    )
)]
pub(crate) async fn post_category(
    State(state): State<AppState>,
    body: JsonObject,
) -> ApiResult<(StatusCode, Json<CategoryResponse>)> {
    let new = NewCategory {
        slug: body.require_str("slug")?,
        description: body.require_str("description")?,
    };
    let category = state.categories.insert(&new).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse { category })))
}

/// Serves one category by slug.
#[utoipa::path(
    get,
    path = "/api/categories/{slug}",
    tag = "categories",
    params(("slug" = String, Path, description = "Category slug")),
    responses(
        (status = 200, description = "The addressed category", body = CategoryResponse),
        (status = 404, description = "No such category", body = ErrorBody),
    )
)]
pub(crate) async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<CategoryResponse>> {
    let category = state.categories.get(&slug).await?;
    Ok(Json(CategoryResponse { category }))
}

/// Replaces a category's description.
#[utoipa::path(
    patch,
    path = "/api/categories/{slug}",
    tag = "categories",
    params(("slug" = String, Path, description = "Category slug")),
    responses(
        (status = 200, description = "The updated category", body = CategoryResponse),
        (status = 404, description = "No such category", body = ErrorBody),
    )
)]
pub(crate) async fn patch_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    body: JsonObject,
) -> ApiResult<Json<CategoryResponse>> {
    let description = body.require_str("description")?;
    let category = state
        .categories
        .update_description(&slug, &description)
        .await?;
    Ok(Json(CategoryResponse { category }))
}

/// Deletes a category; its reviews and their comments cascade away.
#[utoipa::path(
    delete,
    path = "/api/categories/{slug}",
    tag = "categories",
    params(("slug" = String, Path, description = "Category slug")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "No such category", body = ErrorBody),
    )
)]
pub(crate) async fn delete_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<StatusCode> {
    state.categories.delete(&slug).await?;
    Ok(StatusCode::NO_CONTENT)
}
