//! User routes: listing, lookup and CRUD.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use meeple_store::{NewUser, User, UserPatch, UserQuery};

use crate::body::JsonObject;
use crate::error::{ApiError, ApiResult, ErrorBody};
use crate::state::AppState;

/// Envelope for a user listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct UsersResponse {
    /// One page of users.
    #[schema(value_type = Vec<Object>)]
    pub users: Vec<User>,
}

/// Envelope for a single user.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// The addressed user.
    #[schema(value_type = Object)]
    pub user: User,
}

/// Mounts the user routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(get_users).post(post_user))
        .route(
            "/api/users/:username",
            get(get_user).patch(patch_user).delete(delete_user),
        )
}

/// Lists users, sorted and paginated by the query string.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses((status = 200, description = "One page of users", body = UsersResponse))
)]
pub(crate) async fn get_users(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<UsersResponse>> {
    let query = UserQuery::from_query(&params);
    let users = state.users.list(&query).await?;
    Ok(Json(UsersResponse { users }))
}

/// Creates a user.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 201, description = "The stored user", body = UserResponse),
        (status = 400, description = "Malformed or incomplete body", body = ErrorBody),
        (status = 409, description = "Username already taken", body = ErrorBody),
    )
)]
pub(crate) async fn post_user(
    State(state): State<AppState>,
    body: JsonObject,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let new = NewUser {
        username: body.require_str("username")?,
        name: body.require_str("name")?,
        avatar_url: body.optional_str("avatar_url")?,
    };
    let user = state.users.insert(&new).await?;
    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

/// Serves one user by username.
#[utoipa::path(
    get,
    path = "/api/users/{username}",
    tag = "users",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "The addressed user", body = UserResponse),
        (status = 404, description = "No such user", body = ErrorBody),
    )
)]
pub(crate) async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.users.get(&username).await?;
    Ok(Json(UserResponse { user }))
}

/// Updates a user's name and/or avatar; at least one field is required.
#[utoipa::path(
    patch,
    path = "/api/users/{username}",
    tag = "users",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "The updated user", body = UserResponse),
        (status = 400, description = "Malformed or empty body", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
    )
)]
pub(crate) async fn patch_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    body: JsonObject,
) -> ApiResult<Json<UserResponse>> {
    let patch = UserPatch {
        name: body.optional_str("name")?,
        avatar_url: body.optional_str("avatar_url")?,
    };
    if patch.is_empty() {
        return Err(ApiError::insufficient_information());
    }
    let user = state.users.update(&username, &patch).await?;
    Ok(Json(UserResponse { user }))
}

/// Deletes a user; their reviews and authored comments cascade away.
#[utoipa::path(
    delete,
    path = "/api/users/{username}",
    tag = "users",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "No such user", body = ErrorBody),
    )
)]
pub(crate) async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<StatusCode> {
    state.users.delete(&username).await?;
    Ok(StatusCode::NO_CONTENT)
}
