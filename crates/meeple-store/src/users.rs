//! User store: listing, lookup and CRUD for user profiles.

use std::collections::HashMap;

use sqlx::SqlitePool;

use meeple_core::params::{whitelisted, PageParams, SortOrder};

use crate::error::{Result, StoreError};

/// Columns a user listing may sort by.
const SORTABLE: &[&str] = &["username", "name", "avatar_url"];

const COLUMNS: &str = "username, name, avatar_url";

/// A user row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique username.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Avatar image URL, when set.
    pub avatar_url: Option<String>,
}

/// Fields required to create a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique username.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Avatar image URL, optional.
    pub avatar_url: Option<String>,
}

/// Partial update for a user; at least one field is expected to be set by
/// the caller's validation.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement avatar URL.
    pub avatar_url: Option<String>,
}

impl UserPatch {
    /// True when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar_url.is_none()
    }
}

/// Validated listing criteria for users.
#[derive(Debug, Clone)]
pub struct UserQuery {
    /// Whitelisted sort column.
    pub sort_by: &'static str,
    /// Sort direction.
    pub order: SortOrder,
    /// Page window.
    pub page: PageParams,
}

impl UserQuery {
    /// Builds criteria from raw query parameters, ignoring anything
    /// unrecognized or malformed.
    #[must_use]
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        Self {
            sort_by: whitelisted(
                params.get("sort_by").map(String::as_str),
                SORTABLE,
                "username",
            ),
            order: SortOrder::parse_or(params.get("order").map(String::as_str), SortOrder::Asc),
            page: PageParams::from_raw(
                params.get("limit").map(String::as_str),
                params.get("p").map(String::as_str),
            ),
        }
    }
}

impl Default for UserQuery {
    fn default() -> Self {
        Self::from_query(&HashMap::new())
    }
}

/// Store for the `users` table.
#[derive(Debug, Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    /// Creates a user store over an injected pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Lists users according to `query`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on store failure.
    pub async fn list(&self, query: &UserQuery) -> Result<Vec<User>> {
        let sql = format!(
            "SELECT {COLUMNS} FROM users ORDER BY {} {} LIMIT ? OFFSET ?",
            query.sort_by,
            query.order.as_sql(),
        );
        let rows = sqlx::query_as::<_, User>(&sql)
            .bind(query.page.limit)
            .bind(query.page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Fetches one user by username.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the username has no row.
    pub async fn get(&self, username: &str) -> Result<User> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE username = ?");
        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { entity: "User" })
    }

    /// Inserts a user and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] on a duplicate username.
    pub async fn insert(&self, new: &NewUser) -> Result<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, name, avatar_url) VALUES (?, ?, ?) \
             RETURNING username, name, avatar_url",
        )
        .bind(&new.username)
        .bind(&new.name)
        .bind(new.avatar_url.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::on_write(e, "User"))
    }

    /// Applies a partial update and returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the username has no row.
    pub async fn update(&self, username: &str, patch: &UserPatch) -> Result<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = COALESCE(?, name), \
                              avatar_url = COALESCE(?, avatar_url) \
             WHERE username = ? \
             RETURNING username, name, avatar_url",
        )
        .bind(patch.name.as_deref())
        .bind(patch.avatar_url.as_deref())
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { entity: "User" })
    }

    /// Deletes a user; their reviews and authored comments cascade away.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the username has no row.
    pub async fn delete(&self, username: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE username = ?")
            .bind(username)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { entity: "User" });
        }
        Ok(())
    }
}
