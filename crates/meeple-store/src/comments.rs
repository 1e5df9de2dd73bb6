//! Comment store: per-review listings and CRUD on single comments.

use std::collections::HashMap;

use sqlx::SqlitePool;

use meeple_core::params::{whitelisted, PageParams, SortOrder};

use crate::error::{Result, StoreError};
use crate::now_timestamp;

/// Columns a comment listing may sort by.
const SORTABLE: &[&str] = &["comment_id", "votes", "created_at", "author", "body"];

const COLUMNS: &str = "comment_id, votes, created_at, author, body, review_id";

/// A comment row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, sqlx::FromRow)]
pub struct Comment {
    /// Numeric identifier.
    pub comment_id: i64,
    /// Vote tally.
    pub votes: i64,
    /// RFC 3339 creation instant.
    pub created_at: String,
    /// Authoring username.
    pub author: String,
    /// Comment text.
    pub body: String,
    /// The review this comment belongs to.
    pub review_id: i64,
}

/// Fields required to create a comment on a review.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Authoring username; must reference an existing user.
    pub author: String,
    /// Comment text.
    pub body: String,
}

/// Validated listing criteria for a review's comments.
#[derive(Debug, Clone)]
pub struct CommentQuery {
    /// Whitelisted sort column.
    pub sort_by: &'static str,
    /// Sort direction.
    pub order: SortOrder,
    /// Page window.
    pub page: PageParams,
    /// Author filter; bound, never interpolated.
    pub author: Option<String>,
}

impl CommentQuery {
    /// Builds criteria from raw query parameters, ignoring anything
    /// unrecognized or malformed.
    #[must_use]
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        Self {
            sort_by: whitelisted(
                params.get("sort_by").map(String::as_str),
                SORTABLE,
                "created_at",
            ),
            order: SortOrder::parse_or(params.get("order").map(String::as_str), SortOrder::Desc),
            page: PageParams::from_raw(
                params.get("limit").map(String::as_str),
                params.get("p").map(String::as_str),
            ),
            author: params.get("author").cloned(),
        }
    }
}

impl Default for CommentQuery {
    fn default() -> Self {
        Self::from_query(&HashMap::new())
    }
}

/// Store for the `comments` table.
#[derive(Debug, Clone)]
pub struct CommentStore {
    pool: SqlitePool,
}

impl CommentStore {
    /// Creates a comment store over an injected pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Lists the comments of one review according to `query`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the review itself does not
    /// exist; an existing review with no comments lists as empty.
    pub async fn list_for_review(
        &self,
        review_id: i64,
        query: &CommentQuery,
    ) -> Result<Vec<Comment>> {
        let review_exists = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE review_id = ?)",
        )
        .bind(review_id)
        .fetch_one(&self.pool)
        .await?;
        if review_exists == 0 {
            return Err(StoreError::NotFound { entity: "Review" });
        }

        let filter = if query.author.is_some() {
            " AND author = ?"
        } else {
            ""
        };
        let sql = format!(
            "SELECT {COLUMNS} FROM comments WHERE review_id = ?{filter} \
             ORDER BY {} {} LIMIT ? OFFSET ?",
            query.sort_by,
            query.order.as_sql(),
        );

        let mut list_query = sqlx::query_as::<_, Comment>(&sql).bind(review_id);
        if let Some(author) = &query.author {
            list_query = list_query.bind(author);
        }
        let rows = list_query
            .bind(query.page.limit)
            .bind(query.page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Inserts a comment on a review and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the review does not exist and
    /// [`StoreError::MissingReference`] when the author does not.
    pub async fn insert_for_review(&self, review_id: i64, new: &NewComment) -> Result<Comment> {
        // Distinguish "review gone" (a not-found on the path parameter)
        // from "author unknown" (a dangling reference in the body) before
        // the write; the FK violation alone cannot tell them apart.
        let review_exists = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE review_id = ?)",
        )
        .bind(review_id)
        .fetch_one(&self.pool)
        .await?;
        if review_exists == 0 {
            return Err(StoreError::NotFound { entity: "Review" });
        }

        sqlx::query_as::<_, Comment>(
            "INSERT INTO comments (body, votes, author, review_id, created_at) \
             VALUES (?, 0, ?, ?, ?) \
             RETURNING comment_id, votes, created_at, author, body, review_id",
        )
        .bind(&new.body)
        .bind(&new.author)
        .bind(review_id)
        .bind(now_timestamp())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::on_write(e, "Comment"))
    }

    /// Fetches one comment by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the id has no row.
    pub async fn get(&self, comment_id: i64) -> Result<Comment> {
        let sql = format!("SELECT {COLUMNS} FROM comments WHERE comment_id = ?");
        sqlx::query_as::<_, Comment>(&sql)
            .bind(comment_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { entity: "Comment" })
    }

    /// Adjusts a comment's vote tally by `delta` and returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the id has no row.
    pub async fn adjust_votes(&self, comment_id: i64, delta: i64) -> Result<Comment> {
        sqlx::query_as::<_, Comment>(
            "UPDATE comments SET votes = votes + ? WHERE comment_id = ? \
             RETURNING comment_id, votes, created_at, author, body, review_id",
        )
        .bind(delta)
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { entity: "Comment" })
    }

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the id has no row.
    pub async fn delete(&self, comment_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = ?")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { entity: "Comment" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_recency() {
        let q = CommentQuery::default();
        assert_eq!(q.sort_by, "created_at");
        assert_eq!(q.order, SortOrder::Desc);
        assert_eq!(q.author, None);
    }

    #[test]
    fn injected_limit_falls_back_to_default() {
        let mut params = HashMap::new();
        params.insert("limit".to_string(), "1;DROP TABLE reviews;".to_string());
        let q = CommentQuery::from_query(&params);
        assert_eq!(q.page.limit, 10);
    }
}
