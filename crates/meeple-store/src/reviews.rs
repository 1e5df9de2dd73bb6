//! Review store: listing with filters and totals, lookup with comment
//! aggregates, and CRUD.

use std::collections::HashMap;

use sqlx::SqlitePool;

use meeple_core::params::{whitelisted, PageParams, SortOrder};

use crate::error::{Result, StoreError};
use crate::now_timestamp;

/// Columns a review listing may sort by.
const SORTABLE: &[&str] = &[
    "owner",
    "title",
    "review_id",
    "category",
    "review_img_url",
    "created_at",
    "votes",
    "designer",
    "comment_count",
];

/// Fallback image for reviews posted without one.
const DEFAULT_IMG_URL: &str =
    "https://images.pexels.com/photos/163064/play-stone-network-networked-interactive-163064.jpeg";

/// A full review row, without comment aggregates.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, sqlx::FromRow)]
pub struct Review {
    /// Numeric identifier.
    pub review_id: i64,
    /// Review title.
    pub title: String,
    /// Full review text.
    pub review_body: String,
    /// Game designer, when known.
    pub designer: Option<String>,
    /// Cover image URL.
    pub review_img_url: String,
    /// Vote tally.
    pub votes: i64,
    /// Owning category slug.
    pub category: String,
    /// Authoring username.
    pub owner: String,
    /// RFC 3339 creation instant.
    pub created_at: String,
}

/// A full review plus its aggregate comment count.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, sqlx::FromRow)]
pub struct ReviewDetail {
    /// Numeric identifier.
    pub review_id: i64,
    /// Review title.
    pub title: String,
    /// Full review text.
    pub review_body: String,
    /// Game designer, when known.
    pub designer: Option<String>,
    /// Cover image URL.
    pub review_img_url: String,
    /// Vote tally.
    pub votes: i64,
    /// Owning category slug.
    pub category: String,
    /// Authoring username.
    pub owner: String,
    /// RFC 3339 creation instant.
    pub created_at: String,
    /// Number of comments on this review.
    pub comment_count: i64,
}

/// A listing row: everything but the body, plus the comment aggregate.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, sqlx::FromRow)]
pub struct ReviewSummary {
    /// Authoring username.
    pub owner: String,
    /// Review title.
    pub title: String,
    /// Numeric identifier.
    pub review_id: i64,
    /// Owning category slug.
    pub category: String,
    /// Cover image URL.
    pub review_img_url: String,
    /// RFC 3339 creation instant.
    pub created_at: String,
    /// Vote tally.
    pub votes: i64,
    /// Game designer, when known.
    pub designer: Option<String>,
    /// Number of comments on this review.
    pub comment_count: i64,
}

/// Fields required to create a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    /// Authoring username; must reference an existing user.
    pub owner: String,
    /// Review title.
    pub title: String,
    /// Full review text.
    pub review_body: String,
    /// Game designer, optional.
    pub designer: Option<String>,
    /// Owning category slug; must reference an existing category.
    pub category: String,
    /// Cover image URL; defaults when absent.
    pub review_img_url: Option<String>,
}

/// Validated listing criteria for reviews.
#[derive(Debug, Clone)]
pub struct ReviewQuery {
    /// Whitelisted sort column.
    pub sort_by: &'static str,
    /// Sort direction.
    pub order: SortOrder,
    /// Page window.
    pub page: PageParams,
    /// Category filter; bound, never interpolated.
    pub category: Option<String>,
}

impl ReviewQuery {
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
            category: params.get("category").cloned(),
        }
    }

    /// The SQL expression for the validated sort column; listing columns
    /// shared with `comments` need qualification.
    fn sort_expr(&self) -> &'static str {
        match self.sort_by {
            "owner" => "reviews.owner",
            "title" => "reviews.title",
            "review_id" => "reviews.review_id",
            "category" => "reviews.category",
            "review_img_url" => "reviews.review_img_url",
            "votes" => "reviews.votes",
            "designer" => "reviews.designer",
            "comment_count" => "comment_count",
            _ => "reviews.created_at",
        }
    }
}

impl Default for ReviewQuery {
    fn default() -> Self {
        Self::from_query(&HashMap::new())
    }
}

/// Store for the `reviews` table.
#[derive(Debug, Clone)]
pub struct ReviewStore {
    pool: SqlitePool,
}

impl ReviewStore {
    /// Creates a review store over an injected pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Lists reviews according to `query`, returning the page and the total
    /// number of reviews matching the filters (pagination ignored).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on store failure.
    pub async fn list(&self, query: &ReviewQuery) -> Result<(Vec<ReviewSummary>, i64)> {
        let filter = if query.category.is_some() {
            " WHERE reviews.category = ?"
        } else {
            ""
        };

        let list_sql = format!(
            "SELECT reviews.owner, reviews.title, reviews.review_id, reviews.category, \
                    reviews.review_img_url, reviews.created_at, reviews.votes, reviews.designer, \
                    COUNT(comments.comment_id) AS comment_count \
             FROM reviews \
             LEFT JOIN comments ON comments.review_id = reviews.review_id\
             {filter} \
             GROUP BY reviews.review_id \
             ORDER BY {} {} LIMIT ? OFFSET ?",
            query.sort_expr(),
            query.order.as_sql(),
        );

        let mut list_query = sqlx::query_as::<_, ReviewSummary>(&list_sql);
        if let Some(category) = &query.category {
            list_query = list_query.bind(category);
        }
        let rows = list_query
            .bind(query.page.limit)
            .bind(query.page.offset())
            .fetch_all(&self.pool)
            .await?;

        let count_sql = format!("SELECT COUNT(*) FROM reviews{filter}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(category) = &query.category {
            count_query = count_query.bind(category);
        }
        let total_count = count_query.fetch_one(&self.pool).await?;

        Ok((rows, total_count))
    }

    /// Fetches one review by id, with its aggregate comment count.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the id has no row.
    pub async fn get(&self, review_id: i64) -> Result<ReviewDetail> {
        sqlx::query_as::<_, ReviewDetail>(
            "SELECT review_id, title, review_body, designer, review_img_url, votes, \
                    category, owner, created_at, \
                    (SELECT COUNT(*) FROM comments WHERE comments.review_id = reviews.review_id) \
                        AS comment_count \
             FROM reviews WHERE review_id = ?",
        )
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { entity: "Review" })
    }

    /// Returns whether a review with this id exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on store failure.
    pub async fn exists(&self, review_id: i64) -> Result<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE review_id = ?)",
        )
        .bind(review_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(found != 0)
    }

    /// Inserts a review and returns it with a zero comment count.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingReference`] when the owner or category
    /// does not exist.
    pub async fn insert(&self, new: &NewReview) -> Result<ReviewDetail> {
        let review_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO reviews \
                (title, review_body, designer, review_img_url, votes, category, owner, created_at) \
             VALUES (?, ?, ?, ?, 0, ?, ?, ?) \
             RETURNING review_id",
        )
        .bind(&new.title)
        .bind(&new.review_body)
        .bind(new.designer.as_deref())
        .bind(new.review_img_url.as_deref().unwrap_or(DEFAULT_IMG_URL))
        .bind(&new.category)
        .bind(&new.owner)
        .bind(now_timestamp())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::on_write(e, "Review"))?;

        self.get(review_id).await
    }

    /// Adjusts a review's vote tally by `delta` and returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the id has no row.
    pub async fn adjust_votes(&self, review_id: i64, delta: i64) -> Result<Review> {
        sqlx::query_as::<_, Review>(
            "UPDATE reviews SET votes = votes + ? WHERE review_id = ? \
             RETURNING review_id, title, review_body, designer, review_img_url, votes, \
                       category, owner, created_at",
        )
        .bind(delta)
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { entity: "Review" })
    }

    /// Deletes a review; its comments cascade away.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the id has no row.
    pub async fn delete(&self, review_id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE review_id = ?")
            .bind(review_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { entity: "Review" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults_to_recency() {
        let q = ReviewQuery::default();
        assert_eq!(q.sort_by, "created_at");
        assert_eq!(q.order, SortOrder::Desc);
        assert_eq!(q.category, None);
    }

    #[test]
    fn sort_expressions_are_qualified() {
        let q = ReviewQuery::from_query(&query_of(&[("sort_by", "votes")]));
        assert_eq!(q.sort_expr(), "reviews.votes");

        let q = ReviewQuery::from_query(&query_of(&[("sort_by", "comment_count")]));
        assert_eq!(q.sort_expr(), "comment_count");
    }

    #[test]
    fn injected_sort_column_falls_back_to_default() {
        let q = ReviewQuery::from_query(&query_of(&[("sort_by", "votes; DROP TABLE reviews;")]));
        assert_eq!(q.sort_by, "created_at");
        assert_eq!(q.sort_expr(), "reviews.created_at");
    }

    #[test]
    fn category_filter_is_carried_verbatim_for_binding() {
        let q = ReviewQuery::from_query(&query_of(&[("category", "social deduction")]));
        assert_eq!(q.category.as_deref(), Some("social deduction"));
    }
}
