//! Category store: listing, lookup and CRUD for review categories.

use std::collections::HashMap;

use sqlx::SqlitePool;

use meeple_core::params::{whitelisted, PageParams, SortOrder};

use crate::error::{Result, StoreError};

/// Columns a category listing may sort by.
const SORTABLE: &[&str] = &["slug", "description"];

/// A board-game category row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, sqlx::FromRow)]
pub struct Category {
    /// Unique, URL-safe identifier.
    pub slug: String,
    /// Human-readable description.
    pub description: String,
}

/// Fields required to create a category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// Unique, URL-safe identifier.
    pub slug: String,
    /// Human-readable description.
    pub description: String,
}

/// Validated listing criteria for categories.
#[derive(Debug, Clone)]
pub struct CategoryQuery {
    /// Whitelisted sort column.
    pub sort_by: &'static str,
    /// Sort direction.
    pub order: SortOrder,
    /// Page window.
    pub page: PageParams,
}

impl CategoryQuery {
    /// Builds criteria from raw query parameters, ignoring anything
    /// unrecognized or malformed.
    #[must_use]
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        Self {
            sort_by: whitelisted(params.get("sort_by").map(String::as_str), SORTABLE, "slug"),
            order: SortOrder::parse_or(params.get("order").map(String::as_str), SortOrder::Asc),
            page: PageParams::from_raw(
                params.get("limit").map(String::as_str),
                params.get("p").map(String::as_str),
            ),
        }
    }
}

impl Default for CategoryQuery {
    fn default() -> Self {
        Self::from_query(&HashMap::new())
    }
}

/// Store for the `categories` table.
#[derive(Debug, Clone)]
pub struct CategoryStore {
    pool: SqlitePool,
}

impl CategoryStore {
    /// Creates a category store over an injected pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Lists categories according to `query`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on store failure.
    pub async fn list(&self, query: &CategoryQuery) -> Result<Vec<Category>> {
        // sort_by/order come from fixed whitelists, limit/offset from
        // validated integers; nothing user-controlled is interpolated.
        let sql = format!(
            "SELECT slug, description FROM categories ORDER BY {} {} LIMIT ? OFFSET ?",
            query.sort_by,
            query.order.as_sql(),
        );
        let rows = sqlx::query_as::<_, Category>(&sql)
            .bind(query.page.limit)
            .bind(query.page.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Fetches one category by slug.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the slug has no row.
    pub async fn get(&self, slug: &str) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            "SELECT slug, description FROM categories WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { entity: "Category" })
    }

    /// Inserts a category and returns the stored row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] on a duplicate slug.
    pub async fn insert(&self, new: &NewCategory) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (slug, description) VALUES (?, ?) \
             RETURNING slug, description",
        )
        .bind(&new.slug)
        .bind(&new.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::on_write(e, "Category"))
    }

    /// Replaces a category's description and returns the updated row.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the slug has no row.
    pub async fn update_description(&self, slug: &str, description: &str) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET description = ? WHERE slug = ? \
             RETURNING slug, description",
        )
        .bind(description)
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { entity: "Category" })
    }

    /// Deletes a category; reviews in it (and their comments) cascade away.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the slug has no row.
    pub async fn delete(&self, slug: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE slug = ?")
            .bind(slug)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { entity: "Category" });
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
    fn defaults_to_slug_ascending() {
        let q = CategoryQuery::default();
        assert_eq!(q.sort_by, "slug");
        assert_eq!(q.order, SortOrder::Asc);
        assert_eq!(q.page.limit, 10);
    }

    #[test]
    fn injected_sort_column_falls_back_to_default() {
        let q = CategoryQuery::from_query(&query_of(&[(
            "sort_by",
            "description; DROP TABLE categories;",
        )]));
        assert_eq!(q.sort_by, "slug");
    }

    #[test]
    fn unrecognized_parameters_are_ignored() {
        let q = CategoryQuery::from_query(&query_of(&[("peanut", "yum"), ("limit", "2")]));
        assert_eq!(q.page.limit, 2);
        assert_eq!(q.sort_by, "slug");
    }
}
