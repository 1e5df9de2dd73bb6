//! # meeple-store
//!
//! Relational store layer for the meeple review API.
//!
//! One store struct per resource (categories, reviews, comments, users),
//! each holding an injected [`sqlx::SqlitePool`]. All stores follow the same
//! filter-builder discipline:
//!
//! - `sort_by` is validated against a per-resource whitelist of column
//!   names and falls back to a resource default; only whitelist strings are
//!   ever interpolated into SQL text
//! - `order` normalizes to `ASC`/`DESC` with a per-resource default
//! - `limit`/`p` coerce to positive integers (defaults 10 and 1)
//! - every other dynamic value is a bound parameter
//!
//! Pool lifecycle belongs to the process entry point; this crate never
//! opens connections on its own behalf outside [`db`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]

pub mod categories;
pub mod comments;
pub mod db;
pub mod error;
pub mod reviews;
pub mod seed;
pub mod users;

pub use categories::{Category, CategoryQuery, CategoryStore, NewCategory};
pub use comments::{Comment, CommentQuery, CommentStore, NewComment};
pub use error::{Result, StoreError};
pub use reviews::{NewReview, Review, ReviewDetail, ReviewQuery, ReviewStore, ReviewSummary};
pub use users::{NewUser, User, UserPatch, UserQuery, UserStore};

/// Returns the current instant as the RFC 3339 UTC string stored in
/// `created_at` columns.
///
/// A fixed textual format keeps lexicographic `ORDER BY` equal to
/// chronological order and lets rows serialize to JSON unchanged.
#[must_use]
pub fn now_timestamp() -> String {
    chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
