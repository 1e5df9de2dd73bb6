//! Shared application state handed to every handler.

use sqlx::SqlitePool;

use meeple_store::{CategoryStore, CommentStore, ReviewStore, UserStore};

use crate::config::Config;

/// Cloneable handle bundle: configuration plus one store per resource,
/// all over the same pool.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Runtime configuration.
    pub config: Config,
    /// Category store.
    pub categories: CategoryStore,
    /// Review store.
    pub reviews: ReviewStore,
    /// Comment store.
    pub comments: CommentStore,
    /// User store.
    pub users: UserStore,
}

impl AppState {
    /// Builds state over one shared pool.
    #[must_use]
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        Self {
            config,
            categories: CategoryStore::new(pool.clone()),
            reviews: ReviewStore::new(pool.clone()),
            comments: CommentStore::new(pool.clone()),
            users: UserStore::new(pool),
        }
    }
}
