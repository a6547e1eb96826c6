//! Application context shared by all route handlers via Axum state.

use std::sync::Arc;

use mc_core::config::Config;
use mc_db::pool::DbPool;

/// Application context shared by all request handlers (via Axum state).
///
/// This is cheaply cloneable: the pool is reference-counted internally and
/// the configuration sits behind an `Arc`.
#[derive(Clone)]
pub struct AppContext {
    /// Database connection pool.
    pub db: DbPool,
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
}

impl AppContext {
    pub fn new(db: DbPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}
