//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates an in-memory DB, default config and
//! a full [`AppContext`]. The [`TestHarness::with_server`] constructor starts
//! Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;

use mc_core::config::Config;
use mc_core::{PlanetId, ScientistId};
use mc_db::models::{Mission, Planet, Scientist};
use mc_db::pool::{init_memory_pool, DbPool};
use mc_server::context::AppContext;
use mc_server::router::build_router;

/// Test harness wrapping a fully-constructed [`AppContext`] backed by an
/// in-memory database.
pub struct TestHarness {
    pub ctx: AppContext,
    pub db: DbPool,
}

impl TestHarness {
    /// Create a new harness with default configuration and in-memory DB.
    pub fn new() -> Self {
        let db = init_memory_pool().expect("failed to create in-memory pool");
        let ctx = AppContext::new(db.clone(), Config::default());
        Self { ctx, db }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let app = build_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    /// Get a database connection from the pool.
    pub fn conn(&self) -> mc_db::pool::PooledConnection {
        mc_db::pool::get_conn(&self.db).expect("failed to get db connection")
    }

    pub fn create_scientist(&self, name: &str, field_of_study: &str) -> Scientist {
        mc_db::queries::scientists::create_scientist(&self.conn(), name, field_of_study)
            .expect("failed to create scientist")
    }

    pub fn create_planet(&self, name: &str) -> Planet {
        mc_db::queries::planets::create_planet(&self.conn(), name, 4_200_000, "Proxima Centauri")
            .expect("failed to create planet")
    }

    pub fn create_mission(&self, name: &str, scientist: ScientistId, planet: PlanetId) -> Mission {
        mc_db::queries::missions::create_mission(&self.conn(), name, scientist, planet)
            .expect("failed to create mission")
    }

    pub fn mission_count(&self) -> i64 {
        mc_db::queries::missions::count_missions(&self.conn()).expect("failed to count missions")
    }

    pub fn scientist_count(&self) -> i64 {
        mc_db::queries::scientists::count_scientists(&self.conn())
            .expect("failed to count scientists")
    }
}
