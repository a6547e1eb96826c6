//! Connection pool management for SQLite via r2d2.

use std::path::Path;

use mc_core::config::DatabaseLocation;
use mc_core::{Error, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::{db_error, migrations};

/// Type alias for the database connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Initialize a pool for the given location and run pending migrations.
pub fn init_pool(location: &DatabaseLocation, max_size: u32) -> Result<DbPool> {
    match location {
        DatabaseLocation::File(path) => init_file_pool(path, max_size),
        DatabaseLocation::Memory => {
            if max_size > 1 {
                tracing::debug!(
                    "In-memory database uses a single connection; ignoring pool size {max_size}"
                );
            }
            init_memory_pool()
        }
    }
}

/// Initialize a database pool backed by a file on disk.
///
/// Creates the SQLite file (and its parent directory) if it does not exist,
/// enables foreign keys and WAL journal mode on every new connection, and
/// runs pending migrations.
pub fn init_file_pool(db_path: &Path, max_size: u32) -> Result<DbPool> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            tracing::info!("Created database directory {}", parent.display());
        }
    }

    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;",
        )
    });

    let pool = Pool::builder()
        .max_size(max_size.max(1))
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create connection pool: {e}")))?;

    let conn = pool
        .get()
        .map_err(|e| Error::database(format!("Failed to get connection for migrations: {e}")))?;

    migrations::run_migrations(&conn)?;

    Ok(pool)
}

/// Initialize an in-memory database pool (useful for tests).
///
/// Each call creates a uniquely-named shared-cache in-memory database so
/// that parallel tests do not interfere with each other.
///
/// The pool holds exactly one connection that is never recycled. Shared-cache
/// table locks fail with `SQLITE_LOCKED` instead of waiting on the busy
/// handler, so concurrent requests must queue on the pool rather than on
/// SQLite. The database lives only as long as a connection to it is open.
pub fn init_memory_pool() -> Result<DbPool> {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let uri = format!("file:missiondb_{}_{n}?mode=memory&cache=shared", std::process::id());

    let manager = SqliteConnectionManager::file(uri)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    let pool = Pool::builder()
        .max_size(1)
        .max_lifetime(None)
        .idle_timeout(None)
        .build(manager)
        .map_err(|e| Error::database(format!("Failed to create in-memory pool: {e}")))?;

    let conn = pool
        .get()
        .map_err(|e| Error::database(format!("Failed to get connection for migrations: {e}")))?;

    migrations::run_migrations(&conn)?;

    Ok(pool)
}

/// Convenience helper to get a connection from the pool.
pub fn get_conn(pool: &DbPool) -> Result<PooledConnection> {
    pool.get()
        .map_err(|e| Error::database(format!("Failed to get connection from pool: {e}")))
}

/// Run `f` inside a transaction on `conn`.
///
/// The transaction is committed only when `f` succeeds; on error it is
/// dropped, which rolls back every statement `f` executed.
pub fn with_transaction<T>(
    conn: &Connection,
    f: impl FnOnce(&Connection) -> Result<T>,
) -> Result<T> {
    let tx = conn.unchecked_transaction().map_err(db_error)?;
    let value = f(&tx)?;
    tx.commit().map_err(db_error)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_scientists(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM scientists", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_init_memory_pool() {
        let pool = init_memory_pool().unwrap();
        assert_eq!(pool.max_size(), 1);
    }

    #[test]
    fn test_memory_pool_ignores_configured_size() {
        let pool = init_pool(&DatabaseLocation::Memory, 8).unwrap();
        assert_eq!(pool.max_size(), 1);
    }

    #[test]
    fn test_memory_pool_serializes_writers() {
        let pool = init_memory_pool().unwrap();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let pool = pool.clone();
                std::thread::spawn(move || {
                    let conn = get_conn(&pool).unwrap();
                    with_transaction(&conn, |tx| {
                        tx.execute(
                            "INSERT INTO scientists (name, field_of_study) VALUES (?1, 'Maths')",
                            [format!("Scientist {i}")],
                        )
                        .map_err(db_error)?;
                        Ok(())
                    })
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }
        assert_eq!(count_scientists(&get_conn(&pool).unwrap()), 8);
    }

    #[test]
    fn test_get_conn() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();

        let fk: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_memory_pools_are_isolated() {
        let a = init_memory_pool().unwrap();
        let b = init_memory_pool().unwrap();
        get_conn(&a)
            .unwrap()
            .execute(
                "INSERT INTO scientists (name, field_of_study) VALUES ('Ada', 'Maths')",
                [],
            )
            .unwrap();

        assert_eq!(count_scientists(&get_conn(&a).unwrap()), 1);
        assert_eq!(count_scientists(&get_conn(&b).unwrap()), 0);
    }

    #[test]
    fn test_file_pool_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("app.db");
        let pool = init_pool(&DatabaseLocation::File(path.clone()), 2).unwrap();
        assert!(path.exists());
        assert_eq!(pool.max_size(), 2);

        let conn = get_conn(&pool).unwrap();
        let fk: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_zero_max_size_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let pool = init_file_pool(&dir.path().join("app.db"), 0).unwrap();
        assert_eq!(pool.max_size(), 1);
    }

    #[test]
    fn test_transaction_commits_on_success() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        with_transaction(&conn, |tx| {
            tx.execute(
                "INSERT INTO scientists (name, field_of_study) VALUES ('Ada', 'Maths')",
                [],
            )
            .map_err(db_error)?;
            Ok(())
        })
        .unwrap();
        assert_eq!(count_scientists(&conn), 1);
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let pool = init_memory_pool().unwrap();
        let conn = get_conn(&pool).unwrap();
        let result: Result<()> = with_transaction(&conn, |tx| {
            tx.execute(
                "INSERT INTO scientists (name, field_of_study) VALUES ('Ada', 'Maths')",
                [],
            )
            .map_err(db_error)?;
            Err(Error::Validation("abort".into()))
        });
        assert!(result.is_err());
        assert_eq!(count_scientists(&conn), 0);
    }
}
