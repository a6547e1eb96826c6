//! mc-db: database access and persistence layer.
//!
//! This crate provides SQLite-backed storage with connection pooling,
//! embedded migrations, typed models, and query modules for scientists,
//! planets and missions.

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
pub mod seed;

use mc_core::Error;

/// Convert a rusqlite error into the shared [`Error`].
///
/// Constraint violations (NOT NULL, CHECK, FOREIGN KEY) mean the caller
/// handed us bad data, so they become [`Error::Validation`]; everything else
/// is a database failure.
pub(crate) fn db_error(e: rusqlite::Error) -> Error {
    match &e {
        rusqlite::Error::SqliteFailure(failure, msg)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Error::Validation(msg.clone().unwrap_or_else(|| failure.to_string()))
        }
        _ => Error::database(e.to_string()),
    }
}
