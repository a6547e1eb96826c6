//! Scientist CRUD operations.

use mc_core::{Result, ScientistId};
use rusqlite::{Connection, OptionalExtension};

use crate::db_error;
use crate::models::Scientist;

/// Insert a scientist and return the stored row.
pub fn create_scientist(conn: &Connection, name: &str, field_of_study: &str) -> Result<Scientist> {
    conn.execute(
        "INSERT INTO scientists (name, field_of_study) VALUES (?1, ?2)",
        rusqlite::params![name, field_of_study],
    )
    .map_err(db_error)?;

    Ok(Scientist {
        id: ScientistId::from(conn.last_insert_rowid()),
        name: name.to_string(),
        field_of_study: field_of_study.to_string(),
    })
}

/// Get a scientist by ID.
pub fn get_scientist(conn: &Connection, id: ScientistId) -> Result<Option<Scientist>> {
    conn.query_row(
        &format!("SELECT {} FROM scientists WHERE id = ?1", Scientist::COLUMNS),
        [id.get()],
        Scientist::from_row,
    )
    .optional()
    .map_err(db_error)
}

/// List all scientists ordered by ID.
pub fn list_scientists(conn: &Connection) -> Result<Vec<Scientist>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {} FROM scientists ORDER BY id", Scientist::COLUMNS))
        .map_err(db_error)?;
    let rows = stmt
        .query_map([], Scientist::from_row)
        .map_err(db_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(db_error)?;
    Ok(rows)
}

/// Apply a partial update. `None` leaves the column untouched.
///
/// Returns `false` when no scientist has the given ID.
pub fn update_scientist(
    conn: &Connection,
    id: ScientistId,
    name: Option<&str>,
    field_of_study: Option<&str>,
) -> Result<bool> {
    let n = conn
        .execute(
            "UPDATE scientists
             SET name = COALESCE(?1, name),
                 field_of_study = COALESCE(?2, field_of_study)
             WHERE id = ?3",
            rusqlite::params![name, field_of_study, id.get()],
        )
        .map_err(db_error)?;
    Ok(n > 0)
}

/// Delete a scientist (cascades to missions).
pub fn delete_scientist(conn: &Connection, id: ScientistId) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM scientists WHERE id = ?1", [id.get()])
        .map_err(db_error)?;
    Ok(n > 0)
}

/// Count all scientists.
pub fn count_scientists(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM scientists", [], |row| row.get(0))
        .map_err(db_error)
}
