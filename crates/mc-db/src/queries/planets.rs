//! Planet queries. Planets are read-only over HTTP; rows are created by
//! the seeder.

use mc_core::{PlanetId, Result};
use rusqlite::{Connection, OptionalExtension};

use crate::db_error;
use crate::models::Planet;

/// Insert a planet and return the stored row.
pub fn create_planet(
    conn: &Connection,
    name: &str,
    distance_from_earth: i64,
    nearest_star: &str,
) -> Result<Planet> {
    conn.execute(
        "INSERT INTO planets (name, distance_from_earth, nearest_star) VALUES (?1, ?2, ?3)",
        rusqlite::params![name, distance_from_earth, nearest_star],
    )
    .map_err(db_error)?;

    Ok(Planet {
        id: PlanetId::from(conn.last_insert_rowid()),
        name: Some(name.to_string()),
        distance_from_earth: Some(distance_from_earth),
        nearest_star: Some(nearest_star.to_string()),
    })
}

/// Get a planet by ID.
pub fn get_planet(conn: &Connection, id: PlanetId) -> Result<Option<Planet>> {
    conn.query_row(
        &format!("SELECT {} FROM planets WHERE id = ?1", Planet::COLUMNS),
        [id.get()],
        Planet::from_row,
    )
    .optional()
    .map_err(db_error)
}

/// List all planets ordered by ID.
pub fn list_planets(conn: &Connection) -> Result<Vec<Planet>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {} FROM planets ORDER BY id", Planet::COLUMNS))
        .map_err(db_error)?;
    let rows = stmt
        .query_map([], Planet::from_row)
        .map_err(db_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(db_error)?;
    Ok(rows)
}
