//! Mission queries. Missions join a scientist to a planet and are
//! create-only over HTTP.

use mc_core::{MissionId, PlanetId, Result, ScientistId};
use rusqlite::Connection;

use crate::db_error;
use crate::models::{Mission, MissionWithPlanet};

/// Insert a mission.
///
/// A `scientist_id` or `planet_id` that does not exist violates the foreign
/// key and surfaces as [`mc_core::Error::Validation`].
pub fn create_mission(
    conn: &Connection,
    name: &str,
    scientist_id: ScientistId,
    planet_id: PlanetId,
) -> Result<Mission> {
    conn.execute(
        "INSERT INTO missions (name, scientist_id, planet_id) VALUES (?1, ?2, ?3)",
        rusqlite::params![name, scientist_id.get(), planet_id.get()],
    )
    .map_err(db_error)?;

    Ok(Mission {
        id: MissionId::from(conn.last_insert_rowid()),
        name: name.to_string(),
        scientist_id,
        planet_id,
    })
}

/// List a scientist's missions, each joined with its planet, ordered by ID.
pub fn list_missions_for_scientist(
    conn: &Connection,
    scientist_id: ScientistId,
) -> Result<Vec<MissionWithPlanet>> {
    let mut stmt = conn
        .prepare(
            "SELECT m.id, m.name, m.scientist_id, m.planet_id,
                    p.id, p.name, p.distance_from_earth, p.nearest_star
             FROM missions m
             JOIN planets p ON p.id = m.planet_id
             WHERE m.scientist_id = ?1
             ORDER BY m.id",
        )
        .map_err(db_error)?;
    let rows = stmt
        .query_map([scientist_id.get()], MissionWithPlanet::from_row)
        .map_err(db_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(db_error)?;
    Ok(rows)
}

/// Count all missions.
pub fn count_missions(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM missions", [], |row| row.get(0))
        .map_err(db_error)
}
