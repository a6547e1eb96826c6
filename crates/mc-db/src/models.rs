//! Rust structs mapping to database tables.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row`. Column order follows the `COLUMNS` constant on each
//! model so query modules can splice it into their `SELECT`s.

use mc_core::{MissionId, PlanetId, ScientistId};

// ---------------------------------------------------------------------------
// Scientist
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Scientist {
    pub id: ScientistId,
    pub name: String,
    pub field_of_study: String,
}

impl Scientist {
    pub const COLUMNS: &'static str = "id, name, field_of_study";

    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: ScientistId::from(row.get::<_, i64>(0)?),
            name: row.get(1)?,
            field_of_study: row.get(2)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Planet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Planet {
    pub id: PlanetId,
    pub name: Option<String>,
    pub distance_from_earth: Option<i64>,
    pub nearest_star: Option<String>,
}

impl Planet {
    pub const COLUMNS: &'static str = "id, name, distance_from_earth, nearest_star";

    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Self::from_row_at(row, 0)
    }

    /// Read a planet whose columns start at `offset` (used by joins).
    pub fn from_row_at(row: &rusqlite::Row, offset: usize) -> rusqlite::Result<Self> {
        Ok(Self {
            id: PlanetId::from(row.get::<_, i64>(offset)?),
            name: row.get(offset + 1)?,
            distance_from_earth: row.get(offset + 2)?,
            nearest_star: row.get(offset + 3)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Mission
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    pub id: MissionId,
    pub name: String,
    pub scientist_id: ScientistId,
    pub planet_id: PlanetId,
}

impl Mission {
    pub const COLUMNS: &'static str = "id, name, scientist_id, planet_id";

    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: MissionId::from(row.get::<_, i64>(0)?),
            name: row.get(1)?,
            scientist_id: ScientistId::from(row.get::<_, i64>(2)?),
            planet_id: PlanetId::from(row.get::<_, i64>(3)?),
        })
    }
}

/// A mission joined with the planet it targets.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionWithPlanet {
    pub mission: Mission,
    pub planet: Planet,
}

impl MissionWithPlanet {
    /// Expects the four mission columns followed by the four planet columns.
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            mission: Mission::from_row(row)?,
            planet: Planet::from_row_at(row, 4)?,
        })
    }
}
