//! Sample data for local development.
//!
//! Planets have no write surface over HTTP, so seeding is the only way to
//! populate them.

use mc_core::Result;
use rusqlite::Connection;

use crate::db_error;
use crate::pool::with_transaction;
use crate::queries::{missions, planets, scientists};

const PLANETS: &[(&str, i64, &str)] = &[
    ("TauCeti E", 1_234_567, "Tau Ceti"),
    ("Maxxowitz", 9_876_543, "Canopus"),
    ("Plasmus", 2_345_678, "Betelgeuse"),
    ("Jinxon", 6_789_012, "Sirius"),
    ("Kepler-442b", 1_206_000, "Kepler-442"),
];

const SCIENTISTS: &[(&str, &str)] = &[
    ("Mel T. Valent", "xenobiology"),
    ("P. Legrange", "orbital mechanics"),
    ("Bevan Duncan", "astrogeology"),
    ("Ada Lovelace", "computational astronomy"),
];

/// (mission name, index into SCIENTISTS, index into PLANETS)
const MISSIONS: &[(&str, usize, usize)] = &[
    ("Project Tau", 0, 0),
    ("Canopus Survey", 1, 1),
    ("Red Giant Watch", 2, 2),
    ("Sirius Relay", 3, 3),
    ("Second Look", 0, 4),
];

/// Row counts written by [`seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub scientists: usize,
    pub planets: usize,
    pub missions: usize,
}

/// Insert the sample data in one transaction.
///
/// With `reset`, existing missions, scientists and planets are deleted first.
pub fn seed(conn: &Connection, reset: bool) -> Result<SeedSummary> {
    with_transaction(conn, |tx| {
        if reset {
            tx.execute_batch(
                "DELETE FROM missions;
                 DELETE FROM scientists;
                 DELETE FROM planets;",
            )
            .map_err(db_error)?;
            tracing::info!("Cleared existing missions, scientists and planets");
        }

        let planet_rows = PLANETS
            .iter()
            .map(|&(name, distance, star)| planets::create_planet(tx, name, distance, star))
            .collect::<Result<Vec<_>>>()?;

        let scientist_rows = SCIENTISTS
            .iter()
            .map(|&(name, field)| scientists::create_scientist(tx, name, field))
            .collect::<Result<Vec<_>>>()?;

        for &(name, s, p) in MISSIONS {
            missions::create_mission(tx, name, scientist_rows[s].id, planet_rows[p].id)?;
        }

        Ok(SeedSummary {
            scientists: scientist_rows.len(),
            planets: planet_rows.len(),
            missions: MISSIONS.len(),
        })
    })
}
