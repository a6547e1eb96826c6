//! Database query modules.

pub mod missions;
pub mod planets;
pub mod scientists;
