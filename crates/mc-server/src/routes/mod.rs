//! Route handlers for the HTTP API.

pub mod health;
pub mod missions;
pub mod planets;
pub mod scientists;
