//! mc-core: shared identifiers, errors and configuration.
//!
//! This crate is the foundational dependency for the other mc-* crates,
//! providing type-safe entity identifiers, a unified error type and the
//! application configuration.

pub mod config;
pub mod error;
pub mod ids;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use ids::*;
