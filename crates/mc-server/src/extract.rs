//! Request extractors that report failures through [`AppError`].

use axum::extract::FromRequest;
use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// `axum::Json` whose rejections (bad syntax, wrong content type, unknown
/// or mistyped fields) become a 400 validation error.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Parse an `{id}` path segment.
///
/// Only integer ids can ever exist, so anything else is reported as a
/// missing `entity`.
pub fn parse_id<T: std::str::FromStr>(entity: &str, raw: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| mc_core::Error::not_found(entity, raw).into())
}

/// Deserialize an optional field that, when present, must not be `null`.
///
/// Use with `#[serde(default, deserialize_with = "non_null")]` so a missing
/// key yields `None` while an explicit `null` is a type error.
pub fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Require a string field to contain something other than whitespace.
pub fn require_text(field: &str, value: &str) -> mc_core::Result<()> {
    if value.trim().is_empty() {
        return Err(mc_core::Error::Validation(format!("{field} must not be blank")));
    }
    Ok(())
}
