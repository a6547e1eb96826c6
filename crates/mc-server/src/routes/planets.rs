//! Planet route handlers. Planets are read-only over HTTP.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::context::AppContext;
use crate::error::AppError;

/// Flat planet: no missions, no scientists.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PlanetResponse {
    pub id: i64,
    pub name: Option<String>,
    pub distance_from_earth: Option<i64>,
    pub nearest_star: Option<String>,
}

impl PlanetResponse {
    pub(crate) fn from_model(planet: &mc_db::models::Planet) -> Self {
        Self {
            id: planet.id.get(),
            name: planet.name.clone(),
            distance_from_earth: planet.distance_from_earth,
            nearest_star: planet.nearest_star.clone(),
        }
    }
}

/// GET /planets
#[utoipa::path(
    get,
    path = "/planets",
    responses(
        (status = 200, description = "List all planets", body = Vec<PlanetResponse>)
    )
)]
pub async fn list_planets(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<PlanetResponse>>, AppError> {
    let conn = mc_db::pool::get_conn(&ctx.db)?;
    let planets = mc_db::queries::planets::list_planets(&conn)?;
    Ok(Json(planets.iter().map(PlanetResponse::from_model).collect()))
}
