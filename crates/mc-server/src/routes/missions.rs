//! Mission route handlers. Missions are create-only.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mc_core::{PlanetId, ScientistId};
use mc_db::pool::{get_conn, with_transaction};
use mc_db::queries::{missions, planets, scientists};
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::AppError;
use crate::extract::{require_text, JsonBody};
use crate::routes::planets::PlanetResponse;
use crate::routes::scientists::ScientistResponse;

/// Request body for creating a mission.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateMissionRequest {
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
}

/// A mission with both sides of the join, each flat.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MissionResponse {
    pub id: i64,
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
    pub scientist: ScientistResponse,
    pub planet: PlanetResponse,
}

/// POST /missions
#[utoipa::path(
    post,
    path = "/missions",
    request_body = CreateMissionRequest,
    responses(
        (status = 201, description = "Mission created", body = MissionResponse),
        (status = 400, description = "Validation errors, including unknown scientist or planet")
    )
)]
pub async fn create_mission(
    State(ctx): State<AppContext>,
    JsonBody(payload): JsonBody<CreateMissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    require_text("name", &payload.name)?;

    let conn = get_conn(&ctx.db)?;
    let response = with_transaction(&conn, |tx| {
        let mission = missions::create_mission(
            tx,
            &payload.name,
            ScientistId::from(payload.scientist_id),
            PlanetId::from(payload.planet_id),
        )?;
        // The foreign keys just held, so both rows exist.
        let scientist = scientists::get_scientist(tx, mission.scientist_id)?.ok_or_else(|| {
            mc_core::Error::Internal(format!("scientist {} vanished", mission.scientist_id))
        })?;
        let planet = planets::get_planet(tx, mission.planet_id)?.ok_or_else(|| {
            mc_core::Error::Internal(format!("planet {} vanished", mission.planet_id))
        })?;

        Ok(MissionResponse {
            id: mission.id.get(),
            name: mission.name,
            scientist_id: mission.scientist_id.get(),
            planet_id: mission.planet_id.get(),
            scientist: ScientistResponse::from_model(&scientist),
            planet: PlanetResponse::from_model(&planet),
        })
    })?;

    tracing::info!(
        mission_id = response.id,
        scientist_id = response.scientist_id,
        planet_id = response.planet_id,
        "Mission created"
    );

    Ok((StatusCode::CREATED, Json(response)))
}
