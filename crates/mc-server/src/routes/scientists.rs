//! Scientist CRUD route handlers.
//!
//! The collection and write endpoints answer with the flat
//! [`ScientistResponse`]; only `GET /scientists/{id}` expands missions, via
//! [`ScientistDetailResponse`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mc_core::ScientistId;
use mc_db::pool::{get_conn, with_transaction};
use mc_db::queries::{missions, scientists};
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::AppError;
use crate::extract::{non_null, parse_id, require_text, JsonBody};
use crate::routes::planets::PlanetResponse;

const ENTITY: &str = "Scientist";

/// Request body for creating a scientist.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateScientistRequest {
    pub name: String,
    pub field_of_study: String,
}

impl CreateScientistRequest {
    fn validate(&self) -> mc_core::Result<()> {
        require_text("name", &self.name)?;
        require_text("field_of_study", &self.field_of_study)
    }
}

/// Request body for a partial scientist update. Absent fields are left
/// unchanged.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateScientistRequest {
    #[serde(default, deserialize_with = "non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub field_of_study: Option<String>,
}

impl UpdateScientistRequest {
    fn validate(&self) -> mc_core::Result<()> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(field) = &self.field_of_study {
            require_text("field_of_study", field)?;
        }
        Ok(())
    }
}

/// Flat scientist: no missions, no planets.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ScientistResponse {
    pub id: i64,
    pub name: String,
    pub field_of_study: String,
}

impl ScientistResponse {
    pub(crate) fn from_model(s: &mc_db::models::Scientist) -> Self {
        Self {
            id: s.id.get(),
            name: s.name.clone(),
            field_of_study: s.field_of_study.clone(),
        }
    }
}

/// A mission as seen from its scientist: carries the planet but not the
/// scientist again.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ScientistMissionResponse {
    pub id: i64,
    pub name: String,
    pub scientist_id: i64,
    pub planet_id: i64,
    pub planet: PlanetResponse,
}

impl ScientistMissionResponse {
    fn from_model(row: &mc_db::models::MissionWithPlanet) -> Self {
        Self {
            id: row.mission.id.get(),
            name: row.mission.name.clone(),
            scientist_id: row.mission.scientist_id.get(),
            planet_id: row.mission.planet_id.get(),
            planet: PlanetResponse::from_model(&row.planet),
        }
    }
}

/// Scientist with missions expanded one level.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ScientistDetailResponse {
    pub id: i64,
    pub name: String,
    pub field_of_study: String,
    pub missions: Vec<ScientistMissionResponse>,
}

/// GET /scientists
#[utoipa::path(
    get,
    path = "/scientists",
    responses(
        (status = 200, description = "List all scientists", body = Vec<ScientistResponse>)
    )
)]
pub async fn list_scientists(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<ScientistResponse>>, AppError> {
    let conn = get_conn(&ctx.db)?;
    let rows = scientists::list_scientists(&conn)?;
    Ok(Json(rows.iter().map(ScientistResponse::from_model).collect()))
}

/// POST /scientists
#[utoipa::path(
    post,
    path = "/scientists",
    request_body = CreateScientistRequest,
    responses(
        (status = 201, description = "Scientist created", body = ScientistResponse),
        (status = 400, description = "Validation errors")
    )
)]
pub async fn create_scientist(
    State(ctx): State<AppContext>,
    JsonBody(payload): JsonBody<CreateScientistRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let conn = get_conn(&ctx.db)?;
    let scientist = with_transaction(&conn, |tx| {
        scientists::create_scientist(tx, &payload.name, &payload.field_of_study)
    })?;

    tracing::info!(scientist_id = %scientist.id, "Scientist created");

    Ok((StatusCode::CREATED, Json(ScientistResponse::from_model(&scientist))))
}

/// GET /scientists/{id}
#[utoipa::path(
    get,
    path = "/scientists/{id}",
    params(("id" = i64, Path, description = "Scientist ID")),
    responses(
        (status = 200, description = "Scientist with missions", body = ScientistDetailResponse),
        (status = 404, description = "Scientist not found")
    )
)]
pub async fn get_scientist(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<ScientistDetailResponse>, AppError> {
    let id: ScientistId = parse_id(ENTITY, &id)?;

    let conn = get_conn(&ctx.db)?;
    let (scientist, flown) = with_transaction(&conn, |tx| {
        let scientist = scientists::get_scientist(tx, id)?
            .ok_or_else(|| mc_core::Error::not_found(ENTITY, id))?;
        let flown = missions::list_missions_for_scientist(tx, id)?;
        Ok((scientist, flown))
    })?;

    Ok(Json(ScientistDetailResponse {
        id: scientist.id.get(),
        name: scientist.name,
        field_of_study: scientist.field_of_study,
        missions: flown.iter().map(ScientistMissionResponse::from_model).collect(),
    }))
}

/// PATCH /scientists/{id}
#[utoipa::path(
    patch,
    path = "/scientists/{id}",
    params(("id" = i64, Path, description = "Scientist ID")),
    request_body = UpdateScientistRequest,
    responses(
        (status = 202, description = "Scientist updated", body = ScientistResponse),
        (status = 400, description = "Validation errors"),
        (status = 404, description = "Scientist not found")
    )
)]
pub async fn update_scientist(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    payload: Result<JsonBody<UpdateScientistRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let id: ScientistId = parse_id(ENTITY, &id)?;

    let conn = get_conn(&ctx.db)?;
    let scientist = with_transaction(&conn, |tx| {
        // A missing scientist is reported before anything about the body.
        if scientists::get_scientist(tx, id)?.is_none() {
            return Err(mc_core::Error::not_found(ENTITY, id));
        }
        let JsonBody(payload) = payload.map_err(AppError::into_inner)?;
        payload.validate()?;

        scientists::update_scientist(
            tx,
            id,
            payload.name.as_deref(),
            payload.field_of_study.as_deref(),
        )?;
        scientists::get_scientist(tx, id)?
            .ok_or_else(|| mc_core::Error::not_found(ENTITY, id))
    })?;

    tracing::info!(scientist_id = %id, "Scientist updated");

    Ok((StatusCode::ACCEPTED, Json(ScientistResponse::from_model(&scientist))))
}

/// DELETE /scientists/{id}
#[utoipa::path(
    delete,
    path = "/scientists/{id}",
    params(("id" = i64, Path, description = "Scientist ID")),
    responses(
        (status = 204, description = "Scientist and their missions deleted"),
        (status = 404, description = "Scientist not found")
    )
)]
pub async fn delete_scientist(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id: ScientistId = parse_id(ENTITY, &id)?;

    let conn = get_conn(&ctx.db)?;
    let deleted = with_transaction(&conn, |tx| scientists::delete_scientist(tx, id))?;

    if !deleted {
        return Err(mc_core::Error::not_found(ENTITY, id).into());
    }

    tracing::info!(scientist_id = %id, "Scientist deleted");

    Ok(StatusCode::NO_CONTENT)
}
