//! Gender resource route handlers
//!
//! `GET/POST /genders` and `GET/PUT/DELETE /genders/{id}`. Malformed path ids
//! and bodies are rejected with 400 before any connection is borrowed.

use crate::error::{not_found_error, ApiResult, ErrorResponse};
use crate::models::{CreateGenderRequest, Gender, UpdateGenderRequest};
use crate::state::SharedState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::{debug, info};
use validator::Validate;

/// List all active genders
#[utoipa::path(
    get,
    path = "/genders",
    tag = "genders",
    operation_id = "list_genders",
    responses(
        (status = 200, description = "Active genders in storage order", body = [Gender]),
        (status = 503, description = "Database unavailable", body = ErrorResponse),
    )
)]
pub async fn list_genders(State(state): State<SharedState>) -> ApiResult<Json<Vec<Gender>>> {
    let genders = state.genders.list_active().await?;

    debug!("Found {} active genders", genders.len());
    Ok(Json(genders))
}

/// Create a new gender; it is always stored active
#[utoipa::path(
    post,
    path = "/genders",
    tag = "genders",
    operation_id = "create_gender",
    request_body = CreateGenderRequest,
    responses(
        (status = 201, description = "Gender created", body = Gender),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
    )
)]
pub async fn create_gender(
    State(state): State<SharedState>,
    payload: Result<Json<CreateGenderRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Gender>)> {
    let Json(payload) = payload?;
    payload.validate()?;

    debug!("Creating gender: {}", payload.name);
    let gender = state.genders.create(&payload.name).await?;

    info!("Gender created: {} (id: {})", gender.name, gender.id);
    Ok((StatusCode::CREATED, Json(gender)))
}

/// Fetch a gender given its identifier, active or not
#[utoipa::path(
    get,
    path = "/genders/{id}",
    tag = "genders",
    operation_id = "get_gender",
    params(("id" = i32, Path, description = "The gender identifier")),
    responses(
        (status = 200, description = "Gender found", body = Gender),
        (status = 404, description = "Gender not found", body = ErrorResponse),
    )
)]
pub async fn get_gender(
    State(state): State<SharedState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<Gender>> {
    let Path(id) = path?;

    state
        .genders
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found_error(format!("Gender {} not found", id)))
}

/// Update a gender given its identifier
///
/// The row is not re-read: the response echoes the submitted body under the
/// path id, even when no row matched.
#[utoipa::path(
    put,
    path = "/genders/{id}",
    tag = "genders",
    operation_id = "update_gender",
    params(("id" = i32, Path, description = "The gender identifier")),
    request_body = UpdateGenderRequest,
    responses(
        (status = 200, description = "Submitted gender echoed under the path id", body = Gender),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
    )
)]
pub async fn update_gender(
    State(state): State<SharedState>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateGenderRequest>, JsonRejection>,
) -> ApiResult<Json<Gender>> {
    let Path(id) = path?;
    let Json(payload) = payload?;
    payload.validate()?;

    let affected = state
        .genders
        .update(id, &payload.name, payload.is_active)
        .await?;

    if affected == 0 {
        debug!("Update of gender {} matched no rows", id);
    } else {
        info!("Gender {} updated", id);
    }

    Ok(Json(payload.into_gender(id)))
}

/// Soft delete a gender given its identifier
#[utoipa::path(
    delete,
    path = "/genders/{id}",
    tag = "genders",
    operation_id = "delete_gender",
    params(("id" = i32, Path, description = "The gender identifier")),
    responses((status = 204, description = "Gender deleted"))
)]
pub async fn delete_gender(
    State(state): State<SharedState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;

    let affected = state.genders.deactivate(id).await?;
    if affected > 0 {
        info!("Gender {} deactivated", id);
    }

    Ok(StatusCode::NO_CONTENT)
}
