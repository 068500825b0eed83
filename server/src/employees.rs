//! Employee resource endpoints.
//!
//! Each handler is a stateless transform: validate the payload, check
//! existence for id-scoped operations, delegate to the store, map the
//! outcome onto a status code.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::{
    error::{ApiError, ApiResult},
    http::AppState,
    schemas::{EmployeeCreate, EmployeeResponse, EmployeeUpdate},
    store::StoreError,
};

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/employees", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_by_id).put(update).delete(delete))
}

async fn create(
    State(state): State<AppState>,
    Json(payload): Json<EmployeeCreate>,
) -> ApiResult<(StatusCode, Json<EmployeeResponse>)> {
    payload.validate()?;
    let created = state
        .store
        .create(payload)
        .await
        .map_err(|err| map_store_error(err, &state))?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<EmployeeResponse>>> {
    let employees = state
        .store
        .list()
        .await
        .map_err(|err| map_store_error(err, &state))?;
    Ok(Json(
        employees.into_iter().map(EmployeeResponse::from).collect(),
    ))
}

async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<EmployeeResponse>> {
    let employee = state
        .store
        .get(id)
        .await
        .map_err(|err| map_store_error(err, &state))?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(employee.into()))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<EmployeeUpdate>,
) -> ApiResult<Json<EmployeeResponse>> {
    payload.validate()?;
    // Existence check first, so "not found" stays distinct from store failures.
    state
        .store
        .get(id)
        .await
        .map_err(|err| map_store_error(err, &state))?
        .ok_or_else(|| not_found(id))?;
    let updated = state
        .store
        .update(id, payload)
        .await
        .map_err(|err| map_store_error(err, &state))?
        .ok_or_else(|| {
            ApiError::database("employee update affected no rows", state.config.debug)
        })?;
    Ok(Json(updated.into()))
}

async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<StatusCode> {
    state
        .store
        .get(id)
        .await
        .map_err(|err| map_store_error(err, &state))?
        .ok_or_else(|| not_found(id))?;
    let removed = state
        .store
        .delete(id)
        .await
        .map_err(|err| map_store_error(err, &state))?;
    if !removed {
        // The row vanished between the existence check and the delete.
        return Err(ApiError::database(
            "employee delete affected no rows",
            state.config.debug,
        ));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: i32) -> ApiError {
    ApiError::not_found(format!("Employee with ID {id} not found"))
}

fn map_store_error(err: StoreError, state: &AppState) -> ApiError {
    match err {
        StoreError::Conflict => ApiError::conflict("Email already exists"),
        StoreError::Db(err) => ApiError::database(err, state.config.debug),
    }
}
