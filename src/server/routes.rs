//! REST route handlers.
//!
//! Each handler maps straight onto one store operation; error mapping
//! (400 for validation, 404 for unknown ids) lives in
//! [`super::error::ApiError`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::models::{Meal, MealDraft, MealPatch, Workout, WorkoutDraft, WorkoutPatch};

use super::error::{ApiError, ApiJson};
use super::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Confirmation body for deletes.
#[derive(Serialize)]
pub struct DeletedResponse {
    message: &'static str,
}

pub async fn list_meals(State(state): State<AppState>) -> Json<Vec<Meal>> {
    Json(state.store.read().await.meals().to_vec())
}

pub async fn list_workouts(State(state): State<AppState>) -> Json<Vec<Workout>> {
    Json(state.store.read().await.workouts().to_vec())
}

pub async fn submit_meal(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<MealDraft>,
) -> Result<(StatusCode, Json<Meal>), ApiError> {
    let meal = state.store.write().await.create_meal(draft)?;
    Ok((StatusCode::CREATED, Json(meal)))
}

pub async fn submit_workout(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<WorkoutDraft>,
) -> Result<(StatusCode, Json<Workout>), ApiError> {
    let workout = state.store.write().await.create_workout(draft)?;
    Ok((StatusCode::CREATED, Json(workout)))
}

pub async fn update_meal(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    ApiJson(patch): ApiJson<MealPatch>,
) -> Result<Json<Meal>, ApiError> {
    let meal = state.store.write().await.update_meal(id, patch)?;
    Ok(Json(meal))
}

pub async fn update_workout(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    ApiJson(patch): ApiJson<WorkoutPatch>,
) -> Result<Json<Workout>, ApiError> {
    let workout = state.store.write().await.update_workout(id, patch)?;
    Ok(Json(workout))
}

pub async fn delete_meal(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.store.write().await.delete_meal(id)?;
    Ok(Json(DeletedResponse {
        message: "Meal deleted",
    }))
}

pub async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.store.write().await.delete_workout(id)?;
    Ok(Json(DeletedResponse {
        message: "Workout deleted",
    }))
}
