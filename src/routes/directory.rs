use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::{AppError, AppResult};
use crate::extractors::{AdminUser, IdPath, Valid};
use crate::schema::{Campus, Church, NewCampus, NewChurch};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/churches", get(list_churches).post(create_church))
        .route("/api/churches/{id}", get(get_church))
        .route("/api/churches/{id}/campuses", get(list_campuses))
        .route("/api/campuses", post(create_campus))
}

async fn list_churches(State(state): State<AppState>) -> Json<Vec<Church>> {
    Json(state.storage.lock().await.get_all_churches())
}

async fn get_church(State(state): State<AppState>, IdPath(id): IdPath) -> AppResult<Json<Church>> {
    state
        .storage
        .lock()
        .await
        .get_church(id)
        .map(Json)
        .ok_or(AppError::NotFound("Church not found"))
}

async fn create_church(
    State(state): State<AppState>,
    _admin: AdminUser,
    Valid(new_church): Valid<NewChurch>,
) -> (StatusCode, Json<Church>) {
    let church = state.storage.lock().await.create_church(new_church);
    tracing::info!(id = church.id, name = %church.name, "Created church");
    (StatusCode::CREATED, Json(church))
}

async fn list_campuses(State(state): State<AppState>, IdPath(id): IdPath) -> Json<Vec<Campus>> {
    Json(state.storage.lock().await.get_campuses(id))
}

/// The storage layer does not check `churchId`; the route does.
async fn create_campus(
    State(state): State<AppState>,
    _admin: AdminUser,
    Valid(new_campus): Valid<NewCampus>,
) -> AppResult<(StatusCode, Json<Campus>)> {
    let campus = {
        let mut storage = state.storage.lock().await;
        if storage.get_church(new_campus.church_id).is_none() {
            return Err(AppError::NotFound("Church not found"));
        }
        storage.create_campus(new_campus)
    };

    tracing::info!(id = campus.id, church_id = campus.church_id, "Created campus");
    Ok((StatusCode::CREATED, Json(campus)))
}
