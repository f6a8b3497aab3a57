use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::{AppError, AppResult};
use crate::extractors::{CurrentUser, IdPath, JsonBody};
use crate::routes::stamp_caller;
use crate::schema::validation::Payload;
use crate::schema::{
    Discussion, Insertable, NewDiscussion, NewPrayerRequest, PrayerRequest, ValidationError,
};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/prayer-requests",
            get(list_prayer_requests).post(create_prayer_request),
        )
        .route("/api/prayer-requests/{id}/pray", post(pray))
        .route(
            "/api/discussions",
            get(list_discussions).post(create_discussion),
        )
}

// --- Prayer requests ---

async fn list_prayer_requests(State(state): State<AppState>) -> Json<Vec<PrayerRequest>> {
    Json(state.storage.lock().await.get_prayer_requests())
}

async fn create_prayer_request(
    State(state): State<AppState>,
    user: CurrentUser,
    JsonBody(mut body): JsonBody,
) -> AppResult<(StatusCode, Json<PrayerRequest>)> {
    stamp_caller(&mut body, "userId", user.id);
    let new_request = NewPrayerRequest::from_payload(&body)?;

    let request = state.storage.lock().await.create_prayer_request(new_request);
    tracing::info!(id = request.id, user_id = user.id, "Created prayer request");
    Ok((StatusCode::CREATED, Json(request)))
}

/// Sets the prayer count to the value the client computed.
async fn pray(
    State(state): State<AppState>,
    user: CurrentUser,
    IdPath(id): IdPath,
    JsonBody(body): JsonBody,
) -> AppResult<Json<PrayerRequest>> {
    let mut p = Payload::new(&body);
    let count = p.required_int("count");
    p.finish()?;
    if count < 0 {
        return Err(ValidationError::single("count", "must not be negative").into());
    }

    let request = state
        .storage
        .lock()
        .await
        .update_prayer_count(id, count)
        .ok_or(AppError::NotFound("Prayer request not found"))?;

    tracing::debug!(id, count, user_id = user.id, "Updated prayer count");
    Ok(Json(request))
}

// --- Discussions ---

async fn list_discussions(State(state): State<AppState>) -> Json<Vec<Discussion>> {
    Json(state.storage.lock().await.get_discussions())
}

async fn create_discussion(
    State(state): State<AppState>,
    user: CurrentUser,
    JsonBody(mut body): JsonBody,
) -> AppResult<(StatusCode, Json<Discussion>)> {
    stamp_caller(&mut body, "userId", user.id);
    let new_discussion = NewDiscussion::from_payload(&body)?;

    let discussion = state.storage.lock().await.create_discussion(new_discussion);
    tracing::info!(id = discussion.id, user_id = user.id, "Created discussion");
    Ok((StatusCode::CREATED, Json(discussion)))
}
