use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::{AppError, AppResult};
use crate::extractors::{CurrentUser, JsonBody};
use crate::routes::stamp_caller;
use crate::schema::validation::Payload;
use crate::schema::{
    Achievement, Insertable, NewUserAchievement, User, UserAchievement, ValidationError,
};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/achievements", get(list_achievements))
        .route(
            "/api/user-achievements",
            get(list_user_achievements).post(award_achievement),
        )
        .route("/api/user-progress", post(update_progress))
}

async fn list_achievements(State(state): State<AppState>) -> Json<Vec<Achievement>> {
    Json(state.storage.lock().await.get_achievements())
}

async fn list_user_achievements(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Json<Vec<Achievement>> {
    Json(state.storage.lock().await.get_user_achievements(user.id))
}

/// Awards are recorded unconditionally, repeats included.
async fn award_achievement(
    State(state): State<AppState>,
    user: CurrentUser,
    JsonBody(mut body): JsonBody,
) -> AppResult<(StatusCode, Json<UserAchievement>)> {
    stamp_caller(&mut body, "userId", user.id);
    let award = NewUserAchievement::from_payload(&body)?;

    let award = state.storage.lock().await.award_achievement(award);
    tracing::info!(
        user_id = award.user_id,
        achievement_id = award.achievement_id,
        "Awarded achievement"
    );
    Ok((StatusCode::CREATED, Json(award)))
}

async fn update_progress(
    State(state): State<AppState>,
    user: CurrentUser,
    JsonBody(body): JsonBody,
) -> AppResult<Json<User>> {
    let mut p = Payload::new(&body);
    let level_progress = p.required_int("levelProgress");
    p.finish()?;
    if !(0..=100).contains(&level_progress) {
        return Err(ValidationError::single("levelProgress", "must be between 0 and 100").into());
    }

    let user = state
        .storage
        .lock()
        .await
        .update_user_progress(user.id, level_progress)
        .ok_or(AppError::NotFound("User not found"))?;

    Ok(Json(user))
}
