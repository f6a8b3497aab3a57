use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::AppResult;
use crate::extractors::{AdminUser, JsonBody};
use crate::routes::default_caller;
use crate::schema::{Content, ContentType, Insertable, NewContent};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/content", get(list_content).post(create_content))
        .route("/api/content/{kind}", get(list_content_by_type))
}

async fn list_content(State(state): State<AppState>) -> Json<Vec<Content>> {
    Json(state.storage.lock().await.get_all_content())
}

/// An unknown type is not an error; it simply has no content.
async fn list_content_by_type(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Json<Vec<Content>> {
    match kind.parse::<ContentType>() {
        Ok(kind) => Json(state.storage.lock().await.get_content_by_type(kind)),
        Err(_) => {
            tracing::debug!(kind = %kind, "Listing unknown content type");
            Json(Vec::new())
        }
    }
}

async fn create_content(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    JsonBody(mut body): JsonBody,
) -> AppResult<(StatusCode, Json<Content>)> {
    default_caller(&mut body, "authorId", admin.id);
    let new_content = NewContent::from_payload(&body)?;

    let content = state.storage.lock().await.create_content(new_content);
    tracing::info!(id = content.id, kind = %content.kind, "Created content");
    Ok((StatusCode::CREATED, Json(content)))
}
