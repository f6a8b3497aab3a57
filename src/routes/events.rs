use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::extractors::{AdminUser, Valid};
use crate::schema::{Event, NewEvent};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/events", get(list_events).post(create_event))
}

async fn list_events(State(state): State<AppState>) -> Json<Vec<Event>> {
    Json(state.storage.lock().await.get_events())
}

async fn create_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    Valid(new_event): Valid<NewEvent>,
) -> (StatusCode, Json<Event>) {
    let event = state.storage.lock().await.create_event(new_event);
    tracing::info!(id = event.id, date = %event.date, "Created event");
    (StatusCode::CREATED, Json(event))
}
