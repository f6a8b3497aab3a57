pub mod achievements;
pub mod auth;
pub mod community;
pub mod content;
pub mod directory;
pub mod events;

use axum::Router;
use serde_json::Value;
use tower_http::trace::TraceLayer;

use crate::schema::Id;
use crate::state::AppState;

/// The full JSON API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(auth::router())
        .merge(content::router())
        .merge(community::router())
        .merge(events::router())
        .merge(achievements::router())
        .merge(directory::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Sets `field` to the caller's id on an object payload, replacing whatever
/// the client sent. Non-object payloads are left for validation to reject.
pub(crate) fn stamp_caller(body: &mut Value, field: &str, id: Id) {
    if let Value::Object(map) = body {
        map.insert(field.to_string(), Value::from(id));
    }
}

/// Like [`stamp_caller`], but keeps a value the client supplied. `null`
/// counts as not supplied.
pub(crate) fn default_caller(body: &mut Value, field: &str, id: Id) {
    if let Value::Object(map) = body {
        if map.get(field).map_or(true, Value::is_null) {
            map.insert(field.to_string(), Value::from(id));
        }
    }
}
