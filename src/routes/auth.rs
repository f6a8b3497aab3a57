use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::auth::session::{clear_session_cookie, session_cookie};
use crate::auth::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extractors::{extract_session_token, CurrentUser, JsonBody, Valid};
use crate::schema::validation::Payload;
use crate::schema::{NewUser, User};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/user", get(current_user))
}

/// Issues a session for `user` and answers with the record plus cookie.
async fn signed_in(state: &AppState, status: StatusCode, user: User) -> Response {
    let token = state.sessions.lock().await.create(user.id);
    let auth = &state.config.auth;
    let cookie = session_cookie(&auth.cookie_name, &token, auth.session_hours);

    (status, [(header::SET_COOKIE, cookie)], Json(user)).into_response()
}

/// POST /api/register: create an account and sign it in
async fn register(
    State(state): State<AppState>,
    Valid(new_user): Valid<NewUser>,
) -> AppResult<Response> {
    // Hash before taking the storage lock.
    let password = hash_password(&new_user.password, state.config.auth.bcrypt_cost)?;

    let user = {
        let mut storage = state.storage.lock().await;
        if storage.get_user_by_username(&new_user.username).is_some() {
            return Err(AppError::BadRequest("Username already exists".into()));
        }
        storage.create_user(NewUser {
            username: new_user.username,
            password,
            display_name: new_user.display_name,
            church: new_user.church,
            role: new_user.role,
        })
    };

    tracing::info!(id = user.id, username = %user.username, "Registered user");
    Ok(signed_in(&state, StatusCode::CREATED, user).await)
}

/// POST /api/login: password sign-in
async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> AppResult<Response> {
    let mut p = Payload::new(&body);
    let username = p.required_str("username");
    let password = p.required_str("password");
    p.finish()?;

    let user = state.storage.lock().await.get_user_by_username(&username);

    let user = match user {
        Some(user) if verify_password(&password, &user.password) => user,
        _ => {
            tracing::debug!(username = %username, "Failed login");
            return Err(AppError::Unauthorized);
        }
    };

    Ok(signed_in(&state, StatusCode::OK, user).await)
}

/// POST /api/logout: drop the session, if any
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    let cookie_name = &state.config.auth.cookie_name;
    if let Some(token) = extract_session_token(&headers, cookie_name) {
        state.sessions.lock().await.remove(token);
    }

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, clear_session_cookie(cookie_name))],
    )
        .into_response())
}

/// GET /api/user: the signed-in user's record
async fn current_user(State(state): State<AppState>, user: CurrentUser) -> AppResult<Json<User>> {
    state
        .storage
        .lock()
        .await
        .get_user(user.id)
        .map(Json)
        .ok_or(AppError::NotFound("User not found"))
}
