use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde_json::Value;

use crate::error::AppError;
use crate::schema::{Id, Insertable, Role, User};
use crate::state::AppState;

/// Represents the currently authenticated user.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Id,
    pub username: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}

/// Extractor that requires authentication.
/// Returns 401 if no valid session found.
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_session_token(&parts.headers, &state.config.auth.cookie_name)
            .ok_or(AppError::Unauthorized)?;

        let user_id = state
            .sessions
            .lock()
            .await
            .user_id(token)
            .ok_or(AppError::Unauthorized)?;

        // A session can outlive its user only if storage was swapped underneath it.
        let user = state
            .storage
            .lock()
            .await
            .get_user(user_id)
            .ok_or(AppError::Unauthorized)?;

        Ok(CurrentUser::from(&user))
    }
}

/// Extractor for admin-only operations.
/// Returns 401 when unauthenticated and 403 when the caller is not an admin.
pub struct AdminUser(pub CurrentUser);

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            tracing::warn!(user_id = user.id, "Non-admin attempted an admin operation");
            return Err(AppError::Forbidden);
        }
        Ok(AdminUser(user))
    }
}

/// Raw JSON body. Malformed JSON is a 400 in the same error shape as
/// every other failure.
pub struct JsonBody(pub Value);

impl FromRequest<AppState> for JsonBody {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(JsonBody(body))
    }
}

/// Numeric `{id}` path segment. A segment that is not an id names no
/// record, so it answers 404 like an unknown id.
pub struct IdPath(pub Id);

impl FromRequestParts<AppState> for IdPath {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Id>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Rejected path id: {}", rejection.body_text());
                AppError::NotFound("Not found")
            })?;
        Ok(IdPath(id))
    }
}

/// JSON body checked against an entity's insertable shape.
pub struct Valid<T>(pub T);

impl<T: Insertable + Send> FromRequest<AppState> for Valid<T> {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let JsonBody(body) = JsonBody::from_request(req, state).await?;
        Ok(Valid(T::from_payload(&body)?))
    }
}

pub fn extract_session_token<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(|s| s.trim())
        .find_map(|cookie| {
            let mut split = cookie.splitn(2, '=');
            let key = split.next()?.trim();
            let val = split.next()?.trim();
            if key == cookie_name {
                Some(val)
            } else {
                None
            }
        })
}
