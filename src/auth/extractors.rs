use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::CookieJar;

use crate::{
    auth::{
        repo::Role,
        session::{Session, SessionKeys, SESSION_COOKIE},
    },
    error::AppError,
    state::AppState,
};

fn session_from_parts(parts: &Parts, state: &AppState) -> Option<Session> {
    let jar = CookieJar::from_headers(&parts.headers);
    let cookie = jar.get(SESSION_COOKIE)?;
    let keys = SessionKeys::from_ref(state);
    keys.verify(cookie.value()).ok()
}

/// Session requirement for interactive pages: anonymous requests are sent
/// to the login form instead of getting an error body.
pub struct PageSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for PageSession {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_from_parts(parts, state)
            .map(PageSession)
            .ok_or_else(|| Redirect::to("/login"))
    }
}

/// Session requirement for the JSON endpoint: anonymous requests get a
/// structured 401 instead of a redirect.
pub struct ApiSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for ApiSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        session_from_parts(parts, state)
            .map(ApiSession)
            .ok_or(AppError::Unauthorized)
    }
}

/// Session requirement for the admin panel. A missing session and a
/// present-but-non-admin session are refused the same way: a plain
/// access-denied answer, never a redirect.
pub struct AdminSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match session_from_parts(parts, state) {
            Some(session) if session.role == Role::Admin => Ok(AdminSession(session)),
            _ => Err(AppError::Forbidden),
        }
    }
}
