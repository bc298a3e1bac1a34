//! API handlers for the Pelagos REST endpoints
//!
//! The session middleware here is the only place the visit counter and
//! the weekly rollover are triggered: both run on every inbound request
//! before any handler logic.

pub mod auth;
pub mod favorites;
pub mod guestbook;
pub mod health;
pub mod openapi;
pub mod species;
pub mod stats;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap, HeaderValue,
    },
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{error::AppError, AppState};

pub const SESSION_COOKIE: &str = "pelagos_session";

/// Session id attached to the request by the middleware
#[derive(Debug, Clone, Copy)]
pub struct SessionId(pub Uuid);

fn session_token(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}

/// Resolve the session, count the visit at most once per session, roll
/// the weekly tally, then run the handler. A fresh session gets its
/// cookie set on the way out.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = session_token(request.headers());
    let (session, created) = state.services.sessions.ensure(token).await;

    if let Err(e) = state.services.touch_visit(&session).await {
        tracing::error!(error = %e, "failed to count visit");
    }
    if let Err(e) = state.services.tally.roll_week().await {
        tracing::error!(error = %e, "failed to roll weekly tally");
    }

    request.extensions_mut().insert(SessionId(session));
    let mut response = next.run(request).await;

    if created {
        let cookie = format!("{SESSION_COOKIE}={session}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

/// Extractor for the request's session id
pub struct CurrentSession(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionId>()
            .map(|s| CurrentSession(s.0))
            .ok_or_else(|| AppError::Internal("session middleware not installed".to_string()))
    }
}

/// Extractor for the logged-in username; rejects anonymous sessions
pub struct AuthenticatedUser(pub String);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentSession(session) = CurrentSession::from_request_parts(parts, state).await?;
        state
            .services
            .sessions
            .current_user(&session)
            .await
            .map(AuthenticatedUser)
            .ok_or_else(|| AppError::Authentication("Login required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_parses_among_other_cookies() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; pelagos_session={id}; lang=en")).unwrap(),
        );
        assert_eq!(session_token(&headers), Some(id));
    }

    #[test]
    fn session_token_rejects_garbage() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("pelagos_session=not-a-uuid"));
        assert_eq!(session_token(&headers), None);
        assert_eq!(session_token(&HeaderMap::new()), None);
    }
}
