//! Authentication endpoints
//!
//! Login binds the account to the caller's session; there is no token.
//! A session identifies at most one logged-in user at a time.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppResult,
    models::account::{AccountSummary, LoginRequest, RegisterRequest},
};

use super::{AuthenticatedUser, CurrentSession};

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AccountSummary),
        (status = 400, description = "Invalid username or password"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AccountSummary>)> {
    let summary = state.services.accounts.register(request).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// Log in and bind the account to the current session
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = AccountSummary),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<AccountSummary>> {
    let summary = state
        .services
        .accounts
        .authenticate(&request.username, &request.password)
        .await?;
    state.services.sessions.login(&session, &summary.username).await;
    Ok(Json(summary))
}

/// Log out the current session
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 204, description = "Logged out")
    )
)]
pub async fn logout(
    State(state): State<crate::AppState>,
    CurrentSession(session): CurrentSession,
) -> StatusCode {
    state.services.sessions.logout(&session).await;
    StatusCode::NO_CONTENT
}

/// Current account
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current account", body = AccountSummary),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn me(
    State(state): State<crate::AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
) -> AppResult<Json<AccountSummary>> {
    let summary = state.services.accounts.summary(&username).await?;
    Ok(Json(summary))
}
