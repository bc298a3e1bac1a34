//! Guestbook endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::guestbook::{GuestbookMessage, PostMessage},
};

use super::AuthenticatedUser;

/// Query parameters for listing messages
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct GuestbookQuery {
    /// Maximum entries to return (capped at 50)
    pub limit: Option<usize>,
}

/// Most recent guestbook entries, newest first
#[utoipa::path(
    get,
    path = "/guestbook",
    tag = "guestbook",
    params(GuestbookQuery),
    responses(
        (status = 200, description = "Recent messages", body = Vec<GuestbookMessage>)
    )
)]
pub async fn list_messages(
    State(state): State<crate::AppState>,
    Query(query): Query<GuestbookQuery>,
) -> Json<Vec<GuestbookMessage>> {
    Json(state.services.guestbook.recent(query.limit).await)
}

/// Post a guestbook message
#[utoipa::path(
    post,
    path = "/guestbook",
    tag = "guestbook",
    request_body = PostMessage,
    responses(
        (status = 201, description = "Message appended", body = GuestbookMessage),
        (status = 400, description = "Empty message body"),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn post_message(
    State(state): State<crate::AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    Json(request): Json<PostMessage>,
) -> AppResult<(StatusCode, Json<GuestbookMessage>)> {
    let message = state
        .services
        .guestbook
        .append(&username, &request.body)
        .await?;
    Ok((StatusCode::CREATED, Json(message)))
}
