//! Favorites endpoints
//!
//! Add and remove are idempotent set operations; repeating either is a
//! no-op, not an error.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{catalog::Species, error::AppResult};

use super::AuthenticatedUser;

/// Favorites of the logged-in user
#[derive(Debug, Serialize, ToSchema)]
pub struct FavoritesResponse {
    /// Stored ids, insertion order. May include ids no longer present
    /// in the catalog.
    pub ids: Vec<String>,
    /// Catalog entries for the ids that still resolve
    pub species: Vec<Species>,
}

async fn favorites_response(
    state: &crate::AppState,
    username: &str,
) -> FavoritesResponse {
    let ids = state.services.accounts.favorites(username).await;
    let species = ids
        .iter()
        .filter_map(|id| state.services.catalog.get(id))
        .cloned()
        .collect();
    FavoritesResponse { ids, species }
}

/// List the current user's favorites
#[utoipa::path(
    get,
    path = "/favorites",
    tag = "favorites",
    responses(
        (status = 200, description = "Favorites", body = FavoritesResponse),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn list_favorites(
    State(state): State<crate::AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
) -> Json<FavoritesResponse> {
    Json(favorites_response(&state, &username).await)
}

/// Add a species to the current user's favorites
#[utoipa::path(
    put,
    path = "/favorites/{id}",
    tag = "favorites",
    params(("id" = String, Path, description = "Species id")),
    responses(
        (status = 200, description = "Favorites after the add", body = FavoritesResponse),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn add_favorite(
    State(state): State<crate::AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<FavoritesResponse>> {
    state.services.accounts.add_favorite(&username, &id).await?;
    Ok(Json(favorites_response(&state, &username).await))
}

/// Remove a species from the current user's favorites
#[utoipa::path(
    delete,
    path = "/favorites/{id}",
    tag = "favorites",
    params(("id" = String, Path, description = "Species id")),
    responses(
        (status = 200, description = "Favorites after the removal", body = FavoritesResponse),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn remove_favorite(
    State(state): State<crate::AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<FavoritesResponse>> {
    state
        .services
        .accounts
        .remove_favorite(&username, &id)
        .await?;
    Ok(Json(favorites_response(&state, &username).await))
}
