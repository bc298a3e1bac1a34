//! Species catalog endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    catalog::Species,
    error::{AppError, AppResult},
};

use super::CurrentSession;

/// Query parameters for the species detail view
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct DetailQuery {
    /// Origin of the navigation; "search" marks a qualifying search hit
    pub from: Option<String>,
}

/// Query parameters for species search
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Species detail response
#[derive(Debug, Serialize, ToSchema)]
pub struct SpeciesDetail {
    pub species: Species,
    /// Whether the logged-in user has favorited this species
    pub is_favorite: bool,
}

/// List the whole catalog
#[utoipa::path(
    get,
    path = "/species",
    tag = "species",
    responses(
        (status = 200, description = "All catalog entries", body = Vec<Species>)
    )
)]
pub async fn list_species(State(state): State<crate::AppState>) -> Json<Vec<Species>> {
    Json(state.services.catalog.all().to_vec())
}

/// Search the catalog by common or scientific name
#[utoipa::path(
    get,
    path = "/species/search",
    tag = "species",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching entries", body = Vec<Species>)
    )
)]
pub async fn search_species(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Species>> {
    let results = match query.q.as_deref() {
        Some(q) => state
            .services
            .catalog
            .search(q)
            .into_iter()
            .cloned()
            .collect(),
        None => Vec::new(),
    };
    Json(results)
}

/// Deterministic species of the day
#[utoipa::path(
    get,
    path = "/species/today",
    tag = "species",
    responses(
        (status = 200, description = "Today's pick", body = Species),
        (status = 404, description = "Catalog is empty")
    )
)]
pub async fn species_of_day(State(state): State<crate::AppState>) -> AppResult<Json<Species>> {
    state
        .services
        .catalog
        .species_of_day(Utc::now().date_naive())
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Species catalog is empty".to_string()))
}

/// Species detail. Arrivals tagged `?from=search` count towards the
/// weekly search tally; unknown ids never touch the tally.
#[utoipa::path(
    get,
    path = "/species/{id}",
    tag = "species",
    params(
        ("id" = String, Path, description = "Species id"),
        DetailQuery
    ),
    responses(
        (status = 200, description = "Species detail", body = SpeciesDetail),
        (status = 404, description = "Unknown species id")
    )
)]
pub async fn get_species(
    State(state): State<crate::AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<String>,
    Query(query): Query<DetailQuery>,
) -> AppResult<Json<SpeciesDetail>> {
    let species = state
        .services
        .catalog
        .get(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("No species with id {id}")))?;

    if query.from.as_deref() == Some("search") {
        state.services.tally.note_search_hit(&id).await?;
    }

    let is_favorite = match state.services.sessions.current_user(&session).await {
        Some(username) => state
            .services
            .accounts
            .favorites(&username)
            .await
            .iter()
            .any(|f| f == &id),
        None => false,
    };

    Ok(Json(SpeciesDetail { species, is_favorite }))
}
