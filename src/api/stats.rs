//! Usage statistics endpoint

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::tally::RankedSpecies};

/// Site-wide usage statistics
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    /// Distinct sessions counted since the site went up
    pub visitor_count: u64,
    /// Current ISO week token, e.g. "2024-W11"
    pub week_id: String,
    /// Sum of all search hits this week
    pub total_searches: u64,
    /// Top searched species this week
    pub top: Vec<RankedSpecies>,
    pub guestbook_total: usize,
    pub species_total: usize,
    pub generated_at: String,
}

/// Usage statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Usage statistics", body = StatsResponse)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<StatsResponse>> {
    let tally = state.services.tally.snapshot().await?;
    let top = state.services.tally.top_n(10).await?;

    Ok(Json(StatsResponse {
        visitor_count: state.services.visits.count().await,
        total_searches: tally.total(),
        week_id: tally.week_id,
        top,
        guestbook_total: state.services.guestbook.total().await,
        species_total: state.services.catalog.len(),
        generated_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }))
}
