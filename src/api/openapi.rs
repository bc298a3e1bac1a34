//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, favorites, guestbook, health, species, stats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pelagos API",
        version = "1.0.0",
        description = "Cetacean Species Encyclopedia REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::logout,
        auth::me,
        // Species
        species::list_species,
        species::search_species,
        species::species_of_day,
        species::get_species,
        // Guestbook
        guestbook::list_messages,
        guestbook::post_message,
        // Favorites
        favorites::list_favorites,
        favorites::add_favorite,
        favorites::remove_favorite,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Auth
            crate::models::account::RegisterRequest,
            crate::models::account::LoginRequest,
            crate::models::account::AccountSummary,
            // Species
            crate::catalog::Species,
            species::SpeciesDetail,
            // Guestbook
            crate::models::guestbook::GuestbookMessage,
            crate::models::guestbook::PostMessage,
            // Favorites
            favorites::FavoritesResponse,
            // Stats
            crate::models::tally::RankedSpecies,
            stats::StatsResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration and session login"),
        (name = "species", description = "Read-only species catalog"),
        (name = "guestbook", description = "Append-only guestbook"),
        (name = "favorites", description = "Per-account favorite species"),
        (name = "stats", description = "Usage statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
