//! Pelagos Server - Cetacean Species Encyclopedia
//!
//! A Rust REST API server over a small file-backed persistent core.

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pelagos_server::{
    api,
    catalog::SpeciesCatalog,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("pelagos_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pelagos Server v{}", env!("CARGO_PKG_VERSION"));

    // Load the read-only species catalog
    let catalog = SpeciesCatalog::load(&config.storage.catalog_file);

    // Load durable records (visit counter, weekly tally, guestbook,
    // account directory) into the single in-memory copies
    let repository = Repository::open(&config.storage.data_dir)?;
    tracing::info!(data_dir = %config.storage.data_dir.display(), "durable records loaded");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    let services = Services::new(repository, catalog);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes; the session middleware counts the visit and rolls
    // the weekly tally before every handler
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/register", post(api::auth::register))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/logout", post(api::auth::logout))
        .route("/auth/me", get(api::auth::me))
        // Species catalog
        .route("/species", get(api::species::list_species))
        .route("/species/search", get(api::species::search_species))
        .route("/species/today", get(api::species::species_of_day))
        .route("/species/:id", get(api::species::get_species))
        // Guestbook
        .route("/guestbook", get(api::guestbook::list_messages))
        .route("/guestbook", post(api::guestbook::post_message))
        // Favorites
        .route("/favorites", get(api::favorites::list_favorites))
        .route("/favorites/:id", put(api::favorites::add_favorite))
        .route("/favorites/:id", delete(api::favorites::remove_favorite))
        // Statistics
        .route("/stats", get(api::stats::get_stats))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::session_middleware,
        ))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
