//! IdeaNest Backend
//!
//! In-memory idea capture service: categories, pinning, search, keyword
//! assist, dictation drafts and Markdown export.

mod api;
mod auth;
mod classifier;
mod config;
mod drafts;
mod errors;
mod export;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use drafts::DraftBoard;
use store::IdeaStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<IdeaStore>,
    pub drafts: Arc<DraftBoard>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = if config.seed {
            IdeaStore::seeded()
        } else {
            IdeaStore::empty()
        };

        Self {
            store: Arc::new(store),
            drafts: Arc::new(DraftBoard::new(config.assist_delay, config.draft_ttl)),
            config: Arc::new(config),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting IdeaNest Backend");
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Assist delay: {:?}", config.assist_delay);
    tracing::info!("Draft idle timeout: {:?}", config.draft_ttl);

    // Warn if PSK is not configured
    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (IDEANEST_API_PSK). Authentication is disabled!");
    }

    let bind_addr = config.bind_addr;
    let state = AppState::new(config);
    let snapshot = state.store.snapshot().await;
    tracing::info!(
        "Store ready with {} ideas in {} categories",
        snapshot.ideas.len(),
        snapshot.categories.len()
    );

    // Sweep abandoned drafts
    let _sweeper = drafts::start_sweeper(state.drafts.clone());

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // API routes
    let api_routes = Router::new()
        // Snapshot
        .route("/snapshot", get(api::get_snapshot))
        .route("/snapshot/revision", get(api::get_revision))
        // Ideas
        .route("/ideas", get(api::list_ideas).post(api::create_idea))
        .route("/ideas/recent", get(api::recent_ideas))
        .route(
            "/ideas/{id}",
            get(api::get_idea)
                .put(api::update_idea)
                .delete(api::delete_idea),
        )
        .route("/ideas/{id}/pin", post(api::toggle_pin_idea))
        .route("/ideas/{id}/export", get(api::export_idea))
        .route("/filter", put(api::update_filter))
        // Categories
        .route(
            "/categories",
            get(api::list_categories).post(api::create_category),
        )
        // Classifier
        .route("/classify/content", post(api::classify_content))
        .route("/classify/categories", post(api::classify_categories))
        // Drafts
        .route("/drafts", post(api::create_draft))
        .route(
            "/drafts/{id}",
            get(api::get_draft)
                .patch(api::update_draft)
                .delete(api::discard_draft),
        )
        .route(
            "/drafts/{id}/categories/{category_id}",
            post(api::toggle_draft_category),
        )
        .route("/drafts/{id}/assist", post(api::request_assist))
        .route("/drafts/{id}/autotag", post(api::request_auto_tag))
        .route("/drafts/{id}/dictation", post(api::toggle_dictation))
        .route("/drafts/{id}/transcript", post(api::push_transcript))
        .route("/drafts/{id}/commit", post(api::commit_draft))
        // Export
        .route("/export", get(api::export_ideas))
        // Apply PSK auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::psk_auth_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
