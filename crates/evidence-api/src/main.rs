//! Evidence API server entry point.

use std::error::Error;
use std::sync::Arc;

use axum::Router;
use evidence_api::config::Config;
use evidence_api::routes;
use evidence_api::state::AppState;
use evidence_content::application::provider::{ContentProvider, LoadOutcome};
use evidence_content::application::source::DirectoryContentSource;
use evidence_core::clock::{Clock, SystemClock};
use evidence_profile::profile::ProfileStore;
use evidence_profile::sqlite_store::SqliteKeyValueStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Evidence API server");

    let config = Config::from_env()?;

    // Open the profile store.
    let backend = SqliteKeyValueStore::connect(&config.database_url).await?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let profile = Arc::new(ProfileStore::new(Arc::new(backend), clock.clone()));

    // Pick the startup language: explicit config, then the saved preference.
    let language = match config.default_language {
        Some(language) => language,
        None => profile.language().await.unwrap_or_default(),
    };
    let content = Arc::new(ContentProvider::new(
        Arc::new(DirectoryContentSource::new(config.content_dir.clone())),
        language,
    ));

    // Build application state and keep the controller in step with content.
    let app_state = AppState::new(clock, profile, content.clone());
    app_state.spawn_content_sync();

    if content.load_language(language).await != LoadOutcome::Loaded {
        tracing::warn!(
            %language,
            content_dir = %config.content_dir.display(),
            "starting without playable content"
        );
    }

    // Build router.
    // TODO: Restrict CORS to the renderer's origin once it is served separately.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/game", routes::game::router())
        .nest("/api/v1/profile", routes::profile::router())
        .nest("/api/v1/content", routes::content::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
