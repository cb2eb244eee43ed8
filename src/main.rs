//! EquipTrack Server - Field Inspection Equipment Tracking

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use equiptrack_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("equiptrack_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting EquipTrack Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone())
        .expect("Failed to create services");

    // First run: create the admin account from configuration
    services
        .auth
        .bootstrap_admin()
        .await
        .expect("Failed to bootstrap admin account");

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

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

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        // User accounts (admin)
        .route("/users", post(api::users::create_user))
        .route("/users/:id", get(api::users::get_user))
        // Equipment lifecycle
        .route("/equipment", get(api::equipment::list_equipment))
        .route("/equipment", post(api::equipment::create_equipment))
        .route("/equipment/:id", get(api::equipment::get_equipment))
        .route("/equipment/:id", delete(api::equipment::deactivate_equipment))
        .route("/equipment/:id/reactivate", post(api::equipment::reactivate_equipment))
        .route("/equipment/:id/assign", post(api::equipment::assign_equipment))
        .route("/equipment/:id/return", post(api::equipment::return_equipment))
        .route("/equipment/:id/condition", put(api::equipment::update_condition))
        .route("/equipment/:id/maintenance", post(api::equipment::record_maintenance))
        .route("/equipment/:id/assignments", get(api::equipment::list_assignments))
        // History
        .route("/equipment/:id/history", get(api::history::get_history))
        .route("/history/:id/notes", post(api::history::add_notes))
        .route("/history/:id/archive", post(api::history::archive_entry))
        // Inspectors
        .route("/inspectors", get(api::inspectors::list_inspectors))
        .route("/inspectors", post(api::inspectors::create_inspector))
        .route("/inspectors/:id", get(api::inspectors::get_inspector))
        .route("/inspectors/:id", delete(api::inspectors::deactivate_inspector))
        .route(
            "/inspectors/:id/assignments",
            get(api::inspectors::get_inspector_assignments),
        )
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
