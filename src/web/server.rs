use axum::{http::Method, routing::get, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{Config, ConfigError};

use super::api::health::health;
use super::api::imagery as imagery_handlers;
use super::api::satellites as satellite_handlers;
use super::api::weather as weather_handlers;
use super::api_doc::ApiDoc;
use super::state::AppState;
use super::ui::handlers as ui_handlers;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    let static_files = ServeDir::new(&state.config.web.static_dir);

    Router::new()
        // UI routes
        .route("/", get(ui_handlers::index))
        // Gateway endpoints
        .route("/api/satellites-above", get(satellite_handlers::above))
        .route("/api/satellite-passes", get(satellite_handlers::passes))
        .route("/api/earth-image", get(imagery_handlers::earth_image))
        .route("/api/weather", get(weather_handlers::current))
        .route("/api/health", get(health))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Static files
        .fallback_service(static_files)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the gateway on an already bound listener.
pub async fn serve(listener: TcpListener, config: Config) -> Result<(), ServerError> {
    let state = AppState::new(config)?;
    let app = build_router(state);

    log::info!("Gateway listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

pub async fn run_server(config: Config) -> Result<(), ServerError> {
    let bind_addr = config.web.bind.clone();
    // Fail on bad credentials before taking the port.
    config.validate()?;

    log::info!("Starting server on {}", bind_addr);
    let listener = TcpListener::bind(&bind_addr).await?;
    serve(listener, config).await
}
