pub mod handlers;

use crate::config::AppConfig;
use crate::service::DealService;

use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// State shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DealService>,
}

impl AppState {
    pub fn new(service: Arc<DealService>) -> Self {
        Self { service }
    }
}

/// `GET /`, `GET /company/:name`, `POST /refresh`, plus the logo directory as static files.
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    let logo_prefix = format!("/{}", config.logo_url_prefix.trim_matches('/'));

    Router::new()
        .route("/", get(handlers::list_deals))
        .route("/company/:name", get(handlers::company_details))
        .route("/refresh", post(handlers::refresh))
        .nest_service(&logo_prefix, ServeDir::new(&config.logo_directory))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
