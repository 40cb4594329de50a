use std::path::Path;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

use super::pages::{health_handler, page_handler, predict_handler};
use super::state::AppState;

/// Build the HTTP router: pages, the classify form target, static assets and health.
pub fn app_router(state: Arc<AppState>, assets_dir: &Path) -> Router {
    let page_router = Router::new()
        .route("/", get(page_handler))
        .route("/predict", post(predict_handler))
        .with_state(state);

    Router::new()
        .merge(page_router)
        .route("/health", get(health_handler))
        .nest_service("/assets", ServeDir::new(assets_dir))
}
