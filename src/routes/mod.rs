pub mod api_routes;

use std::path::Path;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::service::chat_service::ChatService;
use api_routes::{chat_handler, health_handler};

pub fn router(svc: ChatService, widget_dist_dir: Option<&Path>) -> Router {
    let app = Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/health", get(health_handler))
        .with_state(svc);

    // The widget bundle, when built, is served from the same origin.
    let app = match widget_dist_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    };

    app.layer(CorsLayer::permissive()).layer(TraceLayer::new_for_http())
}
