//! Service router.
//!
//! Static segments win over path parameters, so `/api/transcripts/list`
//! and `/api/transcripts/:id` can coexist. CORS is wide open since
//! browser frontends are served from a different origin.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

pub fn api_router(ctx: ApiContext) -> Router {
    Router::new()
        .route("/", get(endpoints::health::service_info))
        .route("/health", get(endpoints::health::check))
        .route("/api/transcripts/list", get(endpoints::transcripts::list))
        .route(
            "/api/transcripts/upload",
            post(endpoints::transcripts::upload),
        )
        .route("/api/transcripts/:id", get(endpoints::transcripts::detail))
        .route(
            "/api/meeting-data/generate",
            post(endpoints::meetings::generate),
        )
        .route("/api/meeting-data/list", get(endpoints::meetings::list))
        .route("/api/meeting-data/:id", get(endpoints::meetings::detail))
        .route(
            "/api/tasks/high-priority",
            get(endpoints::tasks::high_priority),
        )
        .with_state(ctx)
        .layer(CorsLayer::permissive())
}
