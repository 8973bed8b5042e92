//! Service info and health endpoints.

use axum::Json;
use serde::Serialize;

use crate::config;

#[derive(Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}

/// `GET /`: service identification.
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: config::APP_NAME,
        version: config::APP_VERSION,
        description: "API for processing meeting transcripts and generating insights",
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// `GET /health`: liveness check.
pub async fn check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: config::APP_VERSION,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
