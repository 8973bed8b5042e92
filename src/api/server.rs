//! HTTP server lifecycle.
//!
//! `run_server` binds the listener, mounts `api_router`, and serves in
//! the foreground until a Ctrl-C arrives. Bind failures surface
//! immediately so a taken port is reported before any request handling
//! starts.

use tokio::net::TcpListener;

use crate::api::router::api_router;
use crate::api::types::ApiContext;

pub async fn run_server(ctx: ApiContext, host: &str, port: u16) -> std::io::Result<()> {
    let listener = TcpListener::bind((host, port)).await?;
    serve(listener, ctx).await
}

async fn serve(listener: TcpListener, ctx: ApiContext) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "API server listening");

    axum::serve(listener, api_router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received, stopping server");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::llm::MockGenerator;
    use crate::pipeline::MeetingPipeline;
    use crate::storage::{FsBlobStore, MeetingStore};

    fn test_ctx() -> (tempfile::TempDir, ApiContext) {
        let dir = tempfile::tempdir().unwrap();
        let store = MeetingStore::new(
            Box::new(FsBlobStore::new(dir.path().join("blobs"))),
            dir.path().join("minuta.db"),
        );
        let ctx = ApiContext {
            store: Arc::new(store),
            pipeline: Arc::new(MeetingPipeline::new(Box::new(MockGenerator::new("{}")))),
        };
        (dir, ctx)
    }

    #[tokio::test]
    async fn serves_health_over_http() {
        let (_dir, ctx) = test_ctx();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(serve(listener, ctx));

        let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        let json: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(json["status"], "ok");

        server.abort();
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let (_dir, ctx) = test_ctx();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(serve(listener, ctx));

        let resp = reqwest::get(format!("http://{addr}/nonexistent"))
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::NOT_FOUND);

        server.abort();
    }
}
