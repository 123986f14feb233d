use anyhow::Context;

use parklot_api::app::{LotLayout, build_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    parklot_observability::init();

    let layout = LotLayout::from_env();
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| {
        tracing::warn!("BIND_ADDR not set; using 0.0.0.0:8080");
        "0.0.0.0:8080".to_string()
    });

    let app = build_app(layout);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .context("unexpected error while serving")
}
