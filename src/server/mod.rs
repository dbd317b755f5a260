pub mod auth;
pub mod error;
pub mod handlers;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::context::AppContext;

pub fn router(context: AppContext) -> Router {
    Router::new()
        .route("/api/leaderboard", get(handlers::get_leaderboard))
        .route(
            "/api/prizes",
            get(handlers::get_prizes).post(handlers::update_prizes),
        )
        .route(
            "/api/timer",
            get(handlers::get_timer).post(handlers::update_timer),
        )
        .route("/api/timer/restart", post(handlers::restart_timer))
        .route("/api/auth", post(auth::login))
        .route("/api/debug", get(handlers::get_debug))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(context)
}

/// Bind and serve until Ctrl-C
pub async fn serve(context: AppContext, bind_address: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Listening on http://{}", bind_address);

    axum::serve(listener, router(context))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
