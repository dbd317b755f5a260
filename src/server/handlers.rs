use axum::{extract::State, http::HeaderMap, Json};
use chrono::Utc;
use serde_json::{json, Value};

use super::auth::require_admin;
use crate::context::AppContext;
use crate::error::Result;
use crate::leaderboard::{build_leaderboard, LeaderboardData};
use crate::prizes::{load_prizes, save_prizes, PrizeRecord};
use crate::timer::{load_timer, restart_contest, save_timer, TimerDocument};

/// GET /api/leaderboard
pub async fn get_leaderboard(State(context): State<AppContext>) -> Result<Json<LeaderboardData>> {
    let store = context.document_store();
    let data = build_leaderboard(&store, context.source(), Utc::now()).await?;
    Ok(Json(data))
}

/// GET /api/debug
///
/// Which storage backends and standings source are configured. Never exposes
/// secrets.
pub async fn get_debug(State(context): State<AppContext>) -> Json<Value> {
    let providers = context.document_store().provider_names();
    let has_blob = providers.contains(&"blob");
    Json(json!({
        "providers": providers,
        "hasBlob": has_blob,
        "source": context.source().name(),
    }))
}

/// GET /api/prizes
pub async fn get_prizes(State(context): State<AppContext>) -> Json<Vec<PrizeRecord>> {
    let store = context.document_store();
    Json(load_prizes(&store).await)
}

/// POST /api/prizes
pub async fn update_prizes(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Result<Json<Value>> {
    require_admin(&context, &headers)?;
    let store = context.document_store();
    let prizes = save_prizes(&store, &payload).await?;
    tracing::info!(count = prizes.len(), "Prizes updated");
    Ok(Json(json!({ "success": true })))
}

/// GET /api/timer
pub async fn get_timer(State(context): State<AppContext>) -> Json<TimerDocument> {
    let store = context.document_store();
    Json(load_timer(&store).await)
}

/// POST /api/timer
pub async fn update_timer(
    State(context): State<AppContext>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Result<Json<Value>> {
    require_admin(&context, &headers)?;
    let store = context.document_store();
    save_timer(&store, &payload).await?;
    Ok(Json(json!({ "success": true })))
}

/// POST /api/timer/restart
pub async fn restart_timer(
    State(context): State<AppContext>,
    headers: HeaderMap,
) -> Result<Json<TimerDocument>> {
    require_admin(&context, &headers)?;
    let store = context.document_store();
    let timer = restart_contest(&store, context.source(), Utc::now()).await?;
    Ok(Json(timer))
}
