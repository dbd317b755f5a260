use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::BoardError;
use crate::store::StoreError;

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let (status_code, body) = match &self {
            Self::ValidationFailed(details) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Validation failed",
                    "details": details
                }),
            ),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({
                    "error": "Unauthorized"
                }),
            ),
            Self::SourceUnavailable(e) => {
                tracing::error!("Standings unavailable: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "Failed to fetch leaderboard data"
                    }),
                )
            }
            Self::Storage(StoreError::NoStorageAvailable) => {
                tracing::error!("Write attempted without a storage backend");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "No storage available"
                    }),
                )
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Failed to save document"
                    }),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}
