use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::context::AppContext;
use crate::error::{BoardError, Result};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

/// Bearer token from the Authorization header, if present
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Write endpoints take the admin password as a bearer token
pub fn require_admin(context: &AppContext, headers: &HeaderMap) -> Result<()> {
    match bearer_token(headers) {
        Some(token) if context.is_admin_password(token) => Ok(()),
        _ => {
            tracing::warn!("Rejected admin request with missing or wrong password");
            Err(BoardError::Unauthorized)
        }
    }
}

/// POST /api/auth
///
/// `token` is the bearer credential the write endpoints accept. There are no
/// sessions, so it is the verified admin password itself.
pub async fn login(
    State(context): State<AppContext>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>> {
    if request.password.is_empty() {
        return Err(BoardError::ValidationFailed(vec![
            "password: is required".to_string(),
        ]));
    }

    if !context.is_admin_password(&request.password) {
        tracing::warn!("Invalid admin password attempt");
        return Err(BoardError::Unauthorized);
    }

    Ok(Json(json!({ "success": true, "token": request.password })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer secret"));
        assert_eq!(bearer_token(&headers), Some("secret"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic secret"));
        assert_eq!(bearer_token(&headers), None);
    }
}
