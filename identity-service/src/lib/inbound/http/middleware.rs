use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::inbound::http::router::AppState;

/// Extension type carrying the verified caller identity in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedAccount {
    pub username: String,
    pub token_id: Uuid,
}

/// Middleware that verifies bearer tokens on protected routes.
///
/// Every verification failure (expired, tampered, wrong key, malformed)
/// produces the same response; the root cause is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let payload = state.token_maker.verify_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
        unauthorized_response()
    })?;

    req.extensions_mut().insert(AuthenticatedAccount {
        username: payload.subject,
        token_id: payload.token_id,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(unauthorized_response)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized_response())?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(unauthorized_response)
}

fn unauthorized_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid or expired token"
        })),
    )
        .into_response()
}
