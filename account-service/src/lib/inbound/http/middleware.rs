use auth::TokenClaims;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use http::header::AUTHORIZATION;

use super::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Validated access token claims, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub claims: TokenClaims,
}

/// Middleware that validates a Bearer access token and adds its claims to
/// request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?.to_string();

    let claims = state
        .token_service
        .authenticate(&token)
        .await
        .map_err(|e| {
            if e.is_internal() {
                return ApiError::internal(e).into_response();
            }
            tracing::warn!(error = %e, "Access token rejected");
            ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
        })?;

    req.extensions_mut().insert(AuthenticatedSession { claims });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::Unauthorized("Missing Authorization header".to_string()).into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::Unauthorized("Invalid Authorization header".to_string()).into_response()
    })?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
        .into_response()
    })
}
