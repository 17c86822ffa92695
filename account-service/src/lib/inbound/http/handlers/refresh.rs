use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::errors::AuthError;
use crate::domain::token::models::TokenPair;
use crate::inbound::http::router::AppState;

pub async fn refresh(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Json(body): Json<RefreshRequest>,
) -> Result<ApiSuccess<TokenPair>, ApiError> {
    state
        .token_service
        .refresh_token(&peer.to_string(), &body.token)
        .await
        .map_err(refresh_error)
        .map(|pair| ApiSuccess::new(StatusCode::OK, pair))
}

/// Every rejected refresh that is the caller's fault is a 400, except a
/// request from the wrong address.
fn refresh_error(err: AuthError) -> ApiError {
    if err.is_internal() {
        return ApiError::internal(err);
    }

    match err {
        AuthError::AddressMismatch => ApiError::Forbidden(err.to_string()),
        _ => ApiError::BadRequest(err.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequest {
    token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_error_mapping() {
        assert_eq!(
            refresh_error(AuthError::InvalidToken),
            ApiError::BadRequest("invalid token".to_string())
        );
        assert_eq!(
            refresh_error(AuthError::UserNotFound),
            ApiError::BadRequest("user not found".to_string())
        );
        assert_eq!(
            refresh_error(AuthError::IncorrectSignMethod),
            ApiError::BadRequest("incorrect sign method".to_string())
        );
        assert!(matches!(
            refresh_error(AuthError::AddressMismatch),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            refresh_error(AuthError::CannotRefreshToken),
            ApiError::InternalServerError(_)
        ));
    }
}
