use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::token::models::TokenPair;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

pub async fn sign_in(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Json(body): Json<SignInRequest>,
) -> Result<ApiSuccess<TokenPair>, ApiError> {
    let user_id = UserId::from_string(&body.user_id)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let is_valid = state
        .credential_service
        .verify(&user_id, &body.password)
        .await?;

    if !is_valid {
        tracing::info!(user_id = %user_id, peer = %peer, "Sign-in rejected");
        return Err(ApiError::Forbidden("invalid password".to_string()));
    }

    let pair = state
        .token_service
        .issue_tokens(&peer.to_string(), &user_id)
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, pair))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInRequest {
    user_id: String,
    password: String,
}
