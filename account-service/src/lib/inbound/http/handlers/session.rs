use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedSession;

pub async fn session(
    Extension(session): Extension<AuthenticatedSession>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let claims = session.claims;
    let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
        .ok_or_else(|| ApiError::internal(format!("exp out of range: {}", claims.exp)))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SessionResponseData {
            user_id: claims.user_id,
            client_addr: claims.client_addr,
            expires_at,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub user_id: String,
    pub client_addr: String,
    pub expires_at: DateTime<Utc>,
}
