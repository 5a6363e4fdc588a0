use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenPairData;
use crate::inbound::http::router::AppState;

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequestBody>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    let pair = state.auth_service.refresh_token(&body.refresh_token).await?;

    Ok(ApiSuccess::new(StatusCode::OK, TokenPairData::from(pair)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokenRequestBody {
    #[serde(default)]
    refresh_token: String,
}
