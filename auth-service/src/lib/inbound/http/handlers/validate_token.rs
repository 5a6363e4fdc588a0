use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::auth::models::TokenValidation;
use crate::inbound::http::router::AppState;

/// Low-stakes "is this still good" check: an invalid or expired token is a
/// successful response with `valid: false`, never an error status.
pub async fn validate_token(
    State(state): State<AppState>,
    Json(body): Json<ValidateTokenRequestBody>,
) -> Result<ApiSuccess<ValidateTokenResponseData>, ApiError> {
    let data = match state.auth_service.validate_token(&body.token).await {
        TokenValidation::Valid { claims } => ValidateTokenResponseData {
            valid: true,
            claims: Some(ClaimsData {
                sub: claims.sub.to_string(),
                email: claims.email,
                iat: claims.iat,
                exp: claims.exp,
            }),
        },
        TokenValidation::Invalid => ValidateTokenResponseData {
            valid: false,
            claims: None,
        },
    };

    Ok(ApiSuccess::new(StatusCode::OK, data))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValidateTokenRequestBody {
    #[serde(default)]
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateTokenResponseData {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claims: Option<ClaimsData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimsData {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iat: i64,
    pub exp: i64,
}
