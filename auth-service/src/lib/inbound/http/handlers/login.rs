use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenPairData;
use crate::auth::models::EmailAddress;
use crate::auth::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    // A malformed email cannot belong to any account; failing it the same
    // way as a wrong password keeps registered addresses unguessable.
    let email = EmailAddress::new(&body.email)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    if body.password.is_empty() {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let pair = state
        .auth_service
        .login(LoginCommand::new(email, body.password))
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, TokenPairData::from(pair)))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}
