use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::auth::models::ResetPasswordCommand;
use crate::inbound::http::router::AppState;

const MIN_PASSWORD_LENGTH: usize = 8;

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequestBody>,
) -> Result<ApiSuccess<ResetPasswordResponseData>, ApiError> {
    if body.new_password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest("Password too short".to_string()));
    }

    state
        .auth_service
        .reset_password(ResetPasswordCommand {
            token: body.token,
            new_password: body.new_password,
        })
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetPasswordResponseData { ok: true },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordRequestBody {
    #[serde(default)]
    token: String,
    new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetPasswordResponseData {
    pub ok: bool,
}
