use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::auth::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(body): Json<RequestPasswordResetBody>,
) -> Result<ApiSuccess<RequestPasswordResetData>, ApiError> {
    let email =
        EmailAddress::new(&body.email).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let reset_token = state.auth_service.request_password_reset(&email).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        RequestPasswordResetData { reset_token },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestPasswordResetBody {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestPasswordResetData {
    pub reset_token: String,
}
