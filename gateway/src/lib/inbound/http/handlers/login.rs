use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::INVALID_CREDENTIALS;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::inbound::http::router::AppState;
use crate::user::models::Username;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // A name that could never have been registered is just a wrong credential
    let username = Username::new(body.username)
        .map_err(|_| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let outcome = state
        .auth_service
        .login(LoginCommand {
            username,
            password: body.password,
        })
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, outcome.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: &'static str,
    pub role: String,
}

impl From<LoginOutcome> for LoginResponseData {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            access_token: outcome.access_token,
            token_type: "bearer",
            role: outcome.role.as_str().to_string(),
        }
    }
}
