use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::chat::models::ChatPrompt;
use crate::domain::user::models::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn chat(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<ChatRequestBody>,
) -> Result<ApiSuccess<ChatResponseData>, ApiError> {
    let prompt = ChatPrompt::new(body.message)?;

    let reply = state.chat_client.complete(&prompt).await?;

    tracing::info!(username = %caller.username, role = %caller.role, "Chat completion served");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ChatResponseData {
            reply: reply.content,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatRequestBody {
    message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatResponseData {
    pub reply: String,
}
