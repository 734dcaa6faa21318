use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::chat::errors::ChatError;
use crate::user::errors::CredentialError;

pub mod chat;
pub mod login;
pub mod register;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const COULD_NOT_VALIDATE: &str = "Could not validate credentials";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
    BadGateway(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let mut response =
            (status, Json(ApiResponseBody::new_error(status, message))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::DuplicateUsername(_) => ApiError::Conflict(err.to_string()),
            CredentialError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            CredentialError::Unauthorized(_)
            | CredentialError::UnknownSubject
            | CredentialError::RoleMismatch => {
                tracing::warn!(reason = %err, "Bearer token rejected");
                ApiError::Unauthorized(COULD_NOT_VALIDATE.to_string())
            }
            CredentialError::InvalidUsername(_) | CredentialError::InvalidRole(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            CredentialError::Password(_)
            | CredentialError::TokenIssue(_)
            | CredentialError::DatabaseError(_)
            | CredentialError::Unknown(_) => {
                tracing::error!(error = %err, "Credential operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::EmptyMessage => ApiError::BadRequest(err.to_string()),
            ChatError::Upstream(_) | ChatError::InvalidResponse(_) => {
                tracing::error!(error = %err, "Chat completion failed");
                ApiError::BadGateway("Chat provider request failed".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use auth::AuthError;

    use super::*;

    #[test]
    fn test_token_failures_collapse_to_one_message() {
        let errors = [
            CredentialError::Unauthorized(AuthError::Expired),
            CredentialError::Unauthorized(AuthError::InvalidSignature),
            CredentialError::UnknownSubject,
            CredentialError::RoleMismatch,
        ];
        for err in errors {
            assert_eq!(
                ApiError::from(err),
                ApiError::Unauthorized(COULD_NOT_VALIDATE.to_string())
            );
        }
    }

    #[test]
    fn test_unauthorized_response_carries_challenge() {
        let response = ApiError::Unauthorized(COULD_NOT_VALIDATE.to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    }

    #[test]
    fn test_database_errors_hide_details() {
        let err = CredentialError::DatabaseError("connection refused".to_string());
        assert_eq!(
            ApiError::from(err),
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[test]
    fn test_chat_errors_map_to_status() {
        assert_eq!(
            ApiError::from(ChatError::EmptyMessage),
            ApiError::BadRequest("Message cannot be empty".to_string())
        );
        assert!(matches!(
            ApiError::from(ChatError::Upstream("timeout".to_string())),
            ApiError::BadGateway(_)
        ));
    }
}
