use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use super::handlers::COULD_NOT_VALIDATE;
use crate::inbound::http::router::AppState;

/// Middleware that resolves the bearer token to a stored user and adds it to request extensions
///
/// Every rejection looks the same to the client; the reason is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let caller = state
        .auth_service
        .authenticate(token)
        .await
        .map_err(ApiError::from)?;

    tracing::debug!(username = %caller.username, role = %caller.role, "Request authenticated");

    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let unauthorized = |reason: &str| {
        tracing::warn!(reason, "Authorization header rejected");
        ApiError::Unauthorized(COULD_NOT_VALIDATE.to_string())
    };

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("missing header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("header is not visible ASCII"))?;

    let (scheme, token) = auth_str
        .split_once(' ')
        .ok_or_else(|| unauthorized("expected scheme and token"))?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(unauthorized("expected Bearer scheme"));
    }

    Ok(token.trim())
}
