pub mod admin;
pub mod webhook;

use axum::http::HeaderMap;

use crate::error::AppError;
use crate::state::AppState;

/// Verify the shared `X-Api-Key` header used by the ops-console and admin
/// tooling.
pub(crate) fn verify_api_key(state: &AppState, headers: &HeaderMap) -> Result<(), AppError> {
    let provided = headers.get("x-api-key").and_then(|value| value.to_str().ok());
    if provided == Some(state.config.webhook.api_key.as_str()) {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}
